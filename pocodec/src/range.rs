//! Compact 1-based range selection over an already-filtered entry list.
//!
//! The grammar is comma-separated tokens: a bare index `3`, a bounded span
//! `9-13`, an open start `-5` (everything up to 5), or an open end `50-`
//! (everything from 50). An empty spec selects every entry.

use std::collections::BTreeSet;

use crate::error::Error;

/// Resolves `spec` against a sequence of length `max`.
///
/// Out-of-bounds indices are silently dropped and duplicates collapse; the
/// result is ascending. Non-numeric tokens, inverted bounds, and a bare `-`
/// are errors.
pub fn parse_entry_range(spec: &str, max: usize) -> Result<Vec<usize>, Error> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Ok((1..=max).collect());
    }

    let mut selected = BTreeSet::new();
    for token in spec.split(',') {
        let token = token.trim();
        if token.is_empty() {
            return Err(Error::invalid_range(token, "empty token"));
        }
        match token.split_once('-') {
            None => {
                let index = parse_index(token, token)?;
                if (1..=max).contains(&index) {
                    selected.insert(index);
                }
            }
            Some(("", "")) => {
                return Err(Error::invalid_range(token, "both sides of `-` are empty"));
            }
            Some(("", end)) => {
                let end = parse_index(end, token)?;
                selected.extend(1..=end.min(max));
            }
            Some((start, "")) => {
                let start = parse_index(start, token)?;
                selected.extend(start.max(1)..=max);
            }
            Some((start, end)) => {
                let start = parse_index(start, token)?;
                let end = parse_index(end, token)?;
                if start > end {
                    return Err(Error::invalid_range(token, "start is greater than end"));
                }
                selected.extend(start.max(1)..=end.min(max));
            }
        }
    }
    Ok(selected.into_iter().collect())
}

fn parse_index(text: &str, token: &str) -> Result<usize, Error> {
    text.trim()
        .parse()
        .map_err(|_| Error::invalid_range(token, format!("`{}` is not a number", text.trim())))
}
