//! Catalog-level operations (diff/merge) reusable by CLI and library users.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::types::{Catalog, Entry};

/// Added/changed/deleted counters between two catalog snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub changed: usize,
    pub deleted: usize,
}

/// The result of diffing two catalogs: counters plus the new-or-changed
/// entries worth reviewing, in ascending `msgid` order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogDiff {
    pub stats: DiffStats,
    pub review_entries: Vec<Entry>,
}

fn entries_equal(a: &Entry, b: &Entry) -> bool {
    a.msg_id == b.msg_id
        && a.msg_str == b.msg_str
        && a.msg_id_plural == b.msg_id_plural
        && a.msg_str_plural == b.msg_str_plural
        && a.fuzzy == b.fuzzy
        && a.obsolete == b.obsolete
}

/// Compares two catalog snapshots.
///
/// Obsolete entries never participate on either side: a retired entry that
/// comes back counts as added, not changed. Both sides are sorted by
/// `msgid` and walked with a two-pointer merge.
pub fn diff_catalogs(old: &Catalog, new: &Catalog) -> CatalogDiff {
    let mut old_entries: Vec<&Entry> = old.entries.iter().filter(|e| !e.obsolete).collect();
    let mut new_entries: Vec<&Entry> = new.entries.iter().filter(|e| !e.obsolete).collect();
    old_entries.sort_by(|a, b| a.msg_id.cmp(&b.msg_id));
    new_entries.sort_by(|a, b| a.msg_id.cmp(&b.msg_id));

    let mut diff = CatalogDiff::default();
    let mut i = 0;
    let mut j = 0;
    while i < old_entries.len() && j < new_entries.len() {
        match old_entries[i].msg_id.cmp(&new_entries[j].msg_id) {
            std::cmp::Ordering::Less => {
                diff.stats.deleted += 1;
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                diff.stats.added += 1;
                diff.review_entries.push(new_entries[j].clone());
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                if !entries_equal(old_entries[i], new_entries[j]) {
                    diff.stats.changed += 1;
                    diff.review_entries.push(new_entries[j].clone());
                }
                i += 1;
                j += 1;
            }
        }
    }
    diff.stats.deleted += old_entries.len() - i;
    for entry in &new_entries[j..] {
        diff.stats.added += 1;
        diff.review_entries.push((*entry).clone());
    }
    diff
}

/// Combines partial catalogs into one.
///
/// The header comes from the first source unconditionally. Entries keep
/// their encounter order and the first entry seen per merge key wins; later
/// duplicates are dropped regardless of content, so callers order sources
/// by priority.
pub fn merge_catalogs(sources: &[Catalog]) -> Catalog {
    let Some(first) = sources.first() else {
        return Catalog::new();
    };
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for source in sources {
        for entry in &source.entries {
            if seen.insert(entry.merge_key()) {
                entries.push(entry.clone());
            }
        }
    }
    first.with_entries(entries)
}
