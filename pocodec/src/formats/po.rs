//! Support for the gettext PO text format.
//!
//! Parsing is a tolerant, line-oriented scan that never fails: malformed
//! quoting passes through unchanged, unknown lines are preserved, orphaned
//! comments attach to the next entry. Serialization replays original lines
//! verbatim wherever they were preserved — parse then write reproduces an
//! unmodified catalog byte for byte — and synthesizes canonical PO text for
//! entries that have no original lines.

use std::io::{BufRead, Read, Write};

use crate::{
    error::Error,
    escape::{po_escape, po_unescape},
    traits::Parser,
    types::{Catalog, Entry, Representation, ensure_fuzzy_flag, has_fuzzy_flag, strip_fuzzy_flag},
};

/// Options controlling PO text output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WriteOptions {
    /// Appends one extra newline after the last entry, producing a trailing
    /// blank line. Off by default; the two settings match two historical
    /// output conventions, so the choice is explicit rather than inferred.
    pub trailing_newline: bool,
}

/// Represents a gettext PO (or POT) catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Format {
    /// The parsed catalog.
    pub catalog: Catalog,
}

impl Format {
    /// Serializes the catalog to PO text with the given options.
    pub fn to_po_string(&self, options: &WriteOptions) -> String {
        write_string(&self.catalog, options)
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(Error::Io)?;
        Ok(Format {
            catalog: parse(&content),
        })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(self.to_po_string(&WriteOptions::default()).as_bytes())
            .map_err(Error::Io)
    }
}

impl From<Format> for Catalog {
    fn from(value: Format) -> Self {
        value.catalog
    }
}

impl From<Catalog> for Format {
    fn from(catalog: Catalog) -> Self {
        Format { catalog }
    }
}

/// Parses PO text into a catalog. Never fails: this is a best-effort line
/// scanner, not a validating grammar.
pub fn parse(content: &str) -> Catalog {
    let mut parser = PoParser::default();
    let mut lines: Vec<&str> = content.split('\n').collect();
    // A final newline produces one empty trailing segment; the writer adds
    // the newline back after the last line.
    if lines.last() == Some(&"") {
        lines.pop();
    }
    for raw in lines {
        parser.line(raw);
    }
    parser.finish()
}

/// Serializes a catalog to PO text.
pub fn write_string(catalog: &Catalog, options: &WriteOptions) -> String {
    let mut out = String::new();
    match &catalog.header_source {
        Representation::Verbatim(lines) => {
            for line in lines {
                out.push_str(line);
                out.push('\n');
            }
        }
        Representation::Structured => synthesize_header(&mut out, catalog),
    }
    for (index, entry) in catalog.entries.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        match &entry.source {
            Representation::Verbatim(lines) => {
                for line in lines {
                    out.push_str(line);
                    out.push('\n');
                }
            }
            Representation::Structured => synthesize_entry(&mut out, entry),
        }
    }
    if options.trailing_newline && !out.is_empty() {
        out.push('\n');
    }
    out
}

/// Removes exactly one leading and one trailing `"` when both are present;
/// anything else is returned unchanged (tolerant of malformed quoting).
fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

/// Splits PO-escaped text after each `\n` escape sequence, respecting escape
/// pairs so an escaped backslash followed by a literal `n` does not split.
fn split_po_newlines(s: &str) -> Vec<&str> {
    let bytes = s.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 1 < bytes.len() {
            if bytes[i + 1] == b'n' {
                segments.push(&s[start..i + 2]);
                start = i + 2;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    if start < s.len() {
        segments.push(&s[start..]);
    }
    segments
}

fn push_field(out: &mut String, prefix: &str, keyword: &str, value: &str) {
    let segments = split_po_newlines(value);
    if segments.len() <= 1 {
        out.push_str(prefix);
        out.push_str(keyword);
        out.push_str(" \"");
        out.push_str(value);
        out.push_str("\"\n");
    } else {
        out.push_str(prefix);
        out.push_str(keyword);
        out.push_str(" \"\"\n");
        for segment in segments {
            out.push_str(prefix);
            out.push('"');
            out.push_str(segment);
            out.push_str("\"\n");
        }
    }
}

fn synthesize_header(out: &mut String, catalog: &Catalog) {
    if !catalog.header_comment.is_empty() {
        for line in catalog.header_comment.split('\n') {
            out.push_str(line);
            out.push('\n');
        }
    }
    out.push_str("msgid \"\"\n");
    out.push_str("msgstr \"\"\n");
    for line in catalog.header_meta.split('\n') {
        if line.is_empty() {
            continue;
        }
        out.push('"');
        out.push_str(&po_escape(line));
        out.push_str("\\n\"\n");
    }
    out.push('\n');
}

fn synthesize_entry(out: &mut String, entry: &Entry) {
    let mut comments = entry.comments.clone();
    strip_fuzzy_flag(&mut comments);
    if entry.fuzzy {
        ensure_fuzzy_flag(&mut comments);
    }
    for line in &comments {
        out.push_str(line);
        out.push('\n');
    }

    let prefix = if entry.obsolete { "#~ " } else { "" };
    if entry.obsolete
        && let Some(previous) = &entry.msg_id_previous
    {
        push_field(out, "#~| ", "msgid", previous);
    }
    push_field(out, prefix, "msgid", &entry.msg_id);
    if let Some(plural) = &entry.msg_id_plural {
        push_field(out, prefix, "msgid_plural", plural);
    }
    if entry.msg_id_plural.is_some() || !entry.msg_str_plural.is_empty() {
        if entry.msg_str_plural.is_empty() {
            push_field(out, prefix, "msgstr[0]", "");
        }
        for (index, form) in entry.msg_str_plural.iter().enumerate() {
            push_field(out, prefix, &format!("msgstr[{index}]"), form);
        }
    } else {
        push_field(out, prefix, "msgstr", &entry.msg_str);
    }
}

/// The field that quoted continuation lines currently attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveField {
    MsgId,
    MsgIdPlural,
    MsgStr,
    MsgStrPlural(usize),
    PreviousId,
}

/// Explicit parser state. Continuation targeting and header capture are
/// driven from here; combinations like "in msgid and in msgstr at once" are
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum ParserState {
    /// Between entries; comments and blanks accumulate toward the next one.
    #[default]
    Idle,
    /// Inside the header's `msgid ""` line block.
    HeaderMsgid,
    /// Inside the header's `msgstr ""` continuation block.
    HeaderMsgstr,
    /// Inside an entry.
    InEntry(ActiveField),
}

#[derive(Debug, Default)]
struct Accumulators {
    msg_id: Option<String>,
    msg_id_plural: Option<String>,
    msg_str: Option<String>,
    msg_str_plural: Vec<String>,
}

impl Accumulators {
    fn is_empty(&self) -> bool {
        self.msg_id.is_none()
            && self.msg_id_plural.is_none()
            && self.msg_str.is_none()
            && self.msg_str_plural.is_empty()
    }
}

#[derive(Debug, Default)]
struct EntryBuilder {
    comments: Vec<String>,
    msg_id_previous: Option<String>,
    obsolete: bool,
    raw_lines: Vec<String>,
    acc: Accumulators,
}

impl EntryBuilder {
    fn has_content(&self) -> bool {
        !self.acc.is_empty() || self.msg_id_previous.is_some()
    }

    fn append(&mut self, field: ActiveField, segment: &str) {
        match field {
            ActiveField::MsgId => {
                if let Some(value) = &mut self.acc.msg_id {
                    value.push_str(segment);
                }
            }
            ActiveField::MsgIdPlural => {
                if let Some(value) = &mut self.acc.msg_id_plural {
                    value.push_str(segment);
                }
            }
            ActiveField::MsgStr => {
                if let Some(value) = &mut self.acc.msg_str {
                    value.push_str(segment);
                }
            }
            ActiveField::MsgStrPlural(index) => {
                if let Some(value) = self.acc.msg_str_plural.get_mut(index) {
                    value.push_str(segment);
                }
            }
            ActiveField::PreviousId => {
                if let Some(value) = &mut self.msg_id_previous {
                    value.push_str(segment);
                }
            }
        }
    }

    fn finish(self) -> Entry {
        let fuzzy = has_fuzzy_flag(&self.comments);
        Entry {
            msg_id: self.acc.msg_id.unwrap_or_default(),
            msg_str: self.acc.msg_str.unwrap_or_default(),
            msg_id_plural: self.acc.msg_id_plural,
            msg_str_plural: self.acc.msg_str_plural,
            comments: self.comments,
            fuzzy,
            obsolete: self.obsolete,
            msg_id_previous: self.msg_id_previous,
            source: Representation::Verbatim(self.raw_lines),
        }
    }
}

#[derive(Debug, Default)]
struct PoParser {
    state: ParserState,
    current: Option<EntryBuilder>,
    entries: Vec<Entry>,
    header_comment: Vec<String>,
    header_msgstr: String,
    header_raw: Vec<String>,
    header_captured: bool,
}

impl PoParser {
    fn line(&mut self, raw: &str) {
        let trimmed = raw.trim();
        match self.state {
            ParserState::HeaderMsgid => {
                if trimmed.is_empty() {
                    self.header_raw.push(raw.to_string());
                    self.finish_header();
                    return;
                }
                if let Some(rest) = trimmed.strip_prefix("msgstr")
                    && !rest.starts_with('[')
                {
                    self.header_raw.push(raw.to_string());
                    self.header_msgstr.push_str(strip_quotes(rest.trim()));
                    self.state = ParserState::HeaderMsgstr;
                    return;
                }
                if trimmed.starts_with('"') {
                    // The header msgid is empty by definition; continuation
                    // text contributes nothing but the line is preserved.
                    self.header_raw.push(raw.to_string());
                    return;
                }
                self.finish_header();
                self.dispatch(trimmed, raw);
            }
            ParserState::HeaderMsgstr => {
                if trimmed.is_empty() {
                    self.header_raw.push(raw.to_string());
                    self.finish_header();
                    return;
                }
                if trimmed.starts_with('"') {
                    self.header_raw.push(raw.to_string());
                    self.header_msgstr.push_str(strip_quotes(trimmed));
                    return;
                }
                self.finish_header();
                self.dispatch(trimmed, raw);
            }
            ParserState::Idle | ParserState::InEntry(_) => self.dispatch(trimmed, raw),
        }
    }

    fn dispatch(&mut self, line: &str, raw: &str) {
        if line.is_empty() {
            if self.current.as_ref().is_some_and(EntryBuilder::has_content) {
                // The blank is the entry separator; the writer re-adds it.
                self.finish_entry();
            } else {
                self.ensure_builder(false).raw_lines.push(raw.to_string());
            }
            return;
        }
        if let Some(rest) = line.strip_prefix("#~|") {
            self.previous_id_line(rest.trim_start(), raw);
            return;
        }
        if let Some(rest) = line.strip_prefix("#~") {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            self.content(rest, raw, true);
            return;
        }
        self.content(line, raw, false);
    }

    /// Handles a `#~| msgid` previous-id marker or its continuations.
    fn previous_id_line(&mut self, rest: &str, raw: &str) {
        if let Some(value) = rest.strip_prefix("msgid") {
            if self.current.as_ref().is_some_and(EntryBuilder::has_content) {
                self.finish_entry();
            }
            let builder = self.ensure_builder(true);
            builder.msg_id_previous = Some(strip_quotes(value.trim()).to_string());
            builder.raw_lines.push(raw.to_string());
            self.state = ParserState::InEntry(ActiveField::PreviousId);
        } else if rest.starts_with('"')
            && self.state == ParserState::InEntry(ActiveField::PreviousId)
        {
            let segment = strip_quotes(rest).to_string();
            let builder = self.ensure_builder(true);
            builder.append(ActiveField::PreviousId, &segment);
            builder.raw_lines.push(raw.to_string());
        } else {
            let builder = self.ensure_builder(true);
            builder.raw_lines.push(raw.to_string());
        }
    }

    /// Handles entry content — either a plain line or the remainder of an
    /// obsolete `#~ ` line, which re-dispatches through the same matching.
    fn content(&mut self, line: &str, raw: &str, obsolete: bool) {
        if line.is_empty() {
            self.ensure_builder(obsolete).raw_lines.push(raw.to_string());
            return;
        }
        if line.starts_with('#') {
            let builder = self.ensure_builder(obsolete);
            builder.raw_lines.push(raw.to_string());
            builder.comments.push(line.to_string());
            return;
        }
        if let Some(rest) = line.strip_prefix("msgid_plural") {
            let value = strip_quotes(rest.trim()).to_string();
            let builder = self.ensure_builder(obsolete);
            builder.raw_lines.push(raw.to_string());
            builder.acc.msg_id_plural = Some(value);
            self.state = ParserState::InEntry(ActiveField::MsgIdPlural);
            return;
        }
        if let Some(rest) = line.strip_prefix("msgid") {
            let value = strip_quotes(rest.trim());
            if !obsolete && value.is_empty() && self.header_eligible() {
                self.begin_header(raw);
                return;
            }
            let value = value.to_string();
            if self
                .current
                .as_ref()
                .is_some_and(|builder| !builder.acc.is_empty())
            {
                self.finish_entry();
            }
            let builder = self.ensure_builder(obsolete);
            builder.raw_lines.push(raw.to_string());
            builder.acc.msg_id = Some(value);
            self.state = ParserState::InEntry(ActiveField::MsgId);
            return;
        }
        if let Some(rest) = line.strip_prefix("msgstr") {
            if let Some(bracketed) = rest.strip_prefix('[')
                && let Some(close) = bracketed.find(']')
                && let Ok(index) = bracketed[..close].trim().parse::<usize>()
            {
                let value = strip_quotes(bracketed[close + 1..].trim()).to_string();
                let builder = self.ensure_builder(obsolete);
                builder.raw_lines.push(raw.to_string());
                if builder.acc.msg_str_plural.len() <= index {
                    builder.acc.msg_str_plural.resize(index + 1, String::new());
                }
                builder.acc.msg_str_plural[index] = value;
                self.state = ParserState::InEntry(ActiveField::MsgStrPlural(index));
                return;
            }
            let value = strip_quotes(rest.trim()).to_string();
            let builder = self.ensure_builder(obsolete);
            builder.raw_lines.push(raw.to_string());
            builder.acc.msg_str = Some(value);
            self.state = ParserState::InEntry(ActiveField::MsgStr);
            return;
        }
        if line.starts_with('"') {
            let segment = strip_quotes(line).to_string();
            let state = self.state;
            let builder = self.ensure_builder(obsolete);
            builder.raw_lines.push(raw.to_string());
            if let ParserState::InEntry(field) = state {
                builder.append(field, &segment);
            }
            return;
        }
        // Unrecognized line: preserved for round-trip, contributes nothing.
        self.ensure_builder(obsolete).raw_lines.push(raw.to_string());
    }

    fn ensure_builder(&mut self, obsolete: bool) -> &mut EntryBuilder {
        let builder = self.current.get_or_insert_with(EntryBuilder::default);
        if obsolete {
            builder.obsolete = true;
        }
        builder
    }

    fn header_eligible(&self) -> bool {
        !self.header_captured
            && self.entries.is_empty()
            && self
                .current
                .as_ref()
                .is_none_or(|builder| !builder.has_content() && !builder.obsolete)
    }

    fn begin_header(&mut self, raw: &str) {
        if let Some(builder) = self.current.take() {
            self.header_comment = builder.comments;
            self.header_raw = builder.raw_lines;
        }
        self.header_raw.push(raw.to_string());
        self.state = ParserState::HeaderMsgid;
    }

    fn finish_header(&mut self) {
        self.header_captured = true;
        self.state = ParserState::Idle;
    }

    fn finish_entry(&mut self) {
        if let Some(builder) = self.current.take() {
            self.entries.push(builder.finish());
        }
        self.state = ParserState::Idle;
    }

    fn finish(mut self) -> Catalog {
        if matches!(
            self.state,
            ParserState::HeaderMsgid | ParserState::HeaderMsgstr
        ) {
            self.finish_header();
        }
        if let Some(builder) = self.current.take()
            && builder.has_content()
        {
            self.entries.push(builder.finish());
        }
        Catalog {
            header_comment: self.header_comment.join("\n"),
            header_meta: po_unescape(&self.header_msgstr),
            header_source: Representation::Verbatim(self.header_raw),
            entries: self.entries,
        }
    }
}
