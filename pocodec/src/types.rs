//! Core, format-agnostic catalog types.
//!
//! Both format front-ends decode into these; all operations (filtering,
//! range selection, diffing, merging) work on them. Entry text is kept in
//! PO-escaped form — backslash sequences literal, not decoded — so that
//! writing an unmodified entry back out cannot change a single byte. The
//! JSON bridge decodes at its own boundary.

use indoc::indoc;

/// How a record's original text is available for serialization.
///
/// Entries parsed from PO text carry their exact source lines and are
/// replayed verbatim; entries built from JSON (or structurally mutated
/// afterwards) have no original text and are synthesized canonically. The
/// writer branches on this exhaustively.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Representation {
    /// Exact lines as read from a PO file, without line terminators.
    Verbatim(Vec<String>),
    /// No original text; canonical PO lines are synthesized from the fields.
    #[default]
    Structured,
}

impl Representation {
    /// Returns the preserved source lines, if any.
    pub fn verbatim_lines(&self) -> Option<&[String]> {
        match self {
            Representation::Verbatim(lines) => Some(lines),
            Representation::Structured => None,
        }
    }
}

/// A single catalog record.
///
/// `msg_id`, `msg_str`, and friends hold PO-escaped text (see module docs).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Entry {
    /// Source string, PO-escaped.
    pub msg_id: String,

    /// Translated string, PO-escaped. Empty for plural entries.
    pub msg_str: String,

    /// Plural source string, when the entry has plural forms.
    pub msg_id_plural: Option<String>,

    /// Plural translations; index is the plural form.
    pub msg_str_plural: Vec<String>,

    /// Raw comment lines (`#...`), order-preserving. A `#,` line carries the
    /// comma-separated flag list.
    pub comments: Vec<String>,

    /// Derived from `fuzzy` among the flags of a `#,` comment line; not
    /// independently settable except through that comment.
    pub fuzzy: bool,

    /// True if the entry was sourced from `#~` lines.
    pub obsolete: bool,

    /// Previous source string from the legacy `#~|` syntax; only meaningful
    /// when `obsolete` is set.
    pub msg_id_previous: Option<String>,

    /// Original text for round-trip serialization, when available.
    pub source: Representation,
}

impl Entry {
    /// Creates a structured (synthesized) singular entry.
    pub fn new(msg_id: impl Into<String>, msg_str: impl Into<String>) -> Self {
        Entry {
            msg_id: msg_id.into(),
            msg_str: msg_str.into(),
            ..Entry::default()
        }
    }

    /// Identity used when deduplicating entries across catalogs.
    pub fn merge_key(&self) -> String {
        format!(
            "{}\0{}",
            self.msg_id,
            self.msg_id_plural.as_deref().unwrap_or("")
        )
    }

    /// Returns `true` if this entry has a plural form.
    pub fn is_plural(&self) -> bool {
        self.msg_id_plural.is_some()
    }

    /// Returns `true` if at least one translation string is non-empty.
    pub fn has_translation(&self) -> bool {
        if self.is_plural() || !self.msg_str_plural.is_empty() {
            self.msg_str_plural.iter().any(|form| !form.is_empty())
        } else {
            !self.msg_str.is_empty()
        }
    }

    /// Returns `true` if every translation string is empty.
    pub fn is_untranslated(&self) -> bool {
        !self.has_translation()
    }

    /// Returns `true` if the translation is textually identical to the
    /// source (plural form 0 for plural entries). A non-empty match is
    /// typically an accidentally-untranslated string.
    pub fn is_same_as_source(&self) -> bool {
        if self.is_plural() || !self.msg_str_plural.is_empty() {
            self.msg_str_plural.first().map(String::as_str) == Some(self.msg_id.as_str())
        } else {
            self.msg_str == self.msg_id
        }
    }

    /// Drops the `fuzzy` flag while keeping the translation.
    ///
    /// Only the `#,` comment lines are edited — both in `comments` and in
    /// the preserved source lines — so a verbatim entry stays verbatim.
    pub fn clear_fuzzy(&mut self) {
        self.fuzzy = false;
        strip_fuzzy_flag(&mut self.comments);
        if let Representation::Verbatim(lines) = &mut self.source {
            strip_fuzzy_flag(lines);
        }
    }

    /// Drops the `fuzzy` flag and empties the translation so the entry reads
    /// as untranslated. Structural: the entry is re-synthesized on write.
    pub fn discard_fuzzy_translation(&mut self) {
        self.fuzzy = false;
        strip_fuzzy_flag(&mut self.comments);
        self.msg_str.clear();
        for form in &mut self.msg_str_plural {
            form.clear();
        }
        self.source = Representation::Structured;
    }
}

/// A parsed catalog: the header block plus all entries, in file order.
///
/// The header is represented separately and is never an [`Entry`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    /// Free-form lines preceding the first `msgid ""` block.
    pub header_comment: String,

    /// Decoded value of the header's `msgstr`: `Key: Value` metadata lines
    /// such as `Content-Type`, newline-separated.
    pub header_meta: String,

    /// Original header block (including its terminating blank line) for
    /// round-trip serialization, when parsed from PO text.
    pub header_source: Representation,

    /// Ordered list of all entries.
    pub entries: Vec<Entry>,
}

impl Catalog {
    /// Creates an empty catalog with no header.
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Creates an empty catalog carrying the conventional metadata block for
    /// `language`, so synthesized PO output passes strict validators.
    pub fn with_default_header(language: &str) -> Self {
        let header_meta = format!(
            indoc! {"
                Project-Id-Version: 1.0
                Language: {}
                MIME-Version: 1.0
                Content-Type: text/plain; charset=UTF-8
                Content-Transfer-Encoding: 8bit
                Plural-Forms: nplurals=2; plural=(n != 1);
            "},
            language
        );
        Catalog {
            header_meta,
            ..Catalog::default()
        }
    }

    /// Returns a catalog with the same header but a different entry list.
    pub fn with_entries(&self, entries: Vec<Entry>) -> Self {
        Catalog {
            header_comment: self.header_comment.clone(),
            header_meta: self.header_meta.clone(),
            header_source: self.header_source.clone(),
            entries,
        }
    }

    /// Returns `true` if the catalog has neither header metadata nor entries.
    pub fn is_empty(&self) -> bool {
        self.header_comment.is_empty() && self.header_meta.is_empty() && self.entries.is_empty()
    }
}

fn is_flag_line(line: &str) -> bool {
    line.trim_start().starts_with("#,")
}

fn flag_list(line: &str) -> impl Iterator<Item = &str> {
    let rest = line.trim_start().trim_start_matches("#,");
    rest.split(',').map(str::trim).filter(|flag| !flag.is_empty())
}

/// Returns `true` if any `#,` line in `comments` lists the `fuzzy` flag.
pub(crate) fn has_fuzzy_flag(comments: &[String]) -> bool {
    comments
        .iter()
        .filter(|line| is_flag_line(line))
        .any(|line| flag_list(line).any(|flag| flag == "fuzzy"))
}

/// Removes `fuzzy` from every `#,` line in `lines`, dropping lines whose
/// flag list becomes empty. Non-flag lines are left untouched.
pub(crate) fn strip_fuzzy_flag(lines: &mut Vec<String>) {
    lines.retain_mut(|line| {
        if !is_flag_line(line) {
            return true;
        }
        let kept: Vec<&str> = flag_list(line).filter(|flag| *flag != "fuzzy").collect();
        if kept.is_empty() {
            return false;
        }
        let rebuilt = format!("#, {}", kept.join(", "));
        *line = rebuilt;
        true
    });
}

/// Ensures the `fuzzy` flag is listed: it is prepended to the first `#,`
/// line, or a synthetic `#, fuzzy` line is appended when there is none.
pub(crate) fn ensure_fuzzy_flag(lines: &mut Vec<String>) {
    if has_fuzzy_flag(lines) {
        return;
    }
    if let Some(line) = lines.iter_mut().find(|line| is_flag_line(line)) {
        let mut flags = vec!["fuzzy".to_string()];
        flags.extend(flag_list(line).map(str::to_string));
        let rebuilt = format!("#, {}", flags.join(", "));
        *line = rebuilt;
    } else {
        lines.push("#, fuzzy".to_string());
    }
}
