//! The flat gettext JSON interchange format.
//!
//! This is the shape external translation agents produce and consume, so the
//! schema is fixed. String fields on the JSON side are fully decoded (real
//! newlines and quotes), unlike the PO-escaped internal entry model;
//! conversion in either direction goes through the escape codec.
//!
//! The JSON is frequently produced by a large language model and is "almost
//! valid" more often than it is valid. Parsing therefore runs an ordered
//! list of strategies — strict decode, generic repair, tolerant
//! field-by-field extraction — and only fully exhausted fallback surfaces an
//! error.

use std::io::{BufRead, Read, Write};

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::Error,
    escape::{json_decoded_to_po_format, po_unescape},
    traits::Parser,
    types::{Catalog, Entry, Representation, strip_fuzzy_flag},
};

/// Human-readable schema summary, embedded in decode-failure errors so a
/// repair loop (human or automated) can fix the payload without guessing.
pub const SCHEMA_DESCRIPTION: &str = r##"{
  "header_comment": "string",
  "header_meta": "string of Key: Value lines",
  "entries": [
    {
      "msgid": "string (required)",
      "msgstr": "string",
      "msgid_plural": "string (optional)",
      "msgstr_plural": ["string", ...] (optional),
      "comments": ["# comment line", ...] (optional),
      "fuzzy": false,
      "obsolete": false (optional),
      "msgid_previous": "string (optional)"
    }
  ]
}"##;

const SNIPPET_LIMIT: usize = 400;

lazy_static! {
    static ref FENCED_BLOCK_REGEX: Regex =
        Regex::new(r"(?s)```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)```").unwrap();
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Represents a catalog in the gettext JSON interchange format.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Format {
    #[serde(default)]
    pub header_comment: String,

    #[serde(default)]
    pub header_meta: String,

    #[serde(default)]
    pub entries: Vec<JsonEntry>,
}

/// One entry in the JSON schema. All strings are fully decoded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JsonEntry {
    pub msgid: String,

    #[serde(default)]
    pub msgstr: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msgid_plural: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub msgstr_plural: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comments: Vec<String>,

    #[serde(default)]
    pub fuzzy: bool,

    #[serde(default, skip_serializing_if = "is_false")]
    pub obsolete: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msgid_previous: Option<String>,
}

impl Format {
    /// Serializes to pretty-printed JSON with one trailing newline.
    pub fn to_json_string(&self) -> Result<String, Error> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}

impl Parser for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content).map_err(Error::Io)?;
        parse(&content)
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        writer
            .write_all(self.to_json_string()?.as_bytes())
            .map_err(Error::Io)
    }
}

/// Parses gettext JSON, trying each strategy in order and stopping at the
/// first success.
pub fn parse(content: &str) -> Result<Format, Error> {
    const STRATEGIES: [fn(&str) -> Option<Format>; 3] =
        [parse_strict, parse_repaired, parse_tolerant];
    for strategy in STRATEGIES {
        if let Some(format) = strategy(content) {
            return Ok(format);
        }
    }
    Err(Error::JsonDecode {
        message: "document is not valid gettext JSON, even after repair".to_string(),
        snippet: snippet(content),
        schema: SCHEMA_DESCRIPTION,
    })
}

fn snippet(content: &str) -> String {
    let trimmed = content.trim();
    if trimmed.chars().count() <= SNIPPET_LIMIT {
        trimmed.to_string()
    } else {
        let cut: String = trimmed.chars().take(SNIPPET_LIMIT).collect();
        format!("{cut}…")
    }
}

fn parse_strict(content: &str) -> Option<Format> {
    serde_json::from_str(content).ok()
}

/// Strips the junk wrappers machine output commonly arrives in: a BOM,
/// markdown code fences, prose around the outermost object.
fn repair(content: &str) -> String {
    let mut text = content.trim_start_matches('\u{feff}').trim();
    if let Some(captures) = FENCED_BLOCK_REGEX.captures(text)
        && let Some(inner) = captures.get(1)
    {
        text = inner.as_str().trim();
    }
    // Trim prose around the outermost object. A document that already starts
    // with an array is left alone so the tolerant tier can salvage it whole.
    if !text.starts_with('[')
        && let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
        && start < end
    {
        text = &text[start..=end];
    }
    text.to_string()
}

fn parse_repaired(content: &str) -> Option<Format> {
    serde_json::from_str(&repair(content)).ok()
}

/// Pulls whatever fields a loosely-parsed document contains, substituting
/// defaults for anything unreadable. Never fails once a JSON value exists.
fn parse_tolerant(content: &str) -> Option<Format> {
    let value: Value = serde_json::from_str(content)
        .or_else(|_| serde_json::from_str(&repair(content)))
        .ok()?;

    let (object, entries_value) = match &value {
        Value::Object(map) => (Some(map), map.get("entries")),
        // A bare entries array is close enough to salvage.
        Value::Array(_) => (None, Some(&value)),
        _ => return None,
    };

    let string_field = |key: &str| -> String {
        object
            .and_then(|map| map.get(key))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let entries = entries_value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_object)
                .map(|item| JsonEntry {
                    msgid: item
                        .get("msgid")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    msgstr: item
                        .get("msgstr")
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .to_string(),
                    msgid_plural: item
                        .get("msgid_plural")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                    msgstr_plural: item
                        .get("msgstr_plural")
                        .and_then(Value::as_array)
                        .map(|forms| {
                            forms
                                .iter()
                                .map(|form| form.as_str().unwrap_or_default().to_string())
                                .collect()
                        })
                        .unwrap_or_default(),
                    comments: item
                        .get("comments")
                        .and_then(Value::as_array)
                        .map(|lines| {
                            lines
                                .iter()
                                .filter_map(Value::as_str)
                                .map(str::to_string)
                                .collect()
                        })
                        .unwrap_or_default(),
                    fuzzy: item
                        .get("fuzzy")
                        .and_then(Value::as_bool)
                        .unwrap_or_default(),
                    obsolete: item
                        .get("obsolete")
                        .and_then(Value::as_bool)
                        .unwrap_or_default(),
                    msgid_previous: item
                        .get("msgid_previous")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default();

    Some(Format {
        header_comment: string_field("header_comment"),
        header_meta: string_field("header_meta"),
        entries,
    })
}

impl From<&Entry> for JsonEntry {
    fn from(entry: &Entry) -> Self {
        let mut comments = entry.comments.clone();
        // Fuzzy state lives solely in the boolean on the JSON side.
        strip_fuzzy_flag(&mut comments);
        comments.retain(|line| !line.trim().is_empty());
        JsonEntry {
            msgid: po_unescape(&entry.msg_id),
            msgstr: po_unescape(&entry.msg_str),
            msgid_plural: entry.msg_id_plural.as_deref().map(po_unescape),
            msgstr_plural: entry.msg_str_plural.iter().map(|s| po_unescape(s)).collect(),
            comments,
            fuzzy: entry.fuzzy,
            obsolete: entry.obsolete,
            msgid_previous: entry.msg_id_previous.as_deref().map(po_unescape),
        }
    }
}

impl From<JsonEntry> for Entry {
    fn from(entry: JsonEntry) -> Self {
        Entry {
            msg_id: json_decoded_to_po_format(&entry.msgid),
            msg_str: json_decoded_to_po_format(&entry.msgstr),
            msg_id_plural: entry
                .msgid_plural
                .as_deref()
                .map(json_decoded_to_po_format),
            msg_str_plural: entry
                .msgstr_plural
                .iter()
                .map(|s| json_decoded_to_po_format(s))
                .collect(),
            comments: entry
                .comments
                .into_iter()
                .filter(|line| !line.trim().is_empty())
                .collect(),
            fuzzy: entry.fuzzy,
            obsolete: entry.obsolete,
            msg_id_previous: entry
                .msgid_previous
                .as_deref()
                .map(json_decoded_to_po_format),
            source: Representation::Structured,
        }
    }
}

impl From<&Catalog> for Format {
    fn from(catalog: &Catalog) -> Self {
        Format {
            header_comment: catalog.header_comment.clone(),
            header_meta: catalog.header_meta.clone(),
            entries: catalog.entries.iter().map(JsonEntry::from).collect(),
        }
    }
}

impl From<Format> for Catalog {
    fn from(format: Format) -> Self {
        Catalog {
            header_comment: format.header_comment,
            header_meta: format.header_meta,
            header_source: Representation::Structured,
            entries: format.entries.into_iter().map(Entry::from).collect(),
        }
    }
}
