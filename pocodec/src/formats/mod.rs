//! The catalog serialization formats supported by pocodec.
//!
//! This module re-exports the format front-ends and provides the
//! [`FormatType`] enum for generic format handling across the crate.

pub mod json;
pub mod po;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

pub use json::Format as JsonFormat;
pub use po::Format as PoFormat;

use crate::Error;

/// All supported catalog formats, for generic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatType {
    /// Gettext PO/POT text.
    Po,
    /// The flat gettext JSON interchange format.
    GettextJson,
}

impl Display for FormatType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatType::Po => write!(f, "po"),
            FormatType::GettextJson => write!(f, "json"),
        }
    }
}

/// Accepts `"po"`, `"pot"`, `"json"`, and `"gettext-json"`,
/// case-insensitively. Returns [`Error::UnknownFormat`] for anything else.
impl FromStr for FormatType {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "po" | "pot" => Ok(FormatType::Po),
            "json" | "gettext-json" => Ok(FormatType::GettextJson),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

impl FormatType {
    /// Returns the typical file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FormatType::Po => "po",
            FormatType::GettextJson => "json",
        }
    }

    /// Detects the format of raw catalog content: a document whose first
    /// non-whitespace byte is `{` is JSON, everything else is PO text.
    pub fn sniff(content: &str) -> FormatType {
        match content.chars().find(|c| !c.is_whitespace()) {
            Some('{') => FormatType::GettextJson,
            _ => FormatType::Po,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_type_display_and_from_str() {
        assert_eq!(FormatType::Po.to_string(), "po");
        assert_eq!(FormatType::GettextJson.to_string(), "json");
        assert_eq!(FormatType::from_str("pot").unwrap(), FormatType::Po);
        assert_eq!(
            FormatType::from_str("gettext-json").unwrap(),
            FormatType::GettextJson
        );
        assert!(FormatType::from_str("yaml").is_err());
    }

    #[test]
    fn test_sniff_first_non_whitespace_byte() {
        assert_eq!(FormatType::sniff("  \n\t{\"entries\": []}"), FormatType::GettextJson);
        assert_eq!(FormatType::sniff("# comment\nmsgid \"a\"\n"), FormatType::Po);
        assert_eq!(FormatType::sniff(""), FormatType::Po);
    }
}
