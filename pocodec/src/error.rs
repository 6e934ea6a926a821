//! All error types for the pocodec crate.
//!
//! These are returned from all fallible operations (reading, writing,
//! conversion, range selection, etc.). Parsing PO text itself never fails;
//! see `formats::po`.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown format `{0}`")]
    UnknownFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid entry range token `{token}`: {reason}")]
    InvalidRange { token: String, reason: String },

    #[error(
        "gettext JSON decode failed: {message}\n\
         --- content (truncated) ---\n{snippet}\n\
         --- expected schema ---\n{schema}"
    )]
    JsonDecode {
        message: String,
        snippet: String,
        schema: &'static str,
    },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
}

impl Error {
    /// Creates a range error naming the offending token.
    pub fn invalid_range(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidRange {
            token: token.into(),
            reason: reason.into(),
        }
    }
}
