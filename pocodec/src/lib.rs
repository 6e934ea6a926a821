#![forbid(unsafe_code)]
//! Gettext PO catalog toolkit for Rust.
//!
//! Parses PO/POT text into a structured [`Catalog`], writes it back with
//! byte-exact round-trip for unmodified entries, and converts to and from a
//! flat JSON interchange format built for external (often machine)
//! translators. On top of the two formats sit the working-set tools of a
//! localization pipeline: state filtering, range selection, snapshot
//! diffing, and first-wins merging of partial catalogs.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use pocodec::{Codec, convert_auto};
//!
//! // Convert a catalog to the JSON interchange form and back.
//! convert_auto("ru.po", "ru.json")?;
//!
//! // Or work with the catalog model directly.
//! let codec = Codec::read_from_path("ru.po")?;
//! let untranslated = pocodec::filter_entries(
//!     &codec.catalog.entries,
//!     &pocodec::EntryStateFilter { untranslated: true, ..Default::default() },
//! );
//! println!("{} entries still need work", untranslated.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Guarantees
//!
//! - **Round-trip**: parse → write reproduces an unmodified PO file byte
//!   for byte, including obsolete blocks, plural forms, and comments.
//! - **Leniency**: PO parsing never fails; malformed input degrades
//!   gracefully instead of being rejected.
//! - **Stable JSON schema**: the interchange shape is fixed, and decoding
//!   it tolerates the "almost valid" output large language models produce.

pub mod codec;
pub mod error;
pub mod escape;
pub mod filter;
pub mod formats;
pub mod operations;
pub mod range;
pub mod traits;
pub mod types;

// Re-export most used items for easy consumption
pub use crate::{
    codec::{Codec, convert, convert_auto, infer_format_from_extension},
    error::Error,
    filter::{CatalogStats, EntryState, EntryStateFilter, catalog_stats, classify, filter_entries},
    formats::FormatType,
    operations::{CatalogDiff, DiffStats, diff_catalogs, merge_catalogs},
    range::parse_entry_range,
    types::{Catalog, Entry, Representation},
};
