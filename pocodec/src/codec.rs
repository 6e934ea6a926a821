//! High-level façade for reading, converting, and writing catalogs.
//!
//! A [`Codec`] owns one [`Catalog`] together with the format it was read
//! from. Input format is detected from the content itself (a document whose
//! first non-whitespace byte is `{` is JSON, anything else is PO text), so
//! files produced by external agents need no particular extension. Reading
//! is BOM-aware: UTF-16 or BOM-prefixed UTF-8 files are decoded before
//! parsing.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::{
    error::Error,
    formats::{self, FormatType, po::WriteOptions},
    types::Catalog,
};

/// One catalog plus the format it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Codec {
    /// The catalog being worked on.
    pub catalog: Catalog,
    /// The detected format of the input.
    pub format: FormatType,
}

impl Codec {
    /// Reads a catalog file, sniffing its format from the content.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let content = read_decoded(path)?;
        Self::read_from_content(&content)
    }

    /// Parses catalog content, sniffing its format.
    pub fn read_from_content(content: &str) -> Result<Self, Error> {
        let format = FormatType::sniff(content);
        let catalog = match format {
            FormatType::Po => formats::po::parse(content),
            FormatType::GettextJson => Catalog::from(formats::json::parse(content)?),
        };
        Ok(Codec { catalog, format })
    }

    /// Serializes the catalog to `format`.
    pub fn to_string_as(&self, format: FormatType, options: &WriteOptions) -> Result<String, Error> {
        match format {
            FormatType::Po => Ok(formats::po::write_string(&self.catalog, options)),
            FormatType::GettextJson => {
                formats::json::Format::from(&self.catalog).to_json_string()
            }
        }
    }

    /// Writes the catalog to `path` in `format`.
    pub fn write_to_path<P: AsRef<Path>>(
        &self,
        path: P,
        format: FormatType,
        options: &WriteOptions,
    ) -> Result<(), Error> {
        let text = self.to_string_as(format, options)?;
        std::fs::write(path, text).map_err(Error::Io)
    }
}

/// Reads a file into a string, decoding a BOM-marked encoding when present
/// and passing plain UTF-8 through.
pub fn read_decoded<P: AsRef<Path>>(path: P) -> Result<String, Error> {
    let file = File::open(path).map_err(Error::Io)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
    Ok(decoded)
}

/// Infers the output format from a file extension: `po`/`pot` → PO text,
/// `json` → gettext JSON.
pub fn infer_format_from_extension<P: AsRef<Path>>(path: P) -> Option<FormatType> {
    match path
        .as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("po") | Some("pot") => Some(FormatType::Po),
        Some("json") => Some(FormatType::GettextJson),
        _ => None,
    }
}

/// Converts `input` to `output` in an explicit output format.
pub fn convert<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    format: FormatType,
) -> Result<(), Error> {
    let codec = Codec::read_from_path(input)?;
    codec.write_to_path(output, format, &WriteOptions::default())
}

/// Converts `input` to `output`, inferring the output format from the
/// output extension.
pub fn convert_auto<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<(), Error> {
    let format = infer_format_from_extension(&output).ok_or_else(|| {
        Error::UnknownFormat(format!(
            "cannot infer output format from `{}`",
            output.as_ref().display()
        ))
    })?;
    convert(input, output, format)
}
