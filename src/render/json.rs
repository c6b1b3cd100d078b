//! JSON encoding of documents.
//!
//! This is the data contract handed to persistence and export: the model's
//! serde shape, nothing more. Loading always validates.

use crate::error::Result;
use crate::model::Document;
use std::io::Read;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON.
pub fn to_json(doc: &Document, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

/// Parse and validate a document.
pub fn from_json(json: &str) -> Result<Document> {
    let doc: Document = serde_json::from_str(json)?;
    doc.validate()?;
    Ok(doc)
}

/// Parse and validate a document from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<Document> {
    let doc: Document = serde_json::from_reader(reader)?;
    doc.validate()?;
    Ok(doc)
}
