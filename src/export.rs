//! Export hand-off.
//!
//! The editor never renders PDF or Word files itself. An export pipeline
//! registers a [`DocumentExporter`] per target format; the registry
//! validates the document and dispatches on the format tag.
//!
//! # Example
//!
//! ```
//! use pagecraft::export::{DocumentExporter, ExportFormat, ExporterRegistry};
//! use pagecraft::{Document, Result};
//! use std::sync::Arc;
//!
//! struct Dummy;
//!
//! impl DocumentExporter for Dummy {
//!     fn name(&self) -> &str {
//!         "dummy"
//!     }
//!     fn formats(&self) -> &[ExportFormat] {
//!         &[ExportFormat::Pdf]
//!     }
//!     fn export(&self, _doc: &Document, _format: ExportFormat) -> Result<Vec<u8>> {
//!         Ok(b"%PDF-1.7".to_vec())
//!     }
//! }
//!
//! let mut registry = ExporterRegistry::new();
//! registry.register(Arc::new(Dummy));
//! let output = registry.export(&Document::new(), ExportFormat::Pdf)?;
//! assert_eq!(output.mime_type, "application/pdf");
//! # Ok::<(), pagecraft::Error>(())
//! ```

use crate::error::{Error, Result};
use crate::model::Document;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

/// Target format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Portable Document Format
    Pdf,
    /// Office Open XML word processing document
    Docx,
}

impl ExportFormat {
    /// All formats.
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Pdf, ExportFormat::Docx];

    /// The format tag (`pdf` or `docx`).
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    /// MIME type of the output.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "docx" => Ok(ExportFormat::Docx),
            other => Err(Error::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Bytes produced by an exporter.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    /// Encoded document
    pub bytes: Vec<u8>,

    /// Format of `bytes`
    pub format: ExportFormat,

    /// MIME type of `bytes`
    pub mime_type: &'static str,
}

impl ExportOutput {
    /// Wrap exporter output.
    pub fn new(bytes: Vec<u8>, format: ExportFormat) -> Self {
        Self {
            bytes,
            format,
            mime_type: format.mime_type(),
        }
    }

    /// Get output length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the exporter produced nothing.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Trait for export backends.
///
/// Implement this trait to plug a renderer for one or more formats.
pub trait DocumentExporter: Send + Sync {
    /// Get the name of this exporter.
    fn name(&self) -> &str;

    /// Formats this exporter produces.
    fn formats(&self) -> &[ExportFormat];

    /// Encode a validated document.
    fn export(&self, doc: &Document, format: ExportFormat) -> Result<Vec<u8>>;

    /// Check if this exporter produces the given format.
    fn supports(&self, format: ExportFormat) -> bool {
        self.formats().contains(&format)
    }
}

/// Registry of exporters keyed by format.
#[derive(Default)]
pub struct ExporterRegistry {
    exporters: HashMap<ExportFormat, Arc<dyn DocumentExporter>>,
}

impl ExporterRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an exporter for all its formats.
    ///
    /// A later registration for the same format replaces the earlier one.
    pub fn register(&mut self, exporter: Arc<dyn DocumentExporter>) {
        for format in exporter.formats() {
            log::debug!("Registering exporter '{}' for {}", exporter.name(), format);
            self.exporters.insert(*format, exporter.clone());
        }
    }

    /// Get the exporter for a format.
    pub fn get(&self, format: ExportFormat) -> Option<Arc<dyn DocumentExporter>> {
        self.exporters.get(&format).cloned()
    }

    /// Check if a format can be exported.
    pub fn supports(&self, format: ExportFormat) -> bool {
        self.exporters.contains_key(&format)
    }

    /// Formats with a registered exporter.
    pub fn supported_formats(&self) -> Vec<ExportFormat> {
        ExportFormat::ALL
            .into_iter()
            .filter(|f| self.supports(*f))
            .collect()
    }

    /// Validate and export a document.
    pub fn export(&self, doc: &Document, format: ExportFormat) -> Result<ExportOutput> {
        let exporter = self
            .get(format)
            .ok_or_else(|| Error::UnsupportedFormat(format!("no exporter for {}", format)))?;
        doc.validate()?;
        let bytes = exporter
            .export(doc, format)
            .map_err(|e| Error::Export(format!("{} exporter failed: {}", exporter.name(), e)))?;
        log::debug!("Exported '{}' as {} ({} bytes)", doc.name, format, bytes.len());
        Ok(ExportOutput::new(bytes, format))
    }

    /// Export a document and write it to `path`.
    pub fn export_to_file<P: AsRef<Path>>(
        &self,
        doc: &Document,
        format: ExportFormat,
        path: P,
    ) -> Result<ExportOutput> {
        let output = self.export(doc, format)?;
        std::fs::write(path.as_ref(), &output.bytes)?;
        Ok(output)
    }
}
