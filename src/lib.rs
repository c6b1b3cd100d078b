//! # pagecraft
//!
//! Page-layout editing core for document templates.
//!
//! The crate models a document as fixed-size pages holding typed elements
//! (text, image, table, line, box, list, signature, QR code and variable
//! placeholders) positioned in millimetres, and provides the editor that
//! moves, resizes, layers and configures them from pointer input at any
//! zoom level, with optional grid snapping.
//!
//! ## Quick Start
//!
//! ```
//! use pagecraft::editor::Editor;
//! use pagecraft::model::{ElementKind, ElementPatch};
//! use pagecraft::EditorOptions;
//!
//! let mut editor = Editor::new(EditorOptions::new().with_snap(true));
//! editor.add_element_of_kind(ElementKind::Text, 10.0, 10.0);
//!
//! let id = editor.selected_element().unwrap().id().clone();
//! editor.update_element(&id, &ElementPatch::new().with_content("Tenant"));
//!
//! let json = pagecraft::render::to_json(editor.document(), pagecraft::JsonFormat::Compact)?;
//! assert!(json.contains("Tenant"));
//! # Ok::<(), pagecraft::Error>(())
//! ```
//!
//! ## Features
//!
//! - **Millimetre model**: geometry never depends on zoom
//! - **Pointer interaction**: drag and eight-handle resize with snapping
//!   and page clamping
//! - **Z-order and pages**: reorder elements, add, copy and remove pages
//! - **Read-only sessions**: every mutation refused, viewing still works
//! - **Boundaries**: JSON data contract, document stores, export registry

pub mod editor;
pub mod error;
pub mod export;
pub mod model;
pub mod options;
pub mod render;
pub mod store;
pub mod units;

// Re-export commonly used types
pub use editor::{EditOutcome, Editor, EditorCommand, RefusalReason, SessionState};
pub use error::{Error, Result};
pub use export::{DocumentExporter, ExportFormat, ExporterRegistry};
pub use model::{
    Document, Element, ElementId, ElementKind, ElementPatch, Margins, Page, PageSize, Position,
    VariableCatalog, VariableDefinition,
};
pub use options::EditorOptions;
pub use render::{DisplayList, JsonFormat};
pub use store::{DocumentStore, JsonFileStore, MemoryStore};
pub use units::{to_millimeters, to_pixels, Zoom};

use std::io::Read;
use std::path::Path;

/// Load and validate a document from a JSON file.
///
/// # Example
///
/// ```no_run
/// use pagecraft::load_file;
///
/// let doc = load_file("lease.json").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let json = std::fs::read_to_string(path)?;
    render::from_json(&json)
}

/// Load and validate a document from a reader.
pub fn load_reader<R: Read>(reader: R) -> Result<Document> {
    render::from_reader(reader)
}

/// Write a document as pretty JSON.
///
/// # Example
///
/// ```no_run
/// use pagecraft::{save_file, Document};
///
/// save_file(&Document::with_name("Lease"), "lease.json").unwrap();
/// ```
pub fn save_file<P: AsRef<Path>>(doc: &Document, path: P) -> Result<()> {
    let json = render::to_json(doc, JsonFormat::Pretty)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Load a document from a JSON file and open it in an editor.
///
/// # Example
///
/// ```no_run
/// use pagecraft::{open_file, EditorOptions};
///
/// let editor = open_file("lease.json", EditorOptions::new().read_only())?;
/// assert!(!editor.can_edit());
/// # Ok::<(), pagecraft::Error>(())
/// ```
pub fn open_file<P: AsRef<Path>>(path: P, options: EditorOptions) -> Result<Editor> {
    let doc = load_file(path)?;
    Ok(Editor::open(doc, options))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        let mut doc = Document::with_name("Lease");
        doc.pages[0].add_element(Element::new(ElementKind::List, 20.0, 20.0));

        save_file(&doc, &path).unwrap();
        assert_eq!(load_file(&path).unwrap(), doc);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_file("/nonexistent/pagecraft/doc.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_load_reader_invalid() {
        let result = load_reader(&b"{\"id\": 1}"[..]);
        assert!(matches!(result, Err(Error::Json(_))));
    }

    #[test]
    fn test_open_file_read_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        save_file(&Document::new(), &path).unwrap();

        let mut editor = open_file(&path, EditorOptions::new().read_only()).unwrap();
        assert!(editor.add_page().is_refused());
        assert_eq!(editor.document().page_count(), 1);
    }
}
