//! Integration tests for stores, exporters and the JSON contract.

use std::sync::Arc;

use pagecraft::error::{Error, Result};
use pagecraft::render::{from_json, to_json};
use pagecraft::{
    Document, DocumentExporter, DocumentStore, Editor, EditorOptions, ElementKind, ExportFormat,
    ExporterRegistry, JsonFileStore, JsonFormat, MemoryStore,
};

/// Mock exporter for testing.
struct MockExporter {
    formats: Vec<ExportFormat>,
    name: &'static str,
}

impl MockExporter {
    fn new(formats: Vec<ExportFormat>, name: &'static str) -> Self {
        Self { formats, name }
    }
}

impl DocumentExporter for MockExporter {
    fn name(&self) -> &str {
        self.name
    }

    fn formats(&self) -> &[ExportFormat] {
        &self.formats
    }

    fn export(&self, doc: &Document, format: ExportFormat) -> Result<Vec<u8>> {
        Ok(format!("{} {} {}", self.name, format, doc.page_count()).into_bytes())
    }
}

/// Exporter that always fails.
struct BrokenExporter;

impl DocumentExporter for BrokenExporter {
    fn name(&self) -> &str {
        "broken"
    }

    fn formats(&self) -> &[ExportFormat] {
        &[ExportFormat::Docx]
    }

    fn export(&self, _doc: &Document, _format: ExportFormat) -> Result<Vec<u8>> {
        Err(Error::Other("renderer crashed".into()))
    }
}

fn edited_document() -> Document {
    let mut editor = Editor::new(EditorOptions::new());
    editor.add_element_of_kind(ElementKind::Text, 10.0, 10.0);
    editor.add_element_of_kind(ElementKind::Table, 10.0, 40.0);
    editor.add_page();
    editor.add_element_of_kind(ElementKind::Signature, 20.0, 240.0);
    editor.rename("Lease agreement");
    editor.into_document()
}

#[test]
fn test_registry_routes_by_format() {
    let mut registry = ExporterRegistry::new();
    registry.register(Arc::new(MockExporter::new(vec![ExportFormat::Pdf], "pdf-mock")));

    assert!(registry.supports(ExportFormat::Pdf));
    assert!(!registry.supports(ExportFormat::Docx));
    assert_eq!(registry.supported_formats(), vec![ExportFormat::Pdf]);

    let output = registry.export(&edited_document(), ExportFormat::Pdf).unwrap();
    assert_eq!(output.bytes, b"pdf-mock pdf 2".to_vec());
    assert_eq!(output.mime_type, "application/pdf");
}

#[test]
fn test_registry_later_registration_wins() {
    let mut registry = ExporterRegistry::new();
    registry.register(Arc::new(MockExporter::new(
        vec![ExportFormat::Pdf, ExportFormat::Docx],
        "first",
    )));
    registry.register(Arc::new(MockExporter::new(vec![ExportFormat::Docx], "second")));

    assert_eq!(registry.get(ExportFormat::Pdf).unwrap().name(), "first");
    assert_eq!(registry.get(ExportFormat::Docx).unwrap().name(), "second");
}

#[test]
fn test_registry_errors() {
    let mut registry = ExporterRegistry::new();
    let doc = edited_document();
    assert!(matches!(
        registry.export(&doc, ExportFormat::Pdf),
        Err(Error::UnsupportedFormat(_))
    ));

    registry.register(Arc::new(BrokenExporter));
    match registry.export(&doc, ExportFormat::Docx) {
        Err(Error::Export(msg)) => assert!(msg.contains("renderer crashed")),
        other => panic!("expected export error, got {:?}", other.map(|o| o.len())),
    }
}

#[test]
fn test_export_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lease.pdf");
    let mut registry = ExporterRegistry::new();
    registry.register(Arc::new(MockExporter::new(vec![ExportFormat::Pdf], "pdf-mock")));

    let output = registry
        .export_to_file(&edited_document(), ExportFormat::Pdf, &path)
        .unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), output.bytes);
}

#[test]
fn test_format_parsing() {
    assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
    assert_eq!("DOCX".parse::<ExportFormat>().unwrap(), ExportFormat::Docx);
    assert!("odt".parse::<ExportFormat>().is_err());
}

#[test]
fn test_json_contract_reload() {
    let doc = edited_document();
    for format in [JsonFormat::Pretty, JsonFormat::Compact] {
        let json = to_json(&doc, format).unwrap();
        assert_eq!(from_json(&json).unwrap(), doc);
    }
}

#[test]
fn test_json_rejects_invalid_document() {
    let mut doc = edited_document();
    doc.pages.clear();
    let json = serde_json::to_string(&doc).unwrap();
    assert!(matches!(from_json(&json), Err(Error::InvalidDocument(_))));
}

#[test]
fn test_memory_store() {
    let mut store = MemoryStore::new();
    let doc = edited_document();
    store.save("lease", "Lease v2", &doc).unwrap();

    let loaded = store.load("lease").unwrap();
    assert_eq!(loaded.name, "Lease v2");
    assert_eq!(loaded.pages, doc.pages);
    assert!(store.contains("lease").unwrap());
    assert!(matches!(store.load("missing"), Err(Error::NotFound(_))));
    assert!(store.delete("lease").unwrap());
    assert!(!store.delete("lease").unwrap());
}

#[test]
fn test_file_store_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::open(dir.path().join("docs")).unwrap();
    let doc = edited_document();

    store.save("lease-2024", "Lease", &doc).unwrap();
    store.save("notice", "Notice", &Document::new()).unwrap();
    std::fs::write(store.root().join("broken.json"), "{not json").unwrap();

    let listed: Vec<String> = store.list().unwrap().into_iter().map(|d| d.name).collect();
    assert_eq!(listed, vec!["Lease".to_string(), "Notice".to_string()]);

    let reopened = JsonFileStore::open(store.root()).unwrap();
    assert_eq!(reopened.load("lease-2024").unwrap().pages, doc.pages);
    assert!(matches!(reopened.load("../etc/passwd"), Err(Error::Other(_))));
    assert!(store.delete("notice").unwrap());
    assert!(!store.contains("notice").unwrap());
}

#[test]
fn test_store_refuses_invalid_document() {
    let mut store = MemoryStore::new();
    let mut doc = Document::new();
    doc.pages[0].background_color = "not a color".into();
    assert!(store.save("bad", "Bad", &doc).is_err());
    assert!(store.is_empty());
}
