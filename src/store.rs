//! Persistence boundary.
//!
//! Stores receive a complete [`Document`] with an identifier and a display
//! name, and must hand back a deep-equal document on load.

use crate::error::{Error, Result};
use crate::model::Document;
use crate::render::{from_json, to_json, JsonFormat};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Summary of a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Store key
    pub id: String,
    /// Display name
    pub name: String,
}

/// Storage backend for documents.
pub trait DocumentStore {
    /// Save a document under `id` with a display name.
    fn save(&mut self, id: &str, name: &str, doc: &Document) -> Result<()>;

    /// Load the document stored under `id`.
    fn load(&self, id: &str) -> Result<Document>;

    /// List stored documents, ordered by id.
    fn list(&self) -> Result<Vec<StoredDocument>>;

    /// Remove a stored document. Returns `false` if nothing was stored.
    fn delete(&mut self, id: &str) -> Result<bool>;

    /// Check if a document is stored under `id`.
    fn contains(&self, id: &str) -> Result<bool> {
        Ok(self.list()?.iter().any(|d| d.id == id))
    }
}

fn named(doc: &Document, name: &str) -> Document {
    let mut doc = doc.clone();
    doc.name = name.to_string();
    doc
}

/// In-memory store, mostly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: BTreeMap<String, Document>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Check if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

impl DocumentStore for MemoryStore {
    fn save(&mut self, id: &str, name: &str, doc: &Document) -> Result<()> {
        doc.validate()?;
        self.documents.insert(id.to_string(), named(doc, name));
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Document> {
        self.documents
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<StoredDocument>> {
        Ok(self
            .documents
            .iter()
            .map(|(id, doc)| StoredDocument {
                id: id.clone(),
                name: doc.name.clone(),
            })
            .collect())
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        Ok(self.documents.remove(id).is_some())
    }
}

/// One pretty-printed JSON file per document in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").unwrap())
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root)?;
        log::debug!("Opened document store at {}", root.display());
        Ok(Self { root })
    }

    /// Directory holding the files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, id: &str) -> Result<PathBuf> {
        if !id_pattern().is_match(id) {
            return Err(Error::Other(format!("invalid document id: {:?}", id)));
        }
        Ok(self.root.join(format!("{}.json", id)))
    }
}

impl DocumentStore for JsonFileStore {
    fn save(&mut self, id: &str, name: &str, doc: &Document) -> Result<()> {
        let path = self.path_for(id)?;
        doc.validate()?;
        let json = to_json(&named(doc, name), JsonFormat::Pretty)?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &path)?;
        log::debug!("Saved '{}' to {}", name, path.display());
        Ok(())
    }

    fn load(&self, id: &str) -> Result<Document> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Err(Error::NotFound(id.to_string()));
        }
        let json = std::fs::read_to_string(&path)?;
        from_json(&json).map_err(|e| {
            log::warn!("Rejecting stored document {}: {}", path.display(), e);
            e
        })
    }

    fn list(&self) -> Result<Vec<StoredDocument>> {
        let mut stored = Vec::new();
        for entry in std::fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load(id) {
                Ok(doc) => stored.push(StoredDocument {
                    id: id.to_string(),
                    name: doc.name,
                }),
                Err(e) => log::warn!("Skipping {}: {}", path.display(), e),
            }
        }
        stored.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(stored)
    }

    fn delete(&mut self, id: &str) -> Result<bool> {
        let path = self.path_for(id)?;
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(path)?;
        Ok(true)
    }
}
