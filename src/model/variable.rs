//! Variable placeholders and the catalog they are created from.

use super::{ElementId, Position, TextStyle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A placeholder that is resolved to a value when the document is filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableElement {
    /// Element identifier
    pub id: ElementId,

    /// Location and size on the page
    pub position: Position,

    /// Reference key, e.g. `tenant.name`
    pub key: String,

    /// Human-readable label shown in the editor
    pub label: String,

    /// Text styling of the resolved value
    pub style: TextStyle,
}

impl VariableElement {
    /// Create a variable placeholder.
    pub fn new(id: ElementId, position: Position, key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id,
            position,
            key: key.into(),
            label: label.into(),
            style: TextStyle::default(),
        }
    }

    /// Text the editor shows in place of the unresolved value.
    pub fn placeholder(&self) -> String {
        format!("{{{{{}}}}}", self.key)
    }
}

/// An externally supplied variable description.
///
/// Keys are not checked for uniqueness and values are never resolved here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariableDefinition {
    /// Reference key
    pub key: String,

    /// Human-readable label
    pub label: String,

    /// Grouping used by pickers
    pub category: String,

    /// Example value
    pub example: String,
}

impl VariableDefinition {
    /// Create a new variable definition.
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        category: impl Into<String>,
        example: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            category: category.into(),
            example: example.into(),
        }
    }
}

/// The list of variables offered to the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableCatalog {
    definitions: Vec<VariableDefinition>,
}

impl VariableCatalog {
    /// Create a new empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. Duplicate keys are kept as supplied.
    pub fn add(&mut self, definition: VariableDefinition) {
        self.definitions.push(definition);
    }

    /// Look up the first definition with the given key.
    pub fn get(&self, key: &str) -> Option<&VariableDefinition> {
        self.definitions.iter().find(|d| d.key == key)
    }

    /// All definitions in insertion order.
    pub fn definitions(&self) -> &[VariableDefinition] {
        &self.definitions
    }

    /// Definitions grouped by category, categories sorted by name.
    pub fn by_category(&self) -> BTreeMap<&str, Vec<&VariableDefinition>> {
        let mut groups: BTreeMap<&str, Vec<&VariableDefinition>> = BTreeMap::new();
        for definition in &self.definitions {
            groups
                .entry(definition.category.as_str())
                .or_default()
                .push(definition);
        }
        groups
    }

    /// Get the number of definitions.
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<VariableDefinition> for VariableCatalog {
    fn from_iter<I: IntoIterator<Item = VariableDefinition>>(iter: I) -> Self {
        Self {
            definitions: iter.into_iter().collect(),
        }
    }
}
