//! Page-level types.

use super::{Element, ElementId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default page background.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// A single sheet in the document.
///
/// The order of `elements` is the stacking order: index 0 is drawn first
/// (bottom), the last element is drawn last (top).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page identifier
    pub id: String,

    /// Elements on the page, bottom to top
    pub elements: Vec<Element>,

    /// Background color (hex)
    pub background_color: String,
}

impl Page {
    /// Create a new blank page.
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            elements: Vec::new(),
            background_color: DEFAULT_BACKGROUND.to_string(),
        }
    }

    /// Add an element on top of the stack.
    ///
    /// Returns `false` without adding if the id is already used on this page.
    pub fn add_element(&mut self, element: Element) -> bool {
        if self.contains(element.id()) {
            return false;
        }
        self.elements.push(element);
        true
    }

    /// Remove an element and return it.
    pub fn remove_element(&mut self, id: &ElementId) -> Option<Element> {
        let index = self.index_of(id)?;
        Some(self.elements.remove(index))
    }

    /// Find an element by id.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Find an element by id for mutation.
    pub fn element_mut(&mut self, id: &ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id() == id)
    }

    /// Position of an element in the stacking order.
    pub fn index_of(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id() == id)
    }

    /// Check whether an element with this id is on the page.
    pub fn contains(&self, id: &ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// The first duplicated element id, if any.
    pub fn duplicate_id(&self) -> Option<&ElementId> {
        let mut seen = HashSet::new();
        self.elements.iter().map(|e| e.id()).find(|id| !seen.insert(*id))
    }

    /// A copy of this page with fresh page and element ids.
    pub fn duplicate(&self) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            elements: self.elements.iter().map(Element::duplicate).collect(),
            background_color: self.background_color.clone(),
        }
    }

    /// Check if the page has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements on the page.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}
