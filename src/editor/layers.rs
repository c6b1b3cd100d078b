//! Z-order operations on a page's element sequence.
//!
//! Rendering order equals sequence order: index 0 is drawn first (bottom).
//! All operations only permute the sequence and return `false` when nothing
//! moved, including for unknown ids.

use crate::model::{ElementId, Page};

/// Move the element to the end of the sequence (top).
pub fn bring_to_front(page: &mut Page, id: &ElementId) -> bool {
    let Some(index) = page.index_of(id) else {
        return false;
    };
    if index + 1 == page.elements.len() {
        return false;
    }
    let element = page.elements.remove(index);
    page.elements.push(element);
    true
}

/// Move the element to the start of the sequence (bottom).
pub fn send_to_back(page: &mut Page, id: &ElementId) -> bool {
    match page.index_of(id) {
        Some(0) | None => false,
        Some(index) => {
            let element = page.elements.remove(index);
            page.elements.insert(0, element);
            true
        }
    }
}

/// Swap the element with the one above it.
pub fn bring_forward(page: &mut Page, id: &ElementId) -> bool {
    match page.index_of(id) {
        Some(index) if index + 1 < page.elements.len() => {
            page.elements.swap(index, index + 1);
            true
        }
        _ => false,
    }
}

/// Swap the element with the one below it.
pub fn send_backward(page: &mut Page, id: &ElementId) -> bool {
    match page.index_of(id) {
        Some(index) if index > 0 => {
            page.elements.swap(index, index - 1);
            true
        }
        _ => false,
    }
}
