//! Adding, removing and navigating pages.

use super::SessionState;
use crate::model::{Document, Page};

/// Append a blank page. Refused at the page ceiling.
pub fn add_page(document: &mut Document) -> bool {
    if !document.can_add_page() {
        log::debug!("Page limit reached ({} pages)", document.page_count());
        return false;
    }
    document.pages.push(Page::new());
    true
}

/// Insert a copy of the page at `index` right after it.
///
/// The copy gets fresh page and element ids.
pub fn duplicate_page(document: &mut Document, index: usize) -> bool {
    if !document.can_add_page() {
        return false;
    }
    let Some(copy) = document.page(index).map(Page::duplicate) else {
        return false;
    };
    document.pages.insert(index + 1, copy);
    true
}

/// Remove the page at `index`. Never removes the last page.
pub fn delete_page(document: &mut Document, session: &mut SessionState, index: usize) -> bool {
    if !document.can_delete_page() || index >= document.page_count() {
        return false;
    }
    let removed = document.pages.remove(index);
    if let Some(selected) = &session.selected {
        if removed.contains(selected) && index == session.current_page {
            session.clear_selection();
        }
    }
    if session.current_page > index || session.current_page >= document.page_count() {
        session.current_page = session.current_page.saturating_sub(1);
    }
    true
}

/// Show the page at `index`, clamped into range.
pub fn go_to_page(document: &Document, session: &mut SessionState, index: usize) {
    let last = document.page_count().saturating_sub(1);
    let target = index.min(last);
    if target != session.current_page {
        session.clear_selection();
        session.current_page = target;
    }
}

/// Show the following page, if any.
pub fn next_page(document: &Document, session: &mut SessionState) {
    go_to_page(document, session, session.current_page.saturating_add(1));
}

/// Show the preceding page, if any.
pub fn previous_page(document: &Document, session: &mut SessionState) {
    go_to_page(document, session, session.current_page.saturating_sub(1));
}
