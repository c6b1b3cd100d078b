//! The editing core: session state, pointer interaction, z-order and pages.
//!
//! [`Editor`] owns a [`Document`] together with the session state and the
//! interaction controller, and is the only place that mutates the document.
//! Every mutator returns an [`EditOutcome`] instead of an error: stale ids,
//! out-of-range pages and constraint violations are no-ops, and a session
//! without edit rights is refused before anything is touched.
//!
//! # Example
//!
//! ```
//! use pagecraft::editor::{EditOutcome, Editor};
//! use pagecraft::model::ElementKind;
//! use pagecraft::EditorOptions;
//!
//! let mut editor = Editor::new(EditorOptions::new().with_snap(true));
//! let outcome = editor.add_element_of_kind(ElementKind::Text, 10.0, 10.0);
//! assert_eq!(outcome, EditOutcome::Applied);
//! assert!(editor.is_dirty());
//! ```

mod command;
pub mod interaction;
pub mod layers;
pub mod pages;
mod session;

pub use command::EditorCommand;
pub use interaction::{
    Handle, InteractionController, InteractionState, Point, PointerTarget,
};
pub use session::{GridSettings, SessionState};

use crate::model::{
    is_valid_color, BandKind, BandPatch, Document, Element, ElementId, ElementKind, ElementPatch,
    Margins, Page, PageSize, TableEdit, VariableDefinition, MAX_PAGES, MIN_ELEMENT_HEIGHT,
};
use crate::options::EditorOptions;
use crate::render::canvas;
use serde::{Deserialize, Serialize};

/// Result of an editing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "lowercase")]
pub enum EditOutcome {
    /// The document changed
    Applied,
    /// Nothing to do (unknown target, constraint reached, same value)
    Unchanged,
    /// The session is not allowed to perform the change
    Refused(RefusalReason),
}

impl EditOutcome {
    /// Check if the document changed.
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied)
    }

    /// Check if the operation was refused.
    pub fn is_refused(&self) -> bool {
        matches!(self, EditOutcome::Refused(_))
    }

    fn from_changed(changed: bool) -> Self {
        if changed {
            EditOutcome::Applied
        } else {
            EditOutcome::Unchanged
        }
    }
}

/// Why a mutation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefusalReason {
    /// The session has no edit rights
    ReadOnly,
}

impl std::fmt::Display for RefusalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RefusalReason::ReadOnly => write!(f, "session is read-only"),
        }
    }
}

/// Merge `patch` into an element and record the change.
pub(crate) fn commit_patch(
    document: &mut Document,
    session: &mut SessionState,
    page: usize,
    id: &ElementId,
    patch: &ElementPatch,
) -> EditOutcome {
    let page_size = document.page_size;
    let Some(element) = document.page_mut(page).and_then(|p| p.element_mut(id)) else {
        return EditOutcome::Unchanged;
    };
    let mut changed = element.apply_patch(patch);
    if patch.touches_position() {
        let position = element.position();
        let clamped = position.fitted_to(page_size);
        if clamped != position {
            element.set_position(clamped);
            changed = true;
        }
    }
    if changed {
        session.mark_dirty();
        document.touch();
    }
    EditOutcome::from_changed(changed)
}

/// An open editing session over one document.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    session: SessionState,
    controller: InteractionController,
    options: EditorOptions,
}

impl Editor {
    /// Open a blank document.
    pub fn new(options: EditorOptions) -> Self {
        let document = Document::new().with_page_size(options.page_size);
        Self::open(document, options)
    }

    /// Open an existing document.
    ///
    /// A document without pages gets one blank page. Pages beyond
    /// [`MAX_PAGES`] are dropped.
    pub fn open(mut document: Document, options: EditorOptions) -> Self {
        if document.pages.is_empty() {
            log::warn!("Document '{}' has no pages, adding a blank one", document.name);
            document.pages.push(Page::new());
        }
        if document.pages.len() > MAX_PAGES {
            log::warn!(
                "Document '{}' has {} pages, keeping the first {}",
                document.name,
                document.pages.len(),
                MAX_PAGES
            );
            document.pages.truncate(MAX_PAGES);
        }
        log::debug!(
            "Opening '{}' ({} pages, can_edit={})",
            document.name,
            document.page_count(),
            options.can_edit
        );
        Self {
            session: SessionState::new(&options),
            controller: InteractionController::new(),
            document,
            options,
        }
    }

    /// The document being edited.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Close the editor and hand back the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Session state (selection, zoom, grid, dirty flag).
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Options the editor was opened with.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Current pointer interaction.
    pub fn interaction(&self) -> &InteractionState {
        self.controller.state()
    }

    /// Index of the page on screen.
    pub fn current_page_index(&self) -> usize {
        self.session.current_page
    }

    /// The page on screen.
    pub fn current_page(&self) -> &Page {
        let index = self.session.current_page.min(self.document.page_count().saturating_sub(1));
        &self.document.pages[index]
    }

    /// The selected element, if it still exists on the current page.
    pub fn selected_element(&self) -> Option<&Element> {
        let id = self.session.selected.as_ref()?;
        self.current_page().element(id)
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.session.is_dirty()
    }

    /// Record a successful save.
    pub fn mark_saved(&mut self) {
        self.session.mark_saved();
    }

    /// Whether the session may mutate the document.
    pub fn can_edit(&self) -> bool {
        self.session.can_edit()
    }

    /// Grant or revoke edit rights.
    pub fn set_can_edit(&mut self, can_edit: bool) {
        self.session.set_can_edit(can_edit);
    }

    // -- view ------------------------------------------------------------

    /// Set the zoom percentage (clamped to the supported range).
    pub fn set_zoom(&mut self, percent: u16) {
        self.session.set_zoom(percent);
    }

    /// Zoom in one step.
    pub fn zoom_in(&mut self) {
        self.session.zoom = self.session.zoom.zoom_in();
    }

    /// Zoom out one step.
    pub fn zoom_out(&mut self) {
        self.session.zoom = self.session.zoom.zoom_out();
    }

    /// Back to 100%.
    pub fn reset_zoom(&mut self) {
        self.session.zoom = self.session.zoom.reset();
    }

    /// Toggle grid visibility.
    pub fn toggle_grid(&mut self) {
        self.session.toggle_grid();
    }

    /// Toggle snapping.
    pub fn toggle_snap(&mut self) {
        self.session.toggle_snap();
    }

    /// Change the grid spacing in mm. Non-positive values are ignored.
    pub fn set_grid_spacing(&mut self, mm: f64) {
        self.session.set_grid_spacing(mm);
    }

    /// Select an element on the current page. Unknown ids are ignored.
    pub fn select(&mut self, id: &ElementId) -> bool {
        if self.current_page().contains(id) {
            self.session.select(id.clone());
            true
        } else {
            false
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.session.clear_selection();
    }

    /// Show the page at `index`, clamped into range.
    pub fn go_to_page(&mut self, index: usize) {
        pages::go_to_page(&self.document, &mut self.session, index);
    }

    /// Show the following page.
    pub fn next_page(&mut self) {
        pages::next_page(&self.document, &mut self.session);
    }

    /// Show the preceding page.
    pub fn previous_page(&mut self) {
        pages::previous_page(&self.document, &mut self.session);
    }

    // -- elements ----------------------------------------------------------

    /// Place an element on the current page and select it.
    ///
    /// The element is moved onto the page if it sticks out. An id already
    /// used on the page leaves the document unchanged.
    pub fn add_element(&mut self, mut element: Element) -> EditOutcome {
        if let Some(refused) = self.check_edit("add element") {
            return refused;
        }
        let page_size = self.document.page_size;
        element.set_position(element.position().fitted_to(page_size));
        let id = element.id().clone();
        let page = self.session.current_page;
        let added = self
            .document
            .page_mut(page)
            .map(|p| p.add_element(element))
            .unwrap_or(false);
        if added {
            log::debug!("Added element {} on page {}", id, page + 1);
            self.session.select(id);
        }
        self.finish(added)
    }

    /// Create an element of `kind` with default attributes at `(x, y)` mm.
    pub fn add_element_of_kind(&mut self, kind: ElementKind, x: f64, y: f64) -> EditOutcome {
        self.add_element(Element::new(kind, x, y))
    }

    /// Create a variable placeholder from a catalog entry.
    pub fn add_variable_element(
        &mut self,
        definition: &VariableDefinition,
        x: f64,
        y: f64,
    ) -> EditOutcome {
        self.add_element(Element::variable(definition, x, y))
    }

    /// Remove an element from the current page.
    pub fn delete_element(&mut self, id: &ElementId) -> EditOutcome {
        if let Some(refused) = self.check_edit("delete element") {
            return refused;
        }
        let page = self.session.current_page;
        let removed = self
            .document
            .page_mut(page)
            .and_then(|p| p.remove_element(id))
            .is_some();
        if removed && self.session.is_selected(id) {
            self.session.clear_selection();
        }
        self.finish(removed)
    }

    /// Remove the selected element.
    pub fn delete_selected(&mut self) -> EditOutcome {
        match self.session.selected.clone() {
            Some(id) => self.delete_element(&id),
            None if !self.can_edit() => EditOutcome::Refused(RefusalReason::ReadOnly),
            None => EditOutcome::Unchanged,
        }
    }

    /// Copy an element with a new id, offset by the configured distance.
    ///
    /// The copy is placed on top and selected.
    pub fn duplicate_element(&mut self, id: &ElementId) -> EditOutcome {
        if let Some(refused) = self.check_edit("duplicate element") {
            return refused;
        }
        let Some(source) = self.current_page().element(id) else {
            return EditOutcome::Unchanged;
        };
        let offset = self.options.duplicate_offset;
        let mut copy = source.duplicate();
        copy.set_position(copy.position().translated(offset, offset));
        self.add_element(copy)
    }

    /// Merge a partial update into an element on the current page.
    pub fn update_element(&mut self, id: &ElementId, patch: &ElementPatch) -> EditOutcome {
        if let Some(refused) = self.check_edit("update element") {
            return refused;
        }
        let page = self.session.current_page;
        commit_patch(&mut self.document, &mut self.session, page, id, patch)
    }

    /// Move the selected element by `(dx, dy)` mm, kept on the page.
    pub fn nudge_selected(&mut self, dx: f64, dy: f64) -> EditOutcome {
        if let Some(refused) = self.check_edit("nudge") {
            return refused;
        }
        let Some(element) = self.selected_element() else {
            return EditOutcome::Unchanged;
        };
        let id = element.id().clone();
        let position =
            interaction::drag_position(element.position(), dx, dy, None, self.document.page_size);
        self.update_element(&id, &ElementPatch::position(position))
    }

    /// Move the selected element by whole keyboard steps
    /// (`EditorOptions::nudge_step` mm each).
    pub fn nudge_selected_by_steps(&mut self, dx_steps: i32, dy_steps: i32) -> EditOutcome {
        let step = self.options.nudge_step;
        self.nudge_selected(f64::from(dx_steps) * step, f64::from(dy_steps) * step)
    }

    /// Merge a partial update into the selected element.
    pub fn update_selected(&mut self, patch: &ElementPatch) -> EditOutcome {
        match self.session.selected.clone() {
            Some(id) => self.update_element(&id, patch),
            None if !self.can_edit() => EditOutcome::Refused(RefusalReason::ReadOnly),
            None => EditOutcome::Unchanged,
        }
    }

    /// Change the grid of a table on the current page.
    ///
    /// Other element kinds are left alone.
    pub fn edit_table(&mut self, id: &ElementId, edit: &TableEdit) -> EditOutcome {
        if let Some(refused) = self.check_edit("edit table") {
            return refused;
        }
        let page = self.session.current_page;
        let changed = match self.document.page_mut(page).and_then(|p| p.element_mut(id)) {
            Some(Element::Table(table)) => table.apply_edit(edit),
            _ => false,
        };
        self.finish(changed)
    }

    // -- z-order -----------------------------------------------------------

    /// Draw the element above all others on its page.
    pub fn bring_to_front(&mut self, id: &ElementId) -> EditOutcome {
        self.reorder(id, layers::bring_to_front)
    }

    /// Draw the element below all others on its page.
    pub fn send_to_back(&mut self, id: &ElementId) -> EditOutcome {
        self.reorder(id, layers::send_to_back)
    }

    /// Move the element one step up.
    pub fn bring_forward(&mut self, id: &ElementId) -> EditOutcome {
        self.reorder(id, layers::bring_forward)
    }

    /// Move the element one step down.
    pub fn send_backward(&mut self, id: &ElementId) -> EditOutcome {
        self.reorder(id, layers::send_backward)
    }

    fn reorder(&mut self, id: &ElementId, op: fn(&mut Page, &ElementId) -> bool) -> EditOutcome {
        if let Some(refused) = self.check_edit("reorder") {
            return refused;
        }
        let page = self.session.current_page;
        let moved = self
            .document
            .page_mut(page)
            .map(|p| op(p, id))
            .unwrap_or(false);
        self.finish(moved)
    }

    // -- pages -------------------------------------------------------------

    /// Append a blank page and show it.
    pub fn add_page(&mut self) -> EditOutcome {
        if let Some(refused) = self.check_edit("add page") {
            return refused;
        }
        let added = pages::add_page(&mut self.document);
        if added {
            let last = self.document.page_count() - 1;
            pages::go_to_page(&self.document, &mut self.session, last);
        }
        self.finish(added)
    }

    /// Remove the page at `index`. The last page is never removed.
    pub fn delete_page(&mut self, index: usize) -> EditOutcome {
        if let Some(refused) = self.check_edit("delete page") {
            return refused;
        }
        let deleted = pages::delete_page(&mut self.document, &mut self.session, index);
        self.finish(deleted)
    }

    /// Insert a copy of the page at `index` after it.
    pub fn duplicate_page(&mut self, index: usize) -> EditOutcome {
        if let Some(refused) = self.check_edit("duplicate page") {
            return refused;
        }
        let duplicated = pages::duplicate_page(&mut self.document, index);
        self.finish(duplicated)
    }

    /// Set the background color of the current page.
    pub fn set_background(&mut self, color: &str) -> EditOutcome {
        if let Some(refused) = self.check_edit("set background") {
            return refused;
        }
        if !is_valid_color(color) {
            log::warn!("Ignoring invalid background color {:?}", color);
            return EditOutcome::Unchanged;
        }
        let page = self.session.current_page;
        let changed = match self.document.page_mut(page) {
            Some(p) if p.background_color != color => {
                p.background_color = color.to_string();
                true
            }
            _ => false,
        };
        self.finish(changed)
    }

    // -- document settings -------------------------------------------------

    /// Replace the page margins. Negative values are raised to zero.
    pub fn set_margins(&mut self, margins: Margins) -> EditOutcome {
        if let Some(refused) = self.check_edit("set margins") {
            return refused;
        }
        let margins = Margins {
            top: margins.top.max(0.0),
            right: margins.right.max(0.0),
            bottom: margins.bottom.max(0.0),
            left: margins.left.max(0.0),
        };
        let changed = self.document.margins != margins;
        self.document.margins = margins;
        self.finish(changed)
    }

    /// Rename the document.
    pub fn rename(&mut self, name: &str) -> EditOutcome {
        if let Some(refused) = self.check_edit("rename") {
            return refused;
        }
        let name = name.trim();
        let changed = !name.is_empty() && self.document.name != name;
        if changed {
            self.document.name = name.to_string();
        }
        self.finish(changed)
    }

    /// Change header or footer settings.
    ///
    /// A band is at most half the page high.
    pub fn update_band(&mut self, kind: BandKind, patch: &BandPatch) -> EditOutcome {
        if let Some(refused) = self.check_edit("update band") {
            return refused;
        }
        let max_height = self.document.page_size.height / 2.0;
        let changed = self.document.band_mut(kind).apply_patch(patch, max_height);
        self.finish(changed)
    }

    /// Place an element inside the header or footer, fitted to the band.
    pub fn add_band_element(&mut self, kind: BandKind, mut element: Element) -> EditOutcome {
        if let Some(refused) = self.check_edit("add band element") {
            return refused;
        }
        let width = self.document.page_size.width;
        let band = self.document.band_mut(kind);
        if band.elements.iter().any(|e| e.id() == element.id()) {
            return EditOutcome::Unchanged;
        }
        let area = PageSize::new(width, band.height.max(MIN_ELEMENT_HEIGHT));
        element.set_position(element.position().fitted_to(area));
        log::debug!("Added element {} to {:?}", element.id(), kind);
        band.elements.push(element);
        self.finish(true)
    }

    /// Remove an element from the header or footer.
    pub fn remove_band_element(&mut self, kind: BandKind, id: &ElementId) -> EditOutcome {
        if let Some(refused) = self.check_edit("remove band element") {
            return refused;
        }
        let band = self.document.band_mut(kind);
        let before = band.elements.len();
        band.elements.retain(|e| e.id() != id);
        let removed = band.elements.len() != before;
        self.finish(removed)
    }

    // -- pointer -----------------------------------------------------------

    /// Pointer pressed at a canvas pixel position.
    ///
    /// Hit-tests the current page and starts a drag or resize when
    /// possible. Returns `true` if an interaction started.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let target = canvas::hit_test(
            self.current_page(),
            self.session.selected.as_ref(),
            self.session.zoom,
            point,
        );
        self.pointer_down_on(target, point)
    }

    /// Pointer pressed on an already resolved target.
    pub fn pointer_down_on(&mut self, target: PointerTarget, point: Point) -> bool {
        self.controller
            .pointer_down(&self.document, &mut self.session, target, point)
    }

    /// Pointer moved to a canvas pixel position.
    pub fn pointer_move(&mut self, point: Point) -> EditOutcome {
        self.controller
            .pointer_move(&mut self.document, &mut self.session, point)
    }

    /// Pointer released.
    pub fn pointer_up(&mut self) -> bool {
        self.controller.pointer_up()
    }

    /// Pointer left the canvas.
    pub fn pointer_leave(&mut self) -> bool {
        self.controller.pointer_leave()
    }

    // -- helpers -----------------------------------------------------------

    fn check_edit(&self, action: &str) -> Option<EditOutcome> {
        if self.session.can_edit() {
            None
        } else {
            log::warn!("Refusing {}: {}", action, RefusalReason::ReadOnly);
            Some(EditOutcome::Refused(RefusalReason::ReadOnly))
        }
    }

    fn finish(&mut self, changed: bool) -> EditOutcome {
        if changed {
            self.session.mark_dirty();
            self.document.touch();
        }
        EditOutcome::from_changed(changed)
    }
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorOptions::default())
    }
}
