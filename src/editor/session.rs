//! Ephemeral per-session editor state.

use crate::model::ElementId;
use crate::options::{clamp_grid_spacing, EditorOptions};
use crate::units::Zoom;

/// Grid display and snapping settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    /// Draw grid lines
    pub visible: bool,
    /// Quantize drag and resize results
    pub snap: bool,
    /// Spacing in mm
    pub spacing: f64,
}

impl GridSettings {
    /// Spacing to snap to, or `None` when snapping is off.
    pub fn snap_spacing(&self) -> Option<f64> {
        (self.snap && self.spacing > 0.0).then_some(self.spacing)
    }
}

/// State that lives as long as the editor is open.
///
/// Owned by the caller and passed by reference into the interaction
/// controller. It is never persisted with the document.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// Index of the page on screen
    pub current_page: usize,

    /// The single selected element, if any
    pub selected: Option<ElementId>,

    /// Display zoom
    pub zoom: Zoom,

    /// Grid settings
    pub grid: GridSettings,

    dirty: bool,
    can_edit: bool,
}

impl SessionState {
    /// Start a session with the given options.
    pub fn new(options: &EditorOptions) -> Self {
        Self {
            current_page: 0,
            selected: None,
            zoom: options.zoom,
            grid: GridSettings {
                visible: options.show_grid,
                snap: options.snap_to_grid,
                spacing: clamp_grid_spacing(options.grid_spacing),
            },
            dirty: false,
            can_edit: options.can_edit,
        }
    }

    /// Whether there are unsaved changes.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Record an unsaved change.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    /// Record that the document was saved.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Whether mutations are allowed.
    pub fn can_edit(&self) -> bool {
        self.can_edit
    }

    /// Grant or revoke edit rights.
    pub fn set_can_edit(&mut self, can_edit: bool) {
        self.can_edit = can_edit;
    }

    /// Select an element.
    pub fn select(&mut self, id: ElementId) {
        self.selected = Some(id);
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Whether the given element is selected.
    pub fn is_selected(&self, id: &ElementId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    /// Set the zoom percentage (clamped and stepped).
    pub fn set_zoom(&mut self, percent: u16) {
        self.zoom = Zoom::new(percent);
    }

    /// Toggle grid visibility.
    pub fn toggle_grid(&mut self) {
        self.grid.visible = !self.grid.visible;
    }

    /// Toggle snapping.
    pub fn toggle_snap(&mut self) {
        self.grid.snap = !self.grid.snap;
    }

    /// Change the grid spacing. Non-positive values are ignored and tiny
    /// ones are raised to the minimum.
    pub fn set_grid_spacing(&mut self, mm: f64) {
        if mm > 0.0 {
            self.grid.spacing = clamp_grid_spacing(mm);
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&EditorOptions::default())
    }
}
