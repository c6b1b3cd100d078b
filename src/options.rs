//! Editor options and configuration.

use crate::error::Result;
use crate::model::PageSize;
use crate::units::Zoom;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default grid spacing in millimetres.
pub const DEFAULT_GRID_SPACING: f64 = 5.0;

/// Finest grid spacing accepted, in millimetres.
pub const MIN_GRID_SPACING: f64 = 1.0;

/// Bring a requested spacing into range. Non-positive or non-finite values
/// give the default.
pub fn clamp_grid_spacing(mm: f64) -> f64 {
    if mm.is_finite() && mm > 0.0 {
        mm.max(MIN_GRID_SPACING)
    } else {
        DEFAULT_GRID_SPACING
    }
}

/// Options used to open an editor session.
///
/// Every field has a default, so a configuration file only needs the keys
/// it wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorOptions {
    /// Grid spacing in mm
    pub grid_spacing: f64,

    /// Snap drag and resize results to the grid
    pub snap_to_grid: bool,

    /// Draw grid lines
    pub show_grid: bool,

    /// Initial zoom level
    pub zoom: Zoom,

    /// Sheet size for blank documents
    pub page_size: PageSize,

    /// Whether the session may mutate the document
    pub can_edit: bool,

    /// Offset applied to duplicated elements, in mm
    pub duplicate_offset: f64,

    /// Distance moved by one keyboard nudge, in mm
    pub nudge_step: f64,
}

impl EditorOptions {
    /// Create new editor options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut options: Self = serde_json::from_str(&content)?;
        options.grid_spacing = clamp_grid_spacing(options.grid_spacing);
        log::debug!("Loaded editor options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Set the grid spacing, at least [`MIN_GRID_SPACING`]. Non-positive
    /// values fall back to the default.
    pub fn with_grid_spacing(mut self, mm: f64) -> Self {
        self.grid_spacing = clamp_grid_spacing(mm);
        self
    }

    /// Enable or disable snapping.
    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap_to_grid = snap;
        self
    }

    /// Enable or disable the visible grid.
    pub fn with_grid(mut self, show: bool) -> Self {
        self.show_grid = show;
        self
    }

    /// Set the initial zoom (clamped to the supported range).
    pub fn with_zoom(mut self, percent: u16) -> Self {
        self.zoom = Zoom::new(percent);
        self
    }

    /// Set the sheet size for blank documents.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Open the session without edit rights.
    pub fn read_only(mut self) -> Self {
        self.can_edit = false;
        self
    }

    /// Set edit rights explicitly.
    pub fn with_can_edit(mut self, can_edit: bool) -> Self {
        self.can_edit = can_edit;
        self
    }
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            grid_spacing: DEFAULT_GRID_SPACING,
            snap_to_grid: false,
            show_grid: false,
            zoom: Zoom::default(),
            page_size: PageSize::default(),
            can_edit: true,
            duplicate_offset: 5.0,
            nudge_step: 1.0,
        }
    }
}
