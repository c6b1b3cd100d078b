//! Geometry types in document millimetres.

use serde::{Deserialize, Serialize};

/// Minimum element width in millimetres.
pub const MIN_ELEMENT_WIDTH: f64 = 10.0;

/// Minimum element height in millimetres.
pub const MIN_ELEMENT_HEIGHT: f64 = 5.0;

/// Location and size of an element, relative to the page's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Distance from the left page edge in mm
    pub x: f64,

    /// Distance from the top page edge in mm
    pub y: f64,

    /// Width in mm
    pub width: f64,

    /// Height in mm
    pub height: f64,
}

impl Position {
    /// Create a new position.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Return a copy moved by the given offset.
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Whether the point lies inside this rectangle (edges included).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    /// Floor width and height at the element minimum and origin at zero.
    pub fn normalized(&self) -> Self {
        Self {
            x: self.x.max(0.0),
            y: self.y.max(0.0),
            width: self.width.max(MIN_ELEMENT_WIDTH),
            height: self.height.max(MIN_ELEMENT_HEIGHT),
        }
    }

    /// Keep the rectangle on a page of the given size without resizing it.
    ///
    /// An element larger than the page is pinned to the top-left corner.
    pub fn clamped_to(&self, page: PageSize) -> Self {
        Self {
            x: self.x.clamp(0.0, (page.width - self.width).max(0.0)),
            y: self.y.clamp(0.0, (page.height - self.height).max(0.0)),
            ..*self
        }
    }

    /// Floor at the minimum size, cap at the page size, then keep on the page.
    pub fn fitted_to(&self, page: PageSize) -> Self {
        let pos = self.normalized();
        Self {
            width: pos.width.min(page.width),
            height: pos.height.min(page.height),
            ..pos
        }
        .clamped_to(page)
    }

    /// Whether all coordinates are finite and non-negative.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite() && *v >= 0.0)
    }
}

/// Physical page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Page width in mm
    pub width: f64,

    /// Page height in mm
    pub height: f64,
}

impl PageSize {
    /// Create a custom page size.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// ISO A4 (210 x 297 mm).
    pub fn a4() -> Self {
        Self::new(210.0, 297.0)
    }

    /// ISO A5 (148 x 210 mm).
    pub fn a5() -> Self {
        Self::new(148.0, 210.0)
    }

    /// US Letter (8.5 x 11 inches).
    pub fn letter() -> Self {
        Self::new(215.9, 279.4)
    }

    /// US Legal (8.5 x 14 inches).
    pub fn legal() -> Self {
        Self::new(215.9, 355.6)
    }

    /// The same sheet turned sideways.
    pub fn landscape(self) -> Self {
        Self::new(self.width.max(self.height), self.width.min(self.height))
    }

    /// Check if the page is in landscape orientation.
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::a4()
    }
}

/// Page margins in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f64,
    /// Right margin
    pub right: f64,
    /// Bottom margin
    pub bottom: f64,
    /// Left margin
    pub left: f64,
}

impl Margins {
    /// Same margin on every side.
    pub fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }

    /// The printable area of a page with these margins.
    pub fn content_area(&self, page: PageSize) -> Position {
        Position::new(
            self.left,
            self.top,
            (page.width - self.left - self.right).max(0.0),
            (page.height - self.top - self.bottom).max(0.0),
        )
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(20.0)
    }
}
