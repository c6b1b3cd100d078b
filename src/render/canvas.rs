//! Screen layout of one page: what to draw and where the pointer can land.
//!
//! The canvas works in pixels at the session's zoom. It produces a flat
//! display list in z-order (bottom first) plus the resize grips of the
//! selected element, and resolves pointer positions back to
//! [`PointerTarget`]s for the interaction controller. Actual drawing is left
//! to the embedding UI.

use crate::editor::{Handle, Point, PointerTarget, SessionState};
use crate::model::{AutoField, Band, Document, Element, ElementId, ElementKind, Page, Position};
use crate::options::MIN_GRID_SPACING;
use crate::units::Zoom;
use chrono::NaiveDate;
use serde::Serialize;

/// Side length of a resize grip in pixels.
pub const HANDLE_SIZE: f64 = 8.0;

/// An axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PixelRect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl PixelRect {
    /// Project a millimetre rectangle at the given zoom.
    pub fn from_position(position: &Position, zoom: Zoom) -> Self {
        Self {
            x: zoom.to_pixels(position.x),
            y: zoom.to_pixels(position.y),
            width: zoom.to_pixels(position.width),
            height: zoom.to_pixels(position.height),
        }
    }

    /// A square of side `size` centred on `(cx, cy)`.
    pub fn centered(cx: f64, cy: f64, size: f64) -> Self {
        Self {
            x: cx - size / 2.0,
            y: cy - size / 2.0,
            width: size,
            height: size,
        }
    }

    /// Whether the point lies inside (edges included).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// One element to draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawItem {
    /// Element id
    pub element_id: ElementId,
    /// Element type, for picking a painter
    pub kind: ElementKind,
    /// Bounding box in pixels
    pub rect: PixelRect,
    /// Whether the element is selected
    pub selected: bool,
}

/// A resize grip of the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandleRect {
    /// Which grip
    pub handle: Handle,
    /// Grip area in pixels
    pub rect: PixelRect,
}

/// A grid line, at a pixel offset from the page's top or left edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "axis", content = "offset", rename_all = "lowercase")]
pub enum GridLine {
    /// Line parallel to the y axis
    Vertical(f64),
    /// Line parallel to the x axis
    Horizontal(f64),
}

/// A header or footer strip with its resolved auto fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandLayout {
    /// Strip area in pixels
    pub rect: PixelRect,
    /// Texts of the enabled auto fields
    pub fields: Vec<String>,
    /// Elements placed in the band, bottom first
    pub items: Vec<DrawItem>,
}

/// Everything needed to draw one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayList {
    /// 0-based page index
    pub page_index: usize,
    /// Page width in pixels
    pub width: f64,
    /// Page height in pixels
    pub height: f64,
    /// Background color
    pub background: String,
    /// Area inside the margins
    pub content_area: PixelRect,
    /// Header strip, when enabled
    pub header: Option<BandLayout>,
    /// Footer strip, when enabled
    pub footer: Option<BandLayout>,
    /// Elements in z-order
    pub items: Vec<DrawItem>,
    /// Grips of the selected element
    pub handles: Vec<HandleRect>,
    /// Grid lines, when the grid is visible
    pub grid: Vec<GridLine>,
}

/// Lay out the session's current page.
pub fn render_page(doc: &Document, session: &SessionState, date: NaiveDate) -> Option<DisplayList> {
    render_page_at(doc, session, session.current_page, date)
}

/// Lay out the page at `page_index`.
///
/// Selection and grips are only shown on the session's current page.
pub fn render_page_at(
    doc: &Document,
    session: &SessionState,
    page_index: usize,
    date: NaiveDate,
) -> Option<DisplayList> {
    let page = doc.page(page_index)?;
    let zoom = session.zoom;
    let selected = if page_index == session.current_page {
        session.selected.as_ref()
    } else {
        None
    };

    let items = draw_items(&page.elements, selected, zoom, 0.0);
    let handles = selected
        .and_then(|id| page.element(id))
        .map(|element| handle_rects(&element.position(), zoom))
        .unwrap_or_default();
    let grid = if session.grid.visible {
        grid_lines(doc, session.grid.spacing, zoom)
    } else {
        Vec::new()
    };

    let page_count = doc.page_count();
    let fields = |band: &Band| band.auto_fields(page_index, page_count, &doc.name, date);
    let width = doc.page_size.width;
    let header = band_layout(&doc.header, 0.0, width, zoom, fields);
    let footer_top = doc.page_size.height - doc.footer.height;
    let footer = band_layout(&doc.footer, footer_top, width, zoom, fields);

    Some(DisplayList {
        page_index,
        width: zoom.to_pixels(doc.page_size.width),
        height: zoom.to_pixels(doc.page_size.height),
        background: page.background_color.clone(),
        content_area: PixelRect::from_position(&doc.margins.content_area(doc.page_size), zoom),
        header,
        footer,
        items,
        handles,
        grid,
    })
}

fn draw_items(
    elements: &[Element],
    selected: Option<&ElementId>,
    zoom: Zoom,
    offset_y: f64,
) -> Vec<DrawItem> {
    elements
        .iter()
        .map(|element| {
            let position = element.position().translated(0.0, offset_y);
            DrawItem {
                element_id: element.id().clone(),
                kind: element.kind(),
                rect: PixelRect::from_position(&position, zoom),
                selected: selected == Some(element.id()),
            }
        })
        .collect()
}

fn band_layout<F>(band: &Band, top: f64, width: f64, zoom: Zoom, fields: F) -> Option<BandLayout>
where
    F: Fn(&Band) -> Vec<AutoField>,
{
    if !band.enabled {
        return None;
    }
    let area = Position::new(0.0, top, width, band.height);
    Some(BandLayout {
        rect: PixelRect::from_position(&area, zoom),
        fields: fields(band).iter().map(|f| f.text().to_string()).collect(),
        items: draw_items(&band.elements, None, zoom, top),
    })
}

/// Grip rectangles around an element, corners first.
pub fn handle_rects(position: &Position, zoom: Zoom) -> Vec<HandleRect> {
    Handle::ALL
        .iter()
        .map(|handle| {
            let (x, y) = handle.anchor(position);
            HandleRect {
                handle: *handle,
                rect: PixelRect::centered(zoom.to_pixels(x), zoom.to_pixels(y), HANDLE_SIZE),
            }
        })
        .collect()
}

/// Grid lines covering the page. Spacing below [`MIN_GRID_SPACING`] is
/// raised to it.
pub fn grid_lines(doc: &Document, spacing: f64, zoom: Zoom) -> Vec<GridLine> {
    if spacing.is_nan() || spacing <= 0.0 {
        return Vec::new();
    }
    let spacing = spacing.max(MIN_GRID_SPACING);
    let mut lines = Vec::new();
    let mut offset = spacing;
    while offset < doc.page_size.width {
        lines.push(GridLine::Vertical(zoom.to_pixels(offset)));
        offset += spacing;
    }
    let mut offset = spacing;
    while offset < doc.page_size.height {
        lines.push(GridLine::Horizontal(zoom.to_pixels(offset)));
        offset += spacing;
    }
    lines
}

/// Resolve a pointer position on a page.
///
/// Grips of the selected element win, then elements from the top of the
/// stack down; anything else is background.
pub fn hit_test(page: &Page, selected: Option<&ElementId>, zoom: Zoom, point: Point) -> PointerTarget {
    if let Some(element) = selected.and_then(|id| page.element(id)) {
        for grip in handle_rects(&element.position(), zoom) {
            if grip.rect.contains(point) {
                return PointerTarget::Handle(grip.handle);
            }
        }
    }
    page.elements
        .iter()
        .rev()
        .find(|element| PixelRect::from_position(&element.position(), zoom).contains(point))
        .map(|element| PointerTarget::Element(element.id().clone()))
        .unwrap_or(PointerTarget::Background)
}
