//! Pointer-driven drag and resize.
//!
//! The controller is a small state machine: `Idle`, `Dragging` or
//! `Resizing`. Every pointer move recomputes the element's geometry from the
//! position captured at pointer-down plus the total pointer delta, so
//! intermediate rounding never accumulates. Releasing the pointer always
//! keeps the last committed geometry.

use super::{commit_patch, EditOutcome, RefusalReason, SessionState};
use crate::model::{
    Document, ElementId, ElementPatch, PageSize, Position, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH,
};
use crate::units::{snap_to_grid, Zoom};
use serde::{Deserialize, Serialize};

/// A pointer location in canvas pixels, relative to the page's top-left.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal pixel coordinate
    pub x: f64,
    /// Vertical pixel coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One of the eight resize grips around the selected element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    /// Top edge
    N,
    /// Bottom edge
    S,
    /// Right edge
    E,
    /// Left edge
    W,
    /// Top-right corner
    Ne,
    /// Top-left corner
    Nw,
    /// Bottom-right corner
    Se,
    /// Bottom-left corner
    Sw,
}

impl Handle {
    /// All handles, corners first so they win hit tests over edges.
    pub const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::Ne,
        Handle::Se,
        Handle::Sw,
        Handle::N,
        Handle::E,
        Handle::S,
        Handle::W,
    ];

    /// Whether the handle moves the left edge.
    pub fn moves_left(&self) -> bool {
        matches!(self, Handle::W | Handle::Nw | Handle::Sw)
    }

    /// Whether the handle moves the right edge.
    pub fn moves_right(&self) -> bool {
        matches!(self, Handle::E | Handle::Ne | Handle::Se)
    }

    /// Whether the handle moves the top edge.
    pub fn moves_top(&self) -> bool {
        matches!(self, Handle::N | Handle::Ne | Handle::Nw)
    }

    /// Whether the handle moves the bottom edge.
    pub fn moves_bottom(&self) -> bool {
        matches!(self, Handle::S | Handle::Se | Handle::Sw)
    }

    /// Centre of the grip on the element's bounding box, in mm.
    pub fn anchor(&self, position: &Position) -> (f64, f64) {
        let x = if self.moves_left() {
            position.x
        } else if self.moves_right() {
            position.right()
        } else {
            position.x + position.width / 2.0
        };
        let y = if self.moves_top() {
            position.y
        } else if self.moves_bottom() {
            position.bottom()
        } else {
            position.y + position.height / 2.0
        };
        (x, y)
    }

    /// CSS cursor name for the grip.
    pub fn cursor(&self) -> &'static str {
        match self {
            Handle::N | Handle::S => "ns-resize",
            Handle::E | Handle::W => "ew-resize",
            Handle::Ne | Handle::Sw => "nesw-resize",
            Handle::Nw | Handle::Se => "nwse-resize",
        }
    }
}

/// What the pointer went down on.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerTarget {
    /// The body of an element
    Element(ElementId),
    /// A resize grip of the selected element
    Handle(Handle),
    /// Empty canvas
    Background,
}

/// Interaction state machine.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InteractionState {
    /// No pointer session
    #[default]
    Idle,
    /// Moving an element
    Dragging {
        /// Page the element lives on
        page: usize,
        /// Dragged element
        element_id: ElementId,
        /// Geometry at pointer-down
        origin: Position,
        /// Pointer at pointer-down
        pointer_origin: Point,
    },
    /// Resizing an element
    Resizing {
        /// Page the element lives on
        page: usize,
        /// Resized element
        element_id: ElementId,
        /// Grip in use
        handle: Handle,
        /// Geometry at pointer-down
        origin: Position,
        /// Pointer at pointer-down
        pointer_origin: Point,
    },
}

impl InteractionState {
    /// Check if no pointer session is active.
    pub fn is_idle(&self) -> bool {
        matches!(self, InteractionState::Idle)
    }

    /// The element being dragged or resized.
    pub fn element_id(&self) -> Option<&ElementId> {
        match self {
            InteractionState::Idle => None,
            InteractionState::Dragging { element_id, .. }
            | InteractionState::Resizing { element_id, .. } => Some(element_id),
        }
    }
}

/// Turns pointer events into geometry changes.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    state: InteractionState,
}

impl InteractionController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Handle a pointer-down event.
    ///
    /// Returns `true` if a drag or resize session started. Pressing on an
    /// element selects it even in a read-only session; only the session
    /// start is refused.
    pub fn pointer_down(
        &mut self,
        document: &Document,
        session: &mut SessionState,
        target: PointerTarget,
        pointer: Point,
    ) -> bool {
        if !self.state.is_idle() {
            log::debug!("Ignoring pointer-down during {:?}", self.state);
            return false;
        }
        let page_index = session.current_page;
        let Some(page) = document.page(page_index) else {
            return false;
        };

        match target {
            PointerTarget::Background => {
                session.clear_selection();
                false
            }
            PointerTarget::Element(id) => {
                let Some(element) = page.element(&id) else {
                    return false;
                };
                let origin = element.position();
                session.select(id.clone());
                if !session.can_edit() {
                    return false;
                }
                log::debug!("Drag start {} at {:?}", id, origin);
                self.state = InteractionState::Dragging {
                    page: page_index,
                    element_id: id,
                    origin,
                    pointer_origin: pointer,
                };
                true
            }
            PointerTarget::Handle(handle) => {
                if !session.can_edit() {
                    return false;
                }
                let Some(id) = session.selected.clone() else {
                    return false;
                };
                let Some(element) = page.element(&id) else {
                    return false;
                };
                let origin = element.position();
                log::debug!("Resize start {} via {:?} at {:?}", id, handle, origin);
                self.state = InteractionState::Resizing {
                    page: page_index,
                    element_id: id,
                    handle,
                    origin,
                    pointer_origin: pointer,
                };
                true
            }
        }
    }

    /// Handle a pointer-move event.
    ///
    /// Commits the new geometry when a session is active. If the element was
    /// deleted meanwhile this is a no-op.
    pub fn pointer_move(
        &mut self,
        document: &mut Document,
        session: &mut SessionState,
        pointer: Point,
    ) -> EditOutcome {
        let page_size = document.page_size;
        let (page, element_id, position) = match &self.state {
            InteractionState::Idle => return EditOutcome::Unchanged,
            InteractionState::Dragging {
                page,
                element_id,
                origin,
                pointer_origin,
            } => {
                let (dx, dy) = pointer_delta_mm(*pointer_origin, pointer, session.zoom);
                let position =
                    drag_position(*origin, dx, dy, session.grid.snap_spacing(), page_size);
                (*page, element_id.clone(), position)
            }
            InteractionState::Resizing {
                page,
                element_id,
                handle,
                origin,
                pointer_origin,
            } => {
                let (dx, dy) = pointer_delta_mm(*pointer_origin, pointer, session.zoom);
                let position = resize_position(
                    *origin,
                    *handle,
                    dx,
                    dy,
                    session.grid.snap_spacing(),
                    page_size,
                );
                (*page, element_id.clone(), position)
            }
        };

        if !session.can_edit() {
            return EditOutcome::Refused(RefusalReason::ReadOnly);
        }
        commit_patch(
            document,
            session,
            page,
            &element_id,
            &ElementPatch::position(position),
        )
    }

    /// Handle pointer-up. The last committed geometry stands.
    ///
    /// Returns `true` if a session ended.
    pub fn pointer_up(&mut self) -> bool {
        let previous = std::mem::take(&mut self.state);
        if let Some(id) = previous.element_id() {
            log::debug!("Interaction on {} finished", id);
        }
        !previous.is_idle()
    }

    /// Pointer left the canvas. Same as releasing it.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_up()
    }
}

/// Total pointer movement since `from`, converted to millimetres.
pub fn pointer_delta_mm(from: Point, to: Point, zoom: Zoom) -> (f64, f64) {
    (
        zoom.to_millimeters(to.x - from.x),
        zoom.to_millimeters(to.y - from.y),
    )
}

/// Geometry after moving `origin` by `(dx, dy)` mm.
///
/// The origin is snapped first, then clamped so the element stays on the
/// page. Width and height never change.
pub fn drag_position(
    origin: Position,
    dx: f64,
    dy: f64,
    snap: Option<f64>,
    page: PageSize,
) -> Position {
    let mut x = origin.x + dx;
    let mut y = origin.y + dy;
    if let Some(spacing) = snap {
        x = snap_to_grid(x, spacing);
        y = snap_to_grid(y, spacing);
    }
    Position { x, y, ..origin }.clamped_to(page)
}

/// Geometry after dragging `handle` by `(dx, dy)` mm.
///
/// Only the edges the handle controls move; the opposite edges stay where
/// they were. Moved edges are snapped, kept on the page and kept at least
/// the minimum size away from the fixed edge.
pub fn resize_position(
    origin: Position,
    handle: Handle,
    dx: f64,
    dy: f64,
    snap: Option<f64>,
    page: PageSize,
) -> Position {
    let snap = |value: f64| match snap {
        Some(spacing) => snap_to_grid(value, spacing),
        None => value,
    };

    let (mut x, mut width) = (origin.x, origin.width);
    if handle.moves_right() {
        let right = snap(origin.right() + dx).min(page.width);
        width = (right - origin.x).max(MIN_ELEMENT_WIDTH);
    } else if handle.moves_left() {
        let fixed = origin.right();
        let left = snap(origin.x + dx).max(0.0).min(fixed - MIN_ELEMENT_WIDTH);
        x = left.max(0.0);
        width = fixed - x;
    }

    let (mut y, mut height) = (origin.y, origin.height);
    if handle.moves_bottom() {
        let bottom = snap(origin.bottom() + dy).min(page.height);
        height = (bottom - origin.y).max(MIN_ELEMENT_HEIGHT);
    } else if handle.moves_top() {
        let fixed = origin.bottom();
        let top = snap(origin.y + dy).max(0.0).min(fixed - MIN_ELEMENT_HEIGHT);
        y = top.max(0.0);
        height = fixed - y;
    }

    Position::new(x, y, width, height)
}
