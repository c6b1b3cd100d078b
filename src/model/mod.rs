//! Document model types for page layouts.
//!
//! This module defines the serializable data the editor manipulates:
//! documents, pages, header/footer bands and the typed elements placed on
//! them. All geometry is in millimetres. The model has no knowledge of
//! zoom, pixels or pointer input.

mod document;
mod element;
mod geometry;
mod page;
mod style;
mod table;
mod variable;

pub use document::{
    AutoField, Band, BandKind, BandPatch, Document, DocumentVariant, LogoPlacement,
    DEFAULT_ACCENT_COLOR, MAX_PAGES,
};
pub use element::{
    BoxElement, Element, ElementId, ElementKind, ElementPatch, ImageElement, ImageFit,
    LineElement, ListElement, ListStyle, Orientation, QrCodeElement, SignatureElement,
    TextElement, TextStylePatch,
};
pub use geometry::{Margins, PageSize, Position, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH};
pub use page::{Page, DEFAULT_BACKGROUND};
pub use style::{is_valid_color, Alignment, FontWeight, StrokeStyle, TextStyle};
pub use table::{TableEdit, TableElement};
pub use variable::{VariableCatalog, VariableDefinition, VariableElement};
