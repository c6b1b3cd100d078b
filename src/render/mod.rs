//! Output side of the editor: canvas layout and JSON encoding.

pub mod canvas;
mod json;

pub use canvas::{
    hit_test, render_page, render_page_at, BandLayout, DisplayList, DrawItem, GridLine,
    HandleRect, PixelRect,
};
pub use json::{from_json, from_reader, to_json, JsonFormat};
