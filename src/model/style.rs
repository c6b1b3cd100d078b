//! Text and color styling shared by several element kinds.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Default font family for new documents and text elements.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

/// Default font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 11.0;

/// Default text color.
pub const DEFAULT_TEXT_COLOR: &str = "#000000";

/// Check whether a string is a `#rgb` or `#rrggbb` hex color.
pub fn is_valid_color(color: &str) -> bool {
    static COLOR: OnceLock<Regex> = OnceLock::new();
    COLOR
        .get_or_init(|| Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").unwrap())
        .is_match(color)
}

/// Text styling properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStyle {
    /// Font family name
    pub font_family: String,

    /// Font size in points
    pub font_size: f32,

    /// Font weight
    pub font_weight: FontWeight,

    /// Italic text
    pub italic: bool,

    /// Text color (hex format, e.g., "#FF0000")
    pub color: String,

    /// Horizontal alignment
    pub alignment: Alignment,

    /// Line height multiplier (1.0 = single)
    pub line_height: f32,
}

impl TextStyle {
    /// Style with a different font size.
    pub fn with_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Bold variant of this style.
    pub fn bold(mut self) -> Self {
        self.font_weight = FontWeight::Bold;
        self
    }

    /// Style with a different alignment.
    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            font_weight: FontWeight::Normal,
            italic: false,
            color: DEFAULT_TEXT_COLOR.to_string(),
            alignment: Alignment::Left,
            line_height: 1.2,
        }
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

/// Font weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular weight
    #[default]
    Normal,
    /// Bold weight
    Bold,
}

/// Stroke pattern for lines and borders.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeStyle {
    /// Continuous stroke
    #[default]
    Solid,
    /// Dashed stroke
    Dashed,
    /// Dotted stroke
    Dotted,
}
