//! Element types placed on pages.
//!
//! [`Element`] is a closed set of variants. The editor only ever touches the
//! shared `id` and `position` fields through [`Element::id`] and
//! [`Element::position`]; type-specific attributes are read by rendering code
//! that matches on the variant.

use super::{
    Alignment, FontWeight, Position, StrokeStyle, TableElement, TextStyle, VariableDefinition,
    VariableElement, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an element, unique within its page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// The tag of an element variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    /// Free text
    Text,
    /// Raster or vector image
    Image,
    /// Grid of text cells
    Table,
    /// Straight rule
    Line,
    /// Filled rectangle
    Box,
    /// Bulleted or numbered list
    List,
    /// Signature field
    Signature,
    /// QR code
    #[serde(rename = "qrcode")]
    QrCode,
    /// Variable placeholder
    Variable,
}

impl ElementKind {
    /// All element kinds in toolbar order.
    pub const ALL: [ElementKind; 9] = [
        ElementKind::Text,
        ElementKind::Image,
        ElementKind::Table,
        ElementKind::Line,
        ElementKind::Box,
        ElementKind::List,
        ElementKind::Signature,
        ElementKind::QrCode,
        ElementKind::Variable,
    ];

    /// Returns the serialized tag of this kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Table => "table",
            Self::Line => "line",
            Self::Box => "box",
            Self::List => "list",
            Self::Signature => "signature",
            Self::QrCode => "qrcode",
            Self::Variable => "variable",
        }
    }

    /// Width and height a freshly created element of this kind gets, in mm.
    pub fn default_size(&self) -> (f64, f64) {
        match self {
            Self::Text => (80.0, 10.0),
            Self::Image => (50.0, 40.0),
            Self::Table => (100.0, 30.0),
            Self::Line => (100.0, MIN_ELEMENT_HEIGHT),
            Self::Box => (60.0, 40.0),
            Self::List => (80.0, 25.0),
            Self::Signature => (70.0, 25.0),
            Self::QrCode => (30.0, 30.0),
            Self::Variable => (60.0, 10.0),
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A block of free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    /// Element identifier
    pub id: ElementId,
    /// Location and size on the page
    pub position: Position,
    /// The text content
    pub content: String,
    /// Text styling
    pub style: TextStyle,
}

/// How an image fills its box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    /// Scale to fit inside, keeping aspect ratio
    #[default]
    Contain,
    /// Scale to cover, keeping aspect ratio
    Cover,
    /// Stretch to the box
    Stretch,
}

/// An image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Element identifier
    pub id: ElementId,
    /// Location and size on the page
    pub position: Position,
    /// URL or data URI of the image
    pub src: String,
    /// Alternative text
    pub alt: String,
    /// Fit mode
    pub fit: ImageFit,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
}

/// Direction of a line element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right
    #[default]
    Horizontal,
    /// Top to bottom
    Vertical,
}

/// A straight rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineElement {
    /// Element identifier
    pub id: ElementId,
    /// Location and size on the page
    pub position: Position,
    /// Direction of the rule inside its box
    pub orientation: Orientation,
    /// Stroke color (hex)
    pub color: String,
    /// Stroke thickness in mm
    pub thickness: f64,
    /// Stroke pattern
    pub stroke: StrokeStyle,
}

/// A filled rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxElement {
    /// Element identifier
    pub id: ElementId,
    /// Location and size on the page
    pub position: Position,
    /// Fill color (hex)
    pub fill_color: String,
    /// Border color (hex)
    pub border_color: String,
    /// Border width in mm
    pub border_width: f64,
    /// Corner radius in mm
    pub corner_radius: f64,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
}

/// List marker style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStyle {
    /// Bullet markers
    #[default]
    Bullet,
    /// 1, 2, 3, ...
    Numbered,
    /// Dash markers
    Dash,
}

impl ListStyle {
    /// Marker text for the item at `index` (0-based).
    pub fn marker(&self, index: usize) -> String {
        match self {
            ListStyle::Bullet => "\u{2022}".to_string(),
            ListStyle::Numbered => format!("{}.", index + 1),
            ListStyle::Dash => "-".to_string(),
        }
    }
}

/// A bulleted or numbered list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListElement {
    /// Element identifier
    pub id: ElementId,
    /// Location and size on the page
    pub position: Position,
    /// Item texts
    pub items: Vec<String>,
    /// Marker style
    pub list_style: ListStyle,
    /// Text styling
    pub style: TextStyle,
}

/// A field to be signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureElement {
    /// Element identifier
    pub id: ElementId,
    /// Location and size on the page
    pub position: Position,
    /// Caption under the signature line
    pub label: String,
    /// Draw the signature line
    pub show_line: bool,
    /// Print a place/date field next to the signature
    pub show_date: bool,
}

/// A QR code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCodeElement {
    /// Element identifier
    pub id: ElementId,
    /// Location and size on the page
    pub position: Position,
    /// Encoded payload
    pub payload: String,
    /// Module color (hex)
    pub foreground: String,
    /// Background color (hex)
    pub background: String,
}

/// One placed visual object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// Free text
    Text(TextElement),
    /// Image
    Image(ImageElement),
    /// Table
    Table(TableElement),
    /// Line
    Line(LineElement),
    /// Box
    Box(BoxElement),
    /// List
    List(ListElement),
    /// Signature field
    Signature(SignatureElement),
    /// QR code
    #[serde(rename = "qrcode")]
    QrCode(QrCodeElement),
    /// Variable placeholder
    Variable(VariableElement),
}

macro_rules! each_variant {
    ($value:expr, $inner:ident => $body:expr) => {
        match $value {
            Element::Text($inner) => $body,
            Element::Image($inner) => $body,
            Element::Table($inner) => $body,
            Element::Line($inner) => $body,
            Element::Box($inner) => $body,
            Element::List($inner) => $body,
            Element::Signature($inner) => $body,
            Element::QrCode($inner) => $body,
            Element::Variable($inner) => $body,
        }
    };
}

impl Element {
    /// Create an element of the given kind with a generated id.
    ///
    /// The anchor supplies `x`/`y`; the size is the kind's default.
    pub fn new(kind: ElementKind, x: f64, y: f64) -> Self {
        let (width, height) = kind.default_size();
        Self::with_position(kind, ElementId::generate(), Position::new(x, y, width, height))
    }

    /// Create an element of the given kind with explicit id and geometry.
    pub fn with_position(kind: ElementKind, id: ElementId, position: Position) -> Self {
        let position = position.normalized();
        match kind {
            ElementKind::Text => Element::Text(TextElement {
                id,
                position,
                content: "Text".to_string(),
                style: TextStyle::default(),
            }),
            ElementKind::Image => Element::Image(ImageElement {
                id,
                position,
                src: String::new(),
                alt: String::new(),
                fit: ImageFit::Contain,
                opacity: 1.0,
            }),
            ElementKind::Table => Element::Table(TableElement::new(id, position)),
            ElementKind::Line => Element::Line(LineElement {
                id,
                position,
                orientation: Orientation::Horizontal,
                color: "#000000".to_string(),
                thickness: 0.5,
                stroke: StrokeStyle::Solid,
            }),
            ElementKind::Box => Element::Box(BoxElement {
                id,
                position,
                fill_color: "#f3f4f6".to_string(),
                border_color: "#9ca3af".to_string(),
                border_width: 0.3,
                corner_radius: 0.0,
                opacity: 1.0,
            }),
            ElementKind::List => Element::List(ListElement {
                id,
                position,
                items: vec!["Item 1".into(), "Item 2".into(), "Item 3".into()],
                list_style: ListStyle::Bullet,
                style: TextStyle::default(),
            }),
            ElementKind::Signature => Element::Signature(SignatureElement {
                id,
                position,
                label: "Signature".to_string(),
                show_line: true,
                show_date: true,
            }),
            ElementKind::QrCode => Element::QrCode(QrCodeElement {
                id,
                position,
                payload: String::new(),
                foreground: "#000000".to_string(),
                background: "#ffffff".to_string(),
            }),
            ElementKind::Variable => Element::Variable(VariableElement::new(
                id,
                position,
                "variable",
                "Variable",
            )),
        }
    }

    /// Create a text element with the given content.
    pub fn text(content: impl Into<String>, position: Position) -> Self {
        Element::Text(TextElement {
            id: ElementId::generate(),
            position: position.normalized(),
            content: content.into(),
            style: TextStyle::default(),
        })
    }

    /// Create a variable placeholder from a catalog entry.
    pub fn variable(definition: &VariableDefinition, x: f64, y: f64) -> Self {
        let (width, height) = ElementKind::Variable.default_size();
        Element::Variable(VariableElement::new(
            ElementId::generate(),
            Position::new(x, y, width, height).normalized(),
            definition.key.clone(),
            definition.label.clone(),
        ))
    }

    /// The element's identifier.
    pub fn id(&self) -> &ElementId {
        each_variant!(self, e => &e.id)
    }

    /// The element's geometry.
    pub fn position(&self) -> Position {
        each_variant!(self, e => e.position)
    }

    /// Replace the element's geometry.
    pub fn set_position(&mut self, position: Position) {
        each_variant!(self, e => e.position = position)
    }

    /// The element's tag.
    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
            Element::Table(_) => ElementKind::Table,
            Element::Line(_) => ElementKind::Line,
            Element::Box(_) => ElementKind::Box,
            Element::List(_) => ElementKind::List,
            Element::Signature(_) => ElementKind::Signature,
            Element::QrCode(_) => ElementKind::QrCode,
            Element::Variable(_) => ElementKind::Variable,
        }
    }

    /// A copy of this element with a new id.
    pub fn duplicate(&self) -> Self {
        let mut copy = self.clone();
        each_variant!(&mut copy, e => e.id = ElementId::generate());
        copy
    }

    /// Text styling, for the kinds that carry one.
    pub fn text_style(&self) -> Option<&TextStyle> {
        match self {
            Element::Text(e) => Some(&e.style),
            Element::List(e) => Some(&e.style),
            Element::Variable(e) => Some(&e.style),
            _ => None,
        }
    }

    fn text_style_mut(&mut self) -> Option<&mut TextStyle> {
        match self {
            Element::Text(e) => Some(&mut e.style),
            Element::List(e) => Some(&mut e.style),
            Element::Variable(e) => Some(&mut e.style),
            _ => None,
        }
    }

    /// Get plain text content of the element, if it has any.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Element::Text(e) => Some(e.content.clone()),
            Element::Table(e) => Some(e.plain_text()),
            Element::List(e) => Some(
                e.items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| format!("{} {}", e.list_style.marker(i), item))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Element::Signature(e) => Some(e.label.clone()),
            Element::Variable(e) => Some(e.placeholder()),
            _ => None,
        }
    }

    /// Merge a partial update into this element.
    ///
    /// Fields the variant does not carry are ignored. Returns `true` if
    /// anything changed.
    pub fn apply_patch(&mut self, patch: &ElementPatch) -> bool {
        let before = self.clone();

        let current = self.position();
        let position = Position {
            x: patch.x.unwrap_or(current.x).max(0.0),
            y: patch.y.unwrap_or(current.y).max(0.0),
            width: patch.width.unwrap_or(current.width).max(MIN_ELEMENT_WIDTH),
            height: patch.height.unwrap_or(current.height).max(MIN_ELEMENT_HEIGHT),
        };
        if patch.touches_position() {
            self.set_position(position);
        }

        if let (Some(style_patch), Some(style)) = (&patch.style, self.text_style_mut()) {
            style_patch.apply(style);
        }

        match self {
            Element::Text(e) => {
                set(&mut e.content, &patch.content);
            }
            Element::Image(e) => {
                set(&mut e.src, &patch.src);
                set(&mut e.alt, &patch.alt);
                set(&mut e.fit, &patch.fit);
                if let Some(opacity) = patch.opacity {
                    e.opacity = opacity.clamp(0.0, 1.0);
                }
            }
            Element::Table(e) => {
                if let Some(rows) = &patch.rows {
                    if TableElement::is_rectangular(rows) {
                        e.rows = rows.clone();
                    } else {
                        log::warn!("Ignoring non-rectangular table rows for {}", e.id);
                    }
                }
                set(&mut e.header_row, &patch.header_row);
                set(&mut e.border_color, &patch.border_color);
                set(&mut e.border_width, &patch.border_width);
                set(&mut e.cell_padding, &patch.cell_padding);
                set(&mut e.header_background, &patch.header_background);
                if let Some(style) = &patch.style {
                    set(&mut e.font_size, &style.font_size);
                }
            }
            Element::Line(e) => {
                set(&mut e.orientation, &patch.orientation);
                set(&mut e.color, &patch.color);
                set(&mut e.thickness, &patch.thickness);
                set(&mut e.stroke, &patch.stroke);
            }
            Element::Box(e) => {
                set(&mut e.fill_color, &patch.fill_color);
                set(&mut e.border_color, &patch.border_color);
                set(&mut e.border_width, &patch.border_width);
                set(&mut e.corner_radius, &patch.corner_radius);
                if let Some(opacity) = patch.opacity {
                    e.opacity = opacity.clamp(0.0, 1.0);
                }
            }
            Element::List(e) => {
                set(&mut e.items, &patch.items);
                set(&mut e.list_style, &patch.list_style);
            }
            Element::Signature(e) => {
                set(&mut e.label, &patch.label);
                set(&mut e.show_line, &patch.show_line);
                set(&mut e.show_date, &patch.show_date);
            }
            Element::QrCode(e) => {
                set(&mut e.payload, &patch.content);
                set(&mut e.foreground, &patch.color);
                set(&mut e.background, &patch.fill_color);
            }
            Element::Variable(e) => {
                set(&mut e.key, &patch.key);
                set(&mut e.label, &patch.label);
            }
        }

        *self != before
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

/// A partial update to an element.
///
/// Every field is optional; `None` leaves the attribute untouched. Fields
/// are shared across variants where the meaning matches: `content` is the
/// text of a text element and the payload of a QR code, `color` is a line's
/// stroke and a QR code's foreground, `fill_color` is a box fill and a QR
/// code's background.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    /// New left edge
    pub x: Option<f64>,
    /// New top edge
    pub y: Option<f64>,
    /// New width
    pub width: Option<f64>,
    /// New height
    pub height: Option<f64>,

    /// Text content or QR payload
    pub content: Option<String>,
    /// Text styling changes
    pub style: Option<TextStylePatch>,

    /// Image source
    pub src: Option<String>,
    /// Image alternative text
    pub alt: Option<String>,
    /// Image fit mode
    pub fit: Option<ImageFit>,
    /// Image or box opacity
    pub opacity: Option<f32>,

    /// Table cells
    pub rows: Option<Vec<Vec<String>>>,
    /// Table header flag
    pub header_row: Option<bool>,
    /// Table or box border color
    pub border_color: Option<String>,
    /// Table or box border width
    pub border_width: Option<f64>,
    /// Table cell padding
    pub cell_padding: Option<f64>,
    /// Table header background
    pub header_background: Option<String>,

    /// Line direction
    pub orientation: Option<Orientation>,
    /// Line stroke or QR foreground color
    pub color: Option<String>,
    /// Line thickness
    pub thickness: Option<f64>,
    /// Line stroke pattern
    pub stroke: Option<StrokeStyle>,

    /// Box fill or QR background color
    pub fill_color: Option<String>,
    /// Box corner radius
    pub corner_radius: Option<f64>,

    /// List items
    pub items: Option<Vec<String>>,
    /// List marker style
    pub list_style: Option<ListStyle>,

    /// Signature or variable label
    pub label: Option<String>,
    /// Signature line toggle
    pub show_line: Option<bool>,
    /// Signature date toggle
    pub show_date: Option<bool>,

    /// Variable key
    pub key: Option<String>,
}

impl ElementPatch {
    /// Create an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Patch that replaces the whole geometry.
    pub fn position(position: Position) -> Self {
        Self {
            x: Some(position.x),
            y: Some(position.y),
            width: Some(position.width),
            height: Some(position.height),
            ..Self::default()
        }
    }

    /// Set the origin.
    pub fn with_origin(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Set the content.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Set text styling changes.
    pub fn with_style(mut self, style: TextStylePatch) -> Self {
        self.style = Some(style);
        self
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Whether any geometry field is set.
    pub fn touches_position(&self) -> bool {
        self.x.is_some() || self.y.is_some() || self.width.is_some() || self.height.is_some()
    }
}

/// A partial update to a [`TextStyle`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextStylePatch {
    /// Font family name
    pub font_family: Option<String>,
    /// Font size in points
    pub font_size: Option<f32>,
    /// Font weight
    pub font_weight: Option<FontWeight>,
    /// Italic text
    pub italic: Option<bool>,
    /// Text color
    pub color: Option<String>,
    /// Horizontal alignment
    pub alignment: Option<Alignment>,
    /// Line height multiplier
    pub line_height: Option<f32>,
}

impl TextStylePatch {
    /// Merge into an existing style.
    pub fn apply(&self, style: &mut TextStyle) {
        set(&mut style.font_family, &self.font_family);
        set(&mut style.font_size, &self.font_size);
        set(&mut style.font_weight, &self.font_weight);
        set(&mut style.italic, &self.italic);
        set(&mut style.color, &self.color);
        set(&mut style.alignment, &self.alignment);
        set(&mut style.line_height, &self.line_height);
    }
}
