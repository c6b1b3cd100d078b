//! Document-level types.

use super::style::{is_valid_color, DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_TEXT_COLOR};
use super::{Element, Margins, Page, PageSize, TableElement};
use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of pages a document may hold.
pub const MAX_PAGES: usize = 20;

/// Default accent color.
pub const DEFAULT_ACCENT_COLOR: &str = "#2563eb";

/// A complete design: pages, bands, margins and defaults.
///
/// A valid document always has between 1 and [`MAX_PAGES`] pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Document identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Style preset
    pub variant: DocumentVariant,

    /// Sheet size shared by all pages
    #[serde(default)]
    pub page_size: PageSize,

    /// Pages in order
    pub pages: Vec<Page>,

    /// Band repeated at the top of every page
    pub header: Band,

    /// Band repeated at the bottom of every page
    pub footer: Band,

    /// Page margins
    pub margins: Margins,

    /// Default font family
    pub font_family: String,

    /// Default font size in points
    pub font_size: f32,

    /// Default text color (hex)
    pub text_color: String,

    /// Accent color (hex)
    pub accent_color: String,

    /// Creation time
    pub created: DateTime<Utc>,

    /// Last modification time
    pub modified: DateTime<Utc>,
}

impl Document {
    /// Create a blank document with one empty page.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: "Untitled document".to_string(),
            variant: DocumentVariant::default(),
            page_size: PageSize::default(),
            pages: vec![Page::new()],
            header: Band::header(),
            footer: Band::footer(),
            margins: Margins::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size: DEFAULT_FONT_SIZE,
            text_color: DEFAULT_TEXT_COLOR.to_string(),
            accent_color: DEFAULT_ACCENT_COLOR.to_string(),
            created: now,
            modified: now,
        }
    }

    /// Create a blank document with a name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::new()
        }
    }

    /// Set the sheet size.
    pub fn with_page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Set the style preset.
    pub fn with_variant(mut self, variant: DocumentVariant) -> Self {
        self.variant = variant;
        self.accent_color = variant.accent_color().to_string();
        self
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by index (0-based).
    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Get a page by index for mutation.
    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    /// Whether another page may be added.
    pub fn can_add_page(&self) -> bool {
        self.pages.len() < MAX_PAGES
    }

    /// Whether a page may be removed.
    pub fn can_delete_page(&self) -> bool {
        self.pages.len() > 1
    }

    /// Total number of elements on all pages (bands excluded).
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(Page::element_count).sum()
    }

    /// Record a modification.
    pub fn touch(&mut self) {
        self.modified = Utc::now();
    }

    /// The header or footer band.
    pub fn band(&self, kind: BandKind) -> &Band {
        match kind {
            BandKind::Header => &self.header,
            BandKind::Footer => &self.footer,
        }
    }

    /// Mutable access to the header or footer band.
    pub fn band_mut(&mut self, kind: BandKind) -> &mut Band {
        match kind {
            BandKind::Header => &mut self.header,
            BandKind::Footer => &mut self.footer,
        }
    }

    /// Check the model invariants.
    ///
    /// Documents built through the editor always pass; this guards data
    /// coming from outside (stores, JSON files).
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(Error::InvalidDocument("document has no pages".into()));
        }
        if self.pages.len() > MAX_PAGES {
            return Err(Error::InvalidDocument(format!(
                "document has {} pages (maximum {})",
                self.pages.len(),
                MAX_PAGES
            )));
        }
        if !(self.page_size.width > 0.0 && self.page_size.height > 0.0) {
            return Err(Error::InvalidDocument("page size must be positive".into()));
        }

        for (index, page) in self.pages.iter().enumerate() {
            if let Some(id) = page.duplicate_id() {
                return Err(Error::InvalidDocument(format!(
                    "page {} has duplicate element id {}",
                    index + 1,
                    id
                )));
            }
            check_color(&page.background_color, "page background")?;
            for element in &page.elements {
                check_element(element)?;
            }
        }
        for band in [&self.header, &self.footer] {
            if let Some(id) = band.duplicate_id() {
                return Err(Error::InvalidDocument(format!(
                    "band has duplicate element id {}",
                    id
                )));
            }
            for element in &band.elements {
                check_element(element)?;
            }
        }

        check_color(&self.text_color, "text color")?;
        check_color(&self.accent_color, "accent color")?;
        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

fn check_color(color: &str, what: &str) -> Result<()> {
    if is_valid_color(color) {
        Ok(())
    } else {
        Err(Error::InvalidDocument(format!("invalid {}: {}", what, color)))
    }
}

fn check_element(element: &Element) -> Result<()> {
    if !element.position().is_valid() {
        return Err(Error::InvalidDocument(format!(
            "element {} has invalid geometry",
            element.id()
        )));
    }
    if let Element::Table(table) = element {
        if !TableElement::is_rectangular(&table.rows) {
            return Err(Error::InvalidDocument(format!(
                "table {} is not rectangular",
                table.id
            )));
        }
    }
    Ok(())
}

/// Style preset of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentVariant {
    /// Serif headings, blue accent
    #[default]
    Classic,
    /// Sans-serif, teal accent
    Modern,
    /// Monochrome
    Minimal,
    /// Conservative layout for contracts
    Formal,
}

impl DocumentVariant {
    /// Accent color the preset starts with.
    pub fn accent_color(&self) -> &'static str {
        match self {
            Self::Classic => DEFAULT_ACCENT_COLOR,
            Self::Modern => "#0d9488",
            Self::Minimal => "#111827",
            Self::Formal => "#1e3a8a",
        }
    }
}

/// Where a band shows the company logo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogoPlacement {
    /// No logo
    #[default]
    None,
    /// Left-aligned
    Left,
    /// Centered
    Center,
    /// Right-aligned
    Right,
}

/// A header or footer band.
///
/// Holds elements like a page does, but is repeated on every page by the
/// renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Whether the band is drawn
    pub enabled: bool,

    /// Band height in mm
    pub height: f64,

    /// Elements inside the band, bottom to top
    pub elements: Vec<Element>,

    /// Print "Page n of m"
    pub show_page_number: bool,

    /// Print the current date
    pub show_date: bool,

    /// Print the document name
    pub show_document_name: bool,

    /// Logo placement
    pub logo: LogoPlacement,
}

impl Band {
    /// Default header: disabled, 15 mm, document name.
    pub fn header() -> Self {
        Self {
            enabled: false,
            height: 15.0,
            elements: Vec::new(),
            show_page_number: false,
            show_date: false,
            show_document_name: true,
            logo: LogoPlacement::None,
        }
    }

    /// Default footer: disabled, 12 mm, page number.
    pub fn footer() -> Self {
        Self {
            enabled: false,
            height: 12.0,
            elements: Vec::new(),
            show_page_number: true,
            show_date: false,
            show_document_name: false,
            logo: LogoPlacement::None,
        }
    }

    /// The first duplicated element id, if any.
    pub fn duplicate_id(&self) -> Option<&super::ElementId> {
        let mut seen = std::collections::HashSet::new();
        self.elements.iter().map(|e| e.id()).find(|id| !seen.insert(*id))
    }

    /// Texts of the enabled auto fields for one page.
    ///
    /// `page_index` is 0-based. Returns nothing when the band is disabled.
    pub fn auto_fields(
        &self,
        page_index: usize,
        page_count: usize,
        document_name: &str,
        date: NaiveDate,
    ) -> Vec<AutoField> {
        if !self.enabled {
            return Vec::new();
        }
        let mut fields = Vec::new();
        if self.show_document_name {
            fields.push(AutoField::DocumentName(document_name.to_string()));
        }
        if self.show_date {
            fields.push(AutoField::Date(date.format("%Y-%m-%d").to_string()));
        }
        if self.show_page_number {
            fields.push(AutoField::PageNumber(format!(
                "Page {} of {}",
                page_index + 1,
                page_count
            )));
        }
        fields
    }
}

/// Which band of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BandKind {
    /// Top of every page
    Header,
    /// Bottom of every page
    Footer,
}

/// Partial update of a band. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BandPatch {
    /// Whether the band is drawn
    pub enabled: Option<bool>,
    /// Band height in mm
    pub height: Option<f64>,
    /// Print "Page n of m"
    pub show_page_number: Option<bool>,
    /// Print the current date
    pub show_date: Option<bool>,
    /// Print the document name
    pub show_document_name: Option<bool>,
    /// Logo placement
    pub logo: Option<LogoPlacement>,
}

impl Band {
    /// Merge a patch. Height is kept within `[0, max_height]`.
    ///
    /// Returns `true` if anything changed.
    pub fn apply_patch(&mut self, patch: &BandPatch, max_height: f64) -> bool {
        let before = self.clone();
        if let Some(enabled) = patch.enabled {
            self.enabled = enabled;
        }
        if let Some(height) = patch.height {
            self.height = height.clamp(0.0, max_height.max(0.0));
        }
        if let Some(show) = patch.show_page_number {
            self.show_page_number = show;
        }
        if let Some(show) = patch.show_date {
            self.show_date = show;
        }
        if let Some(show) = patch.show_document_name {
            self.show_document_name = show;
        }
        if let Some(logo) = patch.logo {
            self.logo = logo;
        }
        *self != before
    }
}

/// A resolved automatic band field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoField {
    /// The document's name
    DocumentName(String),
    /// Formatted date
    Date(String),
    /// "Page n of m"
    PageNumber(String),
}

impl AutoField {
    /// The text to draw.
    pub fn text(&self) -> &str {
        match self {
            AutoField::DocumentName(s) | AutoField::Date(s) | AutoField::PageNumber(s) => s,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementId, ElementKind, Position};

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.margins, Margins::uniform(20.0));
        assert_eq!(doc.font_family, "Helvetica");
        assert!(doc.validate().is_ok());
    }

    #[test]
    fn test_variant_sets_accent() {
        let doc = Document::with_name("Lease").with_variant(DocumentVariant::Modern);
        assert_eq!(doc.name, "Lease");
        assert_eq!(doc.accent_color, "#0d9488");
    }

    #[test]
    fn test_validate_page_bounds() {
        let mut doc = Document::new();
        doc.pages.clear();
        assert!(matches!(doc.validate(), Err(Error::InvalidDocument(_))));

        doc.pages = (0..=MAX_PAGES).map(|_| Page::new()).collect();
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_validate_duplicate_ids() {
        let mut doc = Document::new();
        let element = Element::with_position(
            ElementKind::Box,
            ElementId::from("dup"),
            Position::new(0.0, 0.0, 20.0, 20.0),
        );
        doc.pages[0].elements.push(element.clone());
        doc.pages[0].elements.push(element);
        let err = doc.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate element id dup"));
    }

    #[test]
    fn test_validate_colors() {
        let mut doc = Document::new();
        doc.accent_color = "blue".into();
        assert!(doc.validate().is_err());
    }

    #[test]
    fn test_band_auto_fields() {
        let mut footer = Band::footer();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert!(footer.auto_fields(0, 3, "Lease", date).is_empty());

        footer.enabled = true;
        footer.show_date = true;
        let fields = footer.auto_fields(1, 3, "Lease", date);
        let texts: Vec<_> = fields.iter().map(AutoField::text).collect();
        assert_eq!(texts, vec!["2024-03-01", "Page 2 of 3"]);
    }

    #[test]
    fn test_band_patch() {
        let mut doc = Document::new();
        let patch = BandPatch {
            enabled: Some(true),
            height: Some(500.0),
            logo: Some(LogoPlacement::Right),
            ..Default::default()
        };
        assert!(doc.band_mut(BandKind::Footer).apply_patch(&patch, 100.0));
        let footer = doc.band(BandKind::Footer);
        assert!(footer.enabled);
        assert_eq!(footer.height, 100.0);
        assert_eq!(footer.logo, LogoPlacement::Right);
        assert!(!doc.header.enabled);

        assert!(!doc.footer.apply_patch(&patch, 100.0));
        assert!(!doc.footer.apply_patch(&BandPatch::default(), 100.0));
    }
}
