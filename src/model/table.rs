//! Table element.

use super::{ElementId, Position};
use serde::{Deserialize, Serialize};

/// A table placed on a page.
///
/// `rows` is always a rectangular grid with at least one row and one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableElement {
    /// Element identifier
    pub id: ElementId,

    /// Location and size on the page
    pub position: Position,

    /// Cell text, row-major
    pub rows: Vec<Vec<String>>,

    /// Render the first row as a header
    pub header_row: bool,

    /// Border color (hex)
    pub border_color: String,

    /// Border width in mm
    pub border_width: f64,

    /// Inner cell padding in mm
    pub cell_padding: f64,

    /// Header row background color (hex)
    pub header_background: String,

    /// Cell font size in points
    pub font_size: f32,
}

/// A change to a table's grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum TableEdit {
    /// Append an empty row
    AddRow,
    /// Append an empty column
    AddColumn,
    /// Remove a row, keeping at least one
    RemoveRow {
        /// 0-based row
        index: usize,
    },
    /// Remove a column, keeping at least one
    RemoveColumn {
        /// 0-based column
        index: usize,
    },
    /// Replace a cell's text
    SetCell {
        /// 0-based row
        row: usize,
        /// 0-based column
        column: usize,
        /// New text
        text: String,
    },
}

impl TableElement {
    /// Create a 2x2 empty table with a header row.
    pub fn new(id: ElementId, position: Position) -> Self {
        Self {
            id,
            position,
            rows: vec![vec![String::new(); 2]; 2],
            header_row: true,
            border_color: "#000000".to_string(),
            border_width: 0.3,
            cell_padding: 2.0,
            header_background: "#f3f4f6".to_string(),
            font_size: 10.0,
        }
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get the number of columns (based on first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    /// Get header rows.
    pub fn header(&self) -> &[Vec<String>] {
        let count = usize::from(self.header_row).min(self.rows.len());
        &self.rows[..count]
    }

    /// Get body rows (non-header).
    pub fn body(&self) -> &[Vec<String>] {
        let count = usize::from(self.header_row).min(self.rows.len());
        &self.rows[count..]
    }

    /// Append an empty row.
    pub fn add_row(&mut self) {
        let columns = self.column_count().max(1);
        self.rows.push(vec![String::new(); columns]);
    }

    /// Append an empty column to every row.
    pub fn add_column(&mut self) {
        for row in &mut self.rows {
            row.push(String::new());
        }
    }

    /// Remove a row. The last remaining row is kept.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= 1 || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    /// Remove a column from every row. The last remaining column is kept.
    pub fn remove_column(&mut self, index: usize) -> bool {
        if self.column_count() <= 1 || index >= self.column_count() {
            return false;
        }
        for row in &mut self.rows {
            row.remove(index);
        }
        true
    }

    /// Replace the text of one cell. Out-of-range coordinates are ignored.
    pub fn set_cell(&mut self, row: usize, column: usize, text: impl Into<String>) -> bool {
        match self.rows.get_mut(row).and_then(|r| r.get_mut(column)) {
            Some(cell) => {
                *cell = text.into();
                true
            }
            None => false,
        }
    }

    /// Apply one structural or cell edit.
    pub fn apply_edit(&mut self, edit: &TableEdit) -> bool {
        match edit {
            TableEdit::AddRow => {
                self.add_row();
                true
            }
            TableEdit::AddColumn => {
                self.add_column();
                true
            }
            TableEdit::RemoveRow { index } => self.remove_row(*index),
            TableEdit::RemoveColumn { index } => self.remove_column(*index),
            TableEdit::SetCell { row, column, text } => {
                let unchanged = self
                    .rows
                    .get(*row)
                    .and_then(|r| r.get(*column))
                    .is_some_and(|cell| cell == text);
                !unchanged && self.set_cell(*row, *column, text.clone())
            }
        }
    }

    /// Check whether a grid is non-empty and rectangular.
    pub fn is_rectangular(rows: &[Vec<String>]) -> bool {
        match rows.first() {
            Some(first) if !first.is_empty() => rows.iter().all(|r| r.len() == first.len()),
            _ => false,
        }
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
