//! Table types for the output document.

use serde::{Deserialize, Serialize};

use super::Paragraph;

/// A table of rows of cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    /// Rows in the table.
    pub rows: Vec<TableRow>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `rows` x `cols` table of empty cells.
    pub fn with_size(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows)
                .map(|_| TableRow::new((0..cols).map(|_| TableCell::empty()).collect()))
                .collect(),
        }
    }

    /// Cell at (row, col), if present.
    pub fn cell(&self, row: usize, col: usize) -> Option<&TableCell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    /// Mutable cell at (row, col), if present.
    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut TableCell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col))
    }

    /// Plain text of cell (row, col), empty when out of range.
    pub fn cell_text(&self, row: usize, col: usize) -> String {
        self.cell(row, col).map(|c| c.plain_text()).unwrap_or_default()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns (based on the first row).
    pub fn column_count(&self) -> usize {
        self.rows.first().map(|r| r.cells.len()).unwrap_or(0)
    }
}

/// A table row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableRow {
    /// Cells in the row.
    pub cells: Vec<TableCell>,
}

impl TableRow {
    /// Create a row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Create a row from text values.
    pub fn from_strings<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }
}

/// A table cell holding paragraphs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableCell {
    /// Cell content.
    pub content: Vec<Paragraph>,
}

impl TableCell {
    /// Create an empty cell.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create a cell with text content.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Paragraph::with_text(text)],
        }
    }

    /// Replace the cell content with a single paragraph of text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.content = vec![Paragraph::with_text(text)];
    }

    /// Plain text of all paragraphs in the cell.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|p| p.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
