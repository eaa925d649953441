//! The remote spreadsheet document contract.
//!
//! The sync logic only ever talks to a [`SpreadsheetDocument`]. Production
//! runs use the Google Sheets client from `workdiary-sheets`; tests use the
//! in-memory document from `workdiary-sync`.
//!
//! Row and column indices are zero-based throughout; A1 notation is only
//! produced at the edges via [`CellRef::to_a1`] and [`GridRange::to_a1`].

use std::fmt;

use crate::error::RemoteError;
use crate::types::Color;

// ---------------------------------------------------------------------------
// Addressing
// ---------------------------------------------------------------------------

/// Spreadsheet column letters for a zero-based column index (`0 → A`, `26 → AA`).
pub fn column_letters(mut index: u32) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (index % 26) as u8);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

/// A single cell, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRef {
    pub row: u32,
    pub column: u32,
}

impl CellRef {
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    pub fn to_a1(&self) -> String {
        format!("{}{}", column_letters(self.column), self.row + 1)
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_a1())
    }
}

/// A rectangular region; start inclusive, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRange {
    pub start_row: u32,
    pub end_row: u32,
    pub start_column: u32,
    pub end_column: u32,
}

impl GridRange {
    pub fn is_empty(&self) -> bool {
        self.start_row >= self.end_row || self.start_column >= self.end_column
    }

    /// `B1:AF100` style notation.
    pub fn to_a1(&self) -> String {
        let top_left = CellRef::new(self.start_row, self.start_column);
        let bottom_right = CellRef::new(
            self.end_row.saturating_sub(1),
            self.end_column.saturating_sub(1),
        );
        format!("{top_left}:{bottom_right}")
    }
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

/// Handle to a tab, as returned when it is created or looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabHandle {
    /// Backend identifier of the tab (the `gid` in Google Sheets URLs).
    pub sheet_id: i64,
    pub title: String,
    pub row_count: u32,
    pub column_count: u32,
    /// Rows frozen at the top; non-zero once a month tab has been registered.
    pub frozen_rows: u32,
}

/// How written cell values are interpreted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInput {
    /// Stored exactly as given. `007` stays the text `007`.
    Literal,
    /// Parsed as if typed into the cell: dates become dates, `=...` a formula.
    Entered,
}

/// A tab's contents: the first row as headers, the remaining rows as data.
///
/// Rows may be ragged; trailing empty cells are frequently omitted by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Records {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Records {
    /// Build from raw grid values where row 0 is the header.
    pub fn from_grid(mut grid: Vec<Vec<String>>) -> Self {
        if grid.is_empty() {
            return Self::default();
        }
        let header = grid.remove(0);
        let mut rows = grid;
        while rows
            .last()
            .is_some_and(|row| row.iter().all(|c| c.trim().is_empty()))
        {
            rows.pop();
        }
        Self { header, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Zero-based position of the header named `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// Cells of column `index`, one per data row; missing cells read as `""`.
    pub fn column_at(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(String::as_str).unwrap_or(""))
    }
}

/// A custom-formula conditional format with a solid background.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatRule {
    pub formula: String,
    pub background: Color,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Operations the work diary needs from a spreadsheet document.
///
/// Every call is one blocking round trip; nothing is retried.
pub trait SpreadsheetDocument {
    /// Titles of every tab, in document order.
    fn tab_titles(&self) -> Result<Vec<String>, RemoteError>;

    /// Look up a tab by title. Fails with [`RemoteError::TabNotFound`].
    fn tab(&self, title: &str) -> Result<TabHandle, RemoteError>;

    /// Create a tab with the given grid size.
    fn add_tab(&mut self, title: &str, rows: u32, columns: u32) -> Result<TabHandle, RemoteError>;

    /// Read a tab's header and data rows.
    fn records(&self, title: &str) -> Result<Records, RemoteError>;

    /// Write a rectangular block whose top-left cell is `start`.
    fn write_values(
        &mut self,
        title: &str,
        start: CellRef,
        values: &[Vec<String>],
        input: ValueInput,
    ) -> Result<(), RemoteError>;

    /// Insert `values.len()` rows before row `at` and fill them with `values`,
    /// read as [`ValueInput::Entered`].
    fn insert_rows(&mut self, title: &str, at: u32, values: &[Vec<String>])
        -> Result<(), RemoteError>;

    /// Attach a conditional format rule to `range` of `tab`.
    fn add_conditional_format(
        &mut self,
        tab: &TabHandle,
        range: GridRange,
        rule: &FormatRule,
    ) -> Result<(), RemoteError>;

    /// Freeze the top `rows` rows of `tab`.
    fn set_frozen_rows(&mut self, tab: &TabHandle, rows: u32) -> Result<(), RemoteError>;

    /// Browser URL of `tab`; carries the tab reference as a `#gid=` fragment.
    fn tab_url(&self, tab: &TabHandle) -> String;
}
