//! Holiday highlighting rule construction.
//!
//! A month tab has the roster label in column A and one date per column from
//! column B onwards, all in row 1. The rule covers every date column and every
//! row, and is written relative to the range's top-left cell with the row
//! anchored, so each column tests its own header date.

use chrono::Datelike;

use workdiary_core::document::column_letters;
use workdiary_core::{Color, FormatRule, GridRange, HolidaySet, TabHandle};

/// First column holding a date label.
pub const FIRST_DATE_COLUMN: u32 = 1;

/// Region covered by the highlight: first to last date column, every row of the tab.
pub fn highlight_range(tab: &TabHandle, date_count: usize) -> GridRange {
    GridRange {
        start_row: 0,
        end_row: tab.row_count,
        start_column: FIRST_DATE_COLUMN,
        end_column: FIRST_DATE_COLUMN + date_count as u32,
    }
}

/// `=OR(B$1=DATE(2024,2,8), B$1=DATE(2024,2,28))`, one term per holiday.
///
/// Returns `None` for an empty set: `OR()` with no terms is not a valid formula.
pub fn holiday_formula(holidays: &HolidaySet) -> Option<String> {
    if holidays.is_empty() {
        return None;
    }
    let anchor = format!("{}$1", column_letters(FIRST_DATE_COLUMN));
    let terms: Vec<String> = holidays
        .iter()
        .map(|label| {
            let d = label.date();
            format!("{anchor}=DATE({},{},{})", d.year(), d.month(), d.day())
        })
        .collect();
    Some(format!("=OR({})", terms.join(", ")))
}

/// The conditional format for `holidays`, painted with `color`.
pub fn holiday_rule(holidays: &HolidaySet, color: Color) -> Option<FormatRule> {
    holiday_formula(holidays).map(|formula| FormatRule {
        formula,
        background: color,
    })
}
