//! Holiday selection for a single month.
//!
//! The holiday sheet keeps one column per year, headed `{prefix}_{year}`.
//! Each cell embeds a `YYYY-MM-DD` date, optionally followed by a description.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::document::Records;
use crate::error::DataShapeError;
use crate::types::{DateLabel, ReferenceDate};

/// Holidays of one month, ordered by date.
pub type HolidaySet = BTreeSet<DateLabel>;

/// Header of the holiday column for `year`.
pub fn year_column(prefix: &str, year: i32) -> String {
    format!("{prefix}_{year}")
}

/// Holidays of `reference`'s month.
///
/// Entries from other months are dropped. Fails when the reference year has no
/// column, or when a matching cell holds an impossible date.
pub fn filter(
    records: &Records,
    sheet: &str,
    prefix: &str,
    reference: ReferenceDate,
) -> Result<HolidaySet, DataShapeError> {
    let column = year_column(prefix, reference.year());
    let index = records
        .column_index(&column)
        .ok_or_else(|| DataShapeError::MissingColumn {
            sheet: sheet.to_string(),
            column: column.clone(),
        })?;

    let year_month = reference.format("%Y-%m").to_string();
    let mut holidays = HolidaySet::new();
    for cell in records.column_at(index) {
        if !cell.contains(&year_month) {
            continue;
        }
        let Some(date) = embedded_date(sheet, cell)? else {
            continue;
        };
        if date.year() == reference.year() && date.month() == reference.month() {
            holidays.insert(DateLabel::from(date));
        }
    }
    Ok(holidays)
}

fn embedded_date(sheet: &str, cell: &str) -> Result<Option<NaiveDate>, DataShapeError> {
    let Some(found) = date_pattern().find(cell) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(found.as_str(), "%Y-%m-%d")
        .map(Some)
        .map_err(|_| DataShapeError::InvalidDate {
            sheet: sheet.to_string(),
            value: cell.to_string(),
        })
}

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("static date pattern"))
}
