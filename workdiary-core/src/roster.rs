//! Member roster extraction.

use crate::document::Records;
use crate::error::DataShapeError;
use crate::types::MemberName;

/// Non-empty names of the roster column, in source order.
///
/// `column` names the roster header; `None` reads the first column. Duplicates
/// are kept: the synchronizer deduplicates on write. A sheet with no header and
/// no rows yields an empty roster.
pub fn extract(
    records: &Records,
    sheet: &str,
    column: Option<&str>,
) -> Result<Vec<MemberName>, DataShapeError> {
    if records.header.is_empty() && records.rows.is_empty() {
        return Ok(Vec::new());
    }

    let index = match column {
        Some(name) => records
            .column_index(name)
            .ok_or_else(|| DataShapeError::MissingColumn {
                sheet: sheet.to_string(),
                column: name.to_string(),
            })?,
        None => 0,
    };

    Ok(records
        .column_at(index)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(MemberName::from)
        .collect())
}
