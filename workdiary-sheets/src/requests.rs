//! Request bodies for the Sheets v4 `batchUpdate` and `values` endpoints.
//!
//! Builders are pure so the wire shapes can be checked without a network.

use serde_json::{json, Value};

use workdiary_core::{Color, FormatRule, GridRange, TabHandle, ValueInput};

/// Wrap structural requests for `POST {id}:batchUpdate`.
pub fn batch(requests: Vec<Value>) -> Value {
    json!({ "requests": requests })
}

pub fn add_sheet(title: &str, rows: u32, columns: u32) -> Value {
    json!({
        "addSheet": {
            "properties": {
                "title": title,
                "gridProperties": { "rowCount": rows, "columnCount": columns }
            }
        }
    })
}

/// Insert `count` blank rows before zero-based row `at`.
///
/// New rows never inherit formatting from the header above them.
pub fn insert_rows(sheet_id: i64, at: u32, count: u32) -> Value {
    json!({
        "insertDimension": {
            "range": {
                "sheetId": sheet_id,
                "dimension": "ROWS",
                "startIndex": at,
                "endIndex": at + count
            },
            "inheritFromBefore": false
        }
    })
}

/// Add `count` rows at the bottom of the grid.
pub fn append_rows(sheet_id: i64, count: u32) -> Value {
    json!({
        "appendDimension": {
            "sheetId": sheet_id,
            "dimension": "ROWS",
            "length": count
        }
    })
}

pub fn grid_range(sheet_id: i64, range: GridRange) -> Value {
    json!({
        "sheetId": sheet_id,
        "startRowIndex": range.start_row,
        "endRowIndex": range.end_row,
        "startColumnIndex": range.start_column,
        "endColumnIndex": range.end_column
    })
}

fn color(c: Color) -> Value {
    json!({ "red": c.red, "green": c.green, "blue": c.blue })
}

/// A custom-formula background rule, inserted ahead of existing rules.
pub fn add_conditional_format(tab: &TabHandle, range: GridRange, rule: &FormatRule) -> Value {
    json!({
        "addConditionalFormatRule": {
            "rule": {
                "ranges": [grid_range(tab.sheet_id, range)],
                "booleanRule": {
                    "condition": {
                        "type": "CUSTOM_FORMULA",
                        "values": [{ "userEnteredValue": rule.formula }]
                    },
                    "format": { "backgroundColor": color(rule.background) }
                }
            },
            "index": 0
        }
    })
}

pub fn freeze_rows(sheet_id: i64, rows: u32) -> Value {
    json!({
        "updateSheetProperties": {
            "properties": {
                "sheetId": sheet_id,
                "gridProperties": { "frozenRowCount": rows }
            },
            "fields": "gridProperties.frozenRowCount"
        }
    })
}

/// The `valueInputOption` for `input`.
pub fn input_option(input: ValueInput) -> &'static str {
    match input {
        ValueInput::Literal => "RAW",
        ValueInput::Entered => "USER_ENTERED",
    }
}

/// Body for `POST {id}/values:batchUpdate`.
pub fn values_update(range: &str, values: &[Vec<String>], input: ValueInput) -> Value {
    json!({
        "valueInputOption": input_option(input),
        "data": [{
            "range": range,
            "majorDimension": "ROWS",
            "values": values
        }]
    })
}
