//! Typed views of the Sheets v4 responses the client reads.

use serde::Deserialize;
use serde_json::Value;

use workdiary_core::TabHandle;

#[derive(Debug, Deserialize)]
pub struct Spreadsheet {
    #[serde(default)]
    pub sheets: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
pub struct Sheet {
    pub properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetProperties {
    #[serde(default)]
    pub sheet_id: i64,
    pub title: String,
    #[serde(default)]
    pub grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridProperties {
    #[serde(default)]
    pub row_count: u32,
    #[serde(default)]
    pub column_count: u32,
    #[serde(default)]
    pub frozen_row_count: u32,
}

impl From<SheetProperties> for TabHandle {
    fn from(p: SheetProperties) -> Self {
        TabHandle {
            sheet_id: p.sheet_id,
            title: p.title,
            row_count: p.grid_properties.row_count,
            column_count: p.grid_properties.column_count,
            frozen_rows: p.grid_properties.frozen_row_count,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUpdateResponse {
    #[serde(default)]
    pub replies: Vec<Reply>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub add_sheet: Option<Sheet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetResponse {
    #[serde(default)]
    pub value_ranges: Vec<ValueRange>,
}

#[derive(Debug, Deserialize)]
pub struct ValueRange {
    /// Absent when the range holds no values.
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    /// Cells as display strings. Formatted reads return strings already;
    /// numbers and booleans are rendered as JSON would print them.
    pub fn into_grid(self) -> Vec<Vec<String>> {
        self.values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect()
    }
}

fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// The `error.message` of a Google API error body, or the raw body when it
/// is not one.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spreadsheet_metadata_maps_to_handles() {
        let body = r#"{"sheets":[
            {"properties":{"sheetId":0,"title":"組員名單","gridProperties":{"rowCount":1000,"columnCount":26}}},
            {"properties":{"sheetId":812,"title":"2024年02月","gridProperties":{"rowCount":103,"columnCount":40,"frozenRowCount":1}}}
        ]}"#;
        let parsed: Spreadsheet = serde_json::from_str(body).expect("parse");
        let handles: Vec<TabHandle> = parsed.sheets.into_iter().map(|s| s.properties.into()).collect();
        assert_eq!(handles.len(), 2);
        assert_eq!(handles[1].sheet_id, 812);
        assert_eq!(handles[1].title, "2024年02月");
        assert_eq!(handles[1].row_count, 103);
        assert_eq!(handles[0].column_count, 26);
        assert_eq!(handles[0].frozen_rows, 0);
        assert_eq!(handles[1].frozen_rows, 1);
    }

    #[test]
    fn first_sheet_may_omit_zero_id() {
        let body = r#"{"sheets":[{"properties":{"title":"Sheet1"}}]}"#;
        let parsed: Spreadsheet = serde_json::from_str(body).expect("parse");
        assert_eq!(parsed.sheets[0].properties.sheet_id, 0);
    }

    #[test]
    fn add_sheet_reply_is_read() {
        let body = r#"{"spreadsheetId":"x","replies":[{"addSheet":{"properties":
            {"sheetId":99,"title":"2024年03月","gridProperties":{"rowCount":101,"columnCount":42}}}}]}"#;
        let parsed: BatchUpdateResponse = serde_json::from_str(body).expect("parse");
        let sheet = parsed.replies.into_iter().next().and_then(|r| r.add_sheet).expect("reply");
        assert_eq!(sheet.properties.sheet_id, 99);
    }

    #[test]
    fn empty_range_has_no_values() {
        let body = r#"{"valueRanges":[{"range":"'t'!A1:Z1000","majorDimension":"ROWS"}]}"#;
        let parsed: BatchGetResponse = serde_json::from_str(body).expect("parse");
        assert!(parsed.value_ranges[0].values.is_empty());
    }

    #[test]
    fn value_cells_become_strings() {
        let body = r#"{"values":[["組員","2024-02-01"],["Alice",3,true]]}"#;
        let range: ValueRange = serde_json::from_str(body).expect("parse");
        assert_eq!(
            range.into_grid(),
            vec![
                vec!["組員".to_string(), "2024-02-01".to_string()],
                vec!["Alice".to_string(), "3".to_string(), "true".to_string()],
            ]
        );
    }

    #[test]
    fn google_error_message_is_extracted() {
        let body = r#"{"error":{"code":403,"message":"The caller does not have permission","status":"PERMISSION_DENIED"}}"#;
        assert_eq!(error_message(body), "The caller does not have permission");
        assert_eq!(error_message("  bad gateway \n"), "bad gateway");
    }
}
