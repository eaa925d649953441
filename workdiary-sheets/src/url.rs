//! Document URL handling.

use std::sync::OnceLock;

use regex::Regex;

use workdiary_core::ConfigError;

pub const API_ROOT: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Spreadsheet ID from a browser URL such as
/// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.
pub fn spreadsheet_id(document_url: &str) -> Result<String, ConfigError> {
    id_pattern()
        .captures(document_url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ConfigError::Invalid {
            field: "document_url",
            reason: format!("no /spreadsheets/d/<id> in '{document_url}'"),
        })
}

/// Browser URL of one tab.
pub fn tab_url(spreadsheet_id: &str, sheet_id: i64) -> String {
    format!("https://docs.google.com/spreadsheets/d/{spreadsheet_id}/edit#gid={sheet_id}")
}

/// `'title'` with embedded quotes doubled, as A1 ranges require.
pub fn quote_title(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

/// `'title'!A2` style range.
pub fn a1_range(title: &str, cell: &str) -> String {
    format!("{}!{cell}", quote_title(title))
}

fn id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"/spreadsheets/d/([A-Za-z0-9_-]+)").expect("static spreadsheet id pattern")
    })
}
