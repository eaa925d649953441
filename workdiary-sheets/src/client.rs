//! Blocking Google Sheets v4 client.
//!
//! Each trait call maps to one or two REST round trips authorized with a
//! bearer token. Responses are decoded through [`crate::responses`].

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;

use workdiary_core::{
    CellRef, Config, ConfigError, Credentials, FormatRule, GridRange, Records, RemoteError,
    SpreadsheetDocument, TabHandle, ValueInput,
};

use crate::requests;
use crate::responses::{self, BatchGetResponse, BatchUpdateResponse, Spreadsheet};
use crate::url::{self, API_ROOT};

const TIMEOUT: Duration = Duration::from_secs(30);
const SHEET_FIELDS: &str =
    "sheets.properties(sheetId,title,gridProperties(rowCount,columnCount,frozenRowCount))";

pub struct SheetsClient {
    agent: ureq::Agent,
    spreadsheet_id: String,
    authorization: String,
}

impl SheetsClient {
    pub fn new(document_url: &str, access_token: &str) -> Result<Self, ConfigError> {
        let spreadsheet_id = url::spreadsheet_id(document_url)?;
        let agent = ureq::AgentBuilder::new().timeout(TIMEOUT).build();
        Ok(Self {
            agent,
            spreadsheet_id,
            authorization: format!("Bearer {access_token}"),
        })
    }

    /// Client for the configured document, reading the token from the
    /// credentials file.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let credentials = Credentials::load(&config.credentials_path)?;
        Self::new(&config.document_url, &credentials.access_token)
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{API_ROOT}/{}{suffix}", self.spreadsheet_id)
    }

    fn get<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        suffix: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RemoteError> {
        let mut request = self
            .agent
            .get(&self.endpoint(suffix))
            .set("Authorization", &self.authorization);
        for (key, value) in query {
            request = request.query(key, value);
        }
        tracing::debug!("{operation}: GET {suffix}");
        let response = request.call().map_err(|e| request_error(operation, e))?;
        decode(operation, response)
    }

    fn post<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        suffix: &str,
        body: &Value,
    ) -> Result<T, RemoteError> {
        tracing::debug!("{operation}: POST {suffix}");
        let response = self
            .agent
            .post(&self.endpoint(suffix))
            .set("Authorization", &self.authorization)
            .send_json(body)
            .map_err(|e| request_error(operation, e))?;
        decode(operation, response)
    }

    fn batch_update(
        &self,
        operation: &'static str,
        request: Value,
    ) -> Result<BatchUpdateResponse, RemoteError> {
        self.post(operation, ":batchUpdate", &requests::batch(vec![request]))
    }

    fn sheets(&self) -> Result<Vec<TabHandle>, RemoteError> {
        let spreadsheet: Spreadsheet = self.get("tab_titles", "", &[("fields", SHEET_FIELDS)])?;
        Ok(spreadsheet
            .sheets
            .into_iter()
            .map(|s| s.properties.into())
            .collect())
    }

    fn put_values(
        &self,
        operation: &'static str,
        title: &str,
        start: CellRef,
        values: &[Vec<String>],
        input: ValueInput,
    ) -> Result<(), RemoteError> {
        let range = url::a1_range(title, &start.to_a1());
        let _: Value = self.post(
            operation,
            "/values:batchUpdate",
            &requests::values_update(&range, values, input),
        )?;
        Ok(())
    }
}

impl SpreadsheetDocument for SheetsClient {
    fn tab_titles(&self) -> Result<Vec<String>, RemoteError> {
        Ok(self.sheets()?.into_iter().map(|t| t.title).collect())
    }

    fn tab(&self, title: &str) -> Result<TabHandle, RemoteError> {
        self.sheets()?
            .into_iter()
            .find(|t| t.title == title)
            .ok_or_else(|| RemoteError::TabNotFound {
                title: title.to_string(),
            })
    }

    fn add_tab(&mut self, title: &str, rows: u32, columns: u32) -> Result<TabHandle, RemoteError> {
        let response = self.batch_update("add_tab", requests::add_sheet(title, rows, columns))?;
        response
            .replies
            .into_iter()
            .find_map(|r| r.add_sheet)
            .map(|s| s.properties.into())
            .ok_or_else(|| RemoteError::Decode {
                operation: "add_tab",
                message: "no addSheet reply".to_string(),
            })
    }

    fn records(&self, title: &str) -> Result<Records, RemoteError> {
        let range = url::quote_title(title);
        let response: BatchGetResponse = self.get(
            "records",
            "/values:batchGet",
            &[
                ("ranges", range.as_str()),
                ("majorDimension", "ROWS"),
                ("valueRenderOption", "FORMATTED_VALUE"),
            ],
        )?;
        let grid = response
            .value_ranges
            .into_iter()
            .next()
            .map(|r| r.into_grid())
            .unwrap_or_default();
        Ok(Records::from_grid(grid))
    }

    fn write_values(
        &mut self,
        title: &str,
        start: CellRef,
        values: &[Vec<String>],
        input: ValueInput,
    ) -> Result<(), RemoteError> {
        if values.is_empty() {
            return Ok(());
        }
        // Value writes cannot extend the grid themselves.
        let tab = self.tab(title)?;
        let needed = start.row + values.len() as u32;
        if needed > tab.row_count {
            self.batch_update(
                "write_values",
                requests::append_rows(tab.sheet_id, needed - tab.row_count),
            )?;
            tracing::debug!("grew '{title}' to {needed} rows");
        }
        self.put_values("write_values", title, start, values, input)
    }

    fn insert_rows(
        &mut self,
        title: &str,
        at: u32,
        values: &[Vec<String>],
    ) -> Result<(), RemoteError> {
        if values.is_empty() {
            return Ok(());
        }
        let tab = self.tab(title)?;
        self.batch_update(
            "insert_rows",
            requests::insert_rows(tab.sheet_id, at, values.len() as u32),
        )?;
        self.put_values(
            "insert_rows",
            title,
            CellRef::new(at, 0),
            values,
            ValueInput::Entered,
        )
    }

    fn add_conditional_format(
        &mut self,
        tab: &TabHandle,
        range: GridRange,
        rule: &FormatRule,
    ) -> Result<(), RemoteError> {
        self.batch_update(
            "add_conditional_format",
            requests::add_conditional_format(tab, range, rule),
        )?;
        Ok(())
    }

    fn set_frozen_rows(&mut self, tab: &TabHandle, rows: u32) -> Result<(), RemoteError> {
        self.batch_update("set_frozen_rows", requests::freeze_rows(tab.sheet_id, rows))?;
        Ok(())
    }

    fn tab_url(&self, tab: &TabHandle) -> String {
        url::tab_url(&self.spreadsheet_id, tab.sheet_id)
    }
}

// ---------------------------------------------------------------------------
// Error mapping
// ---------------------------------------------------------------------------

fn decode<T: DeserializeOwned>(
    operation: &'static str,
    response: ureq::Response,
) -> Result<T, RemoteError> {
    response.into_json().map_err(|e| RemoteError::Decode {
        operation,
        message: e.to_string(),
    })
}

fn request_error(operation: &'static str, err: ureq::Error) -> RemoteError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            status_error(operation, status, &body)
        }
        ureq::Error::Transport(transport) => RemoteError::Transport {
            operation,
            message: transport.to_string(),
        },
    }
}

/// Classify a non-success answer. 401 and 403 mean the token is bad or lacks
/// access to the document.
pub(crate) fn status_error(operation: &'static str, status: u16, body: &str) -> RemoteError {
    let message = responses::error_message(body);
    match status {
        401 | 403 => RemoteError::Unauthorized {
            operation,
            status,
            message,
        },
        _ => RemoteError::Status {
            operation,
            status,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const URL: &str = "https://docs.google.com/spreadsheets/d/sheet-123/edit#gid=0";

    #[test]
    fn client_targets_document_from_url() {
        let client = SheetsClient::new(URL, "token").expect("client");
        assert_eq!(client.spreadsheet_id(), "sheet-123");
        assert_eq!(
            client.endpoint(":batchUpdate"),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123:batchUpdate"
        );
        assert_eq!(client.authorization, "Bearer token");
    }

    #[test]
    fn tab_url_uses_sheet_id_fragment() {
        let client = SheetsClient::new(URL, "token").expect("client");
        let tab = TabHandle {
            sheet_id: 812,
            title: "2024年02月".to_string(),
            row_count: 1,
            column_count: 1,
            frozen_rows: 0,
        };
        assert!(client.tab_url(&tab).ends_with("/d/sheet-123/edit#gid=812"));
    }

    #[rstest]
    #[case(401)]
    #[case(403)]
    fn auth_statuses_are_unauthorized(#[case] status: u16) {
        let body = r#"{"error":{"code":403,"message":"denied"}}"#;
        match status_error("records", status, body) {
            RemoteError::Unauthorized {
                operation,
                status: s,
                message,
            } => {
                assert_eq!(operation, "records");
                assert_eq!(s, status);
                assert_eq!(message, "denied");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn other_statuses_keep_code_and_message() {
        let body = r#"{"error":{"code":400,"message":"Unable to parse range: 'x'"}}"#;
        let err = status_error("records", 400, body);
        assert!(matches!(err, RemoteError::Status { status: 400, .. }));
        assert!(err.to_string().contains("Unable to parse range"));
    }

    #[test]
    fn missing_credentials_file_is_config_error() {
        let config = Config::new(URL, "/nonexistent/workdiary/token.json");
        assert!(matches!(
            SheetsClient::from_config(&config),
            Err(ConfigError::Io(_))
        ));
    }
}
