//! In-memory [`SpreadsheetDocument`] that records every mutation.
//!
//! Used by the test suites to assert exactly which writes a run performed.

use workdiary_core::{
    CellRef, FormatRule, GridRange, Records, RemoteError, SpreadsheetDocument, TabHandle,
    ValueInput,
};

/// A mutation applied to a [`MemoryDocument`], in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    AddTab { title: String, rows: u32, columns: u32 },
    WriteValues {
        title: String,
        start: CellRef,
        values: Vec<Vec<String>>,
        input: ValueInput,
    },
    InsertRows { title: String, at: u32, values: Vec<Vec<String>> },
    AddConditionalFormat { title: String, range: GridRange, rule: FormatRule },
    SetFrozenRows { title: String, rows: u32 },
}

/// One tab of a [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryTab {
    pub handle: TabHandle,
    pub cells: Vec<Vec<String>>,
    pub rules: Vec<(GridRange, FormatRule)>,
}

impl MemoryTab {
    /// Non-empty cells of column `column`, top to bottom.
    pub fn column(&self, column: usize) -> Vec<String> {
        self.cells
            .iter()
            .filter_map(|row| row.get(column))
            .filter(|c| !c.is_empty())
            .cloned()
            .collect()
    }

    pub fn cell(&self, at: CellRef) -> Option<&str> {
        self.cells
            .get(at.row as usize)
            .and_then(|row| row.get(at.column as usize))
            .map(String::as_str)
    }
}

/// A spreadsheet held entirely in memory.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    url: String,
    tabs: Vec<MemoryTab>,
    next_sheet_id: i64,
    with_fragments: bool,
    fail_on: Option<&'static str>,
    mutations: Vec<Mutation>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self {
            url: "https://docs.google.com/spreadsheets/d/memory/edit".to_string(),
            tabs: Vec::new(),
            next_sheet_id: 0,
            with_fragments: true,
            fail_on: None,
            mutations: Vec::new(),
        }
    }

    /// Add a tab holding `grid` (row 0 is the header). Not recorded as a mutation.
    pub fn with_tab(mut self, title: &str, grid: Vec<Vec<String>>) -> Self {
        let columns = grid.iter().map(Vec::len).max().unwrap_or(0).max(26) as u32;
        let rows = (grid.len() as u32).max(1000);
        let handle = self.new_handle(title, rows, columns);
        self.tabs.push(MemoryTab {
            handle,
            cells: grid,
            rules: Vec::new(),
        });
        self
    }

    /// Produce tab URLs without a `#gid=` fragment.
    pub fn without_tab_fragments(mut self) -> Self {
        self.with_fragments = false;
        self
    }

    /// Make every call of the named operation fail with a transport error.
    pub fn failing_on(mut self, operation: &'static str) -> Self {
        self.fail_on = Some(operation);
        self
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn clear_mutations(&mut self) {
        self.mutations.clear();
    }

    /// Replace a tab's contents, as an edit made outside a run would. Not recorded.
    pub fn set_cells(&mut self, title: &str, grid: Vec<Vec<String>>) -> Result<(), RemoteError> {
        let tab = self.tab_mut(title)?;
        tab.cells = grid;
        Ok(())
    }

    pub fn tab_ref(&self, title: &str) -> Option<&MemoryTab> {
        self.tabs.iter().find(|t| t.handle.title == title)
    }

    fn tab_mut(&mut self, title: &str) -> Result<&mut MemoryTab, RemoteError> {
        self.tabs
            .iter_mut()
            .find(|t| t.handle.title == title)
            .ok_or_else(|| RemoteError::TabNotFound {
                title: title.to_string(),
            })
    }

    fn new_handle(&mut self, title: &str, rows: u32, columns: u32) -> TabHandle {
        let handle = TabHandle {
            sheet_id: self.next_sheet_id,
            title: title.to_string(),
            row_count: rows,
            column_count: columns,
            frozen_rows: 0,
        };
        self.next_sheet_id += 1;
        handle
    }

    fn check(&self, operation: &'static str) -> Result<(), RemoteError> {
        if self.fail_on == Some(operation) {
            return Err(RemoteError::Transport {
                operation,
                message: "connection reset".to_string(),
            });
        }
        Ok(())
    }
}

fn put(cells: &mut Vec<Vec<String>>, start: CellRef, values: &[Vec<String>]) {
    for (r, row) in values.iter().enumerate() {
        let r = start.row as usize + r;
        if cells.len() <= r {
            cells.resize(r + 1, Vec::new());
        }
        for (c, value) in row.iter().enumerate() {
            let c = start.column as usize + c;
            let target = &mut cells[r];
            if target.len() <= c {
                target.resize(c + 1, String::new());
            }
            target[c] = value.clone();
        }
    }
}

impl SpreadsheetDocument for MemoryDocument {
    fn tab_titles(&self) -> Result<Vec<String>, RemoteError> {
        self.check("tab_titles")?;
        Ok(self.tabs.iter().map(|t| t.handle.title.clone()).collect())
    }

    fn tab(&self, title: &str) -> Result<TabHandle, RemoteError> {
        self.check("tab")?;
        self.tab_ref(title)
            .map(|t| t.handle.clone())
            .ok_or_else(|| RemoteError::TabNotFound {
                title: title.to_string(),
            })
    }

    fn add_tab(&mut self, title: &str, rows: u32, columns: u32) -> Result<TabHandle, RemoteError> {
        self.check("add_tab")?;
        if self.tab_ref(title).is_some() {
            return Err(RemoteError::Status {
                operation: "add_tab",
                status: 400,
                message: format!("a sheet with the name \"{title}\" already exists"),
            });
        }
        let handle = self.new_handle(title, rows, columns);
        self.tabs.push(MemoryTab {
            handle: handle.clone(),
            cells: Vec::new(),
            rules: Vec::new(),
        });
        self.mutations.push(Mutation::AddTab {
            title: title.to_string(),
            rows,
            columns,
        });
        Ok(handle)
    }

    fn records(&self, title: &str) -> Result<Records, RemoteError> {
        self.check("records")?;
        let tab = self.tab_ref(title).ok_or_else(|| RemoteError::TabNotFound {
            title: title.to_string(),
        })?;
        Ok(Records::from_grid(tab.cells.clone()))
    }

    fn write_values(
        &mut self,
        title: &str,
        start: CellRef,
        values: &[Vec<String>],
        input: ValueInput,
    ) -> Result<(), RemoteError> {
        self.check("write_values")?;
        let tab = self.tab_mut(title)?;
        put(&mut tab.cells, start, values);
        let used = tab.cells.len() as u32;
        if used > tab.handle.row_count {
            tab.handle.row_count = used;
        }
        self.mutations.push(Mutation::WriteValues {
            title: title.to_string(),
            start,
            values: values.to_vec(),
            input,
        });
        Ok(())
    }

    fn insert_rows(
        &mut self,
        title: &str,
        at: u32,
        values: &[Vec<String>],
    ) -> Result<(), RemoteError> {
        self.check("insert_rows")?;
        let tab = self.tab_mut(title)?;
        let at_index = at as usize;
        if tab.cells.len() < at_index {
            tab.cells.resize(at_index, Vec::new());
        }
        for (offset, row) in values.iter().enumerate() {
            tab.cells.insert(at_index + offset, row.clone());
        }
        tab.handle.row_count += values.len() as u32;
        self.mutations.push(Mutation::InsertRows {
            title: title.to_string(),
            at,
            values: values.to_vec(),
        });
        Ok(())
    }

    fn add_conditional_format(
        &mut self,
        tab: &TabHandle,
        range: GridRange,
        rule: &FormatRule,
    ) -> Result<(), RemoteError> {
        self.check("add_conditional_format")?;
        let target = self.tab_mut(&tab.title)?;
        target.rules.push((range, rule.clone()));
        self.mutations.push(Mutation::AddConditionalFormat {
            title: tab.title.clone(),
            range,
            rule: rule.clone(),
        });
        Ok(())
    }

    fn set_frozen_rows(&mut self, tab: &TabHandle, rows: u32) -> Result<(), RemoteError> {
        self.check("set_frozen_rows")?;
        let target = self.tab_mut(&tab.title)?;
        target.handle.frozen_rows = rows;
        self.mutations.push(Mutation::SetFrozenRows {
            title: tab.title.clone(),
            rows,
        });
        Ok(())
    }

    fn tab_url(&self, tab: &TabHandle) -> String {
        if self.with_fragments {
            format!("{}#gid={}", self.url, tab.sheet_id)
        } else {
            self.url.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn write_then_read_records() {
        let mut doc = MemoryDocument::new();
        doc.add_tab("t", 10, 5).expect("add");
        doc.write_values("t", CellRef::new(0, 0), &grid(&[&["h1", "h2"]]), ValueInput::Entered)
            .expect("header");
        doc.write_values("t", CellRef::new(2, 1), &grid(&[&["x"]]), ValueInput::Literal)
            .expect("cell");

        let records = doc.records("t").expect("records");
        assert_eq!(records.header, vec!["h1", "h2"]);
        assert_eq!(records.rows.len(), 2);
        assert_eq!(records.column_at(1).collect::<Vec<_>>(), vec!["", "x"]);
        assert_eq!(doc.mutations().len(), 3);
    }

    #[test]
    fn insert_rows_shifts_existing_rows_down() {
        let mut doc = MemoryDocument::new().with_tab("idx", grid(&[&["list"], &["old"]]));
        doc.insert_rows("idx", 1, &grid(&[&["new"]])).expect("insert");
        let tab = doc.tab_ref("idx").expect("tab");
        assert_eq!(tab.column(0), vec!["list", "new", "old"]);
    }

    #[test]
    fn frozen_rows_show_on_looked_up_handle() {
        let mut doc = MemoryDocument::new();
        let handle = doc.add_tab("t", 1, 1).expect("add");
        assert_eq!(handle.frozen_rows, 0);
        doc.set_frozen_rows(&handle, 1).expect("freeze");
        assert_eq!(doc.tab("t").expect("tab").frozen_rows, 1);
    }

    #[test]
    fn duplicate_tab_is_rejected() {
        let mut doc = MemoryDocument::new();
        doc.add_tab("t", 1, 1).expect("add");
        let err = doc.add_tab("t", 1, 1).unwrap_err();
        assert!(matches!(err, RemoteError::Status { status: 400, .. }));
    }

    #[test]
    fn injected_failure_surfaces_as_transport_error() {
        let doc = MemoryDocument::new().failing_on("tab_titles");
        let err = doc.tab_titles().unwrap_err();
        assert!(matches!(err, RemoteError::Transport { operation: "tab_titles", .. }));
    }

    #[test]
    fn tab_url_carries_gid_unless_disabled() {
        let mut doc = MemoryDocument::new();
        let handle = doc.add_tab("t", 1, 1).expect("add");
        assert!(doc.tab_url(&handle).ends_with("#gid=0"));
        let doc = doc.without_tab_fragments();
        assert!(!doc.tab_url(&handle).contains("#gid"));
    }
}
