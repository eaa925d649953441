//! Month tab synchronization.
//!
//! ## Run protocol
//!
//! 1. Derive the month tab title from the reference date.
//! 2. List tabs; create the month tab with its header row when absent.
//! 3. Read the member column of the tab.
//! 4. Empty and not yet registered: write the whole roster, then highlight
//!    holidays, prepend an index entry and freeze the header row.
//! 5. Otherwise: append only the members the tab does not list yet.
//!
//! The frozen header row is written last and marks the tab as registered, so
//! an empty roster does not cause the registration steps to repeat. Re-running
//! with unchanged inputs performs reads only.
//!
//! The existence and emptiness checks are not atomic with respect to the
//! document: two concurrent runs can both create the tab or both populate it.
//! Runs are expected to have a single writer.

use workdiary_core::{
    CellRef, Config, MemberName, SpreadsheetDocument, TabHandle, TabTitle, ValueInput,
};

use crate::error::SyncError;
use crate::highlight;
use crate::index;
use crate::plan::{self, MonthInputs, Slack, SyncPlan, TabState};

/// Rows kept visible at the top of a month tab.
const FROZEN_ROWS: u32 = 1;

/// What a sync run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub title: TabTitle,
    pub tab_created: bool,
    pub first_population: bool,
    /// Members written this run, in row order.
    pub written: Vec<MemberName>,
    /// Holidays covered by the highlight rule; `None` when no rule was added.
    pub highlighted: Option<usize>,
    /// Index formula inserted this run.
    pub index_entry: Option<String>,
}

impl SyncReport {
    pub fn is_noop(&self) -> bool {
        !self.tab_created && self.written.is_empty() && self.index_entry.is_none()
    }
}

/// Keeps the month tab of a work diary document consistent with the roster.
#[derive(Debug, Clone)]
pub struct TabSynchronizer {
    config: Config,
}

impl TabSynchronizer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn slack(&self) -> Slack {
        Slack {
            rows: self.config.slack_rows,
            columns: self.config.slack_columns,
        }
    }

    /// Observe the document and decide the run, without writing anything.
    pub fn plan<D: SpreadsheetDocument + ?Sized>(
        &self,
        doc: &D,
        inputs: &MonthInputs,
    ) -> Result<SyncPlan, SyncError> {
        let state = observe(doc, &inputs.title)?;
        Ok(plan::plan(inputs, &state, self.slack()))
    }

    /// Bring the month tab in line with `inputs`.
    pub fn sync<D: SpreadsheetDocument + ?Sized>(
        &self,
        doc: &mut D,
        inputs: &MonthInputs,
    ) -> Result<SyncReport, SyncError> {
        let title = inputs.title.as_str();
        let titles = doc.tab_titles()?;

        let exists = titles.iter().any(|t| t == title);
        let (handle, state) = if exists {
            tracing::info!("tab '{title}' exists");
            observe_existing(&*doc, &inputs.title)?
        } else {
            let size = plan::new_tab_size(inputs, self.slack());
            let handle = doc.add_tab(title, size.rows, size.columns)?;
            let header = plan::header_row(&self.config.roster_header, &inputs.dates);
            doc.write_values(title, CellRef::new(0, 0), &[header], ValueInput::Entered)?;
            tracing::info!(
                "created tab '{title}' ({} rows x {} columns)",
                size.rows,
                size.columns
            );
            // A freshly created tab holds only its header.
            let state = TabState::Present {
                existing: Vec::new(),
                rows: 0,
                registered: false,
            };
            (handle, state)
        };

        let decided = plan::plan(inputs, &state, self.slack());
        let mut report = SyncReport {
            title: inputs.title.clone(),
            tab_created: !exists,
            first_population: decided.first_population,
            written: Vec::new(),
            highlighted: None,
            index_entry: None,
        };

        if !decided.members.is_empty() {
            let rows: Vec<Vec<String>> = decided
                .members
                .iter()
                .map(|m| vec![m.to_string()])
                .collect();
            // Names are stored verbatim so they read back unchanged.
            doc.write_values(
                title,
                CellRef::new(decided.start_row, 0),
                &rows,
                ValueInput::Literal,
            )?;
            tracing::info!(
                "wrote {} member(s) to '{title}' from row {}",
                rows.len(),
                decided.start_row + 1
            );
            report.written = decided.members.clone();
        } else {
            tracing::debug!("no members to write to '{title}'");
        }

        if !decided.first_population {
            return Ok(report);
        }

        // The roster write may have grown an existing tab; a new tab fits it already.
        let handle = if exists { doc.tab(title)? } else { handle };
        report.highlighted = self.highlight(doc, &handle, inputs)?;
        report.index_entry = Some(self.register(doc, &handle, &inputs.title)?);
        doc.set_frozen_rows(&handle, FROZEN_ROWS)?;

        Ok(report)
    }

    fn highlight<D: SpreadsheetDocument + ?Sized>(
        &self,
        doc: &mut D,
        handle: &TabHandle,
        inputs: &MonthInputs,
    ) -> Result<Option<usize>, SyncError> {
        let Some(rule) = highlight::holiday_rule(&inputs.holidays, self.config.highlight_color)
        else {
            tracing::info!("no holidays in {}; highlight skipped", handle.title);
            return Ok(None);
        };
        let range = highlight::highlight_range(handle, inputs.dates.len());
        if range.is_empty() {
            tracing::info!("{} has no rows to highlight; skipped", handle.title);
            return Ok(None);
        }
        doc.add_conditional_format(handle, range, &rule)?;
        tracing::info!(
            "highlighted {} holiday(s) over {}!{}",
            inputs.holidays.len(),
            handle.title,
            range.to_a1()
        );
        Ok(Some(inputs.holidays.len()))
    }

    fn register<D: SpreadsheetDocument + ?Sized>(
        &self,
        doc: &mut D,
        handle: &TabHandle,
        title: &TabTitle,
    ) -> Result<String, SyncError> {
        let url = doc.tab_url(handle);
        let reference = index::tab_reference(&url)?;
        let formula = index::hyperlink_formula(&reference, title);
        doc.insert_rows(&self.config.index_sheet, 1, &[vec![formula.clone()]])?;
        tracing::info!("added '{title}' to index '{}'", self.config.index_sheet);
        Ok(formula)
    }
}

/// Current state of the month tab, `Absent` when it does not exist.
pub fn observe<D: SpreadsheetDocument + ?Sized>(
    doc: &D,
    title: &TabTitle,
) -> Result<TabState, SyncError> {
    let titles = doc.tab_titles()?;
    if !titles.iter().any(|t| t == title.as_str()) {
        return Ok(TabState::Absent);
    }
    Ok(observe_existing(doc, title)?.1)
}

fn observe_existing<D: SpreadsheetDocument + ?Sized>(
    doc: &D,
    title: &TabTitle,
) -> Result<(TabHandle, TabState), SyncError> {
    let handle = doc.tab(title.as_str())?;
    let records = doc.records(title.as_str())?;
    let state = TabState::from_tab(&handle, &records);
    Ok((handle, state))
}
