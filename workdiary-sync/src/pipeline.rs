//! Shared run entrypoints used by the CLI.

use workdiary_core::{
    calendar, holidays, roster, Config, ReferenceDate, SpreadsheetDocument, TabTitle,
};

use crate::plan::{MonthInputs, SyncPlan};
use crate::synchronizer::{SyncReport, TabSynchronizer};
use crate::SyncError;

/// Read the roster and holiday sheets and compute the month's dates.
pub fn gather<D: SpreadsheetDocument + ?Sized>(
    doc: &D,
    config: &Config,
    reference: ReferenceDate,
) -> Result<MonthInputs, SyncError> {
    let roster_records = doc.records(&config.roster_sheet)?;
    let roster = roster::extract(
        &roster_records,
        &config.roster_sheet,
        config.roster_column.as_deref(),
    )?;
    tracing::debug!("roster '{}': {} member(s)", config.roster_sheet, roster.len());

    let holiday_records = doc.records(&config.holiday_sheet)?;
    let holidays = holidays::filter(
        &holiday_records,
        &config.holiday_sheet,
        &config.holiday_column_prefix,
        reference,
    )?;
    tracing::debug!("{} holiday(s) in {}", holidays.len(), reference.format("%Y-%m"));

    Ok(MonthInputs {
        reference,
        title: TabTitle::for_month(reference),
        dates: calendar::month_dates(reference),
        holidays,
        roster,
    })
}

/// Run a full sync of the month containing `reference`.
pub fn run<D: SpreadsheetDocument + ?Sized>(
    doc: &mut D,
    config: &Config,
    reference: ReferenceDate,
) -> Result<SyncReport, SyncError> {
    let inputs = gather(&*doc, config, reference)?;
    TabSynchronizer::new(config.clone()).sync(doc, &inputs)
}

/// Decide what [`run`] would do, without writing.
pub fn preview<D: SpreadsheetDocument + ?Sized>(
    doc: &D,
    config: &Config,
    reference: ReferenceDate,
) -> Result<(MonthInputs, SyncPlan), SyncError> {
    let inputs = gather(doc, config, reference)?;
    let plan = TabSynchronizer::new(config.clone()).plan(doc, &inputs)?;
    Ok((inputs, plan))
}
