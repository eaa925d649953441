//! Sync planning: decide what a run must create and which members to write.
//!
//! Planning is pure. It takes the month's inputs and what the document
//! currently holds, and returns a [`SyncPlan`] that
//! [`TabSynchronizer`](crate::TabSynchronizer) applies, or that `workdiary plan`
//! prints without applying.

use std::collections::HashSet;

use workdiary_core::{
    DateLabel, HolidaySet, MemberName, ReferenceDate, Records, TabHandle, TabTitle,
};

/// Everything derived from the roster, holiday and calendar sources for one month.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthInputs {
    pub reference: ReferenceDate,
    pub title: TabTitle,
    pub dates: Vec<DateLabel>,
    pub holidays: HolidaySet,
    pub roster: Vec<MemberName>,
}

/// What the document holds for the month tab right now.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabState {
    /// No tab with the month title exists.
    Absent,
    /// The tab exists; `rows` are its data rows below the header.
    ///
    /// `registered` is set once a run has finished the tab's first population
    /// (highlight, index entry, frozen header), even if no member was written.
    Present {
        existing: Vec<MemberName>,
        rows: u32,
        registered: bool,
    },
}

impl TabState {
    /// Classify a tab from its handle and records. Members are read from column A;
    /// a frozen header marks a registered tab.
    pub fn from_tab(handle: &TabHandle, records: &Records) -> Self {
        let existing = records
            .column_at(0)
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(MemberName::from)
            .collect();
        TabState::Present {
            existing,
            rows: records.rows.len() as u32,
            registered: handle.frozen_rows > 0,
        }
    }
}

/// Grid size of a tab to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabSize {
    pub rows: u32,
    pub columns: u32,
}

/// Spare room left on a new tab for manual edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slack {
    pub rows: u32,
    pub columns: u32,
}

/// The decided sequence of writes for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    pub title: TabTitle,
    /// `Some` when the tab must be created (header row included).
    pub create: Option<TabSize>,
    /// The tab has no members yet: highlight, index and freeze follow the roster write.
    pub first_population: bool,
    /// Members to write, in roster order, each once.
    pub members: Vec<MemberName>,
    /// Zero-based row receiving the first member.
    pub start_row: u32,
}

impl SyncPlan {
    /// True when the run changes nothing in the document.
    pub fn is_noop(&self) -> bool {
        self.create.is_none() && !self.first_population && self.members.is_empty()
    }
}

/// The header row of a month tab: the roster label, then every date.
pub fn header_row(roster_header: &str, dates: &[DateLabel]) -> Vec<String> {
    std::iter::once(roster_header.to_string())
        .chain(dates.iter().map(ToString::to_string))
        .collect()
}

/// Roster order with repeats removed; the first occurrence wins.
pub fn dedup_roster(roster: &[MemberName]) -> Vec<MemberName> {
    let mut seen = HashSet::new();
    roster
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}

/// Members of `authoritative` absent from `existing`, in authoritative order, each once.
pub fn missing_members(authoritative: &[MemberName], existing: &[MemberName]) -> Vec<MemberName> {
    let present: HashSet<&str> = existing.iter().map(MemberName::as_str).collect();
    dedup_roster(authoritative)
        .into_iter()
        .filter(|name| !present.contains(name.as_str()))
        .collect()
}

/// Grid of a new month tab: header plus roster plus slack rows, label column
/// plus dates plus slack columns.
pub fn new_tab_size(inputs: &MonthInputs, slack: Slack) -> TabSize {
    TabSize {
        rows: 1 + dedup_roster(&inputs.roster).len() as u32 + slack.rows,
        columns: 1 + inputs.dates.len() as u32 + slack.columns,
    }
}

/// Decide the run for `inputs` against the observed `state`.
pub fn plan(inputs: &MonthInputs, state: &TabState, slack: Slack) -> SyncPlan {
    let roster = dedup_roster(&inputs.roster);
    match state {
        TabState::Absent => SyncPlan {
            title: inputs.title.clone(),
            create: Some(new_tab_size(inputs, slack)),
            first_population: true,
            members: roster,
            start_row: 1,
        },
        TabState::Present {
            existing,
            registered: false,
            ..
        } if existing.is_empty() => SyncPlan {
            title: inputs.title.clone(),
            create: None,
            first_population: true,
            members: roster,
            start_row: 1,
        },
        TabState::Present { existing, rows, .. } => SyncPlan {
            title: inputs.title.clone(),
            create: None,
            first_population: false,
            members: missing_members(&roster, existing),
            start_row: 1 + rows,
        },
    }
}
