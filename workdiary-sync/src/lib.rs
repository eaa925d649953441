//! # workdiary-sync
//!
//! Idempotent month tab synchronization.
//!
//! Call [`pipeline::run`] to bring the current month's tab in line with the
//! roster, or [`pipeline::preview`] to see what a run would do.

pub mod error;
pub mod highlight;
pub mod index;
#[cfg(any(test, feature = "memory"))]
pub mod memory;
pub mod pipeline;
pub mod plan;
pub mod synchronizer;

pub use error::{ReferenceError, SyncError};
pub use plan::{MonthInputs, SyncPlan, TabState};
pub use synchronizer::{SyncReport, TabSynchronizer};
