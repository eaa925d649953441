//! Work diary core library: domain types, month computations, the remote
//! document contract, configuration and errors.
//!
//! - [`types`]: newtypes and domain values
//! - [`calendar`]: the month's date labels
//! - [`holidays`]: holiday selection for a month
//! - [`roster`]: member roster extraction
//! - [`document`]: [`SpreadsheetDocument`] and its addressing types
//! - [`config`]: YAML config load / save / init
//! - [`error`]: [`ConfigError`], [`DataShapeError`], [`RemoteError`]

pub mod calendar;
pub mod config;
pub mod document;
pub mod error;
pub mod holidays;
pub mod roster;
pub mod types;

pub use config::{Config, Credentials};
pub use document::{
    CellRef, FormatRule, GridRange, Records, SpreadsheetDocument, TabHandle, ValueInput,
};
pub use error::{ConfigError, DataShapeError, RemoteError};
pub use holidays::HolidaySet;
pub use types::{Color, DateLabel, MemberName, ReferenceDate, TabTitle};
