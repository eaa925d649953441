//! Error types for workdiary-sync.

use thiserror::Error;

use workdiary_core::{DataShapeError, RemoteError};

/// All errors that can abort a sync run.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The spreadsheet backend failed or refused a request.
    #[error("remote access error: {0}")]
    Remote(#[from] RemoteError),

    /// The roster or holiday sheet is not shaped as expected.
    #[error("data shape error: {0}")]
    DataShape(#[from] DataShapeError),

    /// The new tab's reference could not be read from its URL.
    #[error("reference resolution error: {0}")]
    Reference(#[from] ReferenceError),
}

/// The tab URL carries no `#gid=<digits>` fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no #gid=<id> fragment in tab URL {url}")]
pub struct ReferenceError {
    pub url: String,
}
