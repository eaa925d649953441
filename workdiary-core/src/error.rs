//! Error types for workdiary-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while locating, reading or writing configuration and
/// credentials files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying I/O failure (file not found, permission denied, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML serialization error (write/save path).
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// YAML parse error on load: includes file path and line context from serde_yaml.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// The credentials file could not be decoded.
    #[error("failed to parse credentials at {path}: {source}")]
    Credentials {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `dirs::home_dir()` returned `None`: cannot locate `~/.workdiary/`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    /// The config file did not exist at the expected path.
    #[error("config not found at {path}; run `workdiary init` first")]
    ConfigNotFound { path: PathBuf },

    /// `init` refused to replace an existing config.
    #[error("config already exists at {path}; pass --force to overwrite")]
    AlreadyExists { path: PathBuf },

    /// A field holds a value that cannot be used.
    #[error("invalid config field `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// A roster or holiday source did not have the shape the sync expects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataShapeError {
    /// An expected header is missing from a sheet.
    #[error("sheet '{sheet}' has no column '{column}'")]
    MissingColumn { sheet: String, column: String },

    /// A cell that should embed a `YYYY-MM-DD` date does not hold a valid one.
    #[error("sheet '{sheet}': '{value}' is not a valid date")]
    InvalidDate { sheet: String, value: String },
}

/// Failure talking to the spreadsheet backend.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The backend rejected our credentials or permissions (HTTP 401/403).
    #[error("{operation}: access denied (HTTP {status}): {message}")]
    Unauthorized {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// The backend answered with any other non-success status.
    #[error("{operation}: HTTP {status}: {message}")]
    Status {
        operation: &'static str,
        status: u16,
        message: String,
    },

    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("{operation}: transport error: {message}")]
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The response body did not decode into what we asked for.
    #[error("{operation}: unexpected response: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    /// A tab addressed by title does not exist in the document.
    #[error("tab '{title}' not found")]
    TabNotFound { title: String },
}
