//! YAML configuration and credentials.
//!
//! # Storage layout
//!
//! ```text
//! ~/.workdiary/
//!   config.yaml        (mode 0600, written by `workdiary init`)
//! ```
//!
//! # API pattern
//!
//! Every function touching the default location has two forms:
//! - `fn_at(home: &Path, …)`: explicit home; used in tests with `TempDir`
//! - `fn(…)`: derives home from `dirs::home_dir()`, delegates to `_at`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::Color;

// ---------------------------------------------------------------------------
// 1. Types
// ---------------------------------------------------------------------------

/// Everything a run needs to know about the diary document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Browser URL of the spreadsheet.
    pub document_url: String,
    /// JSON file holding the bearer token.
    pub credentials_path: PathBuf,
    #[serde(default = "default_roster_sheet")]
    pub roster_sheet: String,
    /// Header of the roster column; the first column when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roster_column: Option<String>,
    #[serde(default = "default_holiday_sheet")]
    pub holiday_sheet: String,
    /// Year columns are headed `{holiday_column_prefix}_{year}`.
    #[serde(default = "default_holiday_column_prefix")]
    pub holiday_column_prefix: String,
    #[serde(default = "default_index_sheet")]
    pub index_sheet: String,
    /// Label written to A1 of every month tab.
    #[serde(default = "default_roster_header")]
    pub roster_header: String,
    #[serde(default)]
    pub highlight_color: Color,
    /// Spare rows below the roster when a month tab is created.
    #[serde(default = "default_slack_rows")]
    pub slack_rows: u32,
    /// Spare columns after the last date when a month tab is created.
    #[serde(default = "default_slack_columns")]
    pub slack_columns: u32,
}

fn default_roster_sheet() -> String {
    "組員名單".to_string()
}
fn default_holiday_sheet() -> String {
    "假日名單".to_string()
}
fn default_holiday_column_prefix() -> String {
    "假日名單".to_string()
}
fn default_index_sheet() -> String {
    "工作日誌列表".to_string()
}
fn default_roster_header() -> String {
    "組員".to_string()
}
fn default_slack_rows() -> u32 {
    100
}
fn default_slack_columns() -> u32 {
    10
}

impl Config {
    /// A config with every optional field at its default.
    pub fn new(document_url: impl Into<String>, credentials_path: impl Into<PathBuf>) -> Self {
        Self {
            document_url: document_url.into(),
            credentials_path: credentials_path.into(),
            roster_sheet: default_roster_sheet(),
            roster_column: None,
            holiday_sheet: default_holiday_sheet(),
            holiday_column_prefix: default_holiday_column_prefix(),
            index_sheet: default_index_sheet(),
            roster_header: default_roster_header(),
            highlight_color: Color::default(),
            slack_rows: default_slack_rows(),
            slack_columns: default_slack_columns(),
        }
    }

    /// Reject values no run could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.document_url.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "document_url",
                reason: "must not be empty".to_string(),
            });
        }
        if !self.highlight_color.is_valid() {
            return Err(ConfigError::Invalid {
                field: "highlight_color",
                reason: "channels must be between 0 and 1".to_string(),
            });
        }
        for (field, value) in [
            ("roster_sheet", &self.roster_sheet),
            ("holiday_sheet", &self.holiday_sheet),
            ("index_sheet", &self.index_sheet),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "sheet title must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Contents of the credentials file.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub access_token: String,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        serde_json::from_str(&contents).map_err(|e| ConfigError::Credentials {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

// ---------------------------------------------------------------------------
// 2. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.workdiary/config.yaml`: pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".workdiary").join("config.yaml")
}

/// `config_path_at` convenience wrapper.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_path_at(&home()?))
}

// ---------------------------------------------------------------------------
// 3. Load
// ---------------------------------------------------------------------------

/// Load and validate the config file at `path`.
///
/// Relative `credentials_path` values resolve against the config's directory.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    let mut config: Config = serde_yaml::from_str(&contents).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;
    if config.credentials_path.is_relative() {
        if let Some(dir) = path.parent() {
            config.credentials_path = dir.join(&config.credentials_path);
        }
    }
    config.validate()?;
    Ok(config)
}

/// Load `<home>/.workdiary/config.yaml`.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    load_from(&config_path_at(home))
}

/// Load the config at the default location.
pub fn load() -> Result<Config, ConfigError> {
    load_from(&config_path()?)
}

// ---------------------------------------------------------------------------
// 4. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically write `config` to `path`.
///
/// Write flow: serialize → `.yaml.tmp` sibling → `chmod 0600` → `rename`.
pub fn save_to(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let tmp_path = path.with_extension("yaml.tmp");
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// 5. Init
// ---------------------------------------------------------------------------

/// Validate `config` and write it to `path`.
///
/// Refuses to replace an existing file unless `force` is set.
pub fn init_to(path: &Path, config: &Config, force: bool) -> Result<PathBuf, ConfigError> {
    config.validate()?;
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    save_to(path, config)?;
    Ok(path.to_path_buf())
}

/// `init_to` for `<home>/.workdiary/config.yaml`.
pub fn init_at(home: &Path, config: &Config, force: bool) -> Result<PathBuf, ConfigError> {
    init_to(&config_path_at(home), config, force)
}

/// `init_to` for the default location.
pub fn init(config: &Config, force: bool) -> Result<PathBuf, ConfigError> {
    init_to(&config_path()?, config, force)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ConfigError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ConfigError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Config {
        Config::new(
            "https://docs.google.com/spreadsheets/d/abc123/edit",
            "/secrets/token.json",
        )
    }

    #[test]
    fn config_path_is_correct() {
        let home = TempDir::new().expect("tempdir");
        assert!(config_path_at(home.path()).ends_with(".workdiary/config.yaml"));
    }

    #[test]
    fn minimal_yaml_fills_defaults() {
        let yaml = "document_url: https://example.com/d/x\ncredentials_path: /tmp/token.json\n";
        let config: Config = serde_yaml::from_str(yaml).expect("parse");
        assert_eq!(config.index_sheet, "工作日誌列表");
        assert_eq!(config.highlight_color, Color::RED);
        assert_eq!(config.slack_columns, 10);
        assert_eq!(config.roster_column, None);
    }

    #[test]
    fn init_then_load_roundtrip() {
        let home = TempDir::new().expect("tempdir");
        init_at(home.path(), &sample(), false).expect("init");
        let loaded = load_at(home.path()).expect("load");
        assert_eq!(loaded, sample());
    }

    #[test]
    fn init_to_custom_path_refuses_overwrite_and_invalid_config() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("team").join("diary.yaml");
        assert_eq!(init_to(&path, &sample(), false).expect("init"), path);
        assert_eq!(load_from(&path).expect("load"), sample());

        let err = init_to(&path, &sample(), false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));

        let blank = Config::new(" ", "/t.json");
        let err = init_to(&dir.path().join("other.yaml"), &blank, false).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "document_url", .. }));
        assert!(!dir.path().join("other.yaml").exists());
    }

    #[test]
    fn init_refuses_overwrite_without_force() {
        let home = TempDir::new().expect("tempdir");
        init_at(home.path(), &sample(), false).expect("init");
        let err = init_at(home.path(), &sample(), false).unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists { .. }));
        init_at(home.path(), &sample(), true).expect("forced init");
    }

    #[test]
    fn save_cleans_up_tmp_and_sets_mode() {
        let home = TempDir::new().expect("tempdir");
        let path = init_at(home.path(), &sample(), false).expect("init");
        assert!(!path.with_extension("yaml.tmp").exists());
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
            assert_eq!(mode, 0o600);
        }
    }

    #[test]
    fn relative_credentials_resolve_against_config_dir() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "document_url: https://example.com/d/x\ncredentials_path: token.json\n",
        )
        .expect("write");
        let config = load_from(&path).expect("load");
        assert_eq!(config.credentials_path, dir.path().join("token.json"));
    }

    #[test]
    fn invalid_color_is_rejected() {
        let mut config = sample();
        config.highlight_color = Color {
            red: 2.0,
            green: 0.0,
            blue: 0.0,
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("highlight_color"));
    }

    #[test]
    fn credentials_load() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("token.json");
        std::fs::write(&path, r#"{"access_token":"ya29.test","expires_in":3599}"#).expect("write");
        assert_eq!(Credentials::load(&path).expect("load").access_token, "ya29.test");

        std::fs::write(&path, "not json").expect("write");
        let err = Credentials::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Credentials { .. }));
    }
}
