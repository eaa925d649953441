pub mod dates;
pub mod init;
pub mod plan;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use workdiary_core::{config, Config, ReferenceDate};
use workdiary_sheets::SheetsClient;

/// Reference date selection shared by every month command.
#[derive(Args, Debug, Clone)]
pub struct DateArg {
    /// Any day of the target month (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<ReferenceDate>,
}

impl DateArg {
    pub fn reference(&self) -> ReferenceDate {
        self.date
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

/// Config file selection shared by commands that reach the document.
#[derive(Args, Debug, Clone)]
pub struct ConfigArg {
    /// Config file to use instead of ~/.workdiary/config.yaml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl ConfigArg {
    pub fn load(&self) -> Result<Config> {
        match &self.config {
            Some(path) => config::load_from(path)
                .with_context(|| format!("failed to load config '{}'", path.display())),
            None => config::load().context("failed to load config"),
        }
    }

    /// Write `new_config` to the selected location.
    pub fn init(&self, new_config: &Config, force: bool) -> Result<PathBuf> {
        let written = match &self.config {
            Some(path) => config::init_to(path, new_config, force),
            None => config::init(new_config, force),
        };
        written.context("failed to write config")
    }
}

/// Config plus a client for its document.
pub fn connect(config_arg: &ConfigArg) -> Result<(Config, SheetsClient)> {
    let config = config_arg.load()?;
    let client = SheetsClient::from_config(&config).with_context(|| {
        format!(
            "cannot open document with credentials '{}'",
            config.credentials_path.display()
        )
    })?;
    Ok((config, client))
}
