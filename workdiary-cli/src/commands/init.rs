//! `workdiary init --document-url <url> --credentials <path> [--force]`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use workdiary_core::Config;

use super::ConfigArg;

/// Write a config file for a diary document.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Browser URL of the diary spreadsheet.
    #[arg(long, value_name = "URL")]
    pub document_url: String,

    /// JSON file holding an `access_token`.
    #[arg(long, value_name = "PATH")]
    pub credentials: PathBuf,

    /// Replace an existing config file.
    #[arg(long)]
    pub force: bool,

    #[command(flatten)]
    pub config: ConfigArg,
}

impl InitArgs {
    pub fn run(self) -> Result<()> {
        // Stored paths resolve against the config directory, so pin relative ones now.
        let credentials = if self.credentials.is_relative() {
            std::env::current_dir()
                .context("could not determine current directory")?
                .join(&self.credentials)
        } else {
            self.credentials
        };
        let new_config = Config::new(self.document_url, credentials);
        let path = self.config.init(&new_config, self.force)?;

        println!("✓ Wrote config to {}", path.display());
        println!(
            "  Sheets: roster '{}', holidays '{}', index '{}'",
            new_config.roster_sheet, new_config.holiday_sheet, new_config.index_sheet
        );
        Ok(())
    }
}
