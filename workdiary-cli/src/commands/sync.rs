//! `workdiary sync`: bring the month tab in line with the roster.

use anyhow::{Context, Result};
use clap::Args;

use workdiary_core::TabTitle;
use workdiary_sync::{pipeline, SyncReport};

use super::{connect, ConfigArg, DateArg};

/// Arguments for `workdiary sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub date: DateArg,

    #[command(flatten)]
    pub config: ConfigArg,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let reference = self.date.reference();
        let title = TabTitle::for_month(reference);
        let (config, mut client) = connect(&self.config)?;

        let report = pipeline::run(&mut client, &config, reference)
            .with_context(|| format!("sync failed for '{title}'"))?;
        print_report(&report);
        Ok(())
    }
}

fn print_report(report: &SyncReport) {
    if report.is_noop() {
        println!("✓ '{}' already up to date", report.title);
        return;
    }

    let mut parts = Vec::new();
    if report.tab_created {
        parts.push("tab created".to_string());
    }
    parts.push(format!("{} member(s) written", report.written.len()));
    if report.first_population {
        match report.highlighted {
            Some(n) => parts.push(format!("{n} holiday(s) highlighted")),
            None => parts.push("no holidays".to_string()),
        }
    }
    if report.index_entry.is_some() {
        parts.push("index entry added".to_string());
    }
    println!("✓ synced '{}' ({})", report.title, parts.join(", "));

    for member in &report.written {
        println!("  +  {member}");
    }
}
