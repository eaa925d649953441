//! `workdiary plan`: show what `sync` would do.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use workdiary_core::TabTitle;
use workdiary_sync::{pipeline, MonthInputs, SyncPlan};

use super::{connect, ConfigArg, DateArg};

/// Arguments for `workdiary plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub date: DateArg,

    #[command(flatten)]
    pub config: ConfigArg,
}

impl PlanArgs {
    pub fn run(self) -> Result<()> {
        let reference = self.date.reference();
        let title = TabTitle::for_month(reference);
        let (config, client) = connect(&self.config)?;

        let (inputs, plan) = pipeline::preview(&client, &config, reference)
            .with_context(|| format!("cannot plan '{title}'"))?;
        print_plan(&inputs, &plan);
        Ok(())
    }
}

fn print_plan(inputs: &MonthInputs, plan: &SyncPlan) {
    println!("{}", plan.title.as_str().bold());

    match plan.create {
        Some(size) => println!(
            "  {} create tab ({} rows x {} columns)",
            "+".green(),
            size.rows,
            size.columns
        ),
        None => println!("  {} tab exists", "·".bright_black()),
    }

    if plan.members.is_empty() {
        println!("  {} no members to write", "·".bright_black());
    } else {
        println!(
            "  {} write {} member(s) from row {}",
            "+".green(),
            plan.members.len(),
            plan.start_row + 1
        );
        for member in &plan.members {
            println!("      {member}");
        }
    }

    if plan.first_population {
        if inputs.holidays.is_empty() {
            println!("  {} no holidays to highlight", "·".bright_black());
        } else {
            let days: Vec<String> = inputs.holidays.iter().map(ToString::to_string).collect();
            println!("  {} highlight {}", "+".green(), days.join(", "));
        }
        println!("  {} add index entry", "+".green());
        println!("  {} freeze header row", "+".green());
    }

    if plan.is_noop() {
        println!("✓ nothing to do");
    }
}
