//! `workdiary dates`: print the month's tab title and date columns.

use anyhow::Result;
use chrono::Datelike;
use clap::Args;
use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use workdiary_core::{calendar, document::column_letters, TabTitle};

use super::DateArg;

/// Arguments for `workdiary dates`.
#[derive(Args, Debug)]
pub struct DatesArgs {
    #[command(flatten)]
    pub date: DateArg,
}

#[derive(Tabled)]
struct DateRow {
    #[tabled(rename = "column")]
    column: String,
    #[tabled(rename = "date")]
    date: String,
    #[tabled(rename = "weekday")]
    weekday: String,
}

impl DatesArgs {
    pub fn run(self) -> Result<()> {
        let reference = self.date.reference();
        let dates = calendar::month_dates(reference);

        println!(
            "{} ({} days)",
            TabTitle::for_month(reference).as_str().bold(),
            dates.len()
        );

        // Column A holds member names; dates start at B.
        let rows: Vec<DateRow> = dates
            .iter()
            .enumerate()
            .map(|(i, label)| DateRow {
                column: column_letters(i as u32 + 1),
                date: label.to_string(),
                weekday: label.date().weekday().to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
