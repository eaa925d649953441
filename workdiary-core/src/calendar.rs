//! Month date ranges.

use chrono::{Datelike, NaiveDate};

use crate::types::{DateLabel, ReferenceDate};

/// Every day of `reference`'s month, from the 1st through the last day, ascending.
pub fn month_dates(reference: ReferenceDate) -> Vec<DateLabel> {
    let first = first_of_month(reference);
    first
        .iter_days()
        .take(days_in_month(reference) as usize)
        .map(DateLabel::from)
        .collect()
}

/// Number of days in `reference`'s month.
pub fn days_in_month(reference: ReferenceDate) -> u32 {
    let first = first_of_month(reference);
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .unwrap_or(NaiveDate::MAX);
    next.signed_duration_since(first).num_days() as u32
}

fn first_of_month(reference: ReferenceDate) -> NaiveDate {
    // Day 1 exists in every month.
    reference.with_day(1).unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[rstest]
    #[case(ymd(2024, 2, 15), 29)]
    #[case(ymd(2023, 2, 1), 28)]
    #[case(ymd(1900, 2, 10), 28)]
    #[case(ymd(2000, 2, 29), 29)]
    #[case(ymd(2024, 4, 30), 30)]
    #[case(ymd(2024, 12, 31), 31)]
    #[case(ymd(2025, 1, 1), 31)]
    fn month_length(#[case] reference: NaiveDate, #[case] expected: usize) {
        let dates = month_dates(reference);
        assert_eq!(dates.len(), expected);
        assert_eq!(days_in_month(reference) as usize, expected);
    }

    #[test]
    fn leap_february_labels() {
        let dates = month_dates(ymd(2024, 2, 15));
        assert_eq!(dates.first().map(ToString::to_string).as_deref(), Some("2024-02-01"));
        assert_eq!(dates.last().map(ToString::to_string).as_deref(), Some("2024-02-29"));
    }

    #[test]
    fn dates_are_contiguous_and_ascending() {
        let dates = month_dates(ymd(2024, 7, 4));
        for pair in dates.windows(2) {
            assert_eq!(pair[0].date().succ_opt(), Some(pair[1].date()));
        }
        assert!(dates.iter().all(|d| d.date().month() == 7));
    }
}
