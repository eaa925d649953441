//! Domain types for the work diary document.

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// The date a run treats as "now". It selects the target month.
pub type ReferenceDate = NaiveDate;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A member name as it appears in the roster column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MemberName(pub String);

impl MemberName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for MemberName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for MemberName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A calendar day rendered as `YYYY-MM-DD`. Orders by calendar order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateLabel(pub NaiveDate);

impl DateLabel {
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `YYYY-MM` prefix of the label.
    pub fn year_month(&self) -> String {
        self.0.format("%Y-%m").to_string()
    }
}

impl fmt::Display for DateLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl From<NaiveDate> for DateLabel {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

/// Title of a month tab, e.g. `2024年02月`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TabTitle(pub String);

impl TabTitle {
    /// Derive the month tab title for the month containing `date`.
    pub fn for_month(date: ReferenceDate) -> Self {
        Self(format!("{}年{:02}月", date.year(), date.month()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TabTitle {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Formatting values
// ---------------------------------------------------------------------------

/// An RGB color with channels in `0.0..=1.0`, as the Sheets API expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Color {
    pub const RED: Color = Color {
        red: 1.0,
        green: 0.0,
        blue: 0.0,
    };

    pub fn is_valid(&self) -> bool {
        [self.red, self.green, self.blue]
            .iter()
            .all(|c| (0.0..=1.0).contains(c))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn tab_title_pads_month() {
        assert_eq!(TabTitle::for_month(ymd(2024, 2, 15)).as_str(), "2024年02月");
        assert_eq!(TabTitle::for_month(ymd(2023, 11, 1)).as_str(), "2023年11月");
    }

    #[test]
    fn date_label_display_and_order() {
        let a = DateLabel::from(ymd(2024, 1, 31));
        let b = DateLabel::from(ymd(2024, 2, 1));
        assert_eq!(a.to_string(), "2024-01-31");
        assert_eq!(b.year_month(), "2024-02");
        assert!(a < b);
    }

    #[test]
    fn member_name_display() {
        assert_eq!(MemberName::from("Alice").to_string(), "Alice");
        assert_eq!(MemberName::from(String::from("Bob")).as_str(), "Bob");
    }

    #[test]
    fn color_default_is_red_and_valid() {
        assert_eq!(Color::default(), Color::RED);
        assert!(Color::RED.is_valid());
        assert!(!Color {
            red: 1.5,
            green: 0.0,
            blue: 0.0
        }
        .is_valid());
    }
}
