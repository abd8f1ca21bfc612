//! Date windows for the trailing twelve month queries

use chrono::{Days, NaiveDate};

use crate::types::DateString;

/// Format of every stored and requested date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Length of the "last 12 months" window
pub const TRAILING_DAYS: u64 = 365;

/// Last observation day of the Hawaii dataset.
///
/// The trailing queries are anchored here, not at the newest date in the
/// store, so their output stays the same for any dataset.
pub fn anchor_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 8, 23).expect("anchor date is a valid calendar date")
}

/// Trailing window ending at an anchor date
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrailingWindow {
    anchor: NaiveDate,
    days: u64,
}

impl TrailingWindow {
    pub fn new(anchor: NaiveDate, days: u64) -> Self {
        Self { anchor, days }
    }

    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// First day included in the window (`anchor - days`)
    pub fn start(&self) -> NaiveDate {
        self.anchor - Days::new(self.days)
    }

    /// `start()` rendered for lexical comparison against stored dates
    pub fn start_key(&self) -> DateString {
        format_date(self.start())
    }
}

impl Default for TrailingWindow {
    fn default() -> Self {
        Self::new(anchor_date(), TRAILING_DAYS)
    }
}

pub fn format_date(date: NaiveDate) -> DateString {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_start() {
        let window = TrailingWindow::default();
        assert_eq!(window.anchor(), anchor_date());
        assert_eq!(window.start_key(), "2016-08-23");
    }

    #[test]
    fn test_window_across_leap_day() {
        let anchor = NaiveDate::from_ymd_opt(2016, 3, 1).unwrap();
        let window = TrailingWindow::new(anchor, TRAILING_DAYS);
        assert_eq!(window.start_key(), "2015-03-02");
    }

    #[test]
    fn test_format_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2010, 1, 5).unwrap();
        assert_eq!(format_date(date), "2010-01-05");
    }
}
