//! Shared utility functions for weather quilt crates.

/// Date utility functions
pub mod dates {
    use chrono::{Datelike, NaiveDate};

    /// ISO calendar date format used by fixtures and the ACIS API: "YYYY-MM-DD"
    pub const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(ISO_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)?)
    }

    /// Format a date the way US locales print short dates: "3/4/2024".
    pub fn format_short_date(date: &NaiveDate) -> String {
        format!("{}/{}/{}", date.month(), date.day(), date.year())
    }

    /// Format a date with weekday and month names: "Monday, March 4, 2024".
    pub fn format_long_date(date: &NaiveDate) -> String {
        date.format("%A, %B %-d, %Y").to_string()
    }

    /// Month name and year: "March 2024".
    pub fn format_month_year(date: &NaiveDate) -> String {
        date.format("%B %Y").to_string()
    }

    /// First and last day (inclusive) of a calendar month.
    ///
    /// Returns `None` when the month is outside 1..=12 or the year is out of
    /// chrono's range.
    pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let next = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)?
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)?
        };
        Some((first, next.pred_opt()?))
    }

    /// January 1 and December 31 of a calendar year.
    pub fn year_bounds(year: i32) -> Option<(NaiveDate, NaiveDate)> {
        Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        ))
    }

}

/// Number formatting for tooltips and detail rows.
pub mod numbers {
    /// Placeholder printed for an absent measurement.
    pub const NOT_AVAILABLE: &str = "N/A";

    /// Round to one decimal place, ties away from zero.
    pub fn round_to_tenth(value: f64) -> f64 {
        (value * 10.0).round() / 10.0
    }

    /// Shortest display form of a measurement ("70", "0.25"), or "N/A".
    pub fn format_value(value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{}", v),
            None => NOT_AVAILABLE.to_string(),
        }
    }

    /// One-decimal display form ("70.0"), or "N/A".
    pub fn format_tenths(value: Option<f64>) -> String {
        match value {
            Some(v) => format!("{:.1}", round_to_tenth(v)),
            None => NOT_AVAILABLE.to_string(),
        }
    }

}
