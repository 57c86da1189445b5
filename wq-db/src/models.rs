//! Result structs returned by the loaders and queries.

use chrono::NaiveDate;
use serde::Serialize;

/// Outcome of loading a weather CSV.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct LoadSummary {
    /// Rows inserted or replaced.
    pub loaded: usize,
    /// Rows dropped because a field could not be parsed.
    pub skipped: usize,
}

/// First and last stored day for a city.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct DateRange {
    pub first: NaiveDate,
    pub last: NaiveDate,
}
