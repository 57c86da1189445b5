//! The "currently inspected day" shown in the detail view.

use crate::day_record::DayRecord;
use crate::error::Result;
use crate::scales::PrecipitationLevel;
use chrono::NaiveDate;
use serde::Serialize;
use wq_utils::dates::format_long_date;
use wq_utils::numbers::{round_to_tenth, NOT_AVAILABLE};

/// Formatted fields of one day for the detail view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailView {
    pub date: NaiveDate,
    /// "Monday, March 4, 2024"
    pub date_label: String,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    /// Average temperature rounded to one decimal place.
    pub avg_temp: Option<f64>,
    pub precipitation: PrecipitationLevel,
}

impl DetailView {
    pub fn from_day(day: &DayRecord) -> Result<Self> {
        day.validate()?;
        Ok(Self {
            date: day.date,
            date_label: format_long_date(&day.date),
            min_temp: day.min_temp,
            max_temp: day.max_temp,
            avg_temp: day.average_temperature().map(round_to_tenth),
            precipitation: PrecipitationLevel::of(day)?,
        })
    }

    /// Labeled rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let or_missing = |value: Option<String>| value.unwrap_or_else(|| NOT_AVAILABLE.to_string());
        let degrees = |value: Option<f64>| or_missing(value.map(|v| format!("{}°F", v)));
        let average = or_missing(self.avg_temp.map(|v| format!("{:.1}°F", v)));
        let precipitation = or_missing(self.precipitation.inches().map(|p| format!("{}\"", p)));
        vec![
            ("Date", self.date_label.clone()),
            ("Average Temperature", average),
            ("High Temperature", degrees(self.max_temp)),
            ("Low Temperature", degrees(self.min_temp)),
            ("Precipitation", precipitation),
        ]
    }
}

/// Idle, or inspecting exactly one day.
///
/// Selecting while already inspecting replaces the current day; nothing is
/// stacked. The state only changes through [`select`](Self::select) and
/// [`close`](Self::close).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SelectionState {
    #[default]
    Idle,
    Inspecting(DetailView),
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect `day`. An invalid record leaves the current state untouched.
    pub fn select(&mut self, day: &DayRecord) -> Result<()> {
        let detail = DetailView::from_day(day)?;
        *self = SelectionState::Inspecting(detail);
        Ok(())
    }

    /// Dismiss the detail view. Closing while idle does nothing.
    pub fn close(&mut self) {
        *self = SelectionState::Idle;
    }

    pub fn detail(&self) -> Option<&DetailView> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Inspecting(detail) => Some(detail),
        }
    }

    pub fn is_inspecting(&self) -> bool {
        matches!(self, SelectionState::Inspecting(_))
    }
}
