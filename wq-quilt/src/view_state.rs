//! View parameters chosen by the presentation layer: city, time window and
//! display mode.

use crate::error::{QuiltError, Result};
use crate::quilt::{DisplayMode, ViewMode};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use wq_utils::dates::{format_month_year, month_bounds, year_bounds};

/// City shown before the user picks one.
pub const DEFAULT_CITY: &str = "Anchorage, AK";

/// The current view. The selected date is always the first of a month; in
/// year view only its year matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    view_mode: ViewMode,
    display_mode: DisplayMode,
    selected_date: NaiveDate,
    selected_city: String,
}

impl ViewState {
    /// Month view of the month containing `today`, for [`DEFAULT_CITY`].
    pub fn new(today: NaiveDate) -> Self {
        Self {
            view_mode: ViewMode::Month,
            display_mode: DisplayMode::Temperature,
            selected_date: first_of_month(today),
            selected_city: DEFAULT_CITY.to_string(),
        }
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn selected_city(&self) -> &str {
        &self.selected_city
    }

    /// Switching modes keeps the selected date.
    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.view_mode = view_mode;
    }

    pub fn set_display_mode(&mut self, display_mode: DisplayMode) {
        self.display_mode = display_mode;
    }

    pub fn set_city(&mut self, city: impl Into<String>) {
        self.selected_city = city.into();
    }

    pub fn set_selected_date(&mut self, date: NaiveDate) {
        self.selected_date = first_of_month(date);
    }

    /// Apply the date picker value: `YYYY-MM` in month view, `YYYY` in year
    /// view (which selects January 1).
    pub fn set_date_input(&mut self, input: &str) -> Result<()> {
        let input = input.trim();
        let date = match self.view_mode {
            ViewMode::Month => {
                let (year, month) = input
                    .split_once('-')
                    .ok_or_else(|| bad_input(input, "expected YYYY-MM"))?;
                let year: i32 = year.parse().map_err(|_| bad_input(input, "bad year"))?;
                let month: u32 = month.parse().map_err(|_| bad_input(input, "bad month"))?;
                NaiveDate::from_ymd_opt(year, month, 1)
                    .ok_or_else(|| bad_input(input, "month must be between 1 and 12"))?
            }
            ViewMode::Year => {
                let year: i32 = input.parse().map_err(|_| bad_input(input, "expected YYYY"))?;
                NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| bad_input(input, "year out of range"))?
            }
        };
        self.selected_date = date;
        Ok(())
    }

    /// Date picker value for the current mode: `2024-03` or `2024`.
    pub fn date_input_value(&self) -> String {
        match self.view_mode {
            ViewMode::Month => format!("{}-{:02}", self.selected_date.year(), self.selected_date.month()),
            ViewMode::Year => self.selected_date.year().to_string(),
        }
    }

    /// First and last day (inclusive) of the selected month or year.
    pub fn date_window(&self) -> Result<(NaiveDate, NaiveDate)> {
        let year = self.selected_date.year();
        let window = match self.view_mode {
            ViewMode::Month => month_bounds(year, self.selected_date.month()),
            ViewMode::Year => year_bounds(year),
        };
        window.ok_or_else(|| {
            QuiltError::InvalidViewInput(format!("no calendar window for {}", self.selected_date))
        })
    }

    /// Caption above the quilts: "Showing 31 days for March 2024".
    pub fn summary(&self, day_count: usize) -> String {
        let period = match self.view_mode {
            ViewMode::Month => format_month_year(&self.selected_date),
            ViewMode::Year => self.selected_date.year().to_string(),
        };
        format!("Showing {} days for {}", day_count, period)
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

fn bad_input(input: &str, reason: &str) -> QuiltError {
    QuiltError::InvalidViewInput(format!("'{}': {}", input, reason))
}
