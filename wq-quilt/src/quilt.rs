//! Quilt grid: one patch descriptor per day record.
//!
//! Every patch carries both the temperature and the precipitation color; the
//! display mode only decides which one fills the cell (or both, split
//! diagonally) and how the tooltip is worded.

use crate::color::Rgb;
use crate::day_record::DayRecord;
use crate::error::{QuiltError, Result};
use crate::scales::{PrecipitationLevel, QuiltScales};
use chrono::{Datelike, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use wq_utils::dates::format_short_date;
use wq_utils::numbers::{format_tenths, format_value};

/// Time granularity of the quilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Month,
    Year,
}

/// Which weather variable a patch's color encodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayMode {
    #[default]
    Temperature,
    Precipitation,
    Split,
}

/// How the rendering collaborator should paint a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatchFill {
    Solid { color: Rgb },
    /// Upper triangle temperature, lower triangle precipitation.
    Split { upper: Rgb, lower: Rgb },
}

/// Render-ready description of a single day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchDescriptor {
    pub date: NaiveDate,
    pub avg_temp: Option<f64>,
    pub temperature_color: Rgb,
    pub precipitation_color: Rgb,
    pub precipitation: PrecipitationLevel,
    pub fill: PatchFill,
    pub tooltip_text: String,
    /// Printed inside the cell in month view only.
    pub day_of_month: Option<u32>,
}

/// Build the patch for a single day.
///
/// Fails with `InvalidRecord` when the day violates a field invariant; callers
/// that prefer to skip bad days can filter on this result.
pub fn build_patch(
    day: &DayRecord,
    view_mode: ViewMode,
    display_mode: DisplayMode,
    scales: &QuiltScales,
) -> Result<PatchDescriptor> {
    day.validate()?;
    let precipitation = PrecipitationLevel::of(day)?;
    let avg_temp = day.average_temperature();
    let temperature_color = scales.temperature.color_at(avg_temp);
    let precipitation_color = scales.precipitation.color_at(precipitation.inches());

    let fill = match display_mode {
        DisplayMode::Temperature => PatchFill::Solid {
            color: temperature_color,
        },
        DisplayMode::Precipitation => PatchFill::Solid {
            color: precipitation_color,
        },
        DisplayMode::Split => PatchFill::Split {
            upper: temperature_color,
            lower: precipitation_color,
        },
    };

    let day_of_month = match view_mode {
        ViewMode::Month => Some(day.date.day()),
        ViewMode::Year => None,
    };

    Ok(PatchDescriptor {
        date: day.date,
        avg_temp,
        temperature_color,
        precipitation_color,
        precipitation,
        fill,
        tooltip_text: tooltip_text(day, avg_temp, display_mode),
        day_of_month,
    })
}

/// Build patches for an ordered run of days; `output[i]` comes from `days[i]`.
///
/// The first invalid record aborts the whole batch; its index is prepended
/// to the error reason.
pub fn build_patches(
    days: &[DayRecord],
    view_mode: ViewMode,
    display_mode: DisplayMode,
    scales: &QuiltScales,
) -> Result<Vec<PatchDescriptor>> {
    let patches = days
        .iter()
        .enumerate()
        .map(|(index, day)| {
            build_patch(day, view_mode, display_mode, scales).map_err(|e| match e {
                QuiltError::InvalidRecord { date, reason } => QuiltError::InvalidRecord {
                    date,
                    reason: format!("record {}: {}", index, reason),
                },
                other => other,
            })
        })
        .collect::<Result<Vec<_>>>()?;
    debug!(
        "built {} {:?} patches for {:?} view",
        patches.len(),
        display_mode,
        view_mode
    );
    Ok(patches)
}

/// The two side-by-side quilts: one colored by temperature, one by precipitation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuiltPair {
    pub temperature: Vec<PatchDescriptor>,
    pub precipitation: Vec<PatchDescriptor>,
}

pub fn build_quilt_pair(
    days: &[DayRecord],
    view_mode: ViewMode,
    scales: &QuiltScales,
) -> Result<QuiltPair> {
    Ok(QuiltPair {
        temperature: build_patches(days, view_mode, DisplayMode::Temperature, scales)?,
        precipitation: build_patches(days, view_mode, DisplayMode::Precipitation, scales)?,
    })
}

fn tooltip_text(day: &DayRecord, avg_temp: Option<f64>, display_mode: DisplayMode) -> String {
    let date = format_short_date(&day.date);
    let temperature = format!(
        "Avg Temp: {}°F (Min: {}°F, Max: {}°F)",
        format_tenths(avg_temp),
        format_value(day.min_temp),
        format_value(day.max_temp)
    );
    let precipitation = format_value(day.precipitation);
    match display_mode {
        DisplayMode::Temperature => format!("{}\n{}", date, temperature),
        DisplayMode::Precipitation => format!("{}\nPrecipitation: {}\"", date, precipitation),
        DisplayMode::Split => format!("{}\n{}\nPrecip: {}\"", date, temperature, precipitation),
    }
}
