//! ANSI true-color terminal preview of quilt documents.
//!
//! Month view is drawn as a Sunday-first calendar, year view as one row per
//! month. Split patches use an upper half block so both colors show.

use crate::quilt::{QuiltDocument, Quilts};
use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;
use wq_quilt::{Legend, PatchDescriptor, PatchFill, Rgb, ViewMode};

const RESET: &str = "\x1b[0m";
const UPPER_HALF: char = '▀';
const MONTH_CELL: usize = 4;
const YEAR_CELL: usize = 2;
const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

pub fn render_document(document: &QuiltDocument) -> String {
    let view_mode = document.view.view_mode();
    let mut out = format!("{}\n", document.summary);
    match &document.quilts {
        Quilts::Single(patches) => {
            out.push('\n');
            out.push_str(&render_quilt(patches, view_mode, document.window));
        }
        Quilts::Pair(pair) => {
            out.push_str("\nTemperature\n");
            out.push_str(&render_quilt(&pair.temperature, view_mode, document.window));
            out.push_str("\nPrecipitation\n");
            out.push_str(&render_quilt(&pair.precipitation, view_mode, document.window));
        }
    }
    for legend in &document.legends {
        out.push('\n');
        out.push_str(&render_legend(legend));
    }
    out
}

/// Draw the patches of one quilt over the inclusive `window`. Days without a
/// patch are left blank.
pub fn render_quilt(
    patches: &[PatchDescriptor],
    view_mode: ViewMode,
    window: (NaiveDate, NaiveDate),
) -> String {
    let by_date: BTreeMap<NaiveDate, &PatchDescriptor> =
        patches.iter().map(|p| (p.date, p)).collect();
    match view_mode {
        ViewMode::Month => render_month(&by_date, window),
        ViewMode::Year => render_year(&by_date, window),
    }
}

fn render_month(by_date: &BTreeMap<NaiveDate, &PatchDescriptor>, window: (NaiveDate, NaiveDate)) -> String {
    let (start, end) = window;
    let mut out: String = WEEKDAYS
        .iter()
        .map(|d| format!("{:>width$}", d, width = MONTH_CELL))
        .collect();
    out.push('\n');

    let offset = start.weekday().num_days_from_sunday() as usize;
    out.push_str(&" ".repeat(offset * MONTH_CELL));
    for date in start.iter_days().take_while(|d| *d <= end) {
        let cell = match by_date.get(&date) {
            Some(patch) => {
                let label = patch
                    .day_of_month
                    .map(|d| format!("{:>width$}", d, width = MONTH_CELL - 1))
                    .unwrap_or_default();
                paint(&patch.fill, &format!("{:<width$}", label, width = MONTH_CELL))
            }
            None => " ".repeat(MONTH_CELL),
        };
        out.push_str(&cell);
        if date.weekday().num_days_from_sunday() == 6 {
            out.push('\n');
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn render_year(by_date: &BTreeMap<NaiveDate, &PatchDescriptor>, window: (NaiveDate, NaiveDate)) -> String {
    let (start, end) = window;
    let mut out = String::new();
    let mut current_month = None;
    for date in start.iter_days().take_while(|d| *d <= end) {
        if current_month != Some(date.month()) {
            if current_month.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("{:<4}", date.format("%b").to_string()));
            current_month = Some(date.month());
        }
        let cell = match by_date.get(&date) {
            Some(patch) => paint(&patch.fill, &" ".repeat(YEAR_CELL)),
            None => " ".repeat(YEAR_CELL),
        };
        out.push_str(&cell);
    }
    out.push('\n');
    out
}

/// One line per legend: title, the sampled gradient, and the end labels.
pub fn render_legend(legend: &Legend) -> String {
    let bar: String = legend
        .gradient
        .iter()
        .map(|stop| format!("{} {}", background(stop.color), RESET))
        .collect();
    let first = legend.markers.first().map(|m| m.label.as_str()).unwrap_or("");
    let last = legend.markers.last().map(|m| m.label.as_str()).unwrap_or("");
    format!("{}\n{} {} {}\n", legend.title, first, bar, last)
}

fn paint(fill: &PatchFill, text: &str) -> String {
    match fill {
        PatchFill::Solid { color } => format!(
            "{}{}{}{}",
            background(*color),
            foreground(contrast(*color)),
            text,
            RESET
        ),
        PatchFill::Split { upper, lower } => {
            let blocks: String = text.chars().map(|_| UPPER_HALF).collect();
            format!("{}{}{}{}", foreground(*upper), background(*lower), blocks, RESET)
        }
    }
}

fn background(color: Rgb) -> String {
    let [r, g, b] = color.channels();
    format!("\x1b[48;2;{};{};{}m", r, g, b)
}

fn foreground(color: Rgb) -> String {
    let [r, g, b] = color.channels();
    format!("\x1b[38;2;{};{};{}m", r, g, b)
}

/// Black text on light patches, white on dark ones.
fn contrast(color: Rgb) -> Rgb {
    let [r, g, b] = color.channels();
    let luma = 0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b);
    if luma > 140.0 {
        Rgb::new(0, 0, 0)
    } else {
        Rgb::new(0xff, 0xff, 0xff)
    }
}
