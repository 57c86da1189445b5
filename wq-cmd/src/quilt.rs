//! The `quilt` command: build the quilt(s) for a city's month or year.

use crate::preview;
use chrono::{Local, NaiveDate};
use log::{info, warn};
use serde::Serialize;
use wq_quilt::{
    build_patches, build_quilt_pair, DayRecord, DisplayMode, Legend, PatchDescriptor, QuiltPair,
    QuiltScales, ViewMode, ViewState,
};

pub struct QuiltOptions {
    pub data: String,
    pub city: String,
    pub view_mode: ViewMode,
    pub date: String,
    pub display_mode: Option<DisplayMode>,
    pub skip_invalid: bool,
    pub preview: bool,
    pub output: Option<String>,
}

/// What the quilt command emits as JSON.
#[derive(Debug, Serialize)]
pub struct QuiltDocument {
    pub view: ViewState,
    pub summary: String,
    pub window: (NaiveDate, NaiveDate),
    pub legends: Vec<Legend>,
    pub quilts: Quilts,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Quilts {
    Single(Vec<PatchDescriptor>),
    Pair(QuiltPair),
}

pub fn run_quilt(options: &QuiltOptions) -> anyhow::Result<()> {
    let db = crate::open_store(&options.data)?;

    let mut view = ViewState::new(Local::now().naive_local().date());
    view.set_city(options.city.as_str());
    view.set_view_mode(options.view_mode);
    if let Some(display_mode) = options.display_mode {
        view.set_display_mode(display_mode);
    }
    view.set_date_input(&options.date)?;

    let (start, end) = view.date_window()?;
    let mut days = db.query_days(view.selected_city(), start, end)?;
    if options.skip_invalid {
        days = drop_invalid(days);
    }
    info!(
        "Building {:?} quilt for {} from {} to {}",
        view.view_mode(),
        view.selected_city(),
        start,
        end
    );

    let scales = QuiltScales::new()?;
    let document = build_document(&view, options.display_mode, &days, &scales)?;

    let text = if options.preview {
        preview::render_document(&document)
    } else {
        serde_json::to_string_pretty(&document)?
    };
    crate::emit(&text, options.output.as_deref())
}

/// Assemble the quilt document for `days`, which must already be limited to
/// the view's window.
pub fn build_document(
    view: &ViewState,
    display_mode: Option<DisplayMode>,
    days: &[DayRecord],
    scales: &QuiltScales,
) -> anyhow::Result<QuiltDocument> {
    let quilts = match display_mode {
        Some(display_mode) => Quilts::Single(build_patches(
            days,
            view.view_mode(),
            display_mode,
            scales,
        )?),
        None => Quilts::Pair(build_quilt_pair(days, view.view_mode(), scales)?),
    };

    let legends = match display_mode {
        Some(DisplayMode::Temperature) => vec![Legend::temperature(scales)?],
        Some(DisplayMode::Precipitation) => vec![Legend::precipitation(scales)?],
        Some(DisplayMode::Split) | None => {
            vec![Legend::temperature(scales)?, Legend::precipitation(scales)?]
        }
    };

    Ok(QuiltDocument {
        view: view.clone(),
        summary: view.summary(days.len()),
        window: view.date_window()?,
        legends,
        quilts,
    })
}

fn drop_invalid(days: Vec<DayRecord>) -> Vec<DayRecord> {
    days.into_iter()
        .filter(|day| match day.validate() {
            Ok(()) => true,
            Err(e) => {
                warn!("Skipping {}", e);
                false
            }
        })
        .collect()
}
