//! Command implementations for the WQ CLI.
//!
//! Every command reads local files only: weather CSV fixtures for the quilt,
//! detail and cities commands, and a saved ACIS StnData response for import.

use clap::{Subcommand, ValueEnum};
use wq_quilt::{DisplayMode, LegendKind, ViewMode, DEFAULT_CITY};

pub mod cities;
pub mod detail;
pub mod import;
pub mod legend;
pub mod preview;
pub mod quilt;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ViewArg {
    Month,
    Year,
}

impl From<ViewArg> for ViewMode {
    fn from(value: ViewArg) -> Self {
        match value {
            ViewArg::Month => ViewMode::Month,
            ViewArg::Year => ViewMode::Year,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DisplayArg {
    Temperature,
    Precipitation,
    Split,
}

impl From<DisplayArg> for DisplayMode {
    fn from(value: DisplayArg) -> Self {
        match value {
            DisplayArg::Temperature => DisplayMode::Temperature,
            DisplayArg::Precipitation => DisplayMode::Precipitation,
            DisplayArg::Split => DisplayMode::Split,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ScaleArg {
    Temperature,
    Precipitation,
}

impl From<ScaleArg> for LegendKind {
    fn from(value: ScaleArg) -> Self {
        match value {
            ScaleArg::Temperature => LegendKind::Temperature,
            ScaleArg::Precipitation => LegendKind::Precipitation,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the weather quilt for one month or year of a city
    Quilt {
        /// Weather CSV (CITY,STATION_ID,DATE,MIN_TEMP,MAX_TEMP,PRECIPITATION)
        #[arg(short = 'd', long)]
        data: String,

        /// City to show
        #[arg(short = 'c', long, default_value = DEFAULT_CITY)]
        city: String,

        /// Month or year view
        #[arg(long, value_enum, default_value_t = ViewArg::Month)]
        view: ViewArg,

        /// YYYY-MM in month view, YYYY in year view
        #[arg(long)]
        date: String,

        /// Single quilt display mode; both quilts are built when omitted
        #[arg(long, value_enum)]
        display: Option<DisplayArg>,

        /// Drop invalid day records instead of failing
        #[arg(long)]
        skip_invalid: bool,

        /// Print an ANSI true-color preview instead of JSON
        #[arg(long)]
        preview: bool,

        /// Write output to this file instead of stdout
        #[arg(short = 'o', long)]
        output: Option<String>,
    },

    /// Print the legend of one color scale
    Legend {
        #[arg(long, value_enum)]
        scale: ScaleArg,

        /// Gradient sampling step (2 °F or 0.1 in by default)
        #[arg(long)]
        step: Option<f64>,

        /// Print the CSS linear-gradient instead of JSON
        #[arg(long)]
        css: bool,
    },

    /// Show the detail view of a single day
    Detail {
        /// Weather CSV
        #[arg(short = 'd', long)]
        data: String,

        #[arg(short = 'c', long, default_value = DEFAULT_CITY)]
        city: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },

    /// List the cities in a weather CSV with their date ranges
    Cities {
        /// Weather CSV
        #[arg(short = 'd', long)]
        data: String,
    },

    /// Convert a saved ACIS StnData JSON response into a weather CSV
    Import {
        /// ACIS StnData response body
        #[arg(long)]
        acis: String,

        #[arg(short = 'c', long)]
        city: String,

        /// Station id stored with every row (e.g. "ANCthr 9")
        #[arg(long)]
        station: String,

        /// Output path for the weather CSV
        #[arg(short = 'o', long)]
        output: String,
    },
}

pub fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Quilt {
            data,
            city,
            view,
            date,
            display,
            skip_invalid,
            preview,
            output,
        } => quilt::run_quilt(&quilt::QuiltOptions {
            data,
            city,
            view_mode: view.into(),
            date,
            display_mode: display.map(Into::into),
            skip_invalid,
            preview,
            output,
        }),
        Command::Legend { scale, step, css } => legend::run_legend(scale.into(), step, css),
        Command::Detail { data, city, date } => detail::run_detail(&data, &city, &date),
        Command::Cities { data } => cities::run_cities(&data),
        Command::Import {
            acis,
            city,
            station,
            output,
        } => import::run_import(&acis, &city, &station, &output),
    }
}

/// Load a weather CSV file into a fresh in-memory store.
pub(crate) fn open_store(data: &str) -> anyhow::Result<wq_db::Database> {
    use anyhow::Context;

    let csv = std::fs::read_to_string(data)
        .with_context(|| format!("Failed to read weather CSV {}", data))?;
    let db = wq_db::Database::new()?;
    let summary = db.load_weather_csv(&csv)?;
    if summary.skipped > 0 {
        log::warn!("{}: skipped {} unreadable rows", data, summary.skipped);
    }
    Ok(db)
}

/// Write `text` to `output`, or to stdout when no path is given.
pub(crate) fn emit(text: &str, output: Option<&str>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)?;
            log::info!("Wrote {}", path);
        }
        None => println!("{}", text),
    }
    Ok(())
}
