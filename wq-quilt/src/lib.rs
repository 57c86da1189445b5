//! Color-mapping engine for daily weather quilts.
//!
//! A quilt is a grid of patches, one per day, colored by the day's average
//! temperature, its precipitation, or both (split diagonally). This crate
//! turns ordered [`DayRecord`]s into render-ready [`PatchDescriptor`]s and
//! provides the legend data, the detail-view selection model and the view
//! parameters a presentation layer needs. It performs no I/O.
//!
//! # Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use wq_quilt::{build_patches, DayRecord, DisplayMode, QuiltScales, ViewMode};
//!
//! let scales = QuiltScales::new().unwrap();
//! let day = DayRecord::new(
//!     NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
//!     Some(60.0),
//!     Some(80.0),
//!     None,
//! );
//!
//! let patches = build_patches(&[day], ViewMode::Month, DisplayMode::Temperature, &scales).unwrap();
//! assert_eq!(patches[0].avg_temp, Some(70.0));
//! assert_eq!(patches[0].temperature_color.to_hex(), "#fff176");
//! assert_eq!(patches[0].precipitation_color, scales.precipitation.missing_color());
//! ```
//!
//! # Modules
//!
//! - [`color`] - hex colors, stop tables and linear interpolation
//! - [`scales`] - the fixed temperature and precipitation scales
//! - [`quilt`] - patch construction for month and year views
//! - [`legend`] - sampled gradients and labeled markers
//! - [`selection`] - the single-day detail view
//! - [`view_state`] - city, date window and display mode
//! - [`acis`] - reader for NOAA RCC-ACIS StnData responses

pub mod acis;
pub mod color;
pub mod day_record;
pub mod error;
pub mod legend;
pub mod quilt;
pub mod scales;
pub mod selection;
pub mod view_state;

pub use acis::{parse_stn_data, AcisImport};
pub use color::{ColorScale, ColorStop, ColorTable, Rgb};
pub use day_record::DayRecord;
pub use error::{QuiltError, Result};
pub use legend::{build_gradient, GradientStop, Legend, LegendKind, LegendMarker};
pub use quilt::{
    build_patch, build_patches, build_quilt_pair, DisplayMode, PatchDescriptor, PatchFill,
    QuiltPair, ViewMode,
};
pub use scales::{PrecipitationLevel, QuiltScales};
pub use selection::{DetailView, SelectionState};
pub use view_state::{ViewState, DEFAULT_CITY};
