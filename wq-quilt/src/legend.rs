//! Legend data for the two quilt scales: a sampled gradient bar plus a
//! curated set of labeled markers.

use crate::color::{ColorScale, Rgb};
use crate::error::{QuiltError, Result};
use crate::scales::QuiltScales;
use serde::Serialize;

/// Marker values printed under the temperature gradient, in °F.
pub const TEMPERATURE_MARKERS: [f64; 14] = [
    -20.0, -10.0, 0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0,
];

/// Marker values printed under the precipitation gradient, in inches.
pub const PRECIPITATION_MARKERS: [f64; 8] = [0.0, 0.25, 0.5, 0.75, 1.0, 1.5, 2.0, 3.0];

pub const TEMPERATURE_BANDS: [&str; 7] =
    ["Very Cold", "Cold", "Cool", "Mild", "Warm", "Hot", "Very Hot"];

pub const PRECIPITATION_BANDS: [&str; 7] = [
    "None",
    "Trace",
    "Light",
    "Moderate",
    "Heavy",
    "Very Heavy",
    "Extreme",
];

/// Default gradient sampling steps: every 2°F and every tenth of an inch.
pub const TEMPERATURE_GRADIENT_STEP: f64 = 2.0;
pub const PRECIPITATION_GRADIENT_STEP: f64 = 0.1;

/// Upper bound on the number of steps a gradient may span.
pub const MAX_GRADIENT_SAMPLES: usize = 10_000;

/// One sampled color along the gradient bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GradientStop {
    pub value: f64,
    pub color: Rgb,
    pub position_percent: f64,
}

/// A labeled tick under the gradient bar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendMarker {
    pub value: f64,
    pub label: String,
    pub position_percent: f64,
}

/// Sample `scale` from `domain_min` to `domain_max` inclusive every `step`.
///
/// Sample `i` is taken at `domain_min + i * step` rather than by repeated
/// addition, and the last sample is capped at `domain_max`, so a domain that
/// is a whole number of steps always ends exactly on `domain_max`.
pub fn build_gradient(
    scale: &ColorScale,
    domain_min: f64,
    domain_max: f64,
    step: f64,
) -> Result<Vec<GradientStop>> {
    if !(domain_min.is_finite() && domain_max.is_finite() && step.is_finite()) {
        return Err(QuiltError::Configuration(
            "gradient domain and step must be finite".to_string(),
        ));
    }
    if domain_max <= domain_min {
        return Err(QuiltError::Configuration(format!(
            "gradient domain {}..{} is empty",
            domain_min, domain_max
        )));
    }
    if step <= 0.0 {
        return Err(QuiltError::Configuration(format!(
            "gradient step {} must be positive",
            step
        )));
    }

    let span = domain_max - domain_min;
    let samples = (span / step + 1e-9).floor();
    if samples >= MAX_GRADIENT_SAMPLES as f64 {
        return Err(QuiltError::Configuration(format!(
            "gradient step {} yields more than {} samples over {}..{}",
            step, MAX_GRADIENT_SAMPLES, domain_min, domain_max
        )));
    }
    let count = samples as usize;
    let stops = (0..=count)
        .map(|i| {
            let value = (domain_min + i as f64 * step).min(domain_max);
            GradientStop {
                value,
                color: scale.color_at(Some(value)),
                position_percent: (value - domain_min) / span * 100.0,
            }
        })
        .collect();
    Ok(stops)
}

/// Which of the two quilt scales a legend describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendKind {
    Temperature,
    Precipitation,
}

impl LegendKind {
    fn markers(&self) -> &'static [f64] {
        match self {
            LegendKind::Temperature => &TEMPERATURE_MARKERS,
            LegendKind::Precipitation => &PRECIPITATION_MARKERS,
        }
    }

    fn label(&self, value: f64) -> String {
        match self {
            LegendKind::Temperature => format!("{}°F", value),
            LegendKind::Precipitation => format!("{}\"", value),
        }
    }

    pub fn default_step(&self) -> f64 {
        match self {
            LegendKind::Temperature => TEMPERATURE_GRADIENT_STEP,
            LegendKind::Precipitation => PRECIPITATION_GRADIENT_STEP,
        }
    }
}

/// Everything a legend renderer needs for one scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub kind: LegendKind,
    pub title: &'static str,
    pub description: &'static str,
    pub domain: (f64, f64),
    pub gradient: Vec<GradientStop>,
    pub markers: Vec<LegendMarker>,
    pub bands: Vec<&'static str>,
}

impl Legend {
    pub fn temperature(scales: &QuiltScales) -> Result<Self> {
        Self::build(LegendKind::Temperature, scales, TEMPERATURE_GRADIENT_STEP)
    }

    pub fn precipitation(scales: &QuiltScales) -> Result<Self> {
        Self::build(LegendKind::Precipitation, scales, PRECIPITATION_GRADIENT_STEP)
    }

    /// Build a legend sampling the scale's full domain every `step`.
    pub fn build(kind: LegendKind, scales: &QuiltScales, step: f64) -> Result<Self> {
        let (title, description, scale, bands) = match kind {
            LegendKind::Temperature => (
                "Temperature Scale",
                "Average Daily Temperature (°F)",
                &scales.temperature,
                TEMPERATURE_BANDS,
            ),
            LegendKind::Precipitation => (
                "Precipitation Scale",
                "Daily Precipitation (inches)",
                &scales.precipitation,
                PRECIPITATION_BANDS,
            ),
        };
        let (min, max) = scale.domain();
        let gradient = build_gradient(scale, min, max, step)?;
        let markers = kind
            .markers()
            .iter()
            .map(|&value| LegendMarker {
                value,
                label: kind.label(value),
                position_percent: (value - min) / (max - min) * 100.0,
            })
            .collect();
        Ok(Self {
            kind,
            title,
            description,
            domain: (min, max),
            gradient,
            markers,
            bands: bands.to_vec(),
        })
    }

    /// CSS `linear-gradient(to right, ...)` built from the sampled stops.
    pub fn css_gradient(&self) -> String {
        let stops = self
            .gradient
            .iter()
            .map(|s| format!("{} {}%", s.color, s.position_percent))
            .collect::<Vec<_>>()
            .join(", ");
        format!("linear-gradient(to right, {})", stops)
    }
}
