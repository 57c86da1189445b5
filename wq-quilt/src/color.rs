//! Piecewise-linear color interpolation over fixed color stops.
//!
//! A [`ColorTable`] holds at least two stops with strictly increasing values.
//! Lookups below the first stop or above the last clamp to the end colors;
//! lookups in between interpolate each RGB channel linearly and round with
//! [`f64::round`] (ties away from zero, which is round-half-up for the
//! non-negative channel values used here).

use crate::error::{QuiltError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// An sRGB color with 8-bit channels.
///
/// Serializes as a lowercase `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rgb` or `#rrggbb` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(QuiltError::Configuration(format!("bad hex color '{}'", hex)));
        }
        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => {
                return Err(QuiltError::Configuration(format!(
                    "hex color '{}' must have 3 or 6 digits",
                    hex
                )))
            }
        };
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&expanded[range], 16)
                .map_err(|_| QuiltError::Configuration(format!("bad hex color '{}'", hex)))
        };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Per-channel linear blend toward `other`; `factor` 0 yields `self`, 1 yields `other`.
    pub fn lerp(&self, other: &Rgb, factor: f64) -> Rgb {
        Rgb::new(
            lerp_channel(self.r, other.r, factor),
            lerp_channel(self.g, other.g, factor),
            lerp_channel(self.b, other.b, factor),
        )
    }
}

fn lerp_channel(from: u8, to: u8, factor: f64) -> u8 {
    let from = f64::from(from);
    let value = (from + (f64::from(to) - from) * factor).round();
    value.clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = QuiltError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Rgb::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

/// An anchor point for interpolation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub value: f64,
    pub color: Rgb,
}

impl ColorStop {
    pub const fn new(value: f64, color: Rgb) -> Self {
        Self { value, color }
    }
}

/// Ordered color stops, validated once and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTable {
    stops: Vec<ColorStop>,
}

impl ColorTable {
    /// Build a table from stops sorted by strictly increasing value.
    ///
    /// Fails with [`QuiltError::Configuration`] when there are fewer than two
    /// stops, a value is not finite, or two neighbours are out of order or equal.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self> {
        if stops.len() < 2 {
            return Err(QuiltError::Configuration(format!(
                "a color table needs at least 2 stops, got {}",
                stops.len()
            )));
        }
        if let Some(stop) = stops.iter().find(|s| !s.value.is_finite()) {
            return Err(QuiltError::Configuration(format!(
                "color stop value {} is not finite",
                stop.value
            )));
        }
        if let Some(pair) = stops.windows(2).find(|w| w[0].value >= w[1].value) {
            return Err(QuiltError::Configuration(format!(
                "color stops must be strictly increasing: {} is followed by {}",
                pair[0].value, pair[1].value
            )));
        }
        Ok(Self { stops })
    }

    /// Build a table from `(value, "#rrggbb")` pairs.
    pub fn from_hex_stops(stops: &[(f64, &str)]) -> Result<Self> {
        let stops = stops
            .iter()
            .map(|(value, hex)| Ok(ColorStop::new(*value, Rgb::from_hex(hex)?)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(stops)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Values of the first and last stop.
    pub fn domain(&self) -> (f64, f64) {
        (self.first().value, self.last().value)
    }

    fn first(&self) -> &ColorStop {
        &self.stops[0]
    }

    fn last(&self) -> &ColorStop {
        &self.stops[self.stops.len() - 1]
    }

    /// Clamped interpolation. Returns `None` only for NaN.
    pub fn interpolate(&self, value: f64) -> Option<Rgb> {
        if value.is_nan() {
            return None;
        }
        let (first, last) = (self.first(), self.last());
        if value <= first.value {
            return Some(first.color);
        }
        if value >= last.value {
            return Some(last.color);
        }
        // index of the first stop above `value`; always in 1..len since value is inside the domain
        let upper = self.stops.partition_point(|stop| stop.value <= value);
        let lo = &self.stops[upper - 1];
        let hi = &self.stops[upper];
        let factor = (value - lo.value) / (hi.value - lo.value);
        Some(lo.color.lerp(&hi.color, factor))
    }
}

/// A color table paired with the color shown for absent measurements.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
    table: ColorTable,
    missing: Rgb,
}

impl ColorScale {
    pub fn new(table: ColorTable, missing: Rgb) -> Self {
        Self { table, missing }
    }

    /// Color for a measurement; absent (or NaN) values get the missing color.
    pub fn color_at(&self, value: Option<f64>) -> Rgb {
        value
            .and_then(|v| self.table.interpolate(v))
            .unwrap_or(self.missing)
    }

    pub fn table(&self) -> &ColorTable {
        &self.table
    }

    pub fn missing_color(&self) -> Rgb {
        self.missing
    }

    pub fn domain(&self) -> (f64, f64) {
        self.table.domain()
    }
}
