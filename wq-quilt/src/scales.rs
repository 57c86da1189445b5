//! The two fixed color scales used by the quilts.
//!
//! Temperature runs from -20°F (very deep blue) through the green/yellow
//! 50-70°F band up to 110°F (dark red). Precipitation runs from 0 in (almost
//! white) to 3 in (deep blue).
//!
//! The precipitation missing color is identical to the 0 in stop color. The
//! two cases are kept apart by [`PrecipitationLevel`], not by the color.

use crate::color::{ColorScale, ColorStop, ColorTable, Rgb};
use crate::day_record::DayRecord;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Average daily temperature stops in °F.
pub const TEMPERATURE_STOPS: [ColorStop; 18] = [
    ColorStop::new(-20.0, Rgb::new(0x0d, 0x1b, 0x4d)), // very deep blue
    ColorStop::new(-10.0, Rgb::new(0x1a, 0x23, 0x7e)),
    ColorStop::new(0.0, Rgb::new(0x15, 0x65, 0xc0)),
    ColorStop::new(10.0, Rgb::new(0x19, 0x76, 0xd2)),
    ColorStop::new(20.0, Rgb::new(0x21, 0x96, 0xf3)),
    ColorStop::new(30.0, Rgb::new(0x42, 0xa5, 0xf5)),
    ColorStop::new(40.0, Rgb::new(0x64, 0xb5, 0xf6)),
    ColorStop::new(50.0, Rgb::new(0x81, 0xc7, 0x84)), // green
    ColorStop::new(60.0, Rgb::new(0xae, 0xd5, 0x81)),
    ColorStop::new(65.0, Rgb::new(0xdc, 0xe7, 0x75)),
    ColorStop::new(70.0, Rgb::new(0xff, 0xf1, 0x76)), // light yellow
    ColorStop::new(75.0, Rgb::new(0xff, 0xd5, 0x4f)),
    ColorStop::new(80.0, Rgb::new(0xff, 0xb7, 0x4d)),
    ColorStop::new(85.0, Rgb::new(0xff, 0x98, 0x00)),
    ColorStop::new(90.0, Rgb::new(0xf5, 0x7c, 0x00)),
    ColorStop::new(95.0, Rgb::new(0xe6, 0x4a, 0x19)),
    ColorStop::new(100.0, Rgb::new(0xd3, 0x2f, 0x2f)),
    ColorStop::new(110.0, Rgb::new(0xb7, 0x1c, 0x1c)), // dark red
];

/// Neutral gray for days without both temperature bounds.
pub const TEMPERATURE_MISSING: Rgb = Rgb::new(0xcc, 0xcc, 0xcc);

/// Daily precipitation stops in inches.
pub const PRECIPITATION_STOPS: [ColorStop; 10] = [
    ColorStop::new(0.0, Rgb::new(0xf5, 0xf5, 0xf5)), // none
    ColorStop::new(0.01, Rgb::new(0xe3, 0xf2, 0xfd)), // trace
    ColorStop::new(0.1, Rgb::new(0xbb, 0xde, 0xfb)),
    ColorStop::new(0.25, Rgb::new(0x90, 0xca, 0xf9)),
    ColorStop::new(0.5, Rgb::new(0x64, 0xb5, 0xf6)),
    ColorStop::new(0.75, Rgb::new(0x42, 0xa5, 0xf5)),
    ColorStop::new(1.0, Rgb::new(0x21, 0x96, 0xf3)),
    ColorStop::new(1.5, Rgb::new(0x19, 0x76, 0xd2)),
    ColorStop::new(2.0, Rgb::new(0x15, 0x65, 0xc0)),
    ColorStop::new(3.0, Rgb::new(0x0d, 0x47, 0xa1)), // extreme
];

/// Almost white, the same as the 0 in stop.
pub const PRECIPITATION_MISSING: Rgb = Rgb::new(0xf5, 0xf5, 0xf5);

/// Build the temperature scale from [`TEMPERATURE_STOPS`].
pub fn temperature_scale() -> Result<ColorScale> {
    Ok(ColorScale::new(
        ColorTable::new(TEMPERATURE_STOPS.to_vec())?,
        TEMPERATURE_MISSING,
    ))
}

/// Build the precipitation scale from [`PRECIPITATION_STOPS`].
pub fn precipitation_scale() -> Result<ColorScale> {
    Ok(ColorScale::new(
        ColorTable::new(PRECIPITATION_STOPS.to_vec())?,
        PRECIPITATION_MISSING,
    ))
}

/// Whether a day had no measurement, a measured zero, or measured rain/snow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "inches", rename_all = "snake_case")]
pub enum PrecipitationLevel {
    Missing,
    Zero,
    Measured(f64),
}

impl PrecipitationLevel {
    /// Classify a day's precipitation. Rejects the record if the amount is
    /// negative or not finite; temperatures are not checked.
    pub fn of(day: &DayRecord) -> Result<Self> {
        day.validate_precipitation()?;
        Ok(match day.precipitation {
            None => PrecipitationLevel::Missing,
            Some(p) if p == 0.0 => PrecipitationLevel::Zero,
            Some(p) => PrecipitationLevel::Measured(p),
        })
    }

    pub fn inches(&self) -> Option<f64> {
        match self {
            PrecipitationLevel::Missing => None,
            PrecipitationLevel::Zero => Some(0.0),
            PrecipitationLevel::Measured(p) => Some(*p),
        }
    }
}

/// Both quilt scales, built once and shared by every render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct QuiltScales {
    pub temperature: ColorScale,
    pub precipitation: ColorScale,
}

impl QuiltScales {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temperature: temperature_scale()?,
            precipitation: precipitation_scale()?,
        })
    }

    /// Color of a day's average temperature.
    pub fn temperature_color(&self, day: &DayRecord) -> Rgb {
        self.temperature.color_at(day.average_temperature())
    }

    /// Color of a day's precipitation; negative or non-finite amounts are rejected.
    pub fn precipitation_color(&self, day: &DayRecord) -> Result<Rgb> {
        let level = PrecipitationLevel::of(day)?;
        Ok(self.precipitation.color_at(level.inches()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuiltError;
    use chrono::NaiveDate;

    fn day(min: Option<f64>, max: Option<f64>, precip: Option<f64>) -> DayRecord {
        DayRecord::new(NaiveDate::from_ymd_opt(2023, 7, 4).unwrap(), min, max, precip)
    }

    #[test]
    fn test_fixed_tables_are_valid() {
        let scales = QuiltScales::new().unwrap();
        assert_eq!(scales.temperature.domain(), (-20.0, 110.0));
        assert_eq!(scales.precipitation.domain(), (0.0, 3.0));
        assert_eq!(scales.temperature.table().stops().len(), 18);
        assert_eq!(scales.precipitation.table().stops().len(), 10);
    }

    #[test]
    fn test_every_stop_maps_to_its_own_color() {
        let scales = QuiltScales::new().unwrap();
        for stop in TEMPERATURE_STOPS {
            assert_eq!(scales.temperature.color_at(Some(stop.value)), stop.color, "stop {}", stop.value);
        }
        for stop in PRECIPITATION_STOPS {
            assert_eq!(scales.precipitation.color_at(Some(stop.value)), stop.color, "stop {}", stop.value);
        }
    }

    #[test]
    fn test_colors_converge_at_stops_from_both_sides() {
        let scale = temperature_scale().unwrap();
        let eps = 1e-7;
        for stop in &TEMPERATURE_STOPS {
            assert_eq!(scale.color_at(Some(stop.value - eps)), stop.color, "below {}", stop.value);
            assert_eq!(scale.color_at(Some(stop.value + eps)), stop.color, "above {}", stop.value);
        }
    }

    #[test]
    fn test_channels_do_not_overshoot_between_stops() {
        let scale = temperature_scale().unwrap();
        for pair in TEMPERATURE_STOPS.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            let mut previous = lo.color.channels();
            for i in 1..=100 {
                let value = lo.value + (hi.value - lo.value) * f64::from(i) / 100.0;
                let current = scale.color_at(Some(value)).channels();
                for ch in 0..3 {
                    let (a, b) = (lo.color.channels()[ch], hi.color.channels()[ch]);
                    if a <= b {
                        assert!(current[ch] >= previous[ch], "channel {} fell at {}", ch, value);
                        assert!(current[ch] <= b, "channel {} overshot at {}", ch, value);
                    } else {
                        assert!(current[ch] <= previous[ch], "channel {} rose at {}", ch, value);
                        assert!(current[ch] >= b, "channel {} overshot at {}", ch, value);
                    }
                }
                previous = current;
            }
        }
    }

    #[test]
    fn test_temperature_clamps_beyond_table() {
        let scale = temperature_scale().unwrap();
        assert_eq!(scale.color_at(Some(-20.5)), scale.color_at(Some(-20.0)));
        assert_eq!(scale.color_at(Some(-60.0)), Rgb::new(0x0d, 0x1b, 0x4d));
        assert_eq!(scale.color_at(Some(110.5)), scale.color_at(Some(110.0)));
        assert_eq!(scale.color_at(Some(130.0)), Rgb::new(0xb7, 0x1c, 0x1c));
    }

    #[test]
    fn test_precipitation_above_three_inches_is_deep_blue() {
        let scale = precipitation_scale().unwrap();
        assert_eq!(scale.color_at(Some(4.2)), Rgb::new(0x0d, 0x47, 0xa1));
    }

    #[test]
    fn test_day_colors() {
        let scales = QuiltScales::new().unwrap();
        let d = day(Some(60.0), Some(80.0), None);
        assert_eq!(scales.temperature_color(&d), Rgb::new(0xff, 0xf1, 0x76));
        assert_eq!(scales.precipitation_color(&d).unwrap(), PRECIPITATION_MISSING);

        let no_temps = day(None, Some(80.0), Some(0.5));
        assert_eq!(scales.temperature_color(&no_temps), TEMPERATURE_MISSING);
        assert_eq!(scales.precipitation_color(&no_temps).unwrap(), Rgb::new(0x64, 0xb5, 0xf6));
    }

    #[test]
    fn test_negative_precipitation_is_rejected_not_clamped() {
        let scales = QuiltScales::new().unwrap();
        let err = scales.precipitation_color(&day(Some(1.0), Some(2.0), Some(-0.01))).unwrap_err();
        assert!(matches!(err, QuiltError::InvalidRecord { .. }));
    }

    #[test]
    fn test_precipitation_color_ignores_temperature_fields() {
        let scales = QuiltScales::new().unwrap();
        let d = day(Some(f64::NAN), Some(20.0), Some(0.5));
        assert_eq!(scales.precipitation_color(&d).unwrap(), Rgb::new(0x64, 0xb5, 0xf6));
        assert_eq!(PrecipitationLevel::of(&d).unwrap(), PrecipitationLevel::Measured(0.5));
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_zero_and_missing_share_a_color_but_not_a_level() {
        let zero = day(None, None, Some(0.0));
        let missing = day(None, None, None);
        let scales = QuiltScales::new().unwrap();
        assert_eq!(
            scales.precipitation_color(&zero).unwrap(),
            scales.precipitation_color(&missing).unwrap()
        );
        assert_eq!(PrecipitationLevel::of(&zero).unwrap(), PrecipitationLevel::Zero);
        assert_eq!(PrecipitationLevel::of(&missing).unwrap(), PrecipitationLevel::Missing);
        assert_eq!(
            PrecipitationLevel::of(&day(None, None, Some(0.3))).unwrap(),
            PrecipitationLevel::Measured(0.3)
        );
    }

    #[test]
    fn test_precipitation_level_serializes_tagged() {
        let json = serde_json::to_string(&PrecipitationLevel::Measured(0.25)).unwrap();
        assert_eq!(json, r#"{"kind":"measured","inches":0.25}"#);
        let json = serde_json::to_string(&PrecipitationLevel::Missing).unwrap();
        assert_eq!(json, r#"{"kind":"missing"}"#);
    }
}
