use crate::error::{QuiltError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One calendar day of weather for a single city.
///
/// Temperatures are in °F and precipitation in inches. Any of the three
/// measurements may be absent ("no measurement"); absent values are not
/// errors and render with a scale's missing color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayRecord {
    pub date: NaiveDate,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub precipitation: Option<f64>,
}

impl DayRecord {
    pub fn new(
        date: NaiveDate,
        min_temp: Option<f64>,
        max_temp: Option<f64>,
        precipitation: Option<f64>,
    ) -> Self {
        Self {
            date,
            min_temp,
            max_temp,
            precipitation,
        }
    }

    /// `(max + min) / 2`, or `None` when either bound is absent.
    pub fn average_temperature(&self) -> Option<f64> {
        match (self.min_temp, self.max_temp) {
            (Some(min), Some(max)) => Some((max + min) / 2.0),
            _ => None,
        }
    }

    /// Check field invariants.
    ///
    /// Precipitation must be a finite, non-negative amount and temperatures
    /// must be finite. Out-of-range values are rejected, never clamped.
    pub fn validate(&self) -> Result<()> {
        self.validate_precipitation()?;
        for (name, value) in [("minimum", self.min_temp), ("maximum", self.max_temp)] {
            if let Some(t) = value {
                if !t.is_finite() {
                    return Err(self.invalid(format!("{} temperature {} is not finite", name, t)));
                }
            }
        }
        Ok(())
    }

    /// Check the precipitation field only.
    pub fn validate_precipitation(&self) -> Result<()> {
        match self.precipitation {
            Some(p) if !p.is_finite() || p < 0.0 => Err(self.invalid(format!(
                "precipitation {} is not a non-negative amount",
                p
            ))),
            _ => Ok(()),
        }
    }

    fn invalid(&self, reason: String) -> QuiltError {
        QuiltError::InvalidRecord {
            date: self.date,
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(min: Option<f64>, max: Option<f64>, precip: Option<f64>) -> DayRecord {
        DayRecord::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), min, max, precip)
    }

    #[test]
    fn test_average_is_exact_midpoint() {
        assert_eq!(day(Some(60.0), Some(80.0), None).average_temperature(), Some(70.0));
        assert_eq!(day(Some(-15.0), Some(2.0), None).average_temperature(), Some(-6.5));
        assert_eq!(day(Some(33.0), Some(33.0), None).average_temperature(), Some(33.0));
    }

    #[test]
    fn test_average_missing_when_either_bound_missing() {
        assert_eq!(day(None, Some(80.0), None).average_temperature(), None);
        assert_eq!(day(Some(60.0), None, None).average_temperature(), None);
        assert_eq!(day(None, None, None).average_temperature(), None);
    }

    #[test]
    fn test_only_negative_precipitation_is_invalid() {
        let samples = [None, Some(0.0), Some(0.01), Some(0.25), Some(3.0), Some(12.5)];
        for p in samples {
            assert!(day(Some(10.0), Some(20.0), p).validate().is_ok(), "{:?} should be valid", p);
        }
        let err = day(Some(10.0), Some(20.0), Some(-0.01)).validate().unwrap_err();
        match err {
            QuiltError::InvalidRecord { date, .. } => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_non_finite_values_are_invalid() {
        assert!(day(Some(10.0), Some(20.0), Some(f64::NAN)).validate().is_err());
        assert!(day(Some(f64::NAN), Some(20.0), None).validate().is_err());
        assert!(day(Some(10.0), Some(f64::INFINITY), None).validate().is_err());
    }

    #[test]
    fn test_deserializes_camel_case_with_missing_fields() {
        let json = r#"{"date":"2024-03-04","minTemp":21,"maxTemp":35.5,"precipitation":null}"#;
        let record: DayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(record.min_temp, Some(21.0));
        assert_eq!(record.max_temp, Some(35.5));
        assert_eq!(record.precipitation, None);

        let sparse: DayRecord = serde_json::from_str(r#"{"date":"2024-03-05"}"#).unwrap();
        assert_eq!(sparse.min_temp, None);
        assert_eq!(sparse.precipitation, None);
    }
}
