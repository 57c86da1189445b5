//! Reader for NOAA RCC-ACIS `StnData` responses.
//!
//! The request asks for `maxt, mint, avgt, avgt departure, hdd, cdd, pcpn,
//! snow, snwd` with `"add": "t"`, so every element after the date is a
//! `[value, time]` pair. Plain string elements are accepted as well.

use crate::day_record::DayRecord;
use crate::error::{QuiltError, Result};
use chrono::NaiveDate;
use log::warn;
use serde_json::Value;
use wq_utils::dates::ISO_FORMAT;

const DATE_INDEX: usize = 0;
const MAX_TEMP_INDEX: usize = 1;
const MIN_TEMP_INDEX: usize = 2;
const PRECIPITATION_INDEX: usize = 7;

/// Inches recorded for a trace (`T`) of precipitation.
pub const TRACE_PRECIPITATION: f64 = 0.01;

/// Result of reading one StnData response.
#[derive(Debug, Clone, PartialEq)]
pub struct AcisImport {
    /// `meta.name`, when the response carries one.
    pub station_name: Option<String>,
    pub records: Vec<DayRecord>,
    /// Rows that could not be read at all.
    pub skipped: usize,
}

/// Parse a StnData JSON body into day records.
///
/// Missing (`M`) and subsequent-report (`S`) values become `None`; the day
/// itself is kept. Rows with a bad date or an unreadable number are skipped
/// and counted.
pub fn parse_stn_data(json: &str) -> Result<AcisImport> {
    let body: Value =
        serde_json::from_str(json).map_err(|e| QuiltError::AcisParse(e.to_string()))?;

    if let Some(error) = body.get("error").and_then(Value::as_str) {
        return Err(QuiltError::AcisParse(format!("service error: {}", error)));
    }

    let rows = body
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| QuiltError::AcisParse("response has no data array".to_string()))?;

    let station_name = body
        .get("meta")
        .and_then(|meta| meta.get("name"))
        .and_then(Value::as_str)
        .map(str::to_string);

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0;
    for (index, row) in rows.iter().enumerate() {
        match parse_row(row) {
            Ok(record) => records.push(record),
            Err(reason) => {
                warn!("Skipping ACIS row {}: {}", index, reason);
                skipped += 1;
            }
        }
    }

    Ok(AcisImport {
        station_name,
        records,
        skipped,
    })
}

fn parse_row(row: &Value) -> std::result::Result<DayRecord, String> {
    let fields = row.as_array().ok_or("row is not an array")?;
    if fields.len() <= PRECIPITATION_INDEX {
        return Err(format!("expected at least {} fields, got {}", PRECIPITATION_INDEX + 1, fields.len()));
    }

    let date_text = fields[DATE_INDEX].as_str().ok_or("date is not a string")?;
    let date = NaiveDate::parse_from_str(date_text, ISO_FORMAT)
        .map_err(|e| format!("bad date '{}': {}", date_text, e))?;

    let max_temp = parse_value(&fields[MAX_TEMP_INDEX], None)?;
    let min_temp = parse_value(&fields[MIN_TEMP_INDEX], None)?;
    let precipitation = parse_value(&fields[PRECIPITATION_INDEX], Some(TRACE_PRECIPITATION))?;

    Ok(DayRecord::new(date, min_temp, max_temp, precipitation))
}

/// Read one element. `trace` is the amount substituted for `T`; elements
/// that have no trace reading reject it.
fn parse_value(field: &Value, trace: Option<f64>) -> std::result::Result<Option<f64>, String> {
    let raw = match field {
        Value::Array(pair) => pair.first().ok_or("empty value pair")?,
        other => other,
    };
    let text = match raw {
        Value::String(s) => s.trim(),
        Value::Number(n) => return Ok(n.as_f64()),
        Value::Null => return Ok(None),
        other => return Err(format!("unexpected value {}", other)),
    };

    match text {
        "" | "M" | "S" => Ok(None),
        "T" => trace.map(Some).ok_or_else(|| "trace flag on a temperature".to_string()),
        _ => {
            let number = text.strip_suffix('A').unwrap_or(text);
            number
                .parse::<f64>()
                .map(Some)
                .map_err(|_| format!("bad number '{}'", text))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"{
        "meta": {"state": "AK", "sids": ["ANCthr 9"], "uid": 32645, "name": "Anchorage Area"},
        "data": [
            ["2024-03-01", ["30", 1700], ["12", 1700], ["21.0", 1700], ["-2.1", 1700], ["44", 1700], ["0", 1700], ["0.00", 1700], ["0.0", 1700], ["10", 1700]],
            ["2024-03-02", ["34", 1700], ["20", 1700], ["27.0", 1700], ["3.9", 1700], ["38", 1700], ["0", 1700], ["T", 1700], ["T", 1700], ["10", 1700]],
            ["2024-03-03", ["M", 1700], ["18", 1700], ["M", 1700], ["M", 1700], ["M", 1700], ["M", 1700], ["0.42A", 1700], ["1.2", 1700], ["11", 1700]],
            ["2024-03-04", ["36", 1700], ["22", 1700], ["29.0", 1700], ["5.8", 1700], ["36", 1700], ["0", 1700], ["S", 1700], ["0.0", 1700], ["11", 1700]]
        ]
    }"#;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_parse_stn_data() {
        let import = parse_stn_data(RESPONSE).unwrap();
        assert_eq!(import.station_name.as_deref(), Some("Anchorage Area"));
        assert_eq!(import.skipped, 0);
        assert_eq!(
            import.records,
            vec![
                DayRecord::new(date(1), Some(12.0), Some(30.0), Some(0.0)),
                DayRecord::new(date(2), Some(20.0), Some(34.0), Some(TRACE_PRECIPITATION)),
                DayRecord::new(date(3), Some(18.0), None, Some(0.42)),
                DayRecord::new(date(4), Some(22.0), Some(36.0), None),
            ]
        );
    }

    #[test]
    fn test_plain_string_elements() {
        let json = r#"{"data": [["2024-03-05", "40", "25", "32.5", "0", "32", "0", "0.10", "0", "0"]]}"#;
        let import = parse_stn_data(json).unwrap();
        assert_eq!(import.station_name, None);
        assert_eq!(
            import.records,
            vec![DayRecord::new(date(5), Some(25.0), Some(40.0), Some(0.1))]
        );
    }

    #[test]
    fn test_bad_rows_are_skipped() {
        let json = r#"{"data": [
            ["not-a-date", "40", "25", "32.5", "0", "32", "0", "0.10", "0", "0"],
            ["2024-03-06", "forty", "25", "32.5", "0", "32", "0", "0.10", "0", "0"],
            ["2024-03-07", "40", "25"],
            ["2024-03-08", "T", "25", "32.5", "0", "32", "0", "0.10", "0", "0"],
            ["2024-03-09", "41", "26", "33.5", "0", "31", "0", "0.00", "0", "0"]
        ]}"#;
        let import = parse_stn_data(json).unwrap();
        assert_eq!(import.skipped, 4);
        assert_eq!(import.records.len(), 1);
        assert_eq!(import.records[0].date, date(9));
    }

    #[test]
    fn test_service_error_and_malformed_body() {
        assert!(matches!(
            parse_stn_data(r#"{"error": "Unknown sid"}"#),
            Err(QuiltError::AcisParse(msg)) if msg.contains("Unknown sid")
        ));
        assert!(matches!(parse_stn_data(r#"{"meta": {}}"#), Err(QuiltError::AcisParse(_))));
        assert!(parse_stn_data("not json").is_err());
    }
}
