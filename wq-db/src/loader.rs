//! Loading weather records into the store, and writing them back out as CSV.
//!
//! # CSV Format
//!
//! Headers are required: `CITY,STATION_ID,DATE,MIN_TEMP,MAX_TEMP,PRECIPITATION`.
//! Dates are `YYYY-MM-DD`. An empty measurement cell means the value was not
//! recorded and is stored as NULL.
//!
//! ```text
//! CITY,STATION_ID,DATE,MIN_TEMP,MAX_TEMP,PRECIPITATION
//! "Anchorage, AK",ANCthr 9,2024-03-01,12,30,0.00
//! "Anchorage, AK",ANCthr 9,2024-03-02,20,34,
//! ```

use crate::models::LoadSummary;
use crate::Database;
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use wq_quilt::DayRecord;
use wq_utils::dates::{format_date, ISO_FORMAT};

pub const CSV_HEADERS: [&str; 6] = [
    "CITY",
    "STATION_ID",
    "DATE",
    "MIN_TEMP",
    "MAX_TEMP",
    "PRECIPITATION",
];

const UPSERT: &str = "INSERT OR REPLACE INTO weather_by_day
     (city, station_id, date, min_temp, max_temp, precipitation)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

impl Database {
    /// Load weather rows from a CSV string.
    ///
    /// Rows with an empty city, an unparseable date or a non-numeric
    /// measurement are skipped and counted. A row for an existing
    /// (city, date) replaces it.
    pub fn load_weather_csv(&self, csv_data: &str) -> anyhow::Result<LoadSummary> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut summary = LoadSummary::default();
        for (line, result) in rdr.records().enumerate() {
            let r = result?;
            let city = r.get(0).unwrap_or("").trim();
            let station_id = r.get(1).unwrap_or("").trim();
            let date = NaiveDate::parse_from_str(r.get(2).unwrap_or("").trim(), ISO_FORMAT);
            let min_temp = parse_measurement(r.get(3));
            let max_temp = parse_measurement(r.get(4));
            let precipitation = parse_measurement(r.get(5));

            match (date, min_temp, max_temp, precipitation) {
                (Ok(date), Some(min_temp), Some(max_temp), Some(precipitation))
                    if !city.is_empty() =>
                {
                    tx.execute(
                        UPSERT,
                        params![city, station_id, date, min_temp, max_temp, precipitation],
                    )?;
                    summary.loaded += 1;
                }
                _ => {
                    log::debug!("loader: skipping CSV record {}: {:?}", line + 1, r);
                    summary.skipped += 1;
                }
            }
        }
        tx.commit()?;
        log::info!(
            "loader: Loaded {} weather rows, skipped {} invalid",
            summary.loaded,
            summary.skipped
        );
        Ok(summary)
    }

    /// Store already-parsed day records for one city.
    pub fn load_records(
        &self,
        city: &str,
        station_id: &str,
        records: &[DayRecord],
    ) -> anyhow::Result<usize> {
        if city.trim().is_empty() {
            anyhow::bail!("city name must not be empty");
        }
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        insert_records(&tx, city, station_id, records)?;
        tx.commit()?;
        log::info!("loader: Loaded {} records for {}", records.len(), city);
        Ok(records.len())
    }
}

fn insert_records(
    conn: &Connection,
    city: &str,
    station_id: &str,
    records: &[DayRecord],
) -> anyhow::Result<()> {
    let mut stmt = conn.prepare(UPSERT)?;
    for record in records {
        stmt.execute(params![
            city,
            station_id,
            record.date,
            record.min_temp,
            record.max_temp,
            record.precipitation
        ])?;
    }
    Ok(())
}

/// `Some(None)` for an empty cell, `None` when the cell cannot be used.
fn parse_measurement(cell: Option<&str>) -> Option<Option<f64>> {
    let cell = cell.unwrap_or("").trim();
    if cell.is_empty() {
        return Some(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(Some(v)),
        _ => None,
    }
}

/// Render records for one city in the CSV format read by
/// [`Database::load_weather_csv`].
pub fn weather_csv(city: &str, station_id: &str, records: &[DayRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(CSV_HEADERS)?;
    let cell = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    for record in records {
        wtr.write_record([
            city.to_string(),
            station_id.to_string(),
            format_date(&record.date),
            cell(record.min_temp),
            cell(record.max_temp),
            cell(record.precipitation),
        ])?;
    }
    let bytes = wtr
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to flush weather CSV: {}", e.error()))?;
    Ok(String::from_utf8(bytes)?)
}
