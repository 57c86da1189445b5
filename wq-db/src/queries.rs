//! Typed queries over the weather store.
//!
//! Every multi-day query returns [`DayRecord`]s ordered by date, ready to be
//! handed to the quilt engine. Days that were never stored are simply absent;
//! the store does not fill gaps.

use crate::models::DateRange;
use crate::Database;
use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use wq_quilt::DayRecord;
use wq_utils::dates::{month_bounds, year_bounds};

const SELECT_DAY: &str = "SELECT date, min_temp, max_temp, precipitation FROM weather_by_day";

fn day_from_row(row: &Row<'_>) -> rusqlite::Result<DayRecord> {
    Ok(DayRecord::new(row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
}

impl Database {
    /// A single day for `city`, if stored.
    pub fn query_day(&self, city: &str, date: NaiveDate) -> anyhow::Result<Option<DayRecord>> {
        let conn = self.conn.borrow();
        let day = conn
            .query_row(
                &format!("{} WHERE city = ?1 AND date = ?2", SELECT_DAY),
                params![city, date],
                day_from_row,
            )
            .optional()?;
        Ok(day)
    }

    /// Stored days for `city` between `start` and `end` inclusive, ordered by date.
    pub fn query_days(
        &self,
        city: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<DayRecord>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(&format!(
            "{} WHERE city = ?1 AND date >= ?2 AND date <= ?3 ORDER BY date",
            SELECT_DAY
        ))?;
        let rows = stmt
            .query_map(params![city, start, end], day_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: query_days({}, {}, {}) returned {} records",
            city,
            start,
            end,
            rows.len()
        );
        Ok(rows)
    }

    /// Stored days of one calendar month.
    pub fn query_month(&self, city: &str, year: i32, month: u32) -> anyhow::Result<Vec<DayRecord>> {
        let (start, end) = month_bounds(year, month)
            .ok_or_else(|| anyhow::anyhow!("Invalid month {}-{}", year, month))?;
        self.query_days(city, start, end)
    }

    /// Stored days of one calendar year.
    pub fn query_year(&self, city: &str, year: i32) -> anyhow::Result<Vec<DayRecord>> {
        let (start, end) =
            year_bounds(year).ok_or_else(|| anyhow::anyhow!("Invalid year {}", year))?;
        self.query_days(city, start, end)
    }

    /// Distinct city names, sorted.
    pub fn query_cities(&self) -> anyhow::Result<Vec<String>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT city FROM weather_by_day ORDER BY city")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        log::info!("query: query_cities returned {} cities", rows.len());
        Ok(rows)
    }

    /// First and last stored day for `city`, or `None` when it has no rows.
    pub fn query_date_range(&self, city: &str) -> anyhow::Result<Option<DateRange>> {
        let conn = self.conn.borrow();
        let (first, last) = conn.query_row(
            "SELECT MIN(date), MAX(date) FROM weather_by_day WHERE city = ?1",
            params![city],
            |row| {
                Ok((
                    row.get::<_, Option<NaiveDate>>(0)?,
                    row.get::<_, Option<NaiveDate>>(1)?,
                ))
            },
        )?;
        Ok(first.zip(last).map(|(first, last)| DateRange { first, last }))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::DateRange;
    use crate::Database;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Helper to create a database with two cities spanning a year boundary.
    fn sample_db() -> Database {
        let db = Database::new().unwrap();
        let csv = "\
CITY,STATION_ID,DATE,MIN_TEMP,MAX_TEMP,PRECIPITATION
\"Anchorage, AK\",ANCthr 9,2023-12-31,5,18,0.02
\"Anchorage, AK\",ANCthr 9,2024-03-02,20,34,
\"Anchorage, AK\",ANCthr 9,2024-03-01,12,30,0.00
\"Anchorage, AK\",ANCthr 9,2024-03-31,25,40,0.1
\"Anchorage, AK\",ANCthr 9,2024-04-01,28,45,0.3
\"Anchorage, AK\",ANCthr 9,2024-07-04,55,72,0
Fairbanks AK,FAIthr 9,2024-03-01,-20,-2,0.01
";
        db.load_weather_csv(csv).unwrap();
        db
    }

    #[test]
    fn query_day_found_and_missing() {
        let db = sample_db();
        let day = db.query_day("Anchorage, AK", date(2024, 3, 2)).unwrap().unwrap();
        assert_eq!(day.min_temp, Some(20.0));
        assert_eq!(day.max_temp, Some(34.0));
        assert_eq!(day.precipitation, None);

        assert!(db.query_day("Anchorage, AK", date(2024, 3, 3)).unwrap().is_none());
        assert!(db.query_day("Nome, AK", date(2024, 3, 1)).unwrap().is_none());
    }

    #[test]
    fn query_month_is_ordered_and_bounded() {
        let db = sample_db();
        let days = db.query_month("Anchorage, AK", 2024, 3).unwrap();
        let dates: Vec<NaiveDate> = days.iter().map(|d| d.date).collect();
        assert_eq!(dates, vec![date(2024, 3, 1), date(2024, 3, 2), date(2024, 3, 31)]);
        assert_eq!(days[0].precipitation, Some(0.0), "Measured zero should survive the round trip");
    }

    #[test]
    fn query_month_rejects_bad_month() {
        let db = sample_db();
        assert!(db.query_month("Anchorage, AK", 2024, 13).is_err());
    }

    #[test]
    fn query_year_excludes_other_years_and_cities() {
        let db = sample_db();
        let days = db.query_year("Anchorage, AK", 2024).unwrap();
        assert_eq!(days.len(), 5);
        assert!(days.iter().all(|d| d.date >= date(2024, 1, 1)));

        let fairbanks = db.query_year("Fairbanks AK", 2024).unwrap();
        assert_eq!(fairbanks.len(), 1);
        assert_eq!(fairbanks[0].min_temp, Some(-20.0));
    }

    #[test]
    fn query_days_empty_range() {
        let db = sample_db();
        let days = db
            .query_days("Anchorage, AK", date(2024, 5, 1), date(2024, 5, 31))
            .unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn query_cities_distinct_sorted() {
        let db = sample_db();
        assert_eq!(
            db.query_cities().unwrap(),
            vec!["Anchorage, AK".to_string(), "Fairbanks AK".to_string()]
        );
    }

    #[test]
    fn query_date_range() {
        let db = sample_db();
        assert_eq!(
            db.query_date_range("Anchorage, AK").unwrap(),
            Some(DateRange {
                first: date(2023, 12, 31),
                last: date(2024, 7, 4),
            })
        );
        assert_eq!(db.query_date_range("Nome, AK").unwrap(), None);
    }
}
