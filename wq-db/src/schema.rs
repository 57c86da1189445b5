//! SQL schema for the in-memory weather store.

/// Returns the full SQL schema as a single batch string.
///
/// - `weather_by_day` - one row per city and calendar day. Temperatures are
///   in °F and precipitation in inches; any of the three may be NULL.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS weather_by_day (
        city TEXT NOT NULL,
        station_id TEXT NOT NULL,
        date TEXT NOT NULL,
        min_temp REAL,
        max_temp REAL,
        precipitation REAL,
        PRIMARY KEY (city, date)
    );
    CREATE INDEX IF NOT EXISTS idx_weather_date ON weather_by_day(date);
    "#
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn schema_is_valid_sql() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema())
            .expect("Schema SQL should be valid");
    }

    #[test]
    fn schema_creates_weather_table_and_index() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();

        for (kind, name) in [("table", "weather_by_day"), ("index", "idx_weather_date")] {
            let count: i64 = conn
                .query_row(
                    "SELECT COUNT(*) FROM sqlite_master WHERE type = ?1 AND name = ?2",
                    [kind, name],
                    |row| row.get(0),
                )
                .unwrap();
            assert_eq!(count, 1, "{} '{}' should exist", kind, name);
        }
    }

    #[test]
    fn schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(create_schema()).unwrap();
        conn.execute_batch(create_schema())
            .expect("Applying schema twice should succeed due to IF NOT EXISTS");
    }
}
