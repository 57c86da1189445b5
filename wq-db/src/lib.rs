//! In-memory SQLite store of daily weather records per city.
//!
//! Stands in for the remote weather service: CSV fixtures (or records
//! imported from ACIS) are loaded into an in-memory database and queried by
//! city and calendar window, returning [`wq_quilt::DayRecord`]s ordered by
//! date.
//!
//! # Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use wq_db::Database;
//!
//! let db = Database::new().unwrap();
//! db.load_weather_csv(
//!     "CITY,STATION_ID,DATE,MIN_TEMP,MAX_TEMP,PRECIPITATION\n\
//!      \"Anchorage, AK\",ANCthr 9,2024-03-01,12,30,0.00\n",
//! )
//! .unwrap();
//!
//! let march = db.query_month("Anchorage, AK", 2024, 3).unwrap();
//! assert_eq!(march.len(), 1);
//! assert_eq!(march[0].date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the SQL schema.

pub mod schema;
mod loader;
mod queries;
pub mod models;

pub use loader::{weather_csv, CSV_HEADERS};

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database of weather rows.
///
/// Cloning is cheap and every clone shares the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create an empty in-memory database with the schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_weather_csv(
            "CITY,STATION_ID,DATE,MIN_TEMP,MAX_TEMP,PRECIPITATION\nJuneau AK,JNU,2024-03-01,30,41,0.3\n",
        )
        .unwrap();
        assert_eq!(
            db2.query_cities().unwrap(),
            vec!["Juneau AK".to_string()],
            "Clone should see same data via shared Rc"
        );
    }

    #[test]
    fn sample_fixture_loads() {
        let db = Database::new().unwrap();
        let summary = db
            .load_weather_csv(include_str!("../../fixtures/sample_weather.csv"))
            .unwrap();
        assert_eq!(summary.loaded, 732);
        assert_eq!(summary.skipped, 0);
        assert_eq!(db.query_cities().unwrap().len(), 2);
        assert_eq!(db.query_month("Anchorage, AK", 2024, 2).unwrap().len(), 29);
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_cities().unwrap().is_empty(), "New database should have no cities");
    }
}
