//! The `cities` command: list the cities in a weather CSV.

use wq_db::Database;

pub fn run_cities(data: &str) -> anyhow::Result<()> {
    let db = crate::open_store(data)?;
    let text = render(&db)?;
    crate::emit(&text, None)
}

/// One line per city with its first and last stored day.
pub fn render(db: &Database) -> anyhow::Result<String> {
    let mut lines = Vec::new();
    for city in db.query_cities()? {
        match db.query_date_range(&city)? {
            Some(range) => lines.push(format!("{}\t{}\t{}", city, range.first, range.last)),
            None => lines.push(city),
        }
    }
    Ok(lines.join("\n"))
}
