//! The `detail` command: select one day and print its detail view.

use wq_quilt::{DetailView, SelectionState};
use wq_utils::dates::parse_date;

pub fn run_detail(data: &str, city: &str, date: &str) -> anyhow::Result<()> {
    let date = parse_date(date)?;
    let db = crate::open_store(data)?;
    let day = db
        .query_day(city, date)?
        .ok_or_else(|| anyhow::anyhow!("No weather data for {} on {}", city, date))?;

    let mut selection = SelectionState::new();
    selection.select(&day)?;
    let text = selection.detail().map(render).unwrap_or_default();
    crate::emit(&text, None)
}

/// Aligned `label: value` lines.
pub fn render(detail: &DetailView) -> String {
    let rows = detail.rows();
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(label, value)| format!("{:<width$}  {}", format!("{}:", label), value, width = width + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
