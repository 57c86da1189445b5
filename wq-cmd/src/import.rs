//! The `import` command: convert a saved ACIS StnData response to a weather CSV.

use anyhow::Context;
use log::{info, warn};
use wq_quilt::parse_stn_data;

pub fn run_import(acis: &str, city: &str, station: &str, output: &str) -> anyhow::Result<()> {
    let body = std::fs::read_to_string(acis)
        .with_context(|| format!("Failed to read ACIS response {}", acis))?;
    let import = parse_stn_data(&body)?;
    if import.skipped > 0 {
        warn!("{}: skipped {} unreadable rows", acis, import.skipped);
    }
    info!(
        "Imported {} days for {} from {}",
        import.records.len(),
        city,
        import.station_name.as_deref().unwrap_or(station)
    );

    let csv = wq_db::weather_csv(city, station, &import.records)?;
    std::fs::write(output, csv).with_context(|| format!("Failed to write {}", output))?;
    info!("Wrote {}", output);
    Ok(())
}
