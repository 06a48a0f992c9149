//! CSV export of the per-site table.

use crate::table::SiteTableRow;
use chrono::NaiveDate;
use csv::{Terminator, WriterBuilder};
use occupancy_common::{OccupancyError, Result};
use tracing::{debug, instrument};

/// Column headers of the exported table, in order.
pub const CSV_HEADERS: [&str; 10] = [
    "Site Name",
    "Site Type",
    "% Occupied",
    "# Occupied Nights",
    "# Available Nights",
    "Avg Length of Stay",
    "% Occupied Weekend",
    "# Blocked Nights",
    "ADR",
    "RevPAR",
];

/// Render `rows` as CSV with a header line and `\n` line endings.
#[instrument(skip(rows), fields(rows = rows.len()))]
pub fn export_table_csv(rows: &[SiteTableRow]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| OccupancyError::export_with_source("Failed to write CSV header", e))?;

    for row in rows {
        writer
            .write_record(csv_record(row))
            .map_err(|e| {
                OccupancyError::export_with_source(
                    format!("Failed to write CSV row for {}", row.site_id),
                    e,
                )
            })?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| OccupancyError::export_with_source("Failed to flush CSV", e.into_error()))?;
    let csv = String::from_utf8(bytes)
        .map_err(|e| OccupancyError::export_with_source("CSV output is not UTF-8", e))?;

    debug!("Exported {} site rows to CSV", rows.len());
    Ok(csv)
}

fn csv_record(row: &SiteTableRow) -> [String; 10] {
    [
        row.site_name.clone(),
        row.site_type.clone(),
        format!("{:.1}", row.occupancy_percentage),
        row.on.to_string(),
        row.an.to_string(),
        format!("{:.1}", row.alos),
        format!("{:.1}", row.weekend_occupancy_percentage),
        row.blocked_nights.to_string(),
        format!("{:.2}", row.adr),
        format!("{:.2}", row.revpar),
    ]
}

/// Download name for a report starting on `start`.
pub fn export_file_name(start: NaiveDate) -> String {
    format!("occupancy-report-{}.csv", start.format("%Y-%m-%d"))
}
