//! # CSV Export
//!
//! Writes the full record collection (unfiltered, collection order) as CSV
//! with a fixed header row. Fields containing commas, quotes or newlines are
//! quoted, so free-text notes cannot break the row structure.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use log::info;

use crate::backend::FuelLogRecord;

pub const CSV_HEADERS: [&str; 6] = [
    "Date",
    "Liters",
    "Price Per Liter",
    "Total Cost",
    "Vehicle Type",
    "Notes",
];

#[derive(Debug)]
pub enum ExportError {
    Io(std::io::Error),
    Csv(csv::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Io(e) => write!(f, "export I/O error: {e}"),
            ExportError::Csv(e) => write!(f, "export encoding error: {e}"),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<csv::Error> for ExportError {
    fn from(e: csv::Error) -> Self {
        ExportError::Csv(e)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e)
    }
}

/// Renders `records` as a CSV document.
pub fn export_csv(records: &[FuelLogRecord]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADERS)?;
    for r in records {
        writer.write_record([
            r.date.clone(),
            r.liters.to_string(),
            r.price_per_liter.to_string(),
            r.total_cost.to_string(),
            r.vehicle_type.clone(),
            r.notes.clone().unwrap_or_default(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `fuel-logs-2025-04-18.csv`
pub fn export_file_name(today: NaiveDate) -> String {
    format!("fuel-logs-{}.csv", today.format("%Y-%m-%d"))
}

/// Writes the export into `dir` and returns the file path.
pub fn write_export(
    dir: &Path,
    records: &[FuelLogRecord],
    today: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let content = export_csv(records)?;
    fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(today));
    fs::write(&path, content)?;
    info!("Exported {} records to {}", records.len(), path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn test_header_and_rows() {
        let mut second = record("2", "2025-04-10", 40.0, 1.4, 56.0, "Sedan");
        second.notes = None;
        let records = vec![record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan"), second];

        let csv = export_csv(&records).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Date,Liters,Price Per Liter,Total Cost,Vehicle Type,Notes");
        assert_eq!(lines[1], "2025-04-18,45,1.35,60.75,Sedan,Regular fill-up");
        assert_eq!(lines[2], "2025-04-10,40,1.4,56,Sedan,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_notes_with_delimiters_are_quoted() {
        let mut r = record("1", "2025-04-18", 45.0, 1.35, 60.75, "Sedan");
        r.notes = Some("cheap, \"discount\" pump".to_string());
        let csv = export_csv(&[r]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        assert_eq!(row, "2025-04-18,45,1.35,60.75,Sedan,\"cheap, \"\"discount\"\" pump\"");

        let mut reader = csv::Reader::from_reader(csv.as_bytes());
        let parsed = reader.records().next().unwrap().unwrap();
        assert_eq!(parsed.len(), 6);
        assert_eq!(&parsed[5], "cheap, \"discount\" pump");
    }

    #[test]
    fn test_empty_collection_is_header_only() {
        let csv = export_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }

    #[test]
    fn test_write_export_names_file_by_date() {
        let dir = tempfile::tempdir().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 4, 18).unwrap();
        let path = write_export(dir.path(), &[], today).unwrap();
        assert_eq!(path.file_name().unwrap(), "fuel-logs-2025-04-18.csv");
        assert!(fs::read_to_string(path).unwrap().starts_with("Date,"));
    }
}
