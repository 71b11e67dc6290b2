use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use chrono::{Local, NaiveDateTime};
use pole_core::errors::{ErrorInfo, PoleError};
use serde::{Deserialize, Serialize};

use crate::serde::to_canonical_json_bytes;
use crate::table::ReportTable;

/// Supported report file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Comma separated values with a header row.
    #[default]
    Csv,
    /// Canonical JSON array of column-keyed records.
    Json,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = PoleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(PoleError::Configuration(
                ErrorInfo::new("unknown-format", "unsupported export format")
                    .with_context("format", other.to_string())
                    .with_hint("use csv or json"),
            )),
        }
    }
}

fn csv_error(err: impl ToString) -> PoleError {
    PoleError::Io(ErrorInfo::new("csv_write", err.to_string()))
}

/// Writes `table` as CSV, header first.
pub fn write_csv<W: Write>(table: &ReportTable, writer: W) -> Result<(), PoleError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&table.columns).map_err(csv_error)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(|cell| cell.to_string()))
            .map_err(csv_error)?;
    }
    wtr.flush().map_err(csv_error)
}

/// Writes `table` to `out_path` as CSV.
pub fn export_csv(table: &ReportTable, out_path: &Path) -> Result<(), PoleError> {
    let file = fs::File::create(out_path).map_err(|err| {
        PoleError::Io(
            ErrorInfo::new("csv_write", err.to_string())
                .with_context("path", out_path.display().to_string()),
        )
    })?;
    write_csv(table, file)
}

/// Writes any serializable value to `out_path` as canonical JSON.
pub fn export_json<T: Serialize>(value: &T, out_path: &Path) -> Result<(), PoleError> {
    let bytes = to_canonical_json_bytes(value)?;
    fs::write(out_path, bytes).map_err(|err| {
        PoleError::Io(
            ErrorInfo::new("json_write", err.to_string())
                .with_context("path", out_path.display().to_string()),
        )
    })
}

/// Writes `table` in `format`; JSON output is the list of row records.
pub fn export_table(
    table: &ReportTable,
    format: ExportFormat,
    out_path: &Path,
) -> Result<(), PoleError> {
    match format {
        ExportFormat::Csv => export_csv(table, out_path)?,
        ExportFormat::Json => export_json(&table.records(), out_path)?,
    }
    log::info!("exported {} rows to {}", table.len(), out_path.display());
    Ok(())
}

/// `<prefix>_YYYYMMDD_HHMMSS.<extension>` for the given instant.
pub fn timestamped_filename(prefix: &str, extension: &str, at: NaiveDateTime) -> String {
    format!("{prefix}_{}.{extension}", at.format("%Y%m%d_%H%M%S"))
}

/// [`timestamped_filename`] at the current local time.
pub fn timestamped_filename_now(prefix: &str, extension: &str) -> String {
    timestamped_filename(prefix, extension, Local::now().naive_local())
}
