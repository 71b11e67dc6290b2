use std::collections::BTreeMap;
use std::fmt;

use pole_core::errors::{ErrorInfo, PoleError};
use serde::{Deserialize, Serialize};

/// A single report cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Whole number (sequence numbers, parsed labels).
    Integer(i64),
    /// Coordinate or distance.
    Float(f64),
    /// Free text.
    Text(String),
    /// Missing value.
    Empty,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Empty, CellValue::Float)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

impl From<Option<&str>> for CellValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(CellValue::Empty, CellValue::from)
    }
}

/// Rows of cells under a fixed, ordered header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReportTable {
    /// Column names in display order.
    pub columns: Vec<String>,
    /// Rows, each exactly as wide as `columns`.
    pub rows: Vec<Vec<CellValue>>,
}

impl ReportTable {
    /// Empty table with the given header.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, rejecting rows whose width differs from the header.
    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<(), PoleError> {
        if row.len() != self.columns.len() {
            return Err(PoleError::Serde(
                ErrorInfo::new("row_width", "row width does not match the header")
                    .with_context("columns", self.columns.len().to_string())
                    .with_context("cells", row.len().to_string()),
            ));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Position of `name` in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell at `row` under column `name`.
    pub fn cell(&self, row: usize, name: &str) -> Option<&CellValue> {
        let column = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows as column-keyed records, the shape handed to JSON consumers.
    pub fn records(&self) -> Vec<BTreeMap<String, CellValue>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}
