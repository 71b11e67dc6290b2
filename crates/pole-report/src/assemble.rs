use std::collections::BTreeSet;

use pole_assoc::{Association, NumberAssignment};
use pole_core::errors::PoleError;
use pole_core::{EngineConfig, Point};

use crate::table::{CellValue, ReportTable};

/// Leading columns of every sequence report.
pub const FIXED_COLUMNS: [&str; 5] = ["number", "id", "x", "y", "z"];

/// Leading columns of every association report.
pub const ASSOCIATION_COLUMNS: [&str; 3] = ["anchor_id", "x", "y"];

/// Prepended to attribute keys that would shadow a fixed column.
pub const SHADOWED_KEY_PREFIX: &str = "attr:";

/// Attribute keys placed right after the fixed columns when present.
pub const PRIORITY_KEYS: [&str; 2] = ["name", "layer"];

/// Shapes sequences and associations into [`ReportTable`]s.
///
/// Attribute columns follow a fixed layout: the priority keys first, then
/// keys carrying the attribute prefix in sorted order, then every other key
/// sorted. Points missing a key get an empty cell. A key named like a fixed
/// column gets its header prefixed with [`SHADOWED_KEY_PREFIX`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReportAssembler {
    attribute_prefix: String,
}

impl Default for ReportAssembler {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

impl ReportAssembler {
    /// Assembler grouping attribute columns under `attribute_prefix`.
    pub fn new(attribute_prefix: impl Into<String>) -> Self {
        Self {
            attribute_prefix: attribute_prefix.into(),
        }
    }

    /// Uses `attribute_prefix` from `config`.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.attribute_prefix.clone())
    }

    /// Attribute keys of `points` in report column order.
    pub fn attribute_columns(&self, points: &[Point]) -> Vec<String> {
        let keys: BTreeSet<&str> = points
            .iter()
            .flat_map(|p| p.attributes().keys().map(String::as_str))
            .collect();
        let prefix = self.attribute_prefix.to_lowercase();
        let is_prefixed = |key: &str| !prefix.is_empty() && key.to_lowercase().starts_with(&prefix);

        let priority = PRIORITY_KEYS
            .iter()
            .copied()
            .filter(|key| keys.contains(key));
        let prefixed = keys
            .iter()
            .copied()
            .filter(|key| !PRIORITY_KEYS.contains(key) && is_prefixed(key));
        let rest = keys
            .iter()
            .copied()
            .filter(|key| !PRIORITY_KEYS.contains(key) && !is_prefixed(key));

        priority
            .chain(prefixed)
            .chain(rest)
            .map(str::to_string)
            .collect()
    }

    /// One row per point, numbered from 1 in sequence order.
    pub fn sequence_report(&self, sequence: &[Point]) -> Result<ReportTable, PoleError> {
        let attributes = self.attribute_columns(sequence);
        let mut columns: Vec<String> = FIXED_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(header_names(&FIXED_COLUMNS, &attributes));

        let mut table = ReportTable::new(columns);
        for (index, point) in sequence.iter().enumerate() {
            let mut row = vec![
                CellValue::Integer(index as i64 + 1),
                CellValue::from(point.id().as_str()),
                CellValue::Float(point.x()),
                CellValue::Float(point.y()),
                CellValue::from(point.z()),
            ];
            row.extend(attributes.iter().map(|key| CellValue::from(point.attribute(key))));
            table.push_row(row)?;
        }
        log::debug!(
            "sequence report: {} rows, {} columns",
            table.len(),
            table.columns.len()
        );
        Ok(table)
    }

    /// One row per association, one content column per layer.
    ///
    /// Coordinates come from `anchors` by id; `layers` fixes the column order.
    pub fn association_report(
        &self,
        anchors: &[Point],
        associations: &[Association],
        layers: &[String],
    ) -> Result<ReportTable, PoleError> {
        let mut columns: Vec<String> =
            ASSOCIATION_COLUMNS.iter().map(|c| c.to_string()).collect();
        columns.extend(header_names(&ASSOCIATION_COLUMNS, layers));

        let mut table = ReportTable::new(columns);
        for association in associations {
            let anchor = anchors.iter().find(|p| p.id() == &association.anchor_id);
            let mut row = vec![
                CellValue::from(association.anchor_id.as_str()),
                CellValue::from(anchor.map(Point::x)),
                CellValue::from(anchor.map(Point::y)),
            ];
            row.extend(
                layers
                    .iter()
                    .map(|layer| CellValue::from(association.content(layer))),
            );
            table.push_row(row)?;
        }
        Ok(table)
    }

    /// Number assignments in their (already sorted) order.
    pub fn number_report(&self, numbers: &[NumberAssignment]) -> Result<ReportTable, PoleError> {
        let columns = ["number", "anchor_id", "x", "y", "distance"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let mut table = ReportTable::new(columns);
        for assignment in numbers {
            table.push_row(vec![
                CellValue::Integer(assignment.number),
                CellValue::from(assignment.anchor_id.as_str()),
                CellValue::Float(assignment.x),
                CellValue::Float(assignment.y),
                CellValue::Float(assignment.distance),
            ])?;
        }
        Ok(table)
    }
}

/// Header for each key, renaming keys that collide with `reserved`.
///
/// Renamed headers also avoid every key in `keys`, so each header stays unique.
fn header_names(reserved: &[&str], keys: &[String]) -> Vec<String> {
    let all_keys: BTreeSet<&str> = keys.iter().map(String::as_str).collect();
    let mut used: BTreeSet<String> = BTreeSet::new();
    keys.iter()
        .map(|key| {
            let mut name = key.clone();
            if reserved.contains(&key.as_str()) {
                name = format!("{SHADOWED_KEY_PREFIX}{key}");
                while reserved.contains(&name.as_str())
                    || all_keys.contains(name.as_str())
                    || used.contains(&name)
                {
                    name = format!("{SHADOWED_KEY_PREFIX}{name}");
                }
            }
            used.insert(name.clone());
            name
        })
        .collect()
}
