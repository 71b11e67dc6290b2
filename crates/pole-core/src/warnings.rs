//! Recoverable diagnostics returned next to engine results.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::PointId;

/// Non-fatal condition observed while sequencing or associating.
///
/// Warnings never abort a batch; they travel with the result so the
/// presentation layer can show them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Warning {
    /// Line stitching ran out of attempts before consuming every segment.
    PathPossiblyDiscontinuous {
        /// Segments that made it into the stitched path.
        stitched_segments: usize,
        /// Segments left over when stitching gave up.
        unused_segments: usize,
    },
    /// A label expected to be numeric could not be parsed and was skipped.
    UnparsableLabel {
        /// Secondary layer the label came from.
        layer: String,
        /// Identifier of the offending label point.
        point_id: PointId,
        /// Raw label content.
        content: String,
    },
    /// Strict mode dropped points never captured by a milestone.
    LeftoversDiscarded {
        /// Number of dropped points.
        count: usize,
    },
    /// Lenient mode appended points never captured by a milestone.
    LeftoversAppended {
        /// Number of appended points.
        count: usize,
    },
    /// Points sharing an identifier were collapsed into one.
    DuplicateIdsRemoved {
        /// Number of removed duplicates.
        count: usize,
    },
    /// Path following was requested but no path was available.
    PathFallback {
        /// Why the path could not be used.
        reason: String,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::PathPossiblyDiscontinuous {
                stitched_segments,
                unused_segments,
            } => write!(
                f,
                "path possibly discontinuous: stitched {stitched_segments} segments, {unused_segments} unused"
            ),
            Warning::UnparsableLabel {
                layer,
                point_id,
                content,
            } => write!(
                f,
                "label '{content}' ({point_id}) on layer '{layer}' is not a number; skipped"
            ),
            Warning::LeftoversDiscarded { count } => {
                write!(f, "{count} points out of range of the route were discarded")
            }
            Warning::LeftoversAppended { count } => {
                write!(f, "{count} points out of range of the route were appended")
            }
            Warning::DuplicateIdsRemoved { count } => {
                write!(f, "{count} duplicate point ids removed")
            }
            Warning::PathFallback { reason } => {
                write!(f, "path following unavailable ({reason}); using nearest neighbour")
            }
        }
    }
}

impl Warning {
    /// Logs the warning through the `log` facade and returns it unchanged.
    pub fn emit(self) -> Self {
        log::warn!("{self}");
        self
    }
}
