//! Milestone extraction from polylines and loose line segments.

use pole_core::errors::{ErrorInfo, PoleError};
use pole_core::{distance, LineSegment, Path, PathVertex, SegmentMilestones, Warning};
use serde::{Deserialize, Serialize};

/// Maximum gap between two segment endpoints that still counts as connected.
pub const STITCH_TOLERANCE: f64 = 0.1;

/// Geometry handed over by the extraction collaborator for path modes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum PathSource {
    /// Vertices of a polyline, already in route order.
    Vertices(Vec<PathVertex>),
    /// Loose line segments in no particular order.
    Segments(Vec<LineSegment>),
}

/// A canonical path plus the warnings raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct PathExtraction {
    /// Ordered milestones.
    pub path: Path,
    /// Non-fatal diagnostics (discontinuous stitching).
    pub warnings: Vec<Warning>,
}

/// Builds the milestone path for `source`.
///
/// Ordered vertices pass through unchanged. Segment sets are either stitched
/// end to end or reduced to their midpoints depending on `milestones`.
pub fn extract_path(
    source: &PathSource,
    milestones: SegmentMilestones,
) -> Result<PathExtraction, PoleError> {
    match source {
        PathSource::Vertices(vertices) => {
            if vertices.is_empty() {
                return Err(PoleError::PathExtraction(
                    ErrorInfo::new("no-vertices", "the route polyline has no vertices")
                        .with_hint("fall back to the nearest-neighbour strategy"),
                ));
            }
            Ok(PathExtraction {
                path: Path::new(vertices.clone())?,
                warnings: Vec::new(),
            })
        }
        PathSource::Segments(segments) => match milestones {
            SegmentMilestones::Stitched => stitch_segments(segments),
            SegmentMilestones::Midpoints => Ok(PathExtraction {
                path: segment_midpoints(segments)?,
                warnings: Vec::new(),
            }),
        },
    }
}

/// Chains loose segments into a single ordered path.
///
/// Starts from the first segment and keeps appending whichever remaining
/// segment has an endpoint within [`STITCH_TOLERANCE`] of the trailing vertex.
/// At most `2 * segments.len()` attempts are made; if segments are left when
/// stitching stops, the stitched prefix is returned with a
/// [`Warning::PathPossiblyDiscontinuous`].
pub fn stitch_segments(segments: &[LineSegment]) -> Result<PathExtraction, PoleError> {
    let Some((first, rest)) = segments.split_first() else {
        return Err(no_segments());
    };

    let mut vertices = vec![first.start, first.end];
    let mut trailing = first.end;
    let mut remaining: Vec<LineSegment> = rest.to_vec();
    let max_attempts = segments.len() * 2;

    for _ in 0..max_attempts {
        if remaining.is_empty() {
            break;
        }
        let hit = remaining.iter().enumerate().find_map(|(idx, seg)| {
            if distance(&trailing, &seg.start) < STITCH_TOLERANCE {
                Some((idx, seg.end))
            } else if distance(&trailing, &seg.end) < STITCH_TOLERANCE {
                Some((idx, seg.start))
            } else {
                None
            }
        });
        match hit {
            Some((idx, next)) => {
                remaining.remove(idx);
                vertices.push(next);
                trailing = next;
            }
            // the trailing vertex did not move, so no later attempt can succeed
            None => break,
        }
    }

    let mut warnings = Vec::new();
    if !remaining.is_empty() {
        warnings.push(
            Warning::PathPossiblyDiscontinuous {
                stitched_segments: segments.len() - remaining.len(),
                unused_segments: remaining.len(),
            }
            .emit(),
        );
    }
    log::debug!(
        "stitched {} of {} segments into {} milestones",
        segments.len() - remaining.len(),
        segments.len(),
        vertices.len()
    );

    Ok(PathExtraction {
        path: Path::new(vertices)?,
        warnings,
    })
}

/// One milestone per segment, at its midpoint, in segment order.
pub fn segment_midpoints(segments: &[LineSegment]) -> Result<Path, PoleError> {
    if segments.is_empty() {
        return Err(no_segments());
    }
    Path::new(segments.iter().map(LineSegment::midpoint).collect())
}

fn no_segments() -> PoleError {
    PoleError::PathExtraction(
        ErrorInfo::new("no-segments", "no line segments found for the route")
            .with_hint("fall back to the nearest-neighbour strategy"),
    )
}
