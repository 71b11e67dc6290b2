//! Strategy dispatch for a whole numbering pass.

use pole_core::errors::{ErrorInfo, PoleError};
use pole_core::{EngineConfig, Point, SortStrategy, Warning};

use crate::dedup::dedupe_by_id;
use crate::path::{extract_path, PathSource};
use crate::pool::{PoolSequencer, SequenceOutcome};
use crate::route::{nearest_neighbor_route, sort_by_reference, sort_by_x, sort_by_y};

/// Orders `points` with the strategy selected in `config`.
///
/// Duplicate identifiers are collapsed first. Path following falls back to
/// the nearest-neighbour route, with a [`Warning::PathFallback`], when no
/// path source is given or no path can be extracted from it. Configuration
/// problems are errors; an empty input is an `Empty` outcome, not an error.
pub fn sequence_points(
    points: Vec<Point>,
    path_source: Option<&PathSource>,
    config: &EngineConfig,
) -> Result<SequenceOutcome, PoleError> {
    config.validate()?;
    let (points, duplicate_warning) = dedupe_by_id(points);

    let mut outcome = match config.sort_strategy {
        SortStrategy::X => SequenceOutcome::complete(sort_by_x(points), SortStrategy::X),
        SortStrategy::Y => SequenceOutcome::complete(sort_by_y(points), SortStrategy::Y),
        SortStrategy::RefDistance => {
            let reference = config.reference_point.ok_or_else(|| {
                PoleError::Configuration(ErrorInfo::new(
                    "missing-reference-point",
                    "the ref_distance strategy needs a reference point",
                ))
            })?;
            SequenceOutcome::complete(
                sort_by_reference(points, reference),
                SortStrategy::RefDistance,
            )
        }
        SortStrategy::NearestNeighbor => SequenceOutcome::complete(
            nearest_neighbor_route(points),
            SortStrategy::NearestNeighbor,
        ),
        SortStrategy::PathFollow => follow_path(points, path_source, config)?,
    };

    if let Some(warning) = duplicate_warning {
        outcome.warnings.insert(0, warning);
    }
    Ok(outcome)
}

fn follow_path(
    points: Vec<Point>,
    path_source: Option<&PathSource>,
    config: &EngineConfig,
) -> Result<SequenceOutcome, PoleError> {
    let extraction = match path_source {
        Some(source) => extract_path(source, config.segment_milestones),
        None => Err(PoleError::PathExtraction(ErrorInfo::new(
            "no-path-source",
            "no route geometry supplied",
        ))),
    };

    match extraction {
        Ok(extraction) => {
            let sequencer = PoolSequencer::from_config(config)?;
            let mut outcome = sequencer.sequence(points, &extraction.path);
            let mut warnings = extraction.warnings;
            warnings.append(&mut outcome.warnings);
            outcome.warnings = warnings;
            Ok(outcome)
        }
        Err(PoleError::PathExtraction(info)) => {
            let warning = Warning::PathFallback {
                reason: info.message,
            }
            .emit();
            let mut outcome = SequenceOutcome::complete(
                nearest_neighbor_route(points),
                SortStrategy::NearestNeighbor,
            );
            outcome.warnings.push(warning);
            Ok(outcome)
        }
        Err(other) => Err(other),
    }
}
