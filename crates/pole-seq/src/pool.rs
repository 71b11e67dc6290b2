//! Radius capture of pool points along a guide path.

use pole_core::config::validate_search_radius;
use pole_core::errors::{ErrorInfo, PoleError};
use pole_core::{
    distance, CapturePolicy, EngineConfig, LeftoverOrder, Path, PathVertex, Point, PointId,
    SortStrategy, Warning,
};
use serde::{Deserialize, Serialize};

/// Working set of points not yet assigned to the output.
///
/// Points live in fixed slots so the pool can be scanned in input order while
/// claimed slots are emptied; a point can only be taken once.
#[derive(Debug, Clone)]
pub struct Pool {
    slots: Vec<Option<Point>>,
    remaining: usize,
}

impl Pool {
    /// Creates a pool holding `points` in their input order.
    pub fn new(points: Vec<Point>) -> Self {
        let remaining = points.len();
        Self {
            slots: points.into_iter().map(Some).collect(),
            remaining,
        }
    }

    /// Number of points still in the pool.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// True once every point has been claimed.
    pub fn is_drained(&self) -> bool {
        self.remaining == 0
    }

    /// Unclaimed points within `radius` of `center` (closed interval), as
    /// `(slot, distance)` pairs in pool order.
    pub fn candidates_within(&self, center: &PathVertex, radius: f64) -> Vec<(usize, f64)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, point)| {
                let point = point.as_ref()?;
                let d = distance(point, center);
                (d <= radius).then_some((slot, d))
            })
            .collect()
    }

    /// Removes the point in `slot` from the pool.
    pub fn claim(&mut self, slot: usize) -> Option<Point> {
        let taken = self.slots.get_mut(slot)?.take();
        if taken.is_some() {
            self.remaining -= 1;
        }
        taken
    }

    /// Empties the pool, returning leftovers in their input order.
    pub fn drain(&mut self) -> Vec<Point> {
        self.remaining = 0;
        self.slots.iter_mut().filter_map(Option::take).collect()
    }
}

/// Whether the output holds every input point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SequenceStatus {
    /// The input was non-empty and has been ordered.
    Complete,
    /// There was nothing to order.
    Empty,
}

/// Ordered output of a sequencing call.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceOutcome {
    /// Points in numbering order.
    pub sequence: Vec<Point>,
    /// Identifiers dropped by strict mode, in input order.
    pub discarded: Vec<PointId>,
    /// Number of leftovers appended by lenient mode.
    pub appended: usize,
    /// Strategy that actually produced the order (after any fallback).
    pub strategy: SortStrategy,
    /// Distinguishes "nothing to do" from a completed run.
    pub status: SequenceStatus,
    /// Non-fatal diagnostics.
    pub warnings: Vec<Warning>,
}

impl SequenceOutcome {
    /// Outcome for a strategy that keeps every point.
    pub fn complete(sequence: Vec<Point>, strategy: SortStrategy) -> Self {
        let status = if sequence.is_empty() {
            SequenceStatus::Empty
        } else {
            SequenceStatus::Complete
        };
        Self {
            sequence,
            discarded: Vec::new(),
            appended: 0,
            strategy,
            status,
            warnings: Vec::new(),
        }
    }

    /// Number of points dropped by strict mode.
    pub fn discarded_count(&self) -> usize {
        self.discarded.len()
    }

    /// Converts an empty outcome into [`PoleError::EmptyInput`].
    pub fn ensure_non_empty(&self) -> Result<(), PoleError> {
        if self.status == SequenceStatus::Empty {
            return Err(PoleError::EmptyInput(ErrorInfo::new(
                "empty-pool",
                "no points to number",
            )));
        }
        Ok(())
    }
}

/// Radius-capture sequencer that numbers poles as the route is walked.
///
/// Milestones are visited in path order. Each one claims the pool points
/// within `search_radius`, nearest first. A point belongs to the first
/// milestone that reaches it even when a later milestone is closer, so the
/// numbering never jumps back along the route.
#[derive(Debug, Clone, PartialEq)]
pub struct PoolSequencer {
    search_radius: f64,
    strict_mode: bool,
    leftover_order: LeftoverOrder,
    capture: CapturePolicy,
}

impl PoolSequencer {
    /// Creates a sequencer; the radius must be positive and finite.
    pub fn new(search_radius: f64, strict_mode: bool) -> Result<Self, PoleError> {
        validate_search_radius(search_radius)?;
        Ok(Self {
            search_radius,
            strict_mode,
            leftover_order: LeftoverOrder::Input,
            capture: CapturePolicy::WithinRadius,
        })
    }

    /// Builds a sequencer from the path-follow fields of `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, PoleError> {
        Ok(Self::new(config.search_radius, config.strict_mode)?
            .with_leftover_order(config.leftover_order)
            .with_capture(config.capture))
    }

    /// Selects how lenient-mode leftovers are ordered.
    pub fn with_leftover_order(mut self, order: LeftoverOrder) -> Self {
        self.leftover_order = order;
        self
    }

    /// Selects how many points a milestone may claim.
    pub fn with_capture(mut self, capture: CapturePolicy) -> Self {
        self.capture = capture;
        self
    }

    /// Orders `points` along `path`.
    pub fn sequence(&self, points: Vec<Point>, path: &Path) -> SequenceOutcome {
        let total = points.len();
        let mut pool = Pool::new(points);
        let mut sequence = Vec::with_capacity(total);

        for (idx, milestone) in path.vertices().iter().enumerate() {
            if pool.is_drained() {
                break;
            }
            let mut close_ones = pool.candidates_within(milestone, self.search_radius);
            if close_ones.is_empty() {
                continue;
            }
            close_ones.sort_by(|a, b| a.1.total_cmp(&b.1));
            if self.capture == CapturePolicy::NearestOnly {
                close_ones.truncate(1);
            }
            log::debug!("milestone {idx} captured {} points", close_ones.len());
            sequence.extend(close_ones.into_iter().filter_map(|(slot, _)| pool.claim(slot)));
        }

        let mut leftovers = pool.drain();
        let mut outcome = SequenceOutcome::complete(Vec::new(), SortStrategy::PathFollow);
        if total == 0 {
            return outcome;
        }

        if !leftovers.is_empty() {
            if self.strict_mode {
                outcome.discarded = leftovers.iter().map(|p| p.id().clone()).collect();
                outcome.warnings.push(
                    Warning::LeftoversDiscarded {
                        count: leftovers.len(),
                    }
                    .emit(),
                );
            } else {
                if self.leftover_order == LeftoverOrder::NearestMilestone {
                    sort_by_closest_milestone(&mut leftovers, path);
                }
                outcome.appended = leftovers.len();
                outcome.warnings.push(
                    Warning::LeftoversAppended {
                        count: leftovers.len(),
                    }
                    .emit(),
                );
                sequence.extend(leftovers);
            }
        }

        log::info!(
            "path sequencing: {} milestones, {} of {} points ordered (radius {}, strict {})",
            path.len(),
            sequence.len(),
            total,
            self.search_radius,
            self.strict_mode
        );
        outcome.status = if sequence.is_empty() {
            SequenceStatus::Empty
        } else {
            SequenceStatus::Complete
        };
        outcome.sequence = sequence;
        outcome
    }
}

fn sort_by_closest_milestone(points: &mut [Point], path: &Path) {
    let closest = |point: &Point| {
        path.vertices()
            .iter()
            .map(|m| distance(point, m))
            .fold(f64::INFINITY, f64::min)
    };
    points.sort_by(|a, b| closest(a).total_cmp(&closest(b)));
}
