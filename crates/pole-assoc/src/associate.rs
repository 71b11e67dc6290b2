use std::collections::{BTreeMap, BTreeSet};

use pole_core::config::validate_max_distance;
use pole_core::errors::{ErrorInfo, PoleError};
use pole_core::{nearest, EngineConfig, Point, PointId, Warning};
use serde::{Deserialize, Serialize};

use crate::labels::SecondaryLayer;

/// Best label found for one anchor on one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerMatch {
    /// Identifier of the matched label point.
    pub point_id: PointId,
    /// Label content.
    pub content: String,
    /// Planar distance between anchor and label.
    pub distance: f64,
}

/// Matches recorded for one anchor, keyed by layer name.
///
/// A missing layer key means nothing was close enough on that layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// Identifier of the anchor point.
    pub anchor_id: PointId,
    /// Best match per secondary layer.
    pub matches: BTreeMap<String, LayerMatch>,
}

impl Association {
    /// Content matched on `layer`, if any.
    pub fn content(&self, layer: &str) -> Option<&str> {
        self.matches.get(layer).map(|m| m.content.as_str())
    }
}

/// Associations in anchor order plus label warnings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AssociationOutcome {
    /// One record per anchor, in anchor order.
    pub associations: Vec<Association>,
    /// Labels skipped while preparing candidates.
    pub warnings: Vec<Warning>,
}

impl AssociationOutcome {
    /// Number of anchors with at least one match.
    pub fn matched_anchors(&self) -> usize {
        self.associations
            .iter()
            .filter(|a| !a.matches.is_empty())
            .count()
    }
}

/// Nearest-label matcher bounded by a maximum distance.
///
/// Matching is many-to-one: several anchors may pick the same label. Each
/// anchor/layer pair is a linear scan, ties going to the earliest label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityAssociator {
    max_distance: f64,
}

impl ProximityAssociator {
    /// Creates an associator; `None` leaves the distance unbounded.
    pub fn new(max_distance: Option<f64>) -> Result<Self, PoleError> {
        let max_distance = max_distance.unwrap_or(f64::INFINITY);
        validate_max_distance(max_distance)?;
        Ok(Self { max_distance })
    }

    /// Associator without a distance bound.
    pub fn unbounded() -> Self {
        Self {
            max_distance: f64::INFINITY,
        }
    }

    /// Uses `max_distance` from `config`.
    pub fn from_config(config: &EngineConfig) -> Result<Self, PoleError> {
        Self::new(config.max_distance)
    }

    /// Effective distance bound.
    pub fn max_distance(&self) -> f64 {
        self.max_distance
    }

    /// Finds, for every anchor, the nearest label on each layer.
    pub fn associate(
        &self,
        anchors: &[Point],
        layers: &[SecondaryLayer],
    ) -> Result<AssociationOutcome, PoleError> {
        let mut seen = BTreeSet::new();
        for layer in layers {
            if !seen.insert(layer.name.as_str()) {
                return Err(PoleError::Association(
                    ErrorInfo::new("duplicate-layer", "a secondary layer was given twice")
                        .with_context("layer", layer.name.clone()),
                ));
            }
        }

        let mut warnings = Vec::new();
        let prepared: Vec<_> = layers
            .iter()
            .map(|layer| {
                let (candidates, mut layer_warnings) = layer.candidates();
                warnings.append(&mut layer_warnings);
                (layer.name.as_str(), candidates)
            })
            .collect();

        let associations: Vec<Association> = anchors
            .iter()
            .map(|anchor| {
                let mut matches = BTreeMap::new();
                for (name, candidates) in &prepared {
                    let Some(hit) = nearest(anchor, candidates) else {
                        continue;
                    };
                    if hit.distance <= self.max_distance {
                        matches.insert(
                            name.to_string(),
                            LayerMatch {
                                point_id: hit.candidate.point.id().clone(),
                                content: hit.candidate.content.to_string(),
                                distance: hit.distance,
                            },
                        );
                    }
                }
                Association {
                    anchor_id: anchor.id().clone(),
                    matches,
                }
            })
            .collect();

        let outcome = AssociationOutcome {
            associations,
            warnings,
        };
        log::info!(
            "associated {} of {} anchors across {} layers (max distance {})",
            outcome.matched_anchors(),
            anchors.len(),
            layers.len(),
            self.max_distance
        );
        Ok(outcome)
    }
}
