use pole_core::{nearest, Point, PointId, Warning};
use serde::{Deserialize, Serialize};

use crate::associate::ProximityAssociator;
use crate::labels::SecondaryLayer;

/// An anchor carrying the integer label closest to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberAssignment {
    /// Parsed label value.
    pub number: i64,
    /// Identifier of the anchor.
    pub anchor_id: PointId,
    /// Anchor X coordinate.
    pub x: f64,
    /// Anchor Y coordinate.
    pub y: f64,
    /// Distance between anchor and label.
    pub distance: f64,
}

/// Matches every anchor to its nearest integer label on `labels`.
///
/// Labels are always read as integers whatever the layer's declared kind.
/// Anchors without a label within the associator's bound are left out. The
/// result is stable-sorted by number, so anchors sharing a label keep their
/// input order.
pub fn associate_numbers(
    associator: &ProximityAssociator,
    anchors: &[Point],
    labels: &SecondaryLayer,
) -> (Vec<NumberAssignment>, Vec<Warning>) {
    let layer = SecondaryLayer::integer(labels.name.clone(), labels.points.clone())
        .with_content_key(labels.content_key.clone());
    let (candidates, warnings) = layer.candidates();

    let mut assignments = Vec::new();
    for anchor in anchors {
        let Some(hit) = nearest(anchor, &candidates) else {
            break;
        };
        if hit.distance > associator.max_distance() {
            continue;
        }
        if let Some(number) = hit.candidate.number {
            assignments.push(NumberAssignment {
                number,
                anchor_id: anchor.id().clone(),
                x: anchor.x(),
                y: anchor.y(),
                distance: hit.distance,
            });
        }
    }
    assignments.sort_by_key(|a| a.number);

    log::info!(
        "numbered {} of {} anchors from layer '{}'",
        assignments.len(),
        anchors.len(),
        labels.name
    );
    (assignments, warnings)
}
