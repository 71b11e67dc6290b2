use pole_core::config::validate_search_radius;
use pole_core::errors::PoleError;
use pole_core::{nearest, Point};

use crate::associate::Association;

/// Writes matched label contents into the anchors' attribute maps.
///
/// Each match lands under its layer name. Associations are paired with
/// anchors by id; records without a matching anchor are ignored. Returns the
/// number of attributes written.
pub fn fuse_associations(anchors: &mut [Point], associations: &[Association]) -> usize {
    let mut written = 0;
    for association in associations {
        let Some(anchor) = anchors
            .iter_mut()
            .find(|p| p.id() == &association.anchor_id)
        else {
            continue;
        };
        for (layer, hit) in &association.matches {
            anchor.set_attribute(layer.clone(), hit.content.clone());
            written += 1;
        }
    }
    written
}

/// Copies prefixed attributes from the nearest data block onto each pole.
///
/// Only keys starting with `prefix` (case-insensitive) are copied, and only
/// from a block within `radius` (inclusive). Positions are never touched.
/// Returns the number of poles that received data.
pub fn merge_data_blocks(
    poles: &mut [Point],
    blocks: &[Point],
    radius: f64,
    prefix: &str,
) -> Result<usize, PoleError> {
    validate_search_radius(radius)?;
    let prefix = prefix.to_lowercase();
    let mut enriched = 0;
    for pole in poles.iter_mut() {
        let Some(hit) = nearest(&*pole, blocks) else {
            break;
        };
        if hit.distance > radius {
            continue;
        }
        let copied: Vec<(String, String)> = hit
            .candidate
            .attributes()
            .iter()
            .filter(|(key, _)| key.to_lowercase().starts_with(&prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        if copied.is_empty() {
            continue;
        }
        for (key, value) in copied {
            pole.set_attribute(key, value);
        }
        enriched += 1;
    }
    log::info!(
        "merged data blocks into {} of {} poles (radius {radius})",
        enriched,
        poles.len()
    );
    Ok(enriched)
}
