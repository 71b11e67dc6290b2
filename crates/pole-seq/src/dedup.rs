use std::collections::HashMap;

use pole_core::{Point, PointId, Warning};

/// Collapses points that share an identifier.
///
/// The surviving entry keeps the position of the first occurrence and the
/// data of the last one, the way a handle-keyed map rebuild behaves. Returns
/// the unique points and, when anything was removed, a warning.
pub fn dedupe_by_id(points: Vec<Point>) -> (Vec<Point>, Option<Warning>) {
    let total = points.len();
    let mut index: HashMap<PointId, usize> = HashMap::with_capacity(total);
    let mut unique: Vec<Point> = Vec::with_capacity(total);

    for point in points {
        match index.get(point.id()) {
            Some(&slot) => unique[slot] = point,
            None => {
                index.insert(point.id().clone(), unique.len());
                unique.push(point);
            }
        }
    }

    let removed = total - unique.len();
    let warning = (removed > 0).then(|| Warning::DuplicateIdsRemoved { count: removed }.emit());
    (unique, warning)
}
