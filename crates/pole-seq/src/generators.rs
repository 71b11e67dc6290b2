use pole_core::errors::{ErrorInfo, PoleError};
use pole_core::rng::RngHandle;
use pole_core::{LineSegment, Path, PathVertex, Point};
use rand::seq::SliceRandom;
use rand::Rng;

/// Straight east-bound route with `milestones` vertices `spacing` apart.
pub fn straight_route(milestones: usize, spacing: f64) -> Result<Path, PoleError> {
    Path::new(
        (0..milestones)
            .map(|i| PathVertex::new(i as f64 * spacing, 0.0))
            .collect(),
    )
}

/// Scatters `per_milestone` poles around every vertex of `path`.
///
/// Each pole is offset by up to `spread` on both axes. Pole ids are `P0`,
/// `P1`, ... and the final list is shuffled so input order carries no hint of
/// the route.
pub fn scatter_along_path(
    path: &Path,
    per_milestone: usize,
    spread: f64,
    rng: &mut RngHandle,
) -> Result<Vec<Point>, PoleError> {
    if per_milestone == 0 {
        return Err(PoleError::Configuration(ErrorInfo::new(
            "empty-layout",
            "scatter generator requires at least one pole per milestone",
        )));
    }
    let mut poles = Vec::with_capacity(path.len() * per_milestone);
    for milestone in path.vertices() {
        for _ in 0..per_milestone {
            let id = format!("P{}", poles.len());
            let x = milestone.x + rng.jitter(spread);
            let y = milestone.y + rng.jitter(spread);
            poles.push(Point::new(id, x, y));
        }
    }
    poles.shuffle(rng);
    Ok(poles)
}

/// Uniformly random poles inside a `width` x `height` box anchored at the origin.
pub fn random_layout(count: usize, width: f64, height: f64, rng: &mut RngHandle) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let x = rng.inner_mut().gen::<f64>() * width;
            let y = rng.inner_mut().gen::<f64>() * height;
            Point::new(format!("R{i}"), x, y)
        })
        .collect()
}

/// Breaks `path` into its segments, shuffled and randomly reversed.
///
/// The first segment stays in front and keeps its direction, since stitching
/// only grows the route forward from it.
pub fn shuffled_segments(path: &Path, rng: &mut RngHandle) -> Vec<LineSegment> {
    let mut segments: Vec<LineSegment> = path
        .vertices()
        .windows(2)
        .enumerate()
        .map(|(idx, pair)| {
            if idx > 0 && rng.inner_mut().gen_bool(0.5) {
                LineSegment::new(pair[1], pair[0])
            } else {
                LineSegment::new(pair[0], pair[1])
            }
        })
        .collect();
    if let Some((_, tail)) = segments.split_first_mut() {
        tail.shuffle(rng);
    }
    segments
}
