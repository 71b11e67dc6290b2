//! Total orders over points and the greedy nearest-neighbour route.

use pole_core::{distance, LineSegment, PathVertex, Planar, Point};

/// Stable sort by X coordinate (left to right).
pub fn sort_by_x(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| a.x().total_cmp(&b.x()));
    points
}

/// Stable sort by Y coordinate (bottom to top).
pub fn sort_by_y(mut points: Vec<Point>) -> Vec<Point> {
    points.sort_by(|a, b| a.y().total_cmp(&b.y()));
    points
}

/// Stable sort by distance to `reference`, closest first.
pub fn sort_by_reference(points: Vec<Point>, reference: PathVertex) -> Vec<Point> {
    let mut keyed: Vec<(f64, Point)> = points
        .into_iter()
        .map(|point| (distance(&point, &reference), point))
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.into_iter().map(|(_, point)| point).collect()
}

/// Greedy nearest-neighbour route.
///
/// Starts at the first input point and repeatedly moves to the closest
/// unvisited point, ties going to the earliest in input order. This is the
/// usual O(n^2) heuristic for an open travelling-salesman path: cheap and
/// deterministic, not optimal.
pub fn nearest_neighbor_route(points: Vec<Point>) -> Vec<Point> {
    let total = points.len();
    let mut slots: Vec<Option<Point>> = points.into_iter().map(Some).collect();
    let mut route = Vec::with_capacity(total);

    let Some(first) = slots.first_mut().and_then(Option::take) else {
        return route;
    };
    let mut last = first.xy();
    route.push(first);

    while route.len() < total {
        let mut best: Option<(usize, f64)> = None;
        for (slot, point) in slots.iter().enumerate() {
            let Some(point) = point else { continue };
            let d = distance(point, &last);
            if best.map_or(true, |(_, best_d)| d < best_d) {
                best = Some((slot, d));
            }
        }
        let Some(next) = best.and_then(|(slot, _)| slots[slot].take()) else {
            break;
        };
        last = next.xy();
        route.push(next);
    }
    route
}

/// Segments joining consecutive points, for drawing the route.
pub fn route_links(points: &[Point]) -> Vec<LineSegment> {
    points
        .windows(2)
        .map(|pair| LineSegment::new(pair[0].position(), pair[1].position()))
        .collect()
}
