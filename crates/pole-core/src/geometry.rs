//! Pure planar distance primitives.
//!
//! Elevation never takes part in any decision made here.

use crate::{PathVertex, Point};

/// Anything with a planar position.
pub trait Planar {
    /// Returns the `(x, y)` position.
    fn xy(&self) -> (f64, f64);
}

impl Planar for Point {
    fn xy(&self) -> (f64, f64) {
        (self.x(), self.y())
    }
}

impl Planar for PathVertex {
    fn xy(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl Planar for (f64, f64) {
    fn xy(&self) -> (f64, f64) {
        *self
    }
}

impl<T: Planar + ?Sized> Planar for &T {
    fn xy(&self) -> (f64, f64) {
        (**self).xy()
    }
}

/// Euclidean distance in the XY plane.
pub fn distance<A: Planar + ?Sized, B: Planar + ?Sized>(a: &A, b: &B) -> f64 {
    let (ax, ay) = a.xy();
    let (bx, by) = b.xy();
    (ax - bx).hypot(ay - by)
}

/// Result of a nearest-candidate scan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nearest<'a, C> {
    /// Position of the candidate in the scanned slice.
    pub index: usize,
    /// The winning candidate.
    pub candidate: &'a C,
    /// Distance between the query and the candidate.
    pub distance: f64,
}

/// Linear scan for the closest candidate.
///
/// Ties go to the earliest candidate in slice order. Returns `None` for an
/// empty slice.
pub fn nearest<'a, P, C>(point: &P, candidates: &'a [C]) -> Option<Nearest<'a, C>>
where
    P: Planar + ?Sized,
    C: Planar,
{
    let mut best: Option<Nearest<'a, C>> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let d = distance(point, candidate);
        match &best {
            Some(current) if d >= current.distance => {}
            _ => {
                best = Some(Nearest {
                    index,
                    candidate,
                    distance: d,
                })
            }
        }
    }
    best
}

/// Arithmetic mean of the planar positions, `None` when empty.
pub fn centroid<P: Planar>(points: &[P]) -> Option<PathVertex> {
    if points.is_empty() {
        return None;
    }
    let (sx, sy) = points.iter().fold((0.0, 0.0), |(sx, sy), p| {
        let (x, y) = p.xy();
        (sx + x, sy + y)
    });
    let n = points.len() as f64;
    Some(PathVertex::new(sx / n, sy / n))
}

/// Sum of the distances between consecutive points.
pub fn route_length<P: Planar>(points: &[P]) -> f64 {
    points
        .windows(2)
        .map(|pair| distance(&pair[0], &pair[1]))
        .sum()
}
