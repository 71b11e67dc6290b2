#![deny(missing_docs)]
#![doc = "Core data model, geometry kernel and error surface shared by the pole numbering crates."]

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod config;
pub mod errors;
pub mod geometry;
pub mod rng;
pub mod warnings;

pub use config::{CapturePolicy, EngineConfig, LeftoverOrder, SegmentMilestones, SortStrategy};
pub use errors::{ErrorInfo, PoleError};
pub use geometry::{centroid, distance, nearest, route_length, Nearest, Planar};
pub use rng::RngHandle;
pub use warnings::Warning;

/// Stable identifier of a point, typically the drawing handle of the source entity.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PointId(String);

impl PointId {
    /// Creates a new identifier from its raw string representation.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the raw string representation of the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PointId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for PointId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// A point-like drawing entity (pole, text insertion point, attribute block).
///
/// Coordinates are fixed at extraction time. Only the attribute map may be
/// enriched afterwards, which is what association fusion does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    id: PointId,
    x: f64,
    y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    z: Option<f64>,
    #[serde(default)]
    attributes: BTreeMap<String, String>,
}

impl Point {
    /// Creates a point without elevation or attributes.
    pub fn new(id: impl Into<PointId>, x: f64, y: f64) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            z: None,
            attributes: BTreeMap::new(),
        }
    }

    /// Attaches an elevation. It is carried as data only.
    pub fn with_z(mut self, z: f64) -> Self {
        self.z = Some(z);
        self
    }

    /// Adds an attribute entry, replacing any previous value under `key`.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Returns the identifier of the point.
    pub fn id(&self) -> &PointId {
        &self.id
    }

    /// Returns the X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Returns the Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Returns the elevation, if one was extracted.
    pub fn z(&self) -> Option<f64> {
        self.z
    }

    /// Returns the planar position as a path vertex.
    pub fn position(&self) -> PathVertex {
        PathVertex::new(self.x, self.y)
    }

    /// Returns the attribute map.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Returns a single attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an attribute value and returns the value it replaced.
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.attributes.insert(key.into(), value.into())
    }
}

/// Planar vertex of a guide path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathVertex {
    /// X coordinate.
    pub x: f64,
    /// Y coordinate.
    pub y: f64,
}

impl PathVertex {
    /// Creates a new vertex.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for PathVertex {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Straight segment between two vertices, as read from a line entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// Start point of the segment.
    pub start: PathVertex,
    /// End point of the segment.
    pub end: PathVertex,
}

impl LineSegment {
    /// Creates a segment from its endpoints.
    pub const fn new(start: PathVertex, end: PathVertex) -> Self {
        Self { start, end }
    }

    /// Returns the midpoint of the segment.
    pub fn midpoint(&self) -> PathVertex {
        PathVertex::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
        )
    }
}

/// Ordered, non-empty sequence of milestones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<PathVertex>", into = "Vec<PathVertex>")]
pub struct Path {
    vertices: Vec<PathVertex>,
}

impl Path {
    /// Builds a path from ordered vertices. An empty vertex list is rejected.
    pub fn new(vertices: Vec<PathVertex>) -> Result<Self, PoleError> {
        if vertices.is_empty() {
            return Err(PoleError::PathExtraction(
                ErrorInfo::new("empty-path", "a path requires at least one vertex")
                    .with_hint("fall back to the nearest-neighbour strategy"),
            ));
        }
        Ok(Self { vertices })
    }

    /// Returns the ordered milestones.
    pub fn vertices(&self) -> &[PathVertex] {
        &self.vertices
    }

    /// Returns the number of milestones (always at least one).
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; kept for API symmetry with slices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl TryFrom<Vec<PathVertex>> for Path {
    type Error = PoleError;

    fn try_from(vertices: Vec<PathVertex>) -> Result<Self, Self::Error> {
        Path::new(vertices)
    }
}

impl From<Path> for Vec<PathVertex> {
    fn from(path: Path) -> Self {
        path.vertices
    }
}
