//! Engine options passed explicitly into every sequencing and association call.

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, PoleError};
use crate::PathVertex;

/// YAML-configurable parameters governing a numbering run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Capture radius around each milestone (closed interval).
    #[serde(default = "default_search_radius")]
    pub search_radius: f64,
    /// Drop points never captured by a milestone instead of appending them.
    #[serde(default)]
    pub strict_mode: bool,
    /// Upper bound for proximity association. `None` means unbounded.
    #[serde(default)]
    pub max_distance: Option<f64>,
    /// Ordering strategy applied to the poles.
    #[serde(default)]
    pub sort_strategy: SortStrategy,
    /// Reference coordinate, required by [`SortStrategy::RefDistance`].
    #[serde(default)]
    pub reference_point: Option<PathVertex>,
    /// Ordering of lenient-mode leftovers.
    #[serde(default)]
    pub leftover_order: LeftoverOrder,
    /// How many pool points a milestone may claim.
    #[serde(default)]
    pub capture: CapturePolicy,
    /// How milestones are derived from a set of line segments.
    #[serde(default)]
    pub segment_milestones: SegmentMilestones,
    /// Layers whose upper-cased name starts with this prefix hold poles.
    #[serde(default = "default_layer_prefix")]
    pub layer_prefix: String,
    /// Radius used when merging attributes from data blocks into poles.
    #[serde(default = "default_association_radius")]
    pub association_radius: f64,
    /// Attribute keys starting with this prefix are copied by data-block merges.
    #[serde(default = "default_attribute_prefix")]
    pub attribute_prefix: String,
}

fn default_search_radius() -> f64 {
    5.0
}

fn default_association_radius() -> f64 {
    5.0
}

fn default_layer_prefix() -> String {
    "POSTE".to_string()
}

fn default_attribute_prefix() -> String {
    "attr_".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_radius: default_search_radius(),
            strict_mode: false,
            max_distance: None,
            sort_strategy: SortStrategy::default(),
            reference_point: None,
            leftover_order: LeftoverOrder::default(),
            capture: CapturePolicy::default(),
            segment_milestones: SegmentMilestones::default(),
            layer_prefix: default_layer_prefix(),
            association_radius: default_association_radius(),
            attribute_prefix: default_attribute_prefix(),
        }
    }
}

impl EngineConfig {
    /// Parses a YAML document; missing fields take their defaults.
    pub fn from_yaml_str(raw: &str) -> Result<Self, PoleError> {
        let config: EngineConfig = serde_yaml::from_str(raw).map_err(|err| {
            PoleError::Serde(ErrorInfo::new("yaml_deserialize", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml_string(&self) -> Result<String, PoleError> {
        serde_yaml::to_string(self)
            .map_err(|err| PoleError::Serde(ErrorInfo::new("yaml_serialize", err.to_string())))
    }

    /// Checks the option set for values the algorithms cannot work with.
    pub fn validate(&self) -> Result<(), PoleError> {
        validate_search_radius(self.search_radius)?;
        if let Some(max) = self.max_distance {
            validate_max_distance(max)?;
        }
        if !(self.association_radius.is_finite() && self.association_radius > 0.0) {
            return Err(PoleError::Configuration(
                ErrorInfo::new(
                    "invalid-association-radius",
                    "association radius must be a positive finite number",
                )
                .with_context("association_radius", self.association_radius.to_string()),
            ));
        }
        if self.sort_strategy == SortStrategy::RefDistance && self.reference_point.is_none() {
            return Err(PoleError::Configuration(
                ErrorInfo::new(
                    "missing-reference-point",
                    "the ref_distance strategy needs a reference point",
                )
                .with_hint("set reference_point: {x: .., y: ..}"),
            ));
        }
        Ok(())
    }
}

/// Rejects radii that are not strictly positive and finite.
pub fn validate_search_radius(radius: f64) -> Result<(), PoleError> {
    if radius.is_finite() && radius > 0.0 {
        return Ok(());
    }
    Err(PoleError::Configuration(
        ErrorInfo::new(
            "invalid-radius",
            "search radius must be a positive finite number",
        )
        .with_context("search_radius", radius.to_string()),
    ))
}

/// Rejects negative or NaN association thresholds. Infinity is allowed.
pub fn validate_max_distance(max_distance: f64) -> Result<(), PoleError> {
    if max_distance >= 0.0 {
        return Ok(());
    }
    Err(PoleError::Configuration(
        ErrorInfo::new("invalid-max-distance", "max distance must not be negative")
            .with_context("max_distance", max_distance.to_string()),
    ))
}

/// Supported ordering strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortStrategy {
    /// Stable sort by X coordinate.
    X,
    /// Stable sort by Y coordinate.
    Y,
    /// Stable sort by distance to the reference point.
    RefDistance,
    /// Greedy nearest-neighbour route from the first input point.
    NearestNeighbor,
    /// Radius capture along the guide path.
    #[default]
    PathFollow,
}

impl std::str::FromStr for SortStrategy {
    type Err = PoleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "x" => Ok(SortStrategy::X),
            "y" => Ok(SortStrategy::Y),
            "ref_distance" => Ok(SortStrategy::RefDistance),
            "nearest_neighbor" | "nearest_neighbour" => Ok(SortStrategy::NearestNeighbor),
            "path_follow" => Ok(SortStrategy::PathFollow),
            other => Err(PoleError::Configuration(
                ErrorInfo::new("unknown-strategy", "unsupported sort strategy")
                    .with_context("strategy", other),
            )),
        }
    }
}

/// Placement of lenient-mode leftovers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeftoverOrder {
    /// Append in input order.
    #[default]
    Input,
    /// Stable sort by distance to the closest milestone before appending.
    NearestMilestone,
}

/// Number of pool points a milestone may claim per visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePolicy {
    /// Every remaining point within the radius.
    #[default]
    WithinRadius,
    /// Only the single nearest remaining point within the radius.
    NearestOnly,
}

/// Milestone derivation for line-set paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMilestones {
    /// Stitch segments end to end and use the stitched vertices.
    #[default]
    Stitched,
    /// Use each segment's midpoint, in segment input order.
    Midpoints,
}
