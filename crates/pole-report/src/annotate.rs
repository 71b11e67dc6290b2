use pole_core::{route_length, LineSegment, PathVertex, Point, PointId};
use pole_seq::route_links;
use serde::{Deserialize, Serialize};

/// Layer receiving the numbering annotations.
pub const DEFAULT_ANNOTATION_LAYER: &str = "NUMERACION_POSTES";

/// Geometry of the circle-and-number mark drawn at each pole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStyle {
    /// Radius of the circle centred on the pole.
    #[serde(default = "default_circle_radius")]
    pub circle_radius: f64,
    /// Height of the number text.
    #[serde(default = "default_text_height")]
    pub text_height: f64,
    /// Offset from the pole to the text insertion point.
    #[serde(default = "default_text_offset")]
    pub text_offset: PathVertex,
    /// Target layer of the annotation entities.
    #[serde(default = "default_layer")]
    pub layer: String,
}

fn default_circle_radius() -> f64 {
    2.0
}

fn default_text_height() -> f64 {
    1.5
}

fn default_text_offset() -> PathVertex {
    PathVertex::new(-3.0, -2.5)
}

fn default_layer() -> String {
    DEFAULT_ANNOTATION_LAYER.to_string()
}

impl Default for AnnotationStyle {
    fn default() -> Self {
        Self {
            circle_radius: default_circle_radius(),
            text_height: default_text_height(),
            text_offset: default_text_offset(),
            layer: default_layer(),
        }
    }
}

/// Drawing instructions for one numbered pole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    /// 1-based position in the sequence.
    pub number: usize,
    /// Pole being annotated.
    pub point_id: PointId,
    /// Circle centre, the pole position.
    pub circle_center: PathVertex,
    /// Circle radius.
    pub circle_radius: f64,
    /// Text insertion point.
    pub text_position: PathVertex,
    /// Text height.
    pub text_height: f64,
    /// Text to draw.
    pub label: String,
    /// Target layer.
    pub layer: String,
}

/// Lays out one annotation per point, numbered in sequence order.
pub fn annotate(sequence: &[Point], style: &AnnotationStyle) -> Vec<Annotation> {
    sequence
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let number = index + 1;
            Annotation {
                number,
                point_id: point.id().clone(),
                circle_center: point.position(),
                circle_radius: style.circle_radius,
                text_position: PathVertex::new(
                    point.x() + style.text_offset.x,
                    point.y() + style.text_offset.y,
                ),
                text_height: style.text_height,
                label: number.to_string(),
                layer: style.layer.clone(),
            }
        })
        .collect()
}

/// Connecting segments of a sequence and their total length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    /// Segment from each point to the next.
    pub links: Vec<LineSegment>,
    /// Sum of the link lengths.
    pub length: f64,
}

/// Links consecutive points of `sequence`.
pub fn route_summary(sequence: &[Point]) -> RouteSummary {
    RouteSummary {
        links: route_links(sequence),
        length: route_length(sequence),
    }
}
