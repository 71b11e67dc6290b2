use pole_core::{Planar, Point, Warning};
use serde::{Deserialize, Serialize};

/// Attribute key holding the text of label points.
pub const TEXT_KEY: &str = "text";

/// How label contents are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelKind {
    /// Free text, every label is a candidate.
    #[default]
    Text,
    /// Integer numbering; labels that do not parse are skipped with a warning.
    Integer,
}

/// One secondary layer taking part in an association.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecondaryLayer {
    /// Layer name, also the key under which matches are recorded.
    pub name: String,
    /// Label or block points on the layer.
    pub points: Vec<Point>,
    /// Attribute key read as the label content.
    #[serde(default = "default_content_key")]
    pub content_key: String,
    /// Interpretation of the content.
    #[serde(default)]
    pub kind: LabelKind,
}

fn default_content_key() -> String {
    TEXT_KEY.to_string()
}

impl SecondaryLayer {
    /// Free-text layer reading [`TEXT_KEY`].
    pub fn text(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            name: name.into(),
            points,
            content_key: default_content_key(),
            kind: LabelKind::Text,
        }
    }

    /// Integer numbering layer reading [`TEXT_KEY`].
    pub fn integer(name: impl Into<String>, points: Vec<Point>) -> Self {
        Self {
            kind: LabelKind::Integer,
            ..Self::text(name, points)
        }
    }

    /// Reads the content from another attribute key.
    pub fn with_content_key(mut self, key: impl Into<String>) -> Self {
        self.content_key = key.into();
        self
    }

    /// Label points usable as association candidates, plus a warning for
    /// every label rejected by the layer's [`LabelKind`].
    pub fn candidates(&self) -> (Vec<Candidate<'_>>, Vec<Warning>) {
        let mut candidates = Vec::with_capacity(self.points.len());
        let mut warnings = Vec::new();
        for point in &self.points {
            let content = point.attribute(&self.content_key).unwrap_or_default();
            let number = match self.kind {
                LabelKind::Text => None,
                LabelKind::Integer => match parse_integer_label(content) {
                    Some(number) => Some(number),
                    None => {
                        warnings.push(
                            Warning::UnparsableLabel {
                                layer: self.name.clone(),
                                point_id: point.id().clone(),
                                content: content.to_string(),
                            }
                            .emit(),
                        );
                        continue;
                    }
                },
            };
            candidates.push(Candidate {
                point,
                content,
                number,
            });
        }
        log::debug!(
            "layer '{}': {} of {} labels usable",
            self.name,
            candidates.len(),
            self.points.len()
        );
        (candidates, warnings)
    }
}

/// A label accepted for association.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate<'a> {
    /// Source point of the label.
    pub point: &'a Point,
    /// Raw content.
    pub content: &'a str,
    /// Parsed value for integer layers.
    pub number: Option<i64>,
}

impl Planar for Candidate<'_> {
    fn xy(&self) -> (f64, f64) {
        self.point.xy()
    }
}

/// Parses a numbering label such as `" 42 "`. Anything else is rejected.
pub fn parse_integer_label(content: &str) -> Option<i64> {
    content.trim().parse::<i64>().ok()
}
