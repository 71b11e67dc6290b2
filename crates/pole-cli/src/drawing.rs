//! Plain-data snapshot of the drawing entities the engine reads.
//!
//! A snapshot is what an extraction pass over the CAD host produces: every
//! layer with its point-like entities (blocks, texts) and its route geometry
//! (polylines, loose lines). Loading one never touches a live drawing.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use pole_core::errors::{ErrorInfo, PoleError};
use pole_core::{LineSegment, PathVertex, Point};
use pole_report::serde::from_json_slice;
use pole_seq::PathSource;
use serde::{Deserialize, Serialize};

/// Attribute recording the layer a pole was read from.
pub const LAYER_KEY: &str = "layer";

/// Entities found on one layer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LayerContent {
    /// Block references and other point entities.
    #[serde(default)]
    pub blocks: Vec<Point>,
    /// Text entities; the string sits under the `text` attribute.
    #[serde(default)]
    pub texts: Vec<Point>,
    /// Polylines as ordered vertex lists.
    #[serde(default)]
    pub polylines: Vec<Vec<PathVertex>>,
    /// Loose line entities.
    #[serde(default)]
    pub lines: Vec<LineSegment>,
}

/// All layers of a drawing, keyed by name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawingSnapshot {
    /// Layer contents.
    #[serde(default)]
    pub layers: BTreeMap<String, LayerContent>,
}

impl DrawingSnapshot {
    /// Reads a JSON snapshot from disk.
    pub fn load(path: &Path) -> Result<Self, PoleError> {
        let bytes = fs::read(path).map_err(|err| {
            PoleError::Io(
                ErrorInfo::new("read_failed", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        from_json_slice(&bytes)
    }

    /// Layers whose upper-cased name starts with `prefix`.
    pub fn pole_layers(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_uppercase();
        self.layers
            .keys()
            .filter(|name| name.to_uppercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    /// Layers not selected by [`DrawingSnapshot::pole_layers`].
    pub fn route_layers(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_uppercase();
        self.layers
            .keys()
            .filter(|name| !name.to_uppercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }

    /// Content of `name`, or an error naming the missing layer.
    pub fn layer(&self, name: &str) -> Result<&LayerContent, PoleError> {
        self.layers.get(name).ok_or_else(|| {
            PoleError::Configuration(
                ErrorInfo::new("unknown-layer", "layer not present in the drawing")
                    .with_context("layer", name.to_string()),
            )
        })
    }

    /// Blocks of every pole layer, tagged with their layer name.
    pub fn poles(&self, prefix: &str) -> Vec<Point> {
        let mut poles = Vec::new();
        for name in self.pole_layers(prefix) {
            for block in &self.layers[name].blocks {
                let mut pole = block.clone();
                if pole.attribute(LAYER_KEY).is_none() {
                    pole.set_attribute(LAYER_KEY, name);
                }
                poles.push(pole);
            }
        }
        log::info!("read {} poles from layers matching '{prefix}'", poles.len());
        poles
    }

    /// Route geometry from `layers`, or from every non-pole layer when empty.
    ///
    /// The first polyline wins. Without polylines, all loose lines of the
    /// selected layers are handed over as segments to be stitched.
    pub fn path_source(
        &self,
        layers: &[String],
        prefix: &str,
    ) -> Result<Option<PathSource>, PoleError> {
        let selected: Vec<&LayerContent> = if layers.is_empty() {
            self.route_layers(prefix)
                .into_iter()
                .map(|name| &self.layers[name])
                .collect()
        } else {
            layers
                .iter()
                .map(|name| self.layer(name))
                .collect::<Result<_, _>>()?
        };

        if let Some(polyline) = selected
            .iter()
            .flat_map(|content| content.polylines.iter())
            .find(|polyline| !polyline.is_empty())
        {
            return Ok(Some(PathSource::Vertices(polyline.clone())));
        }
        let segments: Vec<LineSegment> = selected
            .iter()
            .flat_map(|content| content.lines.iter().copied())
            .collect();
        if segments.is_empty() {
            return Ok(None);
        }
        Ok(Some(PathSource::Segments(segments)))
    }

    /// Blocks and texts of `name` together.
    pub fn layer_points(&self, name: &str) -> Result<Vec<Point>, PoleError> {
        let content = self.layer(name)?;
        Ok(content
            .blocks
            .iter()
            .chain(content.texts.iter())
            .cloned()
            .collect())
    }
}
