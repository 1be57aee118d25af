//! Persisted scene record: palette entries, placed shapes, and the view.
//!
//! This is the JSON shape written to `localStorage`. Conversion to and from
//! live engine state happens in [`crate::engine::EngineCore`]; this module
//! only owns the wire types.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use serde::{Deserialize, Serialize};

use crate::camera::ViewRect;
use crate::consts::{DEFAULT_FILL, DEFAULT_STROKE};
use crate::doc::PlacedShape;
use crate::error::DeskError;
use crate::geometry::{format_points, parse_points};
use crate::palette::PaletteEntry;

fn default_fill() -> String {
    DEFAULT_FILL.to_owned()
}

fn default_stroke() -> String {
    DEFAULT_STROKE.to_owned()
}

/// A placed shape as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkRecord {
    /// Untranslated outline.
    pub points: String,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_stroke")]
    pub stroke: String,
    #[serde(default)]
    pub tx: f64,
    #[serde(default)]
    pub ty: f64,
    /// Palette-form outline; older records may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canonical_points: Option<String>,
}

impl WorkRecord {
    #[must_use]
    pub fn from_shape(shape: &PlacedShape) -> Self {
        Self {
            points: format_points(&shape.points),
            fill: shape.fill.clone(),
            stroke: shape.stroke.clone(),
            tx: shape.tx,
            ty: shape.ty,
            canonical_points: Some(shape.canonical.clone()),
        }
    }

    /// Rebuild the live shape. The canonical form falls back to `points`.
    ///
    /// # Errors
    ///
    /// Returns the point-parse error when `points` is malformed.
    pub fn to_shape(&self) -> Result<PlacedShape, DeskError> {
        let points = parse_points(&self.points)?;
        let canonical = self
            .canonical_points
            .clone()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| self.points.clone());
        let mut shape = PlacedShape::new(points, &self.fill, &self.stroke, canonical);
        shape.tx = finite_or_zero(self.tx);
        shape.ty = finite_or_zero(self.ty);
        Ok(shape)
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Everything written under the storage key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneState {
    #[serde(default)]
    pub buffer: Vec<PaletteEntry>,
    #[serde(default)]
    pub work: Vec<WorkRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_box: Option<ViewRect>,
}

impl SceneState {
    /// # Errors
    ///
    /// Returns [`DeskError::Json`] for malformed input.
    pub fn from_json(raw: &str) -> Result<Self, DeskError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// # Errors
    ///
    /// Returns [`DeskError::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String, DeskError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse a stored record, treating absence or corruption as an empty
    /// scene. Corruption is logged.
    #[must_use]
    pub fn load_or_empty(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(state) => state,
            Err(e) => {
                log::error!("discarding stored scene: {e}");
                Self::default()
            }
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty() && self.work.is_empty() && self.view_box.is_none()
    }
}
