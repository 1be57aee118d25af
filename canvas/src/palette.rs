//! Palette ("buffer zone") store: the ordered list of candidate shapes, and
//! the drag payload that carries a shape between zones.

#[cfg(test)]
#[path = "palette_test.rs"]
mod palette_test;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::{DEFAULT_FILL, DEFAULT_STROKE, GENERATED_FILL, GENERATED_STROKE, PALETTE_VIEW_BOX};
use crate::error::DeskError;
use crate::geometry::{format_points, random_blob};

fn default_view_box() -> String {
    PALETTE_VIEW_BOX.to_owned()
}

fn default_fill() -> String {
    DEFAULT_FILL.to_owned()
}

fn default_stroke() -> String {
    DEFAULT_STROKE.to_owned()
}

/// A palette item as stored and persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Canonical point string.
    pub points: String,
    /// Thumbnail frame, `"minx miny w h"`.
    #[serde(rename = "viewBox", default = "default_view_box")]
    pub view_box: String,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_stroke")]
    pub stroke: String,
}

impl PaletteEntry {
    /// Entry with the default thumbnail frame.
    #[must_use]
    pub fn new(points: impl Into<String>, fill: impl Into<String>, stroke: impl Into<String>) -> Self {
        Self { points: points.into(), view_box: default_view_box(), fill: fill.into(), stroke: stroke.into() }
    }

    /// Random blob framed for the default thumbnail.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let n = rng.random_range(3..=10);
        let pts = random_blob(rng, Point::new(50.0, 35.0), 28.0, n, 0.2, 0.18);
        Self::new(format_points(&pts), GENERATED_FILL, GENERATED_STROKE)
    }

    /// Drag payload describing this entry.
    #[must_use]
    pub fn payload(&self) -> DragPayload {
        DragPayload {
            canonical_points: self.points.clone(),
            fill: self.fill.clone(),
            stroke: self.stroke.clone(),
        }
    }
}

/// Data carried by a cross-zone drag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragPayload {
    #[serde(alias = "points")]
    pub canonical_points: String,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_stroke")]
    pub stroke: String,
}

impl DragPayload {
    /// Parse a payload read from the drag-data channel.
    ///
    /// Blank input means "nothing was dragged" and yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Json`] when non-blank input is not a payload.
    pub fn from_json(raw: &str) -> Result<Option<Self>, DeskError> {
        if raw.trim().is_empty() {
            return Ok(None);
        }
        let payload: Self = serde_json::from_str(raw)?;
        if payload.canonical_points.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(payload))
    }

    /// Encode for the drag-data channel.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String, DeskError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Ordered palette contents.
#[derive(Debug, Clone, Default)]
pub struct PaletteStore {
    entries: Vec<PaletteEntry>,
}

impl PaletteStore {
    #[must_use]
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Append entries in the given order.
    pub fn add(&mut self, entries: impl IntoIterator<Item = PaletteEntry>) {
        self.entries.extend(entries);
    }

    /// Drop target: store a shape described by `payload` with the default
    /// thumbnail frame. Returns the new entry's index.
    pub fn accept_drop(&mut self, payload: &DragPayload) -> usize {
        self.entries.push(PaletteEntry::new(
            payload.canonical_points.clone(),
            payload.fill.clone(),
            payload.stroke.clone(),
        ));
        self.entries.len() - 1
    }

    /// Remove the entry at `index` (it was dragged out onto the canvas).
    pub fn take(&mut self, index: usize) -> Option<PaletteEntry> {
        if index < self.entries.len() {
            Some(self.entries.remove(index))
        } else {
            None
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PaletteEntry> {
        self.entries.get(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    /// Copy of the ordered list, for persistence.
    #[must_use]
    pub fn serialize(&self) -> Vec<PaletteEntry> {
        self.entries.clone()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
