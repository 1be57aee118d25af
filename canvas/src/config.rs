//! Engine tuning parsed from an optional JSON override.
//!
//! Every field falls back to the matching constant in [`crate::consts`], so an
//! empty object (or no override at all) yields the stock behavior.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts;
use crate::error::DeskError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeskConfig {
    pub min_view_width: f64,
    pub max_view_width: f64,
    pub zoom_in_factor: f64,
    pub zoom_out_factor: f64,
    pub label_zoom_min: f64,
    pub label_zoom_max: f64,
    pub pan_alpha: f64,
    pub pan_epsilon: f64,
    pub grid_target_px: f64,
    pub grid_label_px: f64,
    pub grid_max_lines: f64,
    pub grid_gutter_px: f64,
    pub grid_label_pad_px: f64,
    pub drop_target_width: f64,
    pub storage_key: String,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            min_view_width: consts::MIN_VIEW_WIDTH,
            max_view_width: consts::MAX_VIEW_WIDTH,
            zoom_in_factor: consts::ZOOM_IN_FACTOR,
            zoom_out_factor: consts::ZOOM_OUT_FACTOR,
            label_zoom_min: consts::LABEL_ZOOM_MIN,
            label_zoom_max: consts::LABEL_ZOOM_MAX,
            pan_alpha: consts::PAN_ALPHA,
            pan_epsilon: consts::PAN_EPSILON,
            grid_target_px: consts::GRID_TARGET_PX,
            grid_label_px: consts::GRID_LABEL_PX,
            grid_max_lines: consts::GRID_MAX_LINES,
            grid_gutter_px: consts::GRID_GUTTER_PX,
            grid_label_pad_px: consts::GRID_LABEL_PAD_PX,
            drop_target_width: consts::DROP_TARGET_WIDTH,
            storage_key: consts::STORAGE_KEY.to_owned(),
        }
    }
}

impl DeskConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::Json`] for malformed JSON and
    /// [`DeskError::InvalidConfig`] when a value is out of range.
    pub fn from_json(raw: &str) -> Result<Self, DeskError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the ranges the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`DeskError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<(), DeskError> {
        if !(self.min_view_width > 0.0 && self.min_view_width <= self.max_view_width) {
            return Err(DeskError::InvalidConfig(format!(
                "view width range [{}, {}]",
                self.min_view_width, self.max_view_width
            )));
        }
        if !(self.zoom_in_factor > 0.0 && self.zoom_in_factor < 1.0) {
            return Err(DeskError::InvalidConfig(format!("zoomInFactor {}", self.zoom_in_factor)));
        }
        if self.zoom_out_factor <= 1.0 {
            return Err(DeskError::InvalidConfig(format!("zoomOutFactor {}", self.zoom_out_factor)));
        }
        if !(self.label_zoom_min > 0.0 && self.label_zoom_min < self.label_zoom_max) {
            return Err(DeskError::InvalidConfig(format!(
                "label zoom range [{}, {}]",
                self.label_zoom_min, self.label_zoom_max
            )));
        }
        if !(self.pan_alpha > 0.0 && self.pan_alpha <= 1.0) {
            return Err(DeskError::InvalidConfig(format!("panAlpha {}", self.pan_alpha)));
        }
        if self.pan_epsilon <= 0.0 {
            return Err(DeskError::InvalidConfig(format!("panEpsilon {}", self.pan_epsilon)));
        }
        if self.grid_target_px <= 0.0 || self.grid_label_px <= 0.0 || self.grid_max_lines < 1.0 {
            return Err(DeskError::InvalidConfig("grid spacing".into()));
        }
        if self.grid_gutter_px < 0.0 || self.grid_label_pad_px < 0.0 {
            return Err(DeskError::InvalidConfig("grid gutter".into()));
        }
        if self.drop_target_width <= 0.0 {
            return Err(DeskError::InvalidConfig(format!("dropTargetWidth {}", self.drop_target_width)));
        }
        if self.storage_key.is_empty() {
            return Err(DeskError::InvalidConfig("storageKey is empty".into()));
        }
        Ok(())
    }
}
