//! Adaptive coordinate grid.
//!
//! [`layout`] turns the current view into a list of world-space grid lines and
//! axis labels. It is pure so the renderer only has to map positions to
//! pixels and paint them. The step is a "nice" number (1, 2 or 5 × 10ⁿ)
//! chosen from a target on-screen spacing, then doubled until neither axis
//! needs more than the configured number of lines.
//!
//! The bottom and left edges of the view are reserved as label gutters; grid
//! lines stop at the gutters and labels sit inside them.

#[cfg(test)]
#[path = "grid_test.rs"]
mod grid_test;

use crate::camera::{Point, ViewRect, Viewport};
use crate::config::DeskConfig;
use crate::consts::{LABEL_FONT_PX_ZOOMED_IN, LABEL_FONT_PX_ZOOMED_OUT};
use crate::geometry::Bounds;

/// Smallest step the grid will ever use.
const MIN_STEP: f64 = 1e-6;

/// Tolerance when deciding whether the last line still falls inside the region.
const EDGE_SLACK: f64 = 1e-6;

/// Grid line orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Vertical line at a fixed world x.
    X,
    /// Horizontal line at a fixed world y.
    Y,
}

/// A grid line at world coordinate `pos` along `axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub axis: Axis,
    pub pos: f64,
}

/// An axis label anchored in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLabel {
    pub axis: Axis,
    pub anchor: Point,
    pub text: String,
}

/// Everything needed to paint one frame of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    /// World distance between adjacent lines.
    pub step: f64,
    /// World units per screen pixel.
    pub world_per_px: f64,
    /// Draw every `label_every`-th line with a label.
    pub label_every: i64,
    /// Label font size in screen pixels.
    pub font_px: f64,
    /// World-space area the lines cover (the view minus the gutters).
    pub region: Bounds,
    pub lines: Vec<GridLine>,
    pub labels: Vec<GridLabel>,
}

/// Round `v` down to 1, 2 or 5 × 10ⁿ.
#[must_use]
pub fn nice_step(v: f64) -> f64 {
    let p = 10f64.powf(v.log10().floor());
    let m = v / p;
    let base = if m >= 5.0 {
        5.0
    } else if m >= 2.0 {
        2.0
    } else {
        1.0
    };
    base * p
}

/// Grid step for a view of the given size at `world_per_px`.
#[must_use]
pub fn step_for(view: &ViewRect, world_per_px: f64, config: &DeskConfig) -> f64 {
    let mut step = nice_step(config.grid_target_px * world_per_px).max(MIN_STEP);
    while view.width / step > config.grid_max_lines {
        step *= 2.0;
    }
    while view.height / step > config.grid_max_lines {
        step *= 2.0;
    }
    step
}

/// Label font size in pixels for the cosmetic zoom scalar.
#[must_use]
pub fn label_font_px(zoom: f64, config: &DeskConfig) -> f64 {
    let span = config.label_zoom_max - config.label_zoom_min;
    let t = ((config.label_zoom_max - zoom) / span).clamp(0.0, 1.0);
    LABEL_FONT_PX_ZOOMED_OUT + (LABEL_FONT_PX_ZOOMED_IN - LABEL_FONT_PX_ZOOMED_OUT) * t
}

/// Lay out the grid for `view` shown in `viewport`.
///
/// Returns `None` when the viewport or view has no area; the caller skips the
/// grid for that frame.
#[must_use]
pub fn layout(view: &ViewRect, viewport: Viewport, zoom: f64, config: &DeskConfig) -> Option<GridLayout> {
    if viewport.is_degenerate() || !(view.width > 0.0 && view.height > 0.0) {
        return None;
    }
    let px_per_world = view.px_per_world(viewport);
    if !(px_per_world > 0.0 && px_per_world.is_finite()) {
        return None;
    }
    let world_per_px = 1.0 / px_per_world;

    let step = step_for(view, world_per_px, config);
    let px_per_step = step / world_per_px;
    #[allow(clippy::cast_possible_truncation)]
    let label_every = ((config.grid_label_px / px_per_step).ceil() as i64).max(1);

    let gutter = config.grid_gutter_px * world_per_px;
    let region = Bounds::new(
        view.x + gutter.min(view.width),
        view.y,
        view.right(),
        view.bottom() - gutter.min(view.height),
    );
    let pad = config.grid_label_pad_px * world_per_px;

    let mut lines = Vec::new();
    let mut labels = Vec::new();

    for (index, pos) in positions(region.min_x, region.max_x, step) {
        lines.push(GridLine { axis: Axis::X, pos });
        if index.rem_euclid(label_every) == 0 {
            labels.push(GridLabel {
                axis: Axis::X,
                anchor: Point::new(pos, view.bottom() - pad),
                text: label_text(pos),
            });
        }
    }
    for (index, pos) in positions(region.min_y, region.max_y, step) {
        lines.push(GridLine { axis: Axis::Y, pos });
        if index.rem_euclid(label_every) == 0 {
            labels.push(GridLabel {
                axis: Axis::Y,
                anchor: Point::new(view.x + pad, pos),
                text: label_text(pos),
            });
        }
    }

    Some(GridLayout {
        step,
        world_per_px,
        label_every,
        font_px: label_font_px(zoom, config),
        region,
        lines,
        labels,
    })
}

/// Multiples of `step` in `[min, max]`, paired with their global index so
/// label thinning stays put while panning.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn positions(min: f64, max: f64, step: f64) -> impl Iterator<Item = (i64, f64)> {
    let first = (min / step).ceil() as i64;
    let last = ((max + EDGE_SLACK) / step).floor() as i64;
    (first..=last).map(move |i| (i, i as f64 * step))
}

/// Integer label text; `-0` prints as `0`.
fn label_text(pos: f64) -> String {
    let rounded = pos.round();
    if rounded.abs() < f64::EPSILON {
        return "0".to_owned();
    }
    format!("{rounded:.0}")
}
