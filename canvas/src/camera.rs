//! View rectangle: the world-space window shown on the canvas, plus the
//! zoom and animated-pan operations that move it.

#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::config::DeskConfig;
use crate::consts::{INITIAL_VIEW_HEIGHT, INITIAL_VIEW_WIDTH, INITIAL_VIEW_X, INITIAL_VIEW_Y};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the canvas element in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Whether the viewport has a usable, finite area.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite())
    }
}

/// Wheel zoom direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    /// Show less of the world (view shrinks).
    In,
    /// Show more of the world (view grows).
    Out,
}

/// Visible world-space window, persisted as `{x, y, w, h}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewRect {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "w")]
    pub width: f64,
    #[serde(rename = "h")]
    pub height: f64,
}

impl Default for ViewRect {
    fn default() -> Self {
        Self {
            x: INITIAL_VIEW_X,
            y: INITIAL_VIEW_Y,
            width: INITIAL_VIEW_WIDTH,
            height: INITIAL_VIEW_HEIGHT,
        }
    }
}

/// Uniform scale and letterbox offset of the view→viewport mapping.
#[derive(Debug, Clone, Copy)]
struct Mapping {
    scale: f64,
    offset_x: f64,
    offset_y: f64,
}

impl ViewRect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// The view→viewport transform: fit the whole rect, keep aspect, center
    /// the slack. Falls back to 1:1 for degenerate input.
    fn mapping(&self, viewport: Viewport) -> Mapping {
        if viewport.is_degenerate() || !(self.width > 0.0 && self.height > 0.0) {
            return Mapping { scale: 1.0, offset_x: 0.0, offset_y: 0.0 };
        }
        let scale = (viewport.width / self.width).min(viewport.height / self.height);
        Mapping {
            scale,
            offset_x: (viewport.width - self.width * scale) * 0.5,
            offset_y: (viewport.height - self.height * scale) * 0.5,
        }
    }

    /// Convert a canvas-local screen point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, viewport: Viewport) -> Point {
        let m = self.mapping(viewport);
        Point {
            x: self.x + (screen.x - m.offset_x) / m.scale,
            y: self.y + (screen.y - m.offset_y) / m.scale,
        }
    }

    /// Convert a world point to canvas-local screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: Viewport) -> Point {
        let m = self.mapping(viewport);
        Point {
            x: (world.x - self.x) * m.scale + m.offset_x,
            y: (world.y - self.y) * m.scale + m.offset_y,
        }
    }

    /// Screen pixels per world unit.
    #[must_use]
    pub fn px_per_world(&self, viewport: Viewport) -> f64 {
        self.mapping(viewport).scale
    }

    /// Zoom about `world_anchor`, which keeps its relative position in the
    /// rect. Width is clamped to the configured range; height follows.
    #[must_use]
    pub fn zoomed(&self, world_anchor: Point, direction: ZoomDirection, config: &DeskConfig) -> Self {
        let k = match direction {
            ZoomDirection::In => config.zoom_in_factor,
            ZoomDirection::Out => config.zoom_out_factor,
        };
        let new_w = (self.width * k).max(config.min_view_width).min(config.max_view_width);
        let s = new_w / self.width;
        let new_h = self.height * s;

        let rx = (world_anchor.x - self.x) / self.width;
        let ry = (world_anchor.y - self.y) / self.height;
        Self {
            x: world_anchor.x - rx * new_w,
            y: world_anchor.y - ry * new_h,
            width: new_w,
            height: new_h,
        }
    }

    /// Match the viewport aspect by adjusting width around the current center.
    /// Returns `None` for a degenerate viewport.
    #[must_use]
    pub fn fitted_to(&self, viewport: Viewport) -> Option<Self> {
        if viewport.is_degenerate() {
            return None;
        }
        let aspect = viewport.width / viewport.height;
        let cx = self.x + self.width * 0.5;
        let new_w = self.height * aspect;
        Some(Self { x: cx - new_w * 0.5, y: self.y, width: new_w, height: self.height })
    }
}

/// Pan gesture context captured at pointer-down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanGrip {
    /// View origin when the pan started.
    pub origin_view: Point,
    /// Pointer position when the pan started.
    pub origin_screen: Point,
    /// Latest pointer position seen by [`PanGrip::follow`].
    pub last_screen: Point,
    /// World units per screen pixel along x and y, fixed for the whole gesture.
    pub world_per_px: Point,
}

impl PanGrip {
    #[must_use]
    pub fn new(view: &ViewRect, screen: Point, viewport: Viewport) -> Self {
        let (wx, wy) = if viewport.is_degenerate() {
            (1.0, 1.0)
        } else {
            (view.width / viewport.width, view.height / viewport.height)
        };
        Self {
            origin_view: Point::new(view.x, view.y),
            origin_screen: screen,
            last_screen: screen,
            world_per_px: Point::new(wx, wy),
        }
    }

    /// Target view origin for the pointer at `screen`.
    #[must_use]
    pub fn target_for(&self, screen: Point) -> Point {
        Point::new(
            self.origin_view.x - (screen.x - self.origin_screen.x) * self.world_per_px.x,
            self.origin_view.y - (screen.y - self.origin_screen.y) * self.world_per_px.y,
        )
    }

    /// Record the pointer at `screen` and return the matching target.
    pub fn follow(&mut self, screen: Point) -> Point {
        self.last_screen = screen;
        self.target_for(screen)
    }

    /// A fresh grip on `view` at the latest pointer position. Used when the
    /// view changes under a pan (zoom, resize).
    #[must_use]
    pub fn regrip(&self, view: &ViewRect, viewport: Viewport) -> Self {
        Self::new(view, self.last_screen, viewport)
    }
}

/// Eases the view origin toward a target, one step per animation frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanAnimator {
    /// Where the view origin is heading.
    pub target: Point,
    /// A pan gesture is in progress; keep animating even when converged.
    pub active: bool,
    /// An animation frame has been requested and not yet run.
    pub frame_pending: bool,
}

impl PanAnimator {
    #[must_use]
    pub fn new(view: &ViewRect) -> Self {
        Self { target: Point::new(view.x, view.y), active: false, frame_pending: false }
    }

    /// Point the target at the view's current origin.
    pub fn sync(&mut self, view: &ViewRect) {
        self.target = Point::new(view.x, view.y);
    }

    /// Mark a frame as pending. Returns `true` when the caller must schedule
    /// one (none was in flight).
    pub fn kick(&mut self) -> bool {
        if self.frame_pending {
            return false;
        }
        self.frame_pending = true;
        true
    }

    /// Run one animation frame against `view`. Returns `true` when another
    /// frame is needed; in that case the frame is already marked pending.
    pub fn step(&mut self, view: &mut ViewRect, alpha: f64, epsilon: f64) -> bool {
        self.frame_pending = false;
        let dx = self.target.x - view.x;
        let dy = self.target.y - view.y;

        if self.active || dx.abs() > epsilon || dy.abs() > epsilon {
            view.x += dx * alpha;
            view.y += dy * alpha;
            self.frame_pending = true;
            true
        } else {
            view.x = self.target.x;
            view.y = self.target.y;
            false
        }
    }
}
