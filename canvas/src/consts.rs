//! Shared numeric constants for the canvas crate.
//!
//! These are the defaults behind [`crate::config::DeskConfig`]; code paths that
//! take a config read from it rather than from here.

// ── View rectangle ──────────────────────────────────────────────

/// Initial view rectangle, in world units.
pub const INITIAL_VIEW_X: f64 = 0.0;
pub const INITIAL_VIEW_Y: f64 = 0.0;
pub const INITIAL_VIEW_WIDTH: f64 = 100.0;
pub const INITIAL_VIEW_HEIGHT: f64 = 60.0;

/// Narrowest view width reachable by zooming in.
pub const MIN_VIEW_WIDTH: f64 = 100.0;

/// Widest view width reachable by zooming out.
pub const MAX_VIEW_WIDTH: f64 = 300.0;

/// Scale applied to the view width per wheel notch.
pub const ZOOM_IN_FACTOR: f64 = 0.9;
pub const ZOOM_OUT_FACTOR: f64 = 1.1;

/// Range of the cosmetic zoom scalar that drives label size.
pub const LABEL_ZOOM_MIN: f64 = 0.5;
pub const LABEL_ZOOM_MAX: f64 = 2.0;

// ── Pan animation ───────────────────────────────────────────────

/// Fraction of the remaining distance covered per animation frame.
pub const PAN_ALPHA: f64 = 0.25;

/// Remaining distance (world units) below which the pan snaps to target.
pub const PAN_EPSILON: f64 = 0.05;

// ── Grid ────────────────────────────────────────────────────────

/// Desired on-screen spacing between grid lines.
pub const GRID_TARGET_PX: f64 = 40.0;

/// Desired on-screen spacing between axis labels.
pub const GRID_LABEL_PX: f64 = 55.0;

/// Upper bound on grid lines per axis.
pub const GRID_MAX_LINES: f64 = 120.0;

/// Width of the label gutter bands along the left and bottom edges.
pub const GRID_GUTTER_PX: f64 = 22.0;

/// Inset of axis labels from the view edge.
pub const GRID_LABEL_PAD_PX: f64 = 6.0;

/// Label font size at the low and high end of the cosmetic zoom range.
pub const LABEL_FONT_PX_ZOOMED_OUT: f64 = 20.0;
pub const LABEL_FONT_PX_ZOOMED_IN: f64 = 12.0;

// ── Shapes ──────────────────────────────────────────────────────

/// Bounding-box width of a shape dropped from the palette, in world units.
pub const DROP_TARGET_WIDTH: f64 = 18.0;

/// Shape stroke width in screen pixels.
pub const SHAPE_STROKE_PX: f64 = 0.8;

pub const DEFAULT_FILL: &str = "#c2185b";
pub const DEFAULT_STROKE: &str = "#8a1143";

// ── Palette ─────────────────────────────────────────────────────

/// Thumbnail frame shared by every palette entry.
pub const PALETTE_VIEW_BOX: &str = "0 0 100 70";

/// Colors of generated palette shapes.
pub const GENERATED_FILL: &str = "#bf175aff";
pub const GENERATED_STROKE: &str = "#8b1747ff";

/// Number of shapes added by one "create" command.
pub const CREATE_BATCH_MIN: usize = 5;
pub const CREATE_BATCH_MAX: usize = 20;

// ── Persistence ─────────────────────────────────────────────────

/// `localStorage` key holding the saved scene.
pub const STORAGE_KEY: &str = "svg-desk-state";

/// Drag-data MIME type carrying a [`crate::palette::DragPayload`].
pub const DRAG_MIME: &str = "application/x-polygon";
