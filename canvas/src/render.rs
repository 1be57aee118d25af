//! Rendering: draws the work canvas and the lift overlay to 2D contexts.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads engine state and produces pixels; it does not mutate anything.
//! Everything is drawn in screen space so strokes and labels keep a constant
//! pixel size at every zoom level.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::camera::{Point, ViewRect, Viewport};
use crate::consts::SHAPE_STROKE_PX;
use crate::doc::PlacedShape;
use crate::engine::EngineCore;
use crate::grid::{self, Axis, GridLayout};

const BACKGROUND: &str = "#1d1d1d";
const GRID_LINE: &str = "#333";
const GRID_LABEL: &str = "#8e8e8e";
/// Stroke for the shape under an in-canvas drag.
const DRAG_HIGHLIGHT: &str = "#ffd54f";
const DRAG_HIGHLIGHT_PX: f64 = 1.6;
/// Dash pattern of the drag highlight, in screen pixels.
const DRAG_DASH_PX: [f64; 2] = [4.0, 3.0];
/// Opacity of a lifted shape on the overlay.
const LIFT_ALPHA: f64 = 0.85;

/// Draw the work canvas: background, grid, then shapes in layer order.
///
/// A degenerate viewport draws nothing.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw_scene(ctx: &CanvasRenderingContext2d, core: &EngineCore) -> Result<(), JsValue> {
    let viewport = core.viewport;
    if viewport.is_degenerate() {
        return Ok(());
    }

    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.set_global_alpha(1.0);
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    if let Some(layout) = grid::layout(&core.view, viewport, core.zoom, &core.config) {
        draw_grid(ctx, &core.view, viewport, &layout)?;
    }

    let dragged = core.input.dragged_shape();
    for shape in core.layer.iter() {
        let screen: Vec<Point> =
            shape.world_points().into_iter().map(|p| core.view.world_to_screen(p, viewport)).collect();
        trace_outline(ctx, &screen);
        fill_and_stroke(ctx, shape, dragged == Some(shape.id))?;
    }
    Ok(())
}

// =============================================================
// Grid
// =============================================================

fn draw_grid(
    ctx: &CanvasRenderingContext2d,
    view: &ViewRect,
    viewport: Viewport,
    layout: &GridLayout,
) -> Result<(), JsValue> {
    let top_left = view.world_to_screen(Point::new(layout.region.min_x, layout.region.min_y), viewport);
    let bottom_right = view.world_to_screen(Point::new(layout.region.max_x, layout.region.max_y), viewport);

    ctx.set_stroke_style_str(GRID_LINE);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for line in &layout.lines {
        match line.axis {
            Axis::X => {
                let x = crisp(view.world_to_screen(Point::new(line.pos, 0.0), viewport).x);
                ctx.move_to(x, top_left.y);
                ctx.line_to(x, bottom_right.y);
            }
            Axis::Y => {
                let y = crisp(view.world_to_screen(Point::new(0.0, line.pos), viewport).y);
                ctx.move_to(top_left.x, y);
                ctx.line_to(bottom_right.x, y);
            }
        }
    }
    ctx.stroke();

    ctx.set_fill_style_str(GRID_LABEL);
    ctx.set_font(&format!("{:.0}px sans-serif", layout.font_px));
    for label in &layout.labels {
        let at = view.world_to_screen(label.anchor, viewport);
        match label.axis {
            Axis::X => {
                ctx.set_text_align("center");
                ctx.set_text_baseline("bottom");
            }
            Axis::Y => {
                ctx.set_text_align("left");
                ctx.set_text_baseline("middle");
            }
        }
        ctx.fill_text(&label.text, at.x, at.y)?;
    }
    Ok(())
}

/// Center a 1 px line on a device pixel.
fn crisp(v: f64) -> f64 {
    v.floor() + 0.5
}

// =============================================================
// Shapes
// =============================================================

fn trace_outline(ctx: &CanvasRenderingContext2d, screen: &[Point]) {
    ctx.begin_path();
    for (i, p) in screen.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x, p.y);
        } else {
            ctx.line_to(p.x, p.y);
        }
    }
    ctx.close_path();
}

fn fill_and_stroke(ctx: &CanvasRenderingContext2d, shape: &PlacedShape, highlighted: bool) -> Result<(), JsValue> {
    ctx.set_fill_style_str(&shape.fill);
    ctx.fill();
    if !highlighted {
        ctx.set_stroke_style_str(&shape.stroke);
        ctx.set_line_width(SHAPE_STROKE_PX);
        ctx.stroke();
        return Ok(());
    }

    let dash = js_sys::Array::new();
    for px in DRAG_DASH_PX {
        dash.push(&JsValue::from_f64(px));
    }
    ctx.set_stroke_style_str(DRAG_HIGHLIGHT);
    ctx.set_line_width(DRAG_HIGHLIGHT_PX);
    ctx.set_line_dash(&dash)?;
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new())?;
    Ok(())
}

// =============================================================
// Overlay
// =============================================================

/// Clear the page-fixed overlay and, while a lift is active, draw the lifted
/// shape centered under the pointer at the canvas's current scale.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_overlay(ctx: &CanvasRenderingContext2d, core: &EngineCore, size: Viewport) -> Result<(), JsValue> {
    ctx.set_transform(core.dpr, 0.0, 0.0, core.dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, size.width, size.height);

    let Some(lift) = core.input.lift() else {
        return Ok(());
    };

    let scale = core.view.px_per_world(core.viewport);
    let c = lift.shape.world_centroid();
    let page = Point::new(core.canvas_origin.x + lift.pointer.x, core.canvas_origin.y + lift.pointer.y);
    let screen: Vec<Point> = lift
        .shape
        .world_points()
        .into_iter()
        .map(|p| Point::new(page.x + (p.x - c.x) * scale, page.y + (p.y - c.y) * scale))
        .collect();

    ctx.set_global_alpha(LIFT_ALPHA);
    trace_outline(ctx, &screen);
    fill_and_stroke(ctx, &lift.shape, false)?;
    ctx.set_global_alpha(1.0);
    Ok(())
}
