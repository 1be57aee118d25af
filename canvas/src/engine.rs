use rand::Rng;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::camera::{PanAnimator, PanGrip, Point, ViewRect, Viewport, ZoomDirection};
use crate::config::DeskConfig;
use crate::consts::{CREATE_BATCH_MAX, CREATE_BATCH_MIN};
use crate::doc::{PlacedShape, ShapeId, ShapeLayer};
use crate::error::DeskError;
use crate::geometry::{Bounds, centroid, clamp_axis, format_points, parse_points};
use crate::hit;
use crate::input::{Button, InputState, LiftSession, Modifiers, PointerId, WheelDelta};
use crate::palette::{DragPayload, PaletteEntry, PaletteStore};
use crate::render;
use crate::scene::{SceneState, WorkRecord};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

const CURSOR_DEFAULT: &str = "default";
const CURSOR_GRABBING: &str = "grabbing";

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Scene or overlay changed; redraw on the next frame.
    RenderNeeded,
    /// The pan animation wants [`EngineCore::on_animation_frame`] on the next frame.
    RequestFrame,
    SetCursor(String),
    /// Palette contents changed; rebuild its DOM view.
    PaletteChanged,
}

/// Core engine state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub config: DeskConfig,
    pub view: ViewRect,
    pub pan: PanAnimator,
    /// Cosmetic zoom scalar; only drives grid label size.
    pub zoom: f64,
    pub viewport: Viewport,
    pub dpr: f64,
    pub layer: ShapeLayer,
    pub palette: PaletteStore,
    pub input: InputState,
    /// Palette element bounds in canvas-local screen coordinates.
    pub palette_rect: Option<Bounds>,
    /// Page position of the canvas's top-left corner.
    pub canvas_origin: Point,
    /// Palette entry currently being dragged toward the canvas.
    pub palette_drag: Option<usize>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::new(DeskConfig::default())
    }
}

impl EngineCore {
    #[must_use]
    pub fn new(config: DeskConfig) -> Self {
        let view = ViewRect::default();
        Self {
            config,
            view,
            pan: PanAnimator::new(&view),
            zoom: 1.0,
            viewport: Viewport::default(),
            dpr: 1.0,
            layer: ShapeLayer::new(),
            palette: PaletteStore::new(),
            input: InputState::default(),
            palette_rect: None,
            canvas_origin: Point::new(0.0, 0.0),
            palette_drag: None,
        }
    }

    // --- Viewport ---

    /// Update the canvas size and refit the view to its aspect ratio.
    ///
    /// A degenerate size is remembered but leaves the view untouched.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        self.viewport = Viewport::new(width_css, height_css);
        self.dpr = if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 };
        if let Some(view) = self.view.fitted_to(self.viewport) {
            self.view = view;
            self.pan.sync(&self.view);
            self.regrip_pan();
        }
        vec![Action::RenderNeeded]
    }

    pub fn set_palette_rect(&mut self, rect: Option<Bounds>) {
        self.palette_rect = rect;
    }

    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.canvas_origin = origin;
    }

    fn over_palette(&self, screen: Point) -> bool {
        self.palette_rect.is_some_and(|r| r.contains(screen))
    }

    // --- Zoom ---

    /// Zoom about the screen point, keeping the world point under it fixed.
    pub fn zoom_at(&mut self, screen: Point, direction: ZoomDirection) -> Vec<Action> {
        let anchor = self.view.screen_to_world(screen, self.viewport);
        self.view = self.view.zoomed(anchor, direction, &self.config);

        let k = match direction {
            ZoomDirection::In => self.config.zoom_in_factor,
            ZoomDirection::Out => self.config.zoom_out_factor,
        };
        self.zoom = (self.zoom * k).max(self.config.label_zoom_min).min(self.config.label_zoom_max);
        self.pan.sync(&self.view);
        self.regrip_pan();
        vec![Action::RenderNeeded]
    }

    /// A pan in progress continues from the current rect and scale.
    fn regrip_pan(&mut self) {
        if let InputState::Panning { grip, .. } = &mut self.input {
            *grip = grip.regrip(&self.view, self.viewport);
        }
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        if delta.dy < 0.0 {
            self.zoom_at(screen, ZoomDirection::In)
        } else if delta.dy > 0.0 {
            self.zoom_at(screen, ZoomDirection::Out)
        } else {
            Vec::new()
        }
    }

    // --- Pointer gestures ---

    pub fn on_pointer_down(
        &mut self,
        pointer_id: PointerId,
        screen: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        if !self.input.is_idle() {
            log::debug!("pointer {pointer_id} down ignored: gesture in progress");
            return Vec::new();
        }

        let world = self.view.screen_to_world(screen, self.viewport);
        let hit = hit::hit_test(world, &self.layer);

        match hit {
            Some(id) if modifiers.wants_lift() => self.begin_lift(pointer_id, id, screen),
            _ if button != Button::Primary => Vec::new(),
            Some(id) => {
                let Some(shape) = self.layer.get(&id) else {
                    return Vec::new();
                };
                self.input = InputState::DraggingShape {
                    pointer_id,
                    id,
                    origin_world: world,
                    origin_tx: shape.tx,
                    origin_ty: shape.ty,
                };
                log::debug!("drag start {id}");
                vec![Action::SetCursor(CURSOR_GRABBING.into()), Action::RenderNeeded]
            }
            None => {
                self.input = InputState::Panning { pointer_id, grip: PanGrip::new(&self.view, screen, self.viewport) };
                self.pan.sync(&self.view);
                self.pan.active = true;
                let mut actions = vec![Action::SetCursor(CURSOR_GRABBING.into())];
                if self.pan.kick() {
                    actions.push(Action::RequestFrame);
                }
                actions
            }
        }
    }

    pub fn on_pointer_move(&mut self, pointer_id: PointerId, screen: Point) -> Vec<Action> {
        if !self.input.is_owned_by(pointer_id) {
            return Vec::new();
        }

        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { grip, .. } => {
                self.pan.target = grip.follow(screen);
                if self.pan.kick() { vec![Action::RequestFrame] } else { Vec::new() }
            }
            InputState::DraggingShape { id, origin_world, origin_tx, origin_ty, .. } => {
                let (id, origin_world, origin_tx, origin_ty) = (*id, *origin_world, *origin_tx, *origin_ty);
                if self.over_palette(screen) {
                    return self.begin_lift(pointer_id, id, screen);
                }
                let world = self.view.screen_to_world(screen, self.viewport);
                let view = self.view;
                if let Some(shape) = self.layer.get_mut(&id) {
                    shape.tx = origin_tx + (world.x - origin_world.x);
                    shape.ty = origin_ty + (world.y - origin_world.y);
                    shape.clamp_into(&view);
                }
                vec![Action::RenderNeeded]
            }
            InputState::Lifting { session, .. } => {
                session.pointer = screen;
                vec![Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, pointer_id: PointerId, screen: Point) -> Vec<Action> {
        if !self.input.is_owned_by(pointer_id) {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Lifting { session, .. } => {
                if self.over_palette(screen) {
                    self.absorb_into_palette(session)
                } else {
                    self.return_lifted(session)
                }
            }
            other => self.end_gesture(other),
        }
    }

    /// Abort the gesture. A lifted shape always goes back to its slot.
    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) -> Vec<Action> {
        if !self.input.is_owned_by(pointer_id) {
            return Vec::new();
        }
        match std::mem::take(&mut self.input) {
            InputState::Lifting { session, .. } => self.return_lifted(session),
            other => self.end_gesture(other),
        }
    }

    fn end_gesture(&mut self, state: InputState) -> Vec<Action> {
        match state {
            InputState::Idle | InputState::Lifting { .. } => Vec::new(),
            InputState::Panning { .. } => {
                self.pan.active = false;
                let mut actions = vec![Action::SetCursor(CURSOR_DEFAULT.into())];
                if self.pan.kick() {
                    actions.push(Action::RequestFrame);
                }
                actions
            }
            InputState::DraggingShape { id, .. } => {
                let view = self.view;
                if let Some(shape) = self.layer.get_mut(&id) {
                    shape.clamp_into(&view);
                }
                log::debug!("drag end {id}");
                vec![Action::SetCursor(CURSOR_DEFAULT.into()), Action::RenderNeeded]
            }
        }
    }

    fn begin_lift(&mut self, pointer_id: PointerId, id: ShapeId, screen: Point) -> Vec<Action> {
        let Some((slot, shape)) = self.layer.remove(&id) else {
            self.input = InputState::Idle;
            return Vec::new();
        };
        log::debug!("lift {id} from slot {slot}");
        self.input = InputState::Lifting { pointer_id, session: LiftSession { shape, slot, pointer: screen } };
        vec![Action::SetCursor(CURSOR_GRABBING.into()), Action::RenderNeeded]
    }

    fn absorb_into_palette(&mut self, session: LiftSession) -> Vec<Action> {
        let shape = session.shape;
        let points = if shape.canonical.trim().is_empty() { format_points(&shape.points) } else { shape.canonical };
        log::debug!("lifted {} into palette", shape.id);
        self.palette.add([PaletteEntry::new(points, shape.fill, shape.stroke)]);
        vec![Action::SetCursor(CURSOR_DEFAULT.into()), Action::RenderNeeded, Action::PaletteChanged]
    }

    fn return_lifted(&mut self, session: LiftSession) -> Vec<Action> {
        let LiftSession { mut shape, slot, .. } = session;
        shape.clamp_into(&self.view);
        log::debug!("lift of {} returned to slot {slot}", shape.id);
        self.layer.insert_at(slot, shape);
        vec![Action::SetCursor(CURSOR_DEFAULT.into()), Action::RenderNeeded]
    }

    // --- Animation ---

    /// Advance the pan animation by one frame.
    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        let more = self.pan.step(&mut self.view, self.config.pan_alpha, self.config.pan_epsilon);
        let mut actions = vec![Action::RenderNeeded];
        if more {
            actions.push(Action::RequestFrame);
        }
        actions
    }

    // --- Cross-zone drag ---

    /// Remember which palette entry a drag started from.
    pub fn begin_palette_drag(&mut self, index: usize) {
        self.palette_drag = (index < self.palette.len()).then_some(index);
    }

    pub fn end_palette_drag(&mut self) {
        self.palette_drag = None;
    }

    /// Place a dragged palette shape on the canvas at `screen`.
    ///
    /// # Errors
    ///
    /// Returns the point-parse error when the payload outline is malformed;
    /// nothing is changed in that case.
    pub fn drop_payload(&mut self, screen: Point, payload: &DragPayload) -> Result<Vec<Action>, DeskError> {
        let canonical = parse_points(&payload.canonical_points)?;
        let at = self.view.screen_to_world(screen, self.viewport);
        let points = place_for_drop(&canonical, at, self.config.drop_target_width, &self.view);
        let shape = PlacedShape::new(points, &payload.fill, &payload.stroke, payload.canonical_points.clone());
        log::debug!("dropped {} at ({:.1}, {:.1})", shape.id, at.x, at.y);
        self.layer.push(shape);

        let mut actions = vec![Action::RenderNeeded];
        if let Some(index) = self.palette_drag.take() {
            let same = self.palette.get(index).is_some_and(|e| e.points == payload.canonical_points);
            if same && self.palette.take(index).is_some() {
                actions.push(Action::PaletteChanged);
            }
        }
        Ok(actions)
    }

    /// A payload dropped on the palette itself is appended; when it came
    /// from a palette entry that entry moves to the end.
    pub fn drop_on_palette(&mut self, payload: &DragPayload) -> Vec<Action> {
        if let Some(index) = self.palette_drag.take() {
            if self.palette.get(index).is_some_and(|e| e.points == payload.canonical_points) {
                self.palette.take(index);
            }
        }
        self.palette.accept_drop(payload);
        vec![Action::PaletteChanged]
    }

    // --- Toolbar ---

    /// Append a random batch of generated shapes to the palette.
    pub fn create_palette_shapes<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec<Action> {
        let n = rng.random_range(CREATE_BATCH_MIN..=CREATE_BATCH_MAX);
        let entries: Vec<PaletteEntry> = (0..n).map(|_| PaletteEntry::random(rng)).collect();
        self.palette.add(entries);
        log::info!("generated {n} palette shapes");
        vec![Action::PaletteChanged]
    }

    /// Clear both zones. The view is left where it is.
    pub fn reset(&mut self) -> Vec<Action> {
        self.input = InputState::Idle;
        self.palette_drag = None;
        self.palette.clear();
        self.layer.clear();
        vec![Action::SetCursor(CURSOR_DEFAULT.into()), Action::RenderNeeded, Action::PaletteChanged]
    }

    // --- Persistence ---

    /// Snapshot palette, layer, and view. A lifted shape is recorded in its slot.
    #[must_use]
    pub fn scene_state(&self) -> SceneState {
        let mut work: Vec<WorkRecord> = self.layer.iter().map(WorkRecord::from_shape).collect();
        if let Some(lift) = self.input.lift() {
            let slot = lift.slot.min(work.len());
            work.insert(slot, WorkRecord::from_shape(&lift.shape));
        }
        SceneState { buffer: self.palette.serialize(), work, view_box: Some(self.view) }
    }

    /// Replace all state with a stored scene.
    ///
    /// # Errors
    ///
    /// Returns the first invalid record's error. Nothing is applied unless
    /// every record is valid.
    pub fn load_scene(&mut self, state: SceneState) -> Result<Vec<Action>, DeskError> {
        let shapes = state.work.iter().map(WorkRecord::to_shape).collect::<Result<Vec<_>, _>>()?;
        for entry in &state.buffer {
            parse_points(&entry.points)?;
        }

        self.input = InputState::Idle;
        self.palette_drag = None;
        self.palette.clear();
        self.palette.add(state.buffer);
        self.layer.replace_all(shapes);

        match state.view_box {
            Some(view) if is_usable_view(&view) => {
                self.view = self.view_for_viewport(view);
                self.zoom = 1.0;
            }
            Some(view) => log::warn!("ignoring stored view {view:?}"),
            None => {}
        }
        self.pan.sync(&self.view);
        log::info!("loaded scene: {} palette, {} placed", self.palette.len(), self.layer.len());
        Ok(vec![Action::RenderNeeded, Action::PaletteChanged])
    }

    fn view_for_viewport(&self, view: ViewRect) -> ViewRect {
        view.fitted_to(self.viewport).unwrap_or(view)
    }

    // --- Queries ---

    #[must_use]
    pub fn shape(&self, id: &ShapeId) -> Option<&PlacedShape> {
        self.layer.get(id)
    }

    #[must_use]
    pub fn view(&self) -> ViewRect {
        self.view
    }

    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.view.screen_to_world(screen, self.viewport)
    }

    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.view.world_to_screen(world, self.viewport)
    }
}

fn is_usable_view(view: &ViewRect) -> bool {
    [view.x, view.y, view.width, view.height].iter().all(|v| v.is_finite()) && view.width > 0.0 && view.height > 0.0
}

/// Scale a palette outline so its bbox is `target_width` wide (scale 1 for a
/// zero-width outline), center it by centroid on `at`, then shift it back
/// inside `view` along each edge it crosses. An axis longer than the view is
/// centered on it.
#[must_use]
pub fn place_for_drop(canonical: &[Point], at: Point, target_width: f64, view: &ViewRect) -> Vec<Point> {
    let bb = Bounds::from_points(canonical);
    let scale = if bb.width() > 0.0 { target_width / bb.width() } else { 1.0 };
    let c = centroid(canonical);
    let placed: Vec<Point> =
        canonical.iter().map(|p| Point::new((p.x - c.x) * scale + at.x, (p.y - c.y) * scale + at.y)).collect();

    // Nudge inside per edge; an axis too long for the view is centered.
    let bb = Bounds::from_points(&placed);
    let dx = clamp_axis(bb.min_x, view.x, view.right() - bb.width()) - bb.min_x;
    let dy = clamp_axis(bb.min_y, view.y, view.bottom() - bb.height()) - bb.min_y;
    placed.into_iter().map(|p| Point::new(p.x + dx, p.y + dy)).collect()
}

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, JsValue> {
    canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(JsValue::from)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn backing_px(css: f64, dpr: f64) -> u32 {
    (css * dpr).round().max(0.0) as u32
}

/// The full canvas engine. Wraps `EngineCore` and owns the work canvas plus
/// the page-fixed overlay used to draw a lifted shape.
pub struct Engine {
    canvas: HtmlCanvasElement,
    overlay: HtmlCanvasElement,
    overlay_size: Viewport,
    pub core: EngineCore,
}

impl Engine {
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement, overlay: HtmlCanvasElement, config: DeskConfig) -> Self {
        Self { canvas, overlay, overlay_size: Viewport::default(), core: EngineCore::new(config) }
    }

    // --- Viewport ---

    /// Resize the work canvas backing store and refit the view.
    pub fn set_viewport(&mut self, width_css: f64, height_css: f64, dpr: f64) -> Vec<Action> {
        let actions = self.core.set_viewport(width_css, height_css, dpr);
        self.canvas.set_width(backing_px(width_css, self.core.dpr));
        self.canvas.set_height(backing_px(height_css, self.core.dpr));
        actions
    }

    /// Resize the overlay to the window.
    pub fn set_overlay_size(&mut self, width_css: f64, height_css: f64) {
        self.overlay_size = Viewport::new(width_css, height_css);
        self.overlay.set_width(backing_px(width_css, self.core.dpr));
        self.overlay.set_height(backing_px(height_css, self.core.dpr));
    }

    pub fn set_palette_rect(&mut self, rect: Option<Bounds>) {
        self.core.set_palette_rect(rect);
    }

    pub fn set_canvas_origin(&mut self, origin: Point) {
        self.core.set_canvas_origin(origin);
    }

    // --- Input events ---

    pub fn on_pointer_down(
        &mut self,
        pointer_id: PointerId,
        screen: Point,
        button: Button,
        modifiers: Modifiers,
    ) -> Vec<Action> {
        self.core.on_pointer_down(pointer_id, screen, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, pointer_id: PointerId, screen: Point) -> Vec<Action> {
        self.core.on_pointer_move(pointer_id, screen)
    }

    pub fn on_pointer_up(&mut self, pointer_id: PointerId, screen: Point) -> Vec<Action> {
        self.core.on_pointer_up(pointer_id, screen)
    }

    pub fn on_pointer_cancel(&mut self, pointer_id: PointerId) -> Vec<Action> {
        self.core.on_pointer_cancel(pointer_id)
    }

    pub fn on_wheel(&mut self, screen: Point, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(screen, delta)
    }

    pub fn on_animation_frame(&mut self) -> Vec<Action> {
        self.core.on_animation_frame()
    }

    // --- Render ---

    /// Draw the work canvas and the overlay.
    ///
    /// # Errors
    ///
    /// Returns `Err` if a 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx = context_2d(&self.canvas)?;
        render::draw_scene(&ctx, &self.core)?;
        let overlay = context_2d(&self.overlay)?;
        render::draw_overlay(&overlay, &self.core, self.overlay_size)
    }
}
