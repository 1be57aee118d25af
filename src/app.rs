//! Event wiring between the DOM and the engine.
//!
//! The app is a single `Rc<App>` shared by every listener. Handlers borrow
//! the engine only for the duration of one engine call, then act on the
//! returned [`Action`]s: redraws and pan frames go through one
//! `requestAnimationFrame` guard, so at most one frame is ever pending.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use canvas::camera::Point;
use canvas::consts::DRAG_MIME;
use canvas::engine::{Action, Engine};
use canvas::geometry::Bounds;
use canvas::input::{Button, Modifiers, WheelDelta};
use canvas::palette::DragPayload;
use rand::SeedableRng;
use rand::rngs::StdRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Document, DomRect, DragEvent, Event, EventTarget, PointerEvent, WheelEvent, Window};

use crate::error::HostError;
use crate::palette_view;
use crate::shell::{self, Command, Shell};
use crate::storage;

struct App {
    window: Window,
    document: Document,
    shell: Shell,
    engine: RefCell<Engine>,
    rng: RefCell<StdRng>,
    frame_pending: Cell<bool>,
    storage_key: String,
}

/// Build the page, restore the saved scene, and start listening.
///
/// # Errors
///
/// Fails when the page shell cannot be built or a listener cannot be attached.
pub fn mount() -> Result<(), HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    let document = window.document().ok_or(HostError::MissingElement("document"))?;
    let mut shell = shell::build(&document)?;
    let config = std::mem::take(&mut shell.config);
    let storage_key = config.storage_key.clone();
    let engine = Engine::new(shell.canvas.clone(), shell.overlay.clone(), config);

    let app = Rc::new(App {
        window,
        document,
        shell,
        engine: RefCell::new(engine),
        rng: RefCell::new(StdRng::seed_from_u64(entropy_seed())),
        frame_pending: Cell::new(false),
        storage_key,
    });

    app.sync_layout();
    app.restore();
    wire_canvas(&app)?;
    wire_palette(&app)?;
    wire_toolbar(&app)?;
    wire_window(&app)?;
    app.render_palette();
    app.request_frame();
    log::info!("desk mounted");
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let lo = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (hi << 32) | lo
}

/// `rect` translated so `origin` becomes (0, 0).
#[must_use]
pub fn relative_bounds(left: f64, top: f64, right: f64, bottom: f64, origin: Point) -> Bounds {
    Bounds::new(left - origin.x, top - origin.y, right - origin.x, bottom - origin.y)
}

/// Canvas-local position of a client-space point.
#[must_use]
pub fn local_point(client_x: f64, client_y: f64, origin: Point) -> Point {
    Point::new(client_x - origin.x, client_y - origin.y)
}

fn rect_origin(rect: &DomRect) -> Point {
    Point::new(rect.left(), rect.top())
}

impl App {
    fn canvas_origin(&self) -> Point {
        rect_origin(&self.shell.canvas.get_bounding_client_rect())
    }

    /// Push element geometry into the engine: canvas size, then origin and
    /// palette rect.
    fn sync_layout(self: &Rc<Self>) {
        let rect = self.shell.canvas.get_bounding_client_rect();
        let dpr = self.window.device_pixel_ratio();
        let (win_w, win_h) = (number(self.window.inner_width()), number(self.window.inner_height()));
        let actions = {
            let mut engine = self.engine.borrow_mut();
            engine.set_overlay_size(win_w, win_h);
            engine.set_viewport(rect.width(), rect.height(), dpr)
        };
        self.sync_geometry();
        self.process_actions(actions);
    }

    /// Page origin of the canvas and the palette rect in canvas-local
    /// coordinates. Both move with scrolling and layout changes.
    fn sync_geometry(&self) {
        let origin = self.canvas_origin();
        let palette = self.shell.palette_zone.get_bounding_client_rect();
        let mut engine = self.engine.borrow_mut();
        engine.set_canvas_origin(origin);
        engine.set_palette_rect(Some(relative_bounds(
            palette.left(),
            palette.top(),
            palette.right(),
            palette.bottom(),
            origin,
        )));
    }

    fn restore(self: &Rc<Self>) {
        let scene = storage::load_scene(&self.storage_key);
        if scene.is_empty() {
            return;
        }
        let result = self.engine.borrow_mut().core.load_scene(scene);
        match result {
            Ok(actions) => self.process_actions(actions),
            Err(e) => log::error!("stored scene rejected: {e}"),
        }
    }

    fn render_palette(&self) {
        let engine = self.engine.borrow();
        if let Err(e) = palette_view::render(&self.document, &self.shell.palette_list, engine.core.palette.entries()) {
            log::error!("palette render failed: {e}");
        }
    }

    fn set_cursor(&self, cursor: &str) {
        if let Err(e) = self.shell.canvas.style().set_property("cursor", cursor) {
            log::warn!("cursor: {}", HostError::from(e));
        }
    }

    fn report(&self, command: Command, succeeded: bool) {
        self.shell.status.set_text_content(Some(shell::status_text(command, succeeded)));
    }

    fn process_actions(self: &Rc<Self>, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::RenderNeeded | Action::RequestFrame => self.request_frame(),
                Action::SetCursor(cursor) => self.set_cursor(&cursor),
                Action::PaletteChanged => self.render_palette(),
            }
        }
    }

    /// Schedule one frame; no-op while a frame is already pending.
    fn request_frame(self: &Rc<Self>) {
        if self.frame_pending.get() {
            return;
        }
        self.frame_pending.set(true);

        let app = Rc::clone(self);
        let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let holder_for_cb = Rc::clone(&holder);
        let cb = Closure::wrap(Box::new(move |_ts: f64| {
            app.frame_pending.set(false);
            app.run_frame();
            holder_for_cb.borrow_mut().take();
        }) as Box<dyn FnMut(f64)>);

        if self.window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
            *holder.borrow_mut() = Some(cb);
        } else {
            self.frame_pending.set(false);
            self.run_frame();
        }
    }

    /// One animation frame: advance the pan if it asked for a frame, then draw.
    fn run_frame(self: &Rc<Self>) {
        let actions = {
            let mut engine = self.engine.borrow_mut();
            let actions = if engine.core.pan.frame_pending { engine.on_animation_frame() } else { Vec::new() };
            if let Err(e) = engine.render() {
                log::error!("render failed: {}", HostError::from(e));
            }
            actions
        };
        // This frame already drew.
        self.process_actions(actions.into_iter().filter(|a| *a != Action::RenderNeeded).collect());
    }
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), HostError>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_active<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), HostError>
where
    F: FnMut(Event) + 'static,
{
    let options = AddEventListenerOptions::new();
    options.set_passive(false);
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

fn modifiers(ev: &PointerEvent) -> Modifiers {
    Modifiers { shift: ev.shift_key(), ctrl: ev.ctrl_key(), alt: ev.alt_key(), meta: ev.meta_key() }
}

fn number(value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>) -> f64 {
    match value {
        Ok(v) => v.as_f64().unwrap_or(0.0),
        Err(_) => 0.0,
    }
}

fn wire_canvas(app: &Rc<App>) -> Result<(), HostError> {
    let target: &EventTarget = app.shell.canvas.as_ref();

    let a = Rc::clone(app);
    listen(target, "pointerdown", move |ev| {
        let Some(ev) = ev.dyn_ref::<PointerEvent>() else { return };
        ev.prevent_default();
        a.sync_geometry();
        let screen = local_point(f64::from(ev.client_x()), f64::from(ev.client_y()), a.canvas_origin());
        let actions =
            a.engine.borrow_mut().on_pointer_down(ev.pointer_id(), screen, Button::from_dom(ev.button()), modifiers(ev));
        if !a.engine.borrow().core.input.is_idle() {
            if let Err(e) = a.shell.canvas.set_pointer_capture(ev.pointer_id()) {
                log::warn!("pointer capture: {}", HostError::from(e));
            }
        }
        a.process_actions(actions);
    })?;

    let a = Rc::clone(app);
    listen(target, "pointermove", move |ev| {
        let Some(ev) = ev.dyn_ref::<PointerEvent>() else { return };
        let screen = local_point(f64::from(ev.client_x()), f64::from(ev.client_y()), a.canvas_origin());
        let actions = a.engine.borrow_mut().on_pointer_move(ev.pointer_id(), screen);
        a.process_actions(actions);
    })?;

    let a = Rc::clone(app);
    listen(target, "pointerup", move |ev| {
        let Some(ev) = ev.dyn_ref::<PointerEvent>() else { return };
        let screen = local_point(f64::from(ev.client_x()), f64::from(ev.client_y()), a.canvas_origin());
        let actions = a.engine.borrow_mut().on_pointer_up(ev.pointer_id(), screen);
        a.process_actions(actions);
    })?;

    let a = Rc::clone(app);
    listen(target, "pointercancel", move |ev| {
        let Some(ev) = ev.dyn_ref::<PointerEvent>() else { return };
        let actions = a.engine.borrow_mut().on_pointer_cancel(ev.pointer_id());
        a.process_actions(actions);
    })?;

    let a = Rc::clone(app);
    listen_active(target, "wheel", move |ev| {
        let Some(ev) = ev.dyn_ref::<WheelEvent>() else { return };
        ev.prevent_default();
        let screen = local_point(f64::from(ev.client_x()), f64::from(ev.client_y()), a.canvas_origin());
        let delta = WheelDelta { dx: ev.delta_x(), dy: ev.delta_y() };
        let actions = a.engine.borrow_mut().on_wheel(screen, delta);
        a.process_actions(actions);
    })?;

    listen(target, "dragover", move |ev| {
        let Some(ev) = ev.dyn_ref::<DragEvent>() else { return };
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
    })?;

    let a = Rc::clone(app);
    listen(target, "drop", move |ev| {
        let Some(ev) = ev.dyn_ref::<DragEvent>() else { return };
        ev.prevent_default();
        let Some(payload) = read_payload(ev) else { return };
        let screen = local_point(f64::from(ev.client_x()), f64::from(ev.client_y()), a.canvas_origin());
        let result = a.engine.borrow_mut().core.drop_payload(screen, &payload);
        match result {
            Ok(actions) => a.process_actions(actions),
            Err(e) => log::warn!("drop rejected: {e}"),
        }
    })?;

    Ok(())
}

/// Decode the drag payload; empty or malformed data is a no-op.
fn read_payload(ev: &DragEvent) -> Option<DragPayload> {
    let raw = match ev.data_transfer()?.get_data(DRAG_MIME) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("drag data: {}", HostError::from(e));
            return None;
        }
    };
    match DragPayload::from_json(&raw) {
        Ok(payload) => payload,
        Err(e) => {
            log::warn!("bad drag payload: {e}");
            None
        }
    }
}

fn wire_palette(app: &Rc<App>) -> Result<(), HostError> {
    let list: &EventTarget = app.shell.palette_list.as_ref();
    let zone: &EventTarget = app.shell.palette_zone.as_ref();

    let a = Rc::clone(app);
    listen(list, "dragstart", move |ev| {
        let Some(drag) = ev.dyn_ref::<DragEvent>() else { return };
        let Some(index) = palette_view::index_of_target(&ev) else { return };
        let payload = {
            let mut engine = a.engine.borrow_mut();
            engine.core.begin_palette_drag(index);
            engine.core.palette.get(index).map(canvas::palette::PaletteEntry::payload)
        };
        let (Some(payload), Some(dt)) = (payload, drag.data_transfer()) else { return };
        dt.set_effect_allowed("move");
        let stored = payload.to_json().map_err(HostError::from).and_then(|raw| {
            dt.set_data(DRAG_MIME, &raw).map_err(HostError::from)
        });
        if let Err(e) = stored {
            log::warn!("drag start: {e}");
        }
    })?;

    let a = Rc::clone(app);
    listen(list, "dragend", move |_ev| {
        a.engine.borrow_mut().core.end_palette_drag();
    })?;

    listen(zone, "dragover", move |ev| {
        let Some(ev) = ev.dyn_ref::<DragEvent>() else { return };
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("move");
        }
    })?;

    let a = Rc::clone(app);
    listen(zone, "drop", move |ev| {
        let Some(ev) = ev.dyn_ref::<DragEvent>() else { return };
        ev.prevent_default();
        let Some(payload) = read_payload(ev) else { return };
        let actions = a.engine.borrow_mut().core.drop_on_palette(&payload);
        a.process_actions(actions);
    })?;

    Ok(())
}

fn wire_toolbar(app: &Rc<App>) -> Result<(), HostError> {
    let a = Rc::clone(app);
    listen(app.shell.create.as_ref(), "click", move |_ev| {
        let actions = {
            let mut rng = a.rng.borrow_mut();
            a.engine.borrow_mut().core.create_palette_shapes(&mut *rng)
        };
        a.process_actions(actions);
    })?;

    let a = Rc::clone(app);
    listen(app.shell.save.as_ref(), "click", move |_ev| {
        let scene = a.engine.borrow().core.scene_state();
        let saved = storage::save_scene(&a.storage_key, &scene);
        if let Err(e) = &saved {
            log::error!("save failed: {e}");
        }
        a.report(Command::Save, saved.is_ok());
    })?;

    let a = Rc::clone(app);
    listen(app.shell.reset.as_ref(), "click", move |_ev| {
        let cleared = storage::clear_scene(&a.storage_key);
        if let Err(e) = &cleared {
            log::error!("clearing stored scene failed: {e}");
        }
        let actions = a.engine.borrow_mut().core.reset();
        a.process_actions(actions);
        a.report(Command::Reset, cleared.is_ok());
    })?;

    Ok(())
}

fn wire_window(app: &Rc<App>) -> Result<(), HostError> {
    let a = Rc::clone(app);
    listen(app.window.as_ref(), "resize", move |_ev| a.sync_layout())?;
    Ok(())
}
