//! Scene engine for the polygon desk.
//!
//! This crate is compiled to WebAssembly and runs in the browser. It owns the
//! work canvas: the view rectangle and its pan/zoom, the adaptive grid, the
//! placed shapes, the palette contents, and the pointer state machine that
//! moves shapes between the two zones. The host crate wires DOM events to the
//! engine and acts on the returned [`engine::Action`]s (redraw, schedule a
//! frame, rebuild the palette view, change the cursor).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`camera`] | View rectangle, screen↔world mapping, zoom, pan animation |
//! | [`grid`] | Adaptive grid line and label layout |
//! | [`doc`] | Placed shapes and the ordered shape layer |
//! | [`palette`] | Palette store, entries, and the cross-zone drag payload |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Point-in-polygon hit testing |
//! | [`scene`] | Persisted scene record |
//! | [`geometry`] | Bounds, centroid, clamping, point strings, random outlines |
//! | [`render`] | Canvas2D drawing of the scene and the lift overlay |
//! | [`config`] | Tunable settings with validation |
//! | [`error`] | Crate error type |
//! | [`consts`] | Shared numeric and string constants |

pub mod camera;
pub mod config;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod hit;
pub mod input;
pub mod palette;
pub mod render;
pub mod scene;
