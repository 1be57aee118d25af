//! Page shell: toolbar, palette zone, work canvas, and the lift overlay.
//!
//! The markup is injected into `#app` (or `<body>` when absent). The mount
//! element may carry a `data-config` attribute with a JSON settings override.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use canvas::config::DeskConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlCanvasElement, HtmlElement};

use crate::error::HostError;

const MOUNT_ID: &str = "app";

const MARKUP: &str = r#"
<style>
  html, body { margin: 0; height: 100%; background: #141414; color: #ddd; font-family: sans-serif; }
  .desk { display: flex; flex-direction: column; height: 100vh; }
  .toolbar { display: flex; gap: 8px; padding: 8px; border-bottom: 1px solid #2a2a2a; }
  .toolbar button { background: #2a2a2a; color: #ddd; border: 1px solid #3a3a3a; border-radius: 4px; padding: 4px 12px; cursor: pointer; }
  .toolbar button:hover { background: #343434; }
  .status { align-self: center; margin-left: 8px; color: #8e8e8e; font-size: 13px; }
  .zones { flex: 1; display: flex; min-height: 0; }
  .buffer { width: 240px; overflow-y: auto; border-right: 1px solid #2a2a2a; background: #181818; }
  .buffer-list { display: grid; grid-template-columns: 1fr 1fr; gap: 6px; padding: 6px; min-height: 100%; box-sizing: border-box; }
  .buffer-item { background: #202020; border-radius: 4px; cursor: grab; }
  .buffer-item svg { display: block; width: 100%; height: 70px; pointer-events: none; }
  .work { flex: 1; position: relative; min-width: 0; }
  #work { display: block; width: 100%; height: 100%; touch-action: none; }
  #lift-overlay { position: fixed; left: 0; top: 0; width: 100vw; height: 100vh; pointer-events: none; z-index: 10; }
</style>
<div class="desk">
  <header class="toolbar">
    <button id="create" type="button">Create</button>
    <button id="save" type="button">Save</button>
    <button id="reset" type="button">Reset</button>
    <span id="status" class="status" role="status"></span>
  </header>
  <div class="zones">
    <aside id="buffer" class="buffer"><div id="buffer-list" class="buffer-list"></div></aside>
    <main class="work"><canvas id="work"></canvas></main>
  </div>
</div>
<canvas id="lift-overlay"></canvas>
"#;

/// Handles to every element the host wires up.
pub struct Shell {
    pub canvas: HtmlCanvasElement,
    pub overlay: HtmlCanvasElement,
    /// Whole palette column; the lift drop target.
    pub palette_zone: HtmlElement,
    /// Container the thumbnails are rendered into.
    pub palette_list: HtmlElement,
    pub create: HtmlElement,
    pub save: HtmlElement,
    pub reset: HtmlElement,
    /// Toolbar line confirming the last save or reset.
    pub status: HtmlElement,
    pub config: DeskConfig,
}

/// Settings from the mount element's `data-config`, falling back to the
/// defaults when absent or invalid.
#[must_use]
pub fn config_from_attr(raw: Option<String>) -> DeskConfig {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return DeskConfig::default();
    };
    match DeskConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring data-config: {e}");
            DeskConfig::default()
        }
    }
}

/// Toolbar commands that report back to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Save,
    Reset,
}

/// Status line text for a finished command.
#[must_use]
pub fn status_text(command: Command, succeeded: bool) -> &'static str {
    match (command, succeeded) {
        (Command::Save, true) => "Saved",
        (Command::Save, false) => "Save failed",
        (Command::Reset, true) => "Cleared",
        (Command::Reset, false) => "Cleared (stored copy could not be removed)",
    }
}

fn element<T: JsCast>(document: &Document, id: &'static str) -> Result<T, HostError> {
    document
        .get_element_by_id(id)
        .ok_or(HostError::MissingElement(id))?
        .dyn_into::<T>()
        .map_err(|_| HostError::MissingElement(id))
}

/// Inject the page markup and collect the element handles.
///
/// # Errors
///
/// Fails when there is no mount point or an injected element cannot be found.
pub fn build(document: &Document) -> Result<Shell, HostError> {
    let mount = match document.get_element_by_id(MOUNT_ID) {
        Some(el) => el,
        None => document.body().ok_or(HostError::MissingElement("body"))?.into(),
    };
    let config = config_from_attr(mount.get_attribute("data-config"));
    mount.set_inner_html(MARKUP);

    Ok(Shell {
        canvas: element(document, "work")?,
        overlay: element(document, "lift-overlay")?,
        palette_zone: element(document, "buffer")?,
        palette_list: element(document, "buffer-list")?,
        create: element(document, "create")?,
        save: element(document, "save")?,
        reset: element(document, "reset")?,
        status: element(document, "status")?,
        config,
    })
}
