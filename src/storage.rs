//! `localStorage` persistence for the scene record.
//!
//! The whole scene lives under one key. Reads never fail: a missing,
//! unreadable, or corrupt record loads as an empty scene.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use canvas::scene::SceneState;
use web_sys::Storage;

use crate::error::HostError;

fn local_storage() -> Result<Storage, HostError> {
    let window = web_sys::window().ok_or(HostError::NoWindow)?;
    window.local_storage()?.ok_or(HostError::NoStorage)
}

/// Decode a raw stored value.
#[must_use]
pub fn decode(raw: Option<String>) -> SceneState {
    SceneState::load_or_empty(raw.as_deref())
}

/// Load the scene stored under `key`.
pub fn load_scene(key: &str) -> SceneState {
    let raw = match local_storage().and_then(|s| s.get_item(key).map_err(HostError::from)) {
        Ok(raw) => raw,
        Err(e) => {
            log::warn!("reading {key}: {e}");
            None
        }
    };
    decode(raw)
}

/// Write the scene under `key`.
///
/// # Errors
///
/// Fails when storage is unavailable, full, or encoding fails.
pub fn save_scene(key: &str, scene: &SceneState) -> Result<(), HostError> {
    let raw = scene.to_json()?;
    local_storage()?.set_item(key, &raw)?;
    log::info!("saved scene: {} palette, {} placed", scene.buffer.len(), scene.work.len());
    Ok(())
}

/// Remove the stored scene.
///
/// # Errors
///
/// Fails when storage is unavailable.
pub fn clear_scene(key: &str) -> Result<(), HostError> {
    local_storage()?.remove_item(key)?;
    Ok(())
}
