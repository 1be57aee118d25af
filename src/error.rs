//! Host-side error type.
//!
//! DOM calls fail with opaque `JsValue`s; this wraps them alongside engine
//! errors so startup can report one readable message.

use canvas::error::DeskError;
use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("no browser window")]
    NoWindow,
    #[error("missing element: {0}")]
    MissingElement(&'static str),
    #[error("local storage unavailable")]
    NoStorage,
    #[error("dom call failed: {0}")]
    Dom(String),
    #[error(transparent)]
    Desk(#[from] DeskError),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<HostError> for JsValue {
    fn from(value: HostError) -> Self {
        JsValue::from_str(&value.to_string())
    }
}
