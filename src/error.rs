//! Errors surfaced to the host page.
//!
//! Pointer input never fails; these cover mounting the surface and talking to
//! the browser. At the wasm boundary they are converted to a `JsValue` string.

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("no global window")]
    MissingWindow,
    #[error("canvas element not found: {0}")]
    MissingCanvas(String),
    #[error("canvas 2d context unavailable")]
    MissingContext,
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),
    #[error("browser call failed: {0}")]
    Js(String),
}

impl From<JsValue> for SurfaceError {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<SurfaceError> for JsValue {
    fn from(err: SurfaceError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
