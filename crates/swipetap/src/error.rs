//! Errors raised while attaching a translator to the page.

use swipetap_core::{EnvironmentError, OptionsError};
use thiserror::Error;

/// Translator setup error.
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// No usable input family in this browser.
    #[error(transparent)]
    Environment(#[from] EnvironmentError),
    /// The options object could not be parsed.
    #[error(transparent)]
    Options(#[from] OptionsError),
    /// A DOM call threw.
    #[error("javascript error: {0}")]
    Js(String),
    /// No `window` or `document` (worker or non-browser host).
    #[error("no browser window or document")]
    NoWindow,
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for TranslatorError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<TranslatorError> for wasm_bindgen::JsValue {
    fn from(error: TranslatorError) -> Self {
        js_sys::Error::new(&error.to_string()).into()
    }
}
