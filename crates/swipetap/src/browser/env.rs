//! Capability probing for adapter selection.

use crate::error::TranslatorError;
use swipetap_core::{Environment, Supports};
use wasm_bindgen::JsValue;

/// Read the user agent and the supported event families of this page.
///
/// Support is decided the way feature detection usually is in the browser:
/// the `on<type>` handler property exists on the root element.
pub fn probe_environment() -> Result<Environment, TranslatorError> {
    let window = web_sys::window().ok_or(TranslatorError::NoWindow)?;
    let user_agent = window.navigator().user_agent()?;
    let root: JsValue = window
        .document()
        .and_then(|document| document.document_element())
        .ok_or(TranslatorError::NoWindow)?
        .into();

    let has = |name: &str| js_sys::Reflect::has(&root, &JsValue::from_str(name)).unwrap_or(false);
    Ok(Environment::new(
        user_agent,
        Supports {
            pointer: has("onpointerdown"),
            touch: has("ontouchstart"),
            mouse: has("onmousedown"),
        },
    ))
}
