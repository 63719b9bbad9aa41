//! Console logging and panic forwarding.

use std::sync::Once;
use wasm_bindgen::prelude::*;

static LOGGER: Once = Once::new();

/// Route `log` records at `level` and above to the browser console.
///
/// Only the first call installs the logger.
pub fn init_logging(level: log::Level) {
    LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::new(level)));
}

/// Forward Rust panics to `console.error`.
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Enable console logging from JS; `level` is `"error"` through `"trace"`.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging_js(level: &str) -> Result<(), JsValue> {
    let level = level
        .parse::<log::Level>()
        .map_err(|e| JsValue::from_str(&format!("invalid log level `{level}`: {e}")))?;
    init_logging(level);
    Ok(())
}

/// Initialize panic hook for better error messages.
#[wasm_bindgen(start)]
pub fn start() {
    init_panic_hook();
}
