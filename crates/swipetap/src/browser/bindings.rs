//! JavaScript API.

use super::translator::GestureTranslator;
use crate::error::TranslatorError;
use std::collections::HashMap;
use std::str::FromStr;
use swipetap_core::{GestureEvent, GestureKind, GestureOptions, InputEvent, SubscriptionId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

/// Gesture recognition on a DOM element, for JavaScript callers.
///
/// Handlers receive the gesture as a plain object, e.g.
/// `{ type: "tap", event: {...}, point: { x, y } }`.
#[wasm_bindgen(js_name = GestureTranslator)]
pub struct JsGestureTranslator {
    inner: GestureTranslator,
    handles: HashMap<u32, SubscriptionId>,
    next_handle: u32,
}

#[wasm_bindgen(js_class = GestureTranslator)]
impl JsGestureTranslator {
    /// Attach to `element`.
    ///
    /// `options` is a plain object with any of the camelCase option names,
    /// plus optional `preventDefaultCallback` and `stopPropagationCallback`
    /// functions.
    #[wasm_bindgen(constructor)]
    pub fn new(element: Element, options: JsValue) -> Result<JsGestureTranslator, JsValue> {
        let parsed = parse_options(&options)?;
        let inner = GestureTranslator::new(element, parsed)?;
        {
            let mut engine = inner.engine_mut();
            if let Some(callback) = function_field(&options, "preventDefaultCallback") {
                engine.set_prevent_default_callback(move |event| call_predicate(&callback, event));
            }
            if let Some(callback) = function_field(&options, "stopPropagationCallback") {
                engine.set_stop_propagation_callback(move |event| call_predicate(&callback, event));
            }
            if let Some(callback) = function_field(&options, "preventTranslateCallback") {
                engine.set_prevent_translate_callback(move |event| {
                    call_predicate(&callback, event)
                });
            }
        }
        Ok(Self {
            inner,
            handles: HashMap::new(),
            next_handle: 0,
        })
    }

    /// Subscribe `handler` to `event_type` (`"tap"`, `"swipeLeft"`,
    /// `"controller:event:doubletap"`, ...). Returns a handle for [`off`].
    ///
    /// [`off`]: JsGestureTranslator::off
    pub fn on(&mut self, event_type: &str, handler: js_sys::Function) -> Result<u32, JsValue> {
        let kind = GestureKind::from_str(event_type)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let id = self.inner.on(kind, move |event| {
            let payload = to_js(event);
            if let Err(err) = handler.call1(&JsValue::NULL, &payload) {
                log::error!("{kind} handler threw: {err:?}");
            }
        });
        self.next_handle += 1;
        self.handles.insert(self.next_handle, id);
        Ok(self.next_handle)
    }

    /// Remove one subscription by handle.
    pub fn off(&mut self, handle: u32) -> bool {
        self.handles
            .remove(&handle)
            .is_some_and(|id| self.inner.off(id))
    }

    /// Remove every subscription to `event_type`.
    #[wasm_bindgen(js_name = offType)]
    pub fn off_type(&mut self, event_type: &str) -> Result<(), JsValue> {
        let kind = GestureKind::from_str(event_type)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.inner.off_kind(kind);
        Ok(())
    }

    /// Current options as a plain object.
    #[wasm_bindgen(getter)]
    pub fn options(&self) -> Result<JsValue, JsValue> {
        let json = serde_json::to_string(self.inner.engine().options())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        js_sys::JSON::parse(&json)
    }

    /// Change some options; fields not present keep their current values.
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&self, changes: JsValue) -> Result<(), JsValue> {
        let current = self.inner.engine().options().clone();
        let merged = merge_options(&current, &stringify(&changes)?)?;
        self.inner.engine_mut().set_options(merged);
        Ok(())
    }

    /// Adapter in use: `"pointer"`, `"touch"`, `"mouse"` or `"touchAndMouse"`.
    #[wasm_bindgen(getter)]
    pub fn adapter(&self) -> String {
        serde_json::to_value(self.inner.kind())
            .ok()
            .and_then(|v| v.as_str().map(str::to_owned))
            .unwrap_or_default()
    }

    /// Detach from the element. Safe to call more than once.
    pub fn destroy(&mut self) {
        self.handles.clear();
        self.inner.destroy();
    }
}

fn stringify(value: &JsValue) -> Result<String, TranslatorError> {
    if value.is_undefined() || value.is_null() {
        return Ok("{}".to_string());
    }
    let json = js_sys::JSON::stringify(value)?;
    Ok(String::from(json))
}

fn parse_options(value: &JsValue) -> Result<GestureOptions, TranslatorError> {
    Ok(GestureOptions::from_json(&stringify(value)?)?)
}

/// Overlay the fields of `changes` (a JSON object) on `current`.
fn merge_options(
    current: &GestureOptions,
    changes: &str,
) -> Result<GestureOptions, TranslatorError> {
    let to_error = |e: serde_json::Error| TranslatorError::Options(e.into());
    let mut base = serde_json::to_value(current).map_err(to_error)?;
    let overlay: serde_json::Value = serde_json::from_str(changes).map_err(to_error)?;
    if let (Some(base), Some(overlay)) = (base.as_object_mut(), overlay.as_object()) {
        for (key, value) in overlay {
            base.insert(key.clone(), value.clone());
        }
    }
    serde_json::from_value(base).map_err(to_error)
}

fn function_field(object: &JsValue, name: &str) -> Option<js_sys::Function> {
    if !object.is_object() {
        return None;
    }
    js_sys::Reflect::get(object, &JsValue::from_str(name))
        .ok()?
        .dyn_into::<js_sys::Function>()
        .ok()
}

fn call_predicate(callback: &js_sys::Function, event: &InputEvent) -> bool {
    let payload = serde_json::to_string(event)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::UNDEFINED);
    callback
        .call1(&JsValue::NULL, &payload)
        .map(|result| result.is_truthy())
        .unwrap_or(false)
}

fn to_js(event: &GestureEvent) -> JsValue {
    serde_json::to_string(event)
        .ok()
        .and_then(|json| js_sys::JSON::parse(&json).ok())
        .unwrap_or(JsValue::UNDEFINED)
}
