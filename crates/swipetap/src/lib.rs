//! swipetap: gesture events for the browser.
//!
//! Recognizes tap, double tap, long press and four-direction swipes from
//! whichever input family the browser offers (Pointer Events, Touch Events,
//! Mouse Events, or touch and mouse together).
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { GestureTranslator } from './swipetap.js';
//!
//! async function main() {
//!     await init();
//!     const gestures = new GestureTranslator(document.getElementById('stage'), {
//!         swipeDistance: 40,
//!         touchAction: 'none',
//!     });
//!     gestures.on('doubleTap', (e) => console.log('double tap at', e.point));
//! }
//! ```
//!
//! # Rust Usage
//!
//! The engine is re-exported from `swipetap-core` and runs natively, which is
//! how the test suites drive it:
//!
//! ```
//! use swipetap::{AdapterKind, GestureEngine, GestureKind, GestureOptions};
//!
//! let engine = GestureEngine::new(AdapterKind::Pointer, GestureOptions::default());
//! engine.on(GestureKind::SwipeLeft, |event| println!("{event:?}"));
//! ```

#![allow(clippy::module_name_repetitions, clippy::missing_const_for_fn)]

pub use swipetap_core::*;

pub mod error;
pub mod plan;

#[cfg(target_arch = "wasm32")]
pub mod browser;

pub use error::TranslatorError;
pub use plan::{timeout_delay, ListenerPlan};

#[cfg(target_arch = "wasm32")]
pub use browser::{
    init_logging, init_panic_hook, probe_environment, GestureTranslator, JsGestureTranslator,
};
