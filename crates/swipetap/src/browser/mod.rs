//! Browser front end: DOM listeners around a [`GestureEngine`].
//!
//! [`GestureEngine`]: swipetap_core::GestureEngine

pub mod bindings;
pub mod env;
pub mod events;
pub mod logging;
pub mod translator;

pub use bindings::JsGestureTranslator;
pub use env::probe_environment;
pub use events::to_input_event;
pub use logging::{init_logging, init_panic_hook};
pub use translator::GestureTranslator;
