//! Gesture recognition core for swipetap.
//!
//! This crate turns pointer, touch and mouse input into gesture events:
//! - Input model: [`InputEvent`] and the per-family [`InputAdapter`]s
//! - Recognition: [`GestureEngine`] with tap, double tap, long press and
//!   four-direction swipe
//! - Delivery: [`Emitter`] subscriptions keyed by [`GestureKind`]
//! - Environment: [`detect_adapter_kind`] picks the adapter for a browser
//!
//! Nothing here touches the DOM. Time comes from a [`Clock`] and deferred
//! gestures are exposed as deadlines the host polls, so the engine runs the
//! same natively and under wasm.

pub mod adapter;
pub mod classify;
pub mod clock;
mod emitter;
pub mod engine;
pub mod environment;
pub mod event;
mod geometry;
mod options;
mod point_info;
pub mod timer;

pub use adapter::{ContactKey, ContactRef, InputAdapter};
pub use classify::{classify_release, classify_swipe, is_not_slided, Release, SwipeMetrics};
pub use clock::{Clock, ManualClock, SystemClock};
pub use emitter::{Emitter, Handler, SubscriptionId};
pub use engine::{Dispatch, EventGuard, EventPredicate, GestureEngine, OptionsObserver};
pub use environment::{
    detect_adapter_kind, is_android, is_ios, needs_touchend_workaround, AdapterKind, Environment,
    EnvironmentError, Supports,
};
pub use event::{
    GestureEvent, GestureKind, InputEvent, InputFamily, InputPhase, SwipeDirection, TouchRecord,
    UnknownGestureKind,
};
pub use geometry::{Millis, Point, PointError, TimedPoint};
pub use options::{GestureOptions, OptionsError};
pub use point_info::PointInfo;
