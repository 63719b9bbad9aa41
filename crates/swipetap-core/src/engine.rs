//! Gesture engine: guard, tracking hooks, classification and timers.
//!
//! The engine is host-agnostic. A host feeds it [`InputEvent`]s, applies the
//! returned [`Dispatch`] to the native event, and calls
//! [`GestureEngine::poll_timers`] once [`GestureEngine::next_deadline`] has
//! passed. Recognized gestures are delivered through the engine's [`Emitter`].

use crate::adapter::{ContactKey, ContactRef, InputAdapter};
use crate::classify::{classify_release, is_not_slided, Release};
use crate::clock::{Clock, SystemClock};
use crate::emitter::{Emitter, SubscriptionId};
use crate::environment::AdapterKind;
use crate::event::{GestureEvent, GestureKind, InputEvent, InputFamily, InputPhase};
use crate::geometry::{Millis, Point, TimedPoint};
use crate::options::GestureOptions;
use crate::point_info::PointInfo;
use crate::timer::{KeyedTimers, TimerSlot};
use std::fmt;
use std::rc::Rc;

/// Per-event decision callback.
pub type EventPredicate = Rc<dyn Fn(&InputEvent) -> bool>;

/// Observer called with the previous and the new options.
pub type OptionsObserver = Rc<dyn Fn(&GestureOptions, &GestureOptions)>;

/// Per-event overrides for the native event policy.
///
/// Unset callbacks fall back to the `prevent_default` and `stop_propagation`
/// options; an unset translate callback never skips.
#[derive(Clone, Default)]
pub struct EventGuard {
    /// Whether to suppress the native default action.
    pub prevent_default_callback: Option<EventPredicate>,
    /// Whether to stop native propagation.
    pub stop_propagation_callback: Option<EventPredicate>,
    /// Whether to skip gesture handling for the event entirely.
    pub prevent_translate_callback: Option<EventPredicate>,
}

impl EventGuard {
    /// Decide `preventDefault` for `event`.
    #[must_use]
    pub fn prevent_default(&self, event: &InputEvent, options: &GestureOptions) -> bool {
        self.prevent_default_callback
            .as_ref()
            .map_or(options.prevent_default, |f| f(event))
    }

    /// Decide `stopPropagation` for `event`.
    #[must_use]
    pub fn stop_propagation(&self, event: &InputEvent, options: &GestureOptions) -> bool {
        self.stop_propagation_callback
            .as_ref()
            .map_or(options.stop_propagation, |f| f(event))
    }

    /// True if `event` must not reach the tracking hooks.
    #[must_use]
    pub fn prevent_translate(&self, event: &InputEvent) -> bool {
        self.prevent_translate_callback
            .as_ref()
            .is_some_and(|f| f(event))
    }
}

impl fmt::Debug for EventGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventGuard")
            .field("prevent_default_callback", &self.prevent_default_callback.is_some())
            .field("stop_propagation_callback", &self.stop_propagation_callback.is_some())
            .field(
                "prevent_translate_callback",
                &self.prevent_translate_callback.is_some(),
            )
            .finish()
    }
}

/// What the host must do with a native event, and what it produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dispatch {
    /// Call `preventDefault()` on the native event.
    pub prevent_default: bool,
    /// Call `stopPropagation()` on the native event.
    pub stop_propagation: bool,
    /// False if the event was ignored or skipped by the guard.
    pub translated: bool,
    /// Pointer id to capture on the target element.
    pub capture_pointer: Option<i32>,
    /// Gesture events produced, in emission order.
    pub events: Vec<GestureEvent>,
}

#[derive(Debug, Clone)]
struct PendingTap {
    event: InputEvent,
    point: Point,
}

/// Recognizes taps, double taps, long presses and swipes from one input
/// family.
pub struct GestureEngine {
    adapter: Box<dyn InputAdapter>,
    options: GestureOptions,
    guard: EventGuard,
    emitter: Emitter,
    clock: Rc<dyn Clock>,
    pending_tap: TimerSlot<PendingTap>,
    long_presses: KeyedTimers<ContactKey, ContactRef>,
    last_event: Option<InputEvent>,
    observers: Vec<OptionsObserver>,
    destroyed: bool,
}

impl GestureEngine {
    /// Create an engine for `kind` on the system clock.
    #[must_use]
    pub fn new(kind: AdapterKind, options: GestureOptions) -> Self {
        Self::with_clock(kind, options, Rc::new(SystemClock::new()))
    }

    /// Create an engine for `kind` reading time from `clock`.
    #[must_use]
    pub fn with_clock(kind: AdapterKind, options: GestureOptions, clock: Rc<dyn Clock>) -> Self {
        Self::with_adapter(kind.create_adapter(), options, clock)
    }

    /// Create an engine around a prebuilt adapter.
    #[must_use]
    pub fn with_adapter(
        adapter: Box<dyn InputAdapter>,
        options: GestureOptions,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            adapter,
            options,
            guard: EventGuard::default(),
            emitter: Emitter::new(),
            clock,
            pending_tap: TimerSlot::new(),
            long_presses: KeyedTimers::default(),
            last_event: None,
            observers: Vec::new(),
            destroyed: false,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The adapter kind driving this engine.
    #[must_use]
    pub fn kind(&self) -> AdapterKind {
        self.adapter.kind()
    }

    /// Current options.
    #[must_use]
    pub const fn options(&self) -> &GestureOptions {
        &self.options
    }

    /// Replace the options and notify observers.
    pub fn set_options(&mut self, options: GestureOptions) {
        let previous = std::mem::replace(&mut self.options, options);
        if previous != self.options {
            for observer in &self.observers {
                observer(&previous, &self.options);
            }
        }
    }

    /// Modify the options in place and notify observers.
    pub fn update_options(&mut self, update: impl FnOnce(&mut GestureOptions)) {
        let mut options = self.options.clone();
        update(&mut options);
        self.set_options(options);
    }

    /// Observe option changes.
    pub fn on_options_changed(
        &mut self,
        observer: impl Fn(&GestureOptions, &GestureOptions) + 'static,
    ) {
        self.observers.push(Rc::new(observer));
    }

    /// The event guard.
    #[must_use]
    pub const fn guard(&self) -> &EventGuard {
        &self.guard
    }

    /// Mutable access to the event guard.
    pub fn guard_mut(&mut self) -> &mut EventGuard {
        &mut self.guard
    }

    /// Override the `preventDefault` decision per event.
    pub fn set_prevent_default_callback(&mut self, f: impl Fn(&InputEvent) -> bool + 'static) {
        self.guard.prevent_default_callback = Some(Rc::new(f));
    }

    /// Override the `stopPropagation` decision per event.
    pub fn set_stop_propagation_callback(&mut self, f: impl Fn(&InputEvent) -> bool + 'static) {
        self.guard.stop_propagation_callback = Some(Rc::new(f));
    }

    /// Skip gesture handling for events where `f` returns true.
    pub fn set_prevent_translate_callback(&mut self, f: impl Fn(&InputEvent) -> bool + 'static) {
        self.guard.prevent_translate_callback = Some(Rc::new(f));
    }

    /// The gesture event emitter. Clones share subscriptions.
    #[must_use]
    pub const fn emitter(&self) -> &Emitter {
        &self.emitter
    }

    /// Subscribe to one kind of gesture event.
    pub fn on(
        &self,
        kind: GestureKind,
        handler: impl Fn(&GestureEvent) + 'static,
    ) -> SubscriptionId {
        self.emitter.on(kind, handler)
    }

    /// Subscribe to every gesture event.
    pub fn on_any(&self, handler: impl Fn(&GestureEvent) + 'static) -> SubscriptionId {
        self.emitter.on_any(handler)
    }

    /// Unsubscribe.
    pub fn off(&self, id: SubscriptionId) -> bool {
        self.emitter.off(id)
    }

    /// Number of contacts currently tracked.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.adapter.active_count()
    }

    /// Live trajectory for a contact.
    #[must_use]
    pub fn contact(&self, key: ContactKey) -> Option<&PointInfo> {
        self.adapter.contact(key)
    }

    /// Current time on the engine clock.
    #[must_use]
    pub fn now(&self) -> Millis {
        self.clock.now()
    }

    /// True once [`GestureEngine::destroy`] has run.
    #[must_use]
    pub const fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    // =========================================================================
    // Native events
    // =========================================================================

    /// Process a native event and deliver resulting gestures to subscribers.
    pub fn handle_event(&mut self, event: &InputEvent) -> Dispatch {
        let dispatch = self.process(event);
        for gesture in &dispatch.events {
            self.emitter.trigger(gesture);
        }
        dispatch
    }

    /// Process a native event without calling subscribers.
    ///
    /// Timers already overdue fire first so a late host callback cannot
    /// reorder gestures.
    pub fn process(&mut self, event: &InputEvent) -> Dispatch {
        if self.destroyed || !self.adapter.accepts(event) {
            return Dispatch::default();
        }
        let now = self.clock.now();
        let mut dispatch = Dispatch {
            prevent_default: self.guard.prevent_default(event, &self.options),
            stop_propagation: self.guard.stop_propagation(event, &self.options),
            ..Dispatch::default()
        };
        if self.guard.prevent_translate(event) {
            return dispatch;
        }
        dispatch.translated = true;

        let mut out = Vec::new();
        self.fire_due_timers(now, &mut out);
        self.last_event = Some(event.clone());
        self.trace(format_args!(
            "{} ({} active)",
            event.type_name(),
            self.adapter.active_count()
        ));

        match (event.family(), event.phase()) {
            (InputFamily::Pointer, InputPhase::Start) => {
                if let InputEvent::Pointer { pointer_id, .. } = event {
                    if self.options.pointer_capture {
                        dispatch.capture_pointer = Some(*pointer_id);
                    }
                }
                self.set_up_pointer_tracking(event, now);
                let points = self.adapter.points_from_event(event);
                out.push(GestureEvent::PointerDown {
                    event: event.clone(),
                    points,
                });
            }
            (InputFamily::Pointer, InputPhase::Move) => {
                self.track_pointer(event, now);
                let points = self.adapter.points_from_event(event);
                out.push(GestureEvent::PointerMove {
                    event: event.clone(),
                    points,
                });
            }
            (InputFamily::Pointer, InputPhase::End) => {
                self.finish_pointer_tracking(event, now, &mut out);
                let points = self.adapter.points_from_event(event);
                out.push(GestureEvent::PointerUp {
                    event: event.clone(),
                    points,
                });
            }
            (InputFamily::Pointer | InputFamily::Touch, InputPhase::Cancel) => {
                let points = self.adapter.points_from_event(event);
                self.stop_pointer_tracking(event);
                out.push(GestureEvent::PointerCancel {
                    event: event.clone(),
                    points,
                });
            }
            (InputFamily::Touch, InputPhase::Start) => {
                let points = self.adapter.points_from_event(event);
                self.set_up_pointer_tracking(event, now);
                out.push(GestureEvent::PointerDown {
                    event: event.clone(),
                    points,
                });
            }
            (InputFamily::Touch, InputPhase::Move) => {
                let points = self.adapter.points_from_event(event);
                self.track_pointer(event, now);
                out.push(GestureEvent::PointerMove {
                    event: event.clone(),
                    points,
                });
            }
            (InputFamily::Touch, InputPhase::End) => {
                let points = self.adapter.points_from_event(event);
                self.finish_pointer_tracking(event, now, &mut out);
                out.push(GestureEvent::PointerUp {
                    event: event.clone(),
                    points,
                });
            }
            (InputFamily::Mouse, InputPhase::Start) => self.set_up_pointer_tracking(event, now),
            (InputFamily::Mouse, InputPhase::Move) => self.track_pointer(event, now),
            (InputFamily::Mouse, InputPhase::End | InputPhase::Cancel) => {
                self.finish_pointer_tracking(event, now, &mut out);
            }
        }

        dispatch.events = out;
        dispatch
    }

    fn set_up_pointer_tracking(&mut self, event: &InputEvent, now: Millis) {
        self.trace(format_args!("setUpPointerTracking"));
        let contact = self.adapter.set_up_pointer_tracking(event, now);
        self.drop_stale_long_presses();
        if let Some(contact) = contact {
            self.long_presses.arm(
                contact.key,
                now + self.options.long_press_time_limit,
                contact,
            );
        }
    }

    fn track_pointer(&mut self, event: &InputEvent, now: Millis) {
        self.trace(format_args!("trackPointer"));
        self.adapter.track_pointer(event, now);
    }

    fn stop_pointer_tracking(&mut self, event: &InputEvent) -> Option<PointInfo> {
        self.trace(format_args!("stopPointerTracking"));
        let info = self.adapter.stop_pointer_tracking(event);
        if event.family() == InputFamily::Touch {
            // Any finger lifting ends every touch long press.
            self.long_presses
                .retain(|key, _| !matches!(key, ContactKey::Touch(_)));
        }
        self.drop_stale_long_presses();
        info
    }

    /// Cancel long-press watches whose contact ended or was superseded.
    fn drop_stale_long_presses(&mut self) {
        let adapter = &self.adapter;
        self.long_presses
            .retain(|_, contact| adapter.is_live(*contact));
    }

    fn finish_pointer_tracking(
        &mut self,
        event: &InputEvent,
        now: Millis,
        out: &mut Vec<GestureEvent>,
    ) {
        self.trace(format_args!("finishPointerTracking"));
        let Some(info) = self.stop_pointer_tracking(event) else {
            return;
        };
        let remaining = self.adapter.points_from_event(event).len();
        let start = info.start();
        let current = if info.is_stationary() {
            TimedPoint::stamp(start.point(), now)
        } else {
            info.current()
        };

        match classify_release(start, current, info.tracking(), remaining, &self.options) {
            Release::Tap => self.recognize_tap(event, current.point(), now, out),
            Release::Swipe(direction) => {
                let kind = GestureKind::swipe(direction);
                self.trace(format_args!("recognize as {kind}"));
                out.push(GestureEvent::Swipe {
                    direction,
                    point: current.point(),
                });
            }
            Release::TooLong | Release::Nothing => {}
        }
    }

    fn recognize_tap(
        &mut self,
        event: &InputEvent,
        point: Point,
        now: Millis,
        out: &mut Vec<GestureEvent>,
    ) {
        if self.pending_tap.cancel().is_some() {
            self.trace(format_args!("recognize as {}", GestureKind::DoubleTap));
            out.push(GestureEvent::DoubleTap {
                event: event.clone(),
                point,
            });
        } else {
            self.pending_tap.arm(
                now + self.options.double_tap_time_limit,
                PendingTap {
                    event: event.clone(),
                    point,
                },
            );
        }
    }

    // =========================================================================
    // Timers
    // =========================================================================

    /// Earliest pending deadline, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Millis> {
        if self.destroyed {
            return None;
        }
        match (self.pending_tap.deadline(), self.long_presses.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every due timer and deliver the results to subscribers.
    pub fn poll_timers(&mut self) -> Vec<GestureEvent> {
        let fired = self.process_timers();
        for gesture in &fired {
            self.emitter.trigger(gesture);
        }
        fired
    }

    /// Fire every due timer without calling subscribers.
    pub fn process_timers(&mut self) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        if !self.destroyed {
            let now = self.clock.now();
            self.fire_due_timers(now, &mut out);
        }
        out
    }

    fn fire_due_timers(&mut self, now: Millis, out: &mut Vec<GestureEvent>) {
        loop {
            let tap = self.pending_tap.deadline().filter(|at| *at <= now);
            let press = self.long_presses.deadline().filter(|at| *at <= now);
            match (tap, press) {
                (None, None) => break,
                (Some(tap), Some(press)) if press < tap => self.fire_long_press(now, out),
                (Some(_), _) => self.fire_tap(now, out),
                (None, Some(_)) => self.fire_long_press(now, out),
            }
        }
    }

    fn fire_tap(&mut self, now: Millis, out: &mut Vec<GestureEvent>) {
        if let Some(due) = self.pending_tap.take_due(now) {
            self.trace(format_args!("recognize as {}", GestureKind::Tap));
            out.push(GestureEvent::Tap {
                event: due.payload.event,
                point: due.payload.point,
            });
        }
    }

    fn fire_long_press(&mut self, now: Millis, out: &mut Vec<GestureEvent>) {
        let Some((key, due)) = self.long_presses.take_due(now) else {
            return;
        };
        if !self.adapter.is_live(due.payload) {
            return;
        }
        let Some(info) = self.adapter.contact(key) else {
            return;
        };
        if !is_not_slided(info.start(), info.tracking(), self.options.dont_slide_distance) {
            return;
        }
        let point = info.current().point();
        let Some(event) = self
            .adapter
            .latest_event(key)
            .or(self.last_event.as_ref())
            .cloned()
        else {
            return;
        };
        self.trace(format_args!("recognize as {}", GestureKind::LongPress));
        out.push(GestureEvent::LongPress { event, point });
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Stop recognizing: drop contacts, timers and subscribers.
    ///
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.trace(format_args!("destroy"));
        self.destroyed = true;
        self.adapter.reset();
        self.pending_tap.cancel();
        self.long_presses.clear();
        self.last_event = None;
        self.observers.clear();
        self.emitter.off_all();
    }

    fn trace(&self, message: fmt::Arguments<'_>) {
        if self.options.trace {
            log::info!("{}{}", self.options.normalized_trace_prefix(), message);
        }
    }
}

impl fmt::Debug for GestureEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureEngine")
            .field("adapter", &self.adapter)
            .field("options", &self.options)
            .field("guard", &self.guard)
            .field("emitter", &self.emitter)
            .field("next_deadline", &self.next_deadline())
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}
