//! DOM listeners, the guard and the deadline timer around one engine.

use super::env::probe_environment;
use super::events::to_input_event;
use crate::error::TranslatorError;
use crate::plan::{timeout_delay, ListenerPlan};
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};
use swipetap_core::{
    detect_adapter_kind, AdapterKind, Emitter, Environment, GestureEngine, GestureEvent,
    GestureKind, GestureOptions, SubscriptionId,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// State reachable from DOM callbacks.
///
/// The engine is only borrowed while it processes; gesture handlers run with
/// no borrow held, so they may call back into the translator.
struct Shared {
    engine: RefCell<GestureEngine>,
    emitter: Emitter,
    element: Element,
    timeout: Cell<Option<i32>>,
    tick: Closure<dyn FnMut()>,
}

impl Shared {
    fn on_native_event(&self, native: &web_sys::Event) {
        let Some(input) = to_input_event(native) else {
            return;
        };
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            log::warn!("{} dropped while the engine was busy", native.type_());
            return;
        };
        let dispatch = engine.process(&input);
        drop(engine);

        if dispatch.prevent_default {
            native.prevent_default();
        }
        if dispatch.stop_propagation {
            native.stop_propagation();
        }
        if let Some(pointer_id) = dispatch.capture_pointer {
            if let Err(err) = self.element.set_pointer_capture(pointer_id) {
                log::warn!("setPointerCapture({pointer_id}) failed: {err:?}");
            }
        }
        self.deliver(&dispatch.events);
        self.schedule();
    }

    fn on_timeout(&self) {
        self.timeout.set(None);
        let Ok(mut engine) = self.engine.try_borrow_mut() else {
            return;
        };
        let fired = engine.process_timers();
        drop(engine);
        self.deliver(&fired);
        self.schedule();
    }

    fn deliver(&self, events: &[GestureEvent]) {
        for event in events {
            self.emitter.trigger(event);
        }
    }

    /// Re-arm the single timeout for the engine's next deadline.
    fn schedule(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        self.clear_timeout(&window);
        let delay = match self.engine.try_borrow() {
            Ok(engine) => timeout_delay(engine.next_deadline(), engine.now()),
            Err(_) => None,
        };
        let Some(delay) = delay else {
            return;
        };
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            self.tick.as_ref().unchecked_ref(),
            delay,
        ) {
            Ok(handle) => self.timeout.set(Some(handle)),
            Err(err) => log::warn!("setTimeout failed: {err:?}"),
        }
    }

    fn clear_timeout(&self, window: &web_sys::Window) {
        if let Some(handle) = self.timeout.take() {
            window.clear_timeout_with_handle(handle);
        }
    }
}

/// Gesture recognition attached to one DOM element.
///
/// Dropping the translator detaches it.
pub struct GestureTranslator {
    shared: Rc<Shared>,
    listeners: Vec<(&'static str, Listener)>,
    destroyed: bool,
}

impl GestureTranslator {
    /// Attach to `element`, choosing the adapter from the current browser.
    pub fn new(element: Element, options: GestureOptions) -> Result<Self, TranslatorError> {
        let env = probe_environment()?;
        let kind = detect_adapter_kind(&env)?;
        Self::with_kind(element, options, kind, &env)
    }

    /// Attach to `element` with a specific adapter.
    pub fn with_kind(
        element: Element,
        options: GestureOptions,
        kind: AdapterKind,
        env: &Environment,
    ) -> Result<Self, TranslatorError> {
        let plan = ListenerPlan::new(kind, &options, env);
        let prefix = options.normalized_trace_prefix();
        if options.trace {
            log::info!("{prefix}adapter {kind:?} for {}", env.user_agent);
        }

        if let Some(touch_action) = &plan.touch_action {
            if let Some(html) = element.dyn_ref::<HtmlElement>() {
                html.style().set_property("touch-action", touch_action)?;
            }
        }

        let engine = GestureEngine::new(kind, options);
        let emitter = engine.emitter().clone();
        let shared = Rc::new_cyclic(|weak: &Weak<Shared>| {
            let weak = weak.clone();
            Shared {
                engine: RefCell::new(engine),
                emitter,
                element,
                timeout: Cell::new(None),
                tick: Closure::new(move || {
                    if let Some(shared) = weak.upgrade() {
                        shared.on_timeout();
                    }
                }),
            }
        });

        let mut translator = Self {
            shared,
            listeners: Vec::new(),
            destroyed: false,
        };
        for (event_type, routed) in plan.registrations() {
            let listener = if routed {
                translator.routing_listener()
            } else if plan.trace_event_types.contains(&event_type) {
                trace_listener(prefix.clone())
            } else {
                Closure::new(|_: web_sys::Event| {})
            };
            translator.listen(event_type, listener)?;
        }
        Ok(translator)
    }

    fn routing_listener(&self) -> Listener {
        let shared = Rc::downgrade(&self.shared);
        Closure::new(move |event: web_sys::Event| {
            if let Some(shared) = shared.upgrade() {
                shared.on_native_event(&event);
            }
        })
    }

    fn listen(
        &mut self,
        event_type: &'static str,
        listener: Listener,
    ) -> Result<(), TranslatorError> {
        self.shared
            .element
            .add_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())?;
        self.listeners.push((event_type, listener));
        Ok(())
    }

    /// Adapter driving the engine.
    pub fn kind(&self) -> AdapterKind {
        self.shared.engine.borrow().kind()
    }

    /// The target element.
    pub fn element(&self) -> &Element {
        &self.shared.element
    }

    /// The engine. Must not be held across event dispatch.
    pub fn engine(&self) -> Ref<'_, GestureEngine> {
        self.shared.engine.borrow()
    }

    /// Mutable engine access, e.g. to change options or guard callbacks.
    pub fn engine_mut(&self) -> RefMut<'_, GestureEngine> {
        self.shared.engine.borrow_mut()
    }

    /// Subscribe to one kind of gesture event.
    pub fn on(
        &self,
        kind: GestureKind,
        handler: impl Fn(&GestureEvent) + 'static,
    ) -> SubscriptionId {
        self.shared.emitter.on(kind, handler)
    }

    /// Subscribe to every gesture event.
    pub fn on_any(&self, handler: impl Fn(&GestureEvent) + 'static) -> SubscriptionId {
        self.shared.emitter.on_any(handler)
    }

    /// Unsubscribe.
    pub fn off(&self, id: SubscriptionId) -> bool {
        self.shared.emitter.off(id)
    }

    /// Remove every subscription to `kind`.
    pub fn off_kind(&self, kind: GestureKind) {
        self.shared.emitter.off_kind(kind);
    }

    /// True once detached.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Detach every listener, cancel the timeout and drop all subscribers.
    ///
    /// Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        for (event_type, listener) in self.listeners.drain(..) {
            if let Err(err) = self
                .shared
                .element
                .remove_event_listener_with_callback(event_type, listener.as_ref().unchecked_ref())
            {
                log::warn!("removeEventListener({event_type}) failed: {err:?}");
            }
        }
        if let Some(window) = web_sys::window() {
            self.shared.clear_timeout(&window);
        }
        match self.shared.engine.try_borrow_mut() {
            Ok(mut engine) => engine.destroy(),
            Err(_) => self.shared.emitter.off_all(),
        }
    }
}

impl Drop for GestureTranslator {
    fn drop(&mut self) {
        self.destroy();
    }
}

fn trace_listener(prefix: String) -> Listener {
    Closure::new(move |event: web_sys::Event| {
        log::info!("{prefix}{}", event.type_());
    })
}
