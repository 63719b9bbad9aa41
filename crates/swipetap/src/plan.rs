//! Which DOM listeners and styles a translator installs.
//!
//! Kept free of `web_sys` so the decisions are testable natively; the
//! browser translator only executes the plan.

use swipetap_core::{needs_touchend_workaround, AdapterKind, Environment, GestureOptions, Millis};

/// Listeners and styles for one translator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerPlan {
    /// Adapter the engine runs.
    pub kind: AdapterKind,
    /// Event types routed to the engine.
    pub event_types: &'static [&'static str],
    /// Event types logged when tracing; empty unless `trace` is on.
    pub trace_event_types: &'static [&'static str],
    /// Register an empty `touchend` listener so rapid pointer-ups are not
    /// dropped by the affected WebKit build.
    pub touchend_workaround: bool,
    /// CSS `touch-action` to set on the target element.
    pub touch_action: Option<String>,
}

impl ListenerPlan {
    /// Plan the listeners for `kind` under `options` in `env`.
    #[must_use]
    pub fn new(kind: AdapterKind, options: &GestureOptions, env: &Environment) -> Self {
        let pointer = kind == AdapterKind::Pointer;
        Self {
            kind,
            event_types: kind.event_types(),
            trace_event_types: if options.trace {
                kind.trace_event_types()
            } else {
                &[]
            },
            touchend_workaround: pointer && needs_touchend_workaround(env),
            touch_action: if pointer {
                options.touch_action.clone()
            } else {
                None
            },
        }
    }

    /// Every listener registration as `(event type, routed to engine)`.
    pub fn registrations(&self) -> impl Iterator<Item = (&'static str, bool)> + '_ {
        let workaround: &'static [&'static str] = if self.touchend_workaround {
            &["touchend"]
        } else {
            &[]
        };
        self.event_types
            .iter()
            .map(|t| (*t, true))
            .chain(workaround.iter().map(|t| (*t, false)))
            .chain(self.trace_event_types.iter().map(|t| (*t, false)))
    }
}

/// Milliseconds to pass to `setTimeout` for `deadline`, rounded up.
///
/// `None` when nothing is pending. Overdue deadlines yield 0.
#[must_use]
pub fn timeout_delay(deadline: Option<Millis>, now: Millis) -> Option<i32> {
    let remaining = (deadline? - now).max(0.0).ceil();
    Some(remaining.min(f64::from(i32::MAX)) as i32)
}
