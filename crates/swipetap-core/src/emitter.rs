//! Publish/subscribe surface for gesture events.

use crate::event::{GestureEvent, GestureKind};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Gesture event handler.
pub type Handler = Rc<dyn Fn(&GestureEvent)>;

/// Handle returned by [`Emitter::on`], used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    kind: Option<GestureKind>,
    handler: Handler,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

/// Gesture event registry.
///
/// Clones share the same registry. Handlers matching an event are collected
/// before any is called, so a handler may subscribe or unsubscribe freely;
/// such changes take effect from the next event.
#[derive(Clone, Default)]
pub struct Emitter {
    registry: Rc<RefCell<Registry>>,
}

impl Emitter {
    /// Create an empty emitter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one kind of gesture event.
    pub fn on(
        &self,
        kind: GestureKind,
        handler: impl Fn(&GestureEvent) + 'static,
    ) -> SubscriptionId {
        self.subscribe(Some(kind), Rc::new(handler))
    }

    /// Subscribe to every gesture event.
    pub fn on_any(&self, handler: impl Fn(&GestureEvent) + 'static) -> SubscriptionId {
        self.subscribe(None, Rc::new(handler))
    }

    fn subscribe(&self, kind: Option<GestureKind>, handler: Handler) -> SubscriptionId {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = SubscriptionId(registry.next_id);
        registry.subscriptions.push(Subscription { id, kind, handler });
        id
    }

    /// Remove one subscription. Returns false if it was already gone.
    pub fn off(&self, id: SubscriptionId) -> bool {
        let mut registry = self.registry.borrow_mut();
        let before = registry.subscriptions.len();
        registry.subscriptions.retain(|s| s.id != id);
        registry.subscriptions.len() != before
    }

    /// Remove every subscription to `kind` (catch-all handlers stay).
    pub fn off_kind(&self, kind: GestureKind) {
        self.registry
            .borrow_mut()
            .subscriptions
            .retain(|s| s.kind != Some(kind));
    }

    /// Remove every subscription.
    pub fn off_all(&self) {
        self.registry.borrow_mut().subscriptions.clear();
    }

    /// Number of handlers an event of `kind` would reach.
    #[must_use]
    pub fn listener_count(&self, kind: GestureKind) -> usize {
        self.registry
            .borrow()
            .subscriptions
            .iter()
            .filter(|s| s.kind.map_or(true, |k| k == kind))
            .count()
    }

    /// Deliver `event` to every matching handler, in subscription order.
    pub fn trigger(&self, event: &GestureEvent) {
        let kind = event.kind();
        let handlers: Vec<Handler> = self
            .registry
            .borrow()
            .subscriptions
            .iter()
            .filter(|s| s.kind.map_or(true, |k| k == kind))
            .map(|s| Rc::clone(&s.handler))
            .collect();
        for handler in handlers {
            handler(event);
        }
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("subscriptions", &self.registry.borrow().subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SwipeDirection;
    use crate::geometry::Point;
    use std::cell::Cell;

    fn swipe_left() -> GestureEvent {
        GestureEvent::Swipe {
            direction: SwipeDirection::Left,
            point: Point::ORIGIN,
        }
    }

    #[test]
    fn test_on_receives_matching_kind_only() {
        let emitter = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        emitter.on(GestureKind::SwipeLeft, move |_| h.set(h.get() + 1));
        let h = Rc::clone(&hits);
        emitter.on(GestureKind::Tap, move |_| h.set(h.get() + 100));

        emitter.trigger(&swipe_left());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_on_any() {
        let emitter = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        emitter.on_any(move |_| h.set(h.get() + 1));
        emitter.trigger(&swipe_left());
        assert_eq!(hits.get(), 1);
        assert_eq!(emitter.listener_count(GestureKind::Tap), 1);
    }

    #[test]
    fn test_off() {
        let emitter = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let h = Rc::clone(&hits);
        let id = emitter.on(GestureKind::SwipeLeft, move |_| h.set(h.get() + 1));
        assert!(emitter.off(id));
        assert!(!emitter.off(id));
        emitter.trigger(&swipe_left());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_off_kind_keeps_catch_all() {
        let emitter = Emitter::new();
        emitter.on(GestureKind::SwipeLeft, |_| {});
        emitter.on_any(|_| {});
        emitter.off_kind(GestureKind::SwipeLeft);
        assert_eq!(emitter.listener_count(GestureKind::SwipeLeft), 1);
        emitter.off_all();
        assert_eq!(emitter.listener_count(GestureKind::SwipeLeft), 0);
    }

    #[test]
    fn test_handler_may_unsubscribe_during_trigger() {
        let emitter = Emitter::new();
        let hits = Rc::new(Cell::new(0));
        let inner = emitter.clone();
        let h = Rc::clone(&hits);
        emitter.on_any(move |_| {
            h.set(h.get() + 1);
            inner.off_all();
        });
        emitter.trigger(&swipe_left());
        emitter.trigger(&swipe_left());
        assert_eq!(hits.get(), 1);
    }
}
