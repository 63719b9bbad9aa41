//! Touch and mouse together, for hosts that expose both families.

use super::{ContactKey, ContactRef, InputAdapter, MouseAdapter, TouchAdapter};
use crate::environment::AdapterKind;
use crate::event::{InputEvent, InputFamily};
use crate::geometry::{Millis, Point};
use crate::point_info::PointInfo;

/// Routes each hook to the touch or mouse adapter by event family.
#[derive(Debug, Default)]
pub struct TouchAndMouseAdapter {
    touch: TouchAdapter,
    mouse: MouseAdapter,
}

impl TouchAndMouseAdapter {
    /// Create an adapter with nothing tracked.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn route(&self, family: InputFamily) -> Option<&dyn InputAdapter> {
        match family {
            InputFamily::Touch => Some(&self.touch),
            InputFamily::Mouse => Some(&self.mouse),
            InputFamily::Pointer => None,
        }
    }

    fn route_mut(&mut self, family: InputFamily) -> Option<&mut dyn InputAdapter> {
        match family {
            InputFamily::Touch => Some(&mut self.touch),
            InputFamily::Mouse => Some(&mut self.mouse),
            InputFamily::Pointer => None,
        }
    }
}

impl InputAdapter for TouchAndMouseAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::TouchAndMouse
    }

    fn accepts(&self, event: &InputEvent) -> bool {
        self.route(event.family()).is_some()
    }

    fn points_from_event(&self, event: &InputEvent) -> Vec<Point> {
        self.route(event.family())
            .map(|adapter| adapter.points_from_event(event))
            .unwrap_or_default()
    }

    fn set_up_pointer_tracking(&mut self, event: &InputEvent, now: Millis) -> Option<ContactRef> {
        self.route_mut(event.family())?
            .set_up_pointer_tracking(event, now)
    }

    fn track_pointer(&mut self, event: &InputEvent, now: Millis) {
        if let Some(adapter) = self.route_mut(event.family()) {
            adapter.track_pointer(event, now);
        }
    }

    fn stop_pointer_tracking(&mut self, event: &InputEvent) -> Option<PointInfo> {
        self.route_mut(event.family())?.stop_pointer_tracking(event)
    }

    fn contact(&self, key: ContactKey) -> Option<&PointInfo> {
        match key {
            ContactKey::Touch(_) => self.touch.contact(key),
            ContactKey::Mouse => self.mouse.contact(key),
            ContactKey::Pointer(_) => None,
        }
    }

    fn active_count(&self) -> usize {
        self.touch.active_count() + self.mouse.active_count()
    }

    fn reset(&mut self) {
        self.touch.reset();
        self.mouse.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{InputPhase, TouchRecord};

    #[test]
    fn test_routes_by_family() {
        let mut adapter = TouchAndMouseAdapter::new();
        let touch = InputEvent::touch(
            InputPhase::Start,
            vec![TouchRecord::new(1, Point::new(1.0, 1.0))],
        );
        let mouse = InputEvent::mouse(InputPhase::Start, Point::new(2.0, 2.0));

        let t = adapter.set_up_pointer_tracking(&touch, 0.0).unwrap();
        let m = adapter.set_up_pointer_tracking(&mouse, 0.0).unwrap();
        assert_eq!(t.key, ContactKey::Touch(1));
        assert_eq!(m.key, ContactKey::Mouse);
        assert_eq!(adapter.active_count(), 2);

        let released = adapter
            .stop_pointer_tracking(&InputEvent::mouse(InputPhase::End, Point::new(2.0, 2.0)))
            .unwrap();
        assert_eq!(released.start().point(), Point::new(2.0, 2.0));
        assert!(adapter.is_live(t));
        assert!(!adapter.is_live(m));
    }

    #[test]
    fn test_rejects_pointer_events() {
        let mut adapter = TouchAndMouseAdapter::new();
        let pointer = InputEvent::pointer(InputPhase::Start, 1, Point::ORIGIN);
        assert!(!adapter.accepts(&pointer));
        assert!(adapter.set_up_pointer_tracking(&pointer, 0.0).is_none());
        assert!(adapter.points_from_event(&pointer).is_empty());
    }
}
