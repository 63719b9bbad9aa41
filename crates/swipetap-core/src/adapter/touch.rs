//! Touch Events adapter, keyed by touch identifier.
//!
//! Touch events report the full list of touches still on the surface, so
//! starts and ends are found by diffing that list against the table.

use super::{ContactKey, ContactRef, InputAdapter, TrackingTable};
use crate::environment::AdapterKind;
use crate::event::{InputEvent, InputFamily, TouchRecord};
use crate::geometry::{Millis, Point};
use crate::point_info::PointInfo;

/// Tracks every finger on the surface.
#[derive(Debug, Default)]
pub struct TouchAdapter {
    table: TrackingTable<i32>,
}

impl TouchAdapter {
    /// Create an adapter with no tracked touches.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn touches_of(event: &InputEvent) -> Option<&[TouchRecord]> {
    match event {
        InputEvent::Touch { touches, .. } => Some(touches),
        _ => None,
    }
}

impl InputAdapter for TouchAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Touch
    }

    fn accepts(&self, event: &InputEvent) -> bool {
        event.family() == InputFamily::Touch
    }

    fn points_from_event(&self, event: &InputEvent) -> Vec<Point> {
        touches_of(event)
            .unwrap_or_default()
            .iter()
            .map(|t| t.position)
            .collect()
    }

    fn set_up_pointer_tracking(&mut self, event: &InputEvent, now: Millis) -> Option<ContactRef> {
        let touches = touches_of(event)?;
        let mut first_added = None;
        for touch in touches {
            if self.table.contains(touch.identifier) {
                continue;
            }
            let serial = self.table.insert(touch.identifier, touch.position, now);
            first_added.get_or_insert(ContactRef {
                key: ContactKey::Touch(touch.identifier),
                serial,
            });
        }
        first_added
    }

    fn track_pointer(&mut self, event: &InputEvent, now: Millis) {
        let Some(touches) = touches_of(event) else {
            return;
        };
        // A touchmove may arrive carrying a finger whose touchstart has not
        // been seen yet; such fingers are left alone.
        for touch in touches {
            if let Some(info) = self.table.get_mut(touch.identifier) {
                info.update(touch.position, now);
            }
        }
    }

    fn stop_pointer_tracking(&mut self, event: &InputEvent) -> Option<PointInfo> {
        let touches = touches_of(event)?;
        let lifted: Vec<i32> = self
            .table
            .keys()
            .filter(|id| !touches.iter().any(|t| t.identifier == *id))
            .collect();
        let mut first = None;
        for id in lifted {
            let info = self.table.remove(id);
            if first.is_none() {
                first = info;
            }
        }
        first
    }

    fn contact(&self, key: ContactKey) -> Option<&PointInfo> {
        match key {
            ContactKey::Touch(id) => self.table.get(id),
            _ => None,
        }
    }

    fn active_count(&self) -> usize {
        self.table.len()
    }

    fn reset(&mut self) {
        self.table.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InputPhase;

    fn ev(phase: InputPhase, touches: &[(i32, f64, f64)]) -> InputEvent {
        InputEvent::touch(
            phase,
            touches
                .iter()
                .map(|&(id, x, y)| TouchRecord::new(id, Point::new(x, y)))
                .collect(),
        )
    }

    #[test]
    fn test_start_adds_new_touches_and_watches_first() {
        let mut adapter = TouchAdapter::new();
        let first = adapter
            .set_up_pointer_tracking(&ev(InputPhase::Start, &[(4, 0.0, 0.0)]), 0.0)
            .unwrap();
        assert_eq!(first.key, ContactKey::Touch(4));

        let second = adapter
            .set_up_pointer_tracking(
                &ev(InputPhase::Start, &[(4, 0.0, 0.0), (9, 10.0, 10.0), (2, 5.0, 5.0)]),
                10.0,
            )
            .unwrap();
        assert_eq!(second.key, ContactKey::Touch(9));
        assert_eq!(adapter.active_count(), 3);
        assert!(adapter.is_live(first));
    }

    #[test]
    fn test_start_without_new_touch_watches_nothing() {
        let mut adapter = TouchAdapter::new();
        adapter.set_up_pointer_tracking(&ev(InputPhase::Start, &[(1, 0.0, 0.0)]), 0.0);
        assert!(adapter
            .set_up_pointer_tracking(&ev(InputPhase::Start, &[(1, 0.0, 0.0)]), 5.0)
            .is_none());
    }

    #[test]
    fn test_move_updates_tracked_only() {
        let mut adapter = TouchAdapter::new();
        adapter.set_up_pointer_tracking(&ev(InputPhase::Start, &[(1, 0.0, 0.0)]), 0.0);
        adapter.track_pointer(&ev(InputPhase::Move, &[(1, 3.0, 4.0), (2, 9.0, 9.0)]), 16.0);

        let info = adapter.contact(ContactKey::Touch(1)).unwrap();
        assert_eq!(info.current().point(), Point::new(3.0, 4.0));
        assert!(adapter.contact(ContactKey::Touch(2)).is_none());
    }

    #[test]
    fn test_end_returns_first_lifted() {
        let mut adapter = TouchAdapter::new();
        adapter.set_up_pointer_tracking(
            &ev(InputPhase::Start, &[(1, 0.0, 0.0), (2, 10.0, 0.0), (3, 20.0, 0.0)]),
            0.0,
        );
        let info = adapter
            .stop_pointer_tracking(&ev(InputPhase::End, &[(2, 10.0, 0.0)]))
            .unwrap();
        assert_eq!(info.start().point(), Point::new(0.0, 0.0));
        assert_eq!(adapter.active_count(), 1);
        assert!(adapter.contact(ContactKey::Touch(3)).is_none());
    }

    #[test]
    fn test_duplicate_end_yields_nothing() {
        let mut adapter = TouchAdapter::new();
        adapter.set_up_pointer_tracking(&ev(InputPhase::Start, &[(1, 0.0, 0.0)]), 0.0);
        assert!(adapter
            .stop_pointer_tracking(&ev(InputPhase::End, &[]))
            .is_some());
        assert!(adapter
            .stop_pointer_tracking(&ev(InputPhase::End, &[]))
            .is_none());
    }

    #[test]
    fn test_points_follow_browser_order() {
        let adapter = TouchAdapter::new();
        let points =
            adapter.points_from_event(&ev(InputPhase::Move, &[(2, 1.0, 1.0), (1, 2.0, 2.0)]));
        assert_eq!(points, vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]);
    }
}
