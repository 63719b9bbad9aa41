//! Input adapters: one per native event family.
//!
//! An adapter owns the tracking table for its family and implements the four
//! tracking hooks the engine drives. The engine owns everything else:
//! guarding, timers, classification and emission.

mod mouse;
mod pointer;
mod touch;
mod touch_and_mouse;

pub use mouse::MouseAdapter;
pub use pointer::PointerAdapter;
pub use touch::TouchAdapter;
pub use touch_and_mouse::TouchAndMouseAdapter;

use crate::environment::AdapterKind;
use crate::event::InputEvent;
use crate::geometry::{Millis, Point};
use crate::point_info::PointInfo;
use std::fmt;

/// Identity of a contact within its adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactKey {
    /// Native pointer id.
    Pointer(i32),
    /// Touch identifier.
    Touch(i32),
    /// The single mouse contact.
    Mouse,
}

/// A specific trajectory of a contact, used to detect stale timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContactRef {
    /// The contact identity.
    pub key: ContactKey,
    /// [`PointInfo::serial`] of the trajectory.
    pub serial: u64,
}

/// Binding between the engine and one native event family.
pub trait InputAdapter: fmt::Debug {
    /// Which adapter this is.
    fn kind(&self) -> AdapterKind;

    /// True if `event` belongs to a family this adapter handles.
    fn accepts(&self, event: &InputEvent) -> bool;

    /// Every active contact point after `event`, oldest contact first.
    fn points_from_event(&self, event: &InputEvent) -> Vec<Point>;

    /// Start tracking the contact(s) `event` introduces.
    ///
    /// Returns the contact to watch for a long press.
    fn set_up_pointer_tracking(&mut self, event: &InputEvent, now: Millis) -> Option<ContactRef>;

    /// Record movement. Unknown contacts are ignored.
    fn track_pointer(&mut self, event: &InputEvent, now: Millis);

    /// Stop tracking the contact `event` ends and return its trajectory.
    ///
    /// `None` if the contact was never tracked.
    fn stop_pointer_tracking(&mut self, event: &InputEvent) -> Option<PointInfo>;

    /// The live trajectory for `key`.
    fn contact(&self, key: ContactKey) -> Option<&PointInfo>;

    /// The most recent native event seen for `key`, if the adapter keeps one.
    fn latest_event(&self, _key: ContactKey) -> Option<&InputEvent> {
        None
    }

    /// Number of tracked contacts.
    fn active_count(&self) -> usize;

    /// Drop every tracked contact.
    fn reset(&mut self);

    /// True if `contact` is still the live trajectory for its key.
    fn is_live(&self, contact: ContactRef) -> bool {
        self.contact(contact.key)
            .is_some_and(|info| info.serial() == contact.serial)
    }
}

impl AdapterKind {
    /// Build a fresh adapter of this kind.
    #[must_use]
    pub fn create_adapter(self) -> Box<dyn InputAdapter> {
        match self {
            Self::Pointer => Box::new(PointerAdapter::new()),
            Self::Touch => Box::new(TouchAdapter::new()),
            Self::Mouse => Box::new(MouseAdapter::new()),
            Self::TouchAndMouse => Box::new(TouchAndMouseAdapter::new()),
        }
    }

    /// DOM event types the adapter translates.
    #[must_use]
    pub fn event_types(self) -> &'static [&'static str] {
        match self {
            Self::Pointer => &["pointerdown", "pointermove", "pointerup", "pointercancel"],
            Self::Touch => &["touchstart", "touchmove", "touchend", "touchcancel"],
            Self::Mouse => &["mousedown", "mousemove", "mouseup"],
            Self::TouchAndMouse => &[
                "touchstart",
                "touchmove",
                "touchend",
                "touchcancel",
                "mousedown",
                "mousemove",
                "mouseup",
            ],
        }
    }

    /// DOM event types logged when tracing is on.
    #[must_use]
    pub fn trace_event_types(self) -> &'static [&'static str] {
        const POINTER: &[&str] = &[
            "pointerdown",
            "pointerup",
            "pointercancel",
            "pointermove",
            "pointerover",
            "pointerout",
            "pointerenter",
            "pointerleave",
            "gotpointercapture",
            "lostpointercapture",
        ];
        const TOUCH: &[&str] = &[
            "touchstart",
            "touchend",
            "touchmove",
            "touchenter",
            "touchleave",
            "touchcancel",
        ];
        const MOUSE: &[&str] = &[
            "click",
            "contextmenu",
            "dblclick",
            "mousedown",
            "mouseenter",
            "mouseleave",
            "mousemove",
            "mouseout",
            "mouseover",
            "mouseup",
        ];
        const TOUCH_AND_MOUSE: &[&str] = &[
            "touchstart",
            "touchend",
            "touchmove",
            "touchenter",
            "touchleave",
            "touchcancel",
            "click",
            "contextmenu",
            "dblclick",
            "mousedown",
            "mouseenter",
            "mouseleave",
            "mousemove",
            "mouseout",
            "mouseover",
            "mouseup",
        ];
        match self {
            Self::Pointer => POINTER,
            Self::Touch => TOUCH,
            Self::Mouse => MOUSE,
            Self::TouchAndMouse => TOUCH_AND_MOUSE,
        }
    }
}

/// Contacts keyed by `K`, ordered oldest first.
#[derive(Debug, Clone)]
pub struct TrackingTable<K> {
    entries: Vec<(K, PointInfo)>,
    next_serial: u64,
}

impl<K> Default for TrackingTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_serial: 0,
        }
    }
}

impl<K: Copy + PartialEq> TrackingTable<K> {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a trajectory for `key`, superseding any existing one.
    ///
    /// Returns the serial of the new trajectory.
    pub fn insert(&mut self, key: K, point: Point, now: Millis) -> u64 {
        self.remove(key);
        self.next_serial += 1;
        let serial = self.next_serial;
        self.entries.push((key, PointInfo::new(point, now, serial)));
        serial
    }

    /// Trajectory for `key`.
    #[must_use]
    pub fn get(&self, key: K) -> Option<&PointInfo> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Mutable trajectory for `key`.
    pub fn get_mut(&mut self, key: K) -> Option<&mut PointInfo> {
        self.entries
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }

    /// Stop tracking `key`.
    pub fn remove(&mut self, key: K) -> Option<PointInfo> {
        let index = self.entries.iter().position(|(k, _)| *k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// True if `key` is tracked.
    #[must_use]
    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    /// Tracked keys, oldest first.
    pub fn keys(&self) -> impl Iterator<Item = K> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    /// Tracked contacts, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = (K, &PointInfo)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Number of tracked contacts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every contact. Serials keep counting.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_insert_orders_oldest_first() {
        let mut table = TrackingTable::new();
        table.insert(5, Point::new(0.0, 0.0), 0.0);
        table.insert(2, Point::new(1.0, 1.0), 10.0);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![5, 2]);
    }

    #[test]
    fn test_table_insert_supersedes() {
        let mut table = TrackingTable::new();
        let first = table.insert(1, Point::new(0.0, 0.0), 0.0);
        table.insert(2, Point::new(0.0, 0.0), 5.0);
        let second = table.insert(1, Point::new(9.0, 9.0), 10.0);
        assert_ne!(first, second);
        assert_eq!(table.len(), 2);
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(table.get(1).unwrap().serial(), second);
    }

    #[test]
    fn test_table_remove() {
        let mut table = TrackingTable::new();
        table.insert(1, Point::new(0.0, 0.0), 0.0);
        assert!(table.remove(1).is_some());
        assert!(table.remove(1).is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn test_event_types_cover_kind() {
        assert_eq!(AdapterKind::Mouse.event_types().len(), 3);
        for name in AdapterKind::Touch.event_types() {
            assert!(AdapterKind::TouchAndMouse.event_types().contains(name));
        }
        for name in AdapterKind::Pointer.event_types() {
            assert!(AdapterKind::Pointer.trace_event_types().contains(name));
        }
    }

    #[test]
    fn test_create_adapter_kind() {
        for kind in [
            AdapterKind::Pointer,
            AdapterKind::Touch,
            AdapterKind::Mouse,
            AdapterKind::TouchAndMouse,
        ] {
            assert_eq!(kind.create_adapter().kind(), kind);
        }
    }
}
