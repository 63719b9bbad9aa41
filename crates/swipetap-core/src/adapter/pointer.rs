//! Pointer Events adapter, keyed by `pointerId`.

use super::{ContactKey, ContactRef, InputAdapter, TrackingTable};
use crate::environment::AdapterKind;
use crate::event::{InputEvent, InputFamily};
use crate::geometry::{Millis, Point};
use crate::point_info::PointInfo;
use std::collections::HashMap;

/// Tracks each pointer by its native id and remembers its latest event.
#[derive(Debug, Default)]
pub struct PointerAdapter {
    table: TrackingTable<i32>,
    events: HashMap<i32, InputEvent>,
}

impl PointerAdapter {
    /// Create an adapter with no tracked pointers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn pointer_of(event: &InputEvent) -> Option<(i32, Point)> {
    match event {
        InputEvent::Pointer {
            pointer_id,
            position,
            ..
        } => Some((*pointer_id, *position)),
        _ => None,
    }
}

impl InputAdapter for PointerAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Pointer
    }

    fn accepts(&self, event: &InputEvent) -> bool {
        event.family() == InputFamily::Pointer
    }

    fn points_from_event(&self, _event: &InputEvent) -> Vec<Point> {
        self.table
            .keys()
            .filter_map(|id| self.events.get(&id))
            .filter_map(InputEvent::position)
            .collect()
    }

    fn set_up_pointer_tracking(&mut self, event: &InputEvent, now: Millis) -> Option<ContactRef> {
        let (id, position) = pointer_of(event)?;
        let serial = self.table.insert(id, position, now);
        self.events.insert(id, event.clone());
        Some(ContactRef {
            key: ContactKey::Pointer(id),
            serial,
        })
    }

    fn track_pointer(&mut self, event: &InputEvent, now: Millis) {
        let Some((id, position)) = pointer_of(event) else {
            return;
        };
        let Some(info) = self.table.get_mut(id) else {
            return;
        };
        info.update(position, now);
        self.events.insert(id, event.clone());
    }

    fn stop_pointer_tracking(&mut self, event: &InputEvent) -> Option<PointInfo> {
        let (id, _) = pointer_of(event)?;
        self.events.remove(&id);
        self.table.remove(id)
    }

    fn contact(&self, key: ContactKey) -> Option<&PointInfo> {
        match key {
            ContactKey::Pointer(id) => self.table.get(id),
            _ => None,
        }
    }

    fn latest_event(&self, key: ContactKey) -> Option<&InputEvent> {
        match key {
            ContactKey::Pointer(id) => self.events.get(&id),
            _ => None,
        }
    }

    fn active_count(&self) -> usize {
        self.table.len()
    }

    fn reset(&mut self) {
        self.table.clear();
        self.events.clear();
    }
}
