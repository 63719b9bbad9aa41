//! Mouse Events adapter: one implicit contact.

use super::{ContactKey, ContactRef, InputAdapter};
use crate::environment::AdapterKind;
use crate::event::{InputEvent, InputFamily};
use crate::geometry::{Millis, Point};
use crate::point_info::PointInfo;

/// Tracks the mouse between `mousedown` and `mouseup`.
#[derive(Debug, Default)]
pub struct MouseAdapter {
    contact: Option<PointInfo>,
    next_serial: u64,
}

impl MouseAdapter {
    /// Create an adapter with the button up.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl InputAdapter for MouseAdapter {
    fn kind(&self) -> AdapterKind {
        AdapterKind::Mouse
    }

    fn accepts(&self, event: &InputEvent) -> bool {
        event.family() == InputFamily::Mouse
    }

    fn points_from_event(&self, event: &InputEvent) -> Vec<Point> {
        match (&self.contact, event) {
            (Some(_), InputEvent::Mouse { position, .. }) => vec![*position],
            _ => Vec::new(),
        }
    }

    fn set_up_pointer_tracking(&mut self, event: &InputEvent, now: Millis) -> Option<ContactRef> {
        let InputEvent::Mouse { position, .. } = event else {
            return None;
        };
        self.next_serial += 1;
        self.contact = Some(PointInfo::new(*position, now, self.next_serial));
        Some(ContactRef {
            key: ContactKey::Mouse,
            serial: self.next_serial,
        })
    }

    fn track_pointer(&mut self, event: &InputEvent, now: Millis) {
        if let (Some(info), InputEvent::Mouse { position, .. }) = (self.contact.as_mut(), event) {
            info.update(*position, now);
        }
    }

    fn stop_pointer_tracking(&mut self, event: &InputEvent) -> Option<PointInfo> {
        if self.accepts(event) {
            self.contact.take()
        } else {
            None
        }
    }

    fn contact(&self, key: ContactKey) -> Option<&PointInfo> {
        match key {
            ContactKey::Mouse => self.contact.as_ref(),
            _ => None,
        }
    }

    fn active_count(&self) -> usize {
        usize::from(self.contact.is_some())
    }

    fn reset(&mut self) {
        self.contact = None;
    }
}
