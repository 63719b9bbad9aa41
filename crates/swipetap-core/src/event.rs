//! Normalized input events and the gesture events emitted from them.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Native event family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputFamily {
    /// Pointer events (`pointerdown`, ...).
    Pointer,
    /// Touch events (`touchstart`, ...).
    Touch,
    /// Mouse events (`mousedown`, ...).
    Mouse,
}

/// Position of a native event within a contact's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InputPhase {
    /// Contact begins.
    Start,
    /// Contact moves.
    Move,
    /// Contact is released.
    End,
    /// Contact is cancelled by the platform.
    Cancel,
}

/// One entry of a touch list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchRecord {
    /// Touch identifier, stable for the lifetime of the touch.
    pub identifier: i32,
    /// Client coordinates.
    pub position: Point,
}

impl TouchRecord {
    /// Create a new touch record.
    #[must_use]
    pub const fn new(identifier: i32, position: Point) -> Self {
        Self {
            identifier,
            position,
        }
    }
}

/// A native input event reduced to what gesture recognition reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "camelCase")]
pub enum InputEvent {
    /// A pointer event.
    Pointer {
        /// Lifecycle phase
        phase: InputPhase,
        /// Native pointer identifier
        pointer_id: i32,
        /// Client coordinates
        position: Point,
    },
    /// A touch event.
    Touch {
        /// Lifecycle phase
        phase: InputPhase,
        /// Touches still on the surface after this event, in browser order
        touches: Vec<TouchRecord>,
    },
    /// A mouse event.
    Mouse {
        /// Lifecycle phase
        phase: InputPhase,
        /// Client coordinates
        position: Point,
    },
}

impl InputEvent {
    /// Pointer event shorthand.
    #[must_use]
    pub const fn pointer(phase: InputPhase, pointer_id: i32, position: Point) -> Self {
        Self::Pointer {
            phase,
            pointer_id,
            position,
        }
    }

    /// Touch event shorthand.
    #[must_use]
    pub const fn touch(phase: InputPhase, touches: Vec<TouchRecord>) -> Self {
        Self::Touch { phase, touches }
    }

    /// Mouse event shorthand.
    #[must_use]
    pub const fn mouse(phase: InputPhase, position: Point) -> Self {
        Self::Mouse { phase, position }
    }

    /// The event family.
    #[must_use]
    pub const fn family(&self) -> InputFamily {
        match self {
            Self::Pointer { .. } => InputFamily::Pointer,
            Self::Touch { .. } => InputFamily::Touch,
            Self::Mouse { .. } => InputFamily::Mouse,
        }
    }

    /// The lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> InputPhase {
        match self {
            Self::Pointer { phase, .. } | Self::Touch { phase, .. } | Self::Mouse { phase, .. } => {
                *phase
            }
        }
    }

    /// DOM event type this event was converted from.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        type_name(self.family(), self.phase())
    }

    /// Client position for pointer and mouse events.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::Pointer { position, .. } | Self::Mouse { position, .. } => Some(*position),
            Self::Touch { .. } => None,
        }
    }
}

/// DOM event type for a family and phase.
///
/// Mouse has no cancel event; `mouseup` is reported instead.
#[must_use]
pub const fn type_name(family: InputFamily, phase: InputPhase) -> &'static str {
    match (family, phase) {
        (InputFamily::Pointer, InputPhase::Start) => "pointerdown",
        (InputFamily::Pointer, InputPhase::Move) => "pointermove",
        (InputFamily::Pointer, InputPhase::End) => "pointerup",
        (InputFamily::Pointer, InputPhase::Cancel) => "pointercancel",
        (InputFamily::Touch, InputPhase::Start) => "touchstart",
        (InputFamily::Touch, InputPhase::Move) => "touchmove",
        (InputFamily::Touch, InputPhase::End) => "touchend",
        (InputFamily::Touch, InputPhase::Cancel) => "touchcancel",
        (InputFamily::Mouse, InputPhase::Start) => "mousedown",
        (InputFamily::Mouse, InputPhase::Move) => "mousemove",
        (InputFamily::Mouse, InputPhase::End | InputPhase::Cancel) => "mouseup",
    }
}

/// Parse a handled DOM event type.
#[must_use]
pub fn parse_type_name(name: &str) -> Option<(InputFamily, InputPhase)> {
    let parsed = match name {
        "pointerdown" => (InputFamily::Pointer, InputPhase::Start),
        "pointermove" => (InputFamily::Pointer, InputPhase::Move),
        "pointerup" => (InputFamily::Pointer, InputPhase::End),
        "pointercancel" => (InputFamily::Pointer, InputPhase::Cancel),
        "touchstart" => (InputFamily::Touch, InputPhase::Start),
        "touchmove" => (InputFamily::Touch, InputPhase::Move),
        "touchend" => (InputFamily::Touch, InputPhase::End),
        "touchcancel" => (InputFamily::Touch, InputPhase::Cancel),
        "mousedown" => (InputFamily::Mouse, InputPhase::Start),
        "mousemove" => (InputFamily::Mouse, InputPhase::Move),
        "mouseup" => (InputFamily::Mouse, InputPhase::End),
        _ => return None,
    };
    Some(parsed)
}

/// Swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SwipeDirection {
    /// Towards negative x.
    Left,
    /// Towards positive x.
    Right,
    /// Towards negative y.
    Up,
    /// Towards positive y.
    Down,
}

/// Kind of an emitted gesture event, used for subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GestureKind {
    /// A contact started.
    PointerDown,
    /// A contact moved.
    PointerMove,
    /// A contact was released.
    PointerUp,
    /// A contact was cancelled.
    PointerCancel,
    /// Single tap.
    Tap,
    /// Two taps within the double-tap window.
    DoubleTap,
    /// Stationary hold.
    LongPress,
    /// Swipe towards negative x.
    SwipeLeft,
    /// Swipe towards positive x.
    SwipeRight,
    /// Swipe towards negative y.
    SwipeUp,
    /// Swipe towards positive y.
    SwipeDown,
}

impl GestureKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::PointerDown,
        Self::PointerMove,
        Self::PointerUp,
        Self::PointerCancel,
        Self::Tap,
        Self::DoubleTap,
        Self::LongPress,
        Self::SwipeLeft,
        Self::SwipeRight,
        Self::SwipeUp,
        Self::SwipeDown,
    ];

    /// Short camelCase name, e.g. `"doubleTap"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PointerDown => "pointerdown",
            Self::PointerMove => "pointermove",
            Self::PointerUp => "pointerup",
            Self::PointerCancel => "pointercancel",
            Self::Tap => "tap",
            Self::DoubleTap => "doubleTap",
            Self::LongPress => "longPress",
            Self::SwipeLeft => "swipeLeft",
            Self::SwipeRight => "swipeRight",
            Self::SwipeUp => "swipeUp",
            Self::SwipeDown => "swipeDown",
        }
    }

    /// Namespaced event type, e.g. `"controller:event:doubletap"`.
    #[must_use]
    pub const fn event_type(self) -> &'static str {
        match self {
            Self::PointerDown => "controller:event:pointerdown",
            Self::PointerMove => "controller:event:pointermove",
            Self::PointerUp => "controller:event:pointerup",
            Self::PointerCancel => "controller:event:pointercancel",
            Self::Tap => "controller:event:tap",
            Self::DoubleTap => "controller:event:doubletap",
            Self::LongPress => "controller:event:longpress",
            Self::SwipeLeft => "controller:event:swipeleft",
            Self::SwipeRight => "controller:event:swiperight",
            Self::SwipeUp => "controller:event:swipeup",
            Self::SwipeDown => "controller:event:swipedown",
        }
    }

    /// True for the raw contact notifications (down/move/up/cancel).
    #[must_use]
    pub const fn is_pointer_family(self) -> bool {
        matches!(
            self,
            Self::PointerDown | Self::PointerMove | Self::PointerUp | Self::PointerCancel
        )
    }

    /// Kind emitted for a swipe in `direction`.
    #[must_use]
    pub const fn swipe(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Left => Self::SwipeLeft,
            SwipeDirection::Right => Self::SwipeRight,
            SwipeDirection::Up => Self::SwipeUp,
            SwipeDirection::Down => Self::SwipeDown,
        }
    }
}

impl fmt::Display for GestureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a [`GestureKind`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown gesture event type `{0}`")]
pub struct UnknownGestureKind(pub String);

impl FromStr for GestureKind {
    type Err = UnknownGestureKind;

    /// Accepts the short name or the namespaced event type, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.name().eq_ignore_ascii_case(&lower) || kind.event_type() == lower
            })
            .ok_or_else(|| UnknownGestureKind(s.to_owned()))
    }
}

/// A gesture event emitted by the engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GestureEvent {
    /// A contact started; `points` are all active contacts, oldest first.
    #[serde(rename = "pointerdown")]
    PointerDown {
        /// Originating native event
        event: InputEvent,
        /// Active contact points
        points: Vec<Point>,
    },
    /// A contact moved.
    #[serde(rename = "pointermove")]
    PointerMove {
        /// Originating native event
        event: InputEvent,
        /// Active contact points
        points: Vec<Point>,
    },
    /// A contact was released.
    #[serde(rename = "pointerup")]
    PointerUp {
        /// Originating native event
        event: InputEvent,
        /// Active contact points
        points: Vec<Point>,
    },
    /// A contact was cancelled by the platform.
    #[serde(rename = "pointercancel")]
    PointerCancel {
        /// Originating native event
        event: InputEvent,
        /// Active contact points before the cancellation
        points: Vec<Point>,
    },
    /// Single tap.
    Tap {
        /// Release event
        event: InputEvent,
        /// Release point
        point: Point,
    },
    /// Double tap.
    DoubleTap {
        /// Second release event
        event: InputEvent,
        /// Second release point
        point: Point,
    },
    /// Long press.
    LongPress {
        /// Latest native event for the held contact
        event: InputEvent,
        /// Current point of the held contact
        point: Point,
    },
    /// Swipe.
    Swipe {
        /// Swipe direction
        direction: SwipeDirection,
        /// Release point
        point: Point,
    },
}

impl GestureEvent {
    /// The subscription kind of this event.
    #[must_use]
    pub const fn kind(&self) -> GestureKind {
        match self {
            Self::PointerDown { .. } => GestureKind::PointerDown,
            Self::PointerMove { .. } => GestureKind::PointerMove,
            Self::PointerUp { .. } => GestureKind::PointerUp,
            Self::PointerCancel { .. } => GestureKind::PointerCancel,
            Self::Tap { .. } => GestureKind::Tap,
            Self::DoubleTap { .. } => GestureKind::DoubleTap,
            Self::LongPress { .. } => GestureKind::LongPress,
            Self::Swipe { direction, .. } => GestureKind::swipe(*direction),
        }
    }

    /// The point carried by tap, double-tap, long-press and swipe events.
    #[must_use]
    pub const fn point(&self) -> Option<Point> {
        match self {
            Self::Tap { point, .. }
            | Self::DoubleTap { point, .. }
            | Self::LongPress { point, .. }
            | Self::Swipe { point, .. } => Some(*point),
            _ => None,
        }
    }

    /// The active points carried by pointer-family events.
    #[must_use]
    pub fn points(&self) -> Option<&[Point]> {
        match self {
            Self::PointerDown { points, .. }
            | Self::PointerMove { points, .. }
            | Self::PointerUp { points, .. }
            | Self::PointerCancel { points, .. } => Some(points),
            _ => None,
        }
    }

    /// The native event, absent for swipes.
    #[must_use]
    pub const fn input(&self) -> Option<&InputEvent> {
        match self {
            Self::PointerDown { event, .. }
            | Self::PointerMove { event, .. }
            | Self::PointerUp { event, .. }
            | Self::PointerCancel { event, .. }
            | Self::Tap { event, .. }
            | Self::DoubleTap { event, .. }
            | Self::LongPress { event, .. } => Some(event),
            Self::Swipe { .. } => None,
        }
    }
}
