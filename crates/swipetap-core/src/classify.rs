//! Gesture classification math.
//!
//! Pure functions over a contact's samples; the engine feeds them and acts on
//! the result.

use crate::event::SwipeDirection;
use crate::geometry::{Millis, TimedPoint};
use crate::options::GestureOptions;

/// True if every sample lies inside the no-slide box around `origin`.
///
/// The box has side `dont_slide_distance`, is centered on `origin` and
/// includes its edges.
#[must_use]
pub fn is_not_slided(
    origin: TimedPoint,
    tracking: &[TimedPoint],
    dont_slide_distance: f64,
) -> bool {
    let min_x = origin.x - dont_slide_distance / 2.0;
    let max_x = min_x + dont_slide_distance;
    let min_y = origin.y - dont_slide_distance / 2.0;
    let max_y = min_y + dont_slide_distance;
    tracking
        .iter()
        .all(|p| min_x <= p.x && p.x <= max_x && min_y <= p.y && p.y <= max_y)
}

/// Displacement between the start and the end of a contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeMetrics {
    /// `|current.x - start.x|`
    pub horizontal: f64,
    /// `|current.y - start.y|`
    pub vertical: f64,
    /// Right when `current.x > start.x`, else left.
    pub horizontal_direction: SwipeDirection,
    /// Down when `current.y > start.y`, else up.
    pub vertical_direction: SwipeDirection,
}

impl SwipeMetrics {
    /// Measure the displacement from `start` to `current`.
    #[must_use]
    pub fn between(start: TimedPoint, current: TimedPoint) -> Self {
        Self {
            horizontal: (current.x - start.x).abs(),
            vertical: (current.y - start.y).abs(),
            horizontal_direction: if current.x > start.x {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            },
            vertical_direction: if current.y > start.y {
                SwipeDirection::Down
            } else {
                SwipeDirection::Up
            },
        }
    }

    /// Straight-line length of the displacement.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.horizontal.hypot(self.vertical)
    }

    /// Angle from the horizontal axis in degrees, `0..=90`.
    ///
    /// NaN for a zero-length displacement.
    #[must_use]
    pub fn angle(&self) -> f64 {
        (self.vertical / self.diagonal()).asin().to_degrees()
    }

    /// Horizontal swipe: long enough, and at most `horizontal_swipe_degree`
    /// off the horizontal axis.
    #[must_use]
    pub fn is_horizontal_swipe(&self, options: &GestureOptions) -> bool {
        self.diagonal() >= options.swipe_distance && self.angle() <= options.horizontal_swipe_degree
    }

    /// Vertical swipe: long enough, and steeper than
    /// `horizontal_swipe_degree`.
    #[must_use]
    pub fn is_vertical_swipe(&self, options: &GestureOptions) -> bool {
        self.diagonal() >= options.swipe_distance && self.angle() > options.horizontal_swipe_degree
    }

    /// The swipe direction, if the displacement qualifies as a swipe.
    #[must_use]
    pub fn swipe(&self, options: &GestureOptions) -> Option<SwipeDirection> {
        if self.is_horizontal_swipe(options) {
            Some(self.horizontal_direction)
        } else if self.is_vertical_swipe(options) {
            Some(self.vertical_direction)
        } else {
            None
        }
    }
}

/// Swipe direction from `start` to `current`, ignoring timing.
#[must_use]
pub fn classify_swipe(
    start: TimedPoint,
    current: TimedPoint,
    options: &GestureOptions,
) -> Option<SwipeDirection> {
    SwipeMetrics::between(start, current).swipe(options)
}

/// What a released contact amounts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Held longer than the long-press limit; never a tap or swipe.
    TooLong,
    /// Last contact and never left the no-slide box; tap or double tap.
    Tap,
    /// Fast enough and far enough.
    Swipe(SwipeDirection),
    /// Nothing recognized.
    Nothing,
}

/// Classify a released contact.
///
/// `current` must already be stamped with the release time when the contact
/// never moved. `remaining` is the number of contacts still down.
#[must_use]
pub fn classify_release(
    start: TimedPoint,
    current: TimedPoint,
    tracking: &[TimedPoint],
    remaining: usize,
    options: &GestureOptions,
) -> Release {
    let duration: Millis = current.at - start.at;
    if duration > options.long_press_time_limit {
        return Release::TooLong;
    }
    if remaining == 0 && is_not_slided(start, tracking, options.dont_slide_distance) {
        Release::Tap
    } else if duration < options.swipe_time_limit {
        classify_swipe(start, current, options).map_or(Release::Nothing, Release::Swipe)
    } else {
        Release::Nothing
    }
}
