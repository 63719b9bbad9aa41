//! Per-contact trajectory tracking.

use crate::geometry::{Millis, Point, TimedPoint};

/// Trajectory of one physical contact, from its down to its release.
///
/// `tracking` is never empty: the first sample is the start point and the
/// last sample is the current point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointInfo {
    tracking: Vec<TimedPoint>,
    serial: u64,
}

impl PointInfo {
    /// Start tracking a contact at `point`.
    ///
    /// `serial` identifies this trajectory among all trajectories created by
    /// the same tracking table.
    #[must_use]
    pub fn new(point: Point, now: Millis, serial: u64) -> Self {
        Self {
            tracking: vec![TimedPoint::stamp(point, now)],
            serial,
        }
    }

    /// Record a new sample.
    pub fn update(&mut self, point: Point, now: Millis) {
        self.tracking.push(TimedPoint::stamp(point, now));
    }

    /// First sample.
    #[must_use]
    pub fn start(&self) -> TimedPoint {
        self.tracking[0]
    }

    /// Most recent sample.
    #[must_use]
    pub fn current(&self) -> TimedPoint {
        self.tracking[self.tracking.len() - 1]
    }

    /// Every sample, oldest first.
    #[must_use]
    pub fn tracking(&self) -> &[TimedPoint] {
        &self.tracking
    }

    /// Creation time.
    #[must_use]
    pub fn at(&self) -> Millis {
        self.start().at
    }

    /// Identity of this trajectory within its tracking table.
    #[must_use]
    pub const fn serial(&self) -> u64 {
        self.serial
    }

    /// True while no sample beyond the start has been recorded.
    #[must_use]
    pub fn is_stationary(&self) -> bool {
        self.tracking.len() == 1
    }
}
