//! Time sources for the engine.

use crate::geometry::Millis;
use std::cell::Cell;
use std::rc::Rc;
use web_time::Instant;

/// Monotonic millisecond clock.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.
    fn now(&self) -> Millis;
}

/// Wall clock backed by [`web_time::Instant`] (`performance.now()` on wasm).
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Start a clock at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Millis {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Hand-driven clock. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<Millis>>,
}

impl ManualClock {
    /// Clock starting at `start` ms.
    #[must_use]
    pub fn starting_at(start: Millis) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Jump to `t`. Time never goes backwards; earlier values are ignored.
    pub fn set(&self, t: Millis) {
        if t > self.now.get() {
            self.now.set(t);
        }
    }

    /// Move forward by `dt` ms.
    pub fn advance(&self, dt: Millis) {
        self.set(self.now.get() + dt);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Millis {
        self.now.get()
    }
}
