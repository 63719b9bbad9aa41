//! Deadline bookkeeping for deferred classification.
//!
//! The engine never sleeps. It records deadlines here and the host (a
//! `setTimeout` in the browser, the harness in tests) calls back once the
//! earliest one is due.

use crate::geometry::Millis;

/// A payload due at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Deadline<T> {
    /// When the payload is due.
    pub at: Millis,
    /// What to do when due.
    pub payload: T,
}

/// At most one pending deadline; arming replaces the previous one.
#[derive(Debug, Clone)]
pub struct TimerSlot<T> {
    pending: Option<Deadline<T>>,
}

impl<T> Default for TimerSlot<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> TimerSlot<T> {
    /// Create an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: None }
    }

    /// Schedule `payload` at `at`, dropping whatever was pending.
    pub fn arm(&mut self, at: Millis, payload: T) {
        self.pending = Some(Deadline { at, payload });
    }

    /// Cancel and return the pending payload.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|d| d.payload)
    }

    /// True if a deadline is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// The pending deadline, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.pending.as_ref().map(|d| d.at)
    }

    /// Take the payload if its deadline is at or before `now`.
    pub fn take_due(&mut self, now: Millis) -> Option<Deadline<T>> {
        if self.pending.as_ref().is_some_and(|d| d.at <= now) {
            self.pending.take()
        } else {
            None
        }
    }
}

/// Deadlines keyed by `K`; at most one per key.
#[derive(Debug, Clone)]
pub struct KeyedTimers<K, T> {
    pending: Vec<(K, Deadline<T>)>,
}

impl<K, T> Default for KeyedTimers<K, T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
        }
    }
}

impl<K: PartialEq, T> KeyedTimers<K, T> {
    /// Schedule `payload` for `key`, replacing any deadline for that key.
    pub fn arm(&mut self, key: K, at: Millis, payload: T) {
        self.cancel(&key);
        self.pending.push((key, Deadline { at, payload }));
    }

    /// Cancel the deadline for `key`.
    pub fn cancel(&mut self, key: &K) -> Option<T> {
        let index = self.pending.iter().position(|(k, _)| k == key)?;
        Some(self.pending.remove(index).1.payload)
    }

    /// Keep only the deadlines for which `keep` returns true.
    pub fn retain(&mut self, mut keep: impl FnMut(&K, &T) -> bool) {
        self.pending.retain(|(k, d)| keep(k, &d.payload));
    }

    /// Cancel everything.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Number of pending deadlines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// True if nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending deadline.
    #[must_use]
    pub fn deadline(&self) -> Option<Millis> {
        self.pending.iter().map(|(_, d)| d.at).reduce(f64::min)
    }

    /// Remove and return the earliest deadline if it is due at `now`.
    pub fn take_due(&mut self, now: Millis) -> Option<(K, Deadline<T>)> {
        let (index, _) = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, (_, d))| d.at <= now)
            .min_by(|(_, (_, a)), (_, (_, b))| a.at.total_cmp(&b.at))?;
        Some(self.pending.remove(index))
    }
}
