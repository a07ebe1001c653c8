//! Time source used for timestamps and deferred tasks.

use crate::model::note::Timestamp;
use chrono::Utc;
use std::cell::Cell;
use std::rc::Rc;

/// Source of "now" for the store.
pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }
}

/// Manually driven clock. Clones share the same current time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Rc<Cell<Timestamp>>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    /// Moves the clock forward by `by`. Steps that overflow are ignored.
    pub fn advance(&self, by: std::time::Duration) {
        let next = chrono::Duration::from_std(by)
            .ok()
            .and_then(|step| self.now.get().checked_add_signed(step));
        if let Some(next) = next {
            self.now.set(next);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock};
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    #[test]
    fn clones_share_time() {
        let start = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let shared = clock.clone();
        shared.advance(Duration::from_millis(1500));
        assert_eq!(
            clock.now(),
            start + chrono::Duration::milliseconds(1500)
        );
    }
}
