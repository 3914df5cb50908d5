use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Millisecond time source for the persistence timer.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall clock measured from construction.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
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
    fn now_ms(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}

/// Trailing-edge debounce timer.
///
/// Every [`Debouncer::schedule`] cancels the pending deadline and starts a
/// new one `window_ms` later. Nothing is queued: the caller fires once when
/// [`Debouncer::take_due`] reports the quiet period has elapsed.
#[derive(Debug, Clone)]
pub struct Debouncer {
    window_ms: u64,
    deadline: Option<u64>,
}

impl Debouncer {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            deadline: None,
        }
    }

    pub fn schedule(&mut self, now: u64) {
        self.deadline = Some(now.saturating_add(self.window_ms));
    }

    /// Time left until the deadline, or `None` when idle.
    pub fn remaining(&self, now: u64) -> Option<u64> {
        self.deadline.map(|d| d.saturating_sub(now))
    }

    /// Clear the deadline if it has passed, reporting whether it did.
    pub fn take_due(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(d) if now >= d => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending deadline, reporting whether one existed.
    pub fn cancel(&mut self) -> bool {
        self.deadline.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_quiet_window() {
        let mut d = Debouncer::new(300);
        d.schedule(0);
        assert!(!d.take_due(299));
        assert!(d.take_due(300));
        assert!(!d.take_due(1000));
        assert_eq!(d.remaining(1000), None);
    }

    #[test]
    fn reschedule_pushes_deadline() {
        let mut d = Debouncer::new(300);
        d.schedule(0);
        d.schedule(50);
        d.schedule(100);
        assert_eq!(d.remaining(100), Some(300));
        assert!(!d.take_due(350));
        assert!(d.take_due(400));
    }

    #[test]
    fn cancel_clears() {
        let mut d = Debouncer::new(10);
        assert!(!d.cancel());
        d.schedule(5);
        assert!(d.cancel());
        assert_eq!(d.remaining(5), None);
    }

    #[test]
    fn manual_clock_is_shared() {
        let clock = ManualClock::new();
        let other = clock.clone();
        clock.advance(120);
        other.advance(30);
        assert_eq!(clock.now_ms(), 150);
    }
}
