//! Input pacing gates
//!
//! Search input and map movement arrive in bursts. [`Debouncer`] waits for a
//! burst to settle before letting work through, [`Throttle`] lets work through
//! at most once per interval. Both are polled by the caller with the current
//! instant; neither owns a timer or a thread.
//!
//! # Example
//!
//! ```rust
//! use poimap_core::pacing::Debouncer;
//! use std::time::{Duration, Instant};
//!
//! let start = Instant::now();
//! let mut debouncer = Debouncer::new(Duration::from_millis(300));
//!
//! debouncer.trigger_at(start);
//! assert!(!debouncer.ready_at(start + Duration::from_millis(100)));
//! assert!(debouncer.ready_at(start + Duration::from_millis(300)));
//! ```

use std::time::{Duration, Instant};

/// Fires once after activity has been quiet for `delay`
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    last_trigger: Option<Instant>,
    pending: bool,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_trigger: None,
            pending: false,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Record activity at `now`, restarting the quiet period
    pub fn trigger_at(&mut self, now: Instant) {
        self.last_trigger = Some(now);
        self.pending = true;
    }

    /// Returns true once per burst, when `delay` has passed since the last trigger
    pub fn ready_at(&mut self, now: Instant) -> bool {
        match self.last_trigger {
            Some(last) if self.pending && now.saturating_duration_since(last) >= self.delay => {
                self.pending = false;
                true
            }
            _ => false,
        }
    }

    /// Returns true if a trigger has not fired yet
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Drop the pending trigger
    pub fn cancel(&mut self) {
        self.pending = false;
    }

    pub fn trigger(&mut self) {
        self.trigger_at(Instant::now());
    }

    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }
}

/// Lets work through at most once per `interval`
///
/// Calls rejected during an interval are remembered so that a trailing run can
/// be flushed once the interval is over.
#[derive(Debug, Clone)]
pub struct Throttle {
    interval: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl Throttle {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: None,
            pending: false,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true if work may run at `now`, and records the run
    pub fn try_acquire_at(&mut self, now: Instant) -> bool {
        if self.time_until_ready_at(now).is_zero() {
            self.last_run = Some(now);
            self.pending = false;
            true
        } else {
            self.pending = true;
            false
        }
    }

    /// Time left before the next run is allowed
    pub fn time_until_ready_at(&self, now: Instant) -> Duration {
        match self.last_run {
            None => Duration::ZERO,
            Some(last) => self
                .interval
                .saturating_sub(now.saturating_duration_since(last)),
        }
    }

    /// Returns true if a rejected call is waiting and may now run
    pub fn flush_at(&mut self, now: Instant) -> bool {
        self.pending && self.try_acquire_at(now)
    }

    /// Returns true if a rejected call is waiting
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn try_acquire(&mut self) -> bool {
        self.try_acquire_at(Instant::now())
    }

    pub fn time_until_ready(&self) -> Duration {
        self.time_until_ready_at(Instant::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_debouncer_waits_for_quiet() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(300));

        debouncer.trigger_at(start);
        debouncer.trigger_at(start + ms(200));

        assert!(!debouncer.ready_at(start + ms(400)));
        assert!(debouncer.ready_at(start + ms(500)));
    }

    #[test]
    fn test_debouncer_fires_once_per_burst() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(100));

        assert!(!debouncer.ready_at(start + ms(1000)));

        debouncer.trigger_at(start);
        assert!(debouncer.ready_at(start + ms(150)));
        assert!(!debouncer.ready_at(start + ms(300)));
        assert!(!debouncer.is_pending());
    }

    #[test]
    fn test_debouncer_cancel() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(ms(100));

        debouncer.trigger_at(start);
        debouncer.cancel();
        assert!(!debouncer.ready_at(start + ms(200)));
    }

    #[test]
    fn test_throttle_once_per_interval() {
        let start = Instant::now();
        let mut throttle = Throttle::new(ms(100));

        assert!(throttle.try_acquire_at(start));
        assert!(!throttle.try_acquire_at(start + ms(50)));
        assert_eq!(throttle.time_until_ready_at(start + ms(60)), ms(40));
        assert!(throttle.try_acquire_at(start + ms(100)));
    }

    #[test]
    fn test_throttle_trailing_call() {
        let start = Instant::now();
        let mut throttle = Throttle::new(ms(100));

        assert!(throttle.try_acquire_at(start));
        assert!(!throttle.flush_at(start + ms(10)));

        assert!(!throttle.try_acquire_at(start + ms(20)));
        assert!(throttle.has_pending());
        assert!(!throttle.flush_at(start + ms(50)));
        assert!(throttle.flush_at(start + ms(120)));
        assert!(!throttle.has_pending());
        assert!(!throttle.flush_at(start + ms(300)));
    }

    #[test]
    fn test_throttle_wall_clock() {
        let mut throttle = Throttle::new(Duration::from_secs(60));

        assert!(throttle.try_acquire());
        assert!(!throttle.try_acquire());
        assert!(throttle.time_until_ready() > Duration::ZERO);
    }
}
