use std::time::{Duration, Instant};

/// The scheduling boundary of the game loop.  The game asks for a new rate
/// whenever its speed tier changes; how ticks are actually produced is up
/// to the implementor.
pub(crate) trait TickScheduler {
    fn set_tick_rate(&mut self, interval: Duration);
}

/// Deadline-based tick source for the terminal event loop.
///
/// The deadline of the next tick is computed lazily, the first time the loop
/// asks how long to wait.  Changing the rate discards the pending deadline
/// and starts a fresh interval, so a tick is never fired twice or skipped
/// across a rate change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Ticker {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Ticker {
    pub(crate) fn new(interval: Duration) -> Ticker {
        Ticker {
            interval,
            next_tick: None,
        }
    }

    /// Return how long to wait from `now` until the next tick is due
    pub(crate) fn wait(&mut self, now: Instant) -> Duration {
        let interval = self.interval;
        let when = *self.next_tick.get_or_insert_with(|| now + interval);
        when.saturating_duration_since(now)
    }

    /// If a tick is due at `now`, schedule the following one and return
    /// `true`
    pub(crate) fn fire(&mut self, now: Instant) -> bool {
        if self.wait(now).is_zero() {
            self.next_tick = Some(now + self.interval);
            true
        } else {
            false
        }
    }

    pub(crate) fn restart(&mut self, interval: Duration, now: Instant) {
        self.interval = interval;
        self.next_tick = Some(now + interval);
    }
}

impl TickScheduler for Ticker {
    fn set_tick_rate(&mut self, interval: Duration) {
        if interval != self.interval {
            log::debug!("Tick interval changed to {interval:?}");
        }
        self.restart(interval, Instant::now());
    }
}
