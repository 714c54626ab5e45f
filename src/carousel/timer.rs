use std::time::{Duration, Instant};

/// A source of monotonic time.
pub(crate) trait Clock: Send {
    /// Time elapsed since an arbitrary, fixed epoch.
    fn now(&self) -> Duration;
}

/// The wall clock. Copies share the same epoch.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SystemClock {
    epoch: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self { epoch: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.epoch.elapsed()
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[cfg(test)]
#[derive(Clone, Debug, Default)]
pub(crate) struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<Duration>>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap()
    }
}

/// A repeating timer polled by its owner.
///
/// Fires at most once per [`RepeatingTimer::fire_due`] call. When the owner falls more than a
/// full interval behind, the missed fires are coalesced and the timer re-arms from `now`.
#[derive(Debug)]
pub(crate) struct RepeatingTimer {
    delay: Duration,
    next_fire: Option<Duration>,
}

impl RepeatingTimer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self { delay: delay.max(Duration::from_millis(1)), next_fire: None }
    }

    pub(crate) fn arm(&mut self, now: Duration) {
        self.next_fire = Some(now + self.delay);
    }

    pub(crate) fn cancel(&mut self) {
        self.next_fire = None;
    }

    /// Time left until the next fire, if armed.
    pub(crate) fn remaining(&self, now: Duration) -> Option<Duration> {
        self.next_fire.map(|next| next.saturating_sub(now))
    }

    pub(crate) fn fire_due(&mut self, now: Duration) -> bool {
        let Some(next) = self.next_fire else {
            return false;
        };
        if now < next {
            return false;
        }
        let following = next + self.delay;
        self.next_fire = Some(if following <= now { now + self.delay } else { following });
        true
    }
}
