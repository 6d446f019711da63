//! Computer opponent: move selection and the single-shot reply timer.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::Instant;

/// Picks one index out of `count` candidates.
pub trait MoveSelector {
    /// Returns `None` only when `count == 0`.
    fn select(&mut self, count: usize) -> Option<usize>;
}

/// Uniform random choice.
#[derive(Debug, Clone)]
pub struct RandomSelector<R = StdRng> {
    rng: R,
}

impl RandomSelector<StdRng> {
    /// Seeded from the operating system (or the browser on wasm).
    pub fn from_os_rng() -> Self {
        Self::new(StdRng::from_os_rng())
    }

    /// Deterministic selector for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSelector<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MoveSelector for RandomSelector<R> {
    fn select(&mut self, count: usize) -> Option<usize> {
        if count == 0 {
            None
        } else {
            Some(self.rng.random_range(0..count))
        }
    }
}

/// One pending delayed action at most.
///
/// The scheduler only tracks *when* the reply is due. What gets played is
/// decided at fire time against the live position.
#[derive(Debug, Clone)]
pub struct OpponentScheduler {
    delay: Duration,
    due: Option<Instant>,
}

impl OpponentScheduler {
    pub fn new(delay: Duration) -> Self {
        Self { delay, due: None }
    }

    #[inline]
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule the reply `delay` after `now`. An already scheduled reply is
    /// kept as is.
    pub fn schedule(&mut self, now: Instant) -> Instant {
        *self.due.get_or_insert(now + self.delay)
    }

    #[inline]
    pub fn due(&self) -> Option<Instant> {
        self.due
    }

    #[inline]
    pub fn is_scheduled(&self) -> bool {
        self.due.is_some()
    }

    /// Drop the scheduled reply. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    /// Consume the scheduled reply if it is due at `now`.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until the reply fires, zero if overdue.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.due.map(|due| due.saturating_duration_since(now))
    }
}

impl Default for OpponentScheduler {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::config::DEFAULT_OPPONENT_DELAY_MS))
    }
}
