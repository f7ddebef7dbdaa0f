//! Time source for the countdown loop.

use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, Local};

/// Sleeping and wall-clock reads, abstracted so the countdown can be driven
/// without real waiting.
#[allow(async_fn_in_trait)]
pub trait Clock {
    /// Suspends the current task for `duration`.
    async fn sleep(&self, duration: Duration);

    /// Returns the current local time.
    fn now(&self) -> DateTime<Local>;
}

/// Real clock backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Mock clock for testing.
///
/// Sleeps return immediately and are recorded; `now` returns a fixed time.
#[derive(Debug)]
pub struct MockClock {
    now: DateTime<Local>,
    sleeps: Mutex<Vec<Duration>>,
}

impl MockClock {
    #[must_use]
    pub fn new(now: DateTime<Local>) -> Self {
        Self {
            now,
            sleeps: Mutex::new(Vec::new()),
        }
    }

    /// Returns every requested sleep, in order.
    #[must_use]
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    #[must_use]
    pub fn sleep_count(&self) -> usize {
        self.sleeps.lock().unwrap().len()
    }
}

impl Default for MockClock {
    fn default() -> Self {
        Self::new(Local::now())
    }
}

impl Clock for MockClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }

    fn now(&self) -> DateTime<Local> {
        self.now
    }
}
