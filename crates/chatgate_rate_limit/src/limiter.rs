//! Fixed-window rate limiter.

use crate::RateLimitConfig;
use chatgate_error::ConfigError;
use derive_getters::Getters;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, instrument};

/// Result of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// Call the model now; one unit of budget was spent
    Proceed,
    /// Budget exhausted; the window expires after this long
    WaitFor(Duration),
}

impl Admission {
    /// Whether the request was admitted.
    pub fn is_proceed(&self) -> bool {
        matches!(self, Admission::Proceed)
    }
}

/// Counter state for the current window.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RateWindow {
    window_start: Instant,
    count: u32,
    limit: u32,
    window_duration: Duration,
}

impl RateWindow {
    /// Start an empty window at `now`.
    pub fn new(limit: u32, window_duration: Duration, now: Instant) -> Self {
        Self {
            window_start: now,
            count: 0,
            limit,
            window_duration,
        }
    }

    /// Run one admission decision at `now`.
    ///
    /// The window is reset before the decision whenever it has run its full
    /// length. A rejected call neither counts nor moves the window.
    pub fn admit_at(&mut self, now: Instant) -> Admission {
        let elapsed = now.saturating_duration_since(self.window_start);

        // A zero remainder means the window is over, so the boundary instant
        // belongs to the next window.
        if elapsed >= self.window_duration {
            debug!(
                previous_count = self.count,
                elapsed_ms = elapsed.as_millis() as u64,
                "Rate window expired, resetting"
            );
            self.count = 0;
            self.window_start = now;
        }

        if self.count >= self.limit {
            let elapsed = now.saturating_duration_since(self.window_start);
            let remaining = self.window_duration.saturating_sub(elapsed);
            return Admission::WaitFor(remaining);
        }

        self.count += 1;
        Admission::Proceed
    }
}

/// Shared outbound rate limiter.
///
/// Every call to [`admit`](RateLimiter::admit) takes the lock, decides, and
/// releases it; the lock is never held across an await point.
///
/// # Example
///
/// ```
/// use chatgate_rate_limit::{Admission, RateLimitConfig, RateLimiter};
///
/// let limiter = RateLimiter::new(&RateLimitConfig::default()).unwrap();
/// assert_eq!(limiter.admit(), Admission::Proceed);
/// assert!(matches!(limiter.admit(), Admission::WaitFor(_)));
/// ```
#[derive(Debug)]
pub struct RateLimiter {
    window: Mutex<RateWindow>,
}

impl RateLimiter {
    /// Create a limiter from validated configuration.
    pub fn new(config: &RateLimitConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        debug!(
            limit = config.limit(),
            window_secs = config.window_secs(),
            "Creating rate limiter"
        );
        Ok(Self {
            window: Mutex::new(RateWindow::new(
                *config.limit(),
                config.window(),
                Instant::now(),
            )),
        })
    }

    /// Decide whether one more request may call the model now.
    #[instrument(skip(self))]
    pub fn admit(&self) -> Admission {
        let now = Instant::now();
        let admission = self
            .window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .admit_at(now);

        match admission {
            Admission::Proceed => debug!("Request admitted"),
            Admission::WaitFor(wait) => {
                debug!(wait_ms = wait.as_millis() as u64, "Request over budget")
            }
        }
        admission
    }

    /// Copy of the current window state.
    pub fn snapshot(&self) -> RateWindow {
        self.window
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
