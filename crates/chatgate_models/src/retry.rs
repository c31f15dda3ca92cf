//! Throttling-aware invocation with exponential backoff.

use crate::{ModelDriver, RetryConfig};
use chatgate_core::ModelRequest;
use chatgate_error::{ModelResult, RetryableError};
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, instrument, warn};

/// Backoff delays: `initial * 2^k` before retry `k` (0-indexed), `max_retries` of them.
///
/// # Example
///
/// ```
/// use chatgate_models::BackoffSchedule;
/// use std::time::Duration;
///
/// let delays: Vec<_> = BackoffSchedule::new(Duration::from_secs(10), 3).collect();
/// assert_eq!(delays, vec![
///     Duration::from_secs(10),
///     Duration::from_secs(20),
///     Duration::from_secs(40),
/// ]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackoffSchedule {
    initial: Duration,
    max_retries: u32,
    next: u32,
}

impl BackoffSchedule {
    /// Create a schedule of `max_retries` delays starting at `initial`.
    pub fn new(initial: Duration, max_retries: u32) -> Self {
        Self {
            initial,
            max_retries,
            next: 0,
        }
    }

    /// Delay before retry `attempt` (0-indexed).
    pub fn delay_for(initial: Duration, attempt: u32) -> Duration {
        2u32.checked_pow(attempt)
            .map_or(Duration::MAX, |factor| initial.saturating_mul(factor))
    }

    /// Sum of every delay in the schedule.
    pub fn total(&self) -> Duration {
        (0..self.max_retries)
            .map(|attempt| Self::delay_for(self.initial, attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }
}

impl Iterator for BackoffSchedule {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.next >= self.max_retries {
            return None;
        }
        let delay = Self::delay_for(self.initial, self.next);
        self.next += 1;
        Some(delay)
    }
}

/// Calls a [`ModelDriver`], retrying provider throttling.
///
/// Backoff sleeps happen on the calling task only. Dropping the returned
/// future cancels both the in-flight call and any pending sleep.
#[derive(Clone)]
pub struct RetryingInvoker {
    driver: Arc<dyn ModelDriver>,
    config: RetryConfig,
}

impl RetryingInvoker {
    /// Create an invoker.
    pub fn new(driver: Arc<dyn ModelDriver>, config: RetryConfig) -> Self {
        debug!(
            provider = driver.provider_name(),
            max_retries = config.max_retries(),
            initial_delay_secs = config.initial_delay_secs(),
            "Creating retrying invoker"
        );
        Self { driver, config }
    }

    /// The retry policy.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// The wrapped driver.
    pub fn driver(&self) -> &Arc<dyn ModelDriver> {
        &self.driver
    }

    /// Backoff delays this invoker will use.
    pub fn schedule(&self) -> BackoffSchedule {
        BackoffSchedule::new(self.config.initial_delay(), *self.config.max_retries())
    }

    /// Generate text, retrying throttling up to `max_retries` times.
    ///
    /// Returns the last throttling error once retries are exhausted, and any
    /// other error immediately.
    #[instrument(
        skip_all,
        fields(
            provider = self.driver.provider_name(),
            model = %request.parameters().model_id(),
            prompt_len = request.prompt().len()
        )
    )]
    pub async fn invoke(&self, request: &ModelRequest) -> ModelResult<String> {
        let attempts = AtomicU32::new(0);
        let max_retries = *self.config.max_retries();
        let mut delays = self.schedule();
        let driver = &self.driver;

        let result = Retry::spawn(self.schedule(), || {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed);
            let next_delay = delays.next();
            async move {
                debug!(attempt, "Invoking model");
                match driver.invoke(request).await {
                    Ok(text) => Ok(text),
                    Err(e) if e.is_retryable() => {
                        match next_delay {
                            Some(delay) => warn!(
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                error = %e,
                                "Provider throttled, backing off"
                            ),
                            None => warn!(
                                attempt,
                                max_retries,
                                error = %e,
                                "Provider still throttling, retries exhausted"
                            ),
                        }
                        Err(RetryError::Transient {
                            err: e,
                            retry_after: None,
                        })
                    }
                    Err(e) => {
                        error!(attempt, error = %e, "Permanent model error, failing immediately");
                        Err(RetryError::Permanent(e))
                    }
                }
            }
        })
        .await;

        debug!(
            attempts = attempts.load(Ordering::Relaxed),
            success = result.is_ok(),
            "Invocation finished"
        );
        result
    }
}

impl std::fmt::Debug for RetryingInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryingInvoker")
            .field("provider", &self.driver.provider_name())
            .field("config", &self.config)
            .finish()
    }
}
