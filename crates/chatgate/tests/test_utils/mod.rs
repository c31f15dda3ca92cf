//! Test utilities for chatgate tests.

pub mod drivers;
pub mod tokens;

#[allow(unused_imports)]
pub use drivers::{HangingDriver, ScriptedDriver, throttled};
#[allow(unused_imports)]
pub use tokens::{FixedTokenVerifier, VALID_CREDENTIAL, sign_hs256};

use chatgate::{
    AuthGate, CacheConfig, Orchestrator, RateLimitConfig, RateLimiter, ResponseCache,
    RetryConfig, RetryingInvoker,
};
use std::sync::Arc;

/// Orchestrator over `driver` with the given budget and a 10s/3-retry policy.
#[allow(dead_code)]
pub fn orchestrator(driver: Arc<ScriptedDriver>, limit: u32, window_secs: u64) -> Orchestrator {
    let limiter = RateLimiter::new(
        &RateLimitConfig::default()
            .with_limit(limit)
            .with_window_secs(window_secs),
    )
    .expect("valid rate limit");

    Orchestrator::new(
        AuthGate::new(FixedTokenVerifier),
        Arc::new(ResponseCache::new(CacheConfig::default())),
        Arc::new(limiter),
        RetryingInvoker::new(driver, RetryConfig::default()),
    )
}
