//! Rate limit configuration.

use chatgate_error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Outbound request budget.
///
/// # Example
///
/// ```toml
/// [rate_limit]
/// limit = 1
/// window_secs = 10
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct RateLimitConfig {
    /// Requests admitted per window
    #[serde(default = "default_limit")]
    limit: u32,

    /// Window length in seconds
    #[serde(default = "default_window_secs")]
    window_secs: u64,
}

fn default_limit() -> u32 {
    1
}

fn default_window_secs() -> u64 {
    10
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            window_secs: default_window_secs(),
        }
    }
}

impl RateLimitConfig {
    /// Window length as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Reject budgets that would admit nothing or never reset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limit == 0 {
            return Err(ConfigError::new("rate_limit.limit must be at least 1"));
        }
        if self.window_secs == 0 {
            return Err(ConfigError::new("rate_limit.window_secs must be at least 1"));
        }
        Ok(())
    }
}
