//! Outbound rate limiting.
//!
//! A single [`RateLimiter`] owns one [`RateWindow`] and is shared by every
//! concurrent request that spends the same outbound budget. Admission is a
//! fixed-window counter: at most `limit` requests are admitted per window,
//! and everyone else is told how long until the window expires.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod limiter;

pub use config::{RateLimitConfig, RateLimitConfigBuilder};
pub use limiter::{Admission, RateLimiter, RateWindow};
