//! Chatgate - admission and retry orchestration for a chat model.
//!
//! Every inbound chat message passes through one pipeline:
//!
//! 1. **Authenticate** the bearer credential ([`AuthGate`]).
//! 2. **Validate** the message (trimmed, non-empty, bounded length).
//! 3. **Cache check**: a hit answers immediately and consumes no rate budget.
//! 4. **Rate check** against a shared fixed window ([`RateLimiter`]).
//! 5. **Invoke** the model, retrying provider throttling with exponential
//!    backoff ([`RetryingInvoker`]).
//!
//! The result is always an [`Outcome`]; the boundary layer maps it to a
//! status with [`Outcome::status`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use chatgate::{ChatgateConfig, HttpModelDriver, Orchestrator};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ChatgateConfig::load()?;
//!     let driver = HttpModelDriver::from_config(config.model())?;
//!     let orchestrator = Orchestrator::from_config(&config, Arc::new(driver))?;
//!
//!     let outcome = orchestrator.submit(Some("Bearer eyJ..."), "Hello").await;
//!     println!("{} {:?}", outcome.status().code(), outcome.body());
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `chatgate_error` - Error types
//! - `chatgate_core` - Identity, request and outcome types
//! - `chatgate_auth` - Bearer extraction and HS256 verification
//! - `chatgate_cache` - Bounded LRU response cache
//! - `chatgate_rate_limit` - Fixed-window rate limiter
//! - `chatgate_models` - Model drivers and throttling retry
//!
//! This crate (`chatgate`) ties them together and re-exports them.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
pub mod observability;
mod orchestrator;

pub use crate::config::{ChatgateConfig, ValidationConfig, ValidationConfigBuilder};
pub use orchestrator::{Orchestrator, RequestStage};

pub use chatgate_auth::{
    AuthConfig, AuthConfigBuilder, AuthGate, Hs256Verifier, TokenVerifier, bearer_token,
};
pub use chatgate_cache::{CacheConfig, CacheConfigBuilder, ResponseCache};
pub use chatgate_core::{
    Identity, ModelParameters, ModelRequest, Outcome, OutcomeBody, PromptTemplate, StatusCategory,
};
pub use chatgate_error::{
    AuthError, AuthErrorKind, ChatgateError, ChatgateErrorKind, ChatgateResult, ConfigError,
    ModelError, ModelErrorKind, RetryableError,
};
pub use chatgate_models::{
    BackoffSchedule, HttpModelDriver, ModelConfig, ModelDriver, RetryConfig, RetryConfigBuilder,
    RetryingInvoker,
};
pub use chatgate_rate_limit::{Admission, RateLimitConfig, RateLimitConfigBuilder, RateLimiter};
