//! Remote model invocation.
//!
//! - [`ModelDriver`] is the seam to the remote generative-text service.
//! - [`RetryingInvoker`] calls a driver and retries provider throttling with
//!   exponential backoff ([`BackoffSchedule`]); every other failure is
//!   returned on first occurrence.
//! - [`HttpModelDriver`] is a JSON-over-HTTP driver built on reqwest.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod driver;
mod http;
mod retry;

pub use config::{ModelConfig, RetryConfig, RetryConfigBuilder};
pub use driver::ModelDriver;
pub use http::{HttpModelDriver, classify_failure};
pub use retry::{BackoffSchedule, RetryingInvoker};
