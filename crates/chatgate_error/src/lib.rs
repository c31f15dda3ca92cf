//! Error types for chatgate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use chatgate_error::{ChatgateResult, ConfigError};
//!
//! fn load() -> ChatgateResult<String> {
//!     Err(ConfigError::new("window_secs must be non-zero"))?
//! }
//!
//! assert!(load().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod config;
mod error;
mod model;

pub use auth::{AuthError, AuthErrorKind, AuthResult};
pub use config::ConfigError;
pub use error::{ChatgateError, ChatgateErrorKind, ChatgateResult};
pub use model::{ModelError, ModelErrorKind, ModelResult, RetryableError};
