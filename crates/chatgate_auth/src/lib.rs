//! Authentication gate.
//!
//! Turns a bearer credential into an [`Identity`](chatgate_core::Identity) or
//! a rejection. Verification sits behind the [`TokenVerifier`] capability so
//! the signing scheme can change without touching the orchestrator.
//!
//! ```
//! use chatgate_auth::{bearer_token, AuthGate, Hs256Verifier};
//!
//! let gate = AuthGate::new(Hs256Verifier::new("shared-secret"));
//! assert!(gate.authenticate(None).is_err());
//! assert_eq!(bearer_token("Bearer abc"), Some("abc"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod gate;
mod verifier;

pub use config::{AuthConfig, AuthConfigBuilder};
pub use gate::{AuthGate, bearer_token};
pub use verifier::{Hs256Verifier, TokenVerifier};
