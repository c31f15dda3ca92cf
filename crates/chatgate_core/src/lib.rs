//! Core data types for chatgate.
//!
//! This crate provides the types shared by every stage of a chat request:
//! the verified [`Identity`], the outbound [`ModelRequest`], and the terminal
//! [`Outcome`] handed back to the boundary layer.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod identity;
mod outcome;
mod prompt;
mod request;

pub use identity::Identity;
pub use outcome::{Outcome, OutcomeBody, StatusCategory};
pub use prompt::{PromptTemplate, MESSAGE_SLOT};
pub use request::{ModelParameters, ModelParametersBuilder, ModelRequest};
