//! Verified caller identity.

use chrono::{DateTime, Utc};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// The subject a credential was issued to.
///
/// Produced by the auth gate and dropped at the end of the request; it is
/// never persisted.
///
/// # Examples
///
/// ```
/// use chatgate_core::Identity;
///
/// let identity = Identity::new("42");
/// assert_eq!(identity.subject(), "42");
/// assert!(identity.expires_at().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Identity {
    subject: String,
    email: Option<String>,
    expires_at: Option<DateTime<Utc>>,
}

impl Identity {
    /// Create an identity with only a subject.
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            email: None,
            expires_at: None,
        }
    }

    /// Attach the email claim.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Attach the credential expiry.
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }
}
