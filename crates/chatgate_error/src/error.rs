//! Top-level error wrapper types.

use crate::{AuthError, ConfigError, ModelError};

/// Any chatgate error.
///
/// # Examples
///
/// ```
/// use chatgate_error::{ChatgateError, ConfigError};
///
/// let err: ChatgateError = ConfigError::new("bad window").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ChatgateErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Credential verification error
    #[from(AuthError)]
    Auth(AuthError),
    /// Remote model error
    #[from(ModelError)]
    Model(ModelError),
}

/// Chatgate error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Chatgate Error: {}", _0)]
pub struct ChatgateError(Box<ChatgateErrorKind>);

impl ChatgateError {
    /// Create a new error from a kind.
    pub fn new(kind: ChatgateErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ChatgateErrorKind {
        &self.0
    }
}

impl<T> From<T> for ChatgateError
where
    T: Into<ChatgateErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for chatgate operations.
pub type ChatgateResult<T> = std::result::Result<T, ChatgateError>;
