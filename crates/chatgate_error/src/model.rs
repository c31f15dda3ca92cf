//! Remote model errors and retry classification.

/// Remote model failure conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelErrorKind {
    /// Provider-side throttling (HTTP 429 or a `ThrottlingException`)
    #[display("Provider throttled the request: {}", _0)]
    Throttled(String),
    /// HTTP error with status code and message
    #[display("HTTP {} error: {}", status_code, message)]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Error message
        message: String,
    },
    /// Request never produced a response (connect, timeout, TLS)
    #[display("Transport error: {}", _0)]
    Transport(String),
    /// Response body could not be understood
    #[display("Invalid model response: {}", _0)]
    InvalidResponse(String),
    /// Driver is misconfigured
    #[display("Model driver configuration error: {}", _0)]
    Configuration(String),
}

impl ModelErrorKind {
    /// Check if this error type should be retried.
    ///
    /// Only provider-side throttling is retried; every other failure is
    /// terminal on first occurrence.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ModelErrorKind::Throttled(_))
    }
}

/// Model error with source location tracking.
///
/// # Examples
///
/// ```
/// use chatgate_error::{ModelError, ModelErrorKind, RetryableError};
///
/// let err = ModelError::new(ModelErrorKind::Throttled("ThrottlingException".to_string()));
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", kind, line, file)]
pub struct ModelError {
    /// The kind of error that occurred
    pub kind: ModelErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ModelErrorKind {
        &self.kind
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use chatgate_error::{ModelError, ModelErrorKind, RetryableError};
///
/// let err = ModelError::new(ModelErrorKind::Http {
///     status_code: 500,
///     message: "Internal error".to_string(),
/// });
///
/// assert!(!err.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Provider throttling returns true. Everything else, including
    /// other 5xx responses, returns false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for ModelError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for remote model calls.
pub type ModelResult<T> = Result<T, ModelError>;
