//! Credential verification errors.
//!
//! The kinds are kept distinct for logging. Callers outside the gate collapse
//! all of them into a single rejection.

/// Why a credential was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AuthErrorKind {
    /// No credential was supplied, or it was not a bearer credential
    #[display("Missing bearer credential")]
    MissingCredential,
    /// Token could not be decoded
    #[display("Malformed token: {}", _0)]
    MalformedToken(String),
    /// Token header names an algorithm the verifier does not accept
    #[display("Unsupported token algorithm: {}", _0)]
    UnsupportedAlgorithm(String),
    /// Signature does not match the shared secret
    #[display("Invalid token signature")]
    InvalidSignature,
    /// The `exp` claim lies in the past
    #[display("Token expired")]
    Expired,
    /// Neither `sub` nor `user_id` was present
    #[display("Token carries no subject")]
    MissingSubject,
}

/// Authentication error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Auth Error: {} at line {} in {}", kind, line, file)]
pub struct AuthError {
    /// The specific error kind
    pub kind: AuthErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl AuthError {
    /// Create a new auth error with location tracking.
    #[track_caller]
    pub fn new(kind: AuthErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &AuthErrorKind {
        &self.kind
    }
}

/// Result type for credential verification.
pub type AuthResult<T> = Result<T, AuthError>;
