//! The gate every chat request passes first.

use crate::TokenVerifier;
use chatgate_core::Identity;
use chatgate_error::{AuthError, AuthErrorKind, AuthResult};
use std::sync::Arc;
use tracing::{debug, instrument};

const BEARER_PREFIX: &str = "Bearer ";

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Validates bearer credentials.
///
/// Holds no mutable state; clones share the same verifier.
#[derive(Clone)]
pub struct AuthGate {
    verifier: Arc<dyn TokenVerifier>,
}

impl AuthGate {
    /// Create a gate around a verifier.
    pub fn new(verifier: impl TokenVerifier + 'static) -> Self {
        Self {
            verifier: Arc::new(verifier),
        }
    }

    /// Create a gate around an already shared verifier.
    pub fn from_shared(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Verify the `Authorization` header value, if any.
    #[instrument(skip_all, fields(has_credential = credential.is_some()))]
    pub fn authenticate(&self, credential: Option<&str>) -> AuthResult<Identity> {
        let token = credential
            .and_then(bearer_token)
            .ok_or_else(|| AuthError::new(AuthErrorKind::MissingCredential))?;

        let identity = self.verifier.verify(token)?;
        debug!(subject = %identity.subject(), "Credential accepted");
        Ok(identity)
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_required() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("Basic dXNlcjpwYXNz"), None);
        assert_eq!(bearer_token("abc.def.ghi"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer    "), None);
    }
}
