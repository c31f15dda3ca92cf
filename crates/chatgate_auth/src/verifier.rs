//! Token verification.

use crate::AuthConfig;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chatgate_core::Identity;
use chatgate_error::{AuthError, AuthErrorKind, AuthResult, ConfigError};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::time::Duration;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

/// Capability that turns a raw token into an identity.
pub trait TokenVerifier: Send + Sync {
    /// Verify signature and expiry, returning the subject on success.
    fn verify(&self, token: &str) -> AuthResult<Identity>;
}

#[derive(Deserialize)]
struct Header {
    alg: String,
}

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    sub: Option<String>,
    #[serde(default)]
    user_id: Option<serde_json::Value>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    exp: Option<i64>,
}

impl Claims {
    fn subject(&self) -> Option<String> {
        if let Some(sub) = self.sub.as_ref().filter(|s| !s.is_empty()) {
            return Some(sub.clone());
        }
        match self.user_id.as_ref()? {
            serde_json::Value::String(id) if !id.is_empty() => Some(id.clone()),
            serde_json::Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

/// HMAC-SHA256 signed JWT verifier with a shared secret.
pub struct Hs256Verifier {
    secret: Vec<u8>,
    leeway: Duration,
}

impl Hs256Verifier {
    /// Create a verifier for `secret` with no leeway.
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            secret: secret.as_ref().to_vec(),
            leeway: Duration::ZERO,
        }
    }

    /// Tolerate this much clock skew on `exp`.
    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Build from configuration, reading the secret from the environment.
    pub fn from_config(config: &AuthConfig) -> Result<Self, ConfigError> {
        let secret = std::env::var(config.secret_env())
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| {
                ConfigError::new(format!(
                    "environment variable {} must hold the token secret",
                    config.secret_env()
                ))
            })?;
        Ok(Self::new(secret).with_leeway(config.leeway()))
    }

    /// Verify `token` as of `now`.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Identity> {
        let (signing_input, signature_b64) = token
            .rsplit_once('.')
            .ok_or_else(|| malformed("expected three segments"))?;
        let (header_b64, claims_b64) = signing_input
            .split_once('.')
            .filter(|(_, claims)| !claims.contains('.'))
            .ok_or_else(|| malformed("expected three segments"))?;

        let header: Header = decode_json(header_b64, "header")?;
        if header.alg != "HS256" {
            return Err(AuthError::new(AuthErrorKind::UnsupportedAlgorithm(
                header.alg,
            )));
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| malformed("signature is not base64url"))?;
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| AuthError::new(AuthErrorKind::InvalidSignature))?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthError::new(AuthErrorKind::InvalidSignature))?;

        let claims: Claims = decode_json(claims_b64, "claims")?;

        let expires_at = match claims.exp {
            Some(exp) => {
                let leeway = i64::try_from(self.leeway.as_secs()).unwrap_or(i64::MAX);
                if now.timestamp() >= exp.saturating_add(leeway) {
                    debug!(exp, "Token expired");
                    return Err(AuthError::new(AuthErrorKind::Expired));
                }
                DateTime::from_timestamp(exp, 0)
            }
            None => None,
        };

        let subject = claims
            .subject()
            .ok_or_else(|| AuthError::new(AuthErrorKind::MissingSubject))?;

        let mut identity = Identity::new(subject);
        if let Some(email) = claims.email {
            identity = identity.with_email(email);
        }
        if let Some(expires_at) = expires_at {
            identity = identity.with_expires_at(expires_at);
        }
        Ok(identity)
    }
}

impl TokenVerifier for Hs256Verifier {
    fn verify(&self, token: &str) -> AuthResult<Identity> {
        self.verify_at(token, Utc::now())
    }
}

impl std::fmt::Debug for Hs256Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hs256Verifier")
            .field("secret", &"<redacted>")
            .field("leeway", &self.leeway)
            .finish()
    }
}

#[track_caller]
fn malformed(reason: &str) -> AuthError {
    AuthError::new(AuthErrorKind::MalformedToken(reason.to_string()))
}

fn decode_json<T: for<'de> Deserialize<'de>>(segment: &str, what: &str) -> AuthResult<T> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| malformed(&format!("{} is not base64url", what)))?;
    serde_json::from_slice(&bytes).map_err(|_| malformed(&format!("{} is not valid JSON", what)))
}
