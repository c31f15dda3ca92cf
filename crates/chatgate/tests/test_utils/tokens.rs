//! Credentials for tests.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chatgate::{AuthError, AuthErrorKind, Identity, TokenVerifier};
use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Header value accepted by [`FixedTokenVerifier`].
#[allow(dead_code)]
pub const VALID_CREDENTIAL: &str = "Bearer valid-token";

/// Accepts exactly one token, "valid-token".
pub struct FixedTokenVerifier;

impl TokenVerifier for FixedTokenVerifier {
    fn verify(&self, token: &str) -> Result<Identity, AuthError> {
        if token == "valid-token" {
            Ok(Identity::new("user-1"))
        } else {
            Err(AuthError::new(AuthErrorKind::InvalidSignature))
        }
    }
}

/// Sign `claims` as an HS256 token.
#[allow(dead_code)]
pub fn sign_hs256(secret: &str, claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let signing_input = format!("{header}.{payload}");

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(signing_input.as_bytes());
    let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
    format!("{signing_input}.{signature}")
}
