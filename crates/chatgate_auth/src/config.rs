//! Auth configuration.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Where the signing secret comes from and how much clock skew to allow.
///
/// The secret itself never lives in configuration files.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct AuthConfig {
    /// Environment variable holding the shared HS256 secret
    #[serde(default = "default_secret_env")]
    #[setters(into)]
    secret_env: String,

    /// Seconds of tolerance when checking `exp`
    #[serde(default)]
    leeway_secs: u64,
}

fn default_secret_env() -> String {
    "CHATGATE_JWT_SECRET".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
            leeway_secs: 0,
        }
    }
}

impl AuthConfig {
    /// Leeway as a duration.
    pub fn leeway(&self) -> Duration {
        Duration::from_secs(self.leeway_secs)
    }
}
