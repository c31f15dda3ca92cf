//! Retry and driver configuration.

use chatgate_core::{ModelParameters, PromptTemplate};
use chatgate_error::ConfigError;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Throttling retry policy.
///
/// ```toml
/// [retry]
/// max_retries = 3
/// initial_delay_secs = 10
/// ```
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
pub struct RetryConfig {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    max_retries: u32,

    /// Delay before the first retry; doubles each retry
    #[serde(default = "default_initial_delay_secs")]
    initial_delay_secs: u64,
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_delay_secs() -> u64 {
    10
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_secs: default_initial_delay_secs(),
        }
    }
}

impl RetryConfig {
    /// Delay before the first retry.
    pub fn initial_delay(&self) -> Duration {
        Duration::from_secs(self.initial_delay_secs)
    }
}

/// Remote model settings.
///
/// ```toml
/// [model]
/// endpoint = "https://models.internal/invoke"
/// model_id = "anthropic.claude-3-sonnet-20240229-v1:0"
/// max_tokens = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct ModelConfig {
    /// URL the HTTP driver posts prompts to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[setters(strip_option, into)]
    endpoint: Option<String>,

    /// Environment variable holding an optional bearer API key
    #[serde(default = "default_api_key_env")]
    #[setters(into)]
    api_key_env: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    timeout_secs: u64,

    /// Model identifier
    #[serde(default = "default_model_id")]
    #[setters(into)]
    model_id: String,

    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f32,

    /// Nucleus sampling cutoff
    #[serde(default = "default_top_p")]
    top_p: f32,

    /// Template the user's message is wrapped in
    #[serde(default)]
    prompt_template: PromptTemplate,
}

fn default_api_key_env() -> String {
    "CHATGATE_MODEL_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_model_id() -> String {
    ModelParameters::default().model_id().clone()
}

fn default_max_tokens() -> u32 {
    *ModelParameters::default().max_tokens()
}

fn default_temperature() -> f32 {
    *ModelParameters::default().temperature()
}

fn default_top_p() -> f32 {
    *ModelParameters::default().top_p()
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            model_id: default_model_id(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            prompt_template: PromptTemplate::default(),
        }
    }
}

impl ModelConfig {
    /// Sampling parameters for every request.
    pub fn parameters(&self) -> ModelParameters {
        ModelParameters::default()
            .with_model_id(self.model_id.clone())
            .with_max_tokens(self.max_tokens)
            .with_temperature(self.temperature)
            .with_top_p(self.top_p)
    }

    /// Request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the template and sampling ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prompt_template.validate()?;
        if self.max_tokens == 0 {
            return Err(ConfigError::new("model.max_tokens must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ConfigError::new(format!(
                "model.top_p must be within [0, 1], got {}",
                self.top_p
            )));
        }
        if self.temperature < 0.0 {
            return Err(ConfigError::new(format!(
                "model.temperature must not be negative, got {}",
                self.temperature
            )));
        }
        Ok(())
    }
}
