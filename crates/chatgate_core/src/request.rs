//! Outbound model request types.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Sampling parameters sent with every prompt.
///
/// # Examples
///
/// ```
/// use chatgate_core::ModelParameters;
///
/// let params = ModelParameters::default().with_max_tokens(100u32);
/// assert_eq!(*params.max_tokens(), 100);
/// assert_eq!(*params.top_p(), 0.9);
/// ```
#[derive(
    Debug,
    Clone,
    PartialEq,
    Serialize,
    Deserialize,
    Getters,
    derive_setters::Setters,
    derive_builder::Builder,
)]
#[setters(prefix = "with_")]
#[builder(default)]
pub struct ModelParameters {
    /// Model identifier understood by the provider
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
}

fn default_model_id() -> String {
    "anthropic.claude-3-sonnet-20240229-v1:0".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
        }
    }
}

/// A rendered prompt plus the parameters to generate it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct ModelRequest {
    prompt: String,
    parameters: ModelParameters,
}

impl ModelRequest {
    /// Create a request.
    pub fn new(prompt: impl Into<String>, parameters: ModelParameters) -> Self {
        Self {
            prompt: prompt.into(),
            parameters,
        }
    }
}
