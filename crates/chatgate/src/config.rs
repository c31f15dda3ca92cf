//! Layered configuration.
//!
//! Sources, later overriding earlier:
//! - Bundled defaults (include_str! from chatgate.toml)
//! - `~/.config/chatgate/chatgate.toml`
//! - `./chatgate.toml`

use chatgate_auth::AuthConfig;
use chatgate_cache::CacheConfig;
use chatgate_error::{ChatgateError, ChatgateResult, ConfigError};
use chatgate_models::{ModelConfig, RetryConfig};
use chatgate_rate_limit::RateLimitConfig;
use config::{Config, File, FileFormat};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../chatgate.toml");

/// Limits on inbound message content.
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
pub struct ValidationConfig {
    /// Longest accepted message, in characters, after trimming
    #[serde(default = "default_max_message_chars")]
    max_message_chars: usize,
}

fn default_max_message_chars() -> usize {
    4000
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_message_chars: default_max_message_chars(),
        }
    }
}

impl ValidationConfig {
    /// Reject a zero length limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_message_chars == 0 {
            return Err(ConfigError::new(
                "validation.max_message_chars must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Top-level chatgate configuration.
///
/// # Example
///
/// ```no_run
/// use chatgate::ChatgateConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ChatgateConfig::load()?;
/// println!("limit per window: {}", config.rate_limit().limit());
/// # Ok(())
/// # }
/// ```
#[derive(
    Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters, derive_setters::Setters,
)]
#[setters(prefix = "with_")]
pub struct ChatgateConfig {
    /// Credential verification
    #[serde(default)]
    auth: AuthConfig,

    /// Outbound request budget
    #[serde(default)]
    rate_limit: RateLimitConfig,

    /// Throttling retry policy
    #[serde(default)]
    retry: RetryConfig,

    /// Response cache
    #[serde(default)]
    cache: CacheConfig,

    /// Remote model
    #[serde(default)]
    model: ModelConfig,

    /// Message limits
    #[serde(default)]
    validation: ValidationConfig,
}

impl ChatgateConfig {
    /// Load configuration with precedence: current dir > home dir > bundled defaults.
    ///
    /// User config files are optional and skipped if not found.
    #[instrument]
    pub fn load() -> ChatgateResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/chatgate/chatgate.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("chatgate").required(false));

        Self::finish(builder)
    }

    /// Load one explicit file layered over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> ChatgateResult<Self> {
        debug!("Loading configuration from file");

        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path.as_ref()));

        Self::finish(builder)
    }

    /// Parse TOML text layered over the bundled defaults.
    pub fn from_toml_str(text: &str) -> ChatgateResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(text, FileFormat::Toml));

        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> ChatgateResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                ChatgateError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                ChatgateError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rate_limit.validate()?;
        self.model.validate()?;
        self.validation.validate()?;
        Ok(())
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize configuration: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_defaults_parse() {
        let config = ChatgateConfig::from_toml_str("").unwrap();
        assert_eq!(*config.rate_limit().limit(), 1);
        assert_eq!(*config.rate_limit().window_secs(), 10);
        assert_eq!(*config.retry().max_retries(), 3);
        assert_eq!(*config.cache().max_size(), 100);
        assert_eq!(*config.validation().max_message_chars(), 4000);
    }

    #[test]
    fn bundled_defaults_match_struct_defaults() {
        let bundled = ChatgateConfig::from_toml_str("").unwrap();
        assert_eq!(bundled, ChatgateConfig::default());
    }
}
