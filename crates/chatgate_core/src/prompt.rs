//! Prompt template applied to every user message.

use chatgate_error::ConfigError;
use serde::{Deserialize, Serialize};

/// Placeholder replaced by the user's message.
pub const MESSAGE_SLOT: &str = "{message}";

const DEFAULT_TEMPLATE: &str = "You are a friendly and helpful virtual assistant.\n\
Reply to the following message concisely and usefully: {message}";

/// Wraps a user message into the prompt sent to the model.
///
/// # Examples
///
/// ```
/// use chatgate_core::PromptTemplate;
///
/// let template = PromptTemplate::new("Q: {message}\nA:").unwrap();
/// assert_eq!(template.render("Hello"), "Q: Hello\nA:");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    /// Create a template, rejecting one without a `{message}` slot.
    pub fn new(template: impl Into<String>) -> Result<Self, ConfigError> {
        let template = Self(template.into());
        template.validate()?;
        Ok(template)
    }

    /// Template that forwards the message unchanged.
    pub fn passthrough() -> Self {
        Self(MESSAGE_SLOT.to_string())
    }

    /// Check the template contains the message slot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0.contains(MESSAGE_SLOT) {
            Ok(())
        } else {
            Err(ConfigError::new(format!(
                "prompt template must contain {}",
                MESSAGE_SLOT
            )))
        }
    }

    /// Substitute the message into every slot.
    pub fn render(&self, message: &str) -> String {
        self.0.replace(MESSAGE_SLOT, message)
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self(DEFAULT_TEMPLATE.to_string())
    }
}
