//! JSON-over-HTTP model driver.

use crate::{ModelConfig, ModelDriver};
use async_trait::async_trait;
use chatgate_core::ModelRequest;
use chatgate_error::{ModelError, ModelErrorKind, ModelResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

/// Marker the provider puts in throttling error bodies.
const THROTTLING_MARKER: &str = "ThrottlingException";

/// Request body posted to the model endpoint.
#[derive(Debug, Serialize)]
struct InvokeBody<'a> {
    model: &'a str,
    prompt: &'a str,
    max_tokens: u32,
    temperature: f32,
    top_p: f32,
}

/// Accepts both completion-style and messages-style responses.
#[derive(Debug, Default, Deserialize)]
struct InvokeResponse {
    #[serde(default)]
    completion: Option<String>,
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

impl InvokeResponse {
    fn into_text(self) -> Option<String> {
        self.completion
            .or_else(|| self.content.into_iter().find_map(|block| block.text))
            .filter(|text| !text.is_empty())
    }
}

/// Classify a non-success response.
///
/// HTTP 429, or any body naming a `ThrottlingException`, is throttling.
///
/// # Examples
///
/// ```
/// use chatgate_models::classify_failure;
/// use chatgate_error::ModelErrorKind;
///
/// assert!(matches!(classify_failure(429, ""), ModelErrorKind::Throttled(_)));
/// assert!(matches!(
///     classify_failure(400, r#"{"__type":"ThrottlingException"}"#),
///     ModelErrorKind::Throttled(_)
/// ));
/// assert!(matches!(classify_failure(500, "boom"), ModelErrorKind::Http { .. }));
/// ```
pub fn classify_failure(status_code: u16, body: &str) -> ModelErrorKind {
    if status_code == 429 || body.contains(THROTTLING_MARKER) {
        let detail = if body.is_empty() {
            format!("HTTP {status_code}")
        } else {
            body.to_string()
        };
        ModelErrorKind::Throttled(detail)
    } else {
        ModelErrorKind::Http {
            status_code,
            message: body.to_string(),
        }
    }
}

/// Posts prompts as JSON to a configured endpoint.
///
/// The response may carry either a top-level `completion` string or a
/// `content` array whose first text block is the answer.
#[derive(Clone)]
pub struct HttpModelDriver {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl HttpModelDriver {
    /// Create a driver from explicit parts.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        model: impl Into<String>,
    ) -> Self {
        debug!("Creating new HTTP model driver");
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
            api_key,
            model: model.into(),
        }
    }

    /// Create a driver from configuration.
    ///
    /// The API key is read from `api_key_env` and is optional.
    pub fn from_config(config: &ModelConfig) -> ModelResult<Self> {
        let endpoint = config.endpoint().clone().ok_or_else(|| {
            ModelError::new(ModelErrorKind::Configuration(
                "model.endpoint is not set".to_string(),
            ))
        })?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                ModelError::new(ModelErrorKind::Configuration(format!(
                    "Failed to build HTTP client: {e}"
                )))
            })?;

        let api_key = std::env::var(config.api_key_env()).ok();
        if api_key.is_none() {
            debug!(env = %config.api_key_env(), "No model API key set, sending unauthenticated requests");
        }

        Ok(Self {
            client,
            endpoint,
            api_key,
            model: config.model_id().clone(),
        })
    }

    /// Endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ModelDriver for HttpModelDriver {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint, model = %request.parameters().model_id()))]
    async fn invoke(&self, request: &ModelRequest) -> ModelResult<String> {
        let parameters = request.parameters();
        let body = InvokeBody {
            model: parameters.model_id(),
            prompt: request.prompt(),
            max_tokens: *parameters.max_tokens(),
            temperature: *parameters.temperature(),
            top_p: *parameters.top_p(),
        };

        debug!("Sending request to model endpoint");
        let mut builder = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = ?e, "Failed to send request to model endpoint");
            ModelError::new(ModelErrorKind::Transport(e.to_string()))
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            error!(error = ?e, "Failed to read model response body");
            ModelError::new(ModelErrorKind::Transport(e.to_string()))
        })?;

        if !status.is_success() {
            let kind = classify_failure(status.as_u16(), &text);
            match &kind {
                ModelErrorKind::Throttled(_) => warn!(status = %status, "Model endpoint throttled"),
                _ => error!(status = %status, body = %text, "Model endpoint returned error"),
            }
            return Err(ModelError::new(kind));
        }

        let parsed: InvokeResponse = serde_json::from_str(&text).map_err(|e| {
            error!(error = ?e, "Failed to parse model response");
            ModelError::new(ModelErrorKind::InvalidResponse(format!(
                "Failed to parse response: {e}"
            )))
        })?;

        let generated = parsed.into_text().ok_or_else(|| {
            ModelError::new(ModelErrorKind::InvalidResponse(
                "Response contained no generated text".to_string(),
            ))
        })?;

        debug!(response_len = generated.len(), "Received model response");
        Ok(generated)
    }

    fn provider_name(&self) -> &'static str {
        "http"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for HttpModelDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpModelDriver")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .finish()
    }
}
