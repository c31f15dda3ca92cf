//! One chat request, end to end.

use crate::{ChatgateConfig, ValidationConfig};
use chatgate_auth::{AuthGate, Hs256Verifier};
use chatgate_cache::ResponseCache;
use chatgate_core::{ModelParameters, ModelRequest, Outcome, PromptTemplate};
use chatgate_error::{ChatgateResult, ModelError, ModelErrorKind};
use chatgate_models::{ModelDriver, RetryingInvoker};
use chatgate_rate_limit::{Admission, RateLimiter};
use std::future::Future;
use std::sync::Arc;
use tracing::{Span, debug, error, field, info, instrument, warn};

/// Where a request is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RequestStage {
    /// Request arrived
    Received,
    /// Verifying the credential
    Authenticating,
    /// Looking for a cached response
    CacheCheck,
    /// Asking the rate limiter for budget
    RateCheck,
    /// Calling the model (including backoff sleeps)
    Invoking,
    /// Building the outcome
    Responding,
}

/// Sequences authentication, validation, caching, rate limiting and model
/// invocation for every inbound chat message.
///
/// Shared state (cache and rate window) lives behind `Arc`s so several
/// orchestrators, or clones of one, can share a single budget.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    auth: AuthGate,
    cache: Arc<ResponseCache>,
    limiter: Arc<RateLimiter>,
    invoker: RetryingInvoker,
    template: PromptTemplate,
    parameters: ModelParameters,
    validation: ValidationConfig,
}

impl Orchestrator {
    /// Assemble an orchestrator with the default template, parameters and limits.
    pub fn new(
        auth: AuthGate,
        cache: Arc<ResponseCache>,
        limiter: Arc<RateLimiter>,
        invoker: RetryingInvoker,
    ) -> Self {
        Self {
            auth,
            cache,
            limiter,
            invoker,
            template: PromptTemplate::default(),
            parameters: ModelParameters::default(),
            validation: ValidationConfig::default(),
        }
    }

    /// Build every component from configuration.
    ///
    /// Reads the token secret from the environment variable named in `[auth]`.
    #[instrument(skip_all, fields(provider = driver.provider_name()))]
    pub fn from_config(
        config: &ChatgateConfig,
        driver: Arc<dyn ModelDriver>,
    ) -> ChatgateResult<Self> {
        config.validate()?;

        let auth = AuthGate::new(Hs256Verifier::from_config(config.auth())?);
        let cache = Arc::new(ResponseCache::new(config.cache().clone()));
        let limiter = Arc::new(RateLimiter::new(config.rate_limit())?);
        let invoker = RetryingInvoker::new(driver, config.retry().clone());

        info!("Orchestrator ready");
        Ok(Self::new(auth, cache, limiter, invoker)
            .with_template(config.model().prompt_template().clone())
            .with_parameters(config.model().parameters())
            .with_validation(config.validation().clone()))
    }

    /// Set the prompt template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Set the model parameters.
    pub fn with_parameters(mut self, parameters: ModelParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the message limits.
    pub fn with_validation(mut self, validation: ValidationConfig) -> Self {
        self.validation = validation;
        self
    }

    /// The shared response cache.
    pub fn cache(&self) -> &Arc<ResponseCache> {
        &self.cache
    }

    /// The shared rate limiter.
    pub fn limiter(&self) -> &Arc<RateLimiter> {
        &self.limiter
    }

    /// The retrying invoker.
    pub fn invoker(&self) -> &RetryingInvoker {
        &self.invoker
    }

    /// Handle one chat message.
    ///
    /// `credential` is the raw `Authorization` header value, if any.
    pub async fn submit(&self, credential: Option<&str>, message: &str) -> Outcome {
        self.submit_with_cancel(credential, message, std::future::pending())
            .await
    }

    /// Handle one chat message, giving up when `cancel` resolves.
    ///
    /// Cancellation is observed while the model is being called or during a
    /// backoff sleep. An admission already granted is not handed back.
    #[instrument(
        name = "chat_request",
        skip_all,
        fields(request_id = %uuid::Uuid::new_v4(), subject = field::Empty)
    )]
    pub async fn submit_with_cancel<F>(
        &self,
        credential: Option<&str>,
        message: &str,
        cancel: F,
    ) -> Outcome
    where
        F: Future<Output = ()>,
    {
        debug!(stage = %RequestStage::Received);
        if !self.authenticate(credential) {
            return Self::respond(Outcome::AuthRejected);
        }

        let message = match self.sanitize(message) {
            Ok(message) => message,
            Err(outcome) => return Self::respond(outcome),
        };

        self.answer(message, cancel).await
    }

    /// Handle a raw JSON body of the form `{"message": "..."}`.
    ///
    /// The body is not inspected until the credential is accepted.
    #[instrument(
        name = "chat_request",
        skip_all,
        fields(request_id = %uuid::Uuid::new_v4(), subject = field::Empty, body_len = body.len())
    )]
    pub async fn submit_payload(&self, credential: Option<&str>, body: &str) -> Outcome {
        debug!(stage = %RequestStage::Received);
        if !self.authenticate(credential) {
            return Self::respond(Outcome::AuthRejected);
        }

        let raw = match parse_payload(body) {
            Ok(raw) => raw,
            Err(outcome) => return Self::respond(outcome),
        };

        let message = match self.sanitize(&raw) {
            Ok(message) => message,
            Err(outcome) => return Self::respond(outcome),
        };

        self.answer(message, std::future::pending()).await
    }

    fn authenticate(&self, credential: Option<&str>) -> bool {
        debug!(stage = %RequestStage::Authenticating);
        match self.auth.authenticate(credential) {
            Ok(identity) => {
                Span::current().record("subject", identity.subject().as_str());
                true
            }
            Err(e) => {
                warn!(reason = %e.kind(), "Credential rejected");
                false
            }
        }
    }

    fn sanitize<'a>(&self, message: &'a str) -> Result<&'a str, Outcome> {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Err(Outcome::InvalidInput(
                "message must not be empty".to_string(),
            ));
        }

        let limit = *self.validation.max_message_chars();
        if trimmed.chars().count() > limit {
            return Err(Outcome::InvalidInput(format!(
                "message exceeds {} characters",
                limit
            )));
        }
        Ok(trimmed)
    }

    async fn answer<F>(&self, message: &str, cancel: F) -> Outcome
    where
        F: Future<Output = ()>,
    {
        debug!(stage = %RequestStage::CacheCheck, message_len = message.len());
        if let Some(cached) = self.cache.lookup(message) {
            info!(response_len = cached.len(), "Served from cache");
            return Self::respond(Outcome::Success(cached));
        }

        debug!(stage = %RequestStage::RateCheck);
        if let Admission::WaitFor(retry_after) = self.limiter.admit() {
            return Self::respond(Outcome::RateLimited { retry_after });
        }

        debug!(stage = %RequestStage::Invoking);
        let request = ModelRequest::new(self.template.render(message), self.parameters.clone());
        let result = tokio::select! {
            biased;
            _ = cancel => {
                return Self::respond(Outcome::Cancelled);
            }
            result = self.invoker.invoke(&request) => result,
        };

        let outcome = match result {
            Ok(text) => {
                self.cache.insert(message, text.clone());
                Outcome::Success(text)
            }
            Err(e) => outcome_for(&e),
        };
        Self::respond(outcome)
    }

    fn respond(outcome: Outcome) -> Outcome {
        debug!(stage = %RequestStage::Responding);
        let status = outcome.status();
        match &outcome {
            Outcome::Success(text) => {
                info!(status = status.code(), response_len = text.len(), "Request succeeded")
            }
            Outcome::RateLimited { .. } => warn!(
                status = status.code(),
                retry_after_secs = outcome.retry_after_secs(),
                "Request rate limited"
            ),
            Outcome::ProviderError(detail) => {
                error!(status = status.code(), detail = %detail, "Model call failed")
            }
            other => info!(status = status.code(), outcome = other.label(), "Request rejected"),
        }
        outcome
    }
}

fn outcome_for(error: &ModelError) -> Outcome {
    match error.kind() {
        ModelErrorKind::Throttled(_) => Outcome::ProviderThrottled,
        other => Outcome::ProviderError(other.to_string()),
    }
}

fn parse_payload(body: &str) -> Result<String, Outcome> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|_| Outcome::InvalidInput("request body is not valid JSON".to_string()))?;

    match value.get("message") {
        None | Some(serde_json::Value::Null) => Ok(String::new()),
        Some(serde_json::Value::String(message)) => Ok(message.clone()),
        Some(_) => Err(Outcome::InvalidInput(
            "message must be a string".to_string(),
        )),
    }
}
