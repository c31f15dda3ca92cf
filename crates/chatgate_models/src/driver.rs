//! Trait definition for remote model backends.

use async_trait::async_trait;
use chatgate_core::ModelRequest;
use chatgate_error::ModelResult;

/// A remote generative-text service.
///
/// Implementations make exactly one call per `invoke` and report throttling
/// as [`ModelErrorKind::Throttled`](chatgate_error::ModelErrorKind::Throttled)
/// so the invoker can tell it apart from other failures.
#[async_trait]
pub trait ModelDriver: Send + Sync {
    /// Generate text for one prompt.
    async fn invoke(&self, request: &ModelRequest) -> ModelResult<String>;

    /// Provider name (e.g., "http", "bedrock").
    fn provider_name(&self) -> &'static str;

    /// Default model identifier.
    fn model_name(&self) -> &str;
}
