//! A model driver that replays a fixed script of results.

use async_trait::async_trait;
use chatgate_core::ModelRequest;
use chatgate_error::{ModelError, ModelErrorKind, ModelResult};
use chatgate_models::ModelDriver;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::time::Instant;

/// Replays scripted results; once the script runs out, repeats the fallback.
pub struct ScriptedDriver {
    script: Mutex<VecDeque<ModelResult<String>>>,
    fallback: ModelResult<String>,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedDriver {
    pub fn new(script: Vec<ModelResult<String>>, fallback: ModelResult<String>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always throttles.
    pub fn always_throttled() -> Self {
        Self::new(Vec::new(), Err(throttled()))
    }

    /// Instants at which `invoke` was called.
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

/// A throttling error as the provider reports it.
pub fn throttled() -> ModelError {
    ModelError::new(ModelErrorKind::Throttled(
        "ThrottlingException: rate exceeded".to_string(),
    ))
}

#[async_trait]
impl ModelDriver for ScriptedDriver {
    async fn invoke(&self, _request: &ModelRequest) -> ModelResult<String> {
        self.calls.lock().unwrap().push(Instant::now());
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}
