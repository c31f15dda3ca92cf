//! Scripted model driver.

use async_trait::async_trait;
use chatgate::{ModelDriver, ModelError, ModelErrorKind, ModelRequest};
use std::collections::VecDeque;
use std::sync::Mutex;

type Reply = Result<String, ModelError>;

/// Replays scripted results, then a fallback; records every prompt.
pub struct ScriptedDriver {
    script: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    prompts: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl ScriptedDriver {
    pub fn new(script: Vec<Reply>, fallback: Reply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Always answers `text`.
    pub fn answering(text: &str) -> Self {
        Self::new(Vec::new(), Ok(text.to_string()))
    }

    /// Always fails with `kind`.
    pub fn failing(kind: ModelErrorKind) -> Self {
        Self::new(Vec::new(), Err(ModelError::new(kind)))
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[allow(dead_code)]
pub fn throttled() -> ModelError {
    ModelError::new(ModelErrorKind::Throttled(
        "ThrottlingException: rate exceeded".to_string(),
    ))
}

#[async_trait]
impl ModelDriver for ScriptedDriver {
    async fn invoke(&self, request: &ModelRequest) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(request.prompt().clone());
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

/// Never answers.
#[allow(dead_code)]
pub struct HangingDriver;

#[async_trait]
impl ModelDriver for HangingDriver {
    async fn invoke(&self, _request: &ModelRequest) -> Result<String, ModelError> {
        std::future::pending().await
    }

    fn provider_name(&self) -> &'static str {
        "hanging"
    }

    fn model_name(&self) -> &str {
        "hanging-model"
    }
}
