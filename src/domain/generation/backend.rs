//! Generation backend trait

use std::fmt::Debug;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

#[cfg(test)]
use mockall::automock;

/// Sampling parameters for a single generation call
///
/// Supplied from configuration, never computed per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    pub model_id: String,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
    pub temperature: f32,
    /// Nucleus-sampling threshold
    pub top_p: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            model_id: "deepseek.r1-v1:0".to_string(),
            max_tokens: 512,
            temperature: 0.7,
            top_p: 1.0,
        }
    }
}

impl GenerationParams {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Default::default()
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }
}

/// Hosted text completion service: free-form prompt in, free-form text out
///
/// Failures (network, throttling, auth, quota, backend-reported errors) are
/// returned as [`DomainError::Generation`] carrying the backend's error code
/// and message. Implementations do not retry.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GenerationBackend: Send + Sync + Debug {
    /// Generate raw completion text for a prompt
    async fn generate(&self, params: &GenerationParams, prompt: &str)
        -> Result<String, DomainError>;

    /// Backend name for logs and metrics
    fn backend_name(&self) -> &'static str;
}
