//! LLM provider trait and generation options

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Result;

/// `max_tokens` used when the caller does not ask for anything else.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Per-request generation parameters.
///
/// Only `max_tokens` always has a value. The remaining fields are overrides:
/// `None` means "use the provider client's default".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub max_tokens: u32,
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub presence_penalty: Option<f64>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            top_p: None,
            frequency_penalty: None,
            presence_penalty: None,
        }
    }
}

impl GenerationOptions {
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }
}

/// Trait for LLM providers (e.g., watsonx.ai, OpenAI)
///
/// One implementor instance talks to one provider with one model. `generate`
/// sends a single-turn prompt and hands back the provider's JSON body
/// untouched; use [`crate::extract_text`] to get the answer out of it.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Send `prompt` and return the raw response body
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Value>;

    /// Get the model ID being used
    fn model_id(&self) -> &str;

    /// Short provider name for display
    fn provider_name(&self) -> &'static str;
}
