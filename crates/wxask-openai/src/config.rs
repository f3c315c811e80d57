use wxask_core::{Error, Result};

use std::fmt;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the OpenAI client
#[derive(Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model_id: String,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_id: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_model(mut self, model_id: impl Into<String>) -> Self {
        self.model_id = model_id.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// `OPENAI_API_KEY` is required; the model comes from `OPENAI_MODEL`, then
    /// `MODEL`, then [`DEFAULT_MODEL`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = present("OPENAI_API_KEY").ok_or_else(|| {
            Error::Configuration("Missing environment variable: OPENAI_API_KEY".to_string())
        })?;

        let mut config = Self::new(api_key);
        if let Some(model) = present("OPENAI_MODEL").or_else(|| present("MODEL")) {
            config = config.with_model(model);
        }
        if let Some(base_url) = present("OPENAI_BASE_URL") {
            config = config.with_base_url(base_url);
        }

        Ok(config)
    }
}

impl fmt::Debug for OpenAIConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAIConfig")
            .field("api_key", &"SET")
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}
