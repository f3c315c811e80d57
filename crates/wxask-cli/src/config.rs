//! Provider selection and startup configuration

use wxask_core::{Error, GenerationOptions, LLMProvider, Result};
use wxask_openai::{OpenAIClient, OpenAIConfig};
use wxask_watsonx::{WatsonxClient, WatsonxConfig, mask};

use std::env;

/// Which provider the session talks to, with its credentials
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    Watsonx(WatsonxConfig),
    OpenAI(OpenAIConfig),
}

/// Everything read from the environment at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub provider: ProviderConfig,
    pub options: GenerationOptions,
}

impl AppConfig {
    /// Load `.env` (overriding existing variables) and read the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv_override().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let provider_name = lookup("PROVIDER")
            .map(|p| p.trim().to_lowercase())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "watsonx".to_string());

        let provider = match provider_name.as_str() {
            "watsonx" => ProviderConfig::Watsonx(WatsonxConfig::from_lookup(&lookup)?),
            "openai" => ProviderConfig::OpenAI(OpenAIConfig::from_lookup(&lookup)?),
            other => {
                return Err(Error::Configuration(format!(
                    "Unknown PROVIDER '{}': expected 'watsonx' or 'openai'",
                    other
                )));
            }
        };

        let mut options = GenerationOptions::default();
        if let Some(raw) = lookup("MAX_TOKENS").filter(|v| !v.trim().is_empty()) {
            let max_tokens = raw.trim().parse::<u32>().map_err(|_| {
                Error::Configuration(format!("MAX_TOKENS must be a positive integer, got '{}'", raw))
            })?;
            options = options.with_max_tokens(max_tokens);
        }

        Ok(Self { provider, options })
    }

    pub fn provider_name(&self) -> &'static str {
        match self.provider {
            ProviderConfig::Watsonx(_) => "watsonx",
            ProviderConfig::OpenAI(_) => "openai",
        }
    }

    /// Startup summary with secrets hidden
    pub fn summary(&self) -> Vec<String> {
        let mut lines = vec![format!("PROVIDER={}", self.provider_name())];
        match &self.provider {
            ProviderConfig::Watsonx(cfg) => {
                lines.push(format!("WATSONX_BASE_URL={}", mask(&cfg.base_url)));
                lines.push("WATSONX_API_KEY=SET".to_string());
                lines.push(format!("WATSONX_PROJECT_ID={}", mask(&cfg.project_id)));
                lines.push(format!("MODEL={}", cfg.model_id));
                if cfg.use_api_key_direct {
                    lines.push("WATSONX_USE_APIKEY_DIRECT=true".to_string());
                }
            }
            ProviderConfig::OpenAI(cfg) => {
                lines.push("OPENAI_API_KEY=SET".to_string());
                lines.push(format!("MODEL={}", cfg.model_id));
            }
        }
        lines
    }
}

/// Build the configured client. For watsonx this performs the token exchange.
pub async fn build_provider(config: &AppConfig) -> Result<Box<dyn LLMProvider>> {
    match &config.provider {
        ProviderConfig::Watsonx(cfg) => Ok(Box::new(WatsonxClient::connect(cfg.clone()).await?)),
        ProviderConfig::OpenAI(cfg) => Ok(Box::new(OpenAIClient::new(cfg.clone())?)),
    }
}
