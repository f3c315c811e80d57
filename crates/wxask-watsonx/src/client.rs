//! watsonx.ai chat client implementation

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use wxask_core::{Error, GenerationOptions, LLMProvider, Result, truncate_body};

use crate::auth::{AccessToken, IamAuthenticator};
use crate::config::WatsonxConfig;

const DEFAULT_TEMPERATURE: f64 = 0.7;
const DEFAULT_TOP_P: f64 = 1.0;
const DEFAULT_FREQUENCY_PENALTY: f64 = 0.0;
const DEFAULT_PRESENCE_PENALTY: f64 = 0.0;

/// watsonx.ai client bound to one project and one model
pub struct WatsonxClient {
    config: WatsonxConfig,
    access_token: AccessToken,
    client: Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model_id: &'a str,
    project_id: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f64,
    top_p: f64,
    frequency_penalty: f64,
    presence_penalty: f64,
}

impl WatsonxClient {
    /// Model constants
    pub const GRANITE_4_H_SMALL: &'static str = "ibm/granite-4-h-small";

    /// Create a client and acquire its access token.
    ///
    /// The token is exchanged exactly once, here, unless the configuration asks
    /// for direct-key mode.
    pub async fn connect(config: WatsonxConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;

        let access_token = if config.use_api_key_direct {
            if config.api_key.is_empty() {
                return Err(Error::Configuration("api key must not be empty".to_string()));
            }
            debug!("Using API key directly as bearer token");
            AccessToken::raw(config.api_key.clone())
        } else {
            IamAuthenticator::new(client.clone(), config.iam_url.clone())
                .exchange(&config.api_key)
                .await?
        };

        Ok(Self {
            config,
            access_token,
            client,
        })
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }

    fn build_request<'a>(&'a self, prompt: &'a str, options: &GenerationOptions) -> ChatRequest<'a> {
        ChatRequest {
            model_id: &self.config.model_id,
            project_id: &self.config.project_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: options.max_tokens,
            temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            top_p: options.top_p.unwrap_or(DEFAULT_TOP_P),
            frequency_penalty: options
                .frequency_penalty
                .unwrap_or(DEFAULT_FREQUENCY_PENALTY),
            presence_penalty: options.presence_penalty.unwrap_or(DEFAULT_PRESENCE_PENALTY),
        }
    }
}

#[async_trait]
impl LLMProvider for WatsonxClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Value> {
        if self.access_token.is_expired() {
            warn!("Access token has expired; reconnect the client to obtain a new one");
        }

        let url = self.config.inference_url();
        let request_body = self.build_request(prompt, options);

        debug!(%url, model = %self.config.model_id, "Calling watsonx.ai");

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.access_token.secret()))
            .header("Content-Type", "application/json")
            .header("Accept", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if status != reqwest::StatusCode::OK {
            warn!(
                status = status.as_u16(),
                body = %truncate_body(&body),
                "watsonx.ai request failed"
            );
            return Err(Error::http(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| Error::Serialization(e.to_string()))
    }

    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    fn provider_name(&self) -> &'static str {
        "watsonx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(config: WatsonxConfig) -> WatsonxClient {
        WatsonxClient {
            access_token: AccessToken::raw(config.api_key.clone()),
            client: Client::new(),
            config,
        }
    }

    #[test]
    fn test_request_defaults() {
        let client = client_for(WatsonxConfig::new("https://example.test", "k", "p", "m"));
        let body = serde_json::to_value(client.build_request("hi", &GenerationOptions::default())).unwrap();

        assert_eq!(body["model_id"], "m");
        assert_eq!(body["project_id"], "p");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hi");
        assert_eq!(body["max_tokens"].as_u64(), Some(512));
        assert_eq!(body["temperature"].as_f64(), Some(0.7));
        assert_eq!(body["top_p"].as_f64(), Some(1.0));
        assert_eq!(body["frequency_penalty"].as_f64(), Some(0.0));
        assert_eq!(body["presence_penalty"].as_f64(), Some(0.0));
    }

    #[test]
    fn test_request_overrides() {
        let client = client_for(WatsonxConfig::new("https://example.test", "k", "p", "m"));
        let options = GenerationOptions::default()
            .with_max_tokens(200)
            .with_temperature(0.1)
            .with_presence_penalty(0.5);
        let body = serde_json::to_value(client.build_request("hi", &options)).unwrap();

        assert_eq!(body["max_tokens"].as_u64(), Some(200));
        assert_eq!(body["temperature"].as_f64(), Some(0.1));
        assert_eq!(body["top_p"].as_f64(), Some(1.0));
        assert_eq!(body["presence_penalty"].as_f64(), Some(0.5));
    }
}
