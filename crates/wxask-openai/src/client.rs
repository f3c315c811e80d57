//! OpenAI chat completions client

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use wxask_core::{Error, GenerationOptions, LLMProvider, Result, truncate_body};

use crate::config::OpenAIConfig;

pub struct OpenAIClient {
    config: OpenAIConfig,
    client: Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    presence_penalty: Option<f64>,
}

impl OpenAIClient {
    /// Validate the configuration and build the HTTP client up front.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(Error::Configuration("api key must not be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl LLMProvider for OpenAIClient {
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Value> {
        let request = ChatCompletionRequest {
            model: &self.config.model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_p: options.top_p,
            frequency_penalty: options.frequency_penalty,
            presence_penalty: options.presence_penalty,
        };

        let url = format!("{}/chat/completions", self.config.base_url);
        debug!(%url, model = %self.config.model_id, "Calling OpenAI");

        let res = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Network(format!("Failed to complete request: {}", e)))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), body = %truncate_body(&body), "OpenAI request failed");
            return Err(Error::http(status.as_u16(), &body));
        }

        serde_json::from_str(&body)
            .map_err(|e| Error::Serialization(format!("Failed to parse OpenAI response: {}", e)))
    }

    fn model_id(&self) -> &str {
        &self.config.model_id
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{header, method, path},
    };

    use std::time::{Duration, Instant};

    fn create_client(server: &MockServer) -> OpenAIClient {
        let config = OpenAIConfig::new("sk-test").with_base_url(server.uri());
        OpenAIClient::new(config).expect("Failed to create client")
    }

    #[test]
    fn test_empty_key_fails_at_construction() {
        let result = OpenAIClient::new(OpenAIConfig::new(""));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn test_generate_sends_key_and_model() {
        let server = MockServer::start().await;
        let client = create_client(&server);

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "chatcmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Paris"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let options = GenerationOptions::default().with_temperature(0.2);
        let resp = client.generate("Capital of France?", &options).await.unwrap();
        assert_eq!(resp["choices"][0]["message"]["content"], "Paris");

        let requests = server.received_requests().await.unwrap();
        let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["messages"], json!([{"role": "user", "content": "Capital of France?"}]));
        assert_eq!(body["max_tokens"].as_u64(), Some(512));
        assert_eq!(body["temperature"].as_f64(), Some(0.2));
        assert!(body.get("top_p").is_none());
    }

    #[tokio::test]
    async fn test_slow_response_times_out_as_network_error() {
        let server = MockServer::start().await;
        let config = OpenAIConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_request_timeout(Duration::from_millis(200));
        let client = OpenAIClient::new(config).expect("Failed to create client");

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": [{"message": {"content": "late"}}]}))
                    .set_delay(Duration::from_secs(5)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let started = Instant::now();
        let result = client.generate("hi", &GenerationOptions::default()).await;

        assert!(matches!(result, Err(Error::Network(_))), "got {:?}", result);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_default_timeout_is_sixty_seconds() {
        assert_eq!(OpenAIConfig::new("sk-test").request_timeout, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_rate_limit_is_not_retried() {
        let server = MockServer::start().await;
        let client = create_client(&server);

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit reached"))
            .expect(1)
            .mount(&server)
            .await;

        let err = client.generate("hi", &GenerationOptions::default()).await.unwrap_err();
        assert_eq!(err.status(), Some(429));
    }
}
