//! watsonx.ai configuration

use url::Url;
use wxask_core::{Error, Result};

use std::fmt;
use std::time::Duration;

pub const DEFAULT_IAM_URL: &str = "https://iam.cloud.ibm.com/identity/token";
pub const DEFAULT_INFERENCE_PATH: &str = "/ml/v1/text/chat?version=2023-05-29";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Configuration for the watsonx.ai client
#[derive(Clone)]
pub struct WatsonxConfig {
    pub api_key: String,
    pub project_id: String,
    pub base_url: String,
    pub model_id: String,
    /// Token endpoint used for the API key exchange
    pub iam_url: String,
    /// Path appended to `base_url` for generation calls
    pub inference_path: String,
    /// Send the API key itself as the bearer value instead of exchanging it
    pub use_api_key_direct: bool,
    /// Upper bound on a whole generation call
    pub request_timeout: Duration,
}

impl WatsonxConfig {
    /// Create configuration with explicit values
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        project_id: impl Into<String>,
        model_id: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            project_id: project_id.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model_id: model_id.into(),
            iam_url: DEFAULT_IAM_URL.to_string(),
            inference_path: DEFAULT_INFERENCE_PATH.to_string(),
            use_api_key_direct: false,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn with_iam_url(mut self, iam_url: impl Into<String>) -> Self {
        self.iam_url = iam_url.into();
        self
    }

    pub fn with_inference_path(mut self, path: impl Into<String>) -> Self {
        self.inference_path = path.into();
        self
    }

    pub fn with_api_key_direct(mut self, direct: bool) -> Self {
        self.use_api_key_direct = direct;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Create configuration from any variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::Configuration(format!("Missing environment variable: {}", name)))
        };

        let base_url = required("WATSONX_BASE_URL")?;
        let api_key = required("WATSONX_API_KEY")?;
        let project_id = required("WATSONX_PROJECT_ID")?;
        let model_id = required("MODEL")?;

        Url::parse(&base_url).map_err(|e| {
            Error::Configuration(format!("WATSONX_BASE_URL is not a valid URL ({}): {}", base_url, e))
        })?;

        let mut config = Self::new(base_url, api_key, project_id, model_id);

        if let Some(iam_url) = lookup("WATSONX_IAM_URL").filter(|v| !v.is_empty()) {
            config.iam_url = iam_url;
        }
        if let Some(path) = lookup("INFER_PATH").filter(|v| !v.is_empty()) {
            config.inference_path = path;
        }
        config.use_api_key_direct = lookup("WATSONX_USE_APIKEY_DIRECT")
            .map(|v| is_truthy(&v))
            .unwrap_or(false);

        Ok(config)
    }

    /// Full URL of the generation endpoint
    pub fn inference_url(&self) -> String {
        let path = self.inference_path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }
}

impl fmt::Debug for WatsonxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatsonxConfig")
            .field("api_key", &"SET")
            .field("project_id", &mask(&self.project_id))
            .field("base_url", &self.base_url)
            .field("model_id", &self.model_id)
            .field("iam_url", &self.iam_url)
            .field("inference_path", &self.inference_path)
            .field("use_api_key_direct", &self.use_api_key_direct)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes")
}

/// Show the first and last six characters of longer identifiers.
pub fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() > 12 {
        let head: String = chars[..6].iter().collect();
        let tail: String = chars[chars.len() - 6..].iter().collect();
        format!("{}...{}", head, tail)
    } else {
        value.to_string()
    }
}
