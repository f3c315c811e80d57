//! IBM Cloud IAM API key exchange

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::debug;
use wxask_core::{Error, Result};

const GRANT_TYPE: &str = "urn:ibm:params:oauth:grant-type:apikey";
const RESPONSE_TYPE: &str = "cloud_iam";
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(10);

/// Bearer credential held by a client for its whole lifetime.
///
/// The expiry hint is kept for diagnostics only; nothing refreshes the token.
#[derive(Clone)]
pub struct AccessToken {
    value: String,
    expires_in: Option<u64>,
    obtained_at: Instant,
}

impl AccessToken {
    /// Use an unexchanged API key as the bearer value.
    pub fn raw(api_key: impl Into<String>) -> Self {
        Self {
            value: api_key.into(),
            expires_in: None,
            obtained_at: Instant::now(),
        }
    }

    pub fn secret(&self) -> &str {
        &self.value
    }

    pub fn expires_in(&self) -> Option<u64> {
        self.expires_in
    }

    pub fn is_expired(&self) -> bool {
        self.expires_in
            .is_some_and(|secs| self.obtained_at.elapsed() >= Duration::from_secs(secs))
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("len", &self.value.len())
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    grant_type: &'a str,
    apikey: &'a str,
    response_type: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
}

/// Exchanges IBM API keys for IAM access tokens
pub struct IamAuthenticator {
    client: Client,
    iam_url: String,
}

impl IamAuthenticator {
    pub fn new(client: Client, iam_url: impl Into<String>) -> Self {
        Self {
            client,
            iam_url: iam_url.into(),
        }
    }

    /// Perform a single exchange. Failures are returned as-is; there is no retry.
    pub async fn exchange(&self, api_key: &str) -> Result<AccessToken> {
        if api_key.is_empty() {
            return Err(Error::Configuration("api key must not be empty".to_string()));
        }

        let token_request = TokenRequest {
            grant_type: GRANT_TYPE,
            apikey: api_key,
            response_type: RESPONSE_TYPE,
        };

        debug!(url = %self.iam_url, "Requesting access token from IBM IAM");

        let response = self
            .client
            .post(&self.iam_url)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header("Accept", "application/json")
            .timeout(EXCHANGE_TIMEOUT)
            .form(&token_request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http(status.as_u16(), &body));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| Error::Serialization(e.to_string()))?;

        let value = token_response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Configuration("token exchange returned no token".to_string()))?;

        debug!(
            expires_in = token_response.expires_in.unwrap_or(0),
            length = value.len(),
            "Access token obtained"
        );

        Ok(AccessToken {
            value,
            expires_in: token_response.expires_in,
            obtained_at: Instant::now(),
        })
    }
}
