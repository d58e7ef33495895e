use super::LlmClient;
use crate::errors::{ProviderError, ProviderResult};
use crate::model::{ChatRequest, LlmResponse};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, RETRY_AFTER, USER_AGENT};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

/// User agent for chat-completion requests.
const USER_AGENT_VALUE: &str = concat!("pidgin-eval/", env!("CARGO_PKG_VERSION"));

/// Client for the OpenAI chat-completions API (and compatible servers).
#[derive(Clone)]
pub struct OpenAIClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl std::fmt::Debug for OpenAIClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAIClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl OpenAIClient {
    /// Build a client. `timeout` of `None` keeps reqwest's default.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Option<Duration>,
    ) -> ProviderResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let mut builder = reqwest::Client::builder().default_headers(default_headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ProviderError::Network {
            message: format!("failed to create HTTP client: {}", e),
        })?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            api_key: api_key.into(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn check_status(response: reqwest::Response) -> ProviderResult<reqwest::Response> {
        let status = response.status();
        match status.as_u16() {
            200..=299 => Ok(response),

            401 | 403 => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(ProviderError::Unauthorized {
                    message: error_message(&message),
                })
            }

            429 => {
                let retry_after = response
                    .headers()
                    .get(RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .map(Duration::from_secs);

                Err(ProviderError::RateLimited { retry_after })
            }

            code => {
                let message = response.text().await.unwrap_or_else(|_| status.to_string());
                Err(ProviderError::Api {
                    status: code,
                    message: error_message(&message),
                })
            }
        }
    }
}

/// Pull `error.message` out of an OpenAI error body, else return it as is.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.chars().take(500).collect())
}

#[async_trait]
impl LlmClient for OpenAIClient {
    async fn complete(&self, request: &ChatRequest) -> ProviderResult<LlmResponse> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(
            url = %url,
            model = %request.model,
            json_mode = request.response_format.is_some(),
            "sending chat completion"
        );

        let response = self
            .client
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(request)
            .send()
            .await?;

        let response = match Self::check_status(response).await {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, model = %request.model, "chat completion failed");
                return Err(e);
            }
        };

        let json: serde_json::Value = response.json().await.map_err(|e| {
            ProviderError::InvalidResponse {
                message: format!("failed to parse completion envelope: {}", e),
            }
        })?;

        // Parse choices[0].message.content
        let text = json
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ProviderError::InvalidResponse {
                message: "response missing choices[0].message.content".to_string(),
            })?
            .to_string();

        let model = json
            .get("model")
            .and_then(|v| v.as_str())
            .unwrap_or(request.model.as_str())
            .to_string();

        Ok(LlmResponse {
            text,
            provider: "openai".to_string(),
            model,
            meta: json!({ "usage": json.get("usage").cloned().unwrap_or_default() }),
        })
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
