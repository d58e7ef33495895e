use super::LlmClient;
use crate::errors::{ProviderError, ProviderResult};
use crate::model::{ChatRequest, LlmResponse};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted client for tests and offline runs.
///
/// Replies are handed out in order; once the script runs dry the fixed
/// response (if any) is repeated. Every request is recorded.
#[derive(Debug, Default)]
pub struct FakeClient {
    script: Mutex<VecDeque<ProviderResult<String>>>,
    fixed_response: Option<String>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply with `response` to every call not covered by the script.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.fixed_response = Some(response.into());
        self
    }

    /// Queue a reply.
    pub fn then_reply(self, response: impl Into<String>) -> Self {
        self.push(Ok(response.into()));
        self
    }

    /// Queue a failure.
    pub fn then_fail(self, error: ProviderError) -> Self {
        self.push(Err(error));
        self
    }

    fn push(&self, item: ProviderResult<String>) {
        self.script
            .lock()
            .expect("fake client mutex poisoned")
            .push_back(item);
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests
            .lock()
            .expect("fake client mutex poisoned")
            .clone()
    }
}

#[async_trait]
impl LlmClient for FakeClient {
    async fn complete(&self, request: &ChatRequest) -> ProviderResult<LlmResponse> {
        self.requests
            .lock()
            .expect("fake client mutex poisoned")
            .push(request.clone());

        let next = self
            .script
            .lock()
            .expect("fake client mutex poisoned")
            .pop_front();

        let text = match next {
            Some(item) => item?,
            None => self
                .fixed_response
                .clone()
                .ok_or_else(|| ProviderError::Network {
                    message: "fake client has no more scripted responses".to_string(),
                })?,
        };

        Ok(LlmResponse {
            text,
            provider: "fake".to_string(),
            model: request.model.clone(),
            meta: serde_json::json!({}),
        })
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}
