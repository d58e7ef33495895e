pub mod fake;
pub mod openai;

use crate::errors::ProviderResult;
use crate::model::{ChatRequest, LlmResponse};
use async_trait::async_trait;

/// A chat-completion backend. One call per request; no retry.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> ProviderResult<LlmResponse>;

    fn provider_name(&self) -> &'static str;
}
