//! Translator stage: English in, candidate Nigerian Pidgin out.

use std::sync::Arc;

use tracing::debug;

use crate::errors::{EvalError, EvalResult, Stage};
use crate::model::{ChatMessage, ChatRequest, TranslationRequest, TranslationResult};
use crate::providers::llm::LlmClient;

pub(crate) const TRANSLATOR_SYSTEM_PROMPT: &str = "You are a fluent speaker of Nigerian Pidgin. \
     Translate the user's input accurately, maintaining local Lagos context and slang.";

/// Produces the candidate translation.
#[derive(Clone)]
pub struct Translator {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl Translator {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn build_request(&self, request: &TranslationRequest) -> ChatRequest {
        ChatRequest::new(
            &self.model,
            vec![
                ChatMessage::system(TRANSLATOR_SYSTEM_PROMPT),
                ChatMessage::user(request.source_text()),
            ],
        )
    }

    /// One completion call. The reply text is returned exactly as received.
    pub async fn translate(&self, request: &TranslationRequest) -> EvalResult<TranslationResult> {
        debug!(
            stage = %Stage::Translator,
            provider = self.client.provider_name(),
            model = %self.model,
            "requesting translation"
        );
        let resp = self
            .client
            .complete(&self.build_request(request))
            .await
            .map_err(EvalError::provider(Stage::Translator))?;

        Ok(TranslationResult { text: resp.text })
    }
}
