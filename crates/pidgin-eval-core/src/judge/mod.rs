//! Judge stage: scores a candidate translation against the rubric.
//!
//! - prompt.rs: persona, rubric and output contract text
//! - client.rs: reply parsing into a verdict

mod client;
mod prompt;


use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{EvalError, EvalResult, Stage};
use crate::model::{ChatMessage, ChatRequest, EvaluationVerdict, ResponseFormat};
use crate::providers::llm::LlmClient;

/// Scores translations with a (typically stronger) model in JSON mode.
#[derive(Clone)]
pub struct Judge {
    client: Arc<dyn LlmClient>,
    model: String,
}

impl Judge {
    pub fn new(client: Arc<dyn LlmClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn build_request(&self, original: &str, translation: &str) -> ChatRequest {
        ChatRequest::new(
            &self.model,
            vec![ChatMessage::user(prompt::build_prompt(original, translation))],
        )
        .with_response_format(ResponseFormat::JsonObject)
    }

    /// One JSON-mode completion call, then an explicit conversion of the
    /// reply into a verdict. The score is passed through unclamped.
    pub async fn evaluate(
        &self,
        original: &str,
        translation: &str,
    ) -> EvalResult<EvaluationVerdict> {
        debug!(
            stage = %Stage::Judge,
            provider = self.client.provider_name(),
            model = %self.model,
            "requesting verdict"
        );
        let resp = self
            .client
            .complete(&self.build_request(original, translation))
            .await
            .map_err(EvalError::provider(Stage::Judge))?;

        let verdict = client::parse_verdict(&resp.text)?;
        if !verdict.score.in_rubric_range() {
            warn!(score = %verdict.score, "judge score outside the 1-5 rubric range");
        }
        Ok(verdict)
    }
}
