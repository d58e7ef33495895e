use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, EvalResult};

/// Lowest and highest score the rubric asks for.
pub const RUBRIC_MIN_SCORE: i64 = 1;
pub const RUBRIC_MAX_SCORE: i64 = 5;

/// A sentence to translate. Construction rejects empty input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    source_text: String,
}

impl TranslationRequest {
    pub fn new(source_text: impl Into<String>) -> EvalResult<Self> {
        let source_text = source_text.into();
        if source_text.trim().is_empty() {
            return Err(EvalError::EmptySource);
        }
        Ok(Self { source_text })
    }

    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}

/// Raw translator output, unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    pub text: String,
}

/// The judge's score, kept as the JSON value it sent.
///
/// Nothing is validated: out-of-range, fractional, quoted and `null` scores
/// all pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(serde_json::Value);

impl Score {
    pub fn as_i64(&self) -> Option<i64> {
        self.0.as_i64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.0.as_f64()
    }

    pub fn as_value(&self) -> &serde_json::Value {
        &self.0
    }

    /// Whether the score is a JSON integer within 1..=5. Quoted numbers do
    /// not count.
    pub fn in_rubric_range(&self) -> bool {
        self.as_i64()
            .is_some_and(|s| (RUBRIC_MIN_SCORE..=RUBRIC_MAX_SCORE).contains(&s))
    }
}

impl From<i64> for Score {
    fn from(value: i64) -> Self {
        Self(value.into())
    }
}

impl From<serde_json::Value> for Score {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Strings print without quotes; everything else prints as JSON.
impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => f.write_str(s),
            other => fmt::Display::fmt(other, f),
        }
    }
}

/// Structured judge result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationVerdict {
    pub score: Score,
    pub reasoning: String,
}

impl EvaluationVerdict {
    pub fn new(score: i64, reasoning: impl Into<String>) -> Self {
        Self {
            score: Score::from(score),
            reasoning: reasoning.into(),
        }
    }
}

/// Everything one successful run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub input: String,
    pub translation: String,
    pub verdict: EvaluationVerdict,
}

/// Chat message author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// `response_format` of a chat-completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    Text,
    JsonObject,
}

/// One chat-completion call as sent on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            response_format: None,
        }
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = Some(format);
        self
    }
}

/// Text reply of a chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub meta: serde_json::Value,
}
