//! Error types for the evaluator and its provider clients.

use std::fmt;
use std::time::Duration;

/// Which half of the pipeline produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Translator,
    Judge,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Translator => "translator",
            Self::Judge => "judge",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failures talking to a chat-completion service.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Credential rejected (401/403).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Quota or rate limit hit (429).
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Any other non-success HTTP status.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Connection, TLS, timeout or body read failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// The service answered 2xx but the envelope had no message content.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

/// Result type for provider calls.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Evaluator errors, tagged with the stage that failed where one applies.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// No API key was supplied (or it was blank).
    #[error("API key is missing: set OPENAI_API_KEY or pass --api-key")]
    MissingCredential,

    /// The sentence to translate was empty.
    #[error("source text is empty")]
    EmptySource,

    /// The chat-completion call of a stage failed.
    #[error("{stage} stage failed: {source}")]
    Provider {
        stage: Stage,
        #[source]
        source: ProviderError,
    },

    /// The judge reply could not be turned into a verdict.
    #[error("{stage} stage returned a malformed response: {message}")]
    MalformedResponse {
        stage: Stage,
        message: String,
        raw: String,
    },

    /// Config file could not be read or parsed.
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl EvalError {
    /// The stage that failed, if the error happened inside one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::Provider { stage, .. } | Self::MalformedResponse { stage, .. } => Some(*stage),
            Self::MissingCredential | Self::EmptySource | Self::Config { .. } => None,
        }
    }

    /// True for errors raised before any network call was attempted.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::EmptySource | Self::Config { .. }
        )
    }

    pub(crate) fn provider(stage: Stage) -> impl FnOnce(ProviderError) -> Self {
        move |source| Self::Provider { stage, source }
    }
}

/// Result type for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
