//! Evaluator configuration.
//!
//! Values are resolved once at startup and passed into each stage; nothing
//! reads the environment after construction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{EvalError, EvalResult};

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_TRANSLATOR_MODEL: &str = "PIDGIN_EVAL_TRANSLATOR_MODEL";
pub const ENV_JUDGE_MODEL: &str = "PIDGIN_EVAL_JUDGE_MODEL";
pub const ENV_TIMEOUT: &str = "PIDGIN_EVAL_TIMEOUT";

/// Settings shared by both stages.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct EvaluatorConfig {
    /// API credential. Never read from a config file.
    #[serde(skip)]
    pub api_key: Option<String>,

    /// Base URL of the chat-completion API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model producing the candidate translation.
    #[serde(default = "default_translator_model")]
    pub translator_model: String,

    /// Stronger model scoring the translation.
    #[serde(default = "default_judge_model")]
    pub judge_model: String,

    /// Request timeout in seconds; transport default when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_translator_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_judge_model() -> String {
    "gpt-4o".to_string()
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            translator_model: default_translator_model(),
            judge_model: default_judge_model(),
            timeout_secs: None,
        }
    }
}

impl std::fmt::Debug for EvaluatorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("translator_model", &self.translator_model)
            .field("judge_model", &self.judge_model)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl EvaluatorConfig {
    /// Create config from environment variables.
    ///
    /// | Variable | Description |
    /// |----------|-------------|
    /// | `OPENAI_API_KEY` | API credential |
    /// | `OPENAI_BASE_URL` | API base URL |
    /// | `PIDGIN_EVAL_TRANSLATOR_MODEL` | Translator model |
    /// | `PIDGIN_EVAL_JUDGE_MODEL` | Judge model |
    /// | `PIDGIN_EVAL_TIMEOUT` | Request timeout in seconds |
    ///
    /// A timeout that is not a whole number of seconds is a
    /// [`EvalError::Config`].
    pub fn from_env() -> EvalResult<Self> {
        Self::default().merge_env()
    }

    /// Load a YAML config file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> EvalResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| EvalError::Config {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;
        serde_yaml::from_str(&content).map_err(|e| EvalError::Config {
            message: format!("failed to parse {}: {}", path.display(), e),
        })
    }

    /// Overlay any variables present in the environment.
    pub fn merge_env(mut self) -> EvalResult<Self> {
        if let Ok(v) = std::env::var(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Ok(v) = std::env::var(ENV_BASE_URL) {
            self.base_url = v;
        }
        if let Ok(v) = std::env::var(ENV_TRANSLATOR_MODEL) {
            self.translator_model = v;
        }
        if let Ok(v) = std::env::var(ENV_JUDGE_MODEL) {
            self.judge_model = v;
        }
        if let Ok(v) = std::env::var(ENV_TIMEOUT) {
            let secs = v.parse().map_err(|_| EvalError::Config {
                message: format!(
                    "{} must be a whole number of seconds, got '{}'",
                    ENV_TIMEOUT, v
                ),
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }

    /// Set the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_translator_model(mut self, model: impl Into<String>) -> Self {
        self.translator_model = model.into();
        self
    }

    pub fn with_judge_model(mut self, model: impl Into<String>) -> Self {
        self.judge_model = model.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Return the credential, failing if it is absent or blank.
    pub fn require_api_key(&self) -> EvalResult<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(EvalError::MissingCredential),
        }
    }

    /// Check every precondition that must hold before a network call.
    pub fn validate(&self) -> EvalResult<()> {
        self.require_api_key()?;
        if self.base_url.trim().is_empty() {
            return Err(EvalError::Config {
                message: "base_url must not be empty".to_string(),
            });
        }
        for (field, model) in [
            ("translator_model", &self.translator_model),
            ("judge_model", &self.judge_model),
        ] {
            if model.trim().is_empty() {
                return Err(EvalError::Config {
                    message: format!("{field} must not be empty"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const ALL_VARS: [&str; 5] = [
        ENV_API_KEY,
        ENV_BASE_URL,
        ENV_TRANSLATOR_MODEL,
        ENV_JUDGE_MODEL,
        ENV_TIMEOUT,
    ];

    fn clear_env() {
        for var in ALL_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn defaults_match_original_models() {
        let cfg = EvaluatorConfig::default();
        assert_eq!(cfg.translator_model, "gpt-4o-mini");
        assert_eq!(cfg.judge_model, "gpt-4o");
        assert_eq!(cfg.base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.timeout_secs, None);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn missing_or_blank_key_fails_validation() {
        let cfg = EvaluatorConfig::default();
        assert!(matches!(cfg.validate(), Err(EvalError::MissingCredential)));

        let cfg = EvaluatorConfig::default().with_api_key("   ");
        assert!(matches!(cfg.validate(), Err(EvalError::MissingCredential)));

        let cfg = EvaluatorConfig::default().with_api_key("sk-test");
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_model_is_a_config_error() {
        let cfg = EvaluatorConfig::default()
            .with_api_key("sk-test")
            .with_judge_model("");
        match cfg.validate() {
            Err(EvalError::Config { message }) => assert!(message.contains("judge_model")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn debug_output_redacts_key() {
        let cfg = EvaluatorConfig::default().with_api_key("sk-very-secret");
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("sk-very-secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    #[serial]
    fn from_env_reads_every_variable() {
        clear_env();
        std::env::set_var(ENV_API_KEY, "sk-env");
        std::env::set_var(ENV_BASE_URL, "http://localhost:9999/v1");
        std::env::set_var(ENV_TRANSLATOR_MODEL, "student");
        std::env::set_var(ENV_JUDGE_MODEL, "critic");
        std::env::set_var(ENV_TIMEOUT, "12");

        let cfg = EvaluatorConfig::from_env().unwrap();
        clear_env();

        assert_eq!(cfg.api_key.as_deref(), Some("sk-env"));
        assert_eq!(cfg.base_url, "http://localhost:9999/v1");
        assert_eq!(cfg.translator_model, "student");
        assert_eq!(cfg.judge_model, "critic");
        assert_eq!(cfg.timeout_secs, Some(12));
    }

    #[test]
    #[serial]
    fn unparsable_timeout_is_config_error() {
        clear_env();
        std::env::set_var(ENV_TIMEOUT, "soon");
        let err = EvaluatorConfig::from_env().unwrap_err();
        clear_env();
        match err {
            EvalError::Config { message } => {
                assert!(message.contains(ENV_TIMEOUT));
                assert!(message.contains("soon"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn file_fills_missing_fields_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "judge_model: gpt-4.1\ntimeout_secs: 30").unwrap();

        let cfg = EvaluatorConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.judge_model, "gpt-4.1");
        assert_eq!(cfg.timeout_secs, Some(30));
        assert_eq!(cfg.translator_model, "gpt-4o-mini");
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn file_never_supplies_api_key() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key: sk-from-file").unwrap();

        let cfg = EvaluatorConfig::from_file(file.path()).unwrap();
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn unreadable_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = EvaluatorConfig::from_file(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, EvalError::Config { .. }));
    }
}
