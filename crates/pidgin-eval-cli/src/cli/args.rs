use clap::{Parser, ValueEnum};
use pidgin_eval_core::config::{
    ENV_API_KEY, ENV_BASE_URL, ENV_JUDGE_MODEL, ENV_TIMEOUT, ENV_TRANSLATOR_MODEL,
};
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "I was very surprised by what happened yesterday.";

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Command line of the binary.
///
/// Environment fallbacks are resolved here by clap, using the same variable
/// names as [`pidgin_eval_core::EvaluatorConfig::from_env`]. The binary never
/// calls `from_env`, so a malformed value is a usage error (exit 2).
#[derive(Parser, Debug)]
#[command(
    name = "pidgin-eval",
    version,
    about = "Translate English into Nigerian Pidgin and grade the result with an LLM judge"
)]
pub struct Cli {
    /// English sentence to translate
    #[arg(default_value = DEFAULT_INPUT)]
    pub text: String,

    /// API key (falls back to OPENAI_API_KEY)
    #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Chat-completion API base URL
    /// Default: https://api.openai.com/v1
    #[arg(long, env = ENV_BASE_URL)]
    pub base_url: Option<String>,

    /// Model producing the translation
    /// Default: gpt-4o-mini
    #[arg(long, env = ENV_TRANSLATOR_MODEL)]
    pub translator_model: Option<String>,

    /// Model grading the translation
    /// Default: gpt-4o
    #[arg(long, env = ENV_JUDGE_MODEL)]
    pub judge_model: Option<String>,

    /// Request timeout in seconds (transport default when unset)
    #[arg(long, env = ENV_TIMEOUT)]
    pub timeout: Option<u64>,

    /// YAML config file (models, base_url, timeout_secs)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Log request details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
