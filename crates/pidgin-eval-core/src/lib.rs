//! LLM-as-judge evaluation of English to Nigerian Pidgin translations.
//!
//! A run has two sequential stages:
//!
//! - **Translator**: a chat model translates the source sentence.
//! - **Judge**: a stronger model scores the translation against a fixed
//!   rubric (lexical accuracy, tone, grammar) in JSON mode, and the reply
//!   is converted into an [`EvaluationVerdict`].
//!
//! ```no_run
//! use pidgin_eval_core::{EvaluatorConfig, Evaluator};
//!
//! # async fn example() -> Result<(), pidgin_eval_core::EvalError> {
//! let config = EvaluatorConfig::from_env()?;
//! let evaluator = Evaluator::new(&config)?;
//! let report = evaluator
//!     .run("I was very surprised by what happened yesterday.")
//!     .await?;
//! println!("Score: {}/5", report.verdict.score);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod judge;
pub mod model;
pub mod pipeline;
pub mod providers;
pub mod report;
pub mod translator;

pub use config::EvaluatorConfig;
pub use errors::{EvalError, EvalResult, ProviderError, ProviderResult, Stage};
pub use judge::Judge;
pub use model::{
    EvaluationReport, EvaluationVerdict, Score, TranslationRequest, TranslationResult,
};
pub use pipeline::Evaluator;
pub use translator::Translator;
