//! Generate-then-judge pipeline.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::config::EvaluatorConfig;
use crate::errors::{EvalError, EvalResult};
use crate::judge::Judge;
use crate::model::{EvaluationReport, EvaluationVerdict, TranslationRequest, TranslationResult};
use crate::providers::llm::openai::OpenAIClient;
use crate::providers::llm::LlmClient;
use crate::translator::Translator;

/// Runs the translator stage, then the judge stage on its output.
#[derive(Clone)]
pub struct Evaluator {
    translator: Translator,
    judge: Judge,
}

impl Evaluator {
    /// Build an evaluator backed by the OpenAI API.
    ///
    /// Fails with [`EvalError::MissingCredential`] before any client is
    /// created when the API key is absent or blank.
    pub fn new(config: &EvaluatorConfig) -> EvalResult<Self> {
        config.validate()?;
        let api_key = config.require_api_key()?;

        let client = OpenAIClient::new(
            &config.base_url,
            api_key,
            config.timeout_secs.map(Duration::from_secs),
        )
        .map_err(|e| EvalError::Config {
            message: e.to_string(),
        })?;
        let client: Arc<dyn LlmClient> = Arc::new(client);

        Ok(Self::from_stages(
            Translator::new(client.clone(), &config.translator_model),
            Judge::new(client, &config.judge_model),
        ))
    }

    pub fn from_stages(translator: Translator, judge: Judge) -> Self {
        Self { translator, judge }
    }

    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn judge(&self) -> &Judge {
        &self.judge
    }

    /// Translator stage only.
    pub async fn translate(&self, source: &str) -> EvalResult<TranslationResult> {
        let request = TranslationRequest::new(source)?;
        self.translator.translate(&request).await
    }

    /// Judge stage only.
    pub async fn score(&self, original: &str, translation: &str) -> EvalResult<EvaluationVerdict> {
        self.judge.evaluate(original, translation).await
    }

    /// Both stages in sequence. A judge failure discards the translation.
    pub async fn run(&self, source: &str) -> EvalResult<EvaluationReport> {
        let translation = self.translate(source).await?;
        let verdict = self.score(source, &translation.text).await?;
        info!(score = %verdict.score, "evaluation complete");

        Ok(EvaluationReport {
            input: source.to_string(),
            translation: translation.text,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Stage;
    use crate::providers::llm::fake::FakeClient;

    const INPUT: &str = "I was very surprised by what happened yesterday.";
    const TRANSLATION: &str = "I sup'ose tire well well for wetin happen yesterday.";

    fn evaluator(translator: Arc<FakeClient>, judge: Arc<FakeClient>) -> Evaluator {
        Evaluator::from_stages(
            Translator::new(translator, "gpt-4o-mini"),
            Judge::new(judge, "gpt-4o"),
        )
    }

    #[test]
    fn missing_credential_fails_construction() {
        let err = Evaluator::new(&EvaluatorConfig::default()).err().unwrap();
        assert!(matches!(err, EvalError::MissingCredential));

        let cfg = EvaluatorConfig::default().with_api_key("");
        let err = Evaluator::new(&cfg).err().unwrap();
        assert!(matches!(err, EvalError::MissingCredential));
    }

    #[test]
    fn construction_uses_configured_models() {
        let cfg = EvaluatorConfig::default()
            .with_api_key("sk-test")
            .with_translator_model("student")
            .with_judge_model("critic");
        let eval = Evaluator::new(&cfg).unwrap();
        assert_eq!(eval.translator().model(), "student");
        assert_eq!(eval.judge().model(), "critic");
    }

    #[tokio::test]
    async fn run_feeds_translation_into_judge() {
        let translator = Arc::new(FakeClient::new().with_response(TRANSLATION));
        let judge = Arc::new(FakeClient::new().with_response(
            r#"{"score": 3, "reasoning": "Decent attempt but word choice slightly off."}"#,
        ));
        let eval = evaluator(translator.clone(), judge.clone());

        let report = eval.run(INPUT).await.unwrap();
        assert_eq!(report.input, INPUT);
        assert_eq!(report.translation, TRANSLATION);
        assert_eq!(
            report.verdict,
            EvaluationVerdict::new(3, "Decent attempt but word choice slightly off.")
        );

        assert_eq!(translator.requests().len(), 1);
        let judged = judge.requests();
        assert_eq!(judged.len(), 1);
        assert!(judged[0].messages[0].content.contains(TRANSLATION));
        assert!(judged[0].messages[0].content.contains(INPUT));
    }

    #[tokio::test]
    async fn empty_input_never_reaches_a_client() {
        let translator = Arc::new(FakeClient::new().with_response(TRANSLATION));
        let judge = Arc::new(FakeClient::new().with_response("{}"));
        let eval = evaluator(translator.clone(), judge.clone());

        let err = eval.run("   ").await.unwrap_err();
        assert!(matches!(err, EvalError::EmptySource));
        assert!(translator.requests().is_empty());
        assert!(judge.requests().is_empty());
    }

    #[tokio::test]
    async fn translator_failure_skips_judge() {
        let translator = Arc::new(FakeClient::new().then_fail(
            crate::errors::ProviderError::Network {
                message: "connection refused".to_string(),
            },
        ));
        let judge = Arc::new(FakeClient::new().with_response("{}"));
        let eval = evaluator(translator, judge.clone());

        let err = eval.run(INPUT).await.unwrap_err();
        assert_eq!(err.stage(), Some(Stage::Translator));
        assert!(judge.requests().is_empty());
    }

    #[tokio::test]
    async fn malformed_judge_reply_yields_no_report() {
        let translator = Arc::new(FakeClient::new().with_response(TRANSLATION));
        let judge = Arc::new(FakeClient::new().with_response("Score: 3"));
        let eval = evaluator(translator, judge);

        let err = eval.run(INPUT).await.unwrap_err();
        assert!(matches!(
            err,
            EvalError::MalformedResponse {
                stage: Stage::Judge,
                ..
            }
        ));
    }
}
