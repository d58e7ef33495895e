use std::io::Write;

use anyhow::Context;
use pidgin_eval_core::report::{self, console};
use pidgin_eval_core::{
    EvalError, EvaluationReport, Evaluator, EvaluatorConfig, TranslationRequest,
};
use tracing::debug;

use super::args::{Cli, OutputFormat};
use crate::exit_codes::{CONFIG_ERROR, OUTPUT_FAILED, STAGE_FAILED, SUCCESS};

/// Resolve config: file (if any) as the base, then CLI flags and their env
/// fallbacks on top.
pub fn resolve_config(cli: &Cli) -> Result<EvaluatorConfig, EvalError> {
    let mut config = match &cli.config {
        Some(path) => EvaluatorConfig::from_file(path)?,
        None => EvaluatorConfig::default(),
    };
    if let Some(key) = &cli.api_key {
        config = config.with_api_key(key);
    }
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url);
    }
    if let Some(model) = &cli.translator_model {
        config = config.with_translator_model(model);
    }
    if let Some(model) = &cli.judge_model {
        config = config.with_judge_model(model);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout_secs(secs);
    }
    Ok(config)
}

/// Run both stages, writing the report to `out`. Returns the exit code.
///
/// Stage failures are reported on `out` as text; only I/O failures on `out`
/// itself surface as `Err`.
pub async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<i32> {
    match evaluate(&cli, out).await? {
        Ok(()) => Ok(SUCCESS),
        Err(err) => {
            debug!(error = ?err, "evaluation failed");
            writeln!(out, "{}", console::error_message(&err))?;
            Ok(if err.is_precondition() {
                CONFIG_ERROR
            } else {
                STAGE_FAILED
            })
        }
    }
}

/// Process exit code for the outcome of [`run`]. `Err` only ever means the
/// report could not be written.
pub fn exit_code(outcome: &anyhow::Result<i32>) -> i32 {
    match outcome {
        Ok(code) => *code,
        Err(_) => OUTPUT_FAILED,
    }
}

async fn evaluate<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<Result<(), EvalError>> {
    if let Err(err) = TranslationRequest::new(cli.text.as_str()) {
        return Ok(Err(err));
    }
    let evaluator = match resolve_config(cli).and_then(|cfg| Evaluator::new(&cfg)) {
        Ok(e) => e,
        Err(err) => return Ok(Err(err)),
    };

    match cli.format {
        OutputFormat::Text => {
            writeln!(out, "{}", console::input_section(&cli.text))?;
            out.flush()?;

            let translation = match evaluator.translate(&cli.text).await {
                Ok(t) => t,
                Err(err) => return Ok(Err(err)),
            };
            writeln!(out, "{}", console::translation_section(&translation.text))?;
            out.flush()?;

            let verdict = match evaluator.score(&cli.text, &translation.text).await {
                Ok(v) => v,
                Err(err) => return Ok(Err(err)),
            };
            writeln!(out, "{}", console::verdict_section(&verdict))?;
        }
        OutputFormat::Json => {
            let report: EvaluationReport = match evaluator.run(&cli.text).await {
                Ok(r) => r,
                Err(err) => return Ok(Err(err)),
            };
            let json = report::to_json(&report).context("failed to serialize report")?;
            writeln!(out, "{}", json)?;
        }
    }
    Ok(Ok(()))
}
