//! Human-readable sections printed as each stage completes.

use crate::errors::EvalError;
use crate::model::{EvaluationReport, EvaluationVerdict, RUBRIC_MAX_SCORE};

pub fn input_section(input: &str) -> String {
    format!("--- INPUT ---\n{}\n", input)
}

pub fn translation_section(translation: &str) -> String {
    format!("--- MODEL OUTPUT ---\n{}\n", translation)
}

pub fn verdict_section(verdict: &EvaluationVerdict) -> String {
    format!(
        "--- AI JUDGE VERDICT ---\nScore: {}/{}\nReasoning: {}",
        verdict.score, RUBRIC_MAX_SCORE, verdict.reasoning
    )
}

/// All three sections, separated the same way as when printed one by one.
pub fn render(report: &EvaluationReport) -> String {
    format!(
        "{}\n{}\n{}",
        input_section(&report.input),
        translation_section(&report.translation),
        verdict_section(&report.verdict)
    )
}

/// Error line naming the failed stage, plus a hint for a missing key.
pub fn error_message(err: &EvalError) -> String {
    let mut out = match err.stage() {
        Some(stage) => format!("❌ Execution Error ({} stage): {}", stage, err),
        None => format!("❌ Execution Error: {}", err),
    };
    if matches!(err, EvalError::MissingCredential) {
        out.push_str("\nTip: Did you run 'export OPENAI_API_KEY=sk-...' in your terminal?");
    }
    out
}
