pub mod console;

use crate::model::EvaluationReport;

/// Pretty-printed JSON document for one report.
pub fn to_json(report: &EvaluationReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}
