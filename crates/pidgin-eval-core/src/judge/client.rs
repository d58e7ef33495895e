use crate::errors::{EvalError, EvalResult, Stage};
use crate::model::{EvaluationVerdict, Score};

fn malformed(message: impl Into<String>, raw: &str) -> EvalError {
    EvalError::MalformedResponse {
        stage: Stage::Judge,
        message: message.into(),
        raw: raw.to_string(),
    }
}

/// Parse the judge reply into a verdict.
///
/// The reply must be a JSON object carrying both `score` and `reasoning`.
/// Their values are not checked: the score is kept as sent, and a reasoning
/// that is not a string is kept as its JSON text. Extra keys are ignored.
pub(crate) fn parse_verdict(text: &str) -> EvalResult<EvaluationVerdict> {
    let val: serde_json::Value =
        serde_json::from_str(text).map_err(|e| malformed(format!("invalid JSON: {}", e), text))?;

    let obj = val
        .as_object()
        .ok_or_else(|| malformed("expected a JSON object", text))?;

    let score = obj
        .get("score")
        .cloned()
        .map(Score::from)
        .ok_or_else(|| malformed("judge JSON missing 'score' field", text))?;

    let reasoning = match obj.get("reasoning") {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => return Err(malformed("judge JSON missing 'reasoning' field", text)),
    };

    Ok(EvaluationVerdict { score, reasoning })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(err: EvalError) -> String {
        match err {
            EvalError::MalformedResponse { message, .. } => message,
            other => panic!("expected MalformedResponse, got {other:?}"),
        }
    }

    #[test]
    fn parses_exact_verdict() {
        let v = parse_verdict(r#"{"score": 4, "reasoning": "Natural tone, minor grammar slip"}"#)
            .unwrap();
        assert_eq!(
            v,
            EvaluationVerdict::new(4, "Natural tone, minor grammar slip")
        );
    }

    #[test]
    fn surrounding_whitespace_is_fine() {
        let v = parse_verdict("\n  {\"score\": 2, \"reasoning\": \"meh\"}\n").unwrap();
        assert_eq!(v.score.as_i64(), Some(2));
    }

    #[test]
    fn plain_text_reply_fails() {
        let err = parse_verdict("Score: 4").unwrap_err();
        assert!(message_of(err).starts_with("invalid JSON"));
    }

    #[test]
    fn array_reply_fails() {
        let err = parse_verdict(r#"[{"score": 4, "reasoning": "x"}]"#).unwrap_err();
        assert_eq!(message_of(err), "expected a JSON object");
    }

    #[test]
    fn missing_fields_fail() {
        let err = parse_verdict(r#"{"reasoning": "x"}"#).unwrap_err();
        assert!(message_of(err).contains("'score'"));

        let err = parse_verdict(r#"{"score": 3}"#).unwrap_err();
        assert!(message_of(err).contains("'reasoning'"));
    }

    #[test]
    fn quoted_and_null_scores_pass_through() {
        let v = parse_verdict(r#"{"score": "4", "reasoning": "ok"}"#).unwrap();
        assert_eq!(v.score.as_value(), &serde_json::json!("4"));
        assert_eq!(v.score.to_string(), "4");
        assert!(!v.score.in_rubric_range());

        let v = parse_verdict(r#"{"score": null, "reasoning": "ok"}"#).unwrap();
        assert!(v.score.as_value().is_null());
    }

    #[test]
    fn non_string_reasoning_is_kept_as_json_text() {
        let v = parse_verdict(r#"{"score": 3, "reasoning": ["tone", "grammar"]}"#).unwrap();
        assert_eq!(v.reasoning, r#"["tone","grammar"]"#);
    }

    #[test]
    fn out_of_range_and_fractional_scores_pass_through() {
        let v = parse_verdict(r#"{"score": 9, "reasoning": "ok"}"#).unwrap();
        assert_eq!(v.score.as_i64(), Some(9));
        assert!(!v.score.in_rubric_range());

        let v = parse_verdict(r#"{"score": 3.5, "reasoning": "ok"}"#).unwrap();
        assert_eq!(v.score.as_f64(), Some(3.5));
        assert_eq!(v.score.as_i64(), None);

        let v = parse_verdict(r#"{"score": -1, "reasoning": "ok"}"#).unwrap();
        assert_eq!(v.score.as_i64(), Some(-1));
    }

    #[test]
    fn extra_keys_are_ignored() {
        let v = parse_verdict(r#"{"score": 5, "reasoning": "great", "confidence": 0.9}"#).unwrap();
        assert_eq!(v, EvaluationVerdict::new(5, "great"));
    }
}
