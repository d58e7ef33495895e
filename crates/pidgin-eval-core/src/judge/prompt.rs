//! Judge prompt text: persona, rubric and output contract.

pub(crate) const RUBRIC: &str = "Score 1-5 based on:
1. Lexical Accuracy (Is it real Pidgin or just broken English?)
2. Tone (Does it sound natural to a Lagos local?)
3. Grammar (Correct syntax for Pidgin).";

pub(crate) const OUTPUT_CONTRACT: &str =
    r#"Return JSON format: { "score": int, "reasoning": "string" }"#;

/// Single user-turn prompt. Both sentences are embedded verbatim.
pub(crate) fn build_prompt(original: &str, translation: &str) -> String {
    format!(
        "Act as a linguistic expert in West African languages. Evaluate this translation:\n\n\
         Original (English): \"{}\"\n\
         Candidate (Pidgin): \"{}\"\n\n\
         {}\n\n\
         {}",
        original, translation, RUBRIC, OUTPUT_CONTRACT
    )
}
