//! Exit codes for the pidgin-eval binary.

pub const SUCCESS: i32 = 0;
pub const STAGE_FAILED: i32 = 1; // Translator or judge call failed, or judge reply malformed
pub const CONFIG_ERROR: i32 = 2; // Missing key, empty input, bad config file or malformed flag/env value
pub const OUTPUT_FAILED: i32 = 3; // Writing the report to stdout failed (e.g. broken pipe)
