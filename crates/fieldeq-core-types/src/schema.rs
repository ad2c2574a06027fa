//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Comparison outcome fields
pub const FIELD_TRANSFORM: &str = "transform";
pub const FIELD_VERDICT: &str = "verdict";
pub const FIELD_CLAUSE: &str = "clause";

// Case harness fields
pub const FIELD_CASE: &str = "case";
pub const FIELD_CASE_COUNT: &str = "case_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical operation names
pub const OP_NORMALIZE: &str = "normalize";
pub const OP_COMPARE: &str = "compare";
pub const OP_INPUT_COMPARE: &str = "input_compare";
pub const OP_RUN_CASES: &str = "run_cases";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_DECIDED: &str = "decided";
