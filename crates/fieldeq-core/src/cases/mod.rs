//! Case files: named comparison quadruples with expected verdicts
//!
//! A case file is YAML ([`format_v0`]); [`parser`] loads and validates it and
//! [`runner`] evaluates every case against an [`Oracle`](crate::Oracle).

pub mod format_v0;
pub mod parser;
pub mod runner;

pub use format_v0::{CaseFileV0, CaseV0, CASE_SCHEMA_VERSION};
pub use parser::{parse_case_file, parse_case_str};
pub use runner::{run_cases, CaseOutcome, CaseReport};
