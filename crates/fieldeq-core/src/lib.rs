//! fieldeq Core - field-value equivalence oracle
//!
//! This crate decides whether the value a differential-testing harness
//! intended to set for a field (the *input*) and the value observed in the
//! system afterwards (the *output*) represent the same change, across a
//! previous and a current snapshot. It provides:
//! - The value normalizer (base64 decoding, quantity canonicalization)
//! - The fixed set of equivalence operators (equality, wildcard, substring,
//!   config-subset)
//! - The `Oracle` producing boolean and explained verdicts
//! - YAML case files and a runner for regression suites
//! - Configuration, error and logging facilities shared with the CLI

pub mod cases;
pub mod config;
pub mod engine;
pub mod errors;
pub mod logging_facility;
pub mod normalize;
pub mod operators;

// Re-export commonly used types
pub use cases::{parse_case_file, parse_case_str, run_cases, CaseFileV0, CaseReport};
pub use config::{load_config, OracleConfig};
pub use engine::{compare, input_compare, Clause, Match, Oracle, Verdict};
pub use errors::{ExError, ExErrorKind, FieldEqError, Result};
pub use fieldeq_core_types::{FieldValue, Scalar};
pub use normalize::{KubeQuantity, Normalized, QuantityCanonicalizer, Transform};
pub use operators::CustomOperator;
