//! Core types shared across fieldeq facilities
//!
//! This crate provides the foundational types used by the comparison
//! engine, the case-file harness and the logging facility:
//!
//! - **Field values**: `FieldValue`, the dynamically-typed scalar compared by
//!   the oracle, with its absent-marker and null sentinels
//! - **Redaction**: `Redacted`, a log-safe summary of a field value
//! - **Schema constants**: Canonical field keys and event names

pub mod schema;
pub mod value;

pub use value::{FieldValue, Redacted, Scalar};
