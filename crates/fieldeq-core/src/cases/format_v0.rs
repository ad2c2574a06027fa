//! Case file format v0
//!
//! ```yaml
//! schema_version: 0
//! cases:
//!   - name: quantity-suffix
//!     in_prev: null
//!     in_curr: "-.4272625998Mi"
//!     out_curr: "-448017308m"
//!     expected: true
//! ```
//!
//! A field left out of a case is the absent-marker; `null` or `~` is an
//! explicit null.

use fieldeq_core_types::FieldValue;
use serde::Deserialize;

/// The only schema version this build reads
pub const CASE_SCHEMA_VERSION: u32 = 0;

/// Top-level case file structure
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseFileV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    /// Cases in evaluation order
    #[serde(default)]
    pub cases: Vec<CaseV0>,
}

/// One comparison with its expected verdict
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CaseV0 {
    pub name: String,

    #[serde(default)]
    pub in_prev: FieldValue,
    #[serde(default)]
    pub in_curr: FieldValue,
    #[serde(default)]
    pub out_prev: FieldValue,
    #[serde(default)]
    pub out_curr: FieldValue,

    /// Expected verdict of `compare`
    #[serde(default = "default_expected")]
    pub expected: bool,
}

fn default_expected() -> bool {
    true
}
