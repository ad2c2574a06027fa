//! Harness configuration loaded from TOML
//!
//! ```toml
//! [logging]
//! profile = "development"
//!
//! [harness]
//! fail_fast = true
//! explain = false
//! ```
//!
//! Every table and key is optional.

use crate::errors::{FieldEqError, Result};
use crate::logging_facility::Profile;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OracleConfig {
    pub logging: LoggingConfig,
    pub harness: HarnessConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Stop at the first failing case
    pub fail_fast: bool,
    /// Print the explained verdict for every case
    pub explain: bool,
}

impl OracleConfig {
    /// Parse configuration from TOML text
    ///
    /// # Errors
    ///
    /// `InvalidConfig` for malformed TOML, unknown keys or bad values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| {
            FieldEqError::ConfigParse {
                reason: e.to_string(),
            }
            .into()
        })
    }
}

/// Load configuration from `path`, or defaults when no path is given
///
/// # Errors
///
/// `Io` if the file cannot be read, `InvalidConfig` if it does not parse.
pub fn load_config(path: Option<&Path>) -> Result<OracleConfig> {
    let Some(path) = path else {
        return Ok(OracleConfig::default());
    };
    let text = std::fs::read_to_string(path).map_err(|e| FieldEqError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config = OracleConfig::from_toml_str(&text).map_err(|e| e.with_path(path))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}
