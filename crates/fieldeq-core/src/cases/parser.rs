//! Case file parser with validation
//!
//! Parses YAML and validates the schema version and case names

use crate::cases::format_v0::{CaseFileV0, CASE_SCHEMA_VERSION};
use crate::errors::{FieldEqError, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a case file from a path
///
/// # Errors
///
/// `Io` when the file cannot be read; otherwise as [`parse_case_str`], with
/// the path attached.
pub fn parse_case_file(path: &Path) -> Result<CaseFileV0> {
    let content = fs::read_to_string(path).map_err(|e| FieldEqError::ReadFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_case_str(&content).map_err(|e| e.with_path(path))
}

/// Parse a case file from a string
///
/// # Errors
///
/// - `InvalidCaseFile`: not YAML, not the case schema, non-scalar values or
///   an empty case name
/// - `UnsupportedSchemaVersion`: `schema_version` is not 0
/// - `DuplicateCase`: two cases share a name
pub fn parse_case_str(content: &str) -> Result<CaseFileV0> {
    let file: CaseFileV0 =
        serde_yaml::from_str(content).map_err(|e| FieldEqError::CaseFileParse {
            reason: e.to_string(),
        })?;

    validate_case_file(&file)?;

    tracing::debug!(case_count = file.cases.len(), "parsed case file");
    Ok(file)
}

fn validate_case_file(file: &CaseFileV0) -> Result<()> {
    if file.schema_version != CASE_SCHEMA_VERSION {
        return Err(FieldEqError::UnsupportedSchemaVersion {
            found: file.schema_version,
            expected: CASE_SCHEMA_VERSION,
        }
        .into());
    }

    let mut names = HashSet::new();
    for (index, case) in file.cases.iter().enumerate() {
        if case.name.trim().is_empty() {
            return Err(FieldEqError::EmptyCaseName { index }.into());
        }
        if !names.insert(case.name.as_str()) {
            return Err(FieldEqError::DuplicateCaseName {
                name: case.name.clone(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ExErrorKind;

    #[test]
    fn test_parse_minimal() {
        let file = parse_case_str("schema_version: 0\ncases: []\n").unwrap();
        assert!(file.cases.is_empty());

        let file = parse_case_str("schema_version: 0\n").unwrap();
        assert!(file.cases.is_empty());
    }

    #[test]
    fn test_wrong_schema_version() {
        let err = parse_case_str("schema_version: 1\ncases: []\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::UnsupportedSchemaVersion);
    }

    #[test]
    fn test_duplicate_names() {
        let err = parse_case_str(
            "schema_version: 0\ncases:\n  - name: a\n  - name: b\n  - name: a\n",
        )
        .unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::DuplicateCase);
        assert_eq!(err.case(), Some("a"));
    }

    #[test]
    fn test_empty_name() {
        let err = parse_case_str("schema_version: 0\ncases:\n  - name: '  '\n").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidCaseFile);
    }

    #[test]
    fn test_not_yaml_or_not_schema() {
        for text in ["cases: [", "schema_version: zero\n", "- 1\n- 2\n"] {
            let err = parse_case_str(text).unwrap_err();
            assert_eq!(err.kind(), ExErrorKind::InvalidCaseFile, "{}", text);
        }
    }
}
