use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// The comparison engine itself never fails; these kinds classify failures
/// of the surfaces around it (case files, configuration, the CLI). Each kind
/// maps to a stable error code usable by scripts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidInput,
    InvalidCaseFile,
    DuplicateCase,
    UnsupportedSchemaVersion,
    InvalidConfig,

    // Integration/IO
    Io,

    // Harness outcome
    CaseFailed,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidCaseFile => "ERR_INVALID_CASE_FILE",
            ExErrorKind::DuplicateCase => "ERR_DUPLICATE_CASE",
            ExErrorKind::UnsupportedSchemaVersion => "ERR_UNSUPPORTED_SCHEMA_VERSION",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::CaseFailed => "ERR_CASE_FAILED",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus optional context
/// (operation, offending case, file path) for humans.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    case: Option<String>,
    path: Option<PathBuf>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            case: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add case name context
    pub fn with_case(mut self, case: impl Into<String>) -> Self {
        self.case = Some(case.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation name, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the case name, if any
    pub fn case(&self) -> Option<&str> {
        self.case.as_deref()
    }

    /// Get the file path, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Get the message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(case) = &self.case {
            write!(f, " (case: {})", case)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Typed failures raised while loading case files and configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldEqError {
    /// File could not be read
    #[error("Failed to read {path}: {reason}")]
    ReadFailed { path: PathBuf, reason: String },

    /// Case file is not valid YAML or does not match the case schema
    #[error("Case file parse error: {reason}")]
    CaseFileParse { reason: String },

    /// Case file declares a schema version this build does not understand
    #[error("Unsupported schema_version: {found}. Expected {expected}")]
    UnsupportedSchemaVersion { found: u32, expected: u32 },

    /// Two cases share a name
    #[error("Duplicate case name: {name}")]
    DuplicateCaseName { name: String },

    /// A case has an empty or whitespace-only name
    #[error("Case at index {index} has an empty name")]
    EmptyCaseName { index: usize },

    /// Configuration file is not valid TOML or has unknown values
    #[error("Config parse error: {reason}")]
    ConfigParse { reason: String },

    /// A value given on the command line is not a scalar
    #[error("Invalid field value {raw:?}: {reason}")]
    InvalidFieldValue { raw: String, reason: String },

    /// One or more cases produced an unexpected verdict
    #[error("{failed} of {total} cases failed")]
    CasesFailed { failed: usize, total: usize },
}

/// Conversion from FieldEqError to ExError
impl From<FieldEqError> for ExError {
    fn from(err: FieldEqError) -> Self {
        let message = err.to_string();
        match err {
            FieldEqError::ReadFailed { path, .. } => ExError::new(ExErrorKind::Io)
                .with_path(path)
                .with_message(message),

            FieldEqError::CaseFileParse { .. } | FieldEqError::EmptyCaseName { .. } => {
                ExError::new(ExErrorKind::InvalidCaseFile)
                    .with_op("parse_cases")
                    .with_message(message)
            }

            FieldEqError::UnsupportedSchemaVersion { .. } => {
                ExError::new(ExErrorKind::UnsupportedSchemaVersion)
                    .with_op("parse_cases")
                    .with_message(message)
            }

            FieldEqError::DuplicateCaseName { ref name } => {
                ExError::new(ExErrorKind::DuplicateCase)
                    .with_op("parse_cases")
                    .with_case(name.clone())
                    .with_message(message)
            }

            FieldEqError::ConfigParse { .. } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(message),

            FieldEqError::InvalidFieldValue { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }

            FieldEqError::CasesFailed { .. } => ExError::new(ExErrorKind::CaseFailed)
                .with_op("run_cases")
                .with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_context() {
        let err = ExError::new(ExErrorKind::DuplicateCase)
            .with_op("parse_cases")
            .with_case("quantity")
            .with_message("Duplicate case name: quantity");
        let shown = err.to_string();
        assert!(shown.starts_with("[ERR_DUPLICATE_CASE]"));
        assert!(shown.contains("in operation 'parse_cases'"));
        assert!(shown.contains("(case: quantity)"));
    }

    #[test]
    fn test_display_without_context() {
        let err = ExError::new(ExErrorKind::Io);
        assert_eq!(err.to_string(), "[ERR_IO]");
    }
}
