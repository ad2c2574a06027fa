//! Base64 probing of observed values

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use fieldeq_core_types::FieldValue;
use thiserror::Error;

/// Why a value could not be read as base64-encoded text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("value is not a string")]
    NotAString,

    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("decoded bytes are not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Decode a string value holding standard, padded base64 into UTF-8 text
///
/// # Errors
///
/// Fails for non-string values, characters outside the base64 alphabet,
/// bad padding, and decoded bytes that are not UTF-8.
pub fn decode_text(value: &FieldValue) -> Result<String, DecodeError> {
    let encoded = value.as_str().ok_or(DecodeError::NotAString)?;
    let bytes = STANDARD.decode(encoded)?;
    Ok(String::from_utf8(bytes)?)
}
