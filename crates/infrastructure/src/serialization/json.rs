//! JSON serialization helpers.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),

    /// The body was empty or the JSON literal `null`.
    #[error("JSON body is empty")]
    Empty,

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Serializes a value to JSON with 2-space indentation, for log output.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value.serialize(&mut serializer)?;

    Ok(String::from_utf8(buffer)?)
}

/// Converts a value into a JSON tree.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_value<T: Serialize>(value: &T) -> Result<serde_json::Value, SerializationError> {
    Ok(serde_json::to_value(value)?)
}

/// Deserializes a response body.
///
/// An empty body or a bare `null` is rejected as [`SerializationError::Empty`]
/// so callers never see a default-constructed value for a missing payload.
///
/// # Errors
///
/// Returns an error if the body is empty, `null`, invalid, or doesn't match
/// the expected type.
pub fn from_json<T: DeserializeOwned>(json: &str) -> Result<T, SerializationError> {
    let trimmed = json.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(SerializationError::Empty);
    }
    serde_json::from_str(trimmed).map_err(SerializationError::Deserialize)
}

/// Validates that JSON can be parsed without deserializing to a specific type.
///
/// # Errors
///
/// Returns an error if the JSON is invalid.
pub fn validate_json(json: &str) -> Result<serde_json::Value, SerializationError> {
    serde_json::from_str(json).map_err(SerializationError::Deserialize)
}
