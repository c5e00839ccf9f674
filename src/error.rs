//! Structured error types for document loading.

use crate::validate::ValidationError;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Document errors
    DocumentParseError,
    InvalidDocumentShape,
    UnsupportedValueShape,
    UnsupportedKey,
    InvalidVariable,

    // Validation errors
    ValidationFailed,

    // Internal errors
    IoError,
}

/// Position of a parse failure inside the source document (1-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {} column {}", self.line, self.column)
    }
}

/// Failure of a load operation.
///
/// Every variant is raised before the environment is touched, so a failed
/// load never leaves partial writes behind.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("malformed document{}: {message}", at_location(.location))]
    DocumentParse {
        message: String,
        location: Option<Location>,
    },

    #[error("document root must be a mapping, found {found}")]
    InvalidDocumentShape { found: &'static str },

    #[error("{key}: unsupported value shape ({found} inside a sequence)")]
    UnsupportedValueShape { key: String, found: &'static str },

    #[error("{path}: mapping key must be a scalar, found {found}")]
    UnsupportedKey { path: String, found: &'static str },

    #[error("{key}: cannot be set as an environment variable ({reason})")]
    InvalidVariable { key: String, reason: &'static str },

    #[error("document failed validation: {}", join_validation(.0))]
    Validation(Vec<ValidationError>),

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn at_location(location: &Option<Location>) -> String {
    location.map(|l| format!(" at {}", l)).unwrap_or_default()
}

fn join_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl LoadError {
    pub fn code(&self) -> ErrorCode {
        match self {
            LoadError::DocumentParse { .. } => ErrorCode::DocumentParseError,
            LoadError::InvalidDocumentShape { .. } => ErrorCode::InvalidDocumentShape,
            LoadError::UnsupportedValueShape { .. } => ErrorCode::UnsupportedValueShape,
            LoadError::UnsupportedKey { .. } => ErrorCode::UnsupportedKey,
            LoadError::InvalidVariable { .. } => ErrorCode::InvalidVariable,
            LoadError::Validation(_) => ErrorCode::ValidationFailed,
            LoadError::Io { .. } => ErrorCode::IoError,
        }
    }

    // Convenience constructors

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_yaml::Error> for LoadError {
    fn from(err: serde_yaml::Error) -> Self {
        let location = err.location().map(|loc| Location {
            line: loc.line(),
            column: loc.column(),
        });
        LoadError::DocumentParse {
            message: err.to_string(),
            location,
        }
    }
}

/// Result type for load operations.
pub type Result<T> = std::result::Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_includes_location() {
        let err = LoadError::DocumentParse {
            message: "did not find expected ',' or ']'".into(),
            location: Some(Location { line: 3, column: 7 }),
        };
        assert_eq!(
            err.to_string(),
            "malformed document at line 3 column 7: did not find expected ',' or ']'"
        );
        assert_eq!(err.code(), ErrorCode::DocumentParseError);
    }

    #[test]
    fn test_parse_error_without_location() {
        let err = LoadError::DocumentParse {
            message: "bad".into(),
            location: None,
        };
        assert_eq!(err.to_string(), "malformed document: bad");
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let code = serde_json::to_value(ErrorCode::InvalidDocumentShape).unwrap();
        assert_eq!(code, serde_json::json!("INVALID_DOCUMENT_SHAPE"));
    }

    #[test]
    fn test_invalid_variable_display() {
        let err = LoadError::InvalidVariable {
            key: "B=C".into(),
            reason: "name contains '='",
        };
        assert_eq!(
            err.to_string(),
            "B=C: cannot be set as an environment variable (name contains '=')"
        );
        assert_eq!(err.code(), ErrorCode::InvalidVariable);
    }

    #[test]
    fn test_validation_joins_messages() {
        let err = LoadError::Validation(vec![
            ValidationError::missing("database.host"),
            ValidationError::missing("api.key"),
        ]);
        assert_eq!(
            err.to_string(),
            "document failed validation: database.host: required value is missing; api.key: required value is missing"
        );
    }
}
