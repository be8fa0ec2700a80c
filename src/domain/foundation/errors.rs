//! Error types for the domain layer.

use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Machine-readable failure category carried by every [`DomainError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidInput,
    NotFound,
    ResourceNotFound,
    Unauthorized,
    Forbidden,
    BackendError,
    StorageError,
    InternalError,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::BackendError => "BACKEND_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Whether the failure came from the managed backend rather than the caller.
    pub fn is_infrastructure(self) -> bool {
        matches!(
            self,
            ErrorCode::BackendError | ErrorCode::StorageError | ErrorCode::InternalError
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure returned by ports and use cases. `message` is safe to show to users;
/// `details` is context for logs.
#[derive(Debug, Clone, Error)]
#[error("[{code}] {message}")]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BackendError, message)
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        DomainError::new(ErrorCode::InvalidInput, err.to_string()).with_detail("field", field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_errors_name_the_field() {
        assert_eq!(
            ValidationError::empty_field("name").to_string(),
            "Field 'name' cannot be empty"
        );
        assert_eq!(
            ValidationError::invalid_format("role", "unknown role 'wizard'").to_string(),
            "Field 'role' has invalid format: unknown role 'wizard'"
        );
    }

    #[test]
    fn display_prefixes_the_code() {
        let err = DomainError::new(ErrorCode::ResourceNotFound, "Resource not found");

        assert_eq!(err.to_string(), "[RESOURCE_NOT_FOUND] Resource not found");
        assert_eq!(err.message(), "Resource not found");
        assert!(!err.code().is_infrastructure());
    }

    #[test]
    fn backend_errors_keep_context() {
        let err = DomainError::backend("insert failed").with_detail("table", "tweets");

        assert!(err.code().is_infrastructure());
        assert_eq!(err.details["table"], "tweets");
    }

    #[test]
    fn value_error_becomes_invalid_input() {
        let err: DomainError = ValidationError::empty_field("user_id").into();

        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(err.details["field"], "user_id");
    }
}
