//! Error types shared by the board and the analyzer.

use thiserror::Error;

/// Result type for board and analysis operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to callers of the store, the board and the analyzer.
///
/// Every variant is terminal for the request that produced it; no operation
/// leaves partial state behind when it fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed input: out-of-range value, negative estimate, empty text.
    #[error("{field}: {message}")]
    Validation { field: String, message: String },

    /// A referenced resource does not exist.
    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },
}

impl Error {
    /// Create a validation error for the given field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation { field: field.into(), message: message.into() }
    }

    /// Create a not-found error for a workflow item.
    pub fn item_not_found(id: impl Into<String>) -> Self {
        Self::NotFound { resource: "workflow item", id: id.into() }
    }

    /// Create a not-found error for a deployment template.
    pub fn template_not_found(id: impl Into<String>) -> Self {
        Self::NotFound { resource: "template", id: id.into() }
    }

    /// Short machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "ValidationError",
            Self::NotFound { .. } => "NotFoundError",
        }
    }

    /// The offending field, for validation errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Validation { field, .. } => Some(field),
            Self::NotFound { .. } => None,
        }
    }

    /// Whether this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Whether this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
