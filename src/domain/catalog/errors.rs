//! Catalog error types.

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, UserId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    UserNotFound(UserId),
    ItemNotFound(ItemId),
    /// A user with that email or an item with that id already exists.
    Duplicate(String),
    ValidationFailed { field: String, message: String },
    Infrastructure(String),
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::UserNotFound(_) => ErrorCode::UserNotFound,
            CatalogError::ItemNotFound(_) => ErrorCode::ItemNotFound,
            CatalogError::Duplicate(_) => ErrorCode::Conflict,
            CatalogError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            CatalogError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            CatalogError::UserNotFound(id) => format!("User not found: {}", id),
            CatalogError::ItemNotFound(id) => format!("Item not found: {}", id),
            CatalogError::Duplicate(what) => format!("Already exists: {}", what),
            CatalogError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            CatalogError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for CatalogError {}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for CatalogError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::Conflict => CatalogError::Duplicate(err.message),
            _ => CatalogError::Infrastructure(err.to_string()),
        }
    }
}
