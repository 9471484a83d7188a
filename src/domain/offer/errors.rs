//! Offer-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, OfferId, ValidationError};

/// Offer-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OfferError {
    /// Offer was not found.
    NotFound(OfferId),
    /// Item has no offers yet.
    NoOffersForItem(ItemId),
    /// The referenced user or item does not exist.
    UnknownReference,
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error.
    Infrastructure(String),
}

impl OfferError {
    pub fn not_found(id: OfferId) -> Self {
        OfferError::NotFound(id)
    }
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        OfferError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        OfferError::Infrastructure(message.into())
    }
    pub fn code(&self) -> ErrorCode {
        match self {
            OfferError::NotFound(_) | OfferError::NoOffersForItem(_) => ErrorCode::OfferNotFound,
            OfferError::UnknownReference => ErrorCode::ForeignKeyViolation,
            OfferError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            OfferError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
    pub fn message(&self) -> String {
        match self {
            OfferError::NotFound(id) => format!("Offer not found: {}", id),
            OfferError::NoOffersForItem(item) => format!("No offers found for item: {}", item),
            OfferError::UnknownReference => "User or item does not exist".to_string(),
            OfferError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            OfferError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for OfferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for OfferError {}

impl From<ValidationError> for OfferError {
    fn from(err: ValidationError) -> Self {
        OfferError::ValidationFailed {
            field: err.field().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for OfferError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ForeignKeyViolation => OfferError::UnknownReference,
            ErrorCode::ValidationFailed => OfferError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => OfferError::Infrastructure(err.to_string()),
        }
    }
}
