//! Auction items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, Timestamp, ValidationError};

/// Status given to items created without one.
pub const DEFAULT_ITEM_STATUS: &str = "active";

/// An item up for auction as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    pub status: String,
    pub created_at: Timestamp,
}

/// Validated mutable fields of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDetails {
    name: String,
    description: Option<String>,
    base_price: Decimal,
    status: String,
}

impl ItemDetails {
    /// Blank descriptions are dropped and a missing status becomes
    /// [`DEFAULT_ITEM_STATUS`].
    ///
    /// # Errors
    ///
    /// - `EmptyField` if `name` or a given `status` is blank
    /// - `InvalidFormat` if `base_price` is negative
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        base_price: Decimal,
        status: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if base_price < Decimal::ZERO {
            return Err(ValidationError::invalid_format("base_price", "cannot be negative"));
        }
        let status = match status {
            Some(s) if s.trim().is_empty() => return Err(ValidationError::empty_field("status")),
            Some(s) => s.trim().to_lowercase(),
            None => DEFAULT_ITEM_STATUS.to_string(),
        };
        let description = description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(Self {
            name,
            description,
            base_price,
            status,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn base_price(&self) -> Decimal {
        self.base_price
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

/// An item to be listed under a caller-chosen identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub id: ItemId,
    pub details: ItemDetails,
}
