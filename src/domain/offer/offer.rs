//! Offer entity and the validated input used to place one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, OfferId, Timestamp, UserId, ValidationError};

/// A bid placed by a user on an auction item.
///
/// `user_name` and `item_name` are filled in when the offer is read joined
/// with its user and item rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    pub id: OfferId,
    pub user_id: UserId,
    pub item_id: ItemId,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub created_at: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub item_name: Option<String>,
}

/// Validated input for placing an offer.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    user_id: UserId,
    item_id: ItemId,
    amount: Decimal,
}

impl NewOffer {
    /// Validates and creates a new offer request.
    ///
    /// # Errors
    ///
    /// - `NotPositive` if `amount` is zero or negative
    pub fn new(user_id: UserId, item_id: ItemId, amount: Decimal) -> Result<Self, ValidationError> {
        if amount <= Decimal::ZERO {
            return Err(ValidationError::not_positive("amount"));
        }
        Ok(Self {
            user_id,
            item_id,
            amount,
        })
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}
