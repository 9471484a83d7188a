//! HTTP DTOs for offer endpoints.
//!
//! Offers themselves are returned as the domain `Offer`, whose camelCase
//! shape is the same one pushed to live watchers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to place an offer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOfferRequest {
    pub user_id: i32,
    pub item_id: String,
    pub amount: Decimal,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Response for a successful deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteOfferResponse {
    pub message: String,
    pub id: i32,
}
