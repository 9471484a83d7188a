//! HTTP DTOs for user and item endpoints.
//!
//! Users and items are returned as their domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::application::handlers::catalog::{ItemInput, UserInput};

/// Body of `POST /api/users` and `PUT /api/users/:id`.
#[derive(Debug, Clone, Deserialize)]
pub struct UserRequest {
    pub name: String,
    pub email: String,
}

impl From<UserRequest> for UserInput {
    fn from(req: UserRequest) -> Self {
        UserInput {
            name: req.name,
            email: req.email,
        }
    }
}

/// Body of `POST /api/items`. The caller picks the item ID.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub id: String,
    #[serde(flatten)]
    pub fields: UpdateItemRequest,
}

/// Body of `PUT /api/items/:id`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_price: Decimal,
    #[serde(default)]
    pub status: Option<String>,
}

impl From<UpdateItemRequest> for ItemInput {
    fn from(req: UpdateItemRequest) -> Self {
        ItemInput {
            name: req.name,
            description: req.description,
            base_price: req.base_price,
            status: req.status,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ItemListQuery {
    pub status: Option<String>,
}

/// Response for a successful user or item deletion.
#[derive(Debug, Clone, Serialize)]
pub struct DeletedResponse<Id> {
    pub message: String,
    pub id: Id,
}
