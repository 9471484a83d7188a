//! HTTP handlers for user and item endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::catalog::{ItemCatalog, UserDirectory};
use crate::domain::catalog::CatalogError;
use crate::domain::foundation::{ItemId, UserId};

use super::dto::{CreateItemRequest, DeletedResponse, ItemListQuery, UpdateItemRequest, UserRequest};

#[derive(Clone)]
pub struct CatalogHandlers {
    users: UserDirectory,
    items: ItemCatalog,
}

impl CatalogHandlers {
    pub fn new(users: UserDirectory, items: ItemCatalog) -> Self {
        Self { users, items }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Users
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/users
pub async fn list_users(State(handlers): State<CatalogHandlers>) -> Response {
    match handlers.users.list().await {
        Ok(users) => (StatusCode::OK, Json(users)).into_response(),
        Err(e) => handle_catalog_error(e),
    }
}

/// POST /api/users - Register a user; the ID is assigned by the store
pub async fn create_user(
    State(handlers): State<CatalogHandlers>,
    Json(req): Json<UserRequest>,
) -> Response {
    match handlers.users.register(req.into()).await {
        Ok(user) => (StatusCode::CREATED, Json(user)).into_response(),
        Err(e) => handle_catalog_error(e),
    }
}

/// GET /api/users/:id
pub async fn get_user(State(handlers): State<CatalogHandlers>, Path(id): Path<String>) -> Response {
    let Ok(id) = id.parse::<UserId>() else {
        return bad_request("Invalid user ID");
    };

    match handlers.users.get(id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => handle_catalog_error(e),
    }
}

/// PUT /api/users/:id
pub async fn update_user(
    State(handlers): State<CatalogHandlers>,
    Path(id): Path<String>,
    Json(req): Json<UserRequest>,
) -> Response {
    let Ok(id) = id.parse::<UserId>() else {
        return bad_request("Invalid user ID");
    };

    match handlers.users.update(id, req.into()).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => handle_catalog_error(e),
    }
}

/// DELETE /api/users/:id - Also removes the user's offers
pub async fn delete_user(
    State(handlers): State<CatalogHandlers>,
    Path(id): Path<String>,
) -> Response {
    let Ok(id) = id.parse::<UserId>() else {
        return bad_request("Invalid user ID");
    };

    match handlers.users.delete(id).await {
        Ok(()) => {
            let response = DeletedResponse {
                message: "User deleted successfully".to_string(),
                id: id.as_i32(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Items
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/items[?status=active]
pub async fn list_items(
    State(handlers): State<CatalogHandlers>,
    Query(query): Query<ItemListQuery>,
) -> Response {
    match handlers.items.list(query.status.as_deref()).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => handle_catalog_error(e),
    }
}

/// POST /api/items
pub async fn create_item(
    State(handlers): State<CatalogHandlers>,
    Json(req): Json<CreateItemRequest>,
) -> Response {
    match handlers.items.create(&req.id, req.fields.into()).await {
        Ok(item) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => handle_catalog_error(e),
    }
}

/// GET /api/items/:id
pub async fn get_item(State(handlers): State<CatalogHandlers>, Path(id): Path<String>) -> Response {
    let id = match ItemId::new(id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers.items.get(&id).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => handle_catalog_error(e),
    }
}

/// PUT /api/items/:id
pub async fn update_item(
    State(handlers): State<CatalogHandlers>,
    Path(id): Path<String>,
    Json(req): Json<UpdateItemRequest>,
) -> Response {
    let id = match ItemId::new(id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers.items.update(&id, req.into()).await {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => handle_catalog_error(e),
    }
}

/// DELETE /api/items/:id - Also removes the item's offers
pub async fn delete_item(
    State(handlers): State<CatalogHandlers>,
    Path(id): Path<String>,
) -> Response {
    let id = match ItemId::new(id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers.items.delete(&id).await {
        Ok(()) => {
            let response = DeletedResponse {
                message: "Item deleted successfully".to_string(),
                id: id.to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_catalog_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

fn handle_catalog_error(error: CatalogError) -> Response {
    let status = match &error {
        CatalogError::UserNotFound(_) | CatalogError::ItemNotFound(_) => StatusCode::NOT_FOUND,
        CatalogError::Duplicate(_) => StatusCode::CONFLICT,
        CatalogError::ValidationFailed { .. } => StatusCode::BAD_REQUEST,
        CatalogError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Catalog request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response();
        }
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}
