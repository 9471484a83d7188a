//! HTTP routes for user and item endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_item, create_user, delete_item, delete_user, get_item, get_user, list_items,
    list_users, update_item, update_user, CatalogHandlers,
};

/// Creates the catalog router. Mounted under `/api` next to the offer routes,
/// which share the `:id` segment name.
pub fn catalog_routes(handlers: CatalogHandlers) -> Router {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/items", get(list_items).post(create_item))
        .route("/items/:id", get(get_item).put(update_item).delete(delete_item))
        .with_state(handlers)
}
