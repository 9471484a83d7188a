//! HTTP adapter for user and item endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateItemRequest, DeletedResponse, ItemListQuery, UpdateItemRequest, UserRequest};
pub use handlers::CatalogHandlers;
pub use routes::catalog_routes;
