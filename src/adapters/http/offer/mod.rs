//! HTTP adapter for offer endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateOfferRequest, DeleteOfferResponse};
pub use handlers::OfferHandlers;
pub use routes::offer_routes;
