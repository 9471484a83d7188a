//! HTTP adapters - REST API and router assembly.

pub mod catalog;
pub mod error;
pub mod live;
pub mod offer;
pub mod router;

pub use catalog::{catalog_routes, CatalogHandlers};
pub use error::ErrorResponse;
pub use live::{live_routes, LiveState};
pub use offer::{offer_routes, OfferHandlers};
pub use router::create_router;
