//! Offer command and query handlers.

mod create_offer;
mod delete_offer;
mod queries;
#[cfg(test)]
pub(crate) mod test_support;

pub use create_offer::{CreateOfferCommand, CreateOfferHandler};
pub use delete_offer::{DeleteOfferCommand, DeleteOfferHandler, DeleteOfferResult};
pub use queries::OfferQueries;
