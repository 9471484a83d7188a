//! Offer domain module.
//!
//! Offers are bids placed on auction items. Creating or deleting one is the
//! write-path that drives live updates to everyone watching the item.

mod errors;
#[allow(clippy::module_inception)]
mod offer;

pub use errors::OfferError;
pub use offer::{NewOffer, Offer};
