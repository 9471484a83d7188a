//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod catalog;
pub mod offer;

pub use catalog::{ItemCatalog, ItemInput, UserDirectory, UserInput};

pub use offer::{
    CreateOfferCommand, CreateOfferHandler, DeleteOfferCommand, DeleteOfferHandler,
    DeleteOfferResult, OfferQueries,
};
