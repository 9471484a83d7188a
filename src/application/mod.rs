//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers persist first and notify live watchers second; query
//! handlers only read.

pub mod handlers;

pub use handlers::{
    CreateOfferCommand, CreateOfferHandler, DeleteOfferCommand, DeleteOfferHandler,
    DeleteOfferResult, OfferQueries,
};
