//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `catalog` - Users and auction items
//! - `offer` - Bids placed on auction items

pub mod catalog;
pub mod foundation;
pub mod offer;
