//! In-memory adapters for tests and local demos.
//!
//! - `InMemoryAuctionStore` - Users, items and offers with reference checks

mod auction_store;

pub use auction_store::InMemoryAuctionStore;
