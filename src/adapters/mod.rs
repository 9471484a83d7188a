//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - REST endpoints and router assembly
//! - `memory` - In-memory store for tests and demos
//! - `postgres` - PostgreSQL user, item and offer storage
//! - `websocket` - Live auction watchers and event fan-out

pub mod http;
pub mod memory;
pub mod postgres;
pub mod websocket;

pub use memory::InMemoryAuctionStore;
pub use postgres::{PostgresItemRepository, PostgresOfferRepository, PostgresUserRepository};
pub use websocket::{AuctionEventBridge, Broadcaster, TopicRegistry};
