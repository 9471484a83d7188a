//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresOfferRepository` - Offers joined with user and item names
//! - `PostgresUserRepository` - Users, unique by email
//! - `PostgresItemRepository` - Items keyed by caller-chosen IDs

mod item_repository;
mod offer_repository;
mod user_repository;

pub use item_repository::PostgresItemRepository;
pub use offer_repository::PostgresOfferRepository;
pub use user_repository::PostgresUserRepository;
