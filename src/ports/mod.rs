//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `OfferRepository` - Offer persistence
//! - `OfferNotifier` - Live update hook invoked by the offer write-path
//! - `UserRepository` / `ItemRepository` - Catalog persistence

mod item_repository;
mod offer_notifier;
mod offer_repository;
mod user_repository;

pub use item_repository::ItemRepository;
pub use offer_notifier::OfferNotifier;
pub use offer_repository::OfferRepository;
pub use user_repository::UserRepository;
