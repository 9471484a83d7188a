//! Catalog domain module.
//!
//! Users who bid and the items they bid on. Offers reference both, so an
//! offer can only be placed once its user and item exist here.

mod errors;
mod item;
mod user;

pub use errors::CatalogError;
pub use item::{Item, ItemDetails, NewItem, DEFAULT_ITEM_STATUS};
pub use user::{User, UserDetails};
