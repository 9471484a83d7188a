//! User and item catalog handlers.

mod items;
mod users;

pub use items::{ItemCatalog, ItemInput};
pub use users::{UserDirectory, UserInput};
