//! ItemRepository port - Persistence interface for auction items.

use async_trait::async_trait;

use crate::domain::catalog::{Item, ItemDetails, NewItem};
use crate::domain::foundation::{DomainError, ItemId};

/// Port for storing items.
///
/// Item IDs are chosen by the caller; reusing one is reported with
/// `ErrorCode::Conflict`.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    async fn insert(&self, item: NewItem) -> Result<Item, DomainError>;

    async fn find_by_id(&self, id: &ItemId) -> Result<Option<Item>, DomainError>;

    /// Items newest first, optionally only those with the given status.
    async fn list(&self, status: Option<&str>) -> Result<Vec<Item>, DomainError>;

    /// Replace the mutable fields. `None` if the item does not exist.
    async fn update(&self, id: &ItemId, details: ItemDetails) -> Result<Option<Item>, DomainError>;

    /// Delete an item and, by cascade, its offers. Returns false if no row was removed.
    async fn delete(&self, id: &ItemId) -> Result<bool, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ItemRepository) {}
}
