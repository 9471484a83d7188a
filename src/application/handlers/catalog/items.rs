//! Item listing and maintenance.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::catalog::{CatalogError, Item, ItemDetails, NewItem};
use crate::domain::foundation::ItemId;
use crate::ports::ItemRepository;

/// Raw item fields as received from a client.
#[derive(Debug, Clone, Default)]
pub struct ItemInput {
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub status: Option<String>,
}

impl ItemInput {
    fn into_details(self) -> Result<ItemDetails, CatalogError> {
        Ok(ItemDetails::new(
            self.name,
            self.description,
            self.base_price,
            self.status,
        )?)
    }
}

#[derive(Clone)]
pub struct ItemCatalog {
    repository: Arc<dyn ItemRepository>,
}

impl ItemCatalog {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    /// List an item under `id`, which must not be in use.
    pub async fn create(&self, id: &str, input: ItemInput) -> Result<Item, CatalogError> {
        let id = ItemId::new(id)?;
        let details = input.into_details()?;
        let item = self.repository.insert(NewItem { id, details }).await?;
        tracing::info!(item_id = %item.id, "Item listed");
        Ok(item)
    }

    pub async fn get(&self, id: &ItemId) -> Result<Item, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::ItemNotFound(id.clone()))
    }

    /// Items newest first. A blank status filter means no filter.
    pub async fn list(&self, status: Option<&str>) -> Result<Vec<Item>, CatalogError> {
        let status = status
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Ok(self.repository.list(status.as_deref()).await?)
    }

    pub async fn update(&self, id: &ItemId, input: ItemInput) -> Result<Item, CatalogError> {
        let details = input.into_details()?;
        self.repository
            .update(id, details)
            .await?
            .ok_or_else(|| CatalogError::ItemNotFound(id.clone()))
    }

    /// Removes the item together with its offers.
    pub async fn delete(&self, id: &ItemId) -> Result<(), CatalogError> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::ItemNotFound(id.clone()));
        }
        tracing::info!(item_id = %id, "Item deleted");
        Ok(())
    }
}
