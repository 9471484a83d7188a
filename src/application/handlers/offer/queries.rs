//! Read-side offer queries.

use std::sync::Arc;

use crate::domain::foundation::{ItemId, OfferId, UserId};
use crate::domain::offer::{Offer, OfferError};
use crate::ports::OfferRepository;

/// Query handler for offer reads.
#[derive(Clone)]
pub struct OfferQueries {
    repository: Arc<dyn OfferRepository>,
}

impl OfferQueries {
    pub fn new(repository: Arc<dyn OfferRepository>) -> Self {
        Self { repository }
    }

    /// All offers, newest first.
    pub async fn list_all(&self) -> Result<Vec<Offer>, OfferError> {
        Ok(self.repository.list_all().await?)
    }

    pub async fn get(&self, id: OfferId) -> Result<Offer, OfferError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OfferError::NotFound(id))
    }

    /// Offers on an item, highest first.
    pub async fn list_by_item(&self, item_id: &ItemId) -> Result<Vec<Offer>, OfferError> {
        Ok(self.repository.list_by_item(item_id).await?)
    }

    /// Offers placed by a user, newest first.
    pub async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Offer>, OfferError> {
        Ok(self.repository.list_by_user(user_id).await?)
    }

    /// The current winning offer for an item.
    pub async fn highest_for_item(&self, item_id: &ItemId) -> Result<Offer, OfferError> {
        self.repository
            .highest_for_item(item_id)
            .await?
            .ok_or_else(|| OfferError::NoOffersForItem(item_id.clone()))
    }
}
