//! Test doubles shared by the offer handler tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, ItemId, OfferId, Timestamp, UserId};
use crate::domain::offer::{NewOffer, Offer};
use crate::ports::{OfferNotifier, OfferRepository};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Created(OfferId),
    Deleted(OfferId, ItemId),
}

/// Notifier that records every call.
pub struct RecordingNotifier {
    calls: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OfferNotifier for RecordingNotifier {
    async fn on_offer_created(&self, offer: &Offer) {
        self.calls.lock().unwrap().push(Notification::Created(offer.id));
    }

    async fn on_offer_deleted(&self, offer_id: OfferId, item_id: &ItemId) {
        self.calls
            .lock()
            .unwrap()
            .push(Notification::Deleted(offer_id, item_id.clone()));
    }

    fn name(&self) -> &'static str {
        "RecordingNotifier"
    }
}

fn db_down() -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, "Simulated database failure")
}

/// Repository where every call fails.
pub struct FailingOfferRepository;

#[async_trait]
impl OfferRepository for FailingOfferRepository {
    async fn insert(&self, _offer: NewOffer) -> Result<Offer, DomainError> {
        Err(db_down())
    }

    async fn find_by_id(&self, _id: OfferId) -> Result<Option<Offer>, DomainError> {
        Err(db_down())
    }

    async fn list_all(&self) -> Result<Vec<Offer>, DomainError> {
        Err(db_down())
    }

    async fn list_by_item(&self, _item_id: &ItemId) -> Result<Vec<Offer>, DomainError> {
        Err(db_down())
    }

    async fn list_by_user(&self, _user_id: UserId) -> Result<Vec<Offer>, DomainError> {
        Err(db_down())
    }

    async fn highest_for_item(&self, _item_id: &ItemId) -> Result<Option<Offer>, DomainError> {
        Err(db_down())
    }

    async fn delete(&self, _id: OfferId) -> Result<bool, DomainError> {
        Err(db_down())
    }
}

/// Repository whose offer is visible to reads but already gone at delete time.
pub struct VanishingOfferRepository;

#[async_trait]
impl OfferRepository for VanishingOfferRepository {
    async fn insert(&self, _offer: NewOffer) -> Result<Offer, DomainError> {
        Err(db_down())
    }

    async fn find_by_id(&self, id: OfferId) -> Result<Option<Offer>, DomainError> {
        Ok(Some(Offer {
            id,
            user_id: UserId::new(1),
            item_id: ItemId::new("ITEM1").unwrap(),
            amount: rust_decimal::Decimal::ONE,
            created_at: Timestamp::now(),
            user_name: None,
            item_name: None,
        }))
    }

    async fn list_all(&self) -> Result<Vec<Offer>, DomainError> {
        Ok(vec![])
    }

    async fn list_by_item(&self, _item_id: &ItemId) -> Result<Vec<Offer>, DomainError> {
        Ok(vec![])
    }

    async fn list_by_user(&self, _user_id: UserId) -> Result<Vec<Offer>, DomainError> {
        Ok(vec![])
    }

    async fn highest_for_item(&self, _item_id: &ItemId) -> Result<Option<Offer>, DomainError> {
        Ok(None)
    }

    async fn delete(&self, _id: OfferId) -> Result<bool, DomainError> {
        Ok(false)
    }
}
