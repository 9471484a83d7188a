//! OfferRepository port - Persistence interface for offers.
//!
//! Reads return offers joined with their user and item names.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ItemId, OfferId, UserId};
use crate::domain::offer::{NewOffer, Offer};

/// Port for storing and querying offers.
///
/// A failed insert because the user or item does not exist is reported
/// with `ErrorCode::ForeignKeyViolation`.
#[async_trait]
pub trait OfferRepository: Send + Sync {
    /// Insert a new offer and return it as stored.
    async fn insert(&self, offer: NewOffer) -> Result<Offer, DomainError>;

    /// Find an offer by ID.
    async fn find_by_id(&self, id: OfferId) -> Result<Option<Offer>, DomainError>;

    /// All offers, newest first.
    async fn list_all(&self) -> Result<Vec<Offer>, DomainError>;

    /// Offers for an item, highest amount first, earliest first on ties.
    async fn list_by_item(&self, item_id: &ItemId) -> Result<Vec<Offer>, DomainError>;

    /// Offers placed by a user, newest first.
    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Offer>, DomainError>;

    /// The winning offer for an item, if any.
    async fn highest_for_item(&self, item_id: &ItemId) -> Result<Option<Offer>, DomainError>;

    /// Delete an offer. Returns false if no row was removed.
    async fn delete(&self, id: OfferId) -> Result<bool, DomainError>;
}
