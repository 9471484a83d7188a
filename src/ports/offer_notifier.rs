//! OfferNotifier port - Live notification hook on the offer write-path.
//!
//! The offer handlers call this after the database mutation has committed.
//! Notification is fire-and-forget: methods return nothing, so delivery
//! problems can never fail or roll back the write that triggered them.

use async_trait::async_trait;

use crate::domain::foundation::{ItemId, OfferId};
use crate::domain::offer::Offer;

/// Port notified after offers are created or deleted.
#[async_trait]
pub trait OfferNotifier: Send + Sync {
    /// Called after a new offer has been committed.
    async fn on_offer_created(&self, offer: &Offer);

    /// Called after an offer has been deleted.
    async fn on_offer_deleted(&self, offer_id: OfferId, item_id: &ItemId);

    /// Name for logging.
    fn name(&self) -> &'static str;
}
