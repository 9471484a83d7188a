//! CreateOfferHandler - Command handler for placing offers.

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::foundation::{ItemId, UserId};
use crate::domain::offer::{NewOffer, Offer, OfferError};
use crate::ports::{OfferNotifier, OfferRepository};

/// Command to place an offer on an item.
#[derive(Debug, Clone)]
pub struct CreateOfferCommand {
    pub user_id: UserId,
    pub item_id: String,
    pub amount: Decimal,
}

/// Handler for placing offers.
///
/// Watchers of the item are notified only after the insert has committed;
/// notification never affects the result.
pub struct CreateOfferHandler {
    repository: Arc<dyn OfferRepository>,
    notifier: Arc<dyn OfferNotifier>,
}

impl CreateOfferHandler {
    pub fn new(repository: Arc<dyn OfferRepository>, notifier: Arc<dyn OfferNotifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: CreateOfferCommand) -> Result<Offer, OfferError> {
        // 1. Validate input
        let item_id = ItemId::new(cmd.item_id)?;
        let new_offer = NewOffer::new(cmd.user_id, item_id, cmd.amount)?;

        // 2. Persist
        let offer = self.repository.insert(new_offer).await?;
        tracing::info!(offer_id = %offer.id, item_id = %offer.item_id, "Offer created");

        // 3. Notify watchers
        self.notifier.on_offer_created(&offer).await;

        Ok(offer)
    }
}
