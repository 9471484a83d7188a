//! DeleteOfferHandler - Command handler for withdrawing offers.

use std::sync::Arc;

use crate::domain::foundation::{ItemId, OfferId};
use crate::domain::offer::OfferError;
use crate::ports::{OfferNotifier, OfferRepository};

/// Command to delete an offer.
#[derive(Debug, Clone, Copy)]
pub struct DeleteOfferCommand {
    pub offer_id: OfferId,
}

/// Result of a successful deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteOfferResult {
    pub offer_id: OfferId,
    pub item_id: ItemId,
}

/// Handler for deleting offers.
///
/// The offer is read first so the deletion event can name its item.
/// Watchers are notified only if a row was actually removed.
pub struct DeleteOfferHandler {
    repository: Arc<dyn OfferRepository>,
    notifier: Arc<dyn OfferNotifier>,
}

impl DeleteOfferHandler {
    pub fn new(repository: Arc<dyn OfferRepository>, notifier: Arc<dyn OfferNotifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn handle(&self, cmd: DeleteOfferCommand) -> Result<DeleteOfferResult, OfferError> {
        let offer = self
            .repository
            .find_by_id(cmd.offer_id)
            .await?
            .ok_or(OfferError::NotFound(cmd.offer_id))?;

        if !self.repository.delete(cmd.offer_id).await? {
            // Removed concurrently by another request
            return Err(OfferError::NotFound(cmd.offer_id));
        }
        tracing::info!(offer_id = %cmd.offer_id, item_id = %offer.item_id, "Offer deleted");

        self.notifier
            .on_offer_deleted(cmd.offer_id, &offer.item_id)
            .await;

        Ok(DeleteOfferResult {
            offer_id: cmd.offer_id,
            item_id: offer.item_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryAuctionStore;
    use crate::application::handlers::offer::test_support::{
        Notification, RecordingNotifier, VanishingOfferRepository,
    };
    use crate::domain::foundation::UserId;
    use crate::domain::offer::NewOffer;
    use rust_decimal::Decimal;

    fn item() -> ItemId {
        ItemId::new("ITEM1").unwrap()
    }

    async fn repo_with_offer() -> (Arc<InMemoryAuctionStore>, OfferId) {
        let repo = Arc::new(InMemoryAuctionStore::new());
        repo.add_user(UserId::new(1), "alice").await;
        repo.add_item(item(), "Lamp").await;
        let offer = repo
            .insert(NewOffer::new(UserId::new(1), item(), Decimal::TEN).unwrap())
            .await
            .unwrap();
        (repo, offer.id)
    }

    #[tokio::test]
    async fn deletes_and_notifies_with_item() {
        let (repo, id) = repo_with_offer().await;
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = DeleteOfferHandler::new(repo.clone(), notifier.clone());

        let result = handler.handle(DeleteOfferCommand { offer_id: id }).await.unwrap();

        assert_eq!(result, DeleteOfferResult { offer_id: id, item_id: item() });
        assert_eq!(repo.offer_count().await, 0);
        assert_eq!(notifier.notifications(), vec![Notification::Deleted(id, item())]);
    }

    #[tokio::test]
    async fn missing_offer_is_not_found_and_silent() {
        let (repo, _) = repo_with_offer().await;
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = DeleteOfferHandler::new(repo, notifier.clone());

        let missing = OfferId::new(404);
        let result = handler.handle(DeleteOfferCommand { offer_id: missing }).await;

        assert_eq!(result, Err(OfferError::NotFound(missing)));
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn no_notification_when_no_row_was_deleted() {
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = DeleteOfferHandler::new(Arc::new(VanishingOfferRepository), notifier.clone());

        let result = handler
            .handle(DeleteOfferCommand { offer_id: OfferId::new(1) })
            .await;

        assert_eq!(result, Err(OfferError::NotFound(OfferId::new(1))));
        assert!(notifier.notifications().is_empty());
    }
}
