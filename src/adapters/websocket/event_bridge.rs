//! Event bridge connecting the offer write-path to WebSocket watchers.
//!
//! # Event Flow
//!
//! ```text
//! Offer committed / deleted
//!          │
//!          ▼
//! ┌────────────────────┐
//! │ AuctionEventBridge │
//! │  (OfferNotifier)   │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Build ServerEvent │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Broadcast to the  │
//! │  item's watchers   │
//! └────────────────────┘
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{ItemId, OfferId};
use crate::domain::offer::Offer;
use crate::ports::OfferNotifier;

use super::broadcaster::Broadcaster;
use super::messages::ServerEvent;

/// `OfferNotifier` that pushes offer changes to the item's live sessions.
pub struct AuctionEventBridge {
    broadcaster: Arc<Broadcaster>,
}

impl AuctionEventBridge {
    pub fn new(broadcaster: Arc<Broadcaster>) -> Self {
        Self { broadcaster }
    }

    /// Create as an Arc (for sharing with the offer handlers).
    pub fn new_shared(broadcaster: Arc<Broadcaster>) -> Arc<Self> {
        Arc::new(Self::new(broadcaster))
    }
}

#[async_trait]
impl OfferNotifier for AuctionEventBridge {
    async fn on_offer_created(&self, offer: &Offer) {
        let item_id = offer.item_id.clone();
        let report = self
            .broadcaster
            .broadcast_to_topic(&item_id, &ServerEvent::new_offer(offer.clone()))
            .await;

        tracing::info!(
            offer_id = %offer.id,
            item_id = %item_id,
            delivered = report.delivered,
            evicted = report.evicted,
            "Broadcast new offer"
        );
    }

    async fn on_offer_deleted(&self, offer_id: OfferId, item_id: &ItemId) {
        let report = self
            .broadcaster
            .broadcast_to_topic(item_id, &ServerEvent::offer_deleted(offer_id, item_id.clone()))
            .await;

        tracing::info!(
            offer_id = %offer_id,
            item_id = %item_id,
            delivered = report.delivered,
            evicted = report.evicted,
            "Broadcast offer deletion"
        );
    }

    fn name(&self) -> &'static str {
        "AuctionEventBridge"
    }
}
