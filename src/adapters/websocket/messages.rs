//! WebSocket message types for live auction updates.
//!
//! Defines the protocol between server and connected clients:
//! - Server → Client: connection status, new/deleted offers, pongs
//! - Client → Server: pings

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ItemId, OfferId};
use crate::domain::offer::Offer;

// ============================================
// Server → Client Messages
// ============================================

/// All events that can be pushed from server to client.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Connection established and topic resolved.
    Connected(ConnectedMessage),

    /// An offer was placed on the watched item.
    NewOffer(NewOfferMessage),

    /// An offer on the watched item was withdrawn.
    OfferDeleted(OfferDeletedMessage),

    /// Heartbeat response.
    Pong,
}

/// Welcome message sent once a client has been registered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectedMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_id: Option<ItemId>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOfferMessage {
    pub offer: Offer,
    pub item_id: ItemId,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferDeletedMessage {
    pub offer_id: OfferId,
    pub item_id: ItemId,
}

impl ServerEvent {
    /// Welcome event for a client watching `topic` (or every auction when `None`).
    pub fn connected(topic: Option<&ItemId>) -> Self {
        let message = match topic {
            Some(_) => "Connected to auction updates",
            None => "Connected to all auctions",
        };
        ServerEvent::Connected(ConnectedMessage {
            item_id: topic.cloned(),
            message: message.to_string(),
        })
    }

    pub fn new_offer(offer: Offer) -> Self {
        let item_id = offer.item_id.clone();
        ServerEvent::NewOffer(NewOfferMessage { offer, item_id })
    }

    pub fn offer_deleted(offer_id: OfferId, item_id: ItemId) -> Self {
        ServerEvent::OfferDeleted(OfferDeletedMessage { offer_id, item_id })
    }

    /// Serialize into a text frame that can be shared across recipients.
    pub fn to_frame(&self) -> Result<Arc<str>, serde_json::Error> {
        serde_json::to_string(self).map(Arc::from)
    }
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Heartbeat request.
    Ping,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Timestamp, UserId};
    use rust_decimal::Decimal;
    use serde_json::{json, Value};

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    fn parse(event: &ServerEvent) -> Value {
        serde_json::from_str(&event.to_frame().unwrap()).unwrap()
    }

    #[test]
    fn connected_for_item_includes_item_id() {
        let value = parse(&ServerEvent::connected(Some(&item("ITEM1"))));
        assert_eq!(
            value,
            json!({
                "type": "connected",
                "itemId": "ITEM1",
                "message": "Connected to auction updates"
            })
        );
    }

    #[test]
    fn connected_global_omits_item_id() {
        let value = parse(&ServerEvent::connected(None));
        assert_eq!(
            value,
            json!({"type": "connected", "message": "Connected to all auctions"})
        );
    }

    #[test]
    fn pong_is_bare_type_tag() {
        assert_eq!(&*ServerEvent::Pong.to_frame().unwrap(), r#"{"type":"pong"}"#);
    }

    #[test]
    fn new_offer_carries_offer_and_item() {
        let offer = Offer {
            id: OfferId::new(5),
            user_id: UserId::new(1),
            item_id: item("ITEM1"),
            amount: Decimal::new(100, 0),
            created_at: Timestamp::now(),
            user_name: None,
            item_name: None,
        };

        let value = parse(&ServerEvent::new_offer(offer));
        assert_eq!(value["type"], "new_offer");
        assert_eq!(value["itemId"], "ITEM1");
        assert_eq!(value["offer"]["id"], 5);
        assert_eq!(value["offer"]["amount"], 100.0);
    }

    #[test]
    fn offer_deleted_serializes_correctly() {
        let value = parse(&ServerEvent::offer_deleted(OfferId::new(7), item("ITEM2")));
        assert_eq!(
            value,
            json!({"type": "offer_deleted", "offerId": 7, "itemId": "ITEM2"})
        );
    }

    #[test]
    fn client_message_deserializes_ping() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn client_message_rejects_unknown_type() {
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type": "bid"}"#).is_err());
    }
}
