//! WebSocket adapters for live auction updates.
//!
//! Pushes offer changes to every client watching the affected item.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Offer write-path (HTTP handlers)                    │
//! │        CreateOfferHandler │ DeleteOfferHandler (after commit)        │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ OfferNotifier
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                    AuctionEventBridge                                │
//! │   - Builds new_offer / offer_deleted events                         │
//! │   - Hands them to the Broadcaster for the offer's item              │
//! └─────────────────────────────────────────────────────────────────────┘
//!                                     │
//!                                     │ broadcast_to_topic
//!                                     ▼
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      TopicRegistry                                   │
//! │   Topic: ITEM1         Topic: ITEM2         Global                   │
//! │   ├── client-a         ├── client-d         ├── client-g            │
//! │   ├── client-b         └── client-e         └── client-h            │
//! │   └── client-c                                                       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Components
//!
//! - [`messages`] - WebSocket message protocol types
//! - [`session`] - Per-connection send handle
//! - [`registry`] - Topic membership
//! - [`broadcaster`] - Serialize-once fan-out with eviction
//! - [`lifecycle`] - Connection state machine
//! - [`handler`] - Axum WebSocket upgrade handler
//! - [`event_bridge`] - Bridge between the offer write-path and the broadcaster

pub mod broadcaster;
pub mod event_bridge;
pub mod handler;
pub mod lifecycle;
pub mod messages;
pub mod registry;
pub mod session;

pub use broadcaster::{BroadcastReport, Broadcaster};
pub use event_bridge::AuctionEventBridge;
pub use handler::{resolve_topic, websocket_router, ws_handler, ConnectParams, WebSocketState};
pub use lifecycle::{ConnectionLifecycle, ConnectionState};
pub use messages::{
    ClientMessage, ConnectedMessage, NewOfferMessage, OfferDeletedMessage, ServerEvent,
};
pub use registry::TopicRegistry;
pub use session::{ClientId, Frame, SendError, Session};
