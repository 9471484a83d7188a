//! Fan-out of server events to every session of one topic.
//!
//! # Broadcast Flow
//!
//! ```text
//! ServerEvent
//!      │  serialize once
//!      ▼
//! Arc<str> frame ──► snapshot sessions (read lock, released)
//!      │
//!      ▼
//! concurrent sends, each bounded by the session's send timeout
//!      │
//!      ▼
//! batch-evict failed sessions (one write lock)
//! ```

use std::sync::Arc;

use futures::future::join_all;

use crate::domain::foundation::ItemId;

use super::messages::ServerEvent;
use super::registry::TopicRegistry;
use super::session::{ClientId, Session};

/// Outcome of one broadcast, for logging and diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    /// Sessions in the snapshot.
    pub recipients: usize,
    /// Sessions the frame was queued for.
    pub delivered: usize,
    /// Sessions removed from the registry after failing.
    pub evicted: usize,
}

/// Pushes events to the sessions registered in a [`TopicRegistry`].
pub struct Broadcaster {
    registry: Arc<TopicRegistry>,
}

impl Broadcaster {
    pub fn new(registry: Arc<TopicRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<TopicRegistry> {
        &self.registry
    }

    /// Deliver `event` to every session watching `item_id`.
    ///
    /// A topic nobody watches is a silent no-op.
    pub async fn broadcast_to_topic(&self, item_id: &ItemId, event: &ServerEvent) -> BroadcastReport {
        self.broadcast(Some(item_id), event).await
    }

    /// Deliver `event` to every global session.
    pub async fn broadcast_to_all(&self, event: &ServerEvent) -> BroadcastReport {
        self.broadcast(None, event).await
    }

    async fn broadcast(&self, topic: Option<&ItemId>, event: &ServerEvent) -> BroadcastReport {
        let frame = match event.to_frame() {
            Ok(frame) => frame,
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize server event");
                return BroadcastReport::default();
            }
        };

        let sessions = self.registry.sessions_for(topic).await;
        if sessions.is_empty() {
            return BroadcastReport::default();
        }

        let outcomes = join_all(sessions.iter().map(|session| deliver(session, frame.clone()))).await;

        let failed: Vec<ClientId> = outcomes.into_iter().filter_map(Result::err).collect();
        let evicted = self.registry.evict(topic, &failed).await;

        let report = BroadcastReport {
            recipients: sessions.len(),
            delivered: sessions.len() - failed.len(),
            evicted,
        };

        if evicted > 0 {
            tracing::debug!(
                topic = ?topic.map(ItemId::as_str),
                evicted,
                "Evicted unreachable sessions after broadcast"
            );
        }

        report
    }
}

/// Queue `frame` on one session, closing it on failure.
async fn deliver(session: &Arc<Session>, frame: Arc<str>) -> Result<(), ClientId> {
    if !session.is_open() {
        session.close();
        return Err(session.id());
    }

    match session.send(frame).await {
        Ok(()) => Ok(()),
        Err(e) => {
            tracing::warn!(client_id = %session.id(), error = %e, "Dropping session after failed send");
            session.close();
            Err(session.id())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::session::Frame;
    use crate::domain::foundation::OfferId;
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn item(id: &str) -> ItemId {
        ItemId::new(id).unwrap()
    }

    async fn connect(
        registry: &TopicRegistry,
        topic: Option<&str>,
    ) -> (Arc<Session>, mpsc::Receiver<Frame>) {
        let (session, rx) = Session::open(topic.map(item), 8, Duration::from_millis(50));
        registry.subscribe(session.topic(), session.clone()).await;
        (session, rx)
    }

    fn setup() -> (Arc<TopicRegistry>, Broadcaster) {
        let registry = Arc::new(TopicRegistry::new());
        let broadcaster = Broadcaster::new(registry.clone());
        (registry, broadcaster)
    }

    #[tokio::test]
    async fn delivers_identical_frame_to_every_topic_session() {
        let (registry, broadcaster) = setup();
        let (_a, mut rx_a) = connect(&registry, Some("ITEM1")).await;
        let (_b, mut rx_b) = connect(&registry, Some("ITEM1")).await;

        let event = ServerEvent::offer_deleted(OfferId::new(3), item("ITEM1"));
        let report = broadcaster.broadcast_to_topic(&item("ITEM1"), &event).await;

        assert_eq!(report, BroadcastReport { recipients: 2, delivered: 2, evicted: 0 });
        let a = rx_a.try_recv().unwrap();
        let b = rx_b.try_recv().unwrap();
        assert_eq!(a, b);
        assert_eq!(a, Frame::Text(event.to_frame().unwrap()));
    }

    #[tokio::test]
    async fn other_topics_and_global_receive_nothing() {
        let (registry, broadcaster) = setup();
        let (_a, mut rx_a) = connect(&registry, Some("ITEM1")).await;
        let (_b, mut rx_b) = connect(&registry, Some("ITEM2")).await;
        let (_g, mut rx_g) = connect(&registry, None).await;

        let event = ServerEvent::offer_deleted(OfferId::new(3), item("ITEM1"));
        broadcaster.broadcast_to_topic(&item("ITEM1"), &event).await;

        assert!(rx_a.try_recv().is_ok());
        assert!(rx_b.try_recv().is_err());
        assert!(rx_g.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_to_all_reaches_only_global_sessions() {
        let (registry, broadcaster) = setup();
        let (_a, mut rx_a) = connect(&registry, Some("ITEM1")).await;
        let (_g, mut rx_g) = connect(&registry, None).await;

        let report = broadcaster.broadcast_to_all(&ServerEvent::Pong).await;

        assert_eq!(report.delivered, 1);
        assert!(rx_g.try_recv().is_ok());
        assert!(rx_a.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_session_is_evicted_and_others_still_receive() {
        let (registry, broadcaster) = setup();
        let (dead, dead_rx) = connect(&registry, Some("ITEM1")).await;
        let (_live, mut live_rx) = connect(&registry, Some("ITEM1")).await;
        drop(dead_rx);

        let event = ServerEvent::offer_deleted(OfferId::new(1), item("ITEM1"));
        let report = broadcaster.broadcast_to_topic(&item("ITEM1"), &event).await;

        assert_eq!(report, BroadcastReport { recipients: 2, delivered: 1, evicted: 1 });
        assert!(live_rx.try_recv().is_ok());
        assert!(!registry.contains(&dead.id()).await);
        assert_eq!(registry.count_for(Some(&item("ITEM1"))).await, 1);
    }

    #[tokio::test]
    async fn last_failed_session_removes_topic_key() {
        let (registry, broadcaster) = setup();
        let (_s, rx) = connect(&registry, Some("ITEM1")).await;
        drop(rx);

        let event = ServerEvent::offer_deleted(OfferId::new(1), item("ITEM1"));
        broadcaster.broadcast_to_topic(&item("ITEM1"), &event).await;

        assert_eq!(registry.count_for(Some(&item("ITEM1"))).await, 0);
        assert!(registry.active_topics().await.is_empty());
    }

    #[tokio::test]
    async fn stuck_session_times_out_without_blocking_others() {
        let registry = Arc::new(TopicRegistry::new());
        let broadcaster = Broadcaster::new(registry.clone());

        let (stuck, _stuck_rx) = Session::open(Some(item("ITEM1")), 1, Duration::from_millis(30));
        stuck.send(Arc::from("filler")).await.unwrap();
        registry.subscribe(stuck.topic(), stuck.clone()).await;
        let (_live, mut live_rx) = connect(&registry, Some("ITEM1")).await;

        let event = ServerEvent::offer_deleted(OfferId::new(1), item("ITEM1"));
        let report = broadcaster.broadcast_to_topic(&item("ITEM1"), &event).await;

        assert_eq!(report.evicted, 1);
        assert!(!stuck.is_open());
        assert!(live_rx.try_recv().is_ok());
    }

    #[tokio::test]
    async fn evicted_session_signals_its_connection_to_shut_down() {
        let registry = Arc::new(TopicRegistry::new());
        let broadcaster = Broadcaster::new(registry.clone());

        let (stuck, _stuck_rx) = Session::open(Some(item("ITEM1")), 1, Duration::from_millis(20));
        stuck.send(Arc::from("filler")).await.unwrap();
        registry.subscribe(stuck.topic(), stuck.clone()).await;

        let shutdown = tokio::spawn({
            let stuck = stuck.clone();
            async move { stuck.closed().await }
        });

        let event = ServerEvent::offer_deleted(OfferId::new(1), item("ITEM1"));
        broadcaster.broadcast_to_topic(&item("ITEM1"), &event).await;

        tokio::time::timeout(Duration::from_secs(1), shutdown)
            .await
            .expect("evicted session never signalled close")
            .unwrap();
        assert!(!registry.contains(&stuck.id()).await);
    }

    #[tokio::test]
    async fn unknown_topic_is_silent_noop() {
        let (_registry, broadcaster) = setup();
        let report = broadcaster
            .broadcast_to_topic(&item("NOBODY"), &ServerEvent::Pong)
            .await;
        assert_eq!(report, BroadcastReport::default());
    }

    #[tokio::test]
    async fn events_arrive_in_issue_order() {
        let (registry, broadcaster) = setup();
        let (_s, mut rx) = connect(&registry, Some("ITEM1")).await;

        for id in 1..=3 {
            let event = ServerEvent::offer_deleted(OfferId::new(id), item("ITEM1"));
            broadcaster.broadcast_to_topic(&item("ITEM1"), &event).await;
        }

        for id in 1..=3 {
            let expected = ServerEvent::offer_deleted(OfferId::new(id), item("ITEM1"));
            assert_eq!(rx.try_recv().unwrap(), Frame::Text(expected.to_frame().unwrap()));
        }
    }
}
