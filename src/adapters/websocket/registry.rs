//! Topic registry: which live sessions watch which auction item.
//!
//! # Architecture
//!
//! ```text
//! Topic: ITEM1        Topic: ITEM2        Global
//! ├── client-a        ├── client-d        ├── client-x
//! ├── client-b        └── client-e        └── client-y
//! └── client-c
//! ```
//!
//! A session lives in exactly one of these sets. Item entries disappear as
//! soon as their last session leaves, so the key set always equals the set
//! of items that currently have watchers.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::foundation::ItemId;

use super::session::{ClientId, Session};

#[derive(Default)]
struct Topics {
    by_item: HashMap<ItemId, HashMap<ClientId, Arc<Session>>>,
    global: HashMap<ClientId, Arc<Session>>,
    /// client_id → topic for O(1) membership checks.
    membership: HashMap<ClientId, Option<ItemId>>,
}

impl Topics {
    fn insert(&mut self, topic: Option<&ItemId>, session: Arc<Session>) {
        let id = session.id();
        match topic {
            Some(item_id) => {
                self.by_item
                    .entry(item_id.clone())
                    .or_default()
                    .insert(id, session);
            }
            None => {
                self.global.insert(id, session);
            }
        }
        self.membership.insert(id, topic.cloned());
    }

    fn remove(&mut self, topic: Option<&ItemId>, id: &ClientId) -> bool {
        let removed = match topic {
            Some(item_id) => {
                let Some(sessions) = self.by_item.get_mut(item_id) else {
                    return false;
                };
                let removed = sessions.remove(id).is_some();
                if sessions.is_empty() {
                    self.by_item.remove(item_id);
                }
                removed
            }
            None => self.global.remove(id).is_some(),
        };

        if removed {
            self.membership.remove(id);
        }
        removed
    }

    fn set(&self, topic: Option<&ItemId>) -> Option<&HashMap<ClientId, Arc<Session>>> {
        match topic {
            Some(item_id) => self.by_item.get(item_id),
            None => Some(&self.global),
        }
    }
}

/// Concurrent mapping from item to subscribed sessions, plus the global set.
///
/// # Thread Safety
///
/// A single `RwLock` guards the whole structure. Broadcast snapshots take
/// the read side; subscribe, unsubscribe and evict take the write side.
/// No method holds the lock across an await on a session send.
pub struct TopicRegistry {
    topics: RwLock<Topics>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self {
            topics: RwLock::new(Topics::default()),
        }
    }

    /// Register `session` under `topic` (or the global set when `None`).
    ///
    /// Registering a session again under the same topic is a no-op; under a
    /// different topic it moves the session.
    pub async fn subscribe(&self, topic: Option<&ItemId>, session: Arc<Session>) {
        let mut topics = self.topics.write().await;
        let id = session.id();

        if let Some(current) = topics.membership.get(&id).cloned() {
            if current.as_ref() == topic {
                return;
            }
            topics.remove(current.as_ref(), &id);
        }

        topics.insert(topic, session);
    }

    /// Remove a session from `topic`. Safe to call when it is already gone.
    ///
    /// Returns true if the session was registered there.
    pub async fn unsubscribe(&self, topic: Option<&ItemId>, client_id: &ClientId) -> bool {
        self.topics.write().await.remove(topic, client_id)
    }

    /// Remove a batch of sessions from `topic` under one write lock.
    ///
    /// Returns how many were actually removed.
    pub async fn evict(&self, topic: Option<&ItemId>, client_ids: &[ClientId]) -> usize {
        if client_ids.is_empty() {
            return 0;
        }
        let mut topics = self.topics.write().await;
        client_ids
            .iter()
            .filter(|id| topics.remove(topic, id))
            .count()
    }

    /// Snapshot of the sessions currently registered under `topic`.
    pub async fn sessions_for(&self, topic: Option<&ItemId>) -> Vec<Arc<Session>> {
        self.topics
            .read()
            .await
            .set(topic)
            .map(|sessions| sessions.values().cloned().collect())
            .unwrap_or_default()
    }

    /// Number of sessions registered under `topic`.
    pub async fn count_for(&self, topic: Option<&ItemId>) -> usize {
        self.topics
            .read()
            .await
            .set(topic)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    /// Number of sessions across every topic, global included.
    pub async fn total_count(&self) -> usize {
        self.topics.read().await.membership.len()
    }

    /// Items that currently have at least one watcher.
    pub async fn active_topics(&self) -> Vec<ItemId> {
        self.topics.read().await.by_item.keys().cloned().collect()
    }

    /// Whether the session is registered anywhere.
    pub async fn contains(&self, client_id: &ClientId) -> bool {
        self.topics.read().await.membership.contains_key(client_id)
    }
}

impl Default for TopicRegistry {
    fn default() -> Self {
        Self::new()
    }
}
