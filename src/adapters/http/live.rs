//! Live connection diagnostics.
//!
//! `GET /api/live/connections` reports how many watchers each item has.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::adapters::websocket::{resolve_topic, TopicRegistry};

#[derive(Clone)]
pub struct LiveState {
    registry: Arc<TopicRegistry>,
}

impl LiveState {
    pub fn new(registry: Arc<TopicRegistry>) -> Self {
        Self { registry }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ConnectionsQuery {
    #[serde(rename = "itemId")]
    pub item_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicConnections {
    pub item_id: String,
    pub connections: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionsSummary {
    pub total: usize,
    pub topics: Vec<TopicConnections>,
    pub global: usize,
}

/// GET /api/live/connections[?itemId=X]
pub async fn connections(
    State(state): State<LiveState>,
    Query(query): Query<ConnectionsQuery>,
) -> Response {
    if let Some(item_id) = resolve_topic(query.item_id.as_deref()) {
        let connections = state.registry.count_for(Some(&item_id)).await;
        let body = TopicConnections {
            item_id: item_id.to_string(),
            connections,
        };
        return (StatusCode::OK, Json(body)).into_response();
    }

    let mut items = state.registry.active_topics().await;
    items.sort_by(|a, b| a.as_str().cmp(b.as_str()));

    let mut topics = Vec::with_capacity(items.len());
    for item_id in items {
        let connections = state.registry.count_for(Some(&item_id)).await;
        // Topic may have emptied since the snapshot.
        if connections > 0 {
            topics.push(TopicConnections {
                item_id: item_id.to_string(),
                connections,
            });
        }
    }

    let summary = ConnectionsSummary {
        total: state.registry.total_count().await,
        topics,
        global: state.registry.count_for(None).await,
    };
    (StatusCode::OK, Json(summary)).into_response()
}

pub fn live_routes(state: LiveState) -> Router {
    Router::new()
        .route("/live/connections", get(connections))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::adapters::websocket::Session;
    use crate::domain::foundation::ItemId;

    async fn watch(registry: &TopicRegistry, item: Option<&str>) {
        let topic = item.map(|i| ItemId::new(i).unwrap());
        let (session, rx) = Session::open(topic.clone(), 8, Duration::from_millis(50));
        // Receiver dropped on purpose; counts only.
        drop(rx);
        registry.subscribe(topic.as_ref(), session).await;
    }

    async fn get_json(app: Router, uri: &str) -> Value {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn summary_lists_topics_and_global() {
        let registry = Arc::new(TopicRegistry::new());
        watch(&registry, Some("ITEM2")).await;
        watch(&registry, Some("ITEM1")).await;
        watch(&registry, Some("ITEM1")).await;
        watch(&registry, None).await;

        let body = get_json(live_routes(LiveState::new(registry)), "/live/connections").await;

        assert_eq!(
            body,
            json!({
                "total": 4,
                "topics": [
                    {"itemId": "ITEM1", "connections": 2},
                    {"itemId": "ITEM2", "connections": 1}
                ],
                "global": 1
            })
        );
    }

    #[tokio::test]
    async fn item_filter_reports_single_topic() {
        let registry = Arc::new(TopicRegistry::new());
        watch(&registry, Some("ITEM1")).await;

        let app = live_routes(LiveState::new(registry));
        let body = get_json(app.clone(), "/live/connections?itemId=ITEM1").await;
        assert_eq!(body, json!({"itemId": "ITEM1", "connections": 1}));

        let body = get_json(app, "/live/connections?itemId=ITEM9").await;
        assert_eq!(body, json!({"itemId": "ITEM9", "connections": 0}));
    }

    #[tokio::test]
    async fn empty_registry_reports_zero() {
        let registry = Arc::new(TopicRegistry::new());
        let body = get_json(live_routes(LiveState::new(registry)), "/live/connections").await;
        assert_eq!(body, json!({"total": 0, "topics": [], "global": 0}));
    }
}
