//! Top-level HTTP router.
//!
//! ```text
//! GET  /health
//! /api/users... /api/items... catalog CRUD
//! /api/offers...            offer CRUD
//! /api/live/connections     watcher counts
//! GET  /ws/auctions         WebSocket upgrade
//! ```

use axum::{routing::get, Json, Router};
use http::HeaderValue;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::websocket::{websocket_router, WebSocketState};
use crate::config::ServerConfig;

use super::catalog::{catalog_routes, CatalogHandlers};
use super::live::{live_routes, LiveState};
use super::offer::{offer_routes, OfferHandlers};

pub fn create_router(
    catalog: CatalogHandlers,
    offers: OfferHandlers,
    ws_state: WebSocketState,
    config: &ServerConfig,
) -> Router {
    let live = LiveState::new(ws_state.registry.clone());

    let api = Router::new()
        .merge(catalog_routes(catalog))
        .merge(offer_routes(offers))
        .merge(live_routes(live));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(websocket_router().with_state(ws_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(config))
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// One CORS policy for every route. Permissive when no origins are configured.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryAuctionStore;
    use crate::adapters::websocket::{AuctionEventBridge, Broadcaster, TopicRegistry};
    use crate::application::handlers::catalog::{ItemCatalog, UserDirectory};
    use crate::application::handlers::offer::{CreateOfferHandler, DeleteOfferHandler, OfferQueries};
    use crate::config::LiveConfig;

    fn app(config: &ServerConfig) -> Router {
        let registry = Arc::new(TopicRegistry::new());
        let bridge = Arc::new(AuctionEventBridge::new(Arc::new(Broadcaster::new(
            registry.clone(),
        ))));
        let store = Arc::new(InMemoryAuctionStore::new());
        let catalog = CatalogHandlers::new(UserDirectory::new(store.clone()), ItemCatalog::new(store.clone()));
        let offers = OfferHandlers::new(
            Arc::new(CreateOfferHandler::new(store.clone(), bridge.clone())),
            Arc::new(DeleteOfferHandler::new(store.clone(), bridge)),
            OfferQueries::new(store),
        );
        create_router(
            catalog,
            offers,
            WebSocketState::new(registry, LiveConfig::default()),
            config,
        )
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(&ServerConfig::default())
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn api_routes_are_nested() {
        let router = app(&ServerConfig::default());

        let response = router
            .clone()
            .oneshot(Request::builder().uri("/api/offers").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/live/connections")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    async fn post(router: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn offer_can_be_placed_on_an_empty_store_after_registering_user_and_item() {
        let router = app(&ServerConfig::default());

        let (status, _) = post(&router, "/api/offers", r#"{"userId": 1, "itemId": "ITEM1", "amount": 10}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, user) = post(&router, "/api/users", r#"{"name": "Ada", "email": "ada@example.com"}"#).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, _) = post(&router, "/api/items", r#"{"id": "ITEM1", "name": "Lamp"}"#).await;
        assert_eq!(status, StatusCode::CREATED);

        let body = format!(r#"{{"userId": {}, "itemId": "ITEM1", "amount": 10}}"#, user["id"]);
        let (status, offer) = post(&router, "/api/offers", &body).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(offer["userName"], "Ada");
        assert_eq!(offer["itemName"], "Lamp");
    }

    #[tokio::test]
    async fn configured_origin_is_allowed() {
        let config = ServerConfig {
            cors_origins: Some("https://auctions.example".to_string()),
            ..Default::default()
        };

        let response = app(&config)
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header("origin", "https://auctions.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .map(|v| v.to_str().unwrap()),
            Some("https://auctions.example")
        );
    }

    #[test]
    fn invalid_origins_fall_back_to_permissive() {
        let config = ServerConfig {
            cors_origins: Some("bad\norigin".to_string()),
            ..Default::default()
        };
        // Builds without panicking.
        let _ = cors_layer(&config);
    }
}
