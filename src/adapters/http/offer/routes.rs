//! HTTP routes for offer endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    create_offer, delete_offer, get_offer, highest_offer, list_item_offers, list_offers,
    list_user_offers, OfferHandlers,
};

/// Creates the offer router. Mounted under `/api`.
pub fn offer_routes(handlers: OfferHandlers) -> Router {
    Router::new()
        .route("/offers", get(list_offers).post(create_offer))
        .route("/offers/:id", get(get_offer).delete(delete_offer))
        .route("/items/:id/offers", get(list_item_offers))
        .route("/items/:id/highest-offer", get(highest_offer))
        .route("/users/:id/offers", get(list_user_offers))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::adapters::memory::InMemoryAuctionStore;
    use crate::application::handlers::offer::test_support::{Notification, RecordingNotifier};
    use crate::application::handlers::offer::{CreateOfferHandler, DeleteOfferHandler, OfferQueries};
    use crate::domain::foundation::{ItemId, OfferId, UserId};

    async fn app() -> (Router, Arc<RecordingNotifier>) {
        let repo = Arc::new(InMemoryAuctionStore::new());
        repo.add_user(UserId::new(1), "alice").await;
        repo.add_item(ItemId::new("ITEM1").unwrap(), "Lamp").await;
        let notifier = Arc::new(RecordingNotifier::new());

        let handlers = OfferHandlers::new(
            Arc::new(CreateOfferHandler::new(repo.clone(), notifier.clone())),
            Arc::new(DeleteOfferHandler::new(repo.clone(), notifier.clone())),
            OfferQueries::new(repo),
        );
        (offer_routes(handlers), notifier)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header("content-type", "application/json");
        }
        let request = builder
            .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    const VALID_OFFER: &str = r#"{"userId": 1, "itemId": "ITEM1", "amount": 100}"#;

    #[tokio::test]
    async fn post_offer_returns_201_and_notifies() {
        let (app, notifier) = app().await;

        let (status, body) = send(&app, Method::POST, "/offers", Some(VALID_OFFER)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], 1);
        assert_eq!(body["itemId"], "ITEM1");
        assert_eq!(body["userName"], "alice");
        assert_eq!(notifier.notifications(), vec![Notification::Created(OfferId::new(1))]);
    }

    #[tokio::test]
    async fn post_offer_for_unknown_item_is_400() {
        let (app, notifier) = app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/offers",
            Some(r#"{"userId": 1, "itemId": "NOPE", "amount": 5}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "FOREIGN_KEY_VIOLATION");
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn get_offer_with_bad_id_is_400() {
        let (app, _) = app().await;
        let (status, body) = send(&app, Method::GET, "/offers/abc", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn delete_offer_returns_message_and_notifies() {
        let (app, notifier) = app().await;
        send(&app, Method::POST, "/offers", Some(VALID_OFFER)).await;

        let (status, body) = send(&app, Method::DELETE, "/offers/1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Offer deleted successfully");
        assert_eq!(body["id"], 1);
        assert_eq!(notifier.notifications().len(), 2);
    }

    #[tokio::test]
    async fn delete_missing_offer_is_404_without_notification() {
        let (app, notifier) = app().await;

        let (status, body) = send(&app, Method::DELETE, "/offers/42", None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "OFFER_NOT_FOUND");
        assert!(notifier.notifications().is_empty());
    }

    #[tokio::test]
    async fn item_and_user_listings() {
        let (app, _) = app().await;
        send(&app, Method::POST, "/offers", Some(VALID_OFFER)).await;

        let (status, body) = send(&app, Method::GET, "/items/ITEM1/offers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (status, body) = send(&app, Method::GET, "/users/1/offers", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (status, _) = send(&app, Method::GET, "/users/x/offers", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn highest_offer_is_404_until_an_offer_exists() {
        let (app, _) = app().await;

        let (status, _) = send(&app, Method::GET, "/items/ITEM1/highest-offer", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        send(&app, Method::POST, "/offers", Some(VALID_OFFER)).await;
        let (status, body) = send(&app, Method::GET, "/items/ITEM1/highest-offer", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["amount"], 100.0);
    }
}
