//! HTTP handlers for offer endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::application::handlers::offer::{
    CreateOfferCommand, CreateOfferHandler, DeleteOfferCommand, DeleteOfferHandler, OfferQueries,
};
use crate::domain::foundation::{ItemId, OfferId, UserId};
use crate::domain::offer::OfferError;

use super::dto::{CreateOfferRequest, DeleteOfferResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct OfferHandlers {
    create_handler: Arc<CreateOfferHandler>,
    delete_handler: Arc<DeleteOfferHandler>,
    queries: OfferQueries,
}

impl OfferHandlers {
    pub fn new(
        create_handler: Arc<CreateOfferHandler>,
        delete_handler: Arc<DeleteOfferHandler>,
        queries: OfferQueries,
    ) -> Self {
        Self {
            create_handler,
            delete_handler,
            queries,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/offers - All offers, newest first
pub async fn list_offers(State(handlers): State<OfferHandlers>) -> Response {
    match handlers.queries.list_all().await {
        Ok(offers) => (StatusCode::OK, Json(offers)).into_response(),
        Err(e) => handle_offer_error(e),
    }
}

/// POST /api/offers - Place an offer and notify the item's watchers
pub async fn create_offer(
    State(handlers): State<OfferHandlers>,
    Json(req): Json<CreateOfferRequest>,
) -> Response {
    let cmd = CreateOfferCommand {
        user_id: UserId::new(req.user_id),
        item_id: req.item_id,
        amount: req.amount,
    };

    match handlers.create_handler.handle(cmd).await {
        Ok(offer) => (StatusCode::CREATED, Json(offer)).into_response(),
        Err(e) => handle_offer_error(e),
    }
}

/// GET /api/offers/:id - Get one offer
pub async fn get_offer(
    State(handlers): State<OfferHandlers>,
    Path(offer_id): Path<String>,
) -> Response {
    let offer_id = match offer_id.parse::<OfferId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid offer ID"),
    };

    match handlers.queries.get(offer_id).await {
        Ok(offer) => (StatusCode::OK, Json(offer)).into_response(),
        Err(e) => handle_offer_error(e),
    }
}

/// DELETE /api/offers/:id - Withdraw an offer and notify the item's watchers
pub async fn delete_offer(
    State(handlers): State<OfferHandlers>,
    Path(offer_id): Path<String>,
) -> Response {
    let offer_id = match offer_id.parse::<OfferId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid offer ID"),
    };

    match handlers.delete_handler.handle(DeleteOfferCommand { offer_id }).await {
        Ok(result) => {
            let response = DeleteOfferResponse {
                message: "Offer deleted successfully".to_string(),
                id: result.offer_id.as_i32(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_offer_error(e),
    }
}

/// GET /api/items/:id/offers - Offers on an item, highest first
pub async fn list_item_offers(
    State(handlers): State<OfferHandlers>,
    Path(item_id): Path<String>,
) -> Response {
    let item_id = match ItemId::new(item_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers.queries.list_by_item(&item_id).await {
        Ok(offers) => (StatusCode::OK, Json(offers)).into_response(),
        Err(e) => handle_offer_error(e),
    }
}

/// GET /api/items/:id/highest-offer - Current winning offer
pub async fn highest_offer(
    State(handlers): State<OfferHandlers>,
    Path(item_id): Path<String>,
) -> Response {
    let item_id = match ItemId::new(item_id) {
        Ok(id) => id,
        Err(e) => return bad_request(e.to_string()),
    };

    match handlers.queries.highest_for_item(&item_id).await {
        Ok(offer) => (StatusCode::OK, Json(offer)).into_response(),
        Err(e) => handle_offer_error(e),
    }
}

/// GET /api/users/:id/offers - Offers placed by a user
pub async fn list_user_offers(
    State(handlers): State<OfferHandlers>,
    Path(user_id): Path<String>,
) -> Response {
    let user_id = match user_id.parse::<UserId>() {
        Ok(id) => id,
        Err(_) => return bad_request("Invalid user ID"),
    };

    match handlers.queries.list_by_user(user_id).await {
        Ok(offers) => (StatusCode::OK, Json(offers)).into_response(),
        Err(e) => handle_offer_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn bad_request(message: impl Into<String>) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(message))).into_response()
}

fn handle_offer_error(error: OfferError) -> Response {
    let status = match &error {
        OfferError::NotFound(_) | OfferError::NoOffersForItem(_) => StatusCode::NOT_FOUND,
        OfferError::UnknownReference | OfferError::ValidationFailed { .. } => {
            StatusCode::BAD_REQUEST
        }
        OfferError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Offer request failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("Internal server error")),
            )
                .into_response();
        }
    };

    (status, Json(ErrorResponse::from(&error))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_offer_error(OfferError::NotFound(OfferId::new(1)));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn no_offers_for_item_maps_to_404() {
        let response =
            handle_offer_error(OfferError::NoOffersForItem(ItemId::new("ITEM1").unwrap()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn unknown_reference_maps_to_400() {
        let response = handle_offer_error(OfferError::UnknownReference);
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn validation_failed_maps_to_400() {
        let response = handle_offer_error(OfferError::validation("amount", "must be positive"));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn infrastructure_maps_to_500() {
        let response = handle_offer_error(OfferError::infrastructure("pool timed out"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
