use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::domain::{IngestPayload, IngestionSummary};
use super::repository::OfferStore;
use super::service::{DiscountQuery, OfferService, OfferServiceError};

/// Router builder exposing HTTP endpoints for ingestion and resolution.
pub fn offer_router<S>(service: Arc<OfferService<S>>) -> Router
where
    S: OfferStore + 'static,
{
    Router::new()
        .route("/offer", post(ingest_handler::<S>))
        .route("/highest-discount", get(highest_discount_handler::<S>))
        .with_state(service)
}

pub(crate) async fn ingest_handler<S>(
    State(service): State<Arc<OfferService<S>>>,
    axum::Json(payload): axum::Json<IngestPayload>,
) -> Response
where
    S: OfferStore + 'static,
{
    let offers = match payload.into_offers() {
        Some(offers) => offers,
        None => {
            let payload = json!({
                "message": "Missing offer_sections.PBO.offers in request body",
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    match service.ingest(offers) {
        Ok(summary) => {
            let response = IngestResponse {
                message: "Offer ingestion completed",
                summary,
            };
            (StatusCode::OK, axum::Json(response)).into_response()
        }
        Err(OfferServiceError::Store(err)) => {
            error!(%err, "error while ingesting offers");
            internal_error()
        }
    }
}

/// Response body for a completed ingestion.
#[derive(Debug, Serialize)]
struct IngestResponse {
    message: &'static str,
    #[serde(flatten)]
    summary: IngestionSummary,
}

/// Raw query parameters for `/highest-discount`. Kept as strings so the
/// handler can reject missing or unparseable values with a 400 instead
/// of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct HighestDiscountParams {
    #[serde(default)]
    pub(crate) amount_to_pay: Option<String>,
    #[serde(default)]
    pub(crate) bank_name: Option<String>,
    #[serde(default)]
    pub(crate) payment_instrument: Option<String>,
}

pub(crate) async fn highest_discount_handler<S>(
    State(service): State<Arc<OfferService<S>>>,
    Query(params): Query<HighestDiscountParams>,
) -> Response
where
    S: OfferStore + 'static,
{
    let amount_to_pay = params
        .amount_to_pay
        .as_deref()
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|amount| amount.is_finite() && *amount >= 0.0);
    let bank_name = params
        .bank_name
        .as_deref()
        .map(str::trim)
        .filter(|bank| !bank.is_empty())
        .map(str::to_uppercase);

    let (amount_to_pay, bank) = match (amount_to_pay, bank_name) {
        (Some(amount), Some(bank)) => (amount, bank),
        _ => {
            let payload = json!({
                "message": "Missing or invalid amountToPay or bankName",
            });
            return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
        }
    };

    // An empty instrument value means "no filter", same as the param
    // being absent entirely.
    let query = DiscountQuery {
        amount_to_pay,
        bank,
        payment_instrument: params
            .payment_instrument
            .as_deref()
            .map(str::trim)
            .filter(|instrument| !instrument.is_empty())
            .map(str::to_uppercase),
    };

    match service.highest_discount(query) {
        Ok(amount) => {
            let payload = json!({ "highestDiscountAmount": amount });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(OfferServiceError::Store(err)) => {
            error!(%err, "error while resolving highest discount");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    let payload = json!({ "message": "Internal server error" });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
