use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use crate::offers::domain::IngestPayload;
use crate::offers::router::{
    highest_discount_handler, ingest_handler, offer_router, HighestDiscountParams,
};
use crate::offers::service::OfferService;

use super::common::*;

fn ingest_payload(offers: serde_json::Value) -> IngestPayload {
    serde_json::from_value(json!({
        "offer_sections": { "PBO": { "offers": offers } }
    }))
    .expect("payload deserializes")
}

#[tokio::test]
async fn ingest_handler_rejects_payload_without_offer_list() {
    let (service, _) = build_service();

    let payload: IngestPayload = serde_json::from_value(json!({})).expect("deserializes");
    let response = ingest_handler::<MemoryStore>(State(service), axum::Json(payload)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = read_json_body(response).await;
    assert!(body["message"]
        .as_str()
        .unwrap_or_default()
        .contains("offer_sections.PBO.offers"));
}

#[tokio::test]
async fn ingest_handler_reports_counts() {
    let (service, _) = build_service();

    let payload = ingest_payload(json!([
        {
            "adjustment_type": "INSTANT_DISCOUNT",
            "adjustment_id": "adj-1",
            "summary": "Flat 100 off",
            "contributors": { "banks": ["AXIS"], "payment_instrument": ["CREDIT"], "emi_months": [] }
        },
        { "summary": "no id on this one" }
    ]));

    let response = ingest_handler::<MemoryStore>(State(service), axum::Json(payload)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["message"], json!("Offer ingestion completed"));
    assert_eq!(body["noOfOffersIdentified"], json!(2));
    assert_eq!(body["noOfNewOffersCreated"], json!(1));
}

#[tokio::test]
async fn ingest_handler_returns_internal_error_on_store_failure() {
    let service = Arc::new(OfferService::new(Arc::new(UnavailableStore)));

    let payload = ingest_payload(json!([
        { "adjustment_id": "adj-1", "summary": "Flat 100 off" }
    ]));

    let response = ingest_handler::<UnavailableStore>(State(service), axum::Json(payload)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn highest_discount_handler_rejects_missing_bank() {
    let (service, _) = build_service();

    let params = HighestDiscountParams {
        amount_to_pay: Some("1000".to_string()),
        ..Default::default()
    };
    let response = highest_discount_handler::<MemoryStore>(State(service), Query(params)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn highest_discount_handler_rejects_unparseable_amount() {
    let (service, _) = build_service();

    let params = HighestDiscountParams {
        amount_to_pay: Some("a-lot".to_string()),
        bank_name: Some("AXIS".to_string()),
        ..Default::default()
    };
    let response = highest_discount_handler::<MemoryStore>(State(service), Query(params)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn highest_discount_handler_rejects_negative_amount() {
    let (service, _) = build_service();

    let params = HighestDiscountParams {
        amount_to_pay: Some("-500".to_string()),
        bank_name: Some("AXIS".to_string()),
        ..Default::default()
    };
    let response = highest_discount_handler::<MemoryStore>(State(service), Query(params)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn highest_discount_handler_returns_internal_error_on_store_failure() {
    let service = Arc::new(OfferService::new(Arc::new(UnavailableStore)));

    let params = HighestDiscountParams {
        amount_to_pay: Some("1000".to_string()),
        bank_name: Some("AXIS".to_string()),
        ..Default::default()
    };
    let response =
        highest_discount_handler::<UnavailableStore>(State(service), Query(params)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn routes_resolve_discount_case_insensitively() {
    let (service, _) = build_service();
    service
        .ingest(vec![incoming("adj-1", "Flat 100 off", &["AXIS"], &["CREDIT"])])
        .expect("ingestion succeeds");

    let router = offer_router(service);
    let response = router
        .oneshot(
            axum::http::Request::get("/highest-discount?amountToPay=1000&bankName=axis")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["highestDiscountAmount"], json!(100));
}

#[tokio::test]
async fn routes_ignore_empty_payment_instrument() {
    let (service, _) = build_service();
    service
        .ingest(vec![incoming("adj-1", "Flat 100 off", &["AXIS"], &["CREDIT"])])
        .expect("ingestion succeeds");

    // A present-but-empty instrument param must behave like an absent
    // one, not filter every offer out.
    let router = offer_router(service);
    let response = router
        .oneshot(
            axum::http::Request::get(
                "/highest-discount?amountToPay=1000&bankName=AXIS&paymentInstrument=",
            )
            .body(axum::body::Body::empty())
            .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["highestDiscountAmount"], json!(100));
}

#[tokio::test]
async fn routes_return_zero_for_unknown_bank() {
    let (service, _) = build_service();

    let router = offer_router(service);
    let response = router
        .oneshot(
            axum::http::Request::get("/highest-discount?amountToPay=1000&bankName=SBI")
                .body(axum::body::Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["highestDiscountAmount"], json!(0));
}

#[tokio::test]
async fn routes_accept_ingestion_payloads() {
    let (service, store) = build_service();

    let router = offer_router(service);
    let body = json!({
        "offer_sections": { "PBO": { "offers": [
            {
                "adjustment_type": "CASHBACK_ON_CARD",
                "adjustment_id": "adj-9",
                "summary": "Rs. 75 cashback, min order 300",
                "contributors": { "banks": ["IDFC"], "payment_instrument": ["CREDIT"], "emi_months": [] }
            }
        ] } }
    });

    let response = router
        .oneshot(
            axum::http::Request::post("/offer")
                .header(axum::http::header::CONTENT_TYPE, "application/json")
                .body(axum::body::Body::from(
                    serde_json::to_vec(&body).expect("body serializes"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(store.len(), 1);
}
