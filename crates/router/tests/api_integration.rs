//! Integration tests for the REST API
//!
//! Drives the axum router in-process with `tower::ServiceExt::oneshot`.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use hermes_core::{RestingOrder, Venue};
use hermes_router::{AppState, InMemoryVenueStore, create_router};
use rust_decimal_macros::dec;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

// ============================================================================
// Test Fixtures
// ============================================================================

fn create_app(venues: Vec<Venue>) -> Router {
    let state = AppState::from_store(InMemoryVenueStore::with_venues(venues), 3);
    create_router(Arc::new(state))
}

fn two_venues() -> Vec<Venue> {
    vec![
        Venue::new("Exchange1", dec!(100000), dec!(50))
            .with_ask(RestingOrder::sell(1, dec!(50000), dec!(2)))
            .with_bid(RestingOrder::buy(2, dec!(49000), dec!(1))),
        Venue::new("Exchange2", dec!(100000), dec!(50))
            .with_ask(RestingOrder::sell(3, dec!(49500), dec!(0.5)))
            .with_bid(RestingOrder::buy(4, dec!(51000), dec!(2))),
    ]
}

fn order_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/order")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// ============================================================================
// REST API Tests
// ============================================================================

#[tokio::test]
async fn test_ping_endpoint() {
    let app = create_app(Vec::new());

    let request = Request::builder()
        .uri("/api/ping")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({}));
}

#[tokio::test]
async fn test_buy_sweeps_cheapest_first() {
    let _ = env_logger::try_init();
    let app = create_app(two_venues());

    let (status, json) = send(app, order_request(json!({ "orderType": "buy", "amount": 1 }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["direction"], "acquire");
    assert_eq!(json["filled"], "1");
    assert_eq!(json["totalCost"], "49750");
    assert!(json.get("totalRevenue").is_none());

    let orders = json["orders"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["exchangeName"], "Exchange2");
    assert_eq!(orders[0]["amount"], "0.5");
    assert_eq!(orders[0]["price"], "49500");
    assert_eq!(orders[1]["exchangeName"], "Exchange1");
    assert_eq!(orders[1]["id"], 1);
}

#[tokio::test]
async fn test_sell_sweeps_highest_first() {
    let app = create_app(two_venues());

    let (status, json) = send(
        app,
        order_request(json!({ "OrderType": "Sell", "Amount": "2.5" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["direction"], "dispose");
    assert_eq!(json["totalRevenue"], "126500");

    let orders = json["orders"].as_array().unwrap();
    assert_eq!(orders[0]["price"], "51000");
    assert_eq!(orders[0]["amount"], "2");
    assert_eq!(orders[1]["price"], "49000");
    assert_eq!(orders[1]["amount"], "0.5");
}

#[tokio::test]
async fn test_order_updates_venue_listing() {
    let app = create_app(two_venues());

    let (status, _) = send(
        app.clone(),
        order_request(json!({ "orderType": "buy", "amount": "0.5" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let request = Request::builder()
        .uri("/api/venues")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);

    let venues = json.as_array().unwrap();
    assert_eq!(venues.len(), 2);
    assert_eq!(venues[1]["exchangeName"], "Exchange2");
    assert_eq!(venues[1]["quoteBalance"], "75250");
    assert_eq!(venues[1]["baseBalance"], "50.5");
    assert_eq!(venues[1]["version"], 1);
    // the exhausted ask is gone
    assert!(venues[1]["asks"].as_array().unwrap().is_empty());
    // untouched venue is committed unchanged
    assert_eq!(venues[0]["quoteBalance"], "100000");
}

#[tokio::test]
async fn test_non_positive_amount_is_bad_request() {
    let app = create_app(two_venues());

    let (status, json) = send(app, order_request(json!({ "orderType": "buy", "amount": 0 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["msg"], "Amount must be greater than zero.");
}

#[tokio::test]
async fn test_unknown_order_type_is_bad_request() {
    let app = create_app(two_venues());

    let (status, json) = send(app, order_request(json!({ "orderType": "hold", "amount": 1 }))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], -1100);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let app = create_app(two_venues());

    let request = Request::builder()
        .method("POST")
        .uri("/api/order")
        .header("content-type", "application/json")
        .body(Body::from("{\"orderType\": \"buy\"}"))
        .unwrap();
    let (status, json) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], -1101);
}

#[tokio::test]
async fn test_insufficient_liquidity_is_unprocessable() {
    let app = create_app(two_venues());

    let (status, json) = send(app, order_request(json!({ "orderType": "buy", "amount": 10 }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["code"], -2002);
}

#[tokio::test]
async fn test_empty_store_has_no_liquidity_source() {
    let app = create_app(Vec::new());

    let (status, json) = send(app, order_request(json!({ "orderType": "sell", "amount": 1 }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], -2001);
}
