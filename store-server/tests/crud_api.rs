//! HTTP surface tests
//!
//! Drives the axum router directly (no network) over an in-memory
//! database: CRUD round trips, merge-update semantics, conflict and
//! not-found mapping, and the order endpoint's stock failure.

mod common;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{seed_customer, seed_product, test_state};
use store_server::api;
use store_server::core::AppState;

async fn router() -> (Router, AppState) {
    let state = test_state().await;
    (api::create_router(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn get(path: &str) -> Request<Body> {
    Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn json_request(method: &str, path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(path: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(path)
        .body(Body::empty())
        .unwrap()
}

/// Build a multipart/form-data body from (name, value) text fields
fn multipart_request(path: &str, fields: &[(&str, &str)]) -> Request<Body> {
    const BOUNDARY: &str = "test-boundary-7349";
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{BOUNDARY}--\r\n"));

    Request::builder()
        .method("POST")
        .uri(path)
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_check() {
    let (app, _state) = router().await;
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn category_crud_round_trip() {
    let (app, _state) = router().await;

    let (status, created) =
        send(&app, json_request("POST", "/categories", json!({"name": "Bebés"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Bebés");
    let id = created["id"].as_i64().unwrap();

    // Duplicate name → 409 with the category conflict code
    let (status, body) =
        send(&app, json_request("POST", "/categories", json!({"name": "Bebés"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6103);

    // List nests products
    let (status, list) = send(&app, get("/categories")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list[0]["name"], "Bebés");
    assert!(list[0]["products"].as_array().unwrap().is_empty());

    // Partial update
    let (status, updated) = send(
        &app,
        json_request("PATCH", &format!("/categories/{id}"), json!({"name": "Niños"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Niños");

    // Delete, then 404 on repeat
    let (status, deleted) = send(&app, delete(&format!("/categories/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"], true);

    let (status, body) = send(&app, delete(&format!("/categories/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6101);
}

#[tokio::test]
async fn missing_category_is_404_not_silent_success() {
    let (app, _state) = router().await;
    let (status, _) = send(&app, get("/categories/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_duplicate_email_is_conflict() {
    let (app, _state) = router().await;

    let payload = json!({
        "name": "Ana Pérez",
        "email": "ana@example.com",
        "phone": "+54 11 5555-0000",
        "address": "Av. Siempreviva 742",
        "city": "Buenos Aires",
        "state": "CABA",
        "zipCode": "C1414",
        "country": "Argentina"
    });

    let (status, created) = send(&app, json_request("POST", "/customers", payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    // camelCase on the wire
    assert_eq!(created["zipCode"], "C1414");

    let (status, body) = send(&app, json_request("POST", "/customers", payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);

    // Only one row exists
    let (_, list) = send(&app, get("/customers")).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn customer_update_merges_partial_fields() {
    let (app, state) = router().await;
    let customer = seed_customer(&state.pool, "ana@example.com").await;

    let (status, updated) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/customers/{}", customer.id),
            json!({"city": "Rosario"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["city"], "Rosario");
    // Untouched fields keep their values
    assert_eq!(updated["email"], "ana@example.com");
    assert_eq!(updated["name"], "Ana Pérez");
}

#[tokio::test]
async fn customer_malformed_email_is_validation_error() {
    let (app, _state) = router().await;
    let payload = json!({
        "name": "Ana",
        "email": "not-an-email",
        "phone": "1",
        "address": "x",
        "city": "x",
        "state": "x",
        "zipCode": "x",
        "country": "x"
    });
    let (status, body) = send(&app, json_request("POST", "/customers", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn product_multipart_create_and_json_update() {
    let (app, _state) = router().await;

    let (_, category) =
        send(&app, json_request("POST", "/categories", json!({"name": "Remeras"}))).await;
    let category_id = category["id"].as_i64().unwrap();

    let (status, product) = send(
        &app,
        multipart_request(
            "/products",
            &[
                ("name", "Remera Oversize"),
                ("description", "Algodón peinado"),
                ("price", "8000.50"),
                ("stock", "12"),
                ("categoryId", &category_id.to_string()),
                ("sizes", "0-3m"),
                ("sizes", "3-6m"),
            ],
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(product["name"], "Remera Oversize");
    assert_eq!(product["price"], 8000.5);
    assert_eq!(product["stock"], 12);
    assert_eq!(product["sizes"], json!(["0-3m", "3-6m"]));
    assert_eq!(product["categoryId"], category_id);
    let id = product["id"].as_i64().unwrap();

    // List nests the category
    let (_, list) = send(&app, get("/products")).await;
    assert_eq!(list[0]["category"]["name"], "Remeras");

    // JSON partial update
    let (status, updated) = send(
        &app,
        json_request("PATCH", &format!("/products/{id}"), json!({"price": 8500.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 8500.0);
    assert_eq!(updated["stock"], 12);

    // Category list now nests the product
    let (_, categories) = send(&app, get("/categories")).await;
    assert_eq!(categories[0]["products"][0]["id"], id);
}

#[tokio::test]
async fn product_missing_required_fields_is_validation_error() {
    let (app, _state) = router().await;
    let (status, body) = send(
        &app,
        multipart_request("/products", &[("name", "Sin precio")]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 2);
}

#[tokio::test]
async fn delete_missing_product_is_404() {
    let (app, _state) = router().await;
    let (status, body) = send(&app, delete("/products/4242")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn order_endpoint_places_and_rejects() {
    let (app, state) = router().await;
    let customer = seed_customer(&state.pool, "ana@example.com").await;
    let product = seed_product(&state.pool, "Remera", 100.0, 5).await;

    // Success: total 300, stock drops to 2
    let (status, order) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            json!({"customerId": customer.id, "items": [{"productId": product.id, "quantity": 3}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["total"], 300.0);
    assert_eq!(order["status"], "pending");

    let (_, fetched) = send(&app, get(&format!("/products/{}", product.id))).await;
    assert_eq!(fetched["stock"], 2);

    // Second identical order oversells → 400 naming the product
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            json!({"customerId": customer.id, "items": [{"productId": product.id, "quantity": 3}]}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6003);
    assert!(body["message"].as_str().unwrap().contains("Remera"));

    let (_, fetched) = send(&app, get(&format!("/products/{}", product.id))).await;
    assert_eq!(fetched["stock"], 2);

    // Empty item list → dedicated code
    let (status, body) = send(
        &app,
        json_request(
            "POST",
            "/orders",
            json!({"customerId": customer.id, "items": []}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);

    // Detail view nests customer and item products
    let order_id = order["id"].as_i64().unwrap();
    let (status, detail) = send(&app, get(&format!("/orders/{order_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["customer"]["email"], "ana@example.com");
    assert_eq!(detail["items"][0]["product"]["name"], "Remera");
    assert_eq!(detail["items"][0]["price"], 100.0);

    // Status transition
    let (status, shipped) = send(
        &app,
        json_request(
            "PATCH",
            &format!("/orders/{order_id}"),
            json!({"status": "shipped"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(shipped["status"], "shipped");
}
