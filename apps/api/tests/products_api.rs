//! Black-box tests for the HTTP surface.
//!
//! Each test builds a fresh router over its own store and drives it with
//! `tower::ServiceExt::oneshot`, so no socket is opened.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use stockroom_api::services::ProductService;
use stockroom_api::{build_router, AppState};
use stockroom_db::{Database, DbConfig, InMemoryProductStore};

fn app() -> Router {
    let service = ProductService::new(Arc::new(InMemoryProductStore::new()));
    build_router(AppState::new(service))
}

fn app_over(db: &Database) -> Router {
    let service = ProductService::new(Arc::new(db.products()));
    build_router(AppState::new(service))
}

async fn sqlite_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    app_over(&db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

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

async fn send_raw(app: &Router, method: Method, uri: &str, body: &str) -> StatusCode {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

fn widget() -> Value {
    json!({ "name": "Widget", "description": "Blue", "price": 9.99, "quantity": 5 })
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, product) = send(app, Method::POST, "/products", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    product
}

// =============================================================================
// Create / Read
// =============================================================================

#[tokio::test]
async fn create_returns_201_and_reads_back() {
    let app = app();

    let created = create(&app, widget()).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Widget");
    assert_eq!(created["description"], "Blue");
    assert_eq!(created["price"].as_f64(), Some(9.99));
    assert_eq!(created["quantity"], 5);
    assert!(created["createdAt"].is_string());

    let (status, loaded) = send(&app, Method::GET, "/products/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn create_ignores_client_supplied_id() {
    let app = app();

    let mut body = widget();
    body["id"] = json!(500);
    let created = create(&app, body).await;
    assert_eq!(created["id"], 1);
}

#[tokio::test]
async fn get_missing_product_is_404() {
    let (status, body) = send(&app(), Method::GET, "/products/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Product not found with id: 999");
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let (status, body) = send(&app(), Method::GET, "/products/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn invalid_bodies_are_400() {
    let app = app();

    let negative = json!({ "name": "Widget", "price": 1.0, "quantity": -1 });
    let (status, body) = send(&app, Method::POST, "/products", Some(negative)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let blank = json!({ "name": "  ", "price": 1.0, "quantity": 1 });
    let (status, _) = send(&app, Method::POST, "/products", Some(blank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let sub_cent = json!({ "name": "Widget", "price": 1.001, "quantity": 1 });
    let (status, _) = send(&app, Method::POST, "/products", Some(sub_cent)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let missing_price = json!({ "name": "Widget", "quantity": 1 });
    let (status, _) = send(&app, Method::POST, "/products", Some(missing_price)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let status = send_raw(&app, Method::POST, "/products", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Too large to survive as a JSON number
    let huge = r#"{"name": "Widget", "price": 90071992547409.93, "quantity": 1}"#;
    let status = send_raw(&app, Method::POST, "/products", huge).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was stored
    let (_, all) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(all, json!([]));
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn update_replaces_fields_and_keeps_id() {
    let app = app();
    let created = create(&app, widget()).await;

    let changes = json!({ "name": "Widget Pro", "price": 12.5, "quantity": 3 });
    let (status, updated) = send(&app, Method::PUT, "/products/1", Some(changes)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Widget Pro");
    assert!(updated["description"].is_null());
    assert_eq!(updated["price"].as_f64(), Some(12.5));
    assert_eq!(updated["quantity"], 3);
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn update_missing_product_is_404() {
    let (status, body) = send(&app(), Method::PUT, "/products/42", Some(widget())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn update_with_invalid_body_is_400() {
    let app = app();
    create(&app, widget()).await;

    let bad = json!({ "name": "Widget", "price": -1.0, "quantity": 1 });
    let (status, _) = send(&app, Method::PUT, "/products/1", Some(bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_returns_204_then_404() {
    let app = app();
    create(&app, widget()).await;

    let (status, body) = send(&app, Method::DELETE, "/products/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = send(&app, Method::GET, "/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/products/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Listing
// =============================================================================

async fn seed_three(app: &Router) {
    for (name, price) in [("Charlie", 3.0), ("Alpha", 1.0), ("Bravo", 2.0)] {
        create(app, json!({ "name": name, "price": price, "quantity": 1 })).await;
    }
}

#[tokio::test]
async fn list_defaults_to_plain_array() {
    let app = app();
    seed_three(&app).await;

    let (status, body) = send(&app, Method::GET, "/products", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Charlie", "Alpha", "Bravo"]);
}

#[tokio::test]
async fn paginated_list_returns_envelope() {
    let app = app();
    seed_three(&app).await;

    let uri = "/products?paginated=true&page=0&size=2&sortBy=name&sortDir=desc";
    let (status, page) = send(&app, Method::GET, uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["content"][0]["name"], "Charlie");
    assert_eq!(page["content"][1]["name"], "Bravo");
    assert_eq!(page["number"], 0);
    assert_eq!(page["size"], 2);
    assert_eq!(page["totalElements"], 3);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["numberOfElements"], 2);
    assert_eq!(page["first"], true);
    assert_eq!(page["last"], false);
    assert_eq!(page["empty"], false);

    let uri = "/products?paginated=true&page=1&size=2&sortBy=name&sortDir=desc";
    let (_, page) = send(&app, Method::GET, uri, None).await;
    assert_eq!(page["content"][0]["name"], "Alpha");
    assert_eq!(page["last"], true);
}

#[tokio::test]
async fn paginated_list_sorts_by_price_with_lenient_direction() {
    let app = app();
    seed_three(&app).await;

    let uri = "/products?paginated=true&sortBy=price&sortDir=sideways";
    let (status, page) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let prices: Vec<_> = page["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["price"].as_f64().unwrap())
        .collect();
    assert_eq!(prices, [1.0, 2.0, 3.0]);
}

#[tokio::test]
async fn bad_list_parameters_are_400() {
    let app = app();

    for uri in [
        "/products?paginated=true&sortBy=sku",
        "/products?paginated=true&size=0",
        "/products?paginated=true&size=1001",
        "/products?page=-1",
        "/products?paginated=maybe",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "VALIDATION_ERROR", "{uri}");
    }
}

// =============================================================================
// Search / Stock / Health
// =============================================================================

#[tokio::test]
async fn search_matches_case_insensitively() {
    let app = app();
    for name in ["Blue Widget", "Red Gadget", "widget stand"] {
        create(&app, json!({ "name": name, "price": 1.0, "quantity": 1 })).await;
    }

    let (status, body) = send(&app, Method::GET, "/products/search?name=WIDGET", None).await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Blue Widget", "widget stand"]);

    let (_, body) = send(&app, Method::GET, "/products/search?name=", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn search_requires_a_short_name() {
    let app = app();

    let (status, _) = send(&app, Method::GET, "/products/search", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let uri = format!("/products/search?name={}", "x".repeat(101));
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn stock_check_answers_with_boolean() {
    let app = app();
    create(&app, widget()).await;

    let (status, body) = send(&app, Method::GET, "/products/1/stock?quantity=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(true));

    let (_, body) = send(&app, Method::GET, "/products/1/stock?quantity=6", None).await;
    assert_eq!(body, json!(false));

    let (status, _) = send(&app, Method::GET, "/products/1/stock", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::GET, "/products/9/stock?quantity=1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn widget_scenario() {
    let app = app();

    let created = create(&app, widget()).await;
    assert_eq!(created["id"], 1);

    let changes = json!({ "name": "Widget", "description": "Blue", "price": 9.99, "quantity": 3 });
    let (status, _) = send(&app, Method::PUT, "/products/1", Some(changes)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, four) = send(&app, Method::GET, "/products/1/stock?quantity=4", None).await;
    let (_, two) = send(&app, Method::GET, "/products/1/stock?quantity=2", None).await;
    assert_eq!(four, json!(false));
    assert_eq!(two, json!(true));
}

#[tokio::test]
async fn health_reports_ok() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// SQLite backend
// =============================================================================

#[tokio::test]
async fn sqlite_backend_round_trip() {
    let app = sqlite_app().await;

    let created = create(&app, widget()).await;
    let id = created["id"].as_i64().unwrap();

    let (status, loaded) = send(&app, Method::GET, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loaded["price"].as_f64(), Some(9.99));

    let uri = "/products?paginated=true&sortBy=createdAt&sortDir=desc";
    let (status, page) = send(&app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["totalElements"], 1);

    let (status, _) = send(&app, Method::DELETE, &format!("/products/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn sqlite_search_folds_unicode_case() {
    let app = sqlite_app().await;
    create(&app, json!({ "name": "CAFÉ Beans", "price": 4.5, "quantity": 3 })).await;
    create(&app, json!({ "name": "Tea", "price": 2.0, "quantity": 3 })).await;

    let (status, hits) = send(&app, Method::GET, "/products/search?name=caf%C3%A9", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["name"], "CAFÉ Beans");
}

#[tokio::test]
async fn closed_database_reports_unavailable() {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let app = app_over(&db);
    db.close().await;

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({ "status": "unavailable" }));

    let (status, body) = send(&app, Method::GET, "/products/1", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "DATABASE_ERROR");
    assert_eq!(body["message"], "Database connection failed");
}
