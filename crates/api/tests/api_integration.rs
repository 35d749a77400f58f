//! Integration tests for the API server.

use std::sync::{Arc, OnceLock};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use store::InMemoryStore;
use tower::ServiceExt;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> axum::Router {
    let state = Arc::new(api::AppState::new(InMemoryStore::new()));
    api::create_app(state, get_metrics_handle())
}

async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_locality(app: &axum::Router, id: i64) {
    let (status, _) = send(
        app,
        "POST",
        "/api/v1/localities",
        Some(json!({
            "id": id,
            "locality_name": "Sao Paulo",
            "province_name": "SP",
            "country_name": "Brazil"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

fn seller_body(cid: i64) -> Value {
    json!({
        "cid": cid,
        "company_name": "Test",
        "address": "Rua 1",
        "telephone": "11 91332-3232",
        "locality_id": 1
    })
}

async fn create_buyer(app: &axum::Router, card: &str) -> i64 {
    let (status, json) = send(
        app,
        "POST",
        "/api/v1/buyers",
        Some(json!({
            "card_number_id": card,
            "first_name": "Ana",
            "last_name": "Souza"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = setup();

    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn test_create_seller_returns_its_id() {
    let app = setup();
    create_locality(&app, 1).await;

    let (status, json) = send(&app, "POST", "/api/v1/sellers", Some(seller_body(123))).await;

    assert_eq!(status, StatusCode::CREATED);
    let id = json["data"]["seller_id"].as_i64().unwrap();
    assert!(id > 0);
    assert_eq!(json["data"].as_object().unwrap().len(), 1);

    let (status, json) = send(&app, "GET", &format!("/api/v1/sellers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["cid"], 123);
}

#[tokio::test]
async fn test_duplicate_seller_cid() {
    let app = setup();
    create_locality(&app, 1).await;
    send(&app, "POST", "/api/v1/sellers", Some(seller_body(123))).await;

    let (status, json) = send(&app, "POST", "/api/v1/sellers", Some(seller_body(123))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(
        json,
        json!({
            "message": "seller with this CID already exists",
            "error": "conflict",
            "code": 409,
            "causes": null
        })
    );
}

#[tokio::test]
async fn test_seller_with_unknown_locality() {
    let app = setup();

    let (status, json) = send(&app, "POST", "/api/v1/sellers", Some(seller_body(1))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "locality not found");
    assert_eq!(json["error"], "not_found");
}

#[tokio::test]
async fn test_zero_reference_is_not_found() {
    let app = setup();
    create_locality(&app, 1).await;
    let (_, json) = send(&app, "POST", "/api/v1/sellers", Some(seller_body(1))).await;
    let id = json["data"]["seller_id"].as_i64().unwrap();

    let mut body = seller_body(2);
    body["locality_id"] = json!(0);
    let (status, json) = send(&app, "POST", "/api/v1/sellers", Some(body)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "locality not found");

    let (status, json) = send(
        &app,
        "PATCH",
        &format!("/api/v1/sellers/{id}"),
        Some(json!({"locality_id": 0})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "locality not found");

    let (_, json) = send(&app, "GET", &format!("/api/v1/sellers/{id}"), None).await;
    assert_eq!(json["data"]["locality_id"], 1);
}

#[tokio::test]
async fn test_purchase_order_missing_fields() {
    let app = setup();

    let (status, json) = send(&app, "POST", "/api/v1/purchase-orders", Some(json!({}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["message"], "Invalid data");
    assert_eq!(json["error"], "unprocessable_entity");
    assert_eq!(json["code"], 422);
    let fields: Vec<_> = json["causes"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        fields,
        vec![
            "order_number",
            "order_date",
            "tracking_code",
            "buyer_id",
            "product_record_id"
        ]
    );
}

#[tokio::test]
async fn test_purchase_order_bad_date() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/purchase-orders",
        Some(json!({
            "order_number": "PO-1",
            "order_date": "2023-10-05invalid",
            "tracking_code": "TRK-1",
            "buyer_id": 1,
            "product_record_id": 1
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json,
        json!({
            "message": "Invalid data",
            "error": "bad_request",
            "code": 400,
            "causes": [{"field": "order_date", "message": "invalid date format"}]
        })
    );
}

#[tokio::test]
async fn test_buyer_report_with_no_orders() {
    let app = setup();
    create_buyer(&app, "C-1").await;
    create_buyer(&app, "C-2").await;
    let id = create_buyer(&app, "C-3").await;
    assert_eq!(id, 3);

    let (status, json) = send(
        &app,
        "GET",
        "/api/v1/buyers/report-purchase-orders?id=3",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "data": [{
                "id": 3,
                "card_number_id": "C-3",
                "first_name": "Ana",
                "last_name": "Souza",
                "purchase_orders_count": 0
            }]
        })
    );
}

#[tokio::test]
async fn test_buyer_report_for_missing_buyer() {
    let app = setup();
    create_buyer(&app, "C-1").await;

    let (status, json) = send(
        &app,
        "GET",
        "/api/v1/buyers/report-purchase-orders?id=4",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "buyer not found");
    assert_eq!(json["error"], "not_found");
    assert_eq!(json["code"], 404);
}

#[tokio::test]
async fn test_report_without_id_lists_everything() {
    let app = setup();
    create_locality(&app, 1).await;
    create_locality(&app, 2).await;
    send(&app, "POST", "/api/v1/sellers", Some(seller_body(10))).await;

    for uri in [
        "/api/v1/sellers/reportSellers",
        "/api/v1/localities/reportSellers",
    ] {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        let counts: Vec<_> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| (r["locality_id"].as_i64().unwrap(), r["sellers_count"].as_i64().unwrap()))
            .collect();
        assert_eq!(counts, vec![(1, 1), (2, 0)], "{uri}");
    }

    let (status, json) = send(&app, "GET", "/api/v1/localities/reportCarries?id=2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"][0]["carries_count"], 0);
}

#[tokio::test]
async fn test_invalid_ids_are_bad_requests() {
    let app = setup();

    for uri in [
        "/api/v1/sellers/abc",
        "/api/v1/warehouses/0",
        "/api/v1/buyers/report-purchase-orders?id=x",
    ] {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["message"], "invalid id", "{uri}");
        assert_eq!(json["error"], "bad_request", "{uri}");
    }
}

#[tokio::test]
async fn test_malformed_json_is_a_bad_request() {
    let app = setup();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/buyers")
                .header("content-type", "application/json")
                .body(Body::from("{\"card_number_id\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "bad_request");
    assert_eq!(json["code"], 400);
}

#[tokio::test]
async fn test_warehouse_lifecycle() {
    let app = setup();

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/warehouses",
        Some(json!({
            "warehouse_code": "DHM",
            "address": "Av. Brasil, 10",
            "telephone": "(11) 4444-5555",
            "minimum_capacity": 10,
            "minimum_temperature": -5.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = json["data"]["id"].as_i64().unwrap();
    let uri = format!("/api/v1/warehouses/{id}");

    let (status, json) = send(&app, "PATCH", &uri, Some(json!({"minimum_capacity": 25}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["minimum_capacity"], 25);
    assert_eq!(json["data"]["warehouse_code"], "DHM");

    let (status, json) = send(&app, "PATCH", &uri, Some(json!({"telephone": "call me"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["causes"][0]["field"], "telephone");

    let (status, json) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(json, Value::Null);

    let (status, json) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "warehouse not found");
}

#[tokio::test]
async fn test_referenced_locality_cannot_be_deleted() {
    let app = setup();
    create_locality(&app, 1).await;
    send(&app, "POST", "/api/v1/sellers", Some(seller_body(5))).await;

    let (status, json) = send(&app, "DELETE", "/api/v1/localities/1", None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["message"], "locality is referenced by other records");
}

#[tokio::test]
async fn test_kebab_and_snake_case_paths() {
    let app = setup();

    for uri in [
        "/api/v1/product-batches",
        "/api/v1/product_batches",
        "/api/v1/product-records",
        "/api/v1/product_records",
        "/api/v1/purchase-orders",
        "/api/v1/purchase_orders",
        "/api/v1/inbound-orders",
        "/api/v1/inbound_orders",
        "/api/v1/carries",
        "/api/v1/carriers",
    ] {
        let (status, json) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(json, json!({"data": []}), "{uri}");
    }
}

#[tokio::test]
async fn test_product_record_flow() {
    let app = setup();
    create_locality(&app, 1).await;
    let (_, json) = send(&app, "POST", "/api/v1/sellers", Some(seller_body(7))).await;
    let seller_id = json["data"]["seller_id"].as_i64().unwrap();

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/products",
        Some(json!({
            "product_code": "FRZ-1",
            "description": "Frozen peas",
            "height": 10.0,
            "length": 20.0,
            "width": 5.0,
            "net_weight": 1.0,
            "expiration_rate": 0.5,
            "recommended_freezing_temperature": -18.0,
            "freezing_rate": 1.5,
            "product_type_id": 1,
            "seller_id": seller_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = json["data"]["id"].as_i64().unwrap();

    let (status, json) = send(
        &app,
        "POST",
        "/api/v1/product-records",
        Some(json!({
            "purchase_price": 3.5,
            "sale_price": 5.0,
            "product_id": product_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let stamped = json["data"]["last_update_date"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(stamped).is_ok());

    let (status, json) = send(
        &app,
        "GET",
        &format!("/api/v1/products/reportRecords?id={product_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({"data": [{
            "product_id": product_id,
            "description": "Frozen peas",
            "records_count": 1
        }]})
    );
}
