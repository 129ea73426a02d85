mod common;

use axum::http::{Method, StatusCode};
use chrono::NaiveDate;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{line, order_payload, response_json, TestApp};

fn rows(body: &Value) -> &Vec<Value> {
    body["rows"].as_array().expect("rows array")
}

#[tokio::test]
async fn requests_without_a_token_are_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/v1/purchase-orders", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);

    let response = app
        .request(
            Method::GET,
            "/api/v1/purchase-orders",
            None,
            Some("not-a-jwt"),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let response = app.request(Method::GET, "/health/ready", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_issues_a_number_from_the_generic_type_series() {
    let app = TestApp::new().await;
    let labeler_id = app.seed_labeler("Siam Pharma").await;

    let (_, first) = app
        .create_order(order_payload(
            "2024-03-11",
            Some(1),
            Some(labeler_id),
            vec![line("P-100", 10, "12.50")],
        ))
        .await;
    let (_, second) = app
        .create_order(order_payload(
            "2024-03-11",
            Some(1),
            Some(labeler_id),
            vec![line("P-101", 1, "3.00")],
        ))
        .await;
    let (_, supplies) = app
        .create_order(order_payload(
            "2024-03-11",
            Some(2),
            Some(labeler_id),
            vec![line("S-1", 5, "1.00")],
        ))
        .await;

    assert_eq!(first, "PO000001");
    assert_eq!(second, "PO000002");
    assert_eq!(supplies, "POA000001");
}

#[tokio::test]
async fn supplied_number_is_kept() {
    let app = TestApp::new().await;
    let mut payload = order_payload("2024-03-11", None, None, vec![line("P-1", 1, "1.00")]);
    payload["summary"]["purchase_order_number"] = json!("MANUAL-7");

    let (_, number) = app.create_order(payload).await;
    assert_eq!(number, "MANUAL-7");
}

#[tokio::test]
async fn duplicate_numbers_are_rejected_as_bad_requests() {
    let app = TestApp::new().await;
    let mut payload = order_payload("2024-03-11", None, None, vec![line("P-1", 1, "1.00")]);
    payload["summary"]["purchase_order_number"] = json!("MANUAL-7");
    app.create_order(payload.clone()).await;

    let response = app
        .request_authenticated(Method::POST, "/api/v1/purchase-orders", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("MANUAL-7"));

    let (other, _) = app
        .create_order(order_payload("2024-03-11", Some(1), None, vec![line("P-2", 1, "1")]))
        .await;
    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/purchase-orders/newponumber/{}", other),
            Some(json!({ "purchase_order_number": "MANUAL-7" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn malformed_requests_get_the_error_envelope() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(json!({ "items": [line("P-1", 1, "1.00")] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("summary"));
    assert!(body["request_id"].is_string());

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/purchase-orders/not-a-uuid/status-logs",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
}

#[tokio::test]
async fn create_without_items_or_series_is_a_validation_error() {
    let app = TestApp::new().await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(order_payload("2024-03-11", Some(1), None, vec![])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(order_payload("2024-03-11", None, None, vec![line("P-1", 1, "1")])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 0, "1")])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["request_id"].is_string());
}

#[tokio::test]
async fn closed_period_rejects_create_before_a_number_is_issued() {
    let app = TestApp::new().await;
    app.seed_period(2024, 3, true).await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 1, "1")])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);

    // October belongs to the next budget year, which has no lock.
    let (_, number) = app
        .create_order(order_payload("2024-10-07", Some(1), None, vec![line("P-1", 1, "1")]))
        .await;
    assert_eq!(number, "PO000001");
}

#[tokio::test]
async fn by_status_orders_by_date_then_number_descending() {
    let app = TestApp::new().await;
    let (_, a) = app
        .create_order(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 1, "1")]))
        .await;
    let (_, b) = app
        .create_order(order_payload("2024-03-11", Some(1), None, vec![line("P-2", 1, "1")]))
        .await;
    let (_, c) = app
        .create_order(order_payload("2024-03-12", Some(1), None, vec![line("P-3", 2, "4.50")]))
        .await;

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-orders/by-status",
            Some(json!({ "status": ["prepared"] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let numbers: Vec<&str> = rows(&body)
        .iter()
        .map(|r| r["purchase_order_number"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec![c.as_str(), b.as_str(), a.as_str()]);
    assert_eq!(rows(&body)[0]["item_count"], 1);

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-orders/by-status",
            Some(json!({ "status": ["APPROVED"] })),
        )
        .await;
    let body = response_json(response).await;
    assert!(rows(&body).is_empty());

    let response = app
        .request_authenticated(
            Method::POST,
            "/api/v1/purchase-orders/by-status",
            Some(json!({ "status": ["PREPARED"], "query": "0003" })),
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(rows(&body).len(), 1);
}

#[tokio::test]
async fn amend_replaces_items_and_logs_the_status() {
    let app = TestApp::new().await;
    let (id, number) = app
        .create_order(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 1, "1")]))
        .await;

    let mut payload = order_payload(
        "2024-03-13",
        Some(1),
        None,
        vec![line("P-7", 3, "10.00"), line("P-8", 1, "2.25")],
    );
    payload["summary"]["purchase_order_status"] = json!("CONFIRMED");
    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/purchase-orders/{}", id),
            Some(payload),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/purchase-orders/detail?id={}", id),
            None,
        )
        .await;
    let body = response_json(response).await;
    let detail = &body["detail"];
    assert_eq!(detail["order"]["purchase_order_status"], "CONFIRMED");
    assert_eq!(detail["order"]["order_date"], "2024-03-13");
    assert_eq!(detail["order"]["purchase_order_number"], number.as_str());
    let products: Vec<&str> = detail["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["product_id"].as_str().unwrap())
        .collect();
    assert_eq!(products, vec!["P-7", "P-8"]);

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/purchase-orders/{}/status-logs", id),
            None,
        )
        .await;
    let body = response_json(response).await;
    let logs = rows(&body);
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["from_status"], "PREPARED");
    assert_eq!(logs[0]["to_status"], "CONFIRMED");
    assert_eq!(logs[0]["people_user_id"], "buyer-01");
}

#[tokio::test]
async fn amend_of_unknown_order_is_not_found() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(
            Method::PUT,
            &format!("/api/v1/purchase-orders/{}", Uuid::new_v4()),
            Some(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 1, "1")])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn check_holiday_refuses_weekends_and_holidays() {
    let app = TestApp::new().await;
    app.seed_holiday(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(), "Songkran")
        .await;

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/purchase-orders/check-holiday?date=2024-01-06",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("weekend"));

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/purchase-orders/check-holiday?date=2024-04-15",
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].as_str().unwrap().contains("Songkran"));

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/purchase-orders/check-holiday?date=2024-04-16",
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(body["ok"], true);

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/purchase-orders/check-holiday?date=16-04-2024",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_the_order() {
    let app = TestApp::new().await;
    let (id, _) = app
        .create_order(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 1, "1")]))
        .await;

    let uri = format!("/api/v1/purchase-orders/{}", id);
    let response = app.request_authenticated(Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/purchase-orders/detail?id={}", id),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.request_authenticated(Method::DELETE, &uri, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lastorder_returns_the_latest_approved_order() {
    let app = TestApp::new().await;
    let vendor = app.seed_labeler("Thai Meditech").await;
    let other = app.seed_labeler("No Orders Ltd").await;

    let (older, _) = app
        .create_order(order_payload("2024-02-05", Some(1), Some(vendor), vec![line("P-1", 1, "1")]))
        .await;
    let (newer, _) = app
        .create_order(order_payload("2024-03-05", Some(1), Some(vendor), vec![line("P-1", 1, "1")]))
        .await;
    let (_, _) = app
        .create_order(order_payload("2024-04-05", Some(1), Some(vendor), vec![line("P-1", 1, "1")]))
        .await;

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-orders/update-purchase/status",
            Some(json!({
                "items": [
                    { "purchase_order_id": older, "purchase_order_status": "APPROVED" },
                    { "purchase_order_id": newer, "purchase_order_status": "APPROVED" }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["detail"]["applied"].as_array().unwrap().len(), 2);

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/purchase-orders/lastorder/{}", vendor),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["detail"]["purchase_order_id"], newer.as_str());
    assert_eq!(body["detail"]["labeler_name"], "Thai Meditech");

    let response = app
        .request_authenticated(
            Method::GET,
            &format!("/api/v1/purchase-orders/lastorder/{}", other),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn partly_failed_status_batch_reports_ok_false() {
    let app = TestApp::new().await;
    let (id, _) = app
        .create_order(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 1, "1")]))
        .await;
    let missing = Uuid::new_v4();

    let response = app
        .request_authenticated(
            Method::PUT,
            "/api/v1/purchase-orders/update-purchase/status",
            Some(json!({
                "items": [
                    { "purchase_order_id": id, "purchase_order_status": "CONFIRMED" },
                    { "purchase_order_id": missing, "purchase_order_status": "CONFIRMED" },
                    { "purchase_order_id": id, "purchase_order_status": "RECEIVED" }
                ]
            })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["detail"]["applied"], json!([id]));
    assert_eq!(body["detail"]["ignored"], json!([id]));
    assert_eq!(
        body["detail"]["failed"][0]["purchase_order_id"],
        missing.to_string()
    );
}

#[tokio::test]
async fn newponumber_reassigns_the_number() {
    let app = TestApp::new().await;
    let (id, _) = app
        .create_order(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 1, "1")]))
        .await;

    let uri = format!("/api/v1/purchase-orders/newponumber/{}", id);
    let response = app
        .request_authenticated(Method::PUT, &uri, Some(json!({ "purchase_order_number": " " })))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .request_authenticated(
            Method::PUT,
            &uri,
            Some(json!({ "purchase_order_number": "PO-FIXED-1" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/purchase-orders/by-number?start=PO-FIXED-0&end=PO-FIXED-9&status=ALL",
            None,
        )
        .await;
    let body = response_json(response).await;
    assert_eq!(rows(&body).len(), 1);
    assert_eq!(rows(&body)[0]["purchase_order_id"], id.as_str());
}

#[tokio::test]
async fn order_date_range_lists_in_number_order() {
    let app = TestApp::new().await;
    for date in ["2024-03-12", "2024-03-11", "2024-05-01"] {
        app.create_order(order_payload(date, Some(1), None, vec![line("P-1", 1, "1")]))
            .await;
    }

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/purchase-orders/by-order-date?start_date=2024-03-01&end_date=2024-03-31",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    let numbers: Vec<&str> = rows(&body)
        .iter()
        .map(|r| r["purchase_order_number"].as_str().unwrap())
        .collect();
    assert_eq!(numbers, vec!["PO000001", "PO000002"]);

    let response = app
        .request_authenticated(
            Method::GET,
            "/api/v1/purchase-orders/by-order-date?start_date=2024-04-01&end_date=2024-03-01",
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generic_types_are_seeded() {
    let app = TestApp::new().await;
    let response = app
        .request_authenticated(Method::GET, "/api/v1/purchase-orders/generic-types", None)
        .await;
    let body = response_json(response).await;
    let ids: Vec<i64> = rows(&body)
        .iter()
        .map(|r| r["generic_type_id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn responses_echo_the_request_id() {
    let app = TestApp::new().await;
    let response = app
        .request(Method::GET, "/api/v1/purchase-orders", None, None)
        .await;
    let header = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .expect("request id header");
    let body = response_json(response).await;
    assert_eq!(body["request_id"], header.as_str());
}
