#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request},
    response::Response,
    Router,
};
use chrono::NaiveDate;
use procurement_api::{
    config::AppConfig,
    db,
    entities::{accounting_period, holiday, labeler},
    events::{self, EventSender},
    AppState,
};
use sea_orm::{ActiveModelTrait, Set};
use serde_json::{json, Value};
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "procurement_test_secret_key_for_integration_runs_7193";

/// Application state and router over a throwaway SQLite database file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    token: String,
    _db_dir: TempDir,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Builds the app after letting the caller adjust configuration.
    pub async fn with_config(customize: impl FnOnce(&mut AppConfig)) -> Self {
        let db_dir = TempDir::new().expect("temp dir for test database");
        let db_path = db_dir.path().join("procurement_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            TEST_SECRET.to_string(),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 4;
        cfg.db_min_connections = 1;
        customize(&mut cfg);

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let (event_tx, event_rx) = mpsc::channel(256);
        let event_task = tokio::spawn(events::process_events(event_rx));
        let state = AppState::new(Arc::new(pool), cfg, Arc::new(EventSender::new(event_tx)));

        let token = state
            .auth
            .generate_token("buyer-01", Some("Test Buyer".into()), vec!["purchasing".into()])
            .expect("sign test token");

        Self {
            router: procurement_api::build_router(state.clone()),
            state,
            token,
            _db_dir: db_dir,
            _event_task: event_task,
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Send a request against the router with an optional bearer token.
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(tok) = token {
            builder = builder.header("authorization", format!("Bearer {}", tok));
        }

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Convenience helper for authenticated JSON requests.
    pub async fn request_authenticated(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> Response {
        self.request(method, uri, body, Some(self.token())).await
    }

    pub async fn seed_labeler(&self, name: &str) -> i64 {
        labeler::ActiveModel {
            labeler_name: Set(name.to_string()),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed labeler")
        .labeler_id
    }

    pub async fn seed_period(&self, budget_year: i32, month: i32, is_closed: bool) {
        accounting_period::ActiveModel {
            budget_year: Set(budget_year),
            period_month: Set(month),
            is_closed: Set(is_closed),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed accounting period");
    }

    pub async fn seed_holiday(&self, date: NaiveDate, name: &str) {
        holiday::ActiveModel {
            holiday_date: Set(date),
            holiday_name: Set(Some(name.to_string())),
            ..Default::default()
        }
        .insert(&*self.state.db)
        .await
        .expect("seed holiday");
    }

    /// Creates an order through the API and returns its id and number.
    pub async fn create_order(&self, payload: Value) -> (String, String) {
        let response = self
            .request_authenticated(Method::POST, "/api/v1/purchase-orders", Some(payload))
            .await;
        let status = response.status();
        let body = response_json(response).await;
        assert_eq!(status.as_u16(), 201, "create failed: {}", body);

        let detail = &body["detail"];
        (
            detail["purchase_order_id"]
                .as_str()
                .expect("purchase_order_id present")
                .to_string(),
            detail["purchase_order_number"]
                .as_str()
                .expect("purchase_order_number present")
                .to_string(),
        )
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self._event_task.abort();
    }
}

pub async fn response_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body bytes");
    serde_json::from_slice(&bytes).expect("json response")
}

pub fn line(product_id: &str, qty: i32, unit_price: &str) -> Value {
    json!({
        "product_id": product_id,
        "qty": qty,
        "unit_price": unit_price,
    })
}

/// Create/amend body with a single header and the given lines.
pub fn order_payload(
    order_date: &str,
    generic_type_id: Option<i32>,
    labeler_id: Option<i64>,
    items: Vec<Value>,
) -> Value {
    json!({
        "summary": {
            "order_date": order_date,
            "generic_type_id": generic_type_id,
            "labeler_id": labeler_id,
            "sub_total": "100.00",
            "total_price": "107.00",
            "vat_rate": "7",
            "vat": "7.00",
            "include_vat": true
        },
        "items": items,
    })
}
