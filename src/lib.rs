//! Procurement API Library
//!
//! Purchase order lifecycle for a procurement back office: numbering,
//! accounting-period gating, status transitions with an audit log, and the
//! listings the purchasing screens are built on.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod middleware_helpers;
pub mod migrator;
pub mod openapi;
pub mod repositories;
pub mod services;
pub mod tracing;

use axum::Router;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

// App state definition
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub config: config::AppConfig,
    pub event_sender: Arc<events::EventSender>,
    pub services: handlers::AppServices,
    pub auth: Arc<auth::AuthService>,
}

impl AppState {
    /// Wires services over an existing connection and event channel.
    pub fn new(
        db: Arc<DatabaseConnection>,
        config: config::AppConfig,
        event_sender: Arc<events::EventSender>,
    ) -> Self {
        let services = handlers::AppServices::new(db.clone(), &config, event_sender.clone());
        let auth = Arc::new(auth::AuthService::new(auth::AuthConfig::from(&config)));
        Self {
            db,
            config,
            event_sender,
            services,
            auth,
        }
    }
}

/// Success envelope shared by every endpoint.
///
/// List endpoints fill `rows`, single-record endpoints fill `detail`. A
/// business-level refusal that is not an error (a holiday, a partly failed
/// status batch) sets `ok` to false and carries `error`.
#[derive(Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<ResponseMeta>,
}

#[derive(Serialize, ToSchema)]
pub struct ResponseMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    pub timestamp: String,
}

impl ResponseMeta {
    fn capture() -> Self {
        Self {
            request_id: crate::tracing::current_request_id().map(|rid| rid.as_str().to_string()),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

impl<T> ApiResponse<T> {
    fn envelope(ok: bool) -> Self {
        Self {
            ok,
            rows: None,
            detail: None,
            error: None,
            meta: Some(ResponseMeta::capture()),
        }
    }

    pub fn ok() -> Self {
        Self::envelope(true)
    }

    pub fn rows(rows: T) -> Self {
        Self {
            rows: Some(rows),
            ..Self::envelope(true)
        }
    }

    pub fn detail(detail: T) -> Self {
        Self {
            detail: Some(detail),
            ..Self::envelope(true)
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            error: Some(message),
            ..Self::envelope(false)
        }
    }
}


/// Authenticated `/api/v1` routes.
pub fn api_v1_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .nest(
            "/purchase-orders",
            handlers::purchase_orders::purchase_order_routes(),
        )
        .route_layer(axum::middleware::from_fn_with_state(
            state.auth.clone(),
            auth::auth_middleware,
        ))
}

/// Full application router without transport-level layers (CORS, compression).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_v1_routes(&state))
        .nest("/health", handlers::health::health_routes())
        .merge(openapi::swagger_ui())
        .layer(crate::tracing::configure_http_tracing())
        .layer(axum::middleware::from_fn(
            middleware_helpers::request_id::request_id_middleware,
        ))
        .with_state(state)
}
