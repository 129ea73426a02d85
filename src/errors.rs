use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "ok": false,
    "error": "Period closed: budget year 2024 month 11 is locked",
    "request_id": "req-abc123xyz"
}))]
pub struct ErrorResponse {
    /// Always `false`
    pub ok: bool,
    /// Human-readable error description
    pub error: String,
    /// Unique request identifier for support and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: error.into(),
            request_id: current_request_id(),
        }
    }
}

#[derive(Debug, thiserror::Error, Serialize)]
pub enum ServiceError {
    /// Storage-layer failure; the message is surfaced to the caller.
    #[error("Query error: {0}")]
    DatabaseError(
        #[from]
        #[serde(skip)]
        sea_orm::error::DbErr,
    ),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The accounting period an operation falls into is locked.
    #[error("Period closed: budget year {budget_year} month {month} is locked")]
    PeriodClosed { budget_year: i32, month: u32 },

    /// A document number could not be issued.
    #[error("Allocation error: {0}")]
    AllocationError(String),

}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(err: validator::ValidationErrors) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::PeriodClosed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AllocationError(_) => StatusCode::CONFLICT,
        }
    }

    /// Message carried in the error envelope. Query errors surface verbatim.
    pub fn response_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(ErrorResponse::new(self.response_message()))).into_response()
    }
}

/// API Error type for HTTP responses
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Service error: {0}")]
    ServiceError(#[from] ServiceError),

    /// Malformed path, query or body.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::ServiceError(service_error) => return service_error.into_response(),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (status, Json(ErrorResponse::new(error_message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use rstest::rstest;
    use sea_orm::error::DbErr;
    use serde_json::json;

    #[tokio::test]
    async fn service_error_response_uses_envelope_and_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::NotFound("purchase order 5".into()).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(!payload.ok);
        assert_eq!(payload.error, "Not found: purchase order 5");
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
    }

    #[tokio::test]
    async fn api_error_delegates_to_service_error() {
        let response = ApiError::ServiceError(ServiceError::PeriodClosed {
            budget_year: 2025,
            month: 11,
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload["ok"], json!(false));
        assert!(payload["error"]
            .as_str()
            .unwrap()
            .contains("budget year 2025 month 11"));
    }

    #[rstest]
    #[case(ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND)]
    #[case(ServiceError::ValidationError("x".into()), StatusCode::BAD_REQUEST)]
    #[case(ServiceError::PeriodClosed { budget_year: 2024, month: 1 }, StatusCode::UNPROCESSABLE_ENTITY)]
    #[case(ServiceError::AllocationError("x".into()), StatusCode::CONFLICT)]
    #[case(ServiceError::DatabaseError(DbErr::Custom("boom".into())), StatusCode::INTERNAL_SERVER_ERROR)]
    fn service_error_status_code_mapping(#[case] error: ServiceError, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[test]
    fn query_errors_surface_their_message() {
        let err = ServiceError::DatabaseError(DbErr::Custom(
            "relation \"purchase_orders\" does not exist".into(),
        ));
        assert!(err.response_message().contains("purchase_orders"));
    }

    #[tokio::test]
    async fn malformed_requests_are_bad_requests() {
        let response = ApiError::ValidationError("missing field `summary`".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert!(!payload.ok);
        assert!(payload.error.contains("summary"));
    }
}
