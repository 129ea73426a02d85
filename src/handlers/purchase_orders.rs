use super::common::{
    created_response, map_service_error, parse_date, success_response, ApiJson, ApiPath, ApiQuery,
    ListParams,
};
use crate::{
    auth::AuthUser,
    errors::ApiError,
    handlers::AppState,
    repositories::purchase_order_repository::{ContractFilter, OrderFilter},
    services::{
        holiday::DayKind,
        procurement::{OrderPayload, ReorderPayload},
        workflow::StatusChangeRequest,
    },
    ApiResponse,
};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

// Request DTOs

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ByStatusRequest {
    pub status: Vec<String>,
    /// `T`, `F` or `ALL`
    #[serde(default)]
    pub contract: Option<String>,
    /// Substring of the order number
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusBatchRequest {
    pub items: Vec<StatusChangeRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CorrectNumberRequest {
    #[serde(default)]
    pub purchase_order_number: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    /// `YYYY-MM-DD`
    pub date: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DetailQuery {
    pub id: Uuid,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NumberRangeQuery {
    pub start: String,
    pub end: String,
    pub generic_type_id: Option<i32>,
    /// A status, or `ALL`
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderDateRangeQuery {
    pub start_date: String,
    pub end_date: String,
    pub generic_type_id: Option<i32>,
    /// A status, or `ALL`
    pub status: Option<String>,
}

/// List purchase orders, newest first
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders",
    params(ListParams),
    responses(
        (status = 200, description = "Purchase orders", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::PurchaseOrderSummary>>),
        (status = 401, description = "Missing or invalid token", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = state.config.page_size(params.limit);
    let rows = state
        .services
        .procurement
        .list(limit, params.offset)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Filter purchase orders by status, contract flag, number and order date
#[utoipa::path(
    post,
    path = "/api/v1/purchase-orders/by-status",
    request_body = ByStatusRequest,
    responses(
        (status = 200, description = "Matching purchase orders", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::PurchaseOrderSummary>>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn list_by_status(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<ByStatusRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let filter = OrderFilter {
        statuses: payload
            .status
            .iter()
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .collect(),
        contract: ContractFilter::parse(payload.contract.as_deref()),
        query: payload.query,
        start_date: payload.start_date,
        end_date: payload.end_date,
        limit: state.config.page_size(payload.limit),
        offset: payload.offset.unwrap_or(0),
    };
    let rows = state
        .services
        .procurement
        .list_by_status(&filter)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Create a purchase order
#[utoipa::path(
    post,
    path = "/api/v1/purchase-orders",
    request_body = OrderPayload,
    responses(
        (status = 201, description = "Purchase order created", body = crate::ApiResponse<crate::services::procurement::CreatedOrder>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 409, description = "Number could not be issued", body = crate::errors::ErrorResponse),
        (status = 422, description = "Accounting period closed", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn create_purchase_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<OrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .services
        .procurement
        .create(payload, &user.user_id)
        .await
        .map_err(map_service_error)?;

    info!(purchase_order_id = %created.purchase_order_id, "Purchase order created");
    Ok(created_response(ApiResponse::detail(created)))
}

/// Amend a purchase order, replacing all of its items
#[utoipa::path(
    put,
    path = "/api/v1/purchase-orders/{id}",
    request_body = OrderPayload,
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Purchase order amended", body = crate::ApiResponse<serde_json::Value>),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse),
        (status = 422, description = "Accounting period closed", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn amend_purchase_order(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<OrderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .procurement
        .amend(id, payload, &user.user_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::<()>::ok()))
}

/// Apply a batch of status transitions
#[utoipa::path(
    put,
    path = "/api/v1/purchase-orders/update-purchase/status",
    request_body = StatusBatchRequest,
    responses(
        (status = 200, description = "Per-item outcome; ok is false when any item failed", body = crate::ApiResponse<crate::services::workflow::TransitionReport>),
        (status = 422, description = "Current accounting period closed", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn update_status(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<StatusBatchRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let report = state
        .services
        .procurement
        .update_status(&payload.items, &user.user_id)
        .await
        .map_err(map_service_error)?;

    let mut response = ApiResponse::detail(report);
    if let Some(report) = response.detail.as_ref() {
        if !report.is_clean() {
            response.ok = false;
            response.error = Some(format!(
                "{} of {} status changes failed",
                report.failed.len(),
                payload.items.len()
            ));
        }
    }
    Ok(success_response(response))
}

/// Delete a purchase order and its items
#[utoipa::path(
    delete,
    path = "/api/v1/purchase-orders/{id}",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Purchase order deleted", body = crate::ApiResponse<serde_json::Value>),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .procurement
        .delete(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::<()>::ok()))
}

/// Most recent approved order for a vendor
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/lastorder/{labeler_id}",
    params(("labeler_id" = i64, Path, description = "Vendor ID")),
    responses(
        (status = 200, description = "Last approved order", body = crate::ApiResponse<crate::repositories::purchase_order_repository::PurchaseOrderSummary>),
        (status = 404, description = "No approved order", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn last_order(
    State(state): State<AppState>,
    ApiPath(labeler_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state
        .services
        .procurement
        .last_approved_for_vendor(labeler_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::detail(order)))
}

/// Check whether a date is usable as an order date
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/check-holiday",
    params(DateQuery),
    responses(
        (status = 200, description = "ok is false on weekends and holidays", body = crate::ApiResponse<serde_json::Value>),
        (status = 400, description = "Invalid date", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn check_holiday(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date("date", &query.date)?;
    let kind = state
        .services
        .procurement
        .check_holiday(date)
        .await
        .map_err(map_service_error)?;

    let response = match kind {
        DayKind::Workday => ApiResponse::<()>::ok(),
        DayKind::Weekend => ApiResponse::error(format!("{} falls on a weekend", date)),
        DayKind::Holiday(name) => ApiResponse::error(match name {
            Some(name) => format!("{} is a public holiday ({})", date, name),
            None => format!("{} is a public holiday", date),
        }),
    };
    Ok(success_response(response))
}

/// Order header with vendor name and items
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/detail",
    params(DetailQuery),
    responses(
        (status = 200, description = "Order detail", body = crate::ApiResponse<crate::services::procurement::OrderDetail>),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn order_detail(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DetailQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let detail = state
        .services
        .procurement
        .detail(query.id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::detail(detail)))
}

/// Cancelled purchase orders
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/by-cancel",
    responses(
        (status = 200, description = "Cancelled orders", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::PurchaseOrderSummary>>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_cancelled(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .list_cancelled()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Contract orders with requisition and committee
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/contracts",
    responses(
        (status = 200, description = "Contract orders", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::RequisitionOrderRow>>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_contracts(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .list_contracts()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Non-contract orders with requisition and committee
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/nocontracts",
    responses(
        (status = 200, description = "Non-contract orders", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::RequisitionOrderRow>>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_no_contracts(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .list_no_contracts()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Non-contract orders of one requisition
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/nocontracts-by-requisition/{purchasing_id}",
    params(("purchasing_id" = i64, Path, description = "Requisition ID")),
    responses(
        (status = 200, description = "Non-contract orders", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::RequisitionOrderRow>>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_no_contracts_by_requisition(
    State(state): State<AppState>,
    ApiPath(purchasing_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .list_no_contracts_for_requisition(purchasing_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Contract orders whose requisition has the given status
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/ordercontract/{status}",
    params(("status" = String, Path, description = "Requisition status")),
    responses(
        (status = 200, description = "Contract orders", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::RequisitionOrderRow>>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_contracts_by_requisition_status(
    State(state): State<AppState>,
    ApiPath(status): ApiPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .list_contracts_by_requisition_status(&status)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Receives recorded against an order
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/receives/{id}",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Receives", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::ReceiveSummary>>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_receives(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .receives(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Lines of a receive
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/receive-items/{receive_id}",
    params(("receive_id" = i64, Path, description = "Receive ID")),
    responses(
        (status = 200, description = "Receive lines", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::ReceiveItemRow>>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_receive_items(
    State(state): State<AppState>,
    ApiPath(receive_id): ApiPath<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .receive_items(receive_id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Generic types that select the numbering series
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/generic-types",
    responses(
        (status = 200, description = "Generic types", body = crate::ApiResponse<serde_json::Value>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_generic_types(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .generic_types()
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Orders within a number range
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/by-number",
    params(NumberRangeQuery),
    responses(
        (status = 200, description = "Orders in number order", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::PurchaseOrderSummary>>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_by_number_range(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<NumberRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .list_by_number_range(
            &query.start,
            &query.end,
            query.generic_type_id,
            query.status.as_deref(),
        )
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Orders dated within a range, for printing
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/by-order-date",
    params(OrderDateRangeQuery),
    responses(
        (status = 200, description = "Orders in number order", body = crate::ApiResponse<Vec<crate::repositories::purchase_order_repository::PurchaseOrderSummary>>),
        (status = 400, description = "Invalid date range", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn list_by_order_date(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<OrderDateRangeQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let start = parse_date("start_date", &query.start_date)?;
    let end = parse_date("end_date", &query.end_date)?;
    let rows = state
        .services
        .procurement
        .list_by_order_date_range(start, end, query.generic_type_id, query.status.as_deref())
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Reassign an order's number
#[utoipa::path(
    put,
    path = "/api/v1/purchase-orders/newponumber/{id}",
    request_body = CorrectNumberRequest,
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Number updated", body = crate::ApiResponse<serde_json::Value>),
        (status = 400, description = "Number missing", body = crate::errors::ErrorResponse),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn correct_number(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CorrectNumberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state
        .services
        .procurement
        .correct_number(id, payload.purchase_order_number)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::<()>::ok()))
}

/// Create reorder purchase orders
#[utoipa::path(
    post,
    path = "/api/v1/purchase-orders/purchase-reorder",
    request_body = ReorderPayload,
    responses(
        (status = 201, description = "Orders created", body = crate::ApiResponse<Vec<crate::services::procurement::CreatedOrder>>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse),
        (status = 422, description = "Current accounting period closed", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn reorder(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<ReorderPayload>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state
        .services
        .procurement
        .reorder(payload, &user.user_id)
        .await
        .map_err(map_service_error)?;
    Ok(created_response(ApiResponse::rows(created)))
}

/// Accounting period rows for a date's budget year and month
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/period/status",
    params(DateQuery),
    responses(
        (status = 200, description = "Period rows", body = crate::ApiResponse<serde_json::Value>),
        (status = 400, description = "Invalid date", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn period_status(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<DateQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = parse_date("date", &query.date)?;
    let rows = state
        .services
        .procurement
        .period_status(date)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

/// Status history of an order
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/{id}/status-logs",
    params(("id" = Uuid, Path, description = "Purchase order ID")),
    responses(
        (status = 200, description = "Status log rows, oldest first", body = crate::ApiResponse<serde_json::Value>)
    ),
    tag = "purchase-orders"
)]
pub async fn status_logs(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let rows = state
        .services
        .procurement
        .status_logs(id)
        .await
        .map_err(map_service_error)?;
    Ok(success_response(ApiResponse::rows(rows)))
}

pub fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_purchase_orders).post(create_purchase_order))
        .route("/by-status", post(list_by_status))
        .route("/update-purchase/status", put(update_status))
        .route("/by-cancel", get(list_cancelled))
        .route("/contracts", get(list_contracts))
        .route("/nocontracts", get(list_no_contracts))
        .route("/ordernocontract", get(list_no_contracts))
        .route(
            "/nocontracts-by-requisition/:purchasing_id",
            get(list_no_contracts_by_requisition),
        )
        .route(
            "/ordercontract/:status",
            get(list_contracts_by_requisition_status),
        )
        .route("/receives/:id", get(list_receives))
        .route("/receive-items/:receive_id", get(list_receive_items))
        .route("/generic-types", get(list_generic_types))
        .route("/by-number", get(list_by_number_range))
        .route("/by-order-date", get(list_by_order_date))
        .route("/lastorder/:labeler_id", get(last_order))
        .route("/check-holiday", get(check_holiday))
        .route("/detail", get(order_detail))
        .route("/period/status", get(period_status))
        .route("/newponumber/:id", put(correct_number))
        .route("/purchase-reorder", post(reorder))
        .route("/:id/status-logs", get(status_logs))
        .route(
            "/:id",
            put(amend_purchase_order).delete(delete_purchase_order),
        )
}
