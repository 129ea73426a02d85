use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Procurement API",
        version = "1.0.0",
        description = r#"
# Procurement API

Purchase orders from preparation to approval.

## Authentication

Every `/api/v1` endpoint requires a bearer token:

```
Authorization: Bearer <your-jwt-token>
```

## Responses

Successful calls return `{"ok": true, "rows": [...]}` for listings and
`{"ok": true, "detail": {...}}` for single records. Failures return
`{"ok": false, "error": "...", "request_id": "..."}` with a matching status code.
        "#
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    modifiers(&BearerAuth),
    security(("bearer_auth" = [])),
    tags(
        (name = "purchase-orders", description = "Purchase order lifecycle and listings")
    ),
    paths(
        crate::handlers::purchase_orders::list_purchase_orders,
        crate::handlers::purchase_orders::list_by_status,
        crate::handlers::purchase_orders::create_purchase_order,
        crate::handlers::purchase_orders::amend_purchase_order,
        crate::handlers::purchase_orders::update_status,
        crate::handlers::purchase_orders::delete_purchase_order,
        crate::handlers::purchase_orders::last_order,
        crate::handlers::purchase_orders::check_holiday,
        crate::handlers::purchase_orders::order_detail,
        crate::handlers::purchase_orders::list_cancelled,
        crate::handlers::purchase_orders::list_contracts,
        crate::handlers::purchase_orders::list_no_contracts,
        crate::handlers::purchase_orders::list_no_contracts_by_requisition,
        crate::handlers::purchase_orders::list_contracts_by_requisition_status,
        crate::handlers::purchase_orders::list_receives,
        crate::handlers::purchase_orders::list_receive_items,
        crate::handlers::purchase_orders::list_generic_types,
        crate::handlers::purchase_orders::list_by_number_range,
        crate::handlers::purchase_orders::list_by_order_date,
        crate::handlers::purchase_orders::correct_number,
        crate::handlers::purchase_orders::reorder,
        crate::handlers::purchase_orders::period_status,
        crate::handlers::purchase_orders::status_logs,
    ),
    components(
        schemas(
            crate::ApiResponse<serde_json::Value>,
            crate::ResponseMeta,
            crate::handlers::purchase_orders::ByStatusRequest,
            crate::handlers::purchase_orders::StatusBatchRequest,
            crate::handlers::purchase_orders::CorrectNumberRequest,
            crate::services::procurement::OrderPayload,
            crate::services::procurement::OrderLineInput,
            crate::services::procurement::OrderSummaryInput,
            crate::services::procurement::ReorderPayload,
            crate::services::procurement::ReorderOrderInput,
            crate::services::procurement::ReorderLineInput,
            crate::services::procurement::CreatedOrder,
            crate::services::procurement::OrderDetail,
            crate::services::workflow::StatusChangeRequest,
            crate::services::workflow::TransitionReport,
            crate::services::workflow::TransitionFailure,
            crate::repositories::purchase_order_repository::PurchaseOrderSummary,
            crate::repositories::purchase_order_repository::RequisitionOrderRow,
            crate::repositories::purchase_order_repository::ReceiveSummary,
            crate::repositories::purchase_order_repository::ReceiveItemRow,
            crate::entities::purchase_order::PurchaseOrderStatus,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
