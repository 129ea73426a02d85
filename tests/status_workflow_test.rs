mod common;

use assert_matches::assert_matches;
use chrono::Local;
use procurement_api::{
    entities::purchase_order::PurchaseOrderStatus,
    errors::ServiceError,
    services::{period::FiscalCalendar, workflow::StatusChangeRequest},
};
use uuid::Uuid;

use common::{line, order_payload, TestApp};

fn change(id: Uuid, status: &str) -> StatusChangeRequest {
    StatusChangeRequest {
        purchase_order_id: id,
        purchase_order_status: status.to_string(),
        from_status: Some("PREPARED".to_string()),
        cancel_comment: None,
    }
}

async fn new_order(app: &TestApp) -> Uuid {
    let (id, _) = app
        .create_order(order_payload("2024-03-11", Some(1), None, vec![line("P-1", 2, "5.00")]))
        .await;
    Uuid::parse_str(&id).unwrap()
}

#[tokio::test]
async fn confirm_and_approve_stamp_dates_and_log() {
    let app = TestApp::new().await;
    let procurement = &app.state.services.procurement;
    let id = new_order(&app).await;

    let report = procurement
        .update_status(&[change(id, "confirmed")], "buyer-01")
        .await
        .unwrap();
    assert_eq!(report.applied, vec![id]);
    assert!(report.is_clean());

    let mut approve = change(id, "APPROVED");
    approve.from_status = Some("CONFIRMED".into());
    procurement.update_status(&[approve], "manager-02").await.unwrap();

    let detail = procurement.detail(id).await.unwrap();
    assert_eq!(detail.order.purchase_order_status, PurchaseOrderStatus::Approved);
    assert!(detail.order.confirmed_date.is_some());
    assert!(detail.order.approved_date.is_some());

    let logs = procurement.status_logs(id).await.unwrap();
    let steps: Vec<(Option<&str>, &str, Option<&str>)> = logs
        .iter()
        .map(|l| {
            (
                l.from_status.as_deref(),
                l.to_status.as_str(),
                l.people_user_id.as_deref(),
            )
        })
        .collect();
    assert_eq!(
        steps,
        vec![
            (Some("PREPARED"), "CONFIRMED", Some("buyer-01")),
            (Some("CONFIRMED"), "APPROVED", Some("manager-02")),
        ]
    );
}

#[tokio::test]
async fn cancel_flags_the_order_without_touching_its_status() {
    let app = TestApp::new().await;
    let procurement = &app.state.services.procurement;
    let id = new_order(&app).await;

    let mut cancel = change(id, "CANCEL");
    cancel.cancel_comment = Some("vendor out of stock".into());
    let report = procurement.update_status(&[cancel], "buyer-01").await.unwrap();
    assert_eq!(report.applied, vec![id]);

    let order = procurement.detail(id).await.unwrap().order;
    assert!(order.is_cancel);
    assert_eq!(order.purchase_order_status, PurchaseOrderStatus::Prepared);
    assert_eq!(order.cancel_comment.as_deref(), Some("vendor out of stock"));
    assert!(order.cancel_date.is_some());

    let cancelled = procurement.list_cancelled().await.unwrap();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].purchase_order_id, id);

    let logs = procurement.status_logs(id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].to_status, "CANCEL");

    procurement
        .update_status(&[change(id, "PREPARED")], "buyer-01")
        .await
        .unwrap();
    let order = procurement.detail(id).await.unwrap().order;
    assert!(!order.is_cancel);
    assert_eq!(order.cancel_comment, None);
}

#[tokio::test]
async fn unknown_targets_are_ignored_without_a_log() {
    let app = TestApp::new().await;
    let procurement = &app.state.services.procurement;
    let id = new_order(&app).await;

    let report = procurement
        .update_status(&[change(id, "RECEIVED")], "buyer-01")
        .await
        .unwrap();
    assert!(report.applied.is_empty());
    assert_eq!(report.ignored, vec![id]);
    assert!(report.is_clean());

    let order = procurement.detail(id).await.unwrap().order;
    assert_eq!(order.purchase_order_status, PurchaseOrderStatus::Prepared);
    assert!(procurement.status_logs(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn best_effort_batches_keep_going_past_failures() {
    let app = TestApp::new().await;
    let procurement = &app.state.services.procurement;
    let first = new_order(&app).await;
    let second = new_order(&app).await;
    let missing = Uuid::new_v4();

    let report = procurement
        .update_status(
            &[
                change(first, "CONFIRMED"),
                change(missing, "CONFIRMED"),
                change(second, "CONFIRMED"),
            ],
            "buyer-01",
        )
        .await
        .unwrap();

    assert_eq!(report.applied, vec![first, second]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].purchase_order_id, missing);
    assert!(!report.rolled_back);

    for id in [first, second] {
        let order = procurement.detail(id).await.unwrap().order;
        assert_eq!(order.purchase_order_status, PurchaseOrderStatus::Confirmed);
    }
    assert!(procurement.status_logs(missing).await.unwrap().is_empty());
}

#[tokio::test]
async fn strict_batches_roll_back_on_the_first_failure() {
    let app = TestApp::with_config(|cfg| cfg.status_batch_mode = "strict".into()).await;
    let procurement = &app.state.services.procurement;
    let id = new_order(&app).await;
    let missing = Uuid::new_v4();

    let report = procurement
        .update_status(
            &[change(id, "CONFIRMED"), change(missing, "CONFIRMED")],
            "buyer-01",
        )
        .await
        .unwrap();

    assert!(report.rolled_back);
    assert!(report.applied.is_empty());
    assert_eq!(report.failed[0].purchase_order_id, missing);

    let order = procurement.detail(id).await.unwrap().order;
    assert_eq!(order.purchase_order_status, PurchaseOrderStatus::Prepared);
    assert_eq!(order.confirmed_date, None);
    assert!(procurement.status_logs(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn closed_current_period_blocks_the_whole_batch() {
    let app = TestApp::new().await;
    let procurement = &app.state.services.procurement;
    let id = new_order(&app).await;

    let calendar = FiscalCalendar::new(app.state.config.fiscal_year_start_month);
    let (budget_year, month) = calendar.period_of(Local::now().date_naive());
    app.seed_period(budget_year, month as i32, true).await;

    let result = procurement
        .update_status(&[change(id, "APPROVED")], "buyer-01")
        .await;
    assert_matches!(result, Err(ServiceError::PeriodClosed { .. }));

    let order = procurement.detail(id).await.unwrap().order;
    assert_eq!(order.purchase_order_status, PurchaseOrderStatus::Prepared);
    assert!(procurement.status_logs(id).await.unwrap().is_empty());
}

#[tokio::test]
async fn empty_batches_are_rejected() {
    let app = TestApp::new().await;
    let result = app.state.services.procurement.update_status(&[], "buyer-01").await;
    assert_matches!(result, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn amend_logs_even_when_the_status_is_unchanged() {
    let app = TestApp::new().await;
    let procurement = &app.state.services.procurement;
    let id = new_order(&app).await;

    let payload = serde_json::from_value(order_payload(
        "2024-03-11",
        Some(1),
        None,
        vec![line("P-2", 1, "9.99")],
    ))
    .unwrap();
    procurement.amend(id, payload, "buyer-01").await.unwrap();

    let logs = procurement.status_logs(id).await.unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].from_status.as_deref(), Some("PREPARED"));
    assert_eq!(logs[0].to_status, "PREPARED");

    let detail = procurement.detail(id).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].product_id, "P-2");
}

#[tokio::test]
async fn amend_into_a_closed_period_changes_nothing() {
    let app = TestApp::new().await;
    let procurement = &app.state.services.procurement;
    let id = new_order(&app).await;
    app.seed_period(2024, 3, true).await;

    let payload = serde_json::from_value(order_payload(
        "2024-03-11",
        Some(1),
        None,
        vec![line("P-9", 4, "1.00")],
    ))
    .unwrap();
    let result = procurement.amend(id, payload, "buyer-01").await;
    assert_matches!(
        result,
        Err(ServiceError::PeriodClosed {
            budget_year: 2024,
            month: 3
        })
    );

    assert!(procurement.status_logs(id).await.unwrap().is_empty());
    let detail = procurement.detail(id).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].product_id, "P-1");
    assert_eq!(detail.items[0].qty, 2);
}

#[tokio::test]
async fn repeating_an_amend_replaces_rather_than_duplicates_items() {
    let app = TestApp::new().await;
    let procurement = &app.state.services.procurement;
    let id = new_order(&app).await;

    for _ in 0..2 {
        let payload = serde_json::from_value(order_payload(
            "2024-03-11",
            Some(1),
            None,
            vec![line("P-1", 10, "5.00")],
        ))
        .unwrap();
        procurement.amend(id, payload, "buyer-01").await.unwrap();
    }

    let detail = procurement.detail(id).await.unwrap();
    assert_eq!(detail.items.len(), 1);
    assert_eq!(detail.items[0].product_id, "P-1");
    assert_eq!(detail.items[0].qty, 10);
    assert_eq!(procurement.status_logs(id).await.unwrap().len(), 2);
}
