//! Batch status transitions over purchase orders.
//!
//! Every requested status is first planned against a fixed transition table.
//! Targets outside the table are ignored rather than rejected, and every
//! applied transition appends one status log row.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use metrics::counter;
use sea_orm::{ActiveValue::Set, ConnectionTrait, DatabaseConnection, TransactionTrait};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    config::BatchMode,
    entities::purchase_order::{self, PurchaseOrderStatus},
    errors::ServiceError,
    events::{Event, EventSender},
    repositories::PurchaseOrderRepository,
    services::period::PeriodService,
};

/// One line of a status batch.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusChangeRequest {
    pub purchase_order_id: Uuid,
    /// Requested target status.
    pub purchase_order_status: String,
    /// Status the caller believes the order is in. Logged as given.
    #[serde(default)]
    pub from_status: Option<String>,
    #[serde(default)]
    pub cancel_comment: Option<String>,
}

/// Side effects of an accepted transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionEffect {
    Confirm,
    Approve,
    Cancel { comment: Option<String> },
    Reopen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Apply(TransitionEffect),
    Ignore,
}

impl Transition {
    /// Looks up the effect for a requested target status. The current status
    /// never affects the outcome.
    pub fn plan(requested: &str, cancel_comment: Option<String>) -> Self {
        match PurchaseOrderStatus::parse(requested) {
            Some(PurchaseOrderStatus::Confirmed) => Self::Apply(TransitionEffect::Confirm),
            Some(PurchaseOrderStatus::Approved) => Self::Apply(TransitionEffect::Approve),
            Some(PurchaseOrderStatus::Cancel) => Self::Apply(TransitionEffect::Cancel {
                comment: cancel_comment,
            }),
            Some(PurchaseOrderStatus::Prepared) => Self::Apply(TransitionEffect::Reopen),
            None => Self::Ignore,
        }
    }
}

impl TransitionEffect {
    pub fn target(&self) -> PurchaseOrderStatus {
        match self {
            Self::Confirm => PurchaseOrderStatus::Confirmed,
            Self::Approve => PurchaseOrderStatus::Approved,
            Self::Cancel { .. } => PurchaseOrderStatus::Cancel,
            Self::Reopen => PurchaseOrderStatus::Prepared,
        }
    }

    /// Column changes for this effect. Cancelling leaves the status column alone.
    pub fn changes(&self, now: DateTime<Utc>) -> purchase_order::ActiveModel {
        let mut changes = purchase_order::ActiveModel::default();
        match self {
            Self::Confirm => {
                changes.purchase_order_status = Set(PurchaseOrderStatus::Confirmed);
                changes.confirmed_date = Set(Some(now));
            }
            Self::Approve => {
                changes.purchase_order_status = Set(PurchaseOrderStatus::Approved);
                changes.approved_date = Set(Some(now));
            }
            Self::Cancel { comment } => {
                changes.is_cancel = Set(true);
                changes.cancel_date = Set(Some(now));
                changes.cancel_comment = Set(comment.clone());
            }
            Self::Reopen => {
                changes.purchase_order_status = Set(PurchaseOrderStatus::Prepared);
                changes.is_cancel = Set(false);
                changes.cancel_date = Set(None);
                changes.cancel_comment = Set(None);
            }
        }
        changes
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TransitionFailure {
    pub purchase_order_id: Uuid,
    pub error: String,
}

/// Per-item outcome of a status batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct TransitionReport {
    pub applied: Vec<Uuid>,
    pub ignored: Vec<Uuid>,
    pub failed: Vec<TransitionFailure>,
    /// Set when a strict batch was rolled back; `applied` is then empty.
    pub rolled_back: bool,
}

impl TransitionReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone)]
pub struct StatusWorkflow {
    db: Arc<DatabaseConnection>,
    periods: PeriodService,
    event_sender: Arc<EventSender>,
    mode: BatchMode,
}

impl StatusWorkflow {
    pub fn new(
        db: Arc<DatabaseConnection>,
        periods: PeriodService,
        event_sender: Arc<EventSender>,
        mode: BatchMode,
    ) -> Self {
        Self {
            db,
            periods,
            event_sender,
            mode,
        }
    }

    /// Applies a batch of transitions on behalf of `actor`.
    ///
    /// The current accounting period must be open; otherwise nothing is
    /// touched. Item failures are reported in the returned report.
    #[instrument(skip(self, requests), fields(batch_size = requests.len(), mode = ?self.mode))]
    pub async fn apply(
        &self,
        requests: &[StatusChangeRequest],
        actor: &str,
    ) -> Result<TransitionReport, ServiceError> {
        if requests.is_empty() {
            return Err(ServiceError::ValidationError(
                "at least one status change is required".into(),
            ));
        }
        self.periods.ensure_current_open().await?;

        let (report, events) = match self.mode {
            BatchMode::BestEffort => self.apply_best_effort(requests, actor).await?,
            BatchMode::Strict => self.apply_strict(requests, actor).await?,
        };

        for event in events {
            self.event_sender.send_or_log(event).await;
        }

        info!(
            applied = report.applied.len(),
            ignored = report.ignored.len(),
            failed = report.failed.len(),
            "Status batch processed"
        );
        Ok(report)
    }

    async fn apply_best_effort(
        &self,
        requests: &[StatusChangeRequest],
        actor: &str,
    ) -> Result<(TransitionReport, Vec<Event>), ServiceError> {
        let mut report = TransitionReport::default();
        let mut events = Vec::new();

        for request in requests {
            let effect = match Transition::plan(
                &request.purchase_order_status,
                request.cancel_comment.clone(),
            ) {
                Transition::Apply(effect) => effect,
                Transition::Ignore => {
                    report.ignored.push(request.purchase_order_id);
                    continue;
                }
            };

            let txn = self.db.begin().await?;
            match apply_one(&txn, request, &effect, actor).await {
                Ok(()) => {
                    txn.commit().await?;
                    report.applied.push(request.purchase_order_id);
                    events.push(status_changed(request, &effect));
                }
                Err(e) => {
                    txn.rollback().await?;
                    warn!(purchase_order_id = %request.purchase_order_id, "Status change failed: {}", e);
                    counter!("procurement.status.failures", 1);
                    report.failed.push(TransitionFailure {
                        purchase_order_id: request.purchase_order_id,
                        error: e.response_message(),
                    });
                }
            }
        }

        Ok((report, events))
    }

    async fn apply_strict(
        &self,
        requests: &[StatusChangeRequest],
        actor: &str,
    ) -> Result<(TransitionReport, Vec<Event>), ServiceError> {
        let mut report = TransitionReport::default();
        let mut events = Vec::new();
        let txn = self.db.begin().await?;

        for request in requests {
            let effect = match Transition::plan(
                &request.purchase_order_status,
                request.cancel_comment.clone(),
            ) {
                Transition::Apply(effect) => effect,
                Transition::Ignore => {
                    report.ignored.push(request.purchase_order_id);
                    continue;
                }
            };

            if let Err(e) = apply_one(&txn, request, &effect, actor).await {
                txn.rollback().await?;
                warn!(purchase_order_id = %request.purchase_order_id, "Strict status batch rolled back: {}", e);
                counter!("procurement.status.failures", 1);
                report.applied.clear();
                report.rolled_back = true;
                report.failed.push(TransitionFailure {
                    purchase_order_id: request.purchase_order_id,
                    error: e.response_message(),
                });
                return Ok((report, Vec::new()));
            }
            report.applied.push(request.purchase_order_id);
            events.push(status_changed(request, &effect));
        }

        txn.commit().await?;
        Ok((report, events))
    }
}

async fn apply_one<C: ConnectionTrait>(
    conn: &C,
    request: &StatusChangeRequest,
    effect: &TransitionEffect,
    actor: &str,
) -> Result<(), ServiceError> {
    PurchaseOrderRepository::update_order(
        conn,
        request.purchase_order_id,
        effect.changes(Utc::now()),
    )
    .await?;
    PurchaseOrderRepository::append_status_log(
        conn,
        request.purchase_order_id,
        request.from_status.clone(),
        effect.target().as_str(),
        actor,
    )
    .await?;
    counter!("procurement.status.transitions", 1, "to" => effect.target().as_str());
    Ok(())
}

fn status_changed(request: &StatusChangeRequest, effect: &TransitionEffect) -> Event {
    Event::PurchaseOrderStatusChanged {
        purchase_order_id: request.purchase_order_id,
        from_status: request.from_status.clone(),
        to_status: effect.target().to_string(),
    }
}
