use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveValue::Set, DatabaseConnection, EntityTrait, QueryOrder, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    entities::{
        accounting_period, generic_type, purchase_order, purchase_order_item,
        purchase_order_status_log, purchase_order::PurchaseOrderStatus,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    repositories::purchase_order_repository::{
        OrderFilter, PurchaseOrderRepository, PurchaseOrderSummary, ReceiveItemRow,
        ReceiveSummary, RequisitionOrderRow,
    },
    services::{
        holiday::{DayKind, HolidayService},
        period::PeriodService,
        serial::{issue_with, NumberingSeries, SerialService},
        workflow::{StatusChangeRequest, StatusWorkflow, TransitionReport},
    },
};

fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value >= Decimal::ZERO {
        Ok(())
    } else {
        let mut err = ValidationError::new("range");
        err.message = Some("Amount must not be negative".into());
        Err(err)
    }
}

/// A product line on an order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderLineInput {
    #[validate(length(min = 1))]
    pub product_id: String,
    #[serde(default)]
    pub generic_id: Option<String>,
    /// Quantity in the purchasing unit.
    #[validate(range(min = 1))]
    pub qty: i32,
    #[serde(alias = "cost")]
    #[validate(custom = "validate_non_negative")]
    pub unit_price: Decimal,
    #[serde(default)]
    pub unit_generic_id: Option<i64>,
    /// Line total. Computed as `unit_price * qty` when omitted.
    #[serde(default, alias = "total_cost")]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub total_small_qty: Option<i32>,
    #[serde(default, alias = "is_giveaway")]
    pub giveaway: bool,
}

impl OrderLineInput {
    pub fn line_total(&self) -> Decimal {
        self.total_price
            .unwrap_or_else(|| self.unit_price * Decimal::from(self.qty))
    }

    fn into_active_model(self, purchase_order_id: Uuid) -> purchase_order_item::ActiveModel {
        let total_price = self.line_total();
        purchase_order_item::ActiveModel {
            purchase_order_id: Set(purchase_order_id),
            product_id: Set(self.product_id),
            generic_id: Set(self.generic_id),
            qty: Set(self.qty),
            unit_price: Set(self.unit_price),
            unit_generic_id: Set(self.unit_generic_id),
            total_price: Set(total_price),
            total_small_qty: Set(self.total_small_qty),
            giveaway: Set(self.giveaway),
            ..Default::default()
        }
    }
}

/// Header fields of an order as submitted on create and amend.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderSummaryInput {
    /// Client-chosen id; generated when omitted.
    #[serde(default)]
    pub purchase_order_id: Option<Uuid>,
    /// Explicit number. When omitted on create, one is issued from the series of `generic_type_id`.
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub purchase_order_number: Option<String>,
    #[serde(default)]
    pub purchase_order_book_number: Option<String>,
    #[serde(default)]
    pub purchasing_id: Option<i64>,
    #[serde(default)]
    pub labeler_id: Option<i64>,
    #[serde(default)]
    pub verify_committee_id: Option<i64>,
    #[serde(default)]
    pub purchase_method_id: Option<i64>,
    #[serde(default)]
    pub generic_type_id: Option<i32>,
    pub order_date: NaiveDate,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub discount_percent: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub discount_cash: Decimal,
    #[serde(default)]
    pub include_vat: bool,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub vat_rate: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub vat: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub sub_total: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub total_price: Decimal,
    #[serde(default)]
    pub budget_year: Option<i32>,
    #[serde(default)]
    pub budget_detail_id: Option<i64>,
    #[serde(default)]
    pub purchase_type: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub ship_to: Option<String>,
    #[serde(default)]
    pub vendor_contact_name: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(default)]
    pub is_reorder: bool,
    #[serde(default)]
    pub is_contract: bool,
    /// Status to record on amend. Ignored on create.
    #[serde(default)]
    pub purchase_order_status: Option<String>,
    /// Status the caller saw before amending; logged as given.
    #[serde(default)]
    pub from_status: Option<String>,
}

impl OrderSummaryInput {
    /// Editable header columns shared by create and amend.
    fn editable_fields(&self) -> purchase_order::ActiveModel {
        purchase_order::ActiveModel {
            purchase_order_book_number: Set(self.purchase_order_book_number.clone()),
            purchasing_id: Set(self.purchasing_id),
            labeler_id: Set(self.labeler_id),
            verify_committee_id: Set(self.verify_committee_id),
            purchase_method_id: Set(self.purchase_method_id),
            generic_type_id: Set(self.generic_type_id),
            order_date: Set(self.order_date),
            discount_percent: Set(self.discount_percent),
            discount_cash: Set(self.discount_cash),
            include_vat: Set(self.include_vat),
            vat_rate: Set(self.vat_rate),
            vat: Set(self.vat),
            sub_total: Set(self.sub_total),
            total_price: Set(self.total_price),
            budget_year: Set(self.budget_year),
            budget_detail_id: Set(self.budget_detail_id),
            purchase_type: Set(self.purchase_type.clone()),
            comment: Set(self.comment.clone()),
            ship_to: Set(self.ship_to.clone()),
            vendor_contact_name: Set(self.vendor_contact_name.clone()),
            delivery: Set(self.delivery.clone()),
            is_reorder: Set(self.is_reorder),
            is_contract: Set(self.is_contract),
            ..Default::default()
        }
    }
}

/// Body of create and amend requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderPayload {
    pub items: Vec<OrderLineInput>,
    pub summary: OrderSummaryInput,
}

impl OrderPayload {
    fn validate_all(&self) -> Result<(), ServiceError> {
        if self.items.is_empty() {
            return Err(ServiceError::ValidationError(
                "an order needs at least one item".into(),
            ));
        }
        self.summary.validate()?;
        for item in &self.items {
            item.validate()?;
        }
        Ok(())
    }
}

/// A new order generated from a reorder suggestion.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct ReorderOrderInput {
    pub purchase_order_id: Uuid,
    #[serde(default)]
    pub labeler_id: Option<i64>,
    #[serde(default)]
    pub is_contract: bool,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub sub_total: Decimal,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub vat_rate: Decimal,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub vat: Decimal,
    #[serde(default)]
    pub budget_year: Option<i32>,
    #[serde(default)]
    #[validate(custom = "validate_non_negative")]
    pub total_price: Decimal,
    pub order_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReorderLineInput {
    pub purchase_order_id: Uuid,
    #[serde(flatten)]
    pub line: OrderLineInput,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReorderPayload {
    pub orders: Vec<ReorderOrderInput>,
    pub items: Vec<ReorderLineInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreatedOrder {
    pub purchase_order_id: Uuid,
    pub purchase_order_number: Option<String>,
}

/// An order with its vendor name and items.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OrderDetail {
    #[schema(value_type = Object)]
    pub order: purchase_order::Model,
    pub labeler_name: Option<String>,
    #[schema(value_type = Vec<Object>)]
    pub items: Vec<purchase_order_item::Model>,
}

/// Number-range or date-range lookup; `ALL` or an empty status disables the status filter.
fn status_filter(status: Option<&str>) -> Option<&str> {
    status
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.eq_ignore_ascii_case("ALL"))
}

/// Purchase order use cases: creation, amendment, status batches and lookups.
#[derive(Clone)]
pub struct ProcurementService {
    db: Arc<DatabaseConnection>,
    repository: PurchaseOrderRepository,
    serials: SerialService,
    periods: PeriodService,
    holidays: HolidayService,
    workflow: StatusWorkflow,
    event_sender: Arc<EventSender>,
}

impl ProcurementService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        serials: SerialService,
        periods: PeriodService,
        holidays: HolidayService,
        workflow: StatusWorkflow,
        event_sender: Arc<EventSender>,
    ) -> Self {
        Self {
            repository: PurchaseOrderRepository::new(db.clone()),
            db,
            serials,
            periods,
            holidays,
            workflow,
            event_sender,
        }
    }

    /// Creates an order in `PREPARED` status.
    ///
    /// The order date's period is checked before anything is written. A
    /// number is issued from the generic type's series unless one is supplied.
    /// An issued number is committed on its own, so a later failure leaves a gap.
    #[instrument(skip(self, payload), fields(generic_type_id = ?payload.summary.generic_type_id))]
    pub async fn create(
        &self,
        payload: OrderPayload,
        actor: &str,
    ) -> Result<CreatedOrder, ServiceError> {
        payload.validate_all()?;
        self.periods.ensure_open(payload.summary.order_date).await?;

        let number = match payload.summary.purchase_order_number.clone() {
            Some(number) => number,
            None => {
                self.serials
                    .issue_for_generic_type(payload.summary.generic_type_id)
                    .await?
            }
        };

        let id = payload.summary.purchase_order_id.unwrap_or_else(Uuid::new_v4);
        let now = Utc::now();
        let mut order = payload.summary.editable_fields();
        order.purchase_order_id = Set(id);
        order.purchase_order_number = Set(Some(number.clone()));
        order.purchase_order_status = Set(PurchaseOrderStatus::Prepared);
        order.is_cancel = Set(false);
        order.cancel_comment = Set(None);
        order.cancel_date = Set(None);
        order.confirmed_date = Set(None);
        order.approved_date = Set(None);
        order.people_user_id = Set(Some(actor.to_string()));
        order.created_at = Set(now);
        order.updated_at = Set(now);

        let items = payload
            .items
            .into_iter()
            .map(|item| item.into_active_model(id))
            .collect::<Vec<_>>();

        let txn = self.db.begin().await?;
        PurchaseOrderRepository::insert_order(&txn, order).await?;
        PurchaseOrderRepository::insert_items(&txn, items).await?;
        txn.commit().await?;

        info!(purchase_order_id = %id, purchase_order_number = %number, "Purchase order created");
        self.event_sender
            .send_or_log(Event::PurchaseOrderCreated {
                purchase_order_id: id,
                purchase_order_number: Some(number.clone()),
            })
            .await;

        Ok(CreatedOrder {
            purchase_order_id: id,
            purchase_order_number: Some(number),
        })
    }

    /// Rewrites an order's header, replaces all of its items and appends a
    /// status log row, even when the status did not change.
    #[instrument(skip(self, payload))]
    pub async fn amend(
        &self,
        id: Uuid,
        payload: OrderPayload,
        actor: &str,
    ) -> Result<(), ServiceError> {
        payload.validate_all()?;
        let requested_status = match payload.summary.purchase_order_status.as_deref() {
            Some(raw) => Some(PurchaseOrderStatus::parse(raw).ok_or_else(|| {
                ServiceError::ValidationError(format!("unknown purchase order status {}", raw))
            })?),
            None => None,
        };
        self.periods.ensure_open(payload.summary.order_date).await?;

        let (current, _) = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("purchase order {}", id)))?;

        let to_status = requested_status.unwrap_or(current.purchase_order_status);
        let from_status = payload
            .summary
            .from_status
            .clone()
            .or_else(|| Some(current.purchase_order_status.to_string()));

        let mut changes = payload.summary.editable_fields();
        changes.purchase_order_status = Set(to_status);

        let item_count = payload.items.len();
        let items = payload
            .items
            .into_iter()
            .map(|item| item.into_active_model(id))
            .collect::<Vec<_>>();

        let txn = self.db.begin().await?;
        PurchaseOrderRepository::update_order(&txn, id, changes).await?;
        PurchaseOrderRepository::replace_items(&txn, id, items).await?;
        PurchaseOrderRepository::append_status_log(
            &txn,
            id,
            from_status,
            to_status.as_str(),
            actor,
        )
        .await?;
        txn.commit().await?;

        info!(purchase_order_id = %id, item_count, "Purchase order amended");
        self.event_sender
            .send_or_log(Event::PurchaseOrderAmended {
                purchase_order_id: id,
                item_count,
            })
            .await;
        Ok(())
    }

    pub async fn update_status(
        &self,
        requests: &[StatusChangeRequest],
        actor: &str,
    ) -> Result<TransitionReport, ServiceError> {
        self.workflow.apply(requests, actor).await
    }

    /// Deletes an order and its items.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let txn = self.db.begin().await?;
        PurchaseOrderRepository::remove(&txn, id).await?;
        txn.commit().await?;

        info!(purchase_order_id = %id, "Purchase order deleted");
        self.event_sender
            .send_or_log(Event::PurchaseOrderDeleted(id))
            .await;
        Ok(())
    }

    /// Explicitly reassigns an order's number.
    #[instrument(skip(self))]
    pub async fn correct_number(
        &self,
        id: Uuid,
        purchase_order_number: Option<String>,
    ) -> Result<(), ServiceError> {
        let number = purchase_order_number
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| {
                ServiceError::ValidationError("purchase_order_number is required".into())
            })?;

        let changes = purchase_order::ActiveModel {
            purchase_order_number: Set(Some(number.clone())),
            ..Default::default()
        };
        PurchaseOrderRepository::update_order(&*self.db, id, changes).await?;

        self.event_sender
            .send_or_log(Event::PurchaseOrderNumberAssigned {
                purchase_order_id: id,
                purchase_order_number: number,
            })
            .await;
        Ok(())
    }

    /// Inserts reorder orders with fresh `PO` numbers, all in one transaction.
    #[instrument(skip(self, payload), fields(orders = payload.orders.len(), items = payload.items.len()))]
    pub async fn reorder(
        &self,
        payload: ReorderPayload,
        actor: &str,
    ) -> Result<Vec<CreatedOrder>, ServiceError> {
        if payload.orders.is_empty() || payload.items.is_empty() {
            return Err(ServiceError::ValidationError(
                "reorder needs at least one order and one item".into(),
            ));
        }
        let ids: HashSet<Uuid> = payload.orders.iter().map(|o| o.purchase_order_id).collect();
        for order in &payload.orders {
            order.validate()?;
        }
        for item in &payload.items {
            item.line.validate()?;
            if !ids.contains(&item.purchase_order_id) {
                return Err(ServiceError::ValidationError(format!(
                    "item {} references order {} which is not part of the reorder",
                    item.line.product_id, item.purchase_order_id
                )));
            }
        }
        self.periods.ensure_current_open().await?;

        let now = Utc::now();
        let txn = self.db.begin().await?;
        let mut created = Vec::with_capacity(payload.orders.len());
        for input in payload.orders {
            let number = issue_with(&txn, NumberingSeries::Po.code()).await?;
            let order = purchase_order::ActiveModel {
                purchase_order_id: Set(input.purchase_order_id),
                purchase_order_number: Set(Some(number.clone())),
                labeler_id: Set(input.labeler_id),
                is_contract: Set(input.is_contract),
                sub_total: Set(input.sub_total),
                delivery: Set(input.delivery),
                vat_rate: Set(input.vat_rate),
                vat: Set(input.vat),
                is_reorder: Set(true),
                budget_year: Set(input.budget_year),
                total_price: Set(input.total_price),
                order_date: Set(input.order_date),
                discount_percent: Set(Decimal::ZERO),
                discount_cash: Set(Decimal::ZERO),
                include_vat: Set(input.vat > Decimal::ZERO),
                is_cancel: Set(false),
                purchase_order_status: Set(PurchaseOrderStatus::Prepared),
                people_user_id: Set(Some(actor.to_string())),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };
            PurchaseOrderRepository::insert_order(&txn, order).await?;
            created.push(CreatedOrder {
                purchase_order_id: input.purchase_order_id,
                purchase_order_number: Some(number),
            });
        }

        let items = payload
            .items
            .into_iter()
            .map(|item| item.line.into_active_model(item.purchase_order_id))
            .collect::<Vec<_>>();
        PurchaseOrderRepository::insert_items(&txn, items).await?;
        txn.commit().await?;

        for order in &created {
            self.event_sender
                .send_or_log(Event::PurchaseOrderCreated {
                    purchase_order_id: order.purchase_order_id,
                    purchase_order_number: order.purchase_order_number.clone(),
                })
                .await;
        }
        info!(count = created.len(), "Reorder batch created");
        Ok(created)
    }

    pub async fn list(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        self.repository.list(limit, offset).await
    }

    pub async fn list_by_status(
        &self,
        filter: &OrderFilter,
    ) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        if filter.statuses.is_empty() {
            return Err(ServiceError::ValidationError(
                "at least one status is required".into(),
            ));
        }
        self.repository.list_by_status(filter).await
    }

    pub async fn list_cancelled(&self) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        self.repository.list_cancelled().await
    }

    pub async fn list_contracts(&self) -> Result<Vec<RequisitionOrderRow>, ServiceError> {
        self.repository.list_by_contract(true, None, None).await
    }

    pub async fn list_no_contracts(&self) -> Result<Vec<RequisitionOrderRow>, ServiceError> {
        self.repository.list_by_contract(false, None, None).await
    }

    pub async fn list_no_contracts_for_requisition(
        &self,
        purchasing_id: i64,
    ) -> Result<Vec<RequisitionOrderRow>, ServiceError> {
        self.repository
            .list_by_contract(false, Some(purchasing_id), None)
            .await
    }

    /// Contract orders whose requisition is in `purchasing_status`.
    pub async fn list_contracts_by_requisition_status(
        &self,
        purchasing_status: &str,
    ) -> Result<Vec<RequisitionOrderRow>, ServiceError> {
        self.repository
            .list_by_contract(true, None, Some(purchasing_status))
            .await
    }

    pub async fn last_approved_for_vendor(
        &self,
        labeler_id: i64,
    ) -> Result<PurchaseOrderSummary, ServiceError> {
        self.repository
            .last_approved_for_vendor(labeler_id)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("no approved order for labeler {}", labeler_id))
            })
    }

    pub async fn detail(&self, id: Uuid) -> Result<OrderDetail, ServiceError> {
        let (order, labeler) = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("purchase order {}", id)))?;
        let items = self.repository.items_of(id).await?;
        Ok(OrderDetail {
            order,
            labeler_name: labeler.map(|l| l.labeler_name),
            items,
        })
    }

    pub async fn status_logs(
        &self,
        id: Uuid,
    ) -> Result<Vec<purchase_order_status_log::Model>, ServiceError> {
        self.repository.status_logs_of(id).await
    }

    pub async fn receives(&self, id: Uuid) -> Result<Vec<ReceiveSummary>, ServiceError> {
        self.repository.receives_of(id).await
    }

    pub async fn receive_items(&self, receive_id: i64) -> Result<Vec<ReceiveItemRow>, ServiceError> {
        self.repository.receive_items(receive_id).await
    }

    pub async fn generic_types(&self) -> Result<Vec<generic_type::Model>, ServiceError> {
        let types = generic_type::Entity::find()
            .order_by_asc(generic_type::Column::GenericTypeId)
            .all(&*self.db)
            .await?;
        Ok(types)
    }

    pub async fn list_by_number_range(
        &self,
        start: &str,
        end: &str,
        generic_type_id: Option<i32>,
        status: Option<&str>,
    ) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        self.repository
            .list_by_number_range(start, end, generic_type_id, status_filter(status))
            .await
    }

    pub async fn list_by_order_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        generic_type_id: Option<i32>,
        status: Option<&str>,
    ) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        if start > end {
            return Err(ServiceError::ValidationError(
                "start_date must not be after end_date".into(),
            ));
        }
        self.repository
            .list_by_order_date_range(start, end, generic_type_id, status_filter(status))
            .await
    }

    pub async fn check_holiday(&self, date: NaiveDate) -> Result<DayKind, ServiceError> {
        self.holidays.classify(date).await
    }

    pub async fn period_status(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<accounting_period::Model>, ServiceError> {
        self.periods.status_for(date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn line(qty: i32, unit_price: Decimal) -> OrderLineInput {
        OrderLineInput {
            product_id: "P-1".into(),
            generic_id: None,
            qty,
            unit_price,
            unit_generic_id: None,
            total_price: None,
            total_small_qty: None,
            giveaway: false,
        }
    }

    #[test]
    fn line_total_defaults_to_qty_times_price() {
        assert_eq!(line(4, dec!(12.50)).line_total(), dec!(50.00));

        let mut explicit = line(4, dec!(12.50));
        explicit.total_price = Some(dec!(45));
        assert_eq!(explicit.line_total(), dec!(45));
    }

    #[test]
    fn line_validation_rejects_bad_quantities_and_prices() {
        assert!(line(1, dec!(0)).validate().is_ok());
        assert!(line(0, dec!(1)).validate().is_err());
        assert!(line(1, dec!(-1)).validate().is_err());
    }

    #[test]
    fn lines_accept_legacy_field_names() {
        let parsed: OrderLineInput = serde_json::from_value(serde_json::json!({
            "product_id": "P-9",
            "qty": 2,
            "cost": "3.25",
            "total_cost": "6.50",
            "is_giveaway": true
        }))
        .unwrap();
        assert_eq!(parsed.unit_price, dec!(3.25));
        assert_eq!(parsed.total_price, Some(dec!(6.50)));
        assert!(parsed.giveaway);
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some("ALL"), None)]
    #[case(Some("all"), None)]
    #[case(Some(" "), None)]
    #[case(Some("APPROVED"), Some("APPROVED"))]
    fn all_disables_status_filter(#[case] raw: Option<&str>, #[case] expected: Option<&str>) {
        assert_eq!(status_filter(raw), expected);
    }
}
