use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, FromQueryResult, JoinType, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
    Select, Set, SqlErr,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entities::{
    bid_process, committee, labeler,
    purchase_order::{self, Column, Entity as PurchaseOrder, PurchaseOrderStatus},
    purchase_order_item::{self, Entity as PurchaseOrderItem},
    purchase_order_status_log::{self, Entity as StatusLog},
    receive::{self, Entity as Receive},
    receive_detail::{self, Entity as ReceiveDetail},
    requisition,
};
use crate::errors::ServiceError;
use crate::repositories::{BaseRepository, Repository};
use crate::tracing::with_metrics;

// Aggregates are computed per row from live data.
const ITEM_COUNT_SQL: &str = "(SELECT COUNT(*) FROM purchase_order_items poi \
     WHERE poi.purchase_order_id = purchase_orders.purchase_order_id)";
const ITEM_TOTAL_SQL: &str = "(SELECT COALESCE(SUM(poi.unit_price * poi.qty), 0.0) FROM purchase_order_items poi \
     WHERE poi.purchase_order_id = purchase_orders.purchase_order_id)";
const RECEIVE_COUNT_SQL: &str = "(SELECT COUNT(*) FROM receives r \
     WHERE r.purchase_order_id = purchase_orders.purchase_order_id)";
const RECEIVE_COST_SQL: &str = "(SELECT COALESCE(SUM(rd.cost * rd.receive_qty), 0.0) FROM receive_details rd \
     INNER JOIN receives r ON r.receive_id = rd.receive_id \
     WHERE r.purchase_order_id = purchase_orders.purchase_order_id)";
const RECEIVE_LINE_COUNT_SQL: &str = "(SELECT COUNT(*) FROM receive_details rd \
     WHERE rd.receive_id = receives.receive_id)";
const RECEIVE_LINE_COST_SQL: &str = "(SELECT COALESCE(SUM(rd.cost * rd.receive_qty), 0.0) FROM receive_details rd \
     WHERE rd.receive_id = receives.receive_id)";

/// Maps a unique violation on the order number to a validation error.
fn number_clash(err: DbErr, number: Option<&str>) -> ServiceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => ServiceError::ValidationError(format!(
            "purchase order number {} is already in use",
            number.unwrap_or("-")
        )),
        _ => ServiceError::DatabaseError(err),
    }
}

/// One row of an order listing with its live aggregates.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct PurchaseOrderSummary {
    pub purchase_order_id: Uuid,
    pub purchase_order_number: Option<String>,
    pub purchase_order_book_number: Option<String>,
    pub purchasing_id: Option<i64>,
    pub labeler_id: Option<i64>,
    pub labeler_name: Option<String>,
    pub purchase_method_name: Option<String>,
    pub generic_type_id: Option<i32>,
    pub order_date: NaiveDate,
    pub total_price: Decimal,
    pub purchase_order_status: PurchaseOrderStatus,
    pub is_contract: bool,
    pub is_cancel: bool,
    pub item_count: i64,
    pub item_total: Decimal,
    pub receive_count: i64,
    pub receive_cost: Decimal,
}

/// Order listing joined with its requisition and verifying committee.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct RequisitionOrderRow {
    pub purchase_order_id: Uuid,
    pub purchase_order_number: Option<String>,
    pub order_date: NaiveDate,
    pub total_price: Decimal,
    pub purchase_order_status: PurchaseOrderStatus,
    pub is_contract: bool,
    pub labeler_name: Option<String>,
    pub purchasing_id: Option<i64>,
    pub purchasing_name: Option<String>,
    pub purchasing_status: Option<String>,
    pub committee_id: Option<i64>,
    pub committee_name: Option<String>,
    pub item_count: i64,
}

/// A goods-received record linked to an order.
#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct ReceiveSummary {
    pub receive_id: i64,
    pub receive_code: String,
    pub receive_date: NaiveDate,
    pub delivery_code: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub labeler_name: Option<String>,
    pub total_items: i64,
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromQueryResult, ToSchema)]
pub struct ReceiveItemRow {
    pub receive_detail_id: i64,
    pub product_id: String,
    pub receive_qty: i32,
    pub cost: Decimal,
    pub unit_generic_id: Option<i64>,
    pub line_cost: Decimal,
}

/// Contract partition for order listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContractFilter {
    Contract,
    NonContract,
    #[default]
    All,
}

impl ContractFilter {
    /// `T`, `F` or `ALL`; anything else means no filtering.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_uppercase()).as_deref() {
            Some("T") => Self::Contract,
            Some("F") => Self::NonContract,
            _ => Self::All,
        }
    }
}

/// Filters for [`PurchaseOrderRepository::list_by_status`].
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub statuses: Vec<String>,
    pub contract: ContractFilter,
    pub query: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub limit: u64,
    pub offset: u64,
}

/// Storage operations on the purchase order aggregate.
///
/// Reads run on the pool. Writes take an explicit connection so callers can
/// group them in one transaction.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    base: BaseRepository,
}

impl PurchaseOrderRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn summary_select() -> Select<PurchaseOrder> {
        PurchaseOrder::find()
            .select_only()
            .columns([
                Column::PurchaseOrderId,
                Column::PurchaseOrderNumber,
                Column::PurchaseOrderBookNumber,
                Column::PurchasingId,
                Column::LabelerId,
                Column::GenericTypeId,
                Column::OrderDate,
                Column::TotalPrice,
                Column::PurchaseOrderStatus,
                Column::IsContract,
                Column::IsCancel,
            ])
            .column_as(labeler::Column::LabelerName, "labeler_name")
            .column_as(bid_process::Column::Name, "purchase_method_name")
            .expr_as(Expr::cust(ITEM_COUNT_SQL), "item_count")
            .expr_as(Expr::cust(ITEM_TOTAL_SQL), "item_total")
            .expr_as(Expr::cust(RECEIVE_COUNT_SQL), "receive_count")
            .expr_as(Expr::cust(RECEIVE_COST_SQL), "receive_cost")
            .join(JoinType::LeftJoin, purchase_order::Relation::Labeler.def())
            .join(
                JoinType::LeftJoin,
                purchase_order::Relation::PurchaseMethod.def(),
            )
    }

    fn newest_first(select: Select<PurchaseOrder>) -> Select<PurchaseOrder> {
        select
            .order_by_desc(Column::OrderDate)
            .order_by_desc(Column::PurchaseOrderNumber)
    }

    /// All orders, newest first.
    pub async fn list(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        let select = Self::newest_first(Self::summary_select())
            .limit(limit)
            .offset(offset);
        let rows = with_metrics("purchase_orders.list", || {
            select
                .into_model::<PurchaseOrderSummary>()
                .all(self.base.get_db())
        })
        .await?;
        Ok(rows)
    }

    /// Orders in any of `filter.statuses`, ordered by order date then number, both descending.
    pub async fn list_by_status(
        &self,
        filter: &OrderFilter,
    ) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        let mut select = Self::summary_select()
            .filter(Column::PurchaseOrderStatus.is_in(filter.statuses.iter().map(String::as_str)));

        select = match filter.contract {
            ContractFilter::Contract => select.filter(Column::IsContract.eq(true)),
            ContractFilter::NonContract => select.filter(Column::IsContract.eq(false)),
            ContractFilter::All => select,
        };

        if let Some(query) = filter.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            select = select.filter(Column::PurchaseOrderNumber.contains(query));
        }

        select = match (filter.start_date, filter.end_date) {
            (Some(start), Some(end)) => select.filter(Column::OrderDate.between(start, end)),
            (Some(start), None) => select.filter(Column::OrderDate.gte(start)),
            (None, Some(end)) => select.filter(Column::OrderDate.lte(end)),
            (None, None) => select,
        };

        let select = Self::newest_first(select)
            .limit(filter.limit)
            .offset(filter.offset);
        let rows = with_metrics("purchase_orders.list_by_status", || {
            select
                .into_model::<PurchaseOrderSummary>()
                .all(self.base.get_db())
        })
        .await?;
        Ok(rows)
    }

    /// Cancelled orders, newest first.
    pub async fn list_cancelled(&self) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        let rows = Self::newest_first(Self::summary_select().filter(Column::IsCancel.eq(true)))
            .into_model::<PurchaseOrderSummary>()
            .all(self.base.get_db())
            .await?;
        Ok(rows)
    }

    /// Most recent approved order for a vendor.
    pub async fn last_approved_for_vendor(
        &self,
        labeler_id: i64,
    ) -> Result<Option<PurchaseOrderSummary>, ServiceError> {
        let row = Self::newest_first(
            Self::summary_select()
                .filter(Column::LabelerId.eq(labeler_id))
                .filter(Column::PurchaseOrderStatus.eq(PurchaseOrderStatus::Approved)),
        )
        .limit(1)
        .into_model::<PurchaseOrderSummary>()
        .one(self.base.get_db())
        .await?;
        Ok(row)
    }

    /// Orders whose number falls in `[start, end]`, in number order.
    pub async fn list_by_number_range(
        &self,
        start: &str,
        end: &str,
        generic_type_id: Option<i32>,
        status: Option<&str>,
    ) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        let mut select =
            Self::summary_select().filter(Column::PurchaseOrderNumber.between(start, end));
        if let Some(generic_type_id) = generic_type_id {
            select = select.filter(Column::GenericTypeId.eq(generic_type_id));
        }
        if let Some(status) = status {
            select = select.filter(Column::PurchaseOrderStatus.eq(status));
        }
        let rows = select
            .order_by_asc(Column::PurchaseOrderNumber)
            .into_model::<PurchaseOrderSummary>()
            .all(self.base.get_db())
            .await?;
        Ok(rows)
    }

    /// Orders dated within `[start, end]`, in number order.
    pub async fn list_by_order_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        generic_type_id: Option<i32>,
        status: Option<&str>,
    ) -> Result<Vec<PurchaseOrderSummary>, ServiceError> {
        let mut select = Self::summary_select().filter(Column::OrderDate.between(start, end));
        if let Some(generic_type_id) = generic_type_id {
            select = select.filter(Column::GenericTypeId.eq(generic_type_id));
        }
        if let Some(status) = status {
            select = select.filter(Column::PurchaseOrderStatus.eq(status));
        }
        let rows = select
            .order_by_asc(Column::PurchaseOrderNumber)
            .into_model::<PurchaseOrderSummary>()
            .all(self.base.get_db())
            .await?;
        Ok(rows)
    }

    fn requisition_select() -> Select<PurchaseOrder> {
        PurchaseOrder::find()
            .select_only()
            .columns([
                Column::PurchaseOrderId,
                Column::PurchaseOrderNumber,
                Column::OrderDate,
                Column::TotalPrice,
                Column::PurchaseOrderStatus,
                Column::IsContract,
                Column::PurchasingId,
            ])
            .column_as(labeler::Column::LabelerName, "labeler_name")
            .column_as(requisition::Column::PurchasingName, "purchasing_name")
            .column_as(requisition::Column::PurchasingStatus, "purchasing_status")
            .column_as(committee::Column::CommitteeId, "committee_id")
            .column_as(committee::Column::CommitteeName, "committee_name")
            .expr_as(Expr::cust(ITEM_COUNT_SQL), "item_count")
            .join(JoinType::LeftJoin, purchase_order::Relation::Labeler.def())
            .join(JoinType::LeftJoin, purchase_order::Relation::Requisition.def())
            .join(JoinType::LeftJoin, requisition::Relation::Committee.def())
    }

    /// Orders partitioned by the contract flag, joined with requisition data.
    pub async fn list_by_contract(
        &self,
        is_contract: bool,
        purchasing_id: Option<i64>,
        purchasing_status: Option<&str>,
    ) -> Result<Vec<RequisitionOrderRow>, ServiceError> {
        let mut select = Self::requisition_select().filter(Column::IsContract.eq(is_contract));
        if let Some(purchasing_id) = purchasing_id {
            select = select.filter(Column::PurchasingId.eq(purchasing_id));
        }
        if let Some(status) = purchasing_status {
            select = select.filter(requisition::Column::PurchasingStatus.eq(status));
        }
        let select = select
            .order_by_desc(Column::PurchasingId)
            .order_by_desc(Column::OrderDate);
        let rows = with_metrics("purchase_orders.list_by_contract", || {
            select
                .into_model::<RequisitionOrderRow>()
                .all(self.base.get_db())
        })
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<(purchase_order::Model, Option<labeler::Model>)>, ServiceError> {
        let found = PurchaseOrder::find_by_id(id)
            .find_also_related(labeler::Entity)
            .one(self.base.get_db())
            .await?;
        Ok(found)
    }

    pub async fn items_of(&self, id: Uuid) -> Result<Vec<purchase_order_item::Model>, ServiceError> {
        let items = PurchaseOrderItem::find()
            .filter(purchase_order_item::Column::PurchaseOrderId.eq(id))
            .order_by_asc(purchase_order_item::Column::PurchaseOrderItemId)
            .all(self.base.get_db())
            .await?;
        Ok(items)
    }

    pub async fn status_logs_of(
        &self,
        id: Uuid,
    ) -> Result<Vec<purchase_order_status_log::Model>, ServiceError> {
        let logs = StatusLog::find()
            .filter(purchase_order_status_log::Column::PurchaseOrderId.eq(id))
            .order_by_asc(purchase_order_status_log::Column::StatusLogId)
            .all(self.base.get_db())
            .await?;
        Ok(logs)
    }

    /// Receives linked to an order with their line count and cost.
    pub async fn receives_of(&self, id: Uuid) -> Result<Vec<ReceiveSummary>, ServiceError> {
        let rows = Receive::find()
            .select_only()
            .columns([
                receive::Column::ReceiveId,
                receive::Column::ReceiveCode,
                receive::Column::ReceiveDate,
                receive::Column::DeliveryCode,
                receive::Column::DeliveryDate,
            ])
            .column_as(labeler::Column::LabelerName, "labeler_name")
            .expr_as(Expr::cust(RECEIVE_LINE_COUNT_SQL), "total_items")
            .expr_as(Expr::cust(RECEIVE_LINE_COST_SQL), "total_cost")
            .join(JoinType::LeftJoin, receive::Relation::Vendor.def())
            .filter(receive::Column::PurchaseOrderId.eq(id))
            .order_by_desc(receive::Column::ReceiveDate)
            .order_by_desc(receive::Column::ReceiveCode)
            .into_model::<ReceiveSummary>()
            .all(self.base.get_db())
            .await?;
        Ok(rows)
    }

    pub async fn receive_items(&self, receive_id: i64) -> Result<Vec<ReceiveItemRow>, ServiceError> {
        let line_cost = Expr::col((ReceiveDetail, receive_detail::Column::Cost))
            .mul(Expr::col((ReceiveDetail, receive_detail::Column::ReceiveQty)));
        let rows = ReceiveDetail::find()
            .select_only()
            .columns([
                receive_detail::Column::ReceiveDetailId,
                receive_detail::Column::ProductId,
                receive_detail::Column::ReceiveQty,
                receive_detail::Column::Cost,
                receive_detail::Column::UnitGenericId,
            ])
            .expr_as(line_cost, "line_cost")
            .filter(receive_detail::Column::ReceiveId.eq(receive_id))
            .order_by_asc(receive_detail::Column::ReceiveDetailId)
            .into_model::<ReceiveItemRow>()
            .all(self.base.get_db())
            .await?;
        Ok(rows)
    }

    pub async fn insert_order<C: ConnectionTrait>(
        conn: &C,
        order: purchase_order::ActiveModel,
    ) -> Result<Uuid, ServiceError> {
        let number = match &order.purchase_order_number {
            sea_orm::ActiveValue::Set(number) | sea_orm::ActiveValue::Unchanged(number) => {
                number.clone()
            }
            sea_orm::ActiveValue::NotSet => None,
        };
        let inserted = order
            .insert(conn)
            .await
            .map_err(|e| number_clash(e, number.as_deref()))?;
        Ok(inserted.purchase_order_id)
    }

    /// Partial update; only `Set` fields of `changes` are written.
    pub async fn update_order<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
        mut changes: purchase_order::ActiveModel,
    ) -> Result<(), ServiceError> {
        changes.updated_at = Set(Utc::now());
        let number = match &changes.purchase_order_number {
            sea_orm::ActiveValue::Set(number) => number.clone(),
            _ => None,
        };
        let result = PurchaseOrder::update_many()
            .set(changes)
            .filter(Column::PurchaseOrderId.eq(id))
            .exec(conn)
            .await
            .map_err(|e| number_clash(e, number.as_deref()))?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("purchase order {}", id)));
        }
        Ok(())
    }

    /// Removes an order and its items. Status logs are kept.
    pub async fn remove<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<(), ServiceError> {
        PurchaseOrderItem::delete_many()
            .filter(purchase_order_item::Column::PurchaseOrderId.eq(id))
            .exec(conn)
            .await?;
        let result = PurchaseOrder::delete_by_id(id).exec(conn).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!("purchase order {}", id)));
        }
        Ok(())
    }

    pub async fn insert_items<C: ConnectionTrait>(
        conn: &C,
        items: Vec<purchase_order_item::ActiveModel>,
    ) -> Result<(), ServiceError> {
        if items.is_empty() {
            return Ok(());
        }
        PurchaseOrderItem::insert_many(items).exec(conn).await?;
        Ok(())
    }

    /// Deletes every item of `id` and inserts `items` in their place.
    pub async fn replace_items<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
        items: Vec<purchase_order_item::ActiveModel>,
    ) -> Result<(), ServiceError> {
        PurchaseOrderItem::delete_many()
            .filter(purchase_order_item::Column::PurchaseOrderId.eq(id))
            .exec(conn)
            .await?;
        Self::insert_items(conn, items).await
    }

    pub async fn append_status_log<C: ConnectionTrait>(
        conn: &C,
        id: Uuid,
        from_status: Option<String>,
        to_status: &str,
        actor: &str,
    ) -> Result<(), ServiceError> {
        purchase_order_status_log::ActiveModel {
            purchase_order_id: Set(id),
            from_status: Set(from_status),
            to_status: Set(to_status.to_string()),
            people_user_id: Set(Some(actor.to_string())),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(conn)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("T"), ContractFilter::Contract)]
    #[case(Some("f"), ContractFilter::NonContract)]
    #[case(Some("ALL"), ContractFilter::All)]
    #[case(Some("maybe"), ContractFilter::All)]
    #[case(None, ContractFilter::All)]
    fn contract_filter_parsing(#[case] raw: Option<&str>, #[case] expected: ContractFilter) {
        assert_eq!(ContractFilter::parse(raw), expected);
    }
}
