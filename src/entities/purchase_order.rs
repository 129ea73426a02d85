use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle status stored in `purchase_order_status`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "UPPERCASE")]
pub enum PurchaseOrderStatus {
    #[sea_orm(string_value = "PREPARED")]
    Prepared,
    #[sea_orm(string_value = "CONFIRMED")]
    Confirmed,
    #[sea_orm(string_value = "APPROVED")]
    Approved,
    #[sea_orm(string_value = "CANCEL")]
    Cancel,
}

impl PurchaseOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Prepared => "PREPARED",
            Self::Confirmed => "CONFIRMED",
            Self::Approved => "APPROVED",
            Self::Cancel => "CANCEL",
        }
    }

    /// Parses a wire value; anything outside the four known statuses yields `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "PREPARED" => Some(Self::Prepared),
            "CONFIRMED" => Some(Self::Confirmed),
            "APPROVED" => Some(Self::Approved),
            "CANCEL" => Some(Self::Cancel),
            _ => None,
        }
    }
}

impl std::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub purchase_order_id: Uuid,
    pub purchase_order_number: Option<String>,
    pub purchase_order_book_number: Option<String>,
    pub purchasing_id: Option<i64>,
    pub labeler_id: Option<i64>,
    pub verify_committee_id: Option<i64>,
    pub purchase_method_id: Option<i64>,
    pub generic_type_id: Option<i32>,
    pub order_date: NaiveDate,
    pub discount_percent: Decimal,
    pub discount_cash: Decimal,
    pub include_vat: bool,
    pub vat_rate: Decimal,
    pub vat: Decimal,
    pub sub_total: Decimal,
    pub total_price: Decimal,
    pub budget_year: Option<i32>,
    pub budget_detail_id: Option<i64>,
    pub purchase_type: Option<String>,
    pub comment: Option<String>,
    pub ship_to: Option<String>,
    pub vendor_contact_name: Option<String>,
    pub delivery: Option<String>,
    pub is_reorder: bool,
    pub is_contract: bool,
    pub is_cancel: bool,
    pub purchase_order_status: PurchaseOrderStatus,
    pub cancel_comment: Option<String>,
    pub cancel_date: Option<DateTime<Utc>>,
    pub confirmed_date: Option<DateTime<Utc>>,
    pub approved_date: Option<DateTime<Utc>>,
    pub people_user_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_order_item::Entity")]
    Items,
    #[sea_orm(has_many = "super::purchase_order_status_log::Entity")]
    StatusLogs,
    #[sea_orm(
        belongs_to = "super::labeler::Entity",
        from = "Column::LabelerId",
        to = "super::labeler::Column::LabelerId"
    )]
    Labeler,
    #[sea_orm(
        belongs_to = "super::requisition::Entity",
        from = "Column::PurchasingId",
        to = "super::requisition::Column::PurchasingId"
    )]
    Requisition,
    #[sea_orm(
        belongs_to = "super::bid_process::Entity",
        from = "Column::PurchaseMethodId",
        to = "super::bid_process::Column::Id"
    )]
    PurchaseMethod,
}

impl Related<super::purchase_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl Related<super::purchase_order_status_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusLogs.def()
    }
}

impl Related<super::labeler::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Labeler.def()
    }
}

impl Related<super::requisition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Requisition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
