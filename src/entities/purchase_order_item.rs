use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub purchase_order_item_id: i64,
    pub purchase_order_id: Uuid,
    pub product_id: String,
    pub generic_id: Option<String>,
    pub qty: i32,
    pub unit_price: Decimal,
    /// Unit-of-measure conversion applied to `qty`.
    pub unit_generic_id: Option<i64>,
    pub total_price: Decimal,
    pub total_small_qty: Option<i32>,
    pub giveaway: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchase_order::Entity",
        from = "Column::PurchaseOrderId",
        to = "super::purchase_order::Column::PurchaseOrderId"
    )]
    PurchaseOrder,
}

impl Related<super::purchase_order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrder.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
