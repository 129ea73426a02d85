use chrono::NaiveDate;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Warehouse goods-received header.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receives")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub receive_id: i64,
    pub receive_code: String,
    pub receive_date: NaiveDate,
    pub delivery_code: Option<String>,
    pub delivery_date: Option<NaiveDate>,
    pub purchase_order_id: Option<Uuid>,
    pub vendor_labeler_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::receive_detail::Entity")]
    Details,
    #[sea_orm(
        belongs_to = "super::labeler::Entity",
        from = "Column::VendorLabelerId",
        to = "super::labeler::Column::LabelerId"
    )]
    Vendor,
}

impl Related<super::receive_detail::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
