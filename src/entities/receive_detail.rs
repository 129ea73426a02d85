use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "receive_details")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub receive_detail_id: i64,
    pub receive_id: i64,
    pub product_id: String,
    pub receive_qty: i32,
    pub cost: Decimal,
    pub unit_generic_id: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::receive::Entity",
        from = "Column::ReceiveId",
        to = "super::receive::Column::ReceiveId"
    )]
    Receive,
}

impl Related<super::receive::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Receive.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
