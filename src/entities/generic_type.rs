use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category on an order that selects its numbering series.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "generic_types")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub generic_type_id: i32,
    pub generic_type_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
