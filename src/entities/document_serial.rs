use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One counter per document-type code (`PO`, `POA`, ...).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "document_serials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub serial_code: String,
    pub serial_prefix: String,
    pub digits: i32,
    pub current_no: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
