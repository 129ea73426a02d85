//! SeaORM entities for the procurement schema.

pub mod accounting_period;
pub mod bid_process;
pub mod committee;
pub mod document_serial;
pub mod generic_type;
pub mod holiday;
pub mod labeler;
pub mod purchase_order;
pub mod purchase_order_item;
pub mod purchase_order_status_log;
pub mod receive;
pub mod receive_detail;
pub mod requisition;
