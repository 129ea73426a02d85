//! Domain services for purchase order procurement.

pub mod holiday;
pub mod period;
pub mod procurement;
pub mod serial;
pub mod workflow;
