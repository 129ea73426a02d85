pub mod common;
pub mod health;
pub mod purchase_orders;

use crate::{
    config::AppConfig,
    db::DbPool,
    events::EventSender,
    services::{
        holiday::HolidayService,
        period::{FiscalCalendar, PeriodService},
        procurement::ProcurementService,
        serial::SerialService,
        workflow::StatusWorkflow,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub procurement: Arc<ProcurementService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig, event_sender: Arc<EventSender>) -> Self {
        let periods = PeriodService::new(
            db_pool.clone(),
            FiscalCalendar::new(config.fiscal_year_start_month),
        );
        let workflow = StatusWorkflow::new(
            db_pool.clone(),
            periods.clone(),
            event_sender.clone(),
            config.batch_mode(),
        );
        let procurement = Arc::new(ProcurementService::new(
            db_pool.clone(),
            SerialService::new(db_pool.clone()),
            periods,
            HolidayService::new(db_pool),
            workflow,
            event_sender,
        ));

        Self { procurement }
    }
}
