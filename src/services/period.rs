use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use metrics::counter;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{instrument, warn};

use crate::{
    entities::accounting_period::{self, Entity as AccountingPeriodEntity},
    errors::ServiceError,
};

/// Read-only view of accounting period locks.
#[async_trait]
pub trait PeriodGate: Send + Sync {
    /// Whether `(budget_year, month)` is locked. Missing periods are open.
    async fn is_closed(&self, budget_year: i32, month: u32) -> Result<bool, ServiceError>;
}

/// Maps a calendar date onto the fiscal calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiscalCalendar {
    start_month: u32,
}

impl FiscalCalendar {
    pub fn new(start_month: u32) -> Self {
        Self {
            start_month: start_month.clamp(1, 12),
        }
    }

    /// `(budget_year, period_month)` for `date`. Months from the start month
    /// onward count toward the following budget year.
    pub fn period_of(&self, date: NaiveDate) -> (i32, u32) {
        let month = date.month();
        let budget_year = if self.start_month > 1 && month >= self.start_month {
            date.year() + 1
        } else {
            date.year()
        };
        (budget_year, month)
    }
}

impl Default for FiscalCalendar {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Period gate backed by the `accounting_periods` table.
#[derive(Clone)]
pub struct PeriodService {
    db: Arc<DatabaseConnection>,
    calendar: FiscalCalendar,
}

impl PeriodService {
    pub fn new(db: Arc<DatabaseConnection>, calendar: FiscalCalendar) -> Self {
        Self { db, calendar }
    }

    /// Rejects with `PeriodClosed` when the period `date` falls in is locked.
    #[instrument(skip(self))]
    pub async fn ensure_open(&self, date: NaiveDate) -> Result<(), ServiceError> {
        let (budget_year, month) = self.calendar.period_of(date);
        if self.is_closed(budget_year, month).await? {
            warn!(budget_year, month, %date, "Rejected write into closed accounting period");
            counter!("procurement.period.rejections", 1);
            return Err(ServiceError::PeriodClosed { budget_year, month });
        }
        Ok(())
    }

    /// Same check against today's local date.
    pub async fn ensure_current_open(&self) -> Result<(), ServiceError> {
        self.ensure_open(Local::now().date_naive()).await
    }

    /// Period rows for the budget year and month that `date` falls in.
    #[instrument(skip(self))]
    pub async fn status_for(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<accounting_period::Model>, ServiceError> {
        let (budget_year, month) = self.calendar.period_of(date);
        let periods = AccountingPeriodEntity::find()
            .filter(accounting_period::Column::BudgetYear.eq(budget_year))
            .filter(accounting_period::Column::PeriodMonth.eq(month as i32))
            .order_by_asc(accounting_period::Column::PeriodId)
            .all(&*self.db)
            .await?;
        Ok(periods)
    }
}

#[async_trait]
impl PeriodGate for PeriodService {
    async fn is_closed(&self, budget_year: i32, month: u32) -> Result<bool, ServiceError> {
        let period = AccountingPeriodEntity::find()
            .filter(accounting_period::Column::BudgetYear.eq(budget_year))
            .filter(accounting_period::Column::PeriodMonth.eq(month as i32))
            .one(&*self.db)
            .await?;
        Ok(period.map(|p| p.is_closed).unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2024, 9, 30), (2024, 9))]
    #[case(date(2024, 10, 1), (2025, 10))]
    #[case(date(2024, 12, 31), (2025, 12))]
    #[case(date(2025, 1, 15), (2025, 1))]
    fn october_start_rolls_budget_year(#[case] input: NaiveDate, #[case] expected: (i32, u32)) {
        assert_eq!(FiscalCalendar::default().period_of(input), expected);
    }

    #[test]
    fn january_start_is_the_calendar_year() {
        let calendar = FiscalCalendar::new(1);
        assert_eq!(calendar.period_of(date(2024, 12, 1)), (2024, 12));
    }

    proptest! {
        #[test]
        fn budget_year_is_year_or_next(y in 1990i32..2100, m in 1u32..=12, d in 1u32..=28, start in 1u32..=12) {
            let (budget_year, month) = FiscalCalendar::new(start).period_of(date(y, m, d));
            prop_assert_eq!(month, m);
            prop_assert!(budget_year == y || budget_year == y + 1);
        }
    }
}
