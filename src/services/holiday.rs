use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Weekday};
use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter};
use tracing::{debug, instrument};

use crate::{
    entities::holiday::{self, Entity as HolidayEntity},
    errors::ServiceError,
};

/// Year under which recurring holidays are registered.
const RECURRING_HOLIDAY_YEAR: i32 = 2000;

/// Outcome of checking a proposed order date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DayKind {
    Workday,
    Weekend,
    Holiday(Option<String>),
}

impl DayKind {
    pub fn is_workday(&self) -> bool {
        matches!(self, DayKind::Workday)
    }
}

/// Saturday or Sunday. Decided without touching storage.
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

#[derive(Clone)]
pub struct HolidayService {
    db: Arc<DatabaseConnection>,
}

impl HolidayService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Classifies `date`. A holiday matches on the exact date, or on month and
    /// day when it is registered as recurring.
    #[instrument(skip(self))]
    pub async fn classify(&self, date: NaiveDate) -> Result<DayKind, ServiceError> {
        if is_weekend(date) {
            debug!(%date, "Order date falls on a weekend");
            return Ok(DayKind::Weekend);
        }

        let mut matches = Condition::any().add(holiday::Column::HolidayDate.eq(date));
        if let Some(recurring) =
            NaiveDate::from_ymd_opt(RECURRING_HOLIDAY_YEAR, date.month(), date.day())
        {
            matches = matches.add(holiday::Column::HolidayDate.eq(recurring));
        }

        let found = HolidayEntity::find()
            .filter(matches)
            .one(&*self.db)
            .await?;

        Ok(match found {
            Some(h) => DayKind::Holiday(h.holiday_name),
            None => DayKind::Workday,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ActiveModelTrait, Set};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn service(migrated: bool) -> HolidayService {
        let db = crate::db::establish_connection("sqlite::memory:").await.unwrap();
        if migrated {
            crate::db::run_migrations(&db).await.unwrap();
        }
        HolidayService::new(Arc::new(db))
    }

    #[tokio::test]
    async fn weekend_is_rejected_without_storage() {
        // Schema is missing, so any query would fail.
        let service = service(false).await;
        assert_eq!(
            service.classify(date(2024, 1, 6)).await.unwrap(),
            DayKind::Weekend
        );
        assert_eq!(
            service.classify(date(2024, 1, 7)).await.unwrap(),
            DayKind::Weekend
        );
    }

    #[tokio::test]
    async fn exact_and_recurring_holidays_match() {
        let service = service(true).await;
        for (day, name) in [(date(2024, 4, 15), "Songkran"), (date(2000, 12, 5), "Father's Day")] {
            holiday::ActiveModel {
                holiday_date: Set(day),
                holiday_name: Set(Some(name.to_string())),
                ..Default::default()
            }
            .insert(&*service.db)
            .await
            .unwrap();
        }

        assert_eq!(
            service.classify(date(2024, 4, 15)).await.unwrap(),
            DayKind::Holiday(Some("Songkran".into()))
        );
        // Thursday 2024-12-05 matches the recurring registration.
        assert_eq!(
            service.classify(date(2024, 12, 5)).await.unwrap(),
            DayKind::Holiday(Some("Father's Day".into()))
        );
        assert!(service.classify(date(2025, 4, 15)).await.unwrap().is_workday());
    }
}
