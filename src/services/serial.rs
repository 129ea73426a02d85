use std::sync::Arc;

use metrics::counter;
use sea_orm::{
    sea_query::{Expr, Query},
    ColumnTrait, ConnectionTrait, DatabaseConnection,
};
use tracing::{error, info, instrument};

use crate::{
    entities::document_serial::{Column as SerialColumn, Entity as SerialEntity},
    errors::ServiceError,
};

/// Numbering series for purchase orders, selected by the order's generic type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberingSeries {
    Po,
    Poa,
    Pob,
    Poc,
    Pod,
    Pof,
}

impl NumberingSeries {
    /// Orders without a generic type have no series.
    pub fn for_generic_type(generic_type_id: Option<i32>) -> Option<Self> {
        generic_type_id.map(|id| match id {
            1 => Self::Po,
            2 => Self::Poa,
            3 => Self::Pob,
            4 => Self::Poc,
            5 => Self::Pod,
            _ => Self::Pof,
        })
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Po => "PO",
            Self::Poa => "POA",
            Self::Pob => "POB",
            Self::Poc => "POC",
            Self::Pod => "POD",
            Self::Pof => "POF",
        }
    }
}

/// `{prefix}{number}` with the number zero-padded to `digits`.
pub fn format_document_number(prefix: &str, digits: i32, number: i64) -> String {
    let width = usize::try_from(digits).unwrap_or(0);
    format!("{}{:0width$}", prefix, number, width = width)
}

/// Atomically increments the counter for `code` and returns the formatted number.
///
/// The increment and the read happen in one `UPDATE ... RETURNING`, so two
/// callers can never observe the same value. When `conn` is a transaction the
/// number is only persisted once that transaction commits.
pub async fn issue_with<C>(conn: &C, code: &str) -> Result<String, ServiceError>
where
    C: ConnectionTrait,
{
    let stmt = Query::update()
        .table(SerialEntity)
        .value(
            SerialColumn::CurrentNo,
            Expr::col(SerialColumn::CurrentNo).add(1),
        )
        .and_where(SerialColumn::SerialCode.eq(code))
        .returning(Query::returning().columns([
            SerialColumn::SerialPrefix,
            SerialColumn::Digits,
            SerialColumn::CurrentNo,
        ]))
        .to_owned();

    let backend = conn.get_database_backend();
    let row = conn
        .query_one(backend.build(&stmt))
        .await
        .map_err(|e| {
            error!(serial_code = code, "Failed to increment document serial: {}", e);
            ServiceError::AllocationError(format!("serial {} unavailable: {}", code, e))
        })?
        .ok_or_else(|| {
            ServiceError::AllocationError(format!("unknown document serial code {}", code))
        })?;

    let read = |e: sea_orm::DbErr| {
        ServiceError::AllocationError(format!("serial {} returned no value: {}", code, e))
    };
    let prefix: String = row.try_get("", "serial_prefix").map_err(read)?;
    let digits: i32 = row.try_get("", "digits").map_err(read)?;
    let current_no: i64 = row.try_get("", "current_no").map_err(read)?;

    counter!("procurement.serial.issued", 1, "code" => code.to_string());
    Ok(format_document_number(&prefix, digits, current_no))
}

/// Issues document numbers, committing each increment on its own.
#[derive(Clone)]
pub struct SerialService {
    db: Arc<DatabaseConnection>,
}

impl SerialService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn issue(&self, code: &str) -> Result<String, ServiceError> {
        let number = issue_with(&*self.db, code).await?;
        info!(serial_code = code, document_number = %number, "Issued document number");
        Ok(number)
    }

    /// Issues the next number in the series that `generic_type_id` selects.
    pub async fn issue_for_generic_type(
        &self,
        generic_type_id: Option<i32>,
    ) -> Result<String, ServiceError> {
        let series = NumberingSeries::for_generic_type(generic_type_id).ok_or_else(|| {
            ServiceError::ValidationError(
                "generic_type_id is required when purchase_order_number is not supplied".into(),
            )
        })?;
        self.issue(series.code()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(1), Some("PO"))]
    #[case(Some(2), Some("POA"))]
    #[case(Some(3), Some("POB"))]
    #[case(Some(4), Some("POC"))]
    #[case(Some(5), Some("POD"))]
    #[case(Some(6), Some("POF"))]
    #[case(Some(0), Some("POF"))]
    #[case(None, None)]
    fn generic_type_selects_series(#[case] generic_type: Option<i32>, #[case] code: Option<&str>) {
        assert_eq!(
            NumberingSeries::for_generic_type(generic_type).map(|s| s.code()),
            code
        );
    }

    #[rstest]
    #[case("PO", 6, 124, "PO000124")]
    #[case("POA", 4, 7, "POA0007")]
    #[case("POF", 2, 12345, "POF12345")]
    #[case("X", 0, 9, "X9")]
    fn numbers_are_zero_padded(
        #[case] prefix: &str,
        #[case] digits: i32,
        #[case] number: i64,
        #[case] expected: &str,
    ) {
        assert_eq!(format_document_number(prefix, digits, number), expected);
    }

    #[tokio::test]
    async fn unknown_code_is_an_allocation_error() {
        let db = crate::db::establish_connection("sqlite::memory:").await.unwrap();
        crate::db::run_migrations(&db).await.unwrap();
        let service = SerialService::new(Arc::new(db));

        let err = service.issue("NOPE").await.unwrap_err();
        assert!(matches!(err, ServiceError::AllocationError(_)));
    }

    #[tokio::test]
    async fn consecutive_issues_increase() {
        let db = crate::db::establish_connection("sqlite::memory:").await.unwrap();
        crate::db::run_migrations(&db).await.unwrap();
        let service = SerialService::new(Arc::new(db));

        assert_eq!(service.issue("PO").await.unwrap(), "PO000001");
        assert_eq!(service.issue("PO").await.unwrap(), "PO000002");
        assert_eq!(service.issue("POA").await.unwrap(), "POA000001");
    }
}
