use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_reference_tables::Migration),
            Box::new(m20240101_000002_create_purchase_order_tables::Migration),
            Box::new(m20240101_000003_create_receiving_tables::Migration),
            Box::new(m20240101_000004_seed_document_serials::Migration),
        ]
    }
}

mod m20240101_000001_create_reference_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_reference_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Labelers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Labelers::LabelerId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Labelers::LabelerName).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Committees::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Committees::CommitteeId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Committees::CommitteeName)
                                .string()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Requisitions::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Requisitions::PurchasingId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Requisitions::PurchasingName)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Requisitions::PurchasingStatus)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Requisitions::VerifyCommitteeId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(Requisitions::ProjectId).big_integer().null())
                        .col(ColumnDef::new(Requisitions::PrepareDate).date().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(GenericTypes::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(GenericTypes::GenericTypeId)
                                .integer()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(GenericTypes::GenericTypeName)
                                .string()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BidProcesses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BidProcesses::Id)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(BidProcesses::Name).string().not_null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(AccountingPeriods::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AccountingPeriods::PeriodId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AccountingPeriods::BudgetYear)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AccountingPeriods::PeriodMonth)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AccountingPeriods::IsClosed)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("ux_accounting_periods_year_month")
                        .table(AccountingPeriods::Table)
                        .col(AccountingPeriods::BudgetYear)
                        .col(AccountingPeriods::PeriodMonth)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(DocumentSerials::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(DocumentSerials::SerialCode)
                                .string_len(16)
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DocumentSerials::SerialPrefix)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(DocumentSerials::Digits)
                                .integer()
                                .not_null()
                                .default(6),
                        )
                        .col(
                            ColumnDef::new(DocumentSerials::CurrentNo)
                                .big_integer()
                                .not_null()
                                .default(0),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Holidays::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Holidays::HolidayId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Holidays::HolidayDate).date().not_null())
                        .col(ColumnDef::new(Holidays::HolidayName).string().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_holidays_holiday_date")
                        .table(Holidays::Table)
                        .col(Holidays::HolidayDate)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Holidays::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(DocumentSerials::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(AccountingPeriods::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BidProcesses::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(GenericTypes::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Requisitions::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Committees::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Labelers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Labelers {
        Table,
        LabelerId,
        LabelerName,
    }

    #[derive(DeriveIden)]
    enum Committees {
        Table,
        CommitteeId,
        CommitteeName,
    }

    #[derive(DeriveIden)]
    enum Requisitions {
        Table,
        PurchasingId,
        PurchasingName,
        PurchasingStatus,
        VerifyCommitteeId,
        ProjectId,
        PrepareDate,
    }

    #[derive(DeriveIden)]
    enum GenericTypes {
        Table,
        GenericTypeId,
        GenericTypeName,
    }

    #[derive(DeriveIden)]
    enum BidProcesses {
        Table,
        Id,
        Name,
    }

    #[derive(DeriveIden)]
    enum AccountingPeriods {
        Table,
        PeriodId,
        BudgetYear,
        PeriodMonth,
        IsClosed,
    }

    #[derive(DeriveIden)]
    enum DocumentSerials {
        Table,
        SerialCode,
        SerialPrefix,
        Digits,
        CurrentNo,
    }

    #[derive(DeriveIden)]
    enum Holidays {
        Table,
        HolidayId,
        HolidayDate,
        HolidayName,
    }
}

mod m20240101_000002_create_purchase_order_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_purchase_order_tables"
        }
    }

    fn money(col: PurchaseOrders) -> ColumnDef {
        ColumnDef::new(col)
            .decimal_len(15, 2)
            .not_null()
            .default(0)
            .to_owned()
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            // Matches entities/purchase_order.rs
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrders::PurchaseOrderId)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::PurchaseOrderNumber)
                                .string_len(32)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::PurchaseOrderBookNumber)
                                .string_len(32)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::PurchasingId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::LabelerId).big_integer().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::VerifyCommitteeId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::PurchaseMethodId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::GenericTypeId)
                                .integer()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::OrderDate).date().not_null())
                        .col(&mut money(PurchaseOrders::DiscountPercent))
                        .col(&mut money(PurchaseOrders::DiscountCash))
                        .col(
                            ColumnDef::new(PurchaseOrders::IncludeVat)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(&mut money(PurchaseOrders::VatRate))
                        .col(&mut money(PurchaseOrders::Vat))
                        .col(&mut money(PurchaseOrders::SubTotal))
                        .col(&mut money(PurchaseOrders::TotalPrice))
                        .col(ColumnDef::new(PurchaseOrders::BudgetYear).integer().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::BudgetDetailId)
                                .big_integer()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::PurchaseType).string().null())
                        .col(ColumnDef::new(PurchaseOrders::Comment).text().null())
                        .col(ColumnDef::new(PurchaseOrders::ShipTo).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::VendorContactName)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::Delivery).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::IsReorder)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::IsContract)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::IsCancel)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::PurchaseOrderStatus)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::CancelComment).text().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::CancelDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::ConfirmedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::ApprovedDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(PurchaseOrders::PeopleUserId).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_orders_status")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::PurchaseOrderStatus)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_orders_order_date")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::OrderDate)
                        .col(PurchaseOrders::PurchaseOrderNumber)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_orders_labeler_id")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::LabelerId)
                        .to_owned(),
                )
                .await?;

            // A number is unique within its series once assigned; NULLs do not collide.
            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("ux_purchase_orders_number")
                        .table(PurchaseOrders::Table)
                        .col(PurchaseOrders::PurchaseOrderNumber)
                        .unique()
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderItems::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderItems::PurchaseOrderItemId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::PurchaseOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::ProductId)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(PurchaseOrderItems::GenericId).string().null())
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Qty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::UnitPrice)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::UnitGenericId)
                                .big_integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::TotalPrice)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::TotalSmallQty)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderItems::Giveaway)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_purchase_order_items_order")
                                .from(
                                    PurchaseOrderItems::Table,
                                    PurchaseOrderItems::PurchaseOrderId,
                                )
                                .to(PurchaseOrders::Table, PurchaseOrders::PurchaseOrderId)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_order_items_order_id")
                        .table(PurchaseOrderItems::Table)
                        .col(PurchaseOrderItems::PurchaseOrderId)
                        .to_owned(),
                )
                .await?;

            // No foreign key: log rows outlive the order they describe.
            manager
                .create_table(
                    Table::create()
                        .table(PurchaseOrderStatusLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PurchaseOrderStatusLogs::StatusLogId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderStatusLogs::PurchaseOrderId)
                                .uuid()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderStatusLogs::FromStatus)
                                .string_len(16)
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderStatusLogs::ToStatus)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderStatusLogs::PeopleUserId)
                                .string()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(PurchaseOrderStatusLogs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_purchase_order_status_logs_order_id")
                        .table(PurchaseOrderStatusLogs::Table)
                        .col(PurchaseOrderStatusLogs::PurchaseOrderId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(PurchaseOrderStatusLogs::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrderItems::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(PurchaseOrders::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden, Clone, Copy)]
    enum PurchaseOrders {
        Table,
        PurchaseOrderId,
        PurchaseOrderNumber,
        PurchaseOrderBookNumber,
        PurchasingId,
        LabelerId,
        VerifyCommitteeId,
        PurchaseMethodId,
        GenericTypeId,
        OrderDate,
        DiscountPercent,
        DiscountCash,
        IncludeVat,
        VatRate,
        Vat,
        SubTotal,
        TotalPrice,
        BudgetYear,
        BudgetDetailId,
        PurchaseType,
        Comment,
        ShipTo,
        VendorContactName,
        Delivery,
        IsReorder,
        IsContract,
        IsCancel,
        PurchaseOrderStatus,
        CancelComment,
        CancelDate,
        ConfirmedDate,
        ApprovedDate,
        PeopleUserId,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum PurchaseOrderItems {
        Table,
        PurchaseOrderItemId,
        PurchaseOrderId,
        ProductId,
        GenericId,
        Qty,
        UnitPrice,
        UnitGenericId,
        TotalPrice,
        TotalSmallQty,
        Giveaway,
    }

    #[derive(DeriveIden)]
    enum PurchaseOrderStatusLogs {
        Table,
        StatusLogId,
        PurchaseOrderId,
        FromStatus,
        ToStatus,
        PeopleUserId,
        CreatedAt,
    }
}

mod m20240101_000003_create_receiving_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_receiving_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Receives::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Receives::ReceiveId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Receives::ReceiveCode).string().not_null())
                        .col(ColumnDef::new(Receives::ReceiveDate).date().not_null())
                        .col(ColumnDef::new(Receives::DeliveryCode).string().null())
                        .col(ColumnDef::new(Receives::DeliveryDate).date().null())
                        .col(ColumnDef::new(Receives::PurchaseOrderId).uuid().null())
                        .col(
                            ColumnDef::new(Receives::VendorLabelerId)
                                .big_integer()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_receives_purchase_order_id")
                        .table(Receives::Table)
                        .col(Receives::PurchaseOrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ReceiveDetails::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ReceiveDetails::ReceiveDetailId)
                                .big_integer()
                                .primary_key()
                                .auto_increment()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ReceiveDetails::ReceiveId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ReceiveDetails::ProductId).string().not_null())
                        .col(
                            ColumnDef::new(ReceiveDetails::ReceiveQty)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ReceiveDetails::Cost)
                                .decimal_len(15, 2)
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(ReceiveDetails::UnitGenericId)
                                .big_integer()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_receive_details_receive")
                                .from(ReceiveDetails::Table, ReceiveDetails::ReceiveId)
                                .to(Receives::Table, Receives::ReceiveId)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ReceiveDetails::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Receives::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum Receives {
        Table,
        ReceiveId,
        ReceiveCode,
        ReceiveDate,
        DeliveryCode,
        DeliveryDate,
        PurchaseOrderId,
        VendorLabelerId,
    }

    #[derive(DeriveIden)]
    enum ReceiveDetails {
        Table,
        ReceiveDetailId,
        ReceiveId,
        ProductId,
        ReceiveQty,
        Cost,
        UnitGenericId,
    }
}

mod m20240101_000004_seed_document_serials {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000004_seed_document_serials"
        }
    }

    /// Purchase order numbering series with their generic type, where one exists.
    const SERIES: [(&str, Option<(i32, &str)>); 6] = [
        ("PO", Some((1, "Medicines"))),
        ("POA", Some((2, "Medical supplies"))),
        ("POB", Some((3, "Laboratory supplies"))),
        ("POC", Some((4, "Dental supplies"))),
        ("POD", Some((5, "X-ray supplies"))),
        ("POF", None),
    ];

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            let mut serials = Query::insert()
                .into_table(DocumentSerials::Table)
                .columns([
                    DocumentSerials::SerialCode,
                    DocumentSerials::SerialPrefix,
                    DocumentSerials::Digits,
                    DocumentSerials::CurrentNo,
                ])
                .to_owned();
            for (code, _) in SERIES {
                serials.values_panic([code.into(), code.into(), 6.into(), 0i64.into()]);
            }
            manager.exec_stmt(serials).await?;

            let mut types = Query::insert()
                .into_table(GenericTypes::Table)
                .columns([GenericTypes::GenericTypeId, GenericTypes::GenericTypeName])
                .to_owned();
            for (id, name) in SERIES.iter().filter_map(|(_, t)| *t) {
                types.values_panic([id.into(), name.into()]);
            }
            manager.exec_stmt(types).await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .exec_stmt(Query::delete().from_table(GenericTypes::Table).to_owned())
                .await?;
            manager
                .exec_stmt(Query::delete().from_table(DocumentSerials::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum DocumentSerials {
        Table,
        SerialCode,
        SerialPrefix,
        Digits,
        CurrentNo,
    }

    #[derive(DeriveIden)]
    enum GenericTypes {
        Table,
        GenericTypeId,
        GenericTypeName,
    }
}
