use sea_orm_migration::prelude::*;

use super::m20260101_000000_init::Expenses;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum ExpensesCurrency {
    Currency,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Expenses::Table)
                    .add_column(
                        ColumnDef::new(ExpensesCurrency::Currency)
                            .string()
                            .not_null()
                            .default("EUR"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .alter_table(
                Table::alter()
                    .table(Expenses::Table)
                    .drop_column(ExpensesCurrency::Currency)
                    .to_owned(),
            )
            .await
    }
}
