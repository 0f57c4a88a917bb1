pub use sea_orm_migration::prelude::*;

pub use database::{DATABASE_URL_VAR, DatabaseConfig, sqlite_only};

mod database;
mod m20260101_000000_init;
mod m20260106_121134_expense_currency;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260101_000000_init::Migration),
            Box::new(m20260106_121134_expense_currency::Migration),
        ]
    }
}
