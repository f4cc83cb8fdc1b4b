//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the accounting schema
//! - Repository abstractions for data access
//! - The automatic accounting engine (journal entry builder)
//! - Database migrations

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    AccountResolver, AutoAccountingService, BillRepository, ChartRepository, JournalRepository,
    OrganizationRepository, PaymentRepository, PayrollRepository, TreasuryRepository,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
