//! `SeaORM` Entity for the journal_entries table.
//!
//! One row per leg; all legs of a logical entry share the same zero-padded
//! `entry_number` within their organization. Exactly one of
//! `debit_account_id` / `credit_account_id` is set per row, and the matching
//! amount column is non-zero.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "journal_entries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    /// Zero-padded correlated number shared by all legs of one entry.
    pub entry_number: String,
    pub entry_date: Date,
    pub description: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub currency: String,
    /// Fixed at 1; multi-currency conversion is out of scope.
    pub exchange_rate: Decimal,
    pub debit_account_id: Option<Uuid>,
    pub credit_account_id: Option<Uuid>,
    /// TRANSACTION | PAYROLL | BILL | BILL_PAYMENT | PAYMENT for automatic
    /// entries; free-form for manual ones.
    pub source_type: String,
    pub source_id: Uuid,
    pub is_automatic: bool,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrganizationId",
        to = "super::organizations::Column::Id"
    )]
    Organizations,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::DebitAccountId",
        to = "super::accounts::Column::Id"
    )]
    DebitAccount,
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::CreditAccountId",
        to = "super::accounts::Column::Id"
    )]
    CreditAccount,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
