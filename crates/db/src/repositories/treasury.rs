//! Treasury repository: cash income/expense movements.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{cash_transactions, sea_orm_active_enums::CashTransactionType};

/// Input for recording a cash movement.
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    /// Owning tenant.
    pub organization_id: Uuid,
    /// Income or expense.
    pub transaction_type: CashTransactionType,
    /// Positive amount.
    pub amount: Decimal,
    /// Movement date.
    pub occurred_on: NaiveDate,
    /// Free-form description.
    pub description: Option<String>,
}

/// Repository for treasury cash movements.
#[derive(Debug, Clone)]
pub struct TreasuryRepository {
    db: DatabaseConnection,
}

impl TreasuryRepository {
    /// Creates a new treasury repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a cash movement.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_transaction(
        &self,
        input: CreateTransactionInput,
    ) -> Result<cash_transactions::Model, DbErr> {
        cash_transactions::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            transaction_type: Set(input.transaction_type),
            amount: Set(input.amount),
            occurred_on: Set(input.occurred_on),
            description: Set(input.description),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Lists a tenant's cash movements, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<cash_transactions::Model>, DbErr> {
        cash_transactions::Entity::find()
            .filter(cash_transactions::Column::OrganizationId.eq(organization_id))
            .order_by_desc(cash_transactions::Column::OccurredOn)
            .all(&self.db)
            .await
    }
}
