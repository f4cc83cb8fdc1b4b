//! Payment repository: generic client/provider payments.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{payments, sea_orm_active_enums::CounterpartyType};

/// Input for recording a payment.
#[derive(Debug, Clone)]
pub struct CreatePaymentInput {
    /// Owning tenant.
    pub organization_id: Uuid,
    /// Received from a client or made to a provider.
    pub counterparty_type: CounterpartyType,
    /// Client or provider name.
    pub counterparty_name: String,
    /// Optional category; defaults apply when absent.
    pub rubro: Option<String>,
    /// Positive amount.
    pub amount: Decimal,
    /// Payment date.
    pub paid_on: NaiveDate,
}

/// Repository for generic payments.
#[derive(Debug, Clone)]
pub struct PaymentRepository {
    db: DatabaseConnection,
}

impl PaymentRepository {
    /// Creates a new payment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_payment(
        &self,
        input: CreatePaymentInput,
    ) -> Result<payments::Model, DbErr> {
        payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            counterparty_type: Set(input.counterparty_type),
            counterparty_name: Set(input.counterparty_name),
            rubro: Set(input.rubro),
            amount: Set(input.amount),
            paid_on: Set(input.paid_on),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Lists a tenant's payments, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<payments::Model>, DbErr> {
        payments::Entity::find()
            .filter(payments::Column::OrganizationId.eq(organization_id))
            .order_by_desc(payments::Column::PaidOn)
            .all(&self.db)
            .await
    }
}
