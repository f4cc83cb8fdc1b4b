//! Payroll repository: monthly payroll runs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::payrolls;

/// Input for recording a payroll run.
#[derive(Debug, Clone)]
pub struct CreatePayrollInput {
    /// Owning tenant.
    pub organization_id: Uuid,
    /// Period label, e.g. `2026-03`.
    pub period: String,
    /// Base salary total.
    pub base: Decimal,
    /// Overtime total.
    pub overtime: Decimal,
    /// Bonuses total.
    pub bonuses: Decimal,
    /// Deductions withheld.
    pub deductions: Decimal,
    /// Explicit net pay; derived as gross − deductions when absent.
    pub net_pay: Option<Decimal>,
    /// Run date.
    pub run_on: NaiveDate,
}

/// Repository for payroll runs.
#[derive(Debug, Clone)]
pub struct PayrollRepository {
    db: DatabaseConnection,
}

impl PayrollRepository {
    /// Creates a new payroll repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a payroll run.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create_payroll(
        &self,
        input: CreatePayrollInput,
    ) -> Result<payrolls::Model, DbErr> {
        payrolls::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            period: Set(input.period),
            base: Set(input.base),
            overtime: Set(input.overtime),
            bonuses: Set(input.bonuses),
            deductions: Set(input.deductions),
            net_pay: Set(input.net_pay),
            run_on: Set(input.run_on),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    /// Lists a tenant's payroll runs, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<payrolls::Model>, DbErr> {
        payrolls::Entity::find()
            .filter(payrolls::Column::OrganizationId.eq(organization_id))
            .order_by_desc(payrolls::Column::RunOn)
            .all(&self.db)
            .await
    }
}
