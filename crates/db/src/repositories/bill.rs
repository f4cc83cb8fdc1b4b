//! Bill repository: bills, their rubro lines, and partial payments.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::entities::{bill_payments, bill_rubros, bills, sea_orm_active_enums::BillType};

/// Bill validation or persistence failure.
#[derive(Debug, thiserror::Error)]
pub enum BillError {
    /// Rubro percentages must sum to 100 (within a cent).
    #[error("rubro percentages sum to {0}, expected 100")]
    PercentagesNotHundred(Decimal),

    /// A bill needs at least one rubro line.
    #[error("bill has no rubro lines")]
    NoRubros,

    /// Bill not found.
    #[error("bill not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// One rubro line of a bill being created.
#[derive(Debug, Clone)]
pub struct RubroLine {
    /// Category name; normalized at resolution time.
    pub rubro: String,
    /// Share of the bill total, in percent.
    pub percentage: Decimal,
}

/// Input for creating a bill with its rubro lines.
#[derive(Debug, Clone)]
pub struct CreateBillInput {
    /// Owning tenant.
    pub organization_id: Uuid,
    /// Client or provider bill.
    pub bill_type: BillType,
    /// Client or provider name.
    pub counterparty_name: String,
    /// Total amount.
    pub total: Decimal,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Free-form description.
    pub description: Option<String>,
    /// Percentage split across categories.
    pub rubros: Vec<RubroLine>,
}

/// A bill with its rubro lines loaded.
#[derive(Debug, Clone)]
pub struct BillWithRubros {
    /// The bill record.
    pub bill: bills::Model,
    /// Its rubro lines.
    pub rubros: Vec<bill_rubros::Model>,
}

/// Repository for bills and bill payments.
#[derive(Debug, Clone)]
pub struct BillRepository {
    db: DatabaseConnection,
}

impl BillRepository {
    /// Creates a new bill repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a bill and its rubro lines in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the lines are empty, the percentages do not sum to
    /// 100 within a cent, or persistence fails.
    pub async fn create_bill(&self, input: CreateBillInput) -> Result<BillWithRubros, BillError> {
        if input.rubros.is_empty() {
            return Err(BillError::NoRubros);
        }
        let pct_sum: Decimal = input.rubros.iter().map(|line| line.percentage).sum();
        if (pct_sum - Decimal::ONE_HUNDRED).abs() > Decimal::new(1, 2) {
            return Err(BillError::PercentagesNotHundred(pct_sum));
        }

        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let bill = bills::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(input.organization_id),
            bill_type: Set(input.bill_type),
            counterparty_name: Set(input.counterparty_name),
            total: Set(input.total),
            issued_on: Set(input.issued_on),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&txn)
        .await?;

        let mut rubros = Vec::with_capacity(input.rubros.len());
        for line in input.rubros {
            let rubro = bill_rubros::ActiveModel {
                id: Set(Uuid::new_v4()),
                bill_id: Set(bill.id),
                rubro: Set(line.rubro),
                percentage: Set(line.percentage),
            }
            .insert(&txn)
            .await?;
            rubros.push(rubro);
        }

        txn.commit().await?;
        Ok(BillWithRubros { bill, rubros })
    }

    /// Loads a bill with its rubro lines.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_with_rubros(&self, id: Uuid) -> Result<Option<BillWithRubros>, DbErr> {
        let Some(bill) = bills::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let rubros = bill_rubros::Entity::find()
            .filter(bill_rubros::Column::BillId.eq(bill.id))
            .all(&self.db)
            .await?;
        Ok(Some(BillWithRubros { bill, rubros }))
    }

    /// Lists a tenant's bills, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list(&self, organization_id: Uuid) -> Result<Vec<bills::Model>, DbErr> {
        bills::Entity::find()
            .filter(bills::Column::OrganizationId.eq(organization_id))
            .order_by_desc(bills::Column::IssuedOn)
            .all(&self.db)
            .await
    }

    /// Records a full or partial payment against a bill.
    ///
    /// # Errors
    ///
    /// Returns an error if the bill does not exist or the insert fails.
    pub async fn record_payment(
        &self,
        bill_id: Uuid,
        amount: Decimal,
        paid_on: NaiveDate,
    ) -> Result<bill_payments::Model, BillError> {
        let bill = bills::Entity::find_by_id(bill_id)
            .one(&self.db)
            .await?
            .ok_or(BillError::NotFound(bill_id))?;

        let payment = bill_payments::ActiveModel {
            id: Set(Uuid::new_v4()),
            bill_id: Set(bill.id),
            amount: Set(amount),
            paid_on: Set(paid_on),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await?;
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input_with_percentages(percentages: &[Decimal]) -> CreateBillInput {
        CreateBillInput {
            organization_id: Uuid::new_v4(),
            bill_type: BillType::Provider,
            counterparty_name: "Proveedor SA".to_string(),
            total: dec!(1000),
            issued_on: chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            description: None,
            rubros: percentages
                .iter()
                .map(|pct| RubroLine {
                    rubro: "MATERIALES".to_string(),
                    percentage: *pct,
                })
                .collect(),
        }
    }

    #[test]
    fn test_percentage_sum_validation() {
        let sum: Decimal = input_with_percentages(&[dec!(60), dec!(40)])
            .rubros
            .iter()
            .map(|l| l.percentage)
            .sum();
        assert_eq!(sum, Decimal::ONE_HUNDRED);

        let short: Decimal = input_with_percentages(&[dec!(60), dec!(30)])
            .rubros
            .iter()
            .map(|l| l.percentage)
            .sum();
        assert!((short - Decimal::ONE_HUNDRED).abs() > Decimal::new(1, 2));
    }
}
