//! Account resolution: semantic lookups against a tenant's chart.
//!
//! The posting rules never reference accounts by id; they ask for "the cash
//! account" or "the expense account for rubro X". The resolver answers those
//! questions, consulting per-tenant category mapping overrides before the
//! static rubro table, and turns a miss into a typed error so the entry
//! builder can abort the whole entry instead of dropping a leg.

use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter};
use uuid::Uuid;

use obra_core::chart::codes;
use obra_core::rubro::{account_code_for_rubro, normalize_rubro};

use crate::entities::{accounts, category_mappings};

/// Account resolution failure.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The code is not provisioned (or not active) for the tenant.
    #[error("account '{code}' is not provisioned for organization {organization_id}")]
    NotProvisioned {
        /// Tenant whose chart was searched.
        organization_id: Uuid,
        /// The code that failed to resolve.
        code: String,
    },

    /// Database error.
    #[error("database error: {0}")]
    Database(#[from] DbErr),
}

/// The fixed bundle of accounts the posting rules commonly need.
///
/// Each slot is `None` when that code is not provisioned; the bundle itself
/// always resolves.
#[derive(Debug, Clone)]
pub struct MainAccounts {
    /// Caja.
    pub cash: Option<accounts::Model>,
    /// Cuentas por Cobrar.
    pub accounts_receivable: Option<accounts::Model>,
    /// Cuentas por Pagar Comerciales.
    pub accounts_payable: Option<accounts::Model>,
    /// Default income account.
    pub default_income: Option<accounts::Model>,
    /// Default expense account.
    pub default_expense: Option<accounts::Model>,
    /// Payroll expense account.
    pub payroll_expense: Option<accounts::Model>,
    /// Payroll deductions liability account.
    pub payroll_liability: Option<accounts::Model>,
}

/// Resolves semantic account requests against a tenant's chart.
#[derive(Debug, Clone)]
pub struct AccountResolver {
    db: DatabaseConnection,
}

impl AccountResolver {
    /// Creates a new account resolver.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the active account with the exact code for a tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_active_by_code(
        &self,
        organization_id: Uuid,
        code: &str,
    ) -> Result<Option<accounts::Model>, DbErr> {
        accounts::Entity::find()
            .filter(accounts::Column::OrganizationId.eq(organization_id))
            .filter(accounts::Column::Code.eq(code))
            .filter(accounts::Column::IsActive.eq(true))
            .one(&self.db)
            .await
    }

    /// Like [`Self::find_active_by_code`], but a miss is an error.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotProvisioned`] on miss, or a database error.
    pub async fn require_by_code(
        &self,
        organization_id: Uuid,
        code: &str,
    ) -> Result<accounts::Model, ResolveError> {
        self.find_active_by_code(organization_id, code)
            .await?
            .ok_or_else(|| ResolveError::NotProvisioned {
                organization_id,
                code: code.to_string(),
            })
    }

    /// Resolves the income or expense account for a rubro.
    ///
    /// Per-tenant category mapping overrides win over the static rubro table;
    /// unknown rubros fall back to the default income/expense pair.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::NotProvisioned`] when the resolved code has no
    /// active account, or a database error.
    pub async fn account_for_rubro(
        &self,
        organization_id: Uuid,
        rubro: &str,
        is_income: bool,
    ) -> Result<accounts::Model, ResolveError> {
        let normalized = normalize_rubro(rubro);

        let code = match self.find_mapping_override(organization_id, &normalized).await? {
            Some(mapping) => {
                if is_income {
                    mapping.income_code
                } else {
                    mapping.expense_code
                }
            }
            None => account_code_for_rubro(&normalized, is_income).to_string(),
        };

        self.require_by_code(organization_id, &code).await
    }

    /// Resolves the commonly needed account bundle in parallel.
    ///
    /// # Errors
    ///
    /// Returns an error if any lookup query fails; individual misses are
    /// represented as `None` slots, not errors.
    pub async fn main_accounts(&self, organization_id: Uuid) -> Result<MainAccounts, DbErr> {
        let (
            cash,
            accounts_receivable,
            accounts_payable,
            default_income,
            default_expense,
            payroll_expense,
            payroll_liability,
        ) = tokio::try_join!(
            self.find_active_by_code(organization_id, codes::CASH),
            self.find_active_by_code(organization_id, codes::ACCOUNTS_RECEIVABLE),
            self.find_active_by_code(organization_id, codes::ACCOUNTS_PAYABLE),
            self.find_active_by_code(organization_id, codes::DEFAULT_INCOME),
            self.find_active_by_code(organization_id, codes::DEFAULT_EXPENSE),
            self.find_active_by_code(organization_id, codes::PAYROLL_EXPENSE),
            self.find_active_by_code(organization_id, codes::PAYROLL_LIABILITY),
        )?;

        Ok(MainAccounts {
            cash,
            accounts_receivable,
            accounts_payable,
            default_income,
            default_expense,
            payroll_expense,
            payroll_liability,
        })
    }

    /// Upserts a per-tenant rubro override.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub async fn set_mapping_override(
        &self,
        organization_id: Uuid,
        rubro: &str,
        income_code: &str,
        expense_code: &str,
    ) -> Result<category_mappings::Model, DbErr> {
        use sea_orm::ActiveModelTrait;
        use sea_orm::Set;

        let normalized = normalize_rubro(rubro);

        if let Some(existing) = self.find_mapping_override(organization_id, &normalized).await? {
            let mut active: category_mappings::ActiveModel = existing.into();
            active.income_code = Set(income_code.to_string());
            active.expense_code = Set(expense_code.to_string());
            return active.update(&self.db).await;
        }

        category_mappings::ActiveModel {
            id: Set(Uuid::new_v4()),
            organization_id: Set(organization_id),
            rubro: Set(normalized),
            income_code: Set(income_code.to_string()),
            expense_code: Set(expense_code.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        }
        .insert(&self.db)
        .await
    }

    async fn find_mapping_override(
        &self,
        organization_id: Uuid,
        normalized_rubro: &str,
    ) -> Result<Option<category_mappings::Model>, DbErr> {
        category_mappings::Entity::find()
            .filter(category_mappings::Column::OrganizationId.eq(organization_id))
            .filter(category_mappings::Column::Rubro.eq(normalized_rubro))
            .one(&self.db)
            .await
    }
}
