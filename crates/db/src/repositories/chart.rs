//! Standard chart provisioner and chart statistics.

use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set, TransactionTrait,
};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use obra_core::chart::{standard_chart, AccountType};

use crate::entities::accounts;

/// Per-type and aggregate counts for a tenant's chart.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ChartStats {
    /// All accounts, active or not.
    pub total_accounts: u64,
    /// Active accounts only.
    pub active_accounts: u64,
    /// Asset accounts.
    pub assets: u64,
    /// Liability accounts.
    pub liabilities: u64,
    /// Equity accounts.
    pub equity: u64,
    /// Income accounts.
    pub income: u64,
    /// Expense accounts.
    pub expense: u64,
}

/// Repository for chart-of-accounts provisioning and queries.
#[derive(Debug, Clone)]
pub struct ChartRepository {
    db: DatabaseConnection,
}

impl ChartRepository {
    /// Creates a new chart repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Provisions the full standard chart for a tenant in one transaction.
    ///
    /// Walks the template in declaration order (parent before child), so each
    /// parent id resolves against an account created earlier in the same
    /// transaction. Returns the created accounts keyed by code for immediate
    /// follow-up writes.
    ///
    /// Not idempotent: the unique (organization, code) constraint makes a
    /// second call fail and roll back. Callers gate on [`Self::has_standard_chart`].
    ///
    /// # Errors
    ///
    /// Returns an error if any insert fails; no accounts are left behind.
    pub async fn setup_standard_chart(
        &self,
        organization_id: Uuid,
    ) -> Result<HashMap<String, accounts::Model>, DbErr> {
        let template = standard_chart();
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        let mut by_code: HashMap<String, accounts::Model> =
            HashMap::with_capacity(template.len());

        for def in template {
            let parent_id = match def.parent {
                Some(parent_code) => {
                    let parent = by_code.get(parent_code).ok_or_else(|| {
                        DbErr::Custom(format!(
                            "chart template references unknown parent '{parent_code}'"
                        ))
                    })?;
                    Some(parent.id)
                }
                None => None,
            };

            let account = accounts::ActiveModel {
                id: Set(Uuid::new_v4()),
                organization_id: Set(organization_id),
                code: Set(def.code.to_string()),
                name: Set(def.name.to_string()),
                account_type: Set(def.account_type.into()),
                subtype: Set(def.subtype.map(|s| s.as_str().to_string())),
                parent_id: Set(parent_id),
                is_active: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&txn)
            .await?;

            by_code.insert(account.code.clone(), account);
        }

        txn.commit().await?;
        info!(
            organization_id = %organization_id,
            accounts = by_code.len(),
            "provisioned standard chart of accounts"
        );
        Ok(by_code)
    }

    /// True if the tenant has at least one account.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn has_standard_chart(&self, organization_id: Uuid) -> Result<bool, DbErr> {
        let count = accounts::Entity::find()
            .filter(accounts::Column::OrganizationId.eq(organization_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Account counts for a tenant, total and broken down by type.
    ///
    /// # Errors
    ///
    /// Returns an error if any count query fails.
    pub async fn get_chart_stats(&self, organization_id: Uuid) -> Result<ChartStats, DbErr> {
        let total_accounts = accounts::Entity::find()
            .filter(accounts::Column::OrganizationId.eq(organization_id))
            .count(&self.db)
            .await?;

        let active_accounts = accounts::Entity::find()
            .filter(accounts::Column::OrganizationId.eq(organization_id))
            .filter(accounts::Column::IsActive.eq(true))
            .count(&self.db)
            .await?;

        let mut by_type = [0_u64; 5];
        for (slot, account_type) in by_type.iter_mut().zip(AccountType::ALL) {
            *slot = accounts::Entity::find()
                .filter(accounts::Column::OrganizationId.eq(organization_id))
                .filter(
                    accounts::Column::AccountType
                        .eq(crate::entities::sea_orm_active_enums::AccountType::from(
                            account_type,
                        )),
                )
                .count(&self.db)
                .await?;
        }

        Ok(ChartStats {
            total_accounts,
            active_accounts,
            assets: by_type[0],
            liabilities: by_type[1],
            equity: by_type[2],
            income: by_type[3],
            expense: by_type[4],
        })
    }

    /// Lists a tenant's accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_accounts(
        &self,
        organization_id: Uuid,
    ) -> Result<Vec<accounts::Model>, DbErr> {
        use sea_orm::QueryOrder;

        accounts::Entity::find()
            .filter(accounts::Column::OrganizationId.eq(organization_id))
            .order_by_asc(accounts::Column::Code)
            .all(&self.db)
            .await
    }
}
