//! Organization (tenant) repository.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::organizations;

/// Input for creating a tenant.
#[derive(Debug, Clone)]
pub struct CreateOrganizationInput {
    /// Display name.
    pub name: String,
    /// ISO 4217 currency code for all ledger amounts.
    pub currency: String,
    /// Whether automatic accounting is active for this tenant.
    pub enable_accounting: bool,
}

/// Repository for tenant records.
#[derive(Debug, Clone)]
pub struct OrganizationRepository {
    db: DatabaseConnection,
}

impl OrganizationRepository {
    /// Creates a new organization repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a new organization.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub async fn create(
        &self,
        input: CreateOrganizationInput,
    ) -> Result<organizations::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let org = organizations::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            currency: Set(input.currency),
            enable_accounting: Set(input.enable_accounting),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        };
        org.insert(&self.db).await
    }

    /// Finds an organization by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<organizations::Model>, DbErr> {
        organizations::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists active organizations, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub async fn list_active(&self) -> Result<Vec<organizations::Model>, DbErr> {
        organizations::Entity::find()
            .filter(organizations::Column::IsActive.eq(true))
            .order_by_desc(organizations::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Toggles the accounting module for a tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the organization does not exist or the update fails.
    pub async fn set_accounting_enabled(
        &self,
        id: Uuid,
        enabled: bool,
    ) -> Result<organizations::Model, DbErr> {
        let org = organizations::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("organization {id}")))?;

        let mut active: organizations::ActiveModel = org.into();
        active.enable_accounting = Set(enabled);
        active.updated_at = Set(chrono::Utc::now().into());
        active.update(&self.db).await
    }
}
