//! `SeaORM` Entity for the bills table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::BillType;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bills")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub organization_id: Uuid,
    pub bill_type: BillType,
    pub counterparty_name: String,
    pub total: Decimal,
    pub issued_on: Date,
    pub description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::organizations::Entity",
        from = "Column::OrganizationId",
        to = "super::organizations::Column::Id"
    )]
    Organizations,
    #[sea_orm(has_many = "super::bill_rubros::Entity")]
    BillRubros,
    #[sea_orm(has_many = "super::bill_payments::Entity")]
    BillPayments,
}

impl Related<super::organizations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organizations.def()
    }
}

impl Related<super::bill_rubros::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillRubros.def()
    }
}

impl Related<super::bill_payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BillPayments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
