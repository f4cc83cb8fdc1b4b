//! Postgres enum mappings for the accounting schema.

use obra_core::chart;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Account classification (`account_type` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "account_type")]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset accounts.
    #[sea_orm(string_value = "asset")]
    Asset,
    /// Liability accounts.
    #[sea_orm(string_value = "liability")]
    Liability,
    /// Equity accounts.
    #[sea_orm(string_value = "equity")]
    Equity,
    /// Income accounts.
    #[sea_orm(string_value = "income")]
    Income,
    /// Expense accounts.
    #[sea_orm(string_value = "expense")]
    Expense,
}

impl From<chart::AccountType> for AccountType {
    fn from(value: chart::AccountType) -> Self {
        match value {
            chart::AccountType::Asset => Self::Asset,
            chart::AccountType::Liability => Self::Liability,
            chart::AccountType::Equity => Self::Equity,
            chart::AccountType::Income => Self::Income,
            chart::AccountType::Expense => Self::Expense,
        }
    }
}

impl From<AccountType> for chart::AccountType {
    fn from(value: AccountType) -> Self {
        match value {
            AccountType::Asset => Self::Asset,
            AccountType::Liability => Self::Liability,
            AccountType::Equity => Self::Equity,
            AccountType::Income => Self::Income,
            AccountType::Expense => Self::Expense,
        }
    }
}

/// Bill direction (`bill_type` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "bill_type")]
#[serde(rename_all = "lowercase")]
pub enum BillType {
    /// Bill issued to a client (revenue).
    #[sea_orm(string_value = "client")]
    Client,
    /// Bill received from a provider (expense).
    #[sea_orm(string_value = "provider")]
    Provider,
}

/// Treasury movement direction (`cash_transaction_type` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(
    rs_type = "String",
    db_type = "Enum",
    enum_name = "cash_transaction_type"
)]
#[serde(rename_all = "lowercase")]
pub enum CashTransactionType {
    /// Money coming in.
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out.
    #[sea_orm(string_value = "expense")]
    Expense,
}

/// Generic payment counterparty (`counterparty_type` Postgres enum).
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "counterparty_type")]
#[serde(rename_all = "lowercase")]
pub enum CounterpartyType {
    /// Payment received from a client.
    #[sea_orm(string_value = "client")]
    Client,
    /// Payment made to a provider.
    #[sea_orm(string_value = "provider")]
    Provider,
}
