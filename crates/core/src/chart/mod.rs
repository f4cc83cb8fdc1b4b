//! Construction-industry chart of accounts.
//!
//! Defines the account classification enums, the well-known account codes the
//! posting rules depend on, and the fixed chart template every new tenant is
//! provisioned with.

pub mod template;

use serde::{Deserialize, Serialize};

pub use template::{standard_chart, ChartAccountDef};

/// Account classification in the five-type model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountType {
    /// Asset accounts (cash, receivables, inventory, machinery).
    Asset,
    /// Liability accounts (payables, payroll, loans).
    Liability,
    /// Equity accounts.
    Equity,
    /// Income accounts.
    Income,
    /// Expense accounts.
    Expense,
}

impl AccountType {
    /// All account types, in chart order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Income,
        Self::Expense,
    ];

    /// Uppercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "ASSET",
            Self::Liability => "LIABILITY",
            Self::Equity => "EQUITY",
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }
}

/// Account subtype for finer classification within a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountSubtype {
    /// Current assets/liabilities.
    Current,
    /// Non-current assets/liabilities.
    NonCurrent,
    /// Operational income.
    Operational,
    /// Non-operational income.
    NonOperational,
    /// Direct construction costs.
    DirectCost,
    /// Administrative expenses.
    Admin,
    /// Financial expenses.
    Financial,
}

impl AccountSubtype {
    /// Uppercase wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "CURRENT",
            Self::NonCurrent => "NON_CURRENT",
            Self::Operational => "OPERATIONAL",
            Self::NonOperational => "NON_OPERATIONAL",
            Self::DirectCost => "DIRECT_COST",
            Self::Admin => "ADMIN",
            Self::Financial => "FINANCIAL",
        }
    }
}

/// Well-known account codes the automatic posting rules resolve against.
///
/// These codes exist in every tenant provisioned with [`standard_chart`].
pub mod codes {
    /// Caja (cash box).
    pub const CASH: &str = "1.1.01";
    /// Bancos.
    pub const BANK: &str = "1.1.02";
    /// Cuentas por Cobrar.
    pub const ACCOUNTS_RECEIVABLE: &str = "1.1.03";
    /// Cuentas por Pagar Comerciales.
    pub const ACCOUNTS_PAYABLE: &str = "2.1.01";
    /// Remuneraciones y Cargas Sociales por Pagar.
    pub const PAYROLL_LIABILITY: &str = "2.1.02";
    /// Ingresos por Obras (default income).
    pub const DEFAULT_INCOME: &str = "4.1.01";
    /// Gastos Generales (default expense).
    pub const DEFAULT_EXPENSE: &str = "5.2.01";
    /// Sueldos Administrativos (payroll expense).
    pub const PAYROLL_EXPENSE: &str = "5.2.02";
}
