//! Rubro (business category) to account-code routing.
//!
//! Bills and payments are categorized by rubro ("MATERIALES", "MANO DE OBRA",
//! ...). Each rubro routes to one income code and one expense code from the
//! standard chart; unknown rubros fall back to the `DEFAULT` pair. Per-tenant
//! overrides are consulted by the database layer before this static table.

use crate::chart::codes;

/// Income/expense account codes a rubro routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RubroAccounts {
    /// Account code used when the rubro appears on the income side.
    pub income_code: &'static str,
    /// Account code used when the rubro appears on the expense side.
    pub expense_code: &'static str,
}

impl RubroAccounts {
    /// Selects the income or expense code.
    #[must_use]
    pub const fn code(&self, is_income: bool) -> &'static str {
        if is_income {
            self.income_code
        } else {
            self.expense_code
        }
    }
}

/// Fallback routing for rubros not present in the table.
pub const DEFAULT_RUBRO_ACCOUNTS: RubroAccounts = RubroAccounts {
    income_code: codes::DEFAULT_INCOME,
    expense_code: codes::DEFAULT_EXPENSE,
};

const fn pair(income_code: &'static str, expense_code: &'static str) -> RubroAccounts {
    RubroAccounts {
        income_code,
        expense_code,
    }
}

static RUBRO_TABLE: &[(&str, RubroAccounts)] = &[
    ("MATERIALES", pair("4.1.01", "5.1.01")),
    ("MANO_DE_OBRA", pair("4.1.01", "5.1.02")),
    ("SUBCONTRATOS", pair("4.1.02", "5.1.03")),
    ("MAQUINARIA", pair("4.1.02", "5.1.04")),
    ("EQUIPOS", pair("4.1.02", "5.1.04")),
    ("FLETES", pair("4.1.01", "5.1.05")),
    ("COMBUSTIBLE", pair("4.1.01", "5.1.06")),
    ("HONORARIOS", pair("4.1.02", "5.2.03")),
    ("SERVICIOS", pair("4.1.02", "5.2.04")),
    ("IMPUESTOS", pair("4.2.01", "5.2.05")),
    ("OBRA", pair("4.1.01", "5.1.03")),
];

/// Normalizes a rubro name for lookup: trim, uppercase, spaces to underscores.
#[must_use]
pub fn normalize_rubro(name: &str) -> String {
    name.trim().to_uppercase().replace(' ', "_")
}

/// Looks up the account pair for a rubro, falling back to the default pair.
///
/// The name is normalized before lookup, so `"mano de obra"` and
/// `"MANO_DE_OBRA"` resolve identically.
#[must_use]
pub fn rubro_accounts(name: &str) -> RubroAccounts {
    let normalized = normalize_rubro(name);
    RUBRO_TABLE
        .iter()
        .find(|(key, _)| *key == normalized)
        .map_or(DEFAULT_RUBRO_ACCOUNTS, |(_, accounts)| *accounts)
}

/// Resolves the account code for a rubro on the income or expense side.
#[must_use]
pub fn account_code_for_rubro(name: &str, is_income: bool) -> &'static str {
    rubro_accounts(name).code(is_income)
}
