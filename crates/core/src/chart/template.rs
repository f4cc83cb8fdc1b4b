//! Fixed chart of accounts template for construction companies.
//!
//! The template is declared in parent-before-child order so that a
//! provisioner walking it sequentially can always resolve `parent` against
//! accounts it has already created.

use super::{AccountSubtype, AccountType};

/// One account in the standard chart template.
#[derive(Debug, Clone, Copy)]
pub struct ChartAccountDef {
    /// Hierarchical account code, unique within the template.
    pub code: &'static str,
    /// Display name (Spanish, as used by construction tenants).
    pub name: &'static str,
    /// Account classification.
    pub account_type: AccountType,
    /// Optional finer classification.
    pub subtype: Option<AccountSubtype>,
    /// Code of the parent account; `None` for the five roots.
    pub parent: Option<&'static str>,
}

const fn acct(
    code: &'static str,
    name: &'static str,
    account_type: AccountType,
    subtype: Option<AccountSubtype>,
    parent: Option<&'static str>,
) -> ChartAccountDef {
    ChartAccountDef {
        code,
        name,
        account_type,
        subtype,
        parent,
    }
}

use AccountSubtype as S;
use AccountType as T;

/// The construction-industry standard chart, parent-before-child.
static STANDARD_CHART: &[ChartAccountDef] = &[
    // ===== ACTIVO =====
    acct("1", "Activo", T::Asset, None, None),
    acct("1.1", "Activo Corriente", T::Asset, Some(S::Current), Some("1")),
    acct("1.1.01", "Caja", T::Asset, Some(S::Current), Some("1.1")),
    acct("1.1.02", "Bancos", T::Asset, Some(S::Current), Some("1.1")),
    acct("1.1.03", "Cuentas por Cobrar", T::Asset, Some(S::Current), Some("1.1")),
    acct("1.1.04", "Materiales en Depósito", T::Asset, Some(S::Current), Some("1.1")),
    acct("1.1.05", "Anticipos a Proveedores", T::Asset, Some(S::Current), Some("1.1")),
    acct("1.2", "Activo No Corriente", T::Asset, Some(S::NonCurrent), Some("1")),
    acct("1.2.01", "Maquinaria y Equipos", T::Asset, Some(S::NonCurrent), Some("1.2")),
    acct("1.2.02", "Rodados", T::Asset, Some(S::NonCurrent), Some("1.2")),
    acct("1.2.03", "Depreciación Acumulada", T::Asset, Some(S::NonCurrent), Some("1.2")),
    // ===== PASIVO =====
    acct("2", "Pasivo", T::Liability, None, None),
    acct("2.1", "Pasivo Corriente", T::Liability, Some(S::Current), Some("2")),
    acct("2.1.01", "Cuentas por Pagar Comerciales", T::Liability, Some(S::Current), Some("2.1")),
    acct("2.1.02", "Remuneraciones y Cargas Sociales por Pagar", T::Liability, Some(S::Current), Some("2.1")),
    acct("2.1.03", "Impuestos por Pagar", T::Liability, Some(S::Current), Some("2.1")),
    acct("2.1.04", "Anticipos de Clientes", T::Liability, Some(S::Current), Some("2.1")),
    acct("2.2", "Pasivo No Corriente", T::Liability, Some(S::NonCurrent), Some("2")),
    acct("2.2.01", "Préstamos Bancarios a Largo Plazo", T::Liability, Some(S::NonCurrent), Some("2.2")),
    // ===== PATRIMONIO NETO =====
    acct("3", "Patrimonio Neto", T::Equity, None, None),
    acct("3.1", "Capital", T::Equity, None, Some("3")),
    acct("3.1.01", "Capital Social", T::Equity, None, Some("3.1")),
    acct("3.1.02", "Resultados Acumulados", T::Equity, None, Some("3.1")),
    // ===== INGRESOS =====
    acct("4", "Ingresos", T::Income, None, None),
    acct("4.1", "Ingresos Operativos", T::Income, Some(S::Operational), Some("4")),
    acct("4.1.01", "Ingresos por Obras", T::Income, Some(S::Operational), Some("4.1")),
    acct("4.1.02", "Ingresos por Servicios", T::Income, Some(S::Operational), Some("4.1")),
    acct("4.2", "Ingresos No Operativos", T::Income, Some(S::NonOperational), Some("4")),
    acct("4.2.01", "Otros Ingresos", T::Income, Some(S::NonOperational), Some("4.2")),
    // ===== EGRESOS =====
    acct("5", "Egresos", T::Expense, None, None),
    acct("5.1", "Costos Directos de Obra", T::Expense, Some(S::DirectCost), Some("5")),
    acct("5.1.01", "Materiales de Construcción", T::Expense, Some(S::DirectCost), Some("5.1")),
    acct("5.1.02", "Mano de Obra", T::Expense, Some(S::DirectCost), Some("5.1")),
    acct("5.1.03", "Subcontratos", T::Expense, Some(S::DirectCost), Some("5.1")),
    acct("5.1.04", "Alquiler de Maquinaria y Equipos", T::Expense, Some(S::DirectCost), Some("5.1")),
    acct("5.1.05", "Fletes y Transporte", T::Expense, Some(S::DirectCost), Some("5.1")),
    acct("5.1.06", "Combustibles y Lubricantes", T::Expense, Some(S::DirectCost), Some("5.1")),
    acct("5.2", "Gastos de Administración", T::Expense, Some(S::Admin), Some("5")),
    acct("5.2.01", "Gastos Generales", T::Expense, Some(S::Admin), Some("5.2")),
    acct("5.2.02", "Sueldos Administrativos", T::Expense, Some(S::Admin), Some("5.2")),
    acct("5.2.03", "Honorarios Profesionales", T::Expense, Some(S::Admin), Some("5.2")),
    acct("5.2.04", "Servicios Públicos", T::Expense, Some(S::Admin), Some("5.2")),
    acct("5.2.05", "Impuestos y Tasas", T::Expense, Some(S::Admin), Some("5.2")),
    acct("5.3", "Gastos Financieros", T::Expense, Some(S::Financial), Some("5")),
    acct("5.3.01", "Intereses Bancarios", T::Expense, Some(S::Financial), Some("5.3")),
    acct("5.3.02", "Comisiones y Gastos Bancarios", T::Expense, Some(S::Financial), Some("5.3")),
];

/// Returns the standard chart template in parent-before-child order.
#[must_use]
pub fn standard_chart() -> &'static [ChartAccountDef] {
    STANDARD_CHART
}
