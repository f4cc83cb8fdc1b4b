//! Repository layer for database access.

pub mod account;
pub mod bill;
pub mod chart;
pub mod journal;
pub mod organization;
pub mod payment;
pub mod payroll;
pub mod treasury;

pub use account::{AccountResolver, MainAccounts, ResolveError};
pub use bill::{BillError, BillRepository, BillWithRubros, CreateBillInput, RubroLine};
pub use chart::{ChartRepository, ChartStats};
pub use journal::{
    AutoAccountingService, JournalError, JournalFilter, JournalRepository, PostedEntry,
};
pub use organization::{CreateOrganizationInput, OrganizationRepository};
pub use payment::{CreatePaymentInput, PaymentRepository};
pub use payroll::{CreatePayrollInput, PayrollRepository};
pub use treasury::{CreateTransactionInput, TreasuryRepository};
