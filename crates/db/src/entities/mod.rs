//! `SeaORM` entity definitions for the accounting schema.

pub mod accounts;
pub mod bill_payments;
pub mod bill_rubros;
pub mod bills;
pub mod cash_transactions;
pub mod category_mappings;
pub mod journal_entries;
pub mod journal_sequences;
pub mod organizations;
pub mod payments;
pub mod payrolls;
pub mod sea_orm_active_enums;
