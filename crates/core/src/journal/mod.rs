//! Balanced journal entries and per-event posting rules.
//!
//! This module implements the heart of the automatic accounting engine:
//! - Entry aggregates that are balanced by construction
//! - Zero-padded correlated entry numbering
//! - Posting rules for treasury, payroll, bill, bill-payment, and payment
//!   events
//! - Balance-failure error taxonomy

pub mod entry;
pub mod error;
pub mod posting;

#[cfg(test)]
mod posting_props;

pub use entry::{
    balance_tolerance, format_entry_number, parse_entry_number, EntryLeg, EntryLegs, LegSide,
    SourceType, ENTRY_NUMBER_WIDTH, FIRST_ENTRY_NUMBER,
};
pub use error::AccountingError;
pub use posting::{
    bill_legs, bill_payment_legs, payment_legs, payroll_legs, split_amount, treasury_legs,
    BillKind, CashFlowKind, CounterpartyKind, PayrollAmounts, RubroSplit,
};
