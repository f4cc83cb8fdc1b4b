//! Accounting error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while building or validating a journal entry.
#[derive(Debug, Error)]
pub enum AccountingError {
    /// The leg set does not balance within the 0.01 tolerance.
    #[error("Entry is not balanced. Debit: {debit}, Credit: {credit}")]
    Unbalanced {
        /// Sum of the debit legs.
        debit: Decimal,
        /// Sum of the credit legs.
        credit: Decimal,
    },

    /// An entry must carry at least two legs.
    #[error("Entry must have at least 2 legs")]
    InsufficientLegs,

    /// Leg amounts must be strictly positive.
    #[error("Leg amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}
