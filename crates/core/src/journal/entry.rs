//! Journal entry aggregate: balanced leg sets and entry numbering.
//!
//! A journal entry is a set of debit/credit legs treated as one unit. The
//! [`EntryLegs`] constructor rejects unbalanced sets, so every aggregate that
//! exists in the system satisfies the ledger-balance invariant by
//! construction. Persistence writes one row per leg under a shared
//! zero-padded entry number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::AccountingError;

/// Width of the zero-padded entry number string.
pub const ENTRY_NUMBER_WIDTH: usize = 6;

/// Entry numbers start at `000001` for a fresh organization.
pub const FIRST_ENTRY_NUMBER: i64 = 1;

/// Balance tolerance applied at the aggregate check.
///
/// Percentage splits rounded to 2 decimal places may miss the exact total by
/// a cent; anything beyond that is a genuine imbalance.
#[must_use]
pub fn balance_tolerance() -> Decimal {
    Decimal::new(1, 2) // 0.01
}

/// Which side of the ledger a leg posts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegSide {
    /// Debit leg.
    Debit,
    /// Credit leg.
    Credit,
}

/// One debit-or-credit line of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryLeg {
    /// The account the leg posts to.
    pub account_id: Uuid,
    /// Debit or credit.
    pub side: LegSide,
    /// Positive amount.
    pub amount: Decimal,
}

impl EntryLeg {
    /// Builds a debit leg.
    #[must_use]
    pub const fn debit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            side: LegSide::Debit,
            amount,
        }
    }

    /// Builds a credit leg.
    #[must_use]
    pub const fn credit(account_id: Uuid, amount: Decimal) -> Self {
        Self {
            account_id,
            side: LegSide::Credit,
            amount,
        }
    }
}

/// A validated, balanced set of entry legs.
///
/// Construction is the only way to obtain a value; unbalanced or degenerate
/// sets are rejected, so downstream persistence never has to re-check the
/// invariant.
#[derive(Debug, Clone)]
pub struct EntryLegs(Vec<EntryLeg>);

impl EntryLegs {
    /// Validates a leg set: at least two legs, positive amounts, and
    /// `|Σdebit − Σcredit| ≤ 0.01`.
    ///
    /// # Errors
    ///
    /// Returns [`AccountingError`] if any validation fails.
    pub fn balanced(legs: Vec<EntryLeg>) -> Result<Self, AccountingError> {
        if legs.len() < 2 {
            return Err(AccountingError::InsufficientLegs);
        }

        for leg in &legs {
            if leg.amount <= Decimal::ZERO {
                return Err(AccountingError::NonPositiveAmount(leg.amount));
            }
        }

        let debit = total(&legs, LegSide::Debit);
        let credit = total(&legs, LegSide::Credit);

        if (debit - credit).abs() > balance_tolerance() {
            return Err(AccountingError::Unbalanced { debit, credit });
        }

        Ok(Self(legs))
    }

    /// The validated legs.
    #[must_use]
    pub fn legs(&self) -> &[EntryLeg] {
        &self.0
    }

    /// Sum of the debit legs.
    #[must_use]
    pub fn total_debit(&self) -> Decimal {
        total(&self.0, LegSide::Debit)
    }

    /// Sum of the credit legs.
    #[must_use]
    pub fn total_credit(&self) -> Decimal {
        total(&self.0, LegSide::Credit)
    }

    /// Consumes the aggregate, yielding the legs.
    #[must_use]
    pub fn into_legs(self) -> Vec<EntryLeg> {
        self.0
    }
}

fn total(legs: &[EntryLeg], side: LegSide) -> Decimal {
    legs.iter()
        .filter(|l| l.side == side)
        .map(|l| l.amount)
        .sum()
}

/// Business object kinds that trigger automatic entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SourceType {
    /// Treasury cash movement.
    Transaction,
    /// Payroll run.
    Payroll,
    /// Bill creation.
    Bill,
    /// Bill payment (collection or disbursement).
    BillPayment,
    /// Generic client/provider payment.
    Payment,
}

impl SourceType {
    /// Uppercase wire representation (`BILL_PAYMENT` style).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transaction => "TRANSACTION",
            Self::Payroll => "PAYROLL",
            Self::Bill => "BILL",
            Self::BillPayment => "BILL_PAYMENT",
            Self::Payment => "PAYMENT",
        }
    }

    /// Parses the wire representation.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TRANSACTION" => Some(Self::Transaction),
            "PAYROLL" => Some(Self::Payroll),
            "BILL" => Some(Self::Bill),
            "BILL_PAYMENT" => Some(Self::BillPayment),
            "PAYMENT" => Some(Self::Payment),
            _ => None,
        }
    }
}

/// Formats an entry number as a 6-digit zero-padded string.
#[must_use]
pub fn format_entry_number(n: i64) -> String {
    format!("{n:0width$}", width = ENTRY_NUMBER_WIDTH)
}

/// Parses a zero-padded entry number back to its numeric value.
#[must_use]
pub fn parse_entry_number(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn leg_pair(amount: Decimal) -> Vec<EntryLeg> {
        vec![
            EntryLeg::debit(Uuid::new_v4(), amount),
            EntryLeg::credit(Uuid::new_v4(), amount),
        ]
    }

    #[test]
    fn test_balanced_pair_accepted() {
        let legs = EntryLegs::balanced(leg_pair(dec!(100))).unwrap();
        assert_eq!(legs.total_debit(), dec!(100));
        assert_eq!(legs.total_credit(), dec!(100));
        assert_eq!(legs.legs().len(), 2);
    }

    #[test]
    fn test_unbalanced_rejected() {
        let legs = vec![
            EntryLeg::debit(Uuid::new_v4(), dec!(100)),
            EntryLeg::credit(Uuid::new_v4(), dec!(50)),
        ];
        assert!(matches!(
            EntryLegs::balanced(legs),
            Err(AccountingError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_within_tolerance_accepted() {
        // 600.00 + 400.01 vs 1000.00 debit: off by exactly one cent
        let legs = vec![
            EntryLeg::debit(Uuid::new_v4(), dec!(1000.00)),
            EntryLeg::credit(Uuid::new_v4(), dec!(600.00)),
            EntryLeg::credit(Uuid::new_v4(), dec!(400.01)),
        ];
        assert!(EntryLegs::balanced(legs).is_ok());
    }

    #[test]
    fn test_beyond_tolerance_rejected() {
        let legs = vec![
            EntryLeg::debit(Uuid::new_v4(), dec!(1000.00)),
            EntryLeg::credit(Uuid::new_v4(), dec!(600.00)),
            EntryLeg::credit(Uuid::new_v4(), dec!(400.02)),
        ];
        assert!(EntryLegs::balanced(legs).is_err());
    }

    #[test]
    fn test_single_leg_rejected() {
        let legs = vec![EntryLeg::debit(Uuid::new_v4(), dec!(100))];
        assert!(matches!(
            EntryLegs::balanced(legs),
            Err(AccountingError::InsufficientLegs)
        ));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let legs = leg_pair(Decimal::ZERO);
        assert!(matches!(
            EntryLegs::balanced(legs),
            Err(AccountingError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_negative_amount_rejected() {
        let legs = leg_pair(dec!(-10));
        assert!(matches!(
            EntryLegs::balanced(legs),
            Err(AccountingError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_entry_number_format() {
        assert_eq!(format_entry_number(FIRST_ENTRY_NUMBER), "000001");
        assert_eq!(format_entry_number(42), "000042");
        assert_eq!(format_entry_number(123_456), "123456");
        assert_eq!(format_entry_number(1_234_567), "1234567");
    }

    #[test]
    fn test_entry_number_parse() {
        assert_eq!(parse_entry_number("000001"), Some(1));
        assert_eq!(parse_entry_number("000410"), Some(410));
        assert_eq!(parse_entry_number(""), None);
        assert_eq!(parse_entry_number("00a001"), None);
        assert_eq!(parse_entry_number("-00001"), None);
    }

    #[test]
    fn test_entry_number_roundtrip_is_monotonic_lexicographically() {
        let a = format_entry_number(9);
        let b = format_entry_number(10);
        assert!(a < b, "zero padding keeps lexicographic order");
    }

    #[test]
    fn test_source_type_wire_format() {
        assert_eq!(SourceType::BillPayment.as_str(), "BILL_PAYMENT");
        assert_eq!(
            SourceType::parse("BILL_PAYMENT"),
            Some(SourceType::BillPayment)
        );
        assert_eq!(SourceType::parse("bill_payment"), None);
        for st in [
            SourceType::Transaction,
            SourceType::Payroll,
            SourceType::Bill,
            SourceType::BillPayment,
            SourceType::Payment,
        ] {
            assert_eq!(SourceType::parse(st.as_str()), Some(st));
        }
    }
}
