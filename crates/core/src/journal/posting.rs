//! Per-event posting rules.
//!
//! Each builder translates one business event into a balanced leg set, given
//! the accounts the caller has already resolved. Resolution happens before
//! any leg is built: a missing account aborts the whole entry upstream, so a
//! builder never has to drop a leg silently.

use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

use super::entry::{EntryLeg, EntryLegs};
use super::error::AccountingError;

/// Direction of a treasury cash movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashFlowKind {
    /// Money coming in.
    Income,
    /// Money going out.
    Expense,
}

/// Whether a bill is issued to a client or received from a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillKind {
    /// Client bill: revenue recognition / collection.
    Client,
    /// Provider bill: expense recognition / disbursement.
    Provider,
}

/// Who a generic payment is tied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterpartyKind {
    /// Payment received from a client.
    Client,
    /// Payment made to a provider.
    Provider,
}

/// Payroll amounts as recorded on the run.
#[derive(Debug, Clone, Copy)]
pub struct PayrollAmounts {
    /// Base salary total.
    pub base: Decimal,
    /// Overtime total.
    pub overtime: Decimal,
    /// Bonuses total.
    pub bonuses: Decimal,
    /// Deductions withheld.
    pub deductions: Decimal,
    /// Explicit net pay; computed as gross − deductions when absent.
    pub net_pay: Option<Decimal>,
}

impl PayrollAmounts {
    /// Gross pay: base + overtime + bonuses.
    #[must_use]
    pub fn gross(&self) -> Decimal {
        self.base + self.overtime + self.bonuses
    }

    /// Net pay: the explicit value when present, otherwise gross − deductions.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.net_pay.unwrap_or_else(|| self.gross() - self.deductions)
    }
}

/// A bill line resolved to its posting account.
#[derive(Debug, Clone, Copy)]
pub struct RubroSplit {
    /// Income or expense account for the line's rubro.
    pub account_id: Uuid,
    /// Share of the bill total, in percent.
    pub percentage: Decimal,
}

/// Rounds a split amount to cents using banker's rounding.
#[must_use]
pub fn split_amount(total: Decimal, percentage: Decimal) -> Decimal {
    (total * percentage / Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}

/// Treasury transaction: cash in debits cash against income; cash out debits
/// expense against cash.
pub fn treasury_legs(
    kind: CashFlowKind,
    amount: Decimal,
    cash_account: Uuid,
    counterpart_account: Uuid,
) -> Result<EntryLegs, AccountingError> {
    let legs = match kind {
        CashFlowKind::Income => vec![
            EntryLeg::debit(cash_account, amount),
            EntryLeg::credit(counterpart_account, amount),
        ],
        CashFlowKind::Expense => vec![
            EntryLeg::debit(counterpart_account, amount),
            EntryLeg::credit(cash_account, amount),
        ],
    };
    EntryLegs::balanced(legs)
}

/// Payroll run: gross to payroll expense, deductions to the payroll
/// liability (omitted when zero), net pay out of cash.
pub fn payroll_legs(
    amounts: &PayrollAmounts,
    expense_account: Uuid,
    deductions_account: Uuid,
    cash_account: Uuid,
) -> Result<EntryLegs, AccountingError> {
    let mut legs = vec![EntryLeg::debit(expense_account, amounts.gross())];
    if amounts.deductions > Decimal::ZERO {
        legs.push(EntryLeg::credit(deductions_account, amounts.deductions));
    }
    legs.push(EntryLeg::credit(cash_account, amounts.net()));
    EntryLegs::balanced(legs)
}

/// Bill creation: the counterpart account (receivable for client bills,
/// payable for provider bills) carries the total; each rubro line carries its
/// percentage share on the opposite side.
pub fn bill_legs(
    kind: BillKind,
    total: Decimal,
    splits: &[RubroSplit],
    counterpart_account: Uuid,
) -> Result<EntryLegs, AccountingError> {
    let mut legs = Vec::with_capacity(splits.len() + 1);
    match kind {
        BillKind::Client => {
            legs.push(EntryLeg::debit(counterpart_account, total));
            for split in splits {
                legs.push(EntryLeg::credit(
                    split.account_id,
                    split_amount(total, split.percentage),
                ));
            }
        }
        BillKind::Provider => {
            for split in splits {
                legs.push(EntryLeg::debit(
                    split.account_id,
                    split_amount(total, split.percentage),
                ));
            }
            legs.push(EntryLeg::credit(counterpart_account, total));
        }
    }
    EntryLegs::balanced(legs)
}

/// Bill payment: collections debit cash against receivables; disbursements
/// debit payables against cash.
pub fn bill_payment_legs(
    kind: BillKind,
    amount: Decimal,
    cash_account: Uuid,
    counterpart_account: Uuid,
) -> Result<EntryLegs, AccountingError> {
    let legs = match kind {
        BillKind::Client => vec![
            EntryLeg::debit(cash_account, amount),
            EntryLeg::credit(counterpart_account, amount),
        ],
        BillKind::Provider => vec![
            EntryLeg::debit(counterpart_account, amount),
            EntryLeg::credit(cash_account, amount),
        ],
    };
    EntryLegs::balanced(legs)
}

/// Generic payment: client money debits cash against the category's income
/// account; provider money debits the category's expense account against
/// cash.
pub fn payment_legs(
    kind: CounterpartyKind,
    amount: Decimal,
    cash_account: Uuid,
    category_account: Uuid,
) -> Result<EntryLegs, AccountingError> {
    let legs = match kind {
        CounterpartyKind::Client => vec![
            EntryLeg::debit(cash_account, amount),
            EntryLeg::credit(category_account, amount),
        ],
        CounterpartyKind::Provider => vec![
            EntryLeg::debit(category_account, amount),
            EntryLeg::credit(cash_account, amount),
        ],
    };
    EntryLegs::balanced(legs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal::entry::LegSide;
    use rust_decimal_macros::dec;

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::new_v4()).collect()
    }

    #[test]
    fn test_treasury_income_direction() {
        let [cash, income]: [Uuid; 2] = ids(2).try_into().unwrap();
        let legs = treasury_legs(CashFlowKind::Income, dec!(500), cash, income).unwrap();
        let legs = legs.into_legs();
        assert_eq!(legs[0], EntryLeg::debit(cash, dec!(500)));
        assert_eq!(legs[1], EntryLeg::credit(income, dec!(500)));
    }

    #[test]
    fn test_treasury_expense_direction() {
        let [cash, expense]: [Uuid; 2] = ids(2).try_into().unwrap();
        let legs = treasury_legs(CashFlowKind::Expense, dec!(500), cash, expense).unwrap();
        let legs = legs.into_legs();
        assert_eq!(legs[0], EntryLeg::debit(expense, dec!(500)));
        assert_eq!(legs[1], EntryLeg::credit(cash, dec!(500)));
    }

    #[test]
    fn test_payroll_with_deductions() {
        let [expense, liability, cash]: [Uuid; 3] = ids(3).try_into().unwrap();
        let amounts = PayrollAmounts {
            base: dec!(1000),
            overtime: dec!(200),
            bonuses: dec!(100),
            deductions: dec!(300),
            net_pay: None,
        };
        let legs = payroll_legs(&amounts, expense, liability, cash).unwrap();
        assert_eq!(legs.total_debit(), dec!(1300));
        assert_eq!(legs.total_credit(), dec!(1300));
        let legs = legs.into_legs();
        assert_eq!(legs[0], EntryLeg::debit(expense, dec!(1300)));
        assert_eq!(legs[1], EntryLeg::credit(liability, dec!(300)));
        assert_eq!(legs[2], EntryLeg::credit(cash, dec!(1000)));
    }

    #[test]
    fn test_payroll_without_deductions_skips_liability_leg() {
        let [expense, liability, cash]: [Uuid; 3] = ids(3).try_into().unwrap();
        let amounts = PayrollAmounts {
            base: dec!(1000),
            overtime: Decimal::ZERO,
            bonuses: Decimal::ZERO,
            deductions: Decimal::ZERO,
            net_pay: None,
        };
        let legs = payroll_legs(&amounts, expense, liability, cash).unwrap();
        assert_eq!(legs.legs().len(), 2);
        assert_eq!(legs.legs()[1], EntryLeg::credit(cash, dec!(1000)));
    }

    #[test]
    fn test_payroll_explicit_net_pay_must_reconcile() {
        let [expense, liability, cash]: [Uuid; 3] = ids(3).try_into().unwrap();
        // Explicit net that does not equal gross - deductions unbalances the set.
        let amounts = PayrollAmounts {
            base: dec!(1000),
            overtime: Decimal::ZERO,
            bonuses: Decimal::ZERO,
            deductions: dec!(300),
            net_pay: Some(dec!(500)),
        };
        assert!(matches!(
            payroll_legs(&amounts, expense, liability, cash),
            Err(AccountingError::Unbalanced { .. })
        ));
    }

    #[test]
    fn test_client_bill_split_60_40() {
        let [receivable, income_a, income_b]: [Uuid; 3] = ids(3).try_into().unwrap();
        let splits = [
            RubroSplit {
                account_id: income_a,
                percentage: dec!(60),
            },
            RubroSplit {
                account_id: income_b,
                percentage: dec!(40),
            },
        ];
        let legs = bill_legs(BillKind::Client, dec!(1000), &splits, receivable).unwrap();
        let legs = legs.into_legs();
        assert_eq!(legs[0], EntryLeg::debit(receivable, dec!(1000)));
        assert_eq!(legs[1], EntryLeg::credit(income_a, dec!(600.00)));
        assert_eq!(legs[2], EntryLeg::credit(income_b, dec!(400.00)));
    }

    #[test]
    fn test_provider_bill_full_materials() {
        let [payable, materials]: [Uuid; 2] = ids(2).try_into().unwrap();
        let splits = [RubroSplit {
            account_id: materials,
            percentage: dec!(100),
        }];
        let legs = bill_legs(BillKind::Provider, dec!(100000), &splits, payable).unwrap();
        let legs = legs.into_legs();
        assert_eq!(legs[0], EntryLeg::debit(materials, dec!(100000.00)));
        assert_eq!(legs[1], EntryLeg::credit(payable, dec!(100000)));
    }

    #[test]
    fn test_uneven_split_within_tolerance() {
        // 33.33 / 33.33 / 33.34 of 100 rounds to 33.33 + 33.33 + 33.34 = 100.00
        let accounts = ids(3);
        let splits: Vec<RubroSplit> = [dec!(33.33), dec!(33.33), dec!(33.34)]
            .iter()
            .zip(&accounts)
            .map(|(pct, id)| RubroSplit {
                account_id: *id,
                percentage: *pct,
            })
            .collect();
        let payable = Uuid::new_v4();
        let legs = bill_legs(BillKind::Provider, dec!(100), &splits, payable).unwrap();
        assert_eq!(legs.total_debit(), dec!(100.00));
        assert_eq!(legs.total_credit(), dec!(100));
    }

    #[test]
    fn test_bill_payment_direction_swap() {
        let [cash, counterpart]: [Uuid; 2] = ids(2).try_into().unwrap();

        let collection =
            bill_payment_legs(BillKind::Client, dec!(250), cash, counterpart).unwrap();
        let collection = collection.into_legs();
        assert_eq!(collection[0].account_id, cash);
        assert_eq!(collection[0].side, LegSide::Debit);
        assert_eq!(collection[1].account_id, counterpart);
        assert_eq!(collection[1].side, LegSide::Credit);

        let disbursement =
            bill_payment_legs(BillKind::Provider, dec!(250), cash, counterpart).unwrap();
        let disbursement = disbursement.into_legs();
        assert_eq!(disbursement[0].account_id, counterpart);
        assert_eq!(disbursement[0].side, LegSide::Debit);
        assert_eq!(disbursement[1].account_id, cash);
        assert_eq!(disbursement[1].side, LegSide::Credit);
    }

    #[test]
    fn test_payment_direction() {
        let [cash, category]: [Uuid; 2] = ids(2).try_into().unwrap();

        let from_client =
            payment_legs(CounterpartyKind::Client, dec!(80), cash, category).unwrap();
        assert_eq!(from_client.legs()[0], EntryLeg::debit(cash, dec!(80)));

        let to_provider =
            payment_legs(CounterpartyKind::Provider, dec!(80), cash, category).unwrap();
        assert_eq!(to_provider.legs()[0], EntryLeg::debit(category, dec!(80)));
    }

    #[test]
    fn test_split_amount_bankers_rounding() {
        // 12.5% of 100.10 = 12.5125, a midpoint; banker's rounds to even: 12.52
        assert_eq!(split_amount(dec!(100.10), dec!(12.5)), dec!(12.52));
        assert_eq!(split_amount(dec!(1000), dec!(60)), dec!(600.00));
    }
}
