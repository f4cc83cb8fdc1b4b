//! Property tests for the posting rules.
//!
//! Every builder must produce a leg set satisfying the ledger-balance
//! invariant for any input it accepts, and the rounding of rubro splits must
//! stay within the aggregate tolerance.

use proptest::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::entry::balance_tolerance;
use super::posting::{
    bill_legs, bill_payment_legs, payment_legs, payroll_legs, treasury_legs, BillKind,
    CashFlowKind, CounterpartyKind, PayrollAmounts, RubroSplit,
};

/// Positive amounts with two decimal places, up to 10 million.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Percentage vectors that sum to exactly 100.00.
fn percentages_strategy() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(1u32..10_000u32, 1..6).prop_map(|weights| {
        let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
        let mut percentages: Vec<Decimal> = weights
            .iter()
            .map(|w| {
                (Decimal::from(*w) * Decimal::ONE_HUNDRED / Decimal::from(total)).round_dp(2)
            })
            .collect();
        // Push any rounding drift into the last line so the lines sum to 100.
        let sum: Decimal = percentages.iter().sum();
        if let Some(last) = percentages.last_mut() {
            *last += Decimal::ONE_HUNDRED - sum;
        }
        percentages
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Treasury entries are always balanced, for both directions.
    #[test]
    fn prop_treasury_balanced(amount in amount_strategy(), income in any::<bool>()) {
        let kind = if income { CashFlowKind::Income } else { CashFlowKind::Expense };
        let legs = treasury_legs(kind, amount, Uuid::new_v4(), Uuid::new_v4()).unwrap();
        prop_assert_eq!(legs.total_debit(), legs.total_credit());
    }

    /// Payroll entries balance whenever net pay is derived from the amounts.
    #[test]
    fn prop_payroll_balanced(
        base in amount_strategy(),
        overtime in amount_strategy(),
        bonuses in amount_strategy(),
        deduction_cents in 0i64..1_000_00i64,
    ) {
        let amounts = PayrollAmounts {
            base,
            overtime,
            bonuses,
            deductions: Decimal::new(deduction_cents, 2),
            net_pay: None,
        };
        let legs = payroll_legs(
            &amounts,
            Uuid::new_v4(),
            Uuid::new_v4(),
            Uuid::new_v4(),
        ).unwrap();
        prop_assert_eq!(legs.total_debit(), amounts.gross());
        prop_assert_eq!(legs.total_credit(), amounts.gross());
    }

    /// Bill entries stay within the aggregate tolerance for any percentage
    /// vector summing to 100, despite per-line cent rounding.
    #[test]
    fn prop_bill_split_within_tolerance(
        total in amount_strategy(),
        percentages in percentages_strategy(),
        client in any::<bool>(),
    ) {
        let splits: Vec<RubroSplit> = percentages
            .iter()
            .map(|pct| RubroSplit { account_id: Uuid::new_v4(), percentage: *pct })
            .collect();
        let kind = if client { BillKind::Client } else { BillKind::Provider };

        match bill_legs(kind, total, &splits, Uuid::new_v4()) {
            Ok(legs) => {
                let diff = (legs.total_debit() - legs.total_credit()).abs();
                prop_assert!(diff <= balance_tolerance());
            }
            // Rounding can push the aggregate past the cent tolerance for
            // many tiny lines; rejecting is correct, silently posting is not.
            Err(e) => {
                let is_expected = matches!(
                    e,
                    super::error::AccountingError::Unbalanced { .. }
                        | super::error::AccountingError::NonPositiveAmount(_)
                );
                prop_assert!(is_expected, "unexpected error: {e:?}");
            }
        }
    }

    /// Bill payments mirror accounts between the CLIENT and PROVIDER cases.
    #[test]
    fn prop_bill_payment_role_swap(amount in amount_strategy()) {
        let cash = Uuid::new_v4();
        let counterpart = Uuid::new_v4();

        let client = bill_payment_legs(BillKind::Client, amount, cash, counterpart).unwrap();
        let provider = bill_payment_legs(BillKind::Provider, amount, cash, counterpart).unwrap();

        let client = client.into_legs();
        let provider = provider.into_legs();
        prop_assert_eq!(client[0].account_id, provider[1].account_id);
        prop_assert_eq!(client[1].account_id, provider[0].account_id);
    }

    /// Generic payments are always balanced.
    #[test]
    fn prop_payment_balanced(amount in amount_strategy(), client in any::<bool>()) {
        let kind = if client { CounterpartyKind::Client } else { CounterpartyKind::Provider };
        let legs = payment_legs(kind, amount, Uuid::new_v4(), Uuid::new_v4()).unwrap();
        prop_assert_eq!(legs.total_debit(), legs.total_credit());
    }
}
