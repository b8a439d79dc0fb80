use log::warn;
use rust_decimal::Decimal;
use serde::Serialize;

use super::transaction::{Transaction, TransactionType};

#[derive(Debug, Serialize, PartialEq, Eq, Clone, Copy, Default)]
pub struct Summary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_expenses: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Totals every transaction by type. An empty slice sums to zero everywhere.
pub fn summarize<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Summary {
    let (total_income, total_expenses) = txns.into_iter().fold(
        (Decimal::ZERO, Decimal::ZERO),
        |(income, expenses), tx| match tx.kind {
            TransactionType::Income => (add_amount(income, tx.amount.value()), expenses),
            TransactionType::Expense => (income, add_amount(expenses, tx.amount.value())),
        },
    );

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

/// Adds a non-negative `amount` to a running total, saturating at
/// [`Decimal::MAX`] instead of overflowing.
pub(crate) fn add_amount(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("running total overflowed, capping at {}", Decimal::MAX);
        Decimal::MAX
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::transaction::Amount;

    fn tx(amount: Decimal, kind: TransactionType, (y, m, d): (i32, u32, u32)) -> Transaction {
        Transaction::new(
            Amount::new(amount).unwrap(),
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            "Entry",
            kind,
        )
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn sums_by_type() {
        let txns = vec![
            tx(dec!(100), TransactionType::Income, (2024, 1, 15)),
            tx(dec!(40), TransactionType::Expense, (2024, 1, 20)),
            tx(dec!(200), TransactionType::Income, (2024, 2, 1)),
        ];

        assert_eq!(
            summarize(&txns),
            Summary {
                total_income: dec!(300),
                total_expenses: dec!(40),
                balance: dec!(260),
            }
        );
    }

    #[test]
    fn balance_goes_negative_when_spending_exceeds_income() {
        let txns = vec![
            tx(dec!(10.25), TransactionType::Income, (2024, 3, 1)),
            tx(dec!(99.99), TransactionType::Expense, (2024, 3, 2)),
            tx(dec!(0.01), TransactionType::Expense, (2024, 3, 3)),
        ];

        let summary = summarize(&txns);

        assert_eq!(summary.balance, dec!(-89.75));
        assert_eq!(
            summary.balance,
            summary.total_income - summary.total_expenses
        );
    }

    #[test]
    fn running_total_saturates_instead_of_overflowing() {
        assert_eq!(add_amount(dec!(1.5), dec!(2)), dec!(3.5));
        assert_eq!(add_amount(Decimal::MAX, dec!(1)), Decimal::MAX);
    }

    #[test]
    fn sums_many_maximal_amounts() {
        let txns: Vec<_> = (0..1000)
            .map(|_| tx(dec!(9999999999999.99), TransactionType::Income, (2024, 1, 1)))
            .collect();

        let summary = summarize(&txns);

        assert_eq!(summary.total_income, dec!(9999999999999990));
        assert_eq!(summary.balance, summary.total_income);
    }
}
