use chrono::Datelike;
use itertools::Itertools;
use rust_decimal::Decimal;
use serde::Serialize;

use super::{
    summary::add_amount,
    transaction::{Transaction, TransactionType},
};

/// Income and expense totals for one calendar month, labelled `M/YYYY`.
#[derive(Debug, Serialize, PartialEq, Eq, Clone)]
pub struct MonthlyData {
    pub month: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expenses: Decimal,
}

/// Buckets transactions per calendar month, oldest month first.
///
/// Months without transactions are not emitted, so an empty input gives an
/// empty output.
pub fn group_by_month<'a>(txns: impl IntoIterator<Item = &'a Transaction>) -> Vec<MonthlyData> {
    let months = txns
        .into_iter()
        .sorted_by_key(|tx| tx.date)
        .chunk_by(|tx| (tx.date.year(), tx.date.month()));

    months
        .into_iter()
        .map(|((year, month), txns)| {
            let (income, expenses) =
                txns.fold((Decimal::ZERO, Decimal::ZERO), |(income, expenses), tx| {
                    match tx.kind {
                        TransactionType::Income => {
                            (add_amount(income, tx.amount.value()), expenses)
                        }
                        TransactionType::Expense => {
                            (income, add_amount(expenses, tx.amount.value()))
                        }
                    }
                });

            MonthlyData {
                month: format!("{month}/{year}"),
                income,
                expenses,
            }
        })
        .collect()
}
