use std::{cmp::Ordering, str::FromStr};

use super::transaction::Transaction;
use crate::format::format_currency;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
    Description,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "description" => Ok(Self::Description),
            other => Err(format!("cannot sort by `{other}`")),
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction `{other}`")),
        }
    }
}

/// What the transaction list currently shows: a search term plus an ordering.
///
/// Defaults to every transaction, newest first.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ListQuery {
    pub search: String,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl ListQuery {
    pub fn new(search: impl Into<String>, sort_key: SortKey, direction: SortDirection) -> Self {
        Self {
            search: search.into(),
            sort_key,
            direction,
        }
    }

    /// Clicking the column that is already sorted flips it, any other column
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.flipped();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Asc;
        }
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        matches_search(tx, &self.search)
    }

    /// Filters then sorts. Equal elements keep their relative input order.
    pub fn apply<'a>(&self, txns: &'a [Transaction]) -> Vec<&'a Transaction> {
        let mut rows: Vec<&Transaction> = txns.iter().filter(|tx| self.matches(tx)).collect();
        rows.sort_by(|a, b| {
            let ordering = compare(a, b, self.sort_key);
            match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
        rows
    }

    /// The placeholder shown when [`ListQuery::apply`] comes back empty.
    pub fn empty_message(&self) -> (&'static str, &'static str) {
        let hint = if self.search.is_empty() {
            "Add a transaction to get started"
        } else {
            "Try adjusting your search criteria"
        };
        ("No transactions found", hint)
    }
}

/// Case-insensitive substring match on the description or the formatted amount.
pub fn matches_search(tx: &Transaction, term: &str) -> bool {
    let term = term.to_lowercase();
    tx.description.to_lowercase().contains(&term)
        || format_currency(tx.amount.value())
            .to_lowercase()
            .contains(&term)
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Description => a
            .description
            .to_lowercase()
            .cmp(&b.description.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::domain::transaction::{Amount, TransactionType};

    fn tx(id: &str, description: &str, amount: Decimal, day: u32) -> Transaction {
        Transaction::with_id(
            id,
            Amount::new(amount).unwrap(),
            NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
            description,
            TransactionType::Expense,
        )
    }

    fn ids(rows: Vec<&Transaction>) -> Vec<&str> {
        rows.into_iter().map(|tx| tx.id.as_str()).collect()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            tx("a", "Salary", dec!(2500), 1),
            tx("b", "Groceries", dec!(84.2), 3),
            tx("c", "coffee", dec!(3.5), 3),
            tx("d", "Bookshop", dec!(1234.5), 2),
        ]
    }

    #[test]
    fn search_matches_description_case_insensitively() {
        let txns = sample();
        let query = ListQuery::new("sal", SortKey::Date, SortDirection::Asc);

        assert!(query.matches(&txns[0]));
        assert!(!query.matches(&txns[1]));
    }

    #[test]
    fn search_matches_formatted_amount() {
        let txns = sample();

        assert!(matches_search(&txns[3], "1,234.50"));
        assert!(matches_search(&txns[2], "$3.5"));
        assert!(!matches_search(&txns[2], "1,234"));
    }

    #[test]
    fn empty_search_keeps_everything() {
        let txns = sample();

        assert_eq!(ListQuery::default().apply(&txns).len(), txns.len());
    }

    #[test]
    fn default_query_is_newest_first_with_stable_ties() {
        let txns = sample();

        assert_eq!(ids(ListQuery::default().apply(&txns)), vec!["b", "c", "d", "a"]);
    }

    #[test]
    fn sorts_by_amount_and_description() {
        let txns = sample();

        let by_amount = ListQuery::new("", SortKey::Amount, SortDirection::Asc);
        assert_eq!(ids(by_amount.apply(&txns)), vec!["c", "b", "d", "a"]);

        let by_description = ListQuery::new("", SortKey::Description, SortDirection::Desc);
        assert_eq!(ids(by_description.apply(&txns)), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn ascending_date_ties_keep_input_order() {
        let txns = sample();
        let query = ListQuery::new("", SortKey::Date, SortDirection::Asc);

        assert_eq!(ids(query.apply(&txns)), vec!["a", "d", "b", "c"]);
    }

    #[test]
    fn toggling_sort_flips_or_resets() {
        let mut query = ListQuery::default();

        query.toggle_sort(SortKey::Date);
        assert_eq!(query.direction, SortDirection::Asc);

        query.toggle_sort(SortKey::Amount);
        assert_eq!(query.sort_key, SortKey::Amount);
        assert_eq!(query.direction, SortDirection::Asc);

        query.toggle_sort(SortKey::Amount);
        assert_eq!(query.direction, SortDirection::Desc);
    }

    #[test]
    fn empty_message_depends_on_search() {
        assert_eq!(
            ListQuery::default().empty_message().1,
            "Add a transaction to get started"
        );
        assert_eq!(
            ListQuery::new("zzz", SortKey::Date, SortDirection::Desc)
                .empty_message()
                .1,
            "Try adjusting your search criteria"
        );
    }
}
