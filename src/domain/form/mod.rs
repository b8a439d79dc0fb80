use std::str::FromStr;

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use thiserror::Error;

use super::transaction::{new_id, Amount, Transaction, TransactionType};

const MIN_DESCRIPTION_CHARS: usize = 3;
const MAX_DESCRIPTION_CHARS: usize = 100;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum FormError {
    #[error("Description must be at least 3 characters.")]
    DescriptionTooShort,
    #[error("Description must be less than 100 characters.")]
    DescriptionTooLong,
    #[error("Amount must be a positive number.")]
    InvalidAmount,
    #[error("Amount must be in whole cents and less than $10,000,000,000,000.00.")]
    AmountOutOfRange,
    #[error("Please select a date.")]
    MissingDate,
    #[error("Please select transaction type.")]
    MissingType,
}

/// Raw field values as typed by the user.
///
/// Nothing here is trusted until [`TransactionForm::submit`] turns it into a
/// [`Transaction`].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TransactionForm {
    pub description: String,
    pub amount: String,
    pub date: String,
    pub kind: String,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount: String::new(),
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
            kind: TransactionType::Expense.to_string(),
        }
    }
}

impl From<&Transaction> for TransactionForm {
    fn from(tx: &Transaction) -> Self {
        Self {
            description: tx.description.clone(),
            amount: tx.amount.to_string(),
            date: tx.date.format("%Y-%m-%d").to_string(),
            kind: tx.kind.to_string(),
        }
    }
}

impl TransactionForm {
    /// Validates every field, reporting the first failure.
    ///
    /// `existing_id` is the id of the transaction being edited; a new id is
    /// generated when it is `None`.
    pub fn submit(&self, existing_id: Option<&str>) -> Result<Transaction, FormError> {
        let description = validate_description(&self.description)?;

        let amount = Decimal::from_str(self.amount.trim())
            .ok()
            .filter(|amount| *amount > Decimal::ZERO)
            .ok_or(FormError::InvalidAmount)?;
        let amount = Amount::new(amount).map_err(|_| FormError::AmountOutOfRange)?;

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| FormError::MissingDate)?;

        let kind = TransactionType::from_str(&self.kind).map_err(|_| FormError::MissingType)?;

        let id = existing_id.map_or_else(new_id, str::to_owned);
        Ok(Transaction::with_id(id, amount, date, description, kind))
    }
}

/// Trims `raw` and checks it holds 3 to 100 characters.
pub fn validate_description(raw: &str) -> Result<&str, FormError> {
    let description = raw.trim();
    let chars = description.chars().count();
    if chars < MIN_DESCRIPTION_CHARS {
        Err(FormError::DescriptionTooShort)
    } else if chars > MAX_DESCRIPTION_CHARS {
        Err(FormError::DescriptionTooLong)
    } else {
        Ok(description)
    }
}
