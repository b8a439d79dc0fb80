use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("amount must be positive, below 10 trillion and in whole cents, got {amount}")]
    InvalidAmount { amount: Decimal },
    #[error("a transaction with id {id} already exists")]
    DuplicateId { id: String },
    #[error("no transaction with id {id}")]
    NotFound { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
