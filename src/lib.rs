//! Personal finance tracking: a persisted list of income and expense
//! transactions plus the totals and monthly breakdown derived from it.

pub mod cli;
pub mod config;
pub mod csv;
pub mod domain;
pub mod error;
pub mod format;
pub mod store;

pub use domain::{
    listing::ListQuery,
    monthly::{group_by_month, MonthlyData},
    summary::{summarize, Summary},
    transaction::{Amount, Transaction, TransactionType},
};
pub use store::TransactionStore;
