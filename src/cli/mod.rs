//! Terminal front end: argument parsing and the text/JSON views over the
//! store.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::PathBuf,
};

use clap::{Args, Parser, Subcommand};
use log::{info, warn};

use crate::{
    config::{Config, DATA_FILE_ENV},
    csv,
    domain::{
        error::Error as DomainError,
        form::TransactionForm,
        listing::{ListQuery, SortDirection, SortKey},
        monthly::group_by_month,
        summary::summarize,
        transaction::Transaction,
    },
    error::{Error, Result},
    format::{format_currency, format_date},
    store::{FileStorage, Storage, TransactionStore},
};

const EMPTY_CHART: &str = "Add transactions to see your monthly overview";

/// Track your income and expenses.
#[derive(Debug, Parser)]
#[command(name = "finance-tracker", version)]
pub struct Cli {
    /// JSON file holding the transactions.
    #[arg(long, global = true, env = DATA_FILE_ENV)]
    pub data_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a new transaction.
    Add {
        #[arg(long)]
        description: String,
        #[arg(long)]
        amount: String,
        /// Defaults to today (YYYY-MM-DD).
        #[arg(long)]
        date: Option<String>,
        /// `income` or `expense`, defaults to `expense`.
        #[arg(long = "type")]
        kind: Option<String>,
    },
    /// Replace fields of an existing transaction.
    Edit {
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        amount: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long = "type")]
        kind: Option<String>,
    },
    Delete {
        id: String,
    },
    /// Show transactions, optionally filtered and sorted.
    List(ListArgs),
    /// Total income, expenses and balance.
    Summary,
    /// Income and expenses per month, oldest first.
    Monthly {
        #[arg(long)]
        json: bool,
    },
    /// Write the listed transactions to a CSV file.
    Export {
        path: PathBuf,
        #[command(flatten)]
        list: ListArgs,
    },
    /// Add every transaction found in a CSV file. Nothing is added when any
    /// row is invalid or its id is already taken.
    Import {
        path: PathBuf,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Matches descriptions and formatted amounts, ignoring case.
    #[arg(long, default_value = "")]
    pub search: String,
    /// date, amount or description.
    #[arg(long, default_value = "date")]
    pub sort: SortKey,
    /// asc or desc.
    #[arg(long, default_value = "desc")]
    pub order: SortDirection,
}

impl From<ListArgs> for ListQuery {
    fn from(args: ListArgs) -> Self {
        ListQuery::new(args.search, args.sort, args.order)
    }
}

/// Loads the store named by `cli` and runs its command, printing to `out`.
pub fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let config = Config::resolve(cli.data_file);
    let mut store = TransactionStore::load(FileStorage::new(&config.data_file));
    execute(cli.command, &mut store, out)
}

pub fn execute<S: Storage>(
    command: Command,
    store: &mut TransactionStore<S>,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        Command::Add {
            description,
            amount,
            date,
            kind,
        } => {
            let defaults = TransactionForm::default();
            let form = TransactionForm {
                description,
                amount,
                date: date.unwrap_or(defaults.date),
                kind: kind.unwrap_or(defaults.kind),
            };
            let tx = form.submit(None)?;
            let id = tx.id.clone();
            notify_unsaved(store.add(tx))?;
            writeln!(out, "Added transaction {id}")?;
        }
        Command::Edit {
            id,
            description,
            amount,
            date,
            kind,
        } => {
            let existing = store
                .get(&id)
                .ok_or_else(|| DomainError::NotFound { id: id.clone() })?;
            let mut form = TransactionForm::from(existing);
            form.description = description.unwrap_or(form.description);
            form.amount = amount.unwrap_or(form.amount);
            form.date = date.unwrap_or(form.date);
            form.kind = kind.unwrap_or(form.kind);

            let tx = form.submit(Some(&id))?;
            notify_unsaved(store.update(tx))?;
            writeln!(out, "Updated transaction {id}")?;
        }
        Command::Delete { id } => {
            let Some(description) = store.get(&id).map(|tx| tx.description.clone()) else {
                writeln!(out, "No transaction with id {id}")?;
                return Ok(());
            };
            notify_unsaved(store.delete(&id).map(drop))?;
            writeln!(out, "Deleted transaction {id} ({description})")?;
        }
        Command::List(args) => {
            let query = ListQuery::from(args);
            let rows = query.apply(store.all());
            if rows.is_empty() {
                let (title, hint) = query.empty_message();
                writeln!(out, "{title}\n{hint}")?;
            } else {
                for tx in rows {
                    writeln!(out, "{}", render_row(tx))?;
                }
            }
        }
        Command::Summary => {
            let summary = summarize(store.all());
            writeln!(out, "Income:   {}", format_currency(summary.total_income))?;
            writeln!(out, "Expenses: {}", format_currency(summary.total_expenses))?;
            writeln!(out, "Balance:  {}", format_currency(summary.balance))?;
        }
        Command::Monthly { json } => {
            let months = group_by_month(store.all());
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&months)?)?;
            } else if months.is_empty() {
                writeln!(out, "{EMPTY_CHART}")?;
            } else {
                for month in months {
                    writeln!(
                        out,
                        "{:<8} income {:>14}  expenses {:>14}",
                        month.month,
                        format_currency(month.income),
                        format_currency(month.expenses)
                    )?;
                }
            }
        }
        Command::Export { path, list } => {
            let query = ListQuery::from(list);
            let rows = query.apply(store.all());
            let count = rows.len();
            csv::write(rows, BufWriter::new(File::create(&path)?))?;
            info!("exported {count} transactions to {}", path.display());
            writeln!(out, "Exported {count} transactions to {}", path.display())?;
        }
        Command::Import { path } => {
            let txns = csv::read(BufReader::new(File::open(&path)?))?;
            let count = txns.len();
            notify_unsaved(store.add_all(txns).map(drop))?;
            info!("imported {count} transactions from {}", path.display());
            writeln!(out, "Imported {count} transactions from {}", path.display())?;
        }
    }

    Ok(())
}

fn render_row(tx: &Transaction) -> String {
    let sign = if tx.is_income() { "+" } else { "" };
    format!(
        "{}  {:>14}  {:<40}  {}",
        format_date(tx.date),
        format!("{sign}{}", format_currency(tx.signed_amount())),
        tx.description,
        tx.id
    )
}

/// A failed write leaves the in-memory change in place; it is reported, not
/// treated as fatal.
fn notify_unsaved(result: Result<()>) -> Result<()> {
    match result {
        Err(Error::StorageError(err)) => {
            warn!("changes were not saved: {err}");
            Ok(())
        }
        other => other,
    }
}
