use std::io::{Read, Write};

use chrono::NaiveDate;
use csv::{Reader, Writer};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        form::validate_description,
        transaction::{new_id, Amount, Transaction, TransactionType},
    },
    error::Result,
};

/// One CSV row. Amounts are written as plain decimals, dates as `YYYY-MM-DD`.
#[derive(Debug, Serialize, Deserialize)]
struct Record {
    #[serde(default)]
    id: String,
    date: NaiveDate,
    description: String,
    amount: Decimal,
    #[serde(rename = "type")]
    kind: TransactionType,
}

impl From<&Transaction> for Record {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            date: tx.date,
            description: tx.description.clone(),
            amount: tx.amount.value(),
            kind: tx.kind,
        }
    }
}

impl TryFrom<Record> for Transaction {
    type Error = crate::error::Error;

    fn try_from(record: Record) -> Result<Self> {
        let id = if record.id.trim().is_empty() {
            new_id()
        } else {
            record.id
        };

        Ok(Transaction::with_id(
            id,
            Amount::new(record.amount)?,
            record.date,
            validate_description(&record.description)?,
            record.kind,
        ))
    }
}

/// Parse [`Transaction`]s from a reader.
///
/// The content must be a valid CSV with an `id,date,description,amount,type`
/// header; the `id` cell may be left empty, in which case a new id is
/// generated. Descriptions are trimmed and held to the same length rules as
/// the entry form. The first row breaking a transaction invariant fails the
/// read.
pub fn read(reader: impl Read) -> Result<Vec<Transaction>> {
    Reader::from_reader(reader)
        .into_deserialize::<Record>()
        .map(|record| Transaction::try_from(record?))
        .collect()
}

pub fn write<'a>(
    txns: impl IntoIterator<Item = &'a Transaction>,
    writer: impl Write,
) -> Result<()> {
    let mut writer = Writer::from_writer(writer);

    for tx in txns {
        writer.serialize(Record::from(tx))?;
    }

    writer.flush()?;
    Ok(())
}
