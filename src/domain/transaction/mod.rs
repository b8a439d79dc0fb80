use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use super::error::{Error, Result};

/// Whether money came in or went out.
#[derive(Debug, Serialize, Deserialize, Hash, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

/// A strictly positive money value. The direction lives in [`TransactionType`].
///
/// Amounts carry at most two decimal places and stay below [`Amount::LIMIT`],
/// which keeps them exact when persisted as a plain JSON number.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub struct Amount(Decimal);

impl Amount {
    /// Exclusive upper bound: ten trillion.
    pub const LIMIT: Decimal = Decimal::from_parts(1_316_134_912, 2_328, 0, false, 0);

    const MAX_SCALE: u32 = 2;

    pub fn new(amount: Decimal) -> Result<Self> {
        if amount > Decimal::ZERO
            && amount < Self::LIMIT
            && amount.normalize().scale() <= Self::MAX_SCALE
        {
            Ok(Self(amount))
        } else {
            Err(Error::InvalidAmount { amount })
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let amount: Decimal = rust_decimal::serde::float::deserialize(deserializer)?;
        let cents = amount.round_dp_with_strategy(
            Amount::MAX_SCALE,
            RoundingStrategy::MidpointAwayFromZero,
        );
        Amount::new(cents).map_err(serde::de::Error::custom)
    }
}

/// A single recorded income or expense event.
///
/// Values are replaced wholesale on edit; only `id` survives an update.
#[derive(Debug, Serialize, Deserialize, Hash, PartialEq, Eq, Clone)]
pub struct Transaction {
    pub id: String,
    pub amount: Amount,
    #[serde(with = "iso_date")]
    pub date: NaiveDate,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

impl Transaction {
    /// Creates a transaction with a freshly generated id.
    pub fn new(
        amount: Amount,
        date: NaiveDate,
        description: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self::with_id(new_id(), amount, date, description, kind)
    }

    pub fn with_id(
        id: impl Into<String>,
        amount: Amount,
        date: NaiveDate,
        description: impl Into<String>,
        kind: TransactionType,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            date,
            description: description.into(),
            kind,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Amount with the sign implied by the type: negative for expenses.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount.value(),
            TransactionType::Expense => -self.amount.value(),
        }
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Dates are written as `YYYY-MM-DD`. Full RFC 3339 timestamps are accepted on
/// read and reduced to the local calendar date.
mod iso_date {
    use chrono::{DateTime, Local, NaiveDate};
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub(super) fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        NaiveDate::parse_from_str(raw, FORMAT).or_else(|err| {
            DateTime::parse_from_rfc3339(raw)
                .map(|dt| dt.with_timezone(&Local).date_naive())
                .map_err(|_| err)
        })
    }
}
