//! The owned collection of transactions and its persistence.

use std::collections::HashSet;

use log::{debug, warn};

use crate::{
    domain::{error::Error as DomainError, transaction::Transaction},
    error::{Error, Result},
};

mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};

/// Holds every transaction and mirrors the whole list into `S` after each
/// successful mutation.
///
/// Ids are unique within the store. The list keeps insertion order and has no
/// other ordering.
#[derive(Debug)]
pub struct TransactionStore<S> {
    storage: S,
    txns: Vec<Transaction>,
}

impl<S: Storage> TransactionStore<S> {
    /// Hydrates a store from `storage`.
    ///
    /// Never fails on bad content: an unreadable or malformed payload gives an
    /// empty store, and array elements that do not parse are skipped. Both are
    /// logged as warnings.
    pub fn load(storage: S) -> Self {
        let txns = match storage.read() {
            Ok(Some(payload)) => parse_payload(&payload),
            Ok(None) => {
                debug!("no stored transactions, starting empty");
                Vec::new()
            }
            Err(err) => {
                warn!("error loading transactions: {err}");
                Vec::new()
            }
        };

        debug!("loaded {} transactions", txns.len());
        Self { storage, txns }
    }

    pub fn all(&self) -> &[Transaction] {
        &self.txns
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.txns.iter().find(|tx| tx.id == id)
    }

    pub fn len(&self) -> usize {
        self.txns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txns.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends `tx`. Rejects an id that is already present rather than
    /// regenerating it.
    pub fn add(&mut self, tx: Transaction) -> Result<()> {
        if self.get(&tx.id).is_some() {
            return Err(DomainError::DuplicateId { id: tx.id }.into());
        }

        self.txns.push(tx);
        self.persist()
    }

    /// Appends every transaction in `txns` with a single write, or none of
    /// them when any id is already present or repeated within the batch.
    pub fn add_all(&mut self, txns: Vec<Transaction>) -> Result<usize> {
        let mut seen: HashSet<&str> = self.txns.iter().map(|tx| tx.id.as_str()).collect();
        if let Some(dup) = txns.iter().find(|tx| !seen.insert(tx.id.as_str())) {
            return Err(DomainError::DuplicateId { id: dup.id.clone() }.into());
        }

        let count = txns.len();
        if count == 0 {
            return Ok(0);
        }
        self.txns.extend(txns);
        self.persist()?;
        Ok(count)
    }

    /// Replaces the transaction with the same id.
    pub fn update(&mut self, tx: Transaction) -> Result<()> {
        let slot = self
            .txns
            .iter_mut()
            .find(|existing| existing.id == tx.id)
            .ok_or_else(|| DomainError::NotFound { id: tx.id.clone() })?;

        if *slot == tx {
            return Ok(());
        }

        *slot = tx;
        self.persist()
    }

    /// Removes and returns the transaction with `id`, if any.
    pub fn delete(&mut self, id: &str) -> Result<Option<Transaction>> {
        let Some(pos) = self.txns.iter().position(|tx| tx.id == id) else {
            return Ok(None);
        };

        let removed = self.txns.remove(pos);
        self.persist()?;
        Ok(Some(removed))
    }

    fn persist(&mut self) -> Result<()> {
        let payload = serde_json::to_string(&self.txns)?;
        self.storage
            .write(&payload)
            .map_err(|err| Error::StorageError(Box::new(err)))?;

        debug!("persisted {} transactions", self.txns.len());
        Ok(())
    }
}

fn parse_payload(payload: &str) -> Vec<Transaction> {
    let values: Vec<serde_json::Value> = match serde_json::from_str(payload) {
        Ok(values) => values,
        Err(err) => {
            warn!("error loading transactions, ignoring stored payload: {err}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<Transaction>(value) {
            Ok(tx) if !seen.insert(tx.id.clone()) => {
                warn!("skipping stored transaction {index}: duplicate id {}", tx.id);
                None
            }
            Ok(tx) => Some(tx),
            Err(err) => {
                warn!("skipping stored transaction {index}: {err}");
                None
            }
        })
        .collect()
}
