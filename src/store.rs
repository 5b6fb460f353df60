//! In-memory store that owns the transaction collection.
//!
//! The store is the single source of truth for the dashboard. Every mutation
//! either succeeds completely or leaves the collection untouched, and the
//! collection keeps insertion order so tables and encounter-ordered series
//! are stable.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::models::transaction::{Transaction, TransactionId, TransactionInput, TransactionUpdate};

#[derive(Debug, Default)]
pub struct TransactionStore {
    transactions: Vec<Transaction>,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates `input`, assigns a fresh ID and appends the transaction.
    pub fn add(&mut self, input: TransactionInput) -> Result<TransactionId> {
        let transaction = input.into_transaction(self.fresh_id(&HashSet::new())).map_err(|e| {
            tracing::warn!("rejected new transaction: {e}");
            e
        })?;
        let id = transaction.id;

        tracing::debug!(
            %id,
            transaction_type = %transaction.transaction_type,
            amount = %transaction.amount,
            "added transaction"
        );
        self.transactions.push(transaction);
        Ok(id)
    }

    /// Adds every input, or none of them if any fails validation.
    ///
    /// On failure the error is returned with the zero-based index of the
    /// offending input.
    pub fn extend<I>(&mut self, inputs: I) -> std::result::Result<Vec<TransactionId>, (usize, Error)>
    where
        I: IntoIterator<Item = TransactionInput>,
    {
        let mut pending = Vec::new();
        let mut drawn = HashSet::new();
        for (index, input) in inputs.into_iter().enumerate() {
            let id = self.fresh_id(&drawn);
            drawn.insert(id);
            let transaction = input
                .into_transaction(id)
                .map_err(|e| (index, Error::from(e)))?;
            pending.push(transaction);
        }

        let ids: Vec<TransactionId> = pending.iter().map(|t| t.id).collect();
        tracing::debug!("added {} transactions", pending.len());
        self.transactions.append(&mut pending);
        Ok(ids)
    }

    /// Replaces the supplied fields of the transaction with the given ID.
    pub fn update(&mut self, id: TransactionId, update: TransactionUpdate) -> Result<&Transaction> {
        let position = self.position(id)?;
        let updated = update.apply_to(&self.transactions[position]).map_err(|e| {
            tracing::warn!(%id, "rejected update: {e}");
            e
        })?;

        tracing::debug!(%id, "updated transaction");
        self.transactions[position] = updated;
        Ok(&self.transactions[position])
    }

    /// Removes and returns the transaction with the given ID.
    pub fn remove(&mut self, id: TransactionId) -> Result<Transaction> {
        let position = self.position(id)?;
        tracing::debug!(%id, "removed transaction");
        Ok(self.transactions.remove(position))
    }

    /// Every transaction, in insertion order.
    pub fn all(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    fn position(&self, id: TransactionId) -> Result<usize> {
        self.transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(Error::NotFound(id))
    }

    // IDs must be unique within the store and within the batch being added.
    fn fresh_id(&self, drawn: &HashSet<TransactionId>) -> TransactionId {
        loop {
            let id = TransactionId::new();
            if !drawn.contains(&id) && self.get(id).is_none() {
                return id;
            }
        }
    }
}
