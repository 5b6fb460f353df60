use crate::error::Result;
use crate::models::transaction::{Transaction, TransactionId};
use crate::store::TransactionStore;

pub fn remove_transaction(store: &mut TransactionStore, id_input: &str) -> Result<Transaction> {
    let id: TransactionId = id_input.parse()?;
    store.remove(id)
}
