use crate::error::{Result, ValidationError};
use crate::models::transaction::{TransactionId, TransactionInput, TransactionType};
use crate::store::TransactionStore;

pub const ADD_FORMAT_HINT: &str =
    "date(YYYY-MM-DD), description, amount, type(income/expense), category";

const FIELD_COUNT: usize = 5;

/// Splits `date, description, amount, type, category` into a transaction input.
///
/// Only the field count and the type are checked here, the store validates
/// the rest when the input is added.
pub fn parse_transaction_input(details: &str) -> std::result::Result<TransactionInput, ValidationError> {
    let parts: Vec<&str> = details.split(',').map(|s| s.trim()).collect();
    if parts.len() != FIELD_COUNT {
        return Err(ValidationError::WrongFieldCount {
            expected: FIELD_COUNT,
            got: parts.len(),
        });
    }

    let transaction_type: TransactionType = parts[3].parse()?;
    Ok(TransactionInput::new(
        transaction_type,
        parts[1],
        parts[2],
        parts[0],
        parts[4],
    ))
}

pub fn add_transaction(store: &mut TransactionStore, details: &str) -> Result<TransactionId> {
    let input = parse_transaction_input(details)?;
    store.add(input)
}
