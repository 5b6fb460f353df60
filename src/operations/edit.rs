use crate::error::{Result, ValidationError};
use crate::models::transaction::{Transaction, TransactionId, TransactionUpdate};
use crate::store::TransactionStore;

pub const EDIT_FORMAT_HINT: &str =
    "field=value pairs separated by ';' (fields: description, category, amount, date)";

/// Parses `field=value; field=value` into an update.
///
/// Values are kept as text, the store re-parses amounts and dates when the
/// update is applied.
pub fn parse_transaction_update(details: &str) -> std::result::Result<TransactionUpdate, ValidationError> {
    let mut update = TransactionUpdate::default();

    for pair in details.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let Some((field, value)) = pair.split_once('=') else {
            return Err(ValidationError::UnknownField(pair.to_string()));
        };
        let value = Some(value.trim().to_string());
        match field.trim().to_lowercase().as_str() {
            "description" => update.description = value,
            "category" => update.category = value,
            "amount" => update.amount = value,
            "date" => update.date = value,
            other => return Err(ValidationError::UnknownField(other.to_string())),
        }
    }

    if update.is_empty() {
        return Err(ValidationError::MissingField("field to update"));
    }
    Ok(update)
}

pub fn edit_transaction<'a>(
    store: &'a mut TransactionStore,
    id_input: &str,
    details: &str,
) -> Result<&'a Transaction> {
    let id: TransactionId = id_input.parse()?;
    let update = parse_transaction_update(details)?;
    store.update(id, update)
}
