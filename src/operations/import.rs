use std::fs::File;
use std::io::Read;

use crate::error::{Error, Result, ValidationError};
use crate::models::transaction::{TransactionInput, TransactionType};
use crate::store::TransactionStore;

const COLUMN_COUNT: usize = 5;

/// Imports a headerless `date,description,amount,type,category` CSV file.
///
/// Every row is validated before anything is added, so a bad row leaves the
/// store unchanged. Returns the number of imported transactions.
pub fn import_transactions(store: &mut TransactionStore, path: &str) -> Result<usize> {
    let path = path.trim();
    let file = File::open(path).map_err(|e| Error::Io {
        path: path.to_string(),
        reason: e.to_string(),
    })?;

    let count = import_transactions_from_reader(store, file)?;
    tracing::info!("imported {count} transactions from {path}");
    Ok(count)
}

pub fn import_transactions_from_reader<R: Read>(store: &mut TransactionStore, reader: R) -> Result<usize> {
    let inputs = read_csv(reader)?;
    let ids = store.extend(inputs).map_err(|(index, error)| match error {
        Error::Validation(source) => Error::Import {
            line: index + 1,
            source,
        },
        other => other,
    })?;
    Ok(ids.len())
}

fn read_csv<R: Read>(reader: R) -> Result<Vec<TransactionInput>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut inputs = Vec::new();

    for (line_index, result) in reader.records().enumerate() {
        let line = line_index + 1;
        let record = result.map_err(|e| Error::Csv {
            line,
            reason: e.to_string(),
        })?;

        if record.len() != COLUMN_COUNT {
            return Err(Error::Import {
                line,
                source: ValidationError::WrongFieldCount {
                    expected: COLUMN_COUNT,
                    got: record.len(),
                },
            });
        }

        let field = |i: usize| record.get(i).unwrap_or("");
        let transaction_type: TransactionType = field(3)
            .parse()
            .map_err(|source| Error::Import { line, source })?;

        inputs.push(TransactionInput::new(
            transaction_type,
            field(1),
            field(2),
            field(0),
            field(4),
        ));
    }

    Ok(inputs)
}
