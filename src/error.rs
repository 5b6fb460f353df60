use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::transaction::TransactionId;

/// The errors that may occur while managing or reporting on transactions.
///
/// None of these are fatal: the caller reports the message and asks again.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// A required field was missing or could not be parsed.
    ///
    /// The store is left unchanged when this is returned.
    #[error("invalid transaction: {0}")]
    Validation(#[from] ValidationError),

    /// The ID does not refer to a transaction in the store.
    ///
    /// Callers should refresh their view of the available transactions.
    #[error("transaction with ID {0} not found")]
    NotFound(TransactionId),

    /// A row of an imported CSV file failed validation. `line` is 1-based.
    #[error("line {line}: {source}")]
    Import {
        line: usize,
        #[source]
        source: ValidationError,
    },

    /// The CSV reader could not parse the file.
    #[error("CSV parse error on line {line}: {reason}")]
    Csv { line: usize, reason: String },

    /// A file could not be opened or read.
    #[error("failed to open file '{path}': {reason}")]
    Io { path: String, reason: String },

    /// Setting up, drawing or tearing down the terminal dashboard failed.
    #[error("terminal error: {0}")]
    Terminal(String),
}

/// Why a piece of user input was rejected.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    #[error("the {0} is required")]
    MissingField(&'static str),

    #[error("invalid amount '{0}', please provide a valid decimal number")]
    InvalidAmount(String),

    #[error("amount {0} is negative, use the transaction type to record an expense")]
    NegativeAmount(Decimal),

    #[error("amount {amount} is larger than the maximum of {max}")]
    AmountTooLarge { amount: Decimal, max: Decimal },

    #[error("amount '{amount}' has more than {max} decimal places")]
    TooManyDecimalPlaces { amount: String, max: u32 },

    #[error("invalid date '{0}', please use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("invalid transaction type '{0}', use 'income' or 'expense'")]
    InvalidTransactionType(String),

    #[error("the {field} is too long (max {max} characters)")]
    TooLong { field: &'static str, max: usize },

    #[error("invalid transaction ID '{0}', please provide a valid UUID")]
    InvalidId(String),

    #[error("unknown field '{0}', expected one of description, category, amount, date")]
    UnknownField(String),

    #[error("expected {expected} details separated by commas but got {got}")]
    WrongFieldCount { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
