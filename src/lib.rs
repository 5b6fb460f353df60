//! Findash keeps an in-memory ledger of income and expense transactions and
//! derives the figures a financial dashboard shows from it: totals, net
//! profit and margin, a monthly trend and a per-category distribution.
//!
//! [`TransactionStore`] owns the transactions. The functions in
//! [`aggregation`] are pure passes over a slice of them and are rerun after
//! every change to the store.

pub mod aggregation;
pub mod error;
pub mod models;
pub mod operations;
pub mod sample_data;
pub mod store;

pub use aggregation::{Dashboard, Period, TrendOrder};
pub use error::{Error, Result, ValidationError};
pub use models::transaction::{
    Transaction, TransactionId, TransactionInput, TransactionType, TransactionUpdate,
};
pub use store::TransactionStore;
