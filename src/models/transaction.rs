use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::ValidationError;

pub const MAX_DESCRIPTION_LENGTH: usize = 255;
pub const MAX_CATEGORY_LENGTH: usize = 50;
/// Largest accepted amount, in whole units.
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;
pub const MAX_AMOUNT_DECIMAL_PLACES: u32 = 4;

/// Opaque identifier assigned by the store when a transaction is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The first eight characters, enough to tell rows apart in a table.
    pub fn short(&self) -> String {
        let mut id = self.0.to_string();
        id.truncate(8);
        id
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ValidationError::MissingField("transaction ID"));
        }
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| ValidationError::InvalidId(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for TransactionType {
    type Err = ValidationError;

    /// Accepts `income`/`expense` as well as the Portuguese `receita`/`despesa`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "receita" => Ok(TransactionType::Income),
            "expense" | "despesa" => Ok(TransactionType::Expense),
            "" => Err(ValidationError::MissingField("transaction type")),
            other => Err(ValidationError::InvalidTransactionType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub date: NaiveDate,
    pub description: String,
    /// Always non-negative, the sign comes from `transaction_type`.
    pub amount: Decimal,
    pub transaction_type: TransactionType,
    pub category: String,
}

impl Transaction {
    /// The amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

/// The unparsed fields of a new transaction, as submitted by a form or a CSV row.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub transaction_type: TransactionType,
    pub description: String,
    pub amount: String,
    pub date: String,
    pub category: String,
}

impl TransactionInput {
    pub fn new(
        transaction_type: TransactionType,
        description: &str,
        amount: &str,
        date: &str,
        category: &str,
    ) -> Self {
        Self {
            transaction_type,
            description: description.to_string(),
            amount: amount.to_string(),
            date: date.to_string(),
            category: category.to_string(),
        }
    }

    pub(crate) fn into_transaction(self, id: TransactionId) -> Result<Transaction, ValidationError> {
        Ok(Transaction {
            id,
            date: parse_date(&self.date)?,
            description: parse_description(&self.description)?,
            amount: parse_amount(&self.amount)?,
            transaction_type: self.transaction_type,
            category: parse_category(&self.category)?,
        })
    }
}

/// Fields to replace on an existing transaction. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub description: Option<String>,
    pub category: Option<String>,
    pub amount: Option<String>,
    pub date: Option<String>,
}

impl TransactionUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none()
            && self.category.is_none()
            && self.amount.is_none()
            && self.date.is_none()
    }

    /// Returns a copy of `transaction` with the update applied.
    ///
    /// Every supplied field is validated before anything is replaced, so an
    /// error means `transaction` should be kept as it is.
    pub(crate) fn apply_to(&self, transaction: &Transaction) -> Result<Transaction, ValidationError> {
        let mut updated = transaction.clone();
        if let Some(ref description) = self.description {
            updated.description = parse_description(description)?;
        }
        if let Some(ref category) = self.category {
            updated.category = parse_category(category)?;
        }
        if let Some(ref amount) = self.amount {
            updated.amount = parse_amount(amount)?;
        }
        if let Some(ref date) = self.date {
            updated.date = parse_date(date)?;
        }
        Ok(updated)
    }
}

pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("amount"));
    }
    let amount =
        Decimal::from_str(raw).map_err(|_| ValidationError::InvalidAmount(raw.to_string()))?;
    if amount < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount(amount));
    }
    if amount > Decimal::from(MAX_AMOUNT) {
        return Err(ValidationError::AmountTooLarge {
            amount,
            max: Decimal::from(MAX_AMOUNT),
        });
    }
    if amount.normalize().scale() > MAX_AMOUNT_DECIMAL_PLACES {
        return Err(ValidationError::TooManyDecimalPlaces {
            amount: raw.to_string(),
            max: MAX_AMOUNT_DECIMAL_PLACES,
        });
    }
    Ok(amount)
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingField("date"));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate(raw.to_string()))
}

fn parse_description(raw: &str) -> Result<String, ValidationError> {
    require_text(raw, "description", MAX_DESCRIPTION_LENGTH)
}

fn parse_category(raw: &str) -> Result<String, ValidationError> {
    require_text(raw, "category", MAX_CATEGORY_LENGTH)
}

fn require_text(raw: &str, field: &'static str, max: usize) -> Result<String, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    if text.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(text.to_string())
}
