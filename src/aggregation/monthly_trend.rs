//! Monthly income and expense series for the trend chart.

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::transaction::{Transaction, TransactionType};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyPoint {
    /// Year and month, formatted `YYYY-MM`.
    pub period: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// How the months of the trend series are ordered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum TrendOrder {
    /// In the order each month is first seen in the collection.
    #[default]
    Encounter,
    /// Oldest month first.
    Chronological,
}

impl TrendOrder {
    pub fn toggle(self) -> Self {
        match self {
            TrendOrder::Encounter => TrendOrder::Chronological,
            TrendOrder::Chronological => TrendOrder::Encounter,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TrendOrder::Encounter => "as entered",
            TrendOrder::Chronological => "chronological",
        }
    }
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// Buckets amounts by calendar month, in first-encounter order.
pub fn compute<'a, I>(transactions: I) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut points: Vec<MonthlyPoint> = Vec::new();
    let mut index_by_period: HashMap<String, usize> = HashMap::new();

    for transaction in transactions {
        let period = month_key(transaction.date);
        let idx = *index_by_period.entry(period.clone()).or_insert_with(|| {
            points.push(MonthlyPoint {
                period,
                income: Decimal::ZERO,
                expense: Decimal::ZERO,
            });
            points.len() - 1
        });

        let point = &mut points[idx];
        match transaction.transaction_type {
            TransactionType::Income => {
                point.income = point.income.saturating_add(transaction.amount)
            }
            TransactionType::Expense => {
                point.expense = point.expense.saturating_add(transaction.amount)
            }
        }
    }

    points
}

/// Buckets amounts by calendar month and orders the series as requested.
pub fn compute_ordered<'a, I>(transactions: I, order: TrendOrder) -> Vec<MonthlyPoint>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut points = compute(transactions);
    if order == TrendOrder::Chronological {
        // Zero-padded `YYYY-MM` keys sort lexically in date order.
        points.sort_by(|a, b| a.period.cmp(&b.period));
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::transaction::TransactionId;

    fn create_test_transaction(
        transaction_type: TransactionType,
        amount: i64,
        date: (i32, u32, u32),
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            description: "Test Description".to_string(),
            amount: Decimal::new(amount, 0),
            transaction_type,
            category: "Vendas".to_string(),
        }
    }

    #[test]
    fn test_compute_empty_collection() {
        let transactions: Vec<Transaction> = Vec::new();
        assert!(compute(&transactions).is_empty());
    }

    #[test]
    fn test_compute_single_month_splits_by_type() {
        let transactions = vec![
            create_test_transaction(TransactionType::Income, 100, (2025, 2, 3)),
            create_test_transaction(TransactionType::Expense, 40, (2025, 2, 27)),
        ];

        let points = compute(&transactions);
        assert_eq!(
            points,
            vec![MonthlyPoint {
                period: "2025-02".to_string(),
                income: Decimal::new(100, 0),
                expense: Decimal::new(40, 0),
            }]
        );
    }

    #[test]
    fn test_compute_saturates_instead_of_overflowing() {
        let mut transactions = vec![
            create_test_transaction(TransactionType::Income, 1, (2025, 2, 3)),
            create_test_transaction(TransactionType::Income, 1, (2025, 2, 4)),
        ];
        for transaction in &mut transactions {
            transaction.amount = Decimal::MAX;
        }

        let points = compute(&transactions);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].income, Decimal::MAX);
        assert_eq!(points[0].expense, Decimal::ZERO);
    }

    #[test]
    fn test_compute_keeps_first_encounter_order() {
        let transactions = vec![
            create_test_transaction(TransactionType::Income, 10, (2025, 3, 1)),
            create_test_transaction(TransactionType::Income, 20, (2024, 12, 31)),
            create_test_transaction(TransactionType::Expense, 5, (2025, 3, 15)),
            create_test_transaction(TransactionType::Expense, 7, (2025, 1, 9)),
        ];

        let periods: Vec<String> = compute(&transactions).into_iter().map(|p| p.period).collect();
        assert_eq!(periods, vec!["2025-03", "2024-12", "2025-01"]);
    }

    #[test]
    fn test_compute_ordered_chronological() {
        let transactions = vec![
            create_test_transaction(TransactionType::Income, 10, (2025, 3, 1)),
            create_test_transaction(TransactionType::Income, 20, (2024, 12, 31)),
            create_test_transaction(TransactionType::Expense, 7, (2025, 1, 9)),
        ];

        let points = compute_ordered(&transactions, TrendOrder::Chronological);
        let periods: Vec<&str> = points.iter().map(|p| p.period.as_str()).collect();
        assert_eq!(periods, vec!["2024-12", "2025-01", "2025-03"]);
        assert_eq!(points[1].expense, Decimal::new(7, 0));
    }

    #[test]
    fn test_month_key_is_zero_padded() {
        assert_eq!(month_key(NaiveDate::from_ymd_opt(2025, 1, 5).unwrap()), "2025-01");
        assert_eq!(month_key(NaiveDate::from_ymd_opt(999, 11, 5).unwrap()), "0999-11");
    }
}
