use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::transaction::Transaction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Sums amounts per category label in first-encounter order.
///
/// Income and expense amounts are added together rather than netted, so the
/// totals describe how much money moved through each category.
pub fn compute<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    let mut index_by_category: HashMap<&'a str, usize> = HashMap::new();

    for transaction in transactions {
        let idx = *index_by_category
            .entry(transaction.category.as_str())
            .or_insert_with(|| {
                totals.push(CategoryTotal {
                    category: transaction.category.clone(),
                    total: Decimal::ZERO,
                });
                totals.len() - 1
            });
        totals[idx].total = totals[idx].total.saturating_add(transaction.amount);
    }

    totals
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::transaction::{TransactionId, TransactionType};

    fn create_test_transaction(
        transaction_type: TransactionType,
        amount: i64,
        category: &str,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            description: "Test Description".to_string(),
            amount: Decimal::new(amount, 0),
            transaction_type,
            category: category.to_string(),
        }
    }

    #[test]
    fn test_compute_empty_collection() {
        let transactions: Vec<Transaction> = Vec::new();
        assert!(compute(&transactions).is_empty());
    }

    #[test]
    fn test_compute_groups_in_first_encounter_order() {
        let transactions = vec![
            create_test_transaction(TransactionType::Income, 5000, "Vendas"),
            create_test_transaction(TransactionType::Expense, 2000, "Fixos"),
            create_test_transaction(TransactionType::Expense, 800, "Marketing"),
            create_test_transaction(TransactionType::Income, 2500, "Vendas"),
        ];

        let totals = compute(&transactions);
        assert_eq!(
            totals,
            vec![
                CategoryTotal { category: "Vendas".to_string(), total: Decimal::new(7500, 0) },
                CategoryTotal { category: "Fixos".to_string(), total: Decimal::new(2000, 0) },
                CategoryTotal { category: "Marketing".to_string(), total: Decimal::new(800, 0) },
            ]
        );
    }

    #[test]
    fn test_compute_adds_income_and_expense_together() {
        let transactions = vec![
            create_test_transaction(TransactionType::Income, 300, "Freelance"),
            create_test_transaction(TransactionType::Expense, 100, "Freelance"),
        ];

        let totals = compute(&transactions);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, Decimal::new(400, 0));
    }

    #[test]
    fn test_compute_saturates_instead_of_overflowing() {
        let mut transactions = vec![
            create_test_transaction(TransactionType::Income, 1, "Vendas"),
            create_test_transaction(TransactionType::Expense, 1, "Vendas"),
        ];
        for transaction in &mut transactions {
            transaction.amount = Decimal::MAX;
        }

        let totals = compute(&transactions);
        assert_eq!(totals.len(), 1);
        assert_eq!(totals[0].total, Decimal::MAX);
    }

    #[test]
    fn test_compute_category_labels_are_case_sensitive() {
        let transactions = vec![
            create_test_transaction(TransactionType::Expense, 10, "Food"),
            create_test_transaction(TransactionType::Expense, 20, "food"),
        ];

        assert_eq!(compute(&transactions).len(), 2);
    }
}
