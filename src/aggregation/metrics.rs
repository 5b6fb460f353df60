use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::transaction::{Transaction, TransactionType};

/// Headline figures shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub income: Decimal,
    pub expense: Decimal,
    /// `income - expense`, negative when the period ran at a loss.
    pub net_profit: Decimal,
    /// Net profit as a percentage of income, rounded to one decimal place.
    /// Zero when there is no income.
    pub margin_percent: Decimal,
}

impl Metrics {
    pub fn is_loss(&self) -> bool {
        self.net_profit < Decimal::ZERO
    }
}

pub fn compute<'a, I>(transactions: I) -> Metrics
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => income = income.saturating_add(transaction.amount),
            TransactionType::Expense => expense = expense.saturating_add(transaction.amount),
        }
    }

    let net_profit = income.saturating_sub(expense);
    let margin_percent = margin(net_profit, income);

    Metrics {
        income,
        expense,
        net_profit,
        margin_percent,
    }
}

/// `net_profit / income` as a percentage, clamped to the `Decimal` range when
/// a tiny income makes the ratio unrepresentable.
fn margin(net_profit: Decimal, income: Decimal) -> Decimal {
    if income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    net_profit
        .checked_div(income)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|percent| percent.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero))
        .unwrap_or(if net_profit < Decimal::ZERO {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::transaction::{MAX_AMOUNT, TransactionId};

    fn create_test_transaction(transaction_type: TransactionType, amount: Decimal) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            description: "Test Description".to_string(),
            amount,
            transaction_type,
            category: "Vendas".to_string(),
        }
    }

    #[test]
    fn test_compute_empty_collection() {
        let transactions: Vec<Transaction> = Vec::new();
        let metrics = compute(&transactions);
        assert_eq!(metrics, Metrics::default());
    }

    #[test]
    fn test_compute_sums_by_type() {
        let transactions = vec![
            create_test_transaction(TransactionType::Income, Decimal::new(5000, 0)),
            create_test_transaction(TransactionType::Expense, Decimal::new(2000, 0)),
            create_test_transaction(TransactionType::Income, Decimal::new(3000, 0)),
        ];

        let metrics = compute(&transactions);
        assert_eq!(metrics.income, Decimal::new(8000, 0));
        assert_eq!(metrics.expense, Decimal::new(2000, 0));
        assert_eq!(metrics.net_profit, Decimal::new(6000, 0));
        assert_eq!(metrics.margin_percent, Decimal::new(750, 1));
        assert!(!metrics.is_loss());
    }

    #[test]
    fn test_margin_is_zero_without_income() {
        let transactions = vec![create_test_transaction(
            TransactionType::Expense,
            Decimal::new(800, 0),
        )];

        let metrics = compute(&transactions);
        assert_eq!(metrics.net_profit, Decimal::new(-800, 0));
        assert_eq!(metrics.margin_percent, Decimal::ZERO);
        assert!(metrics.is_loss());
    }

    #[test]
    fn test_margin_rounds_to_one_decimal() {
        // 2 / 3 = 66.666..%
        let transactions = vec![
            create_test_transaction(TransactionType::Income, Decimal::new(3, 0)),
            create_test_transaction(TransactionType::Expense, Decimal::new(1, 0)),
        ];
        assert_eq!(compute(&transactions).margin_percent, Decimal::new(667, 1));

        // -1 / 3 = -33.333..%
        let transactions = vec![
            create_test_transaction(TransactionType::Income, Decimal::new(3, 0)),
            create_test_transaction(TransactionType::Expense, Decimal::new(4, 0)),
        ];
        assert_eq!(compute(&transactions).margin_percent, Decimal::new(-333, 1));
    }

    #[test]
    fn test_margin_rounds_half_away_from_zero() {
        // 1 / 8 = 12.5%, 1 / 16 = 6.25%
        let transactions = vec![
            create_test_transaction(TransactionType::Income, Decimal::new(16, 0)),
            create_test_transaction(TransactionType::Expense, Decimal::new(15, 0)),
        ];
        assert_eq!(compute(&transactions).margin_percent, Decimal::new(63, 1));
    }

    #[test]
    fn test_compute_large_amounts_do_not_overflow() {
        let largest = Decimal::from(MAX_AMOUNT);
        let transactions: Vec<Transaction> = (0..1000)
            .map(|_| create_test_transaction(TransactionType::Income, largest))
            .collect();

        let metrics = compute(&transactions);
        assert_eq!(metrics.income, largest * Decimal::from(1000));
        assert_eq!(metrics.margin_percent, Decimal::ONE_HUNDRED);

        let transactions = vec![
            create_test_transaction(TransactionType::Income, Decimal::MAX),
            create_test_transaction(TransactionType::Income, Decimal::MAX),
        ];
        assert_eq!(compute(&transactions).income, Decimal::MAX);
    }

    #[test]
    fn test_margin_with_tiny_income_and_huge_expense() {
        let transactions = vec![
            create_test_transaction(TransactionType::Income, Decimal::new(1, 4)),
            create_test_transaction(TransactionType::Expense, Decimal::from(MAX_AMOUNT)),
        ];
        let metrics = compute(&transactions);
        assert_eq!(
            metrics.margin_percent,
            Decimal::from_str_exact("-999999999999999999900").unwrap()
        );
        assert!(metrics.is_loss());

        let transactions = vec![
            create_test_transaction(TransactionType::Income, Decimal::new(1, 28)),
            create_test_transaction(TransactionType::Expense, Decimal::MAX),
        ];
        assert_eq!(compute(&transactions).margin_percent, Decimal::MIN);
    }
}
