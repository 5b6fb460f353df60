use crate::models::transaction::{TransactionInput, TransactionType};

/// A small business ledger for trying out the dashboard.
pub fn sample_transactions() -> Vec<TransactionInput> {
    vec![
        TransactionInput::new(
            TransactionType::Income,
            "Venda de produtos",
            "5000",
            "2025-01-15",
            "Vendas",
        ),
        TransactionInput::new(
            TransactionType::Expense,
            "Aluguel escritório",
            "2000",
            "2025-01-10",
            "Fixos",
        ),
        TransactionInput::new(
            TransactionType::Income,
            "Consultoria",
            "3000",
            "2025-01-12",
            "Serviços",
        ),
        TransactionInput::new(
            TransactionType::Expense,
            "Marketing digital",
            "800",
            "2025-01-08",
            "Marketing",
        ),
        TransactionInput::new(
            TransactionType::Income,
            "Venda online",
            "2500",
            "2025-01-18",
            "Vendas",
        ),
    ]
}
