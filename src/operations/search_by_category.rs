use crate::models::transaction::Transaction;

/// Transactions whose category matches `category`, ignoring case and
/// surrounding whitespace, in store order.
pub fn search_transactions_by_category<'a>(
    category: &str,
    transactions: &'a [Transaction],
) -> Vec<&'a Transaction> {
    let wanted = category.trim().to_lowercase();
    if wanted.is_empty() {
        return Vec::new();
    }

    let matches: Vec<&Transaction> = transactions
        .iter()
        .filter(|transaction| transaction.category.to_lowercase() == wanted)
        .collect();
    tracing::debug!(category = %wanted, found = matches.len(), "searched by category");
    matches
}
