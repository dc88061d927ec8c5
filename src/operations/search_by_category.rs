use crate::models::transaction::Transaction;

pub fn search_transactions_by_category<'a>(
    category: &str,
    transactions: &'a [Transaction],
) -> Vec<&'a Transaction> {
    let category = category.trim();
    transactions
        .iter()
        .filter(|transaction| transaction.category.eq_ignore_ascii_case(category))
        .collect()
}
