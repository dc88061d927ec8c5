use crate::models::transaction::{Transaction, TransactionType};
use crate::operations::search_by_category::search_transactions_by_category;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Newest,
    Oldest,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Newest => SortOrder::Oldest,
            SortOrder::Oldest => SortOrder::Newest,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Newest => "date ↓",
            SortOrder::Oldest => "date ↑",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub transaction_type: Option<TransactionType>,
    pub category: Option<String>,
}

/// Transactions matching `filter`, sorted by date. Transactions on the same
/// date keep their insertion order.
pub fn list_transactions<'a>(
    transactions: &'a [Transaction],
    filter: &TransactionFilter,
    order: SortOrder,
) -> Vec<&'a Transaction> {
    let mut matching = match &filter.category {
        Some(category) => search_transactions_by_category(category, transactions),
        None => transactions.iter().collect(),
    };
    if let Some(transaction_type) = filter.transaction_type {
        matching.retain(|t| t.transaction_type == transaction_type);
    }

    match order {
        SortOrder::Newest => matching.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::Oldest => matching.sort_by(|a, b| a.date.cmp(&b.date)),
    }
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn create_test_transaction(id: &str, transaction_type: TransactionType, category: &str, day: u32) -> Transaction {
        Transaction::new(
            id.to_string(),
            NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            "Test Transaction".to_string(),
            Decimal::new(1000, 2),
            transaction_type,
            category.to_string(),
        )
    }

    fn ids(transactions: &[&Transaction]) -> Vec<String> {
        transactions.iter().map(|t| t.id.clone()).collect()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            create_test_transaction("a", TransactionType::Income, "Sales", 3),
            create_test_transaction("b", TransactionType::Expense, "Rent", 1),
            create_test_transaction("c", TransactionType::Expense, "Sales", 3),
            create_test_transaction("d", TransactionType::Income, "Services", 7),
        ]
    }

    #[test]
    fn test_list_newest_first() {
        let transactions = sample();
        let result = list_transactions(&transactions, &TransactionFilter::default(), SortOrder::Newest);
        assert_eq!(ids(&result), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn test_list_oldest_first() {
        let transactions = sample();
        let result = list_transactions(&transactions, &TransactionFilter::default(), SortOrder::Oldest);
        assert_eq!(ids(&result), vec!["b", "a", "c", "d"]);
    }

    #[test]
    fn test_list_filter_by_type() {
        let transactions = sample();
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Expense),
            category: None,
        };
        let result = list_transactions(&transactions, &filter, SortOrder::Oldest);
        assert_eq!(ids(&result), vec!["b", "c"]);
    }

    #[test]
    fn test_list_filter_by_type_and_category() {
        let transactions = sample();
        let filter = TransactionFilter {
            transaction_type: Some(TransactionType::Income),
            category: Some("sales".to_string()),
        };
        let result = list_transactions(&transactions, &filter, SortOrder::Newest);
        assert_eq!(ids(&result), vec!["a"]);
    }

    #[test]
    fn test_sort_order_toggle() {
        assert_eq!(SortOrder::Newest.toggle(), SortOrder::Oldest);
        assert_eq!(SortOrder::Oldest.toggle().label(), "date ↓");
    }
}
