use crate::db::repository::TransactionStore;
use crate::db::storage::Storage;
use crate::error::ValidationError;

/// Removes the transaction whose id is typed in `id_input`.
///
/// Returns `Ok(false)` when no transaction has that id.
pub fn remove_transaction<S: Storage>(
    store: &mut TransactionStore<S>,
    id_input: &str,
) -> Result<bool, ValidationError> {
    let id = id_input.trim();
    if id.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    Ok(store.delete(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::DEFAULT_SLOT;
    use crate::db::storage::MemoryStorage;
    use crate::operations::add::add_transaction_from_input;
    use uuid::Uuid;

    #[test]
    fn test_remove_transaction_success() {
        let mut store = TransactionStore::open(MemoryStorage::new(), DEFAULT_SLOT);
        let transaction = add_transaction_from_input(&mut store, "2025-01-15, Salary, 100, income, Job").unwrap();

        let result = remove_transaction(&mut store, &format!("  {}  ", transaction.id));

        assert_eq!(result, Ok(true));
        assert!(store.is_empty());
    }

    #[test]
    fn test_remove_transaction_not_found() {
        let mut store = TransactionStore::open(MemoryStorage::new(), DEFAULT_SLOT);
        add_transaction_from_input(&mut store, "2025-01-15, Salary, 100, income, Job").unwrap();

        let result = remove_transaction(&mut store, &Uuid::new_v4().to_string());

        assert_eq!(result, Ok(false));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_transaction_empty_id() {
        let mut store = TransactionStore::open(MemoryStorage::new(), DEFAULT_SLOT);
        assert_eq!(remove_transaction(&mut store, "   "), Err(ValidationError::EmptyId));
    }
}
