use std::collections::HashSet;
use uuid::Uuid;

use super::storage::Storage;
use crate::error::{StorageError, ValidationError};
use crate::models::summary::TransactionSummary;
use crate::models::transaction::{Transaction, TransactionDraft, check_amount};
use crate::operations::report;

pub const DEFAULT_SLOT: &str = "transactions";

/// Reads the transactions stored in `slot`.
///
/// A missing slot, an unreadable slot and malformed JSON all give an empty
/// collection; the cause is logged. Records with an empty or repeated id or
/// an amount that could not have been recorded are skipped.
pub fn load_transactions<S: Storage + ?Sized>(storage: &S, slot: &str) -> Vec<Transaction> {
    let contents = match storage.load(slot) {
        Ok(Some(contents)) => contents,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!("Failed to read slot '{slot}': {e}");
            return Vec::new();
        }
    };

    let mut transactions: Vec<Transaction> = match serde_json::from_str(&contents) {
        Ok(transactions) => transactions,
        Err(e) => {
            tracing::warn!("Ignoring malformed transactions in slot '{slot}': {e}");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    transactions.retain(|transaction| {
        if transaction.id.trim().is_empty() {
            tracing::warn!("Skipping transaction without an ID in slot '{slot}'");
            return false;
        }
        if let Err(e) = check_amount(transaction.amount) {
            tracing::warn!("Skipping transaction {} in slot '{slot}': {e}", transaction.id);
            return false;
        }
        if !seen.insert(transaction.id.clone()) {
            tracing::warn!("Skipping duplicate transaction {} in slot '{slot}'", transaction.id);
            return false;
        }
        true
    });
    transactions
}

/// Serializes the whole collection and overwrites `slot`.
pub fn save_transactions<S: Storage + ?Sized>(
    storage: &mut S,
    slot: &str,
    transactions: &[Transaction],
) -> Result<(), StorageError> {
    let json = serde_json::to_string(transactions)?;
    storage.save(slot, &json)
}

/// The authoritative, insertion ordered transaction collection of a session.
///
/// Every mutation is written through to the storage slot. When a write fails
/// the in-memory collection is kept and the error is exposed through
/// [`TransactionStore::persistence_warning`] until a later write succeeds.
pub struct TransactionStore<S: Storage> {
    storage: S,
    slot: String,
    transactions: Vec<Transaction>,
    persistence_warning: Option<StorageError>,
}

impl<S: Storage> TransactionStore<S> {
    /// Opens the store and loads whatever `slot` currently holds.
    pub fn open(storage: S, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let transactions = load_transactions(&storage, &slot);
        tracing::debug!("Loaded {} transactions from slot '{}'", transactions.len(), slot);
        Self {
            storage,
            slot,
            transactions,
            persistence_warning: None,
        }
    }

    /// Reads the persisted collection without touching the in-memory one.
    pub fn load(&self) -> Vec<Transaction> {
        load_transactions(&self.storage, &self.slot)
    }

    pub fn add(&mut self, draft: &TransactionDraft) -> Result<Transaction, ValidationError> {
        let valid = draft.validate()?;
        let transaction = valid.into_transaction(self.next_id());
        tracing::debug!(
            "Adding {} transaction {} of {}",
            transaction.transaction_type,
            transaction.id,
            transaction.amount
        );
        self.transactions.push(transaction.clone());
        self.sync();
        Ok(transaction)
    }

    /// Removes the transaction with `id`. Returns whether one was removed;
    /// an unknown id changes nothing and is not written.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(pos) = self.transactions.iter().position(|t| t.id == id) else {
            tracing::debug!("No transaction with ID {id} to delete");
            return false;
        };
        self.transactions.remove(pos);
        tracing::debug!("Deleted transaction {id}");
        self.sync();
        true
    }

    /// Writes the current collection to the slot.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        save_transactions(&mut self.storage, &self.slot, &self.transactions)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn summary(&self) -> TransactionSummary {
        report::summarize(&self.transactions)
    }

    pub fn persistence_warning(&self) -> Option<&StorageError> {
        self.persistence_warning.as_ref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    fn sync(&mut self) {
        match self.persist() {
            Ok(()) => self.persistence_warning = None,
            Err(e) => {
                tracing::warn!("Changes were not saved to slot '{}': {}", self.slot, e);
                self.persistence_warning = Some(e);
            }
        }
    }

    fn next_id(&self) -> String {
        loop {
            let id = Uuid::now_v7().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::storage::MemoryStorage;
    use crate::models::transaction::TransactionType;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use uuid::Uuid;

    struct FailingStorage;

    impl Storage for FailingStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("disk unavailable")))
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("quota exceeded")))
        }
    }

    fn create_test_draft(transaction_type: &str, amount: &str, description: &str, category: &str, date: &str) -> TransactionDraft {
        TransactionDraft {
            transaction_type: transaction_type.to_string(),
            amount: amount.to_string(),
            description: description.to_string(),
            category: category.to_string(),
            date: date.to_string(),
            image_url: None,
        }
    }

    fn create_test_store() -> TransactionStore<MemoryStorage> {
        TransactionStore::open(MemoryStorage::new(), DEFAULT_SLOT)
    }

    #[test]
    fn test_open_empty_slot() {
        let store = create_test_store();
        assert!(store.is_empty());
        assert!(store.persistence_warning().is_none());
    }

    #[test]
    fn test_open_malformed_slot_is_empty() {
        let storage = MemoryStorage::with_slot(DEFAULT_SLOT, "{not json");
        let store = TransactionStore::open(storage, DEFAULT_SLOT);
        assert!(store.is_empty());
    }

    #[test]
    fn test_open_unreadable_slot_is_empty() {
        let store = TransactionStore::open(FailingStorage, DEFAULT_SLOT);
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_transaction_success() {
        let mut store = create_test_store();
        let draft = create_test_draft("income", "100", "Sale", "sales", "2024-01-05");

        let transaction = store.add(&draft).unwrap();

        assert_eq!(transaction.amount, Decimal::new(100, 0));
        assert_eq!(transaction.transaction_type, TransactionType::Income);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&transaction.id), Some(&transaction));
    }

    #[test]
    fn test_add_persists_full_collection() {
        let mut store = create_test_store();
        store.add(&create_test_draft("income", "100", "Sale", "sales", "2024-01-05")).unwrap();
        store.add(&create_test_draft("expense", "40", "Supplies", "inventory", "2024-01-06")).unwrap();

        let saved = store.storage().get(DEFAULT_SLOT).unwrap();
        let persisted: Vec<Transaction> = serde_json::from_str(saved).unwrap();
        assert_eq!(persisted, store.transactions());
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let mut store = create_test_store();
        store.add(&create_test_draft("income", "1", "later", "sales", "2024-02-01")).unwrap();
        store.add(&create_test_draft("income", "2", "earlier", "sales", "2024-01-01")).unwrap();

        let descriptions: Vec<&str> = store.transactions().iter().map(|t| t.description.as_str()).collect();
        assert_eq!(descriptions, vec!["later", "earlier"]);
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let mut store = create_test_store();
        for i in 0..50 {
            store.add(&create_test_draft("income", &i.to_string(), "Sale", "sales", "2024-01-05")).unwrap();
        }
        let mut ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_add_invalid_amount_rejected() {
        let mut store = create_test_store();
        let draft = create_test_draft("income", "abc", "Sale", "sales", "2024-01-05");

        let result = store.add(&draft);

        assert_eq!(result, Err(ValidationError::InvalidAmount("abc".to_string())));
        assert!(store.is_empty());
        assert!(store.storage().get(DEFAULT_SLOT).is_none());
    }

    #[test]
    fn test_delete_existing() {
        let mut store = create_test_store();
        let keep = store.add(&create_test_draft("income", "100", "Sale", "sales", "2024-01-05")).unwrap();
        let gone = store.add(&create_test_draft("expense", "40", "Supplies", "inventory", "2024-01-06")).unwrap();

        assert!(store.delete(&gone.id));

        assert_eq!(store.transactions(), &[keep]);
        assert_eq!(store.load(), store.transactions());
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut store = create_test_store();
        store.add(&create_test_draft("income", "100", "Sale", "sales", "2024-01-05")).unwrap();
        let before = store.transactions().to_vec();

        assert!(!store.delete(&Uuid::new_v4().to_string()));

        assert_eq!(store.transactions(), before.as_slice());
    }

    #[test]
    fn test_size_tracks_adds_and_deletes() {
        let mut store = create_test_store();
        let mut ids = Vec::new();
        for i in 1..=5 {
            let t = store.add(&create_test_draft("expense", &i.to_string(), "Stock", "inventory", "2024-03-01")).unwrap();
            ids.push(t.id);
        }
        store.delete(&ids[0]);
        store.delete(&ids[3]);
        store.delete(&ids[0]);

        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_reopen_round_trip() {
        let mut store = create_test_store();
        store.add(&create_test_draft("income", "100.25", "Sale", "sales", "2024-01-05")).unwrap();
        let mut with_image = create_test_draft("expense", "0.1", "Receipt", "inventory", "2024-01-31");
        with_image.image_url = Some("data:image/png;base64,iVBORw0KGgo=".to_string());
        store.add(&with_image).unwrap();

        let storage = store.storage().clone();
        let reopened = TransactionStore::open(storage, DEFAULT_SLOT);

        assert_eq!(reopened.transactions(), store.transactions());
        assert_eq!(reopened.transactions()[1].amount, Decimal::from_str("0.1").unwrap());
    }

    #[test]
    fn test_persistence_failure_is_not_fatal() {
        let mut store = TransactionStore::open(FailingStorage, DEFAULT_SLOT);

        let transaction = store.add(&create_test_draft("income", "100", "Sale", "sales", "2024-01-05")).unwrap();

        assert_eq!(store.transactions(), &[transaction.clone()]);
        assert!(store.persistence_warning().is_some());

        assert!(store.delete(&transaction.id));
        assert!(store.is_empty());
        assert!(store.persistence_warning().is_some());
    }

    #[test]
    fn test_loads_slot_written_by_other_clients() {
        let json = r#"[
            {"id":"k3j2l1x","amount":100,"description":"Sale","category":"Sales","date":"2024-01-05","type":"income"},
            {"id":"p9q8r7s","amount":40.5,"description":"Supplies","category":"Inventory","date":"2024-01-06","type":"expense","imageUrl":"data:image/jpeg;base64,AA=="}
        ]"#;
        let store = TransactionStore::open(MemoryStorage::with_slot(DEFAULT_SLOT, json), DEFAULT_SLOT);

        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[1].amount, Decimal::new(405, 1));
        assert_eq!(store.transactions()[1].image_url.as_deref(), Some("data:image/jpeg;base64,AA=="));
    }

    #[test]
    fn test_load_skips_invalid_records() {
        let json = r#"[
            {"id":"a1","amount":100,"description":"Sale","category":"Sales","date":"2024-01-05","type":"income"},
            {"id":"b2","amount":-5,"description":"Refund","category":"Sales","date":"2024-01-05","type":"expense"},
            {"id":"a1","amount":7,"description":"Copy","category":"Sales","date":"2024-01-06","type":"income"},
            {"id":" ","amount":3,"description":"Blank","category":"Sales","date":"2024-01-06","type":"income"},
            {"id":"c3","amount":20,"description":"Stock","category":"Inventory","date":"2024-01-06","type":"expense"}
        ]"#;
        let mut store = TransactionStore::open(MemoryStorage::with_slot(DEFAULT_SLOT, json), DEFAULT_SLOT);

        let ids: Vec<&str> = store.transactions().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a1", "c3"]);
        assert_eq!(store.transactions()[0].amount, Decimal::new(100, 0));

        assert!(store.delete("a1"));
        assert!(store.get("a1").is_none());
    }

    #[test]
    fn test_large_amount_does_not_wipe_slot() {
        let mut store = create_test_store();
        store.add(&create_test_draft("income", "100", "Sale", "sales", "2024-01-05")).unwrap();

        let result = store.add(&create_test_draft("income", "79228162514264337593543950335", "Huge", "sales", "2024-01-05"));
        assert_eq!(result, Err(ValidationError::AmountTooLarge));
        store.add(&create_test_draft("income", "9999999999999.99", "Largest", "sales", "2024-01-05")).unwrap();

        let reopened = TransactionStore::open(store.storage().clone(), DEFAULT_SLOT);
        assert_eq!(reopened.transactions(), store.transactions());
        assert_eq!(reopened.len(), 2);
    }

    #[test]
    fn test_summary_at_amount_ceiling() {
        let mut store = create_test_store();
        for _ in 0..100 {
            store.add(&create_test_draft("income", "9999999999999.99", "Largest", "sales", "2024-01-05")).unwrap();
        }

        let summary = store.summary();

        assert_eq!(summary.totals.income, Decimal::from_str("999999999999999").unwrap());
        assert_eq!(summary.totals.profit, summary.totals.income);
    }

    #[test]
    fn test_summary_scenario() {
        let mut store = create_test_store();
        store.add(&create_test_draft("income", "100", "Sale", "sales", "2024-01-05")).unwrap();
        store.add(&create_test_draft("expense", "40", "Supplies", "inventory", "2024-01-06")).unwrap();

        let summary = store.summary();
        assert_eq!(summary.totals.income, Decimal::new(100, 0));
        assert_eq!(summary.totals.expenses, Decimal::new(40, 0));
        assert_eq!(summary.totals.profit, Decimal::new(60, 0));
    }
}
