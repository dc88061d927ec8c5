use crate::db::repository::TransactionStore;
use crate::db::storage::Storage;
use crate::error::ImportError;
use crate::models::transaction::TransactionDraft;
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Csv,
}

/// Imports every row of `path` into the store.
///
/// All rows are validated first; a single bad row aborts the import before
/// anything is added.
pub fn import_transactions<S: Storage>(
    store: &mut TransactionStore<S>,
    format: ImportFormat,
    path: &Path,
) -> Result<usize, ImportError> {
    let drafts = match format {
        ImportFormat::Csv => read_csv(path)?,
    };

    for (line_index, draft) in drafts.iter().enumerate() {
        draft.validate().map_err(|source| ImportError::InvalidRow {
            line: line_index + 1,
            source,
        })?;
    }

    let mut count = 0;
    for draft in &drafts {
        store.add(draft).map_err(|source| ImportError::InvalidRow {
            line: count + 1,
            source,
        })?;
        count += 1;
    }
    tracing::info!("Imported {} transactions from {}", count, path.display());
    Ok(count)
}

/// Reads headerless `date,description,amount,type,category` rows.
fn read_csv(path: &Path) -> Result<Vec<TransactionDraft>, ImportError> {
    let file = File::open(path).map_err(|source| ImportError::Open {
        path: path.display().to_string(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .has_headers(false)
        .flexible(true)
        .from_reader(file);

    let mut drafts = Vec::new();

    for (line_index, result) in reader.records().enumerate() {
        let line = line_index + 1;
        let record = result.map_err(|source| ImportError::Csv { line, source })?;

        if record.len() != 5 {
            return Err(ImportError::ColumnCount {
                line,
                got: record.len(),
            });
        }

        let field = |i: usize| record.get(i).unwrap_or("").to_string();
        drafts.push(TransactionDraft {
            date: field(0),
            description: field(1),
            amount: field(2),
            transaction_type: field(3),
            category: field(4),
            image_url: None,
        });
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::DEFAULT_SLOT;
    use crate::db::storage::MemoryStorage;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp_csv(contents: &str) -> NamedTempFile {
        let mut tmp = NamedTempFile::new().expect("Failed to create temp file");
        write!(tmp, "{}", contents).expect("Failed to write test CSV");
        tmp
    }

    fn create_test_store() -> TransactionStore<MemoryStorage> {
        TransactionStore::open(MemoryStorage::new(), DEFAULT_SLOT)
    }

    #[test]
    fn test_import_csv_success() {
        let mut store = create_test_store();
        let csv_data = "\
2025-11-10,Catering order,1500.00,income,Sales
2025-11-11,Flour,3.50,expense,Inventory
";

        let tmp = write_temp_csv(csv_data);
        let result = import_transactions(&mut store, ImportFormat::Csv, tmp.path());

        assert_eq!(result.unwrap(), 2);
        assert_eq!(store.len(), 2);
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_import_csv_invalid_data_adds_nothing() {
        let mut store = create_test_store();
        let csv_data = "\
2025-11-10,Catering order,1500.00,income,Sales
bad-date,Flour,3.50,expense,Inventory
";

        let tmp = write_temp_csv(csv_data);
        let result = import_transactions(&mut store, ImportFormat::Csv, tmp.path());

        let error = result.unwrap_err().to_string();
        assert!(error.contains("Line 2"));
        assert!(error.contains("Invalid date"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_import_csv_wrong_column_count() {
        let mut store = create_test_store();
        let tmp = write_temp_csv("2025-11-10,Catering order,1500.00\n");

        let result = import_transactions(&mut store, ImportFormat::Csv, tmp.path());

        assert!(matches!(result, Err(ImportError::ColumnCount { line: 1, got: 3 })));
    }

    #[test]
    fn test_import_nonexistent_file() {
        let mut store = create_test_store();
        let result = import_transactions(&mut store, ImportFormat::Csv, Path::new("nonexistent.csv"));

        assert!(result.unwrap_err().to_string().contains("Failed to open file"));
    }
}
