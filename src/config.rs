use clap::{Args, ValueEnum};
use std::path::PathBuf;

use crate::db::file_storage::FileStorage;
use crate::db::repository::DEFAULT_SLOT;
use crate::db::sqlite_storage::SqliteStorage;
use crate::db::storage::{MemoryStorage, Storage};
use crate::error::StorageError;

const SQLITE_FILE_NAME: &str = "tally.db";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackend {
    /// One JSON file per slot inside the data directory.
    Json,
    /// A SQLite database inside the data directory.
    Sqlite,
    /// Nothing is written; useful with `shell`.
    Memory,
}

/// Where transactions are kept. Every option can also come from the
/// environment.
#[derive(Debug, Clone, PartialEq, Eq, Args)]
pub struct AppConfig {
    /// Storage backend for the transaction slot.
    #[arg(long, value_enum, env = "TALLY_BACKEND", default_value_t = StorageBackend::Json)]
    pub backend: StorageBackend,

    /// Directory holding the data files.
    #[arg(long, env = "TALLY_DATA_PATH", default_value = "tally-data")]
    pub data_path: PathBuf,

    /// Name of the slot holding the transactions.
    #[arg(long, env = "TALLY_SLOT", default_value = DEFAULT_SLOT)]
    pub slot: String,
}

impl AppConfig {
    pub fn open_storage(&self) -> Result<Box<dyn Storage>, StorageError> {
        let storage: Box<dyn Storage> = match self.backend {
            StorageBackend::Json => Box::new(FileStorage::open(&self.data_path)?),
            StorageBackend::Sqlite => {
                std::fs::create_dir_all(&self.data_path)?;
                Box::new(SqliteStorage::open(&self.data_path.join(SQLITE_FILE_NAME))?)
            }
            StorageBackend::Memory => Box::new(MemoryStorage::new()),
        };
        tracing::debug!("Opened {:?} storage at {}", self.backend, self.data_path.display());
        Ok(storage)
    }
}
