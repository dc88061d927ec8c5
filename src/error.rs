//! Error types for draft validation, capture adapters, storage and imports.
//!
//! None of these are fatal: validation and capture errors are shown to the
//! user, storage errors only cost durability.

/// A draft was rejected before reaching the store.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum ValidationError {
    /// A required field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Invalid amount format {0}. Please provide a valid decimal number.")]
    InvalidAmount(String),

    #[error("Amount cannot be negative")]
    NegativeAmount,

    /// More than two decimal places.
    #[error("Amount can have at most 2 decimal places")]
    AmountTooPrecise,

    #[error("Amount must be less than 10,000,000,000,000")]
    AmountTooLarge,

    /// Quick-add presets only accept amounts above zero.
    #[error("Please enter a valid amount")]
    NonPositiveAmount,

    #[error("Invalid transaction type '{0}'. Use 'income' or 'expense'.")]
    InvalidTransactionType(String),

    #[error("Invalid date format '{0}'. Please use YYYY-MM-DD.")]
    InvalidDate(String),

    #[error("Description too long")]
    DescriptionTooLong,

    #[error("Category too long")]
    CategoryTooLong,

    /// Comma separated input did not have the expected number of fields.
    #[error("Invalid number of details provided. Expected {expected} details separated by commas but got {got}")]
    FieldCount { expected: usize, got: usize },

    #[error("Transaction ID cannot be empty.")]
    EmptyId,
}

/// Errors raised by the voice and photo capture adapters.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum CaptureError {
    #[error("Speech recognition not supported in this environment.")]
    SpeechUnsupported,

    /// The recognizer reported a failure, e.g. permission denied.
    #[error("Speech recognition error: {0}")]
    Recognition(String),

    #[error("Please select an image file.")]
    NotAnImage,

    #[error("Error reading the file: {0}")]
    ReadFailed(String),
}

/// Reading or writing a persistent slot failed.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("an unexpected SQL error occurred: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("could not serialize transactions as JSON: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Slot names end up in file names, so path separators are refused.
    #[error("invalid slot name \"{0}\"")]
    InvalidSlot(String),
}

/// A CSV import was aborted. Nothing is added when this is returned.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to open file '{path}': {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV parse error on line {line}: {source}")]
    Csv { line: usize, source: csv::Error },

    #[error("Invalid number of columns on line {line}: expected 5, got {got}")]
    ColumnCount { line: usize, got: usize },

    #[error("Line {line}: {source}")]
    InvalidRow {
        line: usize,
        source: ValidationError,
    },
}
