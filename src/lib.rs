//! Income and expense tracking for a small business: a transaction store
//! persisted to a key-value slot, pure aggregation for reports, and capture
//! adapters that pre-fill drafts from voice transcripts and receipt photos.

pub mod capture;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod operations;
pub mod shell;
