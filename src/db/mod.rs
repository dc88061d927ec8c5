pub mod connection;
pub mod file_storage;
pub mod repository;
pub mod sqlite_storage;
pub mod storage;
