pub mod category;
pub mod summary;
pub mod transaction;
