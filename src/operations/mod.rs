pub mod add;
pub mod import;
pub mod list;
pub mod quick_add;
pub mod remove;
pub mod report;
pub mod search_by_category;
