use super::transaction::TransactionType;

const INCOME_CATEGORIES: &[&str] = &["Sales", "Services", "Refunds", "Investments", "Other"];
const EXPENSE_CATEGORIES: &[&str] = &[
    "Inventory",
    "Rent",
    "Utilities",
    "Salary",
    "Equipment",
    "Marketing",
    "Other",
];

/// Categories offered for a kind. Any other label is still accepted.
pub fn suggested_categories(transaction_type: TransactionType) -> &'static [&'static str] {
    match transaction_type {
        TransactionType::Income => INCOME_CATEGORIES,
        TransactionType::Expense => EXPENSE_CATEGORIES,
    }
}
