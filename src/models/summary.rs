use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::transaction::TransactionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub income: Decimal,
    pub expenses: Decimal,
    /// `income - expenses`, negative when running at a loss.
    pub profit: Decimal,
}

/// Net amount for one calendar month that has transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyEntry {
    /// First day of the month.
    pub period_start: NaiveDate,
    /// e.g. `Jan 2024`
    pub label: String,
    pub net_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    pub date: NaiveDate,
    /// e.g. `Mon 1/8`
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub profit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: String,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub count: usize,
}

/// Derived view of a transaction collection, recomputed after every change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionSummary {
    pub totals: Totals,
    pub monthly: Vec<MonthlyEntry>,
}
