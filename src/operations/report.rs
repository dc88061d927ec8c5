//! Totals and chart-ready series computed from a transaction snapshot.
//!
//! Everything here is a pure function of its input and is re-run after
//! each change to the store.

use chrono::{Datelike, Days, NaiveDate};
use num_format::{Locale, ToFormattedString};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal::prelude::ToPrimitive;
use std::collections::{BTreeMap, HashMap};

use crate::models::summary::{CategoryEntry, DailyEntry, MonthlyEntry, Totals, TransactionSummary};
use crate::models::transaction::{Transaction, TransactionType};

pub const DEFAULT_WINDOW_DAYS: u32 = 7;
/// Longest daily window, about ten years.
pub const MAX_WINDOW_DAYS: u32 = 3660;

pub fn totals(transactions: &[Transaction]) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expenses = Decimal::ZERO;
    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => income = income.saturating_add(transaction.amount),
            TransactionType::Expense => expenses = expenses.saturating_add(transaction.amount),
        }
    }
    Totals {
        income,
        expenses,
        profit: income.saturating_sub(expenses),
    }
}

/// Net amount per calendar month, oldest first. Months without
/// transactions are left out.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyEntry> {
    let mut months: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for transaction in transactions {
        let entry = months
            .entry(month_start(transaction.date))
            .or_insert(Decimal::ZERO);
        *entry = entry.saturating_add(transaction.signed_amount());
    }

    months
        .into_iter()
        .map(|(period_start, net_amount)| MonthlyEntry {
            period_start,
            label: period_start.format("%b %Y").to_string(),
            net_amount,
        })
        .collect()
}

/// One entry per day for the `window_days` days ending on `today`,
/// oldest first. Days without transactions are zero.
///
/// Windows longer than [`MAX_WINDOW_DAYS`] are shortened to it. A window
/// reaching before the earliest representable date is empty.
pub fn daily_series(transactions: &[Transaction], window_days: u32, today: NaiveDate) -> Vec<DailyEntry> {
    let window_days = window_days.min(MAX_WINDOW_DAYS);
    if window_days == 0 {
        return Vec::new();
    }
    let Some(start_date) = today.checked_sub_days(Days::new(u64::from(window_days - 1))) else {
        return Vec::new();
    };

    let mut days: Vec<DailyEntry> = (0..u64::from(window_days))
        .filter_map(|offset| start_date.checked_add_days(Days::new(offset)))
        .map(|date| {
            DailyEntry {
                date,
                label: format!("{} {}/{}", date.format("%a"), date.month(), date.day()),
                income: Decimal::ZERO,
                expenses: Decimal::ZERO,
                profit: Decimal::ZERO,
            }
        })
        .collect();

    for transaction in transactions {
        if transaction.date < start_date || transaction.date > today {
            continue;
        }
        let idx = (transaction.date - start_date).num_days() as usize;
        let day = &mut days[idx];
        match transaction.transaction_type {
            TransactionType::Income => day.income = day.income.saturating_add(transaction.amount),
            TransactionType::Expense => day.expenses = day.expenses.saturating_add(transaction.amount),
        }
    }

    for day in &mut days {
        day.profit = day.income.saturating_sub(day.expenses);
    }
    days
}

/// Amount and count per (kind, category), largest amount first.
///
/// The same label under income and expense gives two entries. Equal
/// amounts are ordered by category, then kind.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryEntry> {
    let mut groups: HashMap<(TransactionType, &str), (Decimal, usize)> = HashMap::new();
    for transaction in transactions {
        let entry = groups
            .entry((transaction.transaction_type, transaction.category.as_str()))
            .or_insert((Decimal::ZERO, 0));
        entry.0 = entry.0.saturating_add(transaction.amount);
        entry.1 += 1;
    }

    let mut breakdown: Vec<CategoryEntry> = groups
        .into_iter()
        .map(|((transaction_type, category), (amount, count))| CategoryEntry {
            category: category.to_string(),
            transaction_type,
            amount,
            count,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.amount
            .cmp(&a.amount)
            .then_with(|| a.category.cmp(&b.category))
            .then_with(|| a.transaction_type.cmp(&b.transaction_type))
    });
    breakdown
}

pub fn summarize(transactions: &[Transaction]) -> TransactionSummary {
    TransactionSummary {
        totals: totals(transactions),
        monthly: monthly_series(transactions),
    }
}

/// Formats an amount as US dollars, e.g. `$1,234.50` or `-$40.00`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let whole = rounded.trunc().to_u128().unwrap_or(0);
    let cents = ((rounded - rounded.trunc()) * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or(0);
    let sign = if amount.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{}${}.{:02}", sign, whole.to_formatted_string(&Locale::en), cents)
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}
