//! Interactive command loop and the plain-text views shared with the CLI.

use chrono::NaiveDate;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::db::repository::TransactionStore;
use crate::db::storage::Storage;
use crate::models::transaction::{Transaction, TransactionType};
use crate::operations::add::{add_transaction_from_input, draft_from_transcript};
use crate::operations::import::{ImportFormat, import_transactions};
use crate::operations::list::{SortOrder, TransactionFilter, list_transactions};
use crate::operations::quick_add::{QUICK_ACTIONS, find_quick_action};
use crate::operations::remove::remove_transaction;
use crate::operations::report::{self, format_currency};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommands {
    Add,
    Voice,
    Quick,
    Import,
    Remove,
    Search,
    Print,
    Sort,
    Summary,
    Exit,
    Unknown,
}

pub fn check_for_command(input: &str) -> UserCommands {
    match input {
        "add" => UserCommands::Add,
        "voice" => UserCommands::Voice,
        "quick" => UserCommands::Quick,
        "import" => UserCommands::Import,
        "remove" => UserCommands::Remove,
        "search" => UserCommands::Search,
        "print" => UserCommands::Print,
        "sort" => UserCommands::Sort,
        "summary" => UserCommands::Summary,
        "exit" => UserCommands::Exit,
        _ => UserCommands::Unknown,
    }
}

pub fn format_transaction_line(transaction: &Transaction) -> String {
    let amount = match transaction.transaction_type {
        TransactionType::Income => format!("+{}", format_currency(transaction.amount)),
        TransactionType::Expense => format!("-{}", format_currency(transaction.amount)),
    };
    format!(
        "{}  {:<7}  {:>12}  {:<15}  {}{}  [{}]",
        transaction.date,
        transaction.transaction_type,
        amount,
        transaction.category,
        transaction.description,
        if transaction.image_url.is_some() { " (receipt)" } else { "" },
        transaction.id
    )
}

pub fn write_transactions<W: Write>(out: &mut W, transactions: &[&Transaction]) -> io::Result<()> {
    if transactions.is_empty() {
        writeln!(out, "No transactions yet. Add one to get started!")?;
    }
    for transaction in transactions {
        writeln!(out, "{}", format_transaction_line(transaction))?;
    }
    Ok(())
}

/// Totals, the daily window ending `today`, months and categories.
pub fn write_summary<W: Write>(out: &mut W, transactions: &[Transaction], window_days: u32, today: NaiveDate) -> io::Result<()> {
    let summary = report::summarize(transactions);
    writeln!(out, "Income:   {:>14}", format_currency(summary.totals.income))?;
    writeln!(out, "Expenses: {:>14}", format_currency(summary.totals.expenses))?;
    writeln!(out, "Profit:   {:>14}", format_currency(summary.totals.profit))?;

    writeln!(out, "\nLast {} days:", window_days)?;
    for day in report::daily_series(transactions, window_days, today) {
        writeln!(
            out,
            "  {:<10} {:>12} {:>12} {:>12}",
            day.label,
            format_currency(day.income),
            format_currency(day.expenses),
            format_currency(day.profit)
        )?;
    }

    if !summary.monthly.is_empty() {
        writeln!(out, "\nBy month:")?;
        for month in &summary.monthly {
            writeln!(out, "  {:<10} {:>12}", month.label, format_currency(month.net_amount))?;
        }
    }

    let categories = report::category_breakdown(transactions);
    if !categories.is_empty() {
        writeln!(out, "\nBy category:")?;
        for entry in categories {
            writeln!(
                out,
                "  {:<15} {:<7} {:>12} ({} transactions)",
                entry.category,
                entry.transaction_type,
                format_currency(entry.amount),
                entry.count
            )?;
        }
    }
    Ok(())
}

fn write_persistence_warning<S: Storage, W: Write>(out: &mut W, store: &TransactionStore<S>) -> io::Result<()> {
    if let Some(e) = store.persistence_warning() {
        writeln!(out, "Warning: changes are kept for this session but were not saved: {}", e)?;
    }
    Ok(())
}

fn read_user_input<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Runs the interactive loop until `exit` or end of input.
pub fn run_shell<S: Storage, R: BufRead, W: Write>(
    store: &mut TransactionStore<S>,
    mut input: R,
    mut out: W,
    window_days: u32,
    today: NaiveDate,
) -> io::Result<()> {
    writeln!(out, "Welcome to the transaction manager!")?;
    let mut sort_order = SortOrder::default();

    loop {
        writeln!(out, "Please enter a command (add, voice, quick, import, remove, search, print, sort, summary, exit):")?;
        let Some(line) = read_user_input(&mut input)? else {
            break;
        };
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match check_for_command(parts[0]) {
            UserCommands::Add => {
                writeln!(out, "Add command selected. Please enter transaction details in the format:\ndate(YYYY-MM-DD), description, amount, type(income/expense), category")?;
                let Some(details) = read_user_input(&mut input)? else { break };
                match add_transaction_from_input(store, &details) {
                    Ok(transaction) => writeln!(out, "Transaction {} added successfully!", transaction.id)?,
                    Err(e) => {
                        writeln!(out, "Error adding transaction: {}", e)?;
                        writeln!(out, "Please try again.")?;
                    }
                }
                write_persistence_warning(&mut out, store)?;
            }
            UserCommands::Voice => {
                writeln!(out, "Voice command selected. Say (type) the transaction, e.g. 'spent $40 on supplies':")?;
                let Some(transcript) = read_user_input(&mut input)? else { break };
                let mut draft = draft_from_transcript(&transcript, today);
                writeln!(out, "Category for '{}' ({}):", draft.description, draft.transaction_type)?;
                let Some(category) = read_user_input(&mut input)? else { break };
                draft.category = category;
                match store.add(&draft) {
                    Ok(transaction) => writeln!(out, "Added {}", format_transaction_line(&transaction))?,
                    Err(e) => writeln!(out, "Error adding transaction: {}", e)?,
                }
                write_persistence_warning(&mut out, store)?;
            }
            UserCommands::Quick => {
                let Some(action) = parts.get(1).and_then(|name| find_quick_action(name)) else {
                    let names: Vec<&str> = QUICK_ACTIONS.iter().map(|a| a.name).collect();
                    writeln!(out, "Usage: quick <{}> [amount]", names.join("|"))?;
                    continue;
                };
                match action.draft(parts.get(2).copied(), today).and_then(|draft| store.add(&draft)) {
                    Ok(transaction) => writeln!(out, "Added {}", format_transaction_line(&transaction))?,
                    Err(e) => writeln!(out, "Error adding transaction: {}", e)?,
                }
                write_persistence_warning(&mut out, store)?;
            }
            UserCommands::Import => {
                writeln!(out, "Import command selected. Please enter the file path to import from (only csv for now):")?;
                let Some(path) = read_user_input(&mut input)? else { break };
                match import_transactions(store, ImportFormat::Csv, Path::new(&path)) {
                    Ok(count) => writeln!(out, "Successfully imported {} transactions.", count)?,
                    Err(e) => writeln!(out, "Error importing transactions: {}", e)?,
                }
                write_persistence_warning(&mut out, store)?;
            }
            UserCommands::Remove => {
                writeln!(out, "Remove command selected. Provide the transaction ID to remove:")?;
                let Some(id) = read_user_input(&mut input)? else { break };
                match remove_transaction(store, &id) {
                    Ok(true) => writeln!(out, "Transaction removed successfully.")?,
                    Ok(false) => writeln!(out, "No transaction with ID {} found.", id)?,
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
                write_persistence_warning(&mut out, store)?;
            }
            UserCommands::Search => {
                writeln!(out, "Search command selected. Provide the category to search for:")?;
                let Some(category) = read_user_input(&mut input)? else { break };
                let filter = TransactionFilter {
                    category: Some(category.clone()),
                    ..TransactionFilter::default()
                };
                let results = list_transactions(store.transactions(), &filter, sort_order);
                if results.is_empty() {
                    writeln!(out, "No transactions found for category: {}", category)?;
                } else {
                    writeln!(out, "Transactions found for category '{}':", category)?;
                    write_transactions(&mut out, &results)?;
                }
            }
            UserCommands::Print => {
                writeln!(out, "Current Transactions ({}):", sort_order.label())?;
                let list = list_transactions(store.transactions(), &TransactionFilter::default(), sort_order);
                write_transactions(&mut out, &list)?;
            }
            UserCommands::Sort => {
                sort_order = sort_order.toggle();
                writeln!(out, "Sorting by {}", sort_order.label())?;
            }
            UserCommands::Summary => {
                write_summary(&mut out, store.transactions(), window_days, today)?;
            }
            UserCommands::Exit => {
                writeln!(out, "Exiting the application.")?;
                break;
            }
            UserCommands::Unknown => {
                writeln!(out, "No valid command found.")?;
            }
        }
    }
    Ok(())
}
