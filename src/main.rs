use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use tally::capture::photo::CapturedFile;
use tally::config::AppConfig;
use tally::db::repository::TransactionStore;
use tally::db::storage::Storage;
use tally::models::category::suggested_categories;
use tally::models::transaction::{PartialDraft, TransactionDraft, TransactionType};
use tally::operations::add::{attach_photo, draft_from_transcript};
use tally::operations::import::{ImportFormat, import_transactions};
use tally::operations::list::{SortOrder, TransactionFilter, list_transactions};
use tally::operations::quick_add::{QUICK_ACTIONS, find_quick_action};
use tally::operations::remove::remove_transaction;
use tally::operations::report::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS, format_currency};
use tally::shell::{format_transaction_line, run_shell, write_summary, write_transactions};

/// Track income and expenses for a small business.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a transaction.
    Add {
        /// income or expense
        transaction_type: String,
        amount: String,
        description: String,
        category: String,
        /// YYYY-MM-DD, defaults to today.
        #[arg(long)]
        date: Option<String>,
        /// Receipt image to attach.
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Record a transaction from a spoken sentence, e.g. "spent $40 on supplies".
    Voice {
        transcript: String,
        #[arg(long)]
        category: String,
        /// Overrides the amount found in the transcript.
        #[arg(long)]
        amount: Option<String>,
        /// Overrides the kind found in the transcript.
        #[arg(long = "type")]
        transaction_type: Option<TransactionType>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Record one of the preset transactions, or list them.
    Quick {
        name: Option<String>,
        amount: Option<String>,
    },
    /// Delete a transaction by ID.
    Remove { id: String },
    /// Show transactions, newest first.
    List {
        #[arg(long = "type")]
        transaction_type: Option<TransactionType>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        oldest: bool,
    },
    /// Show transactions of one category.
    Search { category: String },
    /// Totals, daily, monthly and category breakdowns.
    Summary {
        #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS)))]
        days: u32,
    },
    /// Import a headerless CSV of date,description,amount,type,category rows.
    Import { path: PathBuf },
    /// Suggested categories for a kind.
    Categories { transaction_type: TransactionType },
    /// Interactive mode.
    Shell {
        #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS, value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_WINDOW_DAYS)))]
        days: u32,
    },
}

fn main() -> ExitCode {
    setup_logging();
    let cli = Cli::parse();

    let storage = match cli.config.open_storage() {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Could not open storage: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let mut store = TransactionStore::open(storage, cli.config.slot.clone());

    let result = run(&mut store, cli.command, Local::now().date_naive());
    if let Some(e) = store.persistence_warning() {
        eprintln!("Warning: changes were not saved: {}", e);
    }
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_filter(filter),
        )
        .init();
}

fn run<S: Storage>(store: &mut TransactionStore<S>, command: Command, today: NaiveDate) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Add {
            transaction_type,
            amount,
            description,
            category,
            date,
            photo,
        } => {
            let mut draft = TransactionDraft::dated(today);
            draft.apply(PartialDraft {
                amount: Some(amount),
                description: Some(description),
                category: Some(category),
                date,
                ..PartialDraft::default()
            });
            draft.transaction_type = transaction_type;
            if let Some(path) = photo {
                attach_photo(&mut draft, &CapturedFile::from_path(&path)?)?;
            }
            let transaction = store.add(&draft)?;
            println!("Transaction added successfully!");
            println!("{}", format_transaction_line(&transaction));
        }
        Command::Voice {
            transcript,
            category,
            amount,
            transaction_type,
            photo,
        } => {
            let mut draft = draft_from_transcript(&transcript, today);
            draft.apply(PartialDraft {
                transaction_type,
                amount,
                category: Some(category),
                ..PartialDraft::default()
            });
            if let Some(path) = photo {
                attach_photo(&mut draft, &CapturedFile::from_path(&path)?)?;
            }
            let transaction = store.add(&draft)?;
            println!("{}", format_transaction_line(&transaction));
        }
        Command::Quick { name: None, .. } => {
            for action in QUICK_ACTIONS {
                let amount = action
                    .fixed_amount()
                    .map(format_currency)
                    .unwrap_or_else(|| "<amount>".to_string());
                println!("{:<10} {:<7} {:<15} {:<20} {}", action.name, action.transaction_type, action.category, action.description, amount);
            }
        }
        Command::Quick {
            name: Some(name),
            amount,
        } => {
            let action = find_quick_action(&name).ok_or_else(|| format!("Unknown quick action '{}'", name))?;
            let draft = action.draft(amount.as_deref(), today)?;
            let transaction = store.add(&draft)?;
            println!("{}", format_transaction_line(&transaction));
        }
        Command::Remove { id } => {
            if remove_transaction(store, &id)? {
                println!("Transaction removed successfully.");
            } else {
                println!("No transaction with ID {} found.", id.trim());
            }
        }
        Command::List {
            transaction_type,
            category,
            oldest,
        } => {
            let filter = TransactionFilter {
                transaction_type,
                category,
            };
            let order = if oldest { SortOrder::Oldest } else { SortOrder::Newest };
            let list = list_transactions(store.transactions(), &filter, order);
            write_transactions(&mut io::stdout(), &list)?;
        }
        Command::Search { category } => {
            let filter = TransactionFilter {
                category: Some(category.clone()),
                ..TransactionFilter::default()
            };
            let results = list_transactions(store.transactions(), &filter, SortOrder::Newest);
            if results.is_empty() {
                println!("No transactions found for category: {}", category);
            } else {
                write_transactions(&mut io::stdout(), &results)?;
            }
        }
        Command::Summary { days } => {
            write_summary(&mut io::stdout(), store.transactions(), days, today)?;
        }
        Command::Import { path } => {
            let count = import_transactions(store, ImportFormat::Csv, &path)?;
            println!("Successfully imported {} transactions.", count);
        }
        Command::Categories { transaction_type } => {
            for category in suggested_categories(transaction_type) {
                println!("{}", category);
            }
        }
        Command::Shell { days } => {
            let stdin = io::stdin();
            run_shell(store, stdin.lock(), io::stdout(), days, today)?;
        }
    }
    Ok(())
}
