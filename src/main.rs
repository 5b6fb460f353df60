use std::fs::OpenOptions;
use std::io;
use std::sync::Arc;

use clap::Parser;
use findash::aggregation::{Dashboard, Metrics, Period, TrendOrder};
use findash::operations::add::{ADD_FORMAT_HINT, add_transaction};
use findash::operations::dashboard::run_dashboard;
use findash::operations::edit::{EDIT_FORMAT_HINT, edit_transaction};
use findash::operations::import::import_transactions;
use findash::operations::remove::remove_transaction;
use findash::operations::search_by_category::search_transactions_by_category;
use findash::sample_data::sample_transactions;
use findash::{Transaction, TransactionStore};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Track income and expenses and see the totals, margin and trends.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Start with a small set of example transactions.
    #[arg(long)]
    demo: bool,

    /// Headerless CSV file (date,description,amount,type,category) to load at startup.
    #[arg(long)]
    import: Option<String>,

    /// Where log output is written. Verbosity is controlled with RUST_LOG.
    #[arg(long, default_value = "findash.log")]
    log_file: String,

    /// How months are ordered in the trend series.
    #[arg(long, value_enum, default_value_t = TrendOrder::Encounter)]
    trend_order: TrendOrder,

    /// Reporting window in days (7, 30, 90) or "all".
    #[arg(long, value_enum, default_value_t = Period::All)]
    period: Period,
}

pub enum UserCommands {
    Add,
    Edit,
    Remove,
    Print,
    Search,
    Import,
    Summary,
    Dashboard,
    Help,
    Exit,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = setup_logging(&args.log_file) {
        eprintln!("Could not open log file '{}': {}", args.log_file, e);
    }

    let mut store = TransactionStore::new();

    if args.demo {
        match store.extend(sample_transactions()) {
            Ok(ids) => println!("Loaded {} example transactions.", ids.len()),
            Err((index, e)) => println!("Could not load example transaction {}: {}", index + 1, e),
        }
    }

    if let Some(ref path) = args.import {
        match import_transactions(&mut store, path) {
            Ok(count) => println!("Imported {} transactions from {}.", count, path),
            Err(e) => println!("Error importing transactions: {}", e),
        }
    }

    println!("Welcome to the financial dashboard!");
    print_metrics(&current_dashboard(&store, &args).metrics);

    loop {
        println!("Please enter a command (add, edit, remove, print, search, import, summary, dashboard, help, exit):");

        let Some(input) = prompt() else { break };
        let parts: Vec<&str> = input.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }
        let Some(command) = check_for_command(parts[0]) else {
            println!("Unknown command '{}'. Type 'help' to see the available commands.", parts[0]);
            continue;
        };

        match command {
            UserCommands::Add => {
                println!("Please enter transaction details in the format:\n{}", ADD_FORMAT_HINT);
                let Some(details) = prompt() else { break };
                match add_transaction(&mut store, &details) {
                    Ok(id) => {
                        println!("Transaction {} added successfully!", id);
                        print_metrics(&current_dashboard(&store, &args).metrics);
                    }
                    Err(e) => {
                        println!("Error adding transaction: {}", e);
                        println!("Please try again.");
                    }
                }
            }
            UserCommands::Edit => {
                println!("Provide the transaction ID to edit:");
                let Some(id) = prompt() else { break };
                println!("Enter the new values as {}:", EDIT_FORMAT_HINT);
                let Some(details) = prompt() else { break };
                match edit_transaction(&mut store, &id, &details) {
                    Ok(updated) => {
                        println!("Transaction updated:");
                        print_transaction(updated);
                        print_metrics(&current_dashboard(&store, &args).metrics);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            UserCommands::Remove => {
                println!("Provide the transaction ID to remove:");
                let Some(id) = prompt() else { break };
                match remove_transaction(&mut store, &id) {
                    Ok(_) => {
                        println!("Transaction removed successfully.");
                        print_metrics(&current_dashboard(&store, &args).metrics);
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            UserCommands::Print => {
                if store.is_empty() {
                    println!("No transactions yet.");
                }
                for transaction in store.all() {
                    print_transaction(transaction);
                }
            }
            UserCommands::Search => {
                println!("Provide the category to search for:");
                let Some(category) = prompt() else { break };
                let transactions = search_transactions_by_category(&category, store.all());
                if transactions.is_empty() {
                    println!("No transactions found for category: {}", category);
                } else {
                    println!("Transactions found for category '{}':", category);
                    for transaction in transactions {
                        print_transaction(transaction);
                    }
                }
            }
            UserCommands::Import => {
                println!("Please enter the CSV file path to import from:");
                let Some(path) = prompt() else { break };
                match import_transactions(&mut store, &path) {
                    Ok(count) => {
                        println!("Successfully imported {} transactions.", count);
                        print_metrics(&current_dashboard(&store, &args).metrics);
                    }
                    Err(e) => println!("Error importing transactions: {}", e),
                }
            }
            UserCommands::Summary => print_summary(&current_dashboard(&store, &args)),
            UserCommands::Dashboard => {
                let today = chrono::Local::now().date_naive();
                if let Err(e) = run_dashboard(store.all(), today, args.period, args.trend_order) {
                    tracing::error!("dashboard failed: {e}");
                    println!("Error: {}", e);
                }
            }
            UserCommands::Help => print_help(),
            UserCommands::Exit => {
                println!("Exiting the application.");
                break;
            }
        }
    }
}

fn setup_logging(log_path: &str) -> io::Result<()> {
    let log_file = OpenOptions::new().create(true).append(true).open(log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry().with(filter).with(file_log).init();
    Ok(())
}

fn current_dashboard(store: &TransactionStore, args: &Args) -> Dashboard {
    let today = chrono::Local::now().date_naive();
    Dashboard::compute(store.all(), args.period, today, args.trend_order)
}

/// Reads one trimmed line, or `None` once stdin is closed.
fn prompt() -> Option<String> {
    match read_user_input() {
        Ok(Some(line)) => Some(line),
        Ok(None) => {
            println!("Input closed, exiting.");
            None
        }
        Err(e) => {
            println!("Error reading input: {}", e);
            None
        }
    }
}

fn read_user_input() -> io::Result<Option<String>> {
    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

fn check_for_command(input: &str) -> Option<UserCommands> {
    match input.to_lowercase().as_str() {
        "add" => Some(UserCommands::Add),
        "edit" => Some(UserCommands::Edit),
        "remove" => Some(UserCommands::Remove),
        "print" => Some(UserCommands::Print),
        "search" => Some(UserCommands::Search),
        "import" => Some(UserCommands::Import),
        "summary" => Some(UserCommands::Summary),
        "dashboard" => Some(UserCommands::Dashboard),
        "help" => Some(UserCommands::Help),
        "exit" | "quit" => Some(UserCommands::Exit),
        _ => None,
    }
}

fn print_help() {
    println!("add        record a new transaction ({})", ADD_FORMAT_HINT);
    println!("edit       change a transaction ({})", EDIT_FORMAT_HINT);
    println!("remove     delete a transaction by ID");
    println!("print      list every transaction");
    println!("search     list the transactions of a category");
    println!("import     load transactions from a CSV file");
    println!("summary    show totals, the monthly trend and category totals");
    println!("dashboard  open the full-screen dashboard");
    println!("exit       quit");
}

fn print_transaction(transaction: &Transaction) {
    println!(
        "{}  {}  {:<7}  {:>12.2}  {:<15}  {}",
        transaction.id,
        transaction.date.format("%Y-%m-%d"),
        transaction.transaction_type,
        transaction.amount,
        transaction.category,
        transaction.description,
    );
}

fn print_metrics(metrics: &Metrics) {
    let outcome = if metrics.is_loss() { "loss" } else { "profit" };
    println!(
        "Income: {:.2} | Expenses: {:.2} | Net {}: {:.2} | Margin: {}%",
        metrics.income, metrics.expense, outcome, metrics.net_profit, metrics.margin_percent
    );
}

fn print_summary(dashboard: &Dashboard) {
    println!(
        "Summary for {} ({} transactions)",
        dashboard.period.label(),
        dashboard.transaction_count
    );
    print_metrics(&dashboard.metrics);

    println!("Monthly trend:");
    if dashboard.monthly_trend.is_empty() {
        println!("  (no data)");
    }
    for point in &dashboard.monthly_trend {
        println!(
            "  {}  income {:>12.2}  expenses {:>12.2}",
            point.period, point.income, point.expense
        );
    }

    println!("By category:");
    if dashboard.categories.is_empty() {
        println!("  (no data)");
    }
    for category in &dashboard.categories {
        println!("  {:<15} {:>12.2}", category.category, category.total);
    }
}
