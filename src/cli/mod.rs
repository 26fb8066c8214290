pub mod backup;
pub mod clear;
pub mod companies;
pub mod expenses;
pub mod export;
pub mod init;
pub mod status;
pub mod summary;
pub mod theme;

use std::io::Write;

use clap::{Parser, Subcommand};

use crate::calendar::MonthBucket;
use crate::error::{ContasError, Result};
use crate::models::{ExpenseCategory, Theme};
use crate::settings::get_db_path;
use crate::storage::SqliteStorage;
use crate::store::RecordStore;

pub(crate) fn open_store() -> Result<RecordStore<SqliteStorage>> {
    let db_path = get_db_path();
    if !db_path.exists() {
        return Err(ContasError::Settings(format!(
            "No database found at {}\nRun `contas init` to set up.",
            db_path.display()
        )));
    }
    Ok(RecordStore::new(SqliteStorage::open(&db_path)?))
}

/// Ask a yes/no question on stdin. Anything but y/yes counts as no.
pub(crate) fn confirm(question: &str) -> bool {
    print!("{question} [y/N]: ");
    std::io::stdout().flush().ok();
    let mut input = String::new();
    if std::io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

fn parse_amount_arg(s: &str) -> std::result::Result<f64, String> {
    crate::fmt::parse_amount(s).map_err(|e| e.to_string())
}

fn parse_month_arg(s: &str) -> std::result::Result<MonthBucket, String> {
    MonthBucket::parse(s).map_err(|e| e.to_string())
}

fn parse_category_arg(s: &str) -> std::result::Result<ExpenseCategory, String> {
    s.parse().map_err(|e: ContasError| e.to_string())
}

fn parse_theme_arg(s: &str) -> std::result::Result<Theme, String> {
    s.parse().map_err(|e: ContasError| e.to_string())
}

#[derive(Parser)]
#[command(name = "contas", about = "Plan next month's bills against your salaries.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up contas: choose a data directory and create the database.
    Init {
        /// Path for contas data (default: ~/Documents/contas)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Show the data directory and record counts.
    Status,
    /// Manage companies (income sources).
    Companies {
        #[command(subcommand)]
        command: CompaniesCommands,
    },
    /// Manage monthly expenses.
    Expenses {
        #[command(subcommand)]
        command: ExpensesCommands,
    },
    /// Income, spending and payment progress for a month (default: next month).
    Summary {
        /// Month: YYYY-MM
        #[arg(long, value_parser = parse_month_arg)]
        month: Option<MonthBucket>,
    },
    /// Show or change the colour theme.
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },
    /// Delete all companies and expenses. The theme is kept.
    Clear {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Back up the database.
    Backup {
        /// Output path (default: <data_dir>/backups/contas-YYYYMMDD-HHMMSS.db)
        #[arg(long)]
        output: Option<String>,
    },
    /// Export records to CSV.
    Export {
        #[command(subcommand)]
        command: ExportCommands,
    },
}

#[derive(Subcommand)]
pub enum CompaniesCommands {
    /// Add a company.
    Add {
        /// Company name
        name: String,
        /// Monthly salary, e.g. 3500 or 3.500,00
        #[arg(long, value_parser = parse_amount_arg)]
        salary: f64,
        /// Meal voucher (VR) amount
        #[arg(long, value_parser = parse_amount_arg)]
        vr: Option<f64>,
        /// Transport allowance amount
        #[arg(long, value_parser = parse_amount_arg)]
        transport: Option<f64>,
    },
    /// List companies and total income.
    List,
    /// Change an existing company.
    Edit {
        /// Company ID (shown in `contas companies list`)
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_amount_arg)]
        salary: Option<f64>,
        #[arg(long, value_parser = parse_amount_arg, conflicts_with = "no_vr")]
        vr: Option<f64>,
        /// Turn the meal voucher off
        #[arg(long = "no-vr")]
        no_vr: bool,
        #[arg(long, value_parser = parse_amount_arg, conflicts_with = "no_transport")]
        transport: Option<f64>,
        /// Turn the transport allowance off
        #[arg(long = "no-transport")]
        no_transport: bool,
    },
    /// Remove a company.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ExpensesCommands {
    /// Add an expense to a month (default: next month).
    Add {
        /// Expense name
        name: String,
        /// Amount, e.g. 120.50 or 1.200,50
        #[arg(long, value_parser = parse_amount_arg)]
        amount: f64,
        /// moradia, alimentacao, transporte, saude, educacao, lazer, servicos, outros
        #[arg(long, value_parser = parse_category_arg, default_value = "outros")]
        category: ExpenseCategory,
        /// Month: YYYY-MM
        #[arg(long, value_parser = parse_month_arg)]
        month: Option<MonthBucket>,
    },
    /// List expenses for a month (default: next month).
    List {
        /// Month: YYYY-MM
        #[arg(long, value_parser = parse_month_arg, conflicts_with = "all")]
        month: Option<MonthBucket>,
        /// List every stored expense
        #[arg(long)]
        all: bool,
    },
    /// Change an existing expense. Its month and paid state are kept.
    Edit {
        /// Expense ID (shown in `contas expenses list`)
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long, value_parser = parse_amount_arg)]
        amount: Option<f64>,
        #[arg(long, value_parser = parse_category_arg)]
        category: Option<ExpenseCategory>,
    },
    /// Mark an expense paid, or unpaid if it already was.
    Pay { id: String },
    /// Remove an expense.
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// Print the current theme.
    Show,
    /// Set the theme: dark or light.
    Set {
        #[arg(value_parser = parse_theme_arg)]
        theme: Theme,
    },
    /// Switch between dark and light.
    Toggle,
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// Export companies to CSV.
    Companies {
        /// Output file path (default: <data_dir>/exports/companies-YYYY-MM-DD.csv)
        #[arg(long)]
        output: Option<String>,
    },
    /// Export expenses to CSV.
    Expenses {
        /// Only this month: YYYY-MM
        #[arg(long, value_parser = parse_month_arg)]
        month: Option<MonthBucket>,
        #[arg(long)]
        output: Option<String>,
    },
}
