//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track income, expenses and monthly budgets
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Personal income/expense tracker with budgets and insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// Analytics config file (defaults to the data dir override, then built-in values)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print reports as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Record a transaction
    Add {
        /// income or expense
        #[arg(long = "type", value_name = "TYPE")]
        tx_type: String,

        #[arg(short, long)]
        amount: f64,

        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        description: Option<String>,

        /// YYYY-MM-DD or "YYYY-MM-DD HH:MM:SS" (defaults to now)
        #[arg(long)]
        date: Option<String>,
    },

    /// Replace a transaction; omitted fields keep their current value
    Edit {
        id: i64,

        #[arg(long = "type", value_name = "TYPE")]
        tx_type: Option<String>,

        #[arg(short, long)]
        amount: Option<f64>,

        #[arg(short, long)]
        category: Option<String>,

        /// New description (pass an empty string to clear it)
        #[arg(short, long)]
        description: Option<String>,

        #[arg(long)]
        date: Option<String>,
    },

    /// Delete one or more transactions
    Delete {
        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// Move transactions to another category
    Recategorize {
        #[arg(short, long)]
        category: String,

        #[arg(required = true)]
        ids: Vec<i64>,
    },

    /// List transactions, newest first
    List(ListArgs),

    /// Import transactions from CSV (date,type,amount,category,description)
    Import {
        /// CSV file to import
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Manage monthly budgets
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },

    /// Generate reports
    Report {
        #[command(subcommand)]
        report: ReportType,
    },

    /// Anomalies, recurring payments, category suggestions and explanations
    Insights {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Check spending alerts for a month
    Alerts {
        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },
}

#[derive(clap::Args, Default)]
pub struct ListArgs {
    /// income or expense
    #[arg(long = "type", value_name = "TYPE")]
    pub tx_type: Option<String>,

    #[arg(short, long)]
    pub category: Option<String>,

    /// Only this month (YYYY-MM)
    #[arg(short, long)]
    pub month: Option<String>,

    /// Earliest date, inclusive
    #[arg(long)]
    pub from: Option<String>,

    /// Latest date, inclusive
    #[arg(long)]
    pub to: Option<String>,

    #[arg(long)]
    pub min: Option<f64>,

    #[arg(long)]
    pub max: Option<f64>,

    /// Search description and category
    #[arg(short, long)]
    pub search: Option<String>,

    /// Maximum rows to show
    #[arg(short, long, default_value = "50")]
    pub limit: usize,
}

#[derive(Subcommand)]
pub enum BudgetAction {
    /// Create or update the limit for a category
    Set {
        #[arg(short, long)]
        category: String,

        #[arg(short, long)]
        amount: f64,

        /// Month (YYYY-MM, defaults to the current month)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Show budgets with spend and status
    List {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Delete a budget by ID
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Monthly report: budgets, month-over-month changes and totals
    Monthly {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Per-category totals
    Categories {
        #[arg(short, long)]
        month: Option<String>,

        /// income or expense
        #[arg(long = "type", value_name = "TYPE", default_value = "expense")]
        tx_type: String,
    },

    /// Income, expense and net for a month
    Totals {
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Income and expense over recent months
    Trend {
        /// Number of months (defaults to the configured trend length)
        #[arg(long)]
        months: Option<usize>,
    },

    /// Day-by-day cashflow for a month
    Cashflow {
        #[arg(short, long)]
        month: Option<String>,
    },
}
