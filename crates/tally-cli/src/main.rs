//! Tally CLI - Personal income/expense tracker
//!
//! Usage:
//!   tally init                        Initialize database
//!   tally add --type expense -a 12 -c Food
//!   tally import --file statement.csv Import transactions
//!   tally report monthly --month 2024-05
//!   tally insights                    Anomalies, recurring payments, suggestions

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact().with_writer(std::io::stderr))
        .init();

    let now = commands::now();
    let json = cli.json;

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Add {
            tx_type,
            amount,
            category,
            description,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(
                &db,
                &tx_type,
                amount,
                &category,
                description.as_deref(),
                date.as_deref(),
                now,
            )
        }
        Commands::Edit {
            id,
            tx_type,
            amount,
            category,
            description,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            let changes = commands::TransactionEdit {
                tx_type,
                amount,
                category,
                description,
                date,
            };
            commands::cmd_edit(&db, id, changes, now)
        }
        Commands::Delete { ids } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_delete(&db, &ids)
        }
        Commands::Recategorize { category, ids } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_recategorize(&db, &ids, &category)
        }
        Commands::List(args) => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(&db, &args, now, json)
        }
        Commands::Import { file } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_import(&db, &file, now).map(|_| ())
        }
        Commands::Budget { action } => {
            let db = commands::open_db(&cli.db)?;
            match action {
                BudgetAction::Set {
                    category,
                    amount,
                    month,
                } => commands::cmd_budget_set(&db, &category, amount, month.as_deref(), now),
                BudgetAction::List { month } => {
                    let config = commands::load_config(cli.config.as_deref())?;
                    commands::cmd_budget_list(&db, &config, month.as_deref(), now, json)
                }
                BudgetAction::Delete { id } => commands::cmd_budget_delete(&db, id),
            }
        }
        Commands::Report { report } => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            match report {
                ReportType::Monthly { month } => {
                    commands::cmd_report_monthly(&db, &config, month.as_deref(), now, json)
                }
                ReportType::Categories { month, tx_type } => {
                    commands::cmd_report_categories(&db, month.as_deref(), &tx_type, now, json)
                }
                ReportType::Totals { month } => {
                    commands::cmd_report_totals(&db, month.as_deref(), now, json)
                }
                ReportType::Trend { months } => {
                    let months = months.unwrap_or(config.report.trend_months);
                    commands::cmd_report_trend(&db, months, now, json)
                }
                ReportType::Cashflow { month } => {
                    commands::cmd_report_cashflow(&db, month.as_deref(), now, json)
                }
            }
        }
        Commands::Insights { month } => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_insights(&db, config, month.as_deref(), now, json).map(|_| ())
        }
        Commands::Alerts { month } => {
            let db = commands::open_db(&cli.db)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_alerts(&db, &config, month.as_deref(), now, json)
        }
    }
}
