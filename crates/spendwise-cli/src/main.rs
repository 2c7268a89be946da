//! Spendwise CLI - Personal finance tracker
//!
//! Usage:
//!   spendwise init                Initialize database
//!   spendwise suggest --user 1    Run the spending analysis
//!   spendwise check --user 1      Check budgets and record alerts
//!   spendwise serve --port 3000   Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
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
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Serve { port, host } => commands::cmd_serve(&cli.db, &host, port).await,
        Commands::Suggest { user, json } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_suggest(&db, user, json)
        }
        Commands::Check { user } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_check(&db, user)
        }
        Commands::Alerts { user, all } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_alerts(&db, user, all)
        }
        Commands::Insights { user } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_insights(&db, user)
        }
        Commands::Status => commands::cmd_status(&cli.db),
    }
}
