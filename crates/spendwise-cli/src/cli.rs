//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Spendwise - Track expenses and surface spending insights
#[derive(Parser)]
#[command(name = "spendwise")]
#[command(about = "Personal finance tracker with spending analysis", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "spendwise.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Run the spending analysis and print suggestions
    Suggest {
        /// User to analyze
        #[arg(short, long, default_value = "1")]
        user: i64,

        /// Print the raw report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check budgets and record any newly-crossed thresholds
    Check {
        /// User to check
        #[arg(short, long, default_value = "1")]
        user: i64,
    },

    /// List stored budget alerts
    Alerts {
        /// User whose alerts to list
        #[arg(short, long, default_value = "1")]
        user: i64,

        /// Include alerts already marked read
        #[arg(long)]
        all: bool,
    },

    /// Generate and print this month's spending insight snapshot
    Insights {
        /// User to snapshot
        #[arg(short, long, default_value = "1")]
        user: i64,
    },

    /// Show database status
    Status,
}
