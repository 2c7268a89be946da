//! Core command implementations and shared utilities

use std::path::Path;

use anyhow::{Context, Result};
use spendwise_core::db::Database;

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    tracing::debug!("opening database at {}", path_str);
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path)?;

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Start the web UI: spendwise serve");
    println!("  2. Run an analysis: spendwise suggest --user 1");

    Ok(())
}
