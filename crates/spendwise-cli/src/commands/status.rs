//! Status and alert listing command implementations

use std::path::Path;

use anyhow::Result;
use spendwise_core::db::Database;

use super::open_db;

pub fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Spendwise Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }

        match open_db(db_path) {
            Ok(db) => {
                let conn = db.conn()?;
                let categories: i64 =
                    conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
                let expenses: i64 =
                    conn.query_row("SELECT COUNT(*) FROM expenses", [], |r| r.get(0))?;
                let alerts: i64 =
                    conn.query_row("SELECT COUNT(*) FROM budget_alerts", [], |r| r.get(0))?;

                println!();
                println!("   Categories: {}", categories);
                println!("   Expenses: {}", expenses);
                println!("   Budget alerts: {}", alerts);
            }
            Err(e) => {
                println!();
                println!("   ❌ Error opening database: {}", e);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    println!();
    Ok(())
}

pub fn cmd_alerts(db: &Database, user_id: i64, all: bool) -> Result<()> {
    let alerts = db.list_budget_alerts(user_id, !all)?;

    if alerts.is_empty() {
        if all {
            println!("No budget alerts recorded");
        } else {
            println!("No unread budget alerts (use --all to include read ones)");
        }
        return Ok(());
    }

    let unread = db.count_unread_alerts(user_id)?;

    println!();
    println!("🚨 Budget Alerts (user {}, {} unread)", user_id, unread);
    println!("   ─────────────────────────────────────────────────────────────");
    for alert in &alerts {
        let marker = if alert.is_read { " " } else { "*" };
        println!(
            "   {}{:>4}  {:<10} {:<18} {}",
            marker,
            alert.id,
            alert.alert_type,
            super::truncate(&alert.category_name, 18),
            super::truncate(&alert.message, 60)
        );
    }
    println!();

    Ok(())
}
