//! Database access layer with connection pooling and migrations
//!
//! This module is organized by domain:
//! - `categories` - Category CRUD
//! - `expenses` - Expense CRUD
//! - `aggregates` - Monthly and current-month aggregation queries
//! - `alerts` - Budget alert persistence and read-state
//! - `insights` - Monthly spending insight snapshots

use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use tracing::info;

use crate::error::Result;

mod aggregates;
mod alerts;
mod categories;
mod expenses;
mod insights;

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConn = PooledConnection<SqliteConnectionManager>;

/// Parse a SQLite datetime string into a DateTime<Utc>
///
/// SQLite stores timestamps as "YYYY-MM-DD HH:MM:SS".
pub(crate) fn parse_datetime(s: &str) -> DateTime<Utc> {
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.and_utc())
        .unwrap_or_else(|_| Utc::now())
}

/// Database wrapper with connection pooling
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    /// Path to the database file
    db_path: String,
}

impl Database {
    /// Create a new database connection pool and run migrations
    pub fn new(path: &str) -> Result<Self> {
        let manager = SqliteConnectionManager::file(path).with_init(|conn| {
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            Ok(())
        });
        let pool = Pool::builder().max_size(10).build(manager)?;

        let db = Self {
            pool,
            db_path: path.to_string(),
        };
        db.run_migrations()?;

        Ok(db)
    }

    /// Get the path to the database file
    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Create a throwaway database for testing
    ///
    /// Uses a temporary file rather than `:memory:` so every pooled
    /// connection sees the same database.
    pub fn in_memory() -> Result<Self> {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let id = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!("spendwise_test_{}_{}.db", std::process::id(), id));

        let _ = std::fs::remove_file(&path);

        Self::new(path.to_str().unwrap_or("spendwise_test.db"))
    }

    /// Get a connection from the pool
    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Run database migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.conn()?;

        conn.execute_batch(
            r#"
            -- Enable foreign keys (also set per-connection by the pool init)
            PRAGMA foreign_keys = ON;

            -- WAL mode: readers don't block writers
            PRAGMA journal_mode = WAL;

            -- ~8MB cache
            PRAGMA cache_size = 2000;

            -- Balance of safety and performance
            PRAGMA synchronous = NORMAL;

            PRAGMA temp_store = MEMORY;

            -- Categories (user-defined, budget and priority drive all analysis)
            CREATE TABLE IF NOT EXISTS categories (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                name TEXT NOT NULL,
                color TEXT,
                icon TEXT,
                budget REAL CHECK (budget IS NULL OR budget > 0),
                priority TEXT NOT NULL DEFAULT 'moderate',
                alert_threshold INTEGER NOT NULL DEFAULT 80,
                alert_enabled BOOLEAN NOT NULL DEFAULT TRUE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_categories_user ON categories(user_id);

            -- Expenses (category is nullable: deleting a category orphans
            -- its expenses into the uncategorized bucket)
            CREATE TABLE IF NOT EXISTS expenses (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                expense_date DATE NOT NULL,
                description TEXT,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_expenses_user_date ON expenses(user_id, expense_date);
            CREATE INDEX IF NOT EXISTS idx_expenses_category ON expenses(category_id);

            -- Budget alerts (at most one per user/category/type/calendar month,
            -- enforced by a pre-insert existence check)
            CREATE TABLE IF NOT EXISTS budget_alerts (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
                alert_type TEXT NOT NULL,
                current_amount REAL NOT NULL,
                budget_amount REAL NOT NULL,
                percentage_used REAL NOT NULL,
                message TEXT NOT NULL,
                is_read BOOLEAN NOT NULL DEFAULT FALSE,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            );

            CREATE INDEX IF NOT EXISTS idx_budget_alerts_user ON budget_alerts(user_id, created_at);
            CREATE INDEX IF NOT EXISTS idx_budget_alerts_read ON budget_alerts(user_id, is_read);

            -- Monthly spending insight snapshots, upserted per user-month
            CREATE TABLE IF NOT EXISTS spending_insights (
                id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                month INTEGER NOT NULL,
                year INTEGER NOT NULL,
                total_spent REAL NOT NULL,
                essential_spent REAL NOT NULL,
                moderate_spent REAL NOT NULL,
                discretionary_spent REAL NOT NULL,
                savings_potential REAL NOT NULL,
                recommendations TEXT NOT NULL,
                generated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
                UNIQUE(user_id, month, year)
            );
            "#,
        )?;

        info!("Database schema initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_idempotent() {
        let db = Database::in_memory().unwrap();
        // A second run against the same file must not fail
        db.run_migrations().unwrap();
    }

    #[test]
    fn test_parse_datetime_roundtrip() {
        let dt = parse_datetime("2026-03-15 10:30:00");
        assert_eq!(dt.format("%Y-%m-%d %H:%M:%S").to_string(), "2026-03-15 10:30:00");
    }

    #[test]
    fn test_reopen_preserves_data() {
        use crate::models::{CategoryPriority, NewCategory};

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spendwise.db");
        let path_str = path.to_str().unwrap();

        {
            let db = Database::new(path_str).unwrap();
            db.create_category(
                1,
                &NewCategory {
                    name: "Dining".to_string(),
                    color: None,
                    icon: None,
                    budget: None,
                    priority: CategoryPriority::Moderate,
                    alert_threshold: 80,
                    alert_enabled: true,
                },
            )
            .unwrap();
        }

        let db = Database::new(path_str).unwrap();
        assert_eq!(db.list_categories(1).unwrap().len(), 1);
    }

    #[test]
    fn test_budget_check_constraint() {
        let db = Database::in_memory().unwrap();
        let conn = db.conn().unwrap();
        let result = conn.execute(
            "INSERT INTO categories (user_id, name, budget) VALUES (1, 'Bad', -5.0)",
            [],
        );
        assert!(result.is_err());
    }
}
