//! Aggregation queries feeding the analysis engines
//!
//! These are recomputed on every request; nothing here is cached or
//! persisted. Staleness window = one request.

use chrono::{Months, NaiveDate};
use rusqlite::params;

use super::Database;
use crate::error::Result;
use crate::models::{BudgetStatus, CategoryPriority, CategorySpend, MonthlyAggregate};

impl Database {
    /// Per-category, per-month totals over the trailing three months
    ///
    /// Months in which a category had no expenses are simply absent from
    /// its series (not zero-filled). Rows are ordered per category,
    /// oldest month first, so downstream trend fitting sees the series in
    /// chronological order.
    pub fn monthly_aggregates(&self, user_id: i64, as_of: NaiveDate) -> Result<Vec<MonthlyAggregate>> {
        let window_start = as_of
            .checked_sub_months(Months::new(3))
            .unwrap_or(as_of)
            .format("%Y-%m-%d")
            .to_string();

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT e.category_id,
                   CAST(strftime('%Y', e.expense_date) AS INTEGER) AS year,
                   CAST(strftime('%m', e.expense_date) AS INTEGER) AS month,
                   SUM(e.amount) AS total_spent,
                   COUNT(e.id) AS transaction_count,
                   AVG(e.amount) AS average_transaction
            FROM expenses e
            WHERE e.user_id = ?
              AND e.category_id IS NOT NULL
              AND e.expense_date >= ?
              AND e.expense_date <= ?
            GROUP BY e.category_id, strftime('%Y-%m', e.expense_date)
            ORDER BY e.category_id, strftime('%Y-%m', e.expense_date)
            "#,
        )?;

        let rows = stmt
            .query_map(
                params![user_id, window_start, as_of.format("%Y-%m-%d").to_string()],
                |row| {
                    Ok(MonthlyAggregate {
                        category_id: row.get(0)?,
                        year: row.get(1)?,
                        month: row.get::<_, i64>(2)? as u32,
                        total_spent: row.get(3)?,
                        transaction_count: row.get(4)?,
                        average_transaction: row.get(5)?,
                    })
                },
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Current-calendar-month spend for every category the user owns
    ///
    /// Categories with no expenses this month report zero.
    pub fn current_month_spending(&self, user_id: i64, as_of: NaiveDate) -> Result<Vec<CategorySpend>> {
        let month_key = as_of.format("%Y-%m").to_string();

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.id, c.name, c.budget, COALESCE(SUM(e.amount), 0) AS spent
            FROM categories c
            LEFT JOIN expenses e ON e.category_id = c.id
                AND e.user_id = c.user_id
                AND strftime('%Y-%m', e.expense_date) = ?
            WHERE c.user_id = ?
            GROUP BY c.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![month_key, user_id], |row| {
                Ok(CategorySpend {
                    category_id: row.get(0)?,
                    name: row.get(1)?,
                    budget: row.get(2)?,
                    spent: row.get(3)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Current-month standing of every budget-bearing, alert-enabled category
    pub fn budgeted_category_spend(&self, user_id: i64, as_of: NaiveDate) -> Result<Vec<BudgetStatus>> {
        let month_key = as_of.format("%Y-%m").to_string();

        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.id, c.name, c.budget, c.alert_threshold, c.priority,
                   COALESCE(SUM(e.amount), 0) AS spent
            FROM categories c
            LEFT JOIN expenses e ON e.category_id = c.id
                AND e.user_id = c.user_id
                AND strftime('%Y-%m', e.expense_date) = ?
            WHERE c.user_id = ?
              AND c.budget IS NOT NULL
              AND c.budget > 0
              AND c.alert_enabled = TRUE
            GROUP BY c.id
            "#,
        )?;

        let rows = stmt
            .query_map(params![month_key, user_id], |row| {
                let priority_str: String = row.get(4)?;
                Ok(BudgetStatus {
                    category_id: row.get(0)?,
                    name: row.get(1)?,
                    budget: row.get(2)?,
                    alert_threshold: row.get::<_, i64>(3)? as u8,
                    priority: priority_str.parse().unwrap_or(CategoryPriority::Moderate),
                    spent: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Spend per category priority for a given calendar month
    pub fn spending_by_priority(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> Result<Vec<(CategoryPriority, f64)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.priority, SUM(e.amount) AS total_spent
            FROM expenses e
            JOIN categories c ON e.category_id = c.id
            WHERE e.user_id = ?
              AND CAST(strftime('%m', e.expense_date) AS INTEGER) = ?
              AND CAST(strftime('%Y', e.expense_date) AS INTEGER) = ?
            GROUP BY c.priority
            "#,
        )?;

        let rows = stmt
            .query_map(params![user_id, month, year], |row| {
                let priority_str: String = row.get(0)?;
                let total: f64 = row.get(1)?;
                Ok((priority_str, total))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows
            .into_iter()
            .map(|(p, total)| (p.parse().unwrap_or(CategoryPriority::Moderate), total))
            .collect())
    }

    /// Top discretionary categories by spend for a given calendar month
    pub fn top_discretionary_categories(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
        limit: i64,
    ) -> Result<Vec<(String, f64)>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT c.name, SUM(e.amount) AS total
            FROM expenses e
            JOIN categories c ON e.category_id = c.id
            WHERE e.user_id = ?
              AND c.priority = 'discretionary'
              AND CAST(strftime('%m', e.expense_date) AS INTEGER) = ?
              AND CAST(strftime('%Y', e.expense_date) AS INTEGER) = ?
            GROUP BY c.id
            ORDER BY total DESC
            LIMIT ?
            "#,
        )?;

        let rows = stmt
            .query_map(params![user_id, month, year, limit], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }
}
