//! Budget alert persistence
//!
//! Idempotency contract: at most one alert per (user, category, alert_type,
//! calendar month), enforced by an existence check before insert. The
//! check-then-insert sequence is not transactionally atomic; concurrent
//! identical requests can race to one harmless duplicate.

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::models::{BudgetAlert, BudgetAlertType, NewBudgetAlert};

impl Database {
    /// Whether an alert of this type already exists for the category in the
    /// given calendar month ("YYYY-MM")
    pub fn budget_alert_exists(
        &self,
        user_id: i64,
        category_id: i64,
        alert_type: BudgetAlertType,
        month_key: &str,
    ) -> Result<bool> {
        let conn = self.conn()?;

        let existing = conn
            .query_row(
                r#"
                SELECT id FROM budget_alerts
                WHERE user_id = ? AND category_id = ?
                  AND alert_type = ?
                  AND strftime('%Y-%m', created_at) = ?
                "#,
                params![user_id, category_id, alert_type.as_str(), month_key],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;

        Ok(existing.is_some())
    }

    /// Insert a budget alert row, stamped with the alert's as-of date
    pub fn insert_budget_alert(&self, user_id: i64, alert: &NewBudgetAlert) -> Result<i64> {
        let conn = self.conn()?;
        let created_at = alert
            .created_at
            .and_time(chrono::NaiveTime::MIN)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string();

        conn.execute(
            r#"
            INSERT INTO budget_alerts
                (user_id, category_id, alert_type, current_amount, budget_amount, percentage_used, message, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                alert.category_id,
                alert.alert_type.as_str(),
                alert.current_amount,
                alert.budget_amount,
                alert.percentage_used,
                alert.message,
                created_at
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List a user's alerts, newest first, capped at 50
    pub fn list_budget_alerts(&self, user_id: i64, unread_only: bool) -> Result<Vec<BudgetAlert>> {
        let conn = self.conn()?;

        let sql = if unread_only {
            r#"
            SELECT a.id, a.user_id, a.category_id, c.name, a.alert_type,
                   a.current_amount, a.budget_amount, a.percentage_used,
                   a.message, a.is_read, a.created_at
            FROM budget_alerts a
            JOIN categories c ON a.category_id = c.id
            WHERE a.user_id = ? AND a.is_read = FALSE
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT 50
            "#
        } else {
            r#"
            SELECT a.id, a.user_id, a.category_id, c.name, a.alert_type,
                   a.current_amount, a.budget_amount, a.percentage_used,
                   a.message, a.is_read, a.created_at
            FROM budget_alerts a
            JOIN categories c ON a.category_id = c.id
            WHERE a.user_id = ?
            ORDER BY a.created_at DESC, a.id DESC
            LIMIT 50
            "#
        };

        let mut stmt = conn.prepare(sql)?;
        let alerts = stmt
            .query_map(params![user_id], |row| {
                let type_str: String = row.get(4)?;
                let created_at_str: String = row.get(10)?;

                Ok(BudgetAlert {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    category_id: row.get(2)?,
                    category_name: row.get(3)?,
                    alert_type: type_str.parse().unwrap_or(BudgetAlertType::Warning),
                    current_amount: row.get(5)?,
                    budget_amount: row.get(6)?,
                    percentage_used: row.get(7)?,
                    message: row.get(8)?,
                    is_read: row.get(9)?,
                    created_at: parse_datetime(&created_at_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(alerts)
    }

    /// Mark an alert as read (scoped to the owning user)
    pub fn mark_alert_read(&self, user_id: i64, alert_id: i64) -> Result<bool> {
        let conn = self.conn()?;

        let updated = conn.execute(
            "UPDATE budget_alerts SET is_read = TRUE WHERE id = ? AND user_id = ?",
            params![alert_id, user_id],
        )?;

        Ok(updated > 0)
    }

    /// Count unread alerts for a user
    pub fn count_unread_alerts(&self, user_id: i64) -> Result<i64> {
        let conn = self.conn()?;
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM budget_alerts WHERE user_id = ? AND is_read = FALSE",
            params![user_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
