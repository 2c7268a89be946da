//! Spending insight snapshot persistence
//!
//! Snapshots are keyed by (user, month, year) and upserted: re-generating a
//! month replaces its numbers and recommendations in place.

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::Result;
use crate::snapshot::{MonthlySnapshot, SnapshotRecommendation};

impl Database {
    /// Upsert a monthly snapshot for (user, month, year)
    pub fn upsert_snapshot(&self, snapshot: &MonthlySnapshot) -> Result<i64> {
        let conn = self.conn()?;
        let recommendations_json = serde_json::to_string(&snapshot.recommendations)?;

        // Try to update existing
        let updated = conn.execute(
            r#"
            UPDATE spending_insights
            SET total_spent = ?,
                essential_spent = ?,
                moderate_spent = ?,
                discretionary_spent = ?,
                savings_potential = ?,
                recommendations = ?,
                generated_at = CURRENT_TIMESTAMP
            WHERE user_id = ? AND month = ? AND year = ?
            "#,
            params![
                snapshot.total_spent,
                snapshot.essential_spent,
                snapshot.moderate_spent,
                snapshot.discretionary_spent,
                snapshot.savings_potential,
                recommendations_json,
                snapshot.user_id,
                snapshot.month,
                snapshot.year
            ],
        )?;

        if updated > 0 {
            let id: i64 = conn.query_row(
                "SELECT id FROM spending_insights WHERE user_id = ? AND month = ? AND year = ?",
                params![snapshot.user_id, snapshot.month, snapshot.year],
                |row| row.get(0),
            )?;
            return Ok(id);
        }

        conn.execute(
            r#"
            INSERT INTO spending_insights
                (user_id, month, year, total_spent, essential_spent, moderate_spent,
                 discretionary_spent, savings_potential, recommendations)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                snapshot.user_id,
                snapshot.month,
                snapshot.year,
                snapshot.total_spent,
                snapshot.essential_spent,
                snapshot.moderate_spent,
                snapshot.discretionary_spent,
                snapshot.savings_potential,
                recommendations_json
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Fetch the snapshot for (user, month, year), if one was generated
    pub fn get_snapshot(
        &self,
        user_id: i64,
        month: u32,
        year: i32,
    ) -> Result<Option<MonthlySnapshot>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            r#"
            SELECT user_id, month, year, total_spent, essential_spent, moderate_spent,
                   discretionary_spent, savings_potential, recommendations, generated_at
            FROM spending_insights
            WHERE user_id = ? AND month = ? AND year = ?
            "#,
            params![user_id, month, year],
            |row| {
                let recommendations_json: String = row.get(8)?;
                let generated_at_str: String = row.get(9)?;
                let recommendations: Vec<SnapshotRecommendation> =
                    serde_json::from_str(&recommendations_json).unwrap_or_default();

                Ok(MonthlySnapshot {
                    user_id: row.get(0)?,
                    month: row.get::<_, i64>(1)? as u32,
                    year: row.get(2)?,
                    total_spent: row.get(3)?,
                    essential_spent: row.get(4)?,
                    moderate_spent: row.get(5)?,
                    discretionary_spent: row.get(6)?,
                    savings_potential: row.get(7)?,
                    recommendations,
                    generated_at: parse_datetime(&generated_at_str),
                })
            },
        );

        match result {
            Ok(snapshot) => Ok(Some(snapshot)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample(user_id: i64, total: f64) -> MonthlySnapshot {
        MonthlySnapshot {
            user_id,
            month: 3,
            year: 2026,
            total_spent: total,
            essential_spent: total * 0.6,
            moderate_spent: total * 0.3,
            discretionary_spent: total * 0.1,
            savings_potential: total * 0.11,
            recommendations: vec![],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let db = Database::in_memory().unwrap();

        let id1 = db.upsert_snapshot(&sample(1, 1000.0)).unwrap();
        let id2 = db.upsert_snapshot(&sample(1, 2000.0)).unwrap();
        assert_eq!(id1, id2);

        let fetched = db.get_snapshot(1, 3, 2026).unwrap().unwrap();
        assert_eq!(fetched.total_spent, 2000.0);
    }

    #[test]
    fn test_missing_snapshot_is_none() {
        let db = Database::in_memory().unwrap();
        assert!(db.get_snapshot(1, 1, 2026).unwrap().is_none());
    }

    #[test]
    fn test_snapshots_scoped_by_user() {
        let db = Database::in_memory().unwrap();
        db.upsert_snapshot(&sample(1, 1000.0)).unwrap();
        db.upsert_snapshot(&sample(2, 50.0)).unwrap();

        assert_eq!(db.get_snapshot(1, 3, 2026).unwrap().unwrap().total_spent, 1000.0);
        assert_eq!(db.get_snapshot(2, 3, 2026).unwrap().unwrap().total_spent, 50.0);
    }
}
