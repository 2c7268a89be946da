//! Expense operations

use chrono::NaiveDate;
use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Expense, NewExpense};

impl Database {
    /// Record an expense for a user
    pub fn insert_expense(&self, user_id: i64, new: &NewExpense) -> Result<Expense> {
        if new.amount <= 0.0 {
            return Err(Error::InvalidData(
                "Expense amount must be greater than zero".to_string(),
            ));
        }

        // Ownership check: the category (if any) must belong to this user
        if let Some(category_id) = new.category_id {
            if self.get_category(user_id, category_id)?.is_none() {
                return Err(Error::NotFound(format!(
                    "Category {} not found",
                    category_id
                )));
            }
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO expenses (user_id, category_id, amount, expense_date, description)
            VALUES (?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                new.category_id,
                new.amount,
                new.expense_date.format("%Y-%m-%d").to_string(),
                new.description
            ],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.get_expense(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Expense {} not found after insert", id)))
    }

    /// Get a single expense owned by the user
    pub fn get_expense(&self, user_id: i64, id: i64) -> Result<Option<Expense>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            r#"
            SELECT id, user_id, category_id, amount, expense_date, description, created_at
            FROM expenses
            WHERE id = ? AND user_id = ?
            "#,
            params![id, user_id],
            row_to_expense,
        );

        match result {
            Ok(expense) => Ok(Some(expense)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List a user's expenses, newest first
    pub fn list_expenses(&self, user_id: i64, limit: i64) -> Result<Vec<Expense>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, category_id, amount, expense_date, description, created_at
            FROM expenses
            WHERE user_id = ?
            ORDER BY expense_date DESC, id DESC
            LIMIT ?
            "#,
        )?;

        let expenses = stmt
            .query_map(params![user_id, limit], row_to_expense)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(expenses)
    }

    /// Delete an expense owned by the user
    pub fn delete_expense(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute(
            "DELETE FROM expenses WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Expense {} not found", id)));
        }

        Ok(())
    }
}

fn row_to_expense(row: &rusqlite::Row) -> rusqlite::Result<Expense> {
    let date_str: String = row.get(4)?;
    let created_at_str: String = row.get(6)?;

    Ok(Expense {
        id: row.get(0)?,
        user_id: row.get(1)?,
        category_id: row.get(2)?,
        amount: row.get(3)?,
        expense_date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
            .unwrap_or_else(|_| chrono::Local::now().date_naive()),
        description: row.get(5)?,
        created_at: parse_datetime(&created_at_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryPriority, NewCategory};

    fn category(db: &Database, user_id: i64, name: &str) -> i64 {
        db.create_category(
            user_id,
            &NewCategory {
                name: name.to_string(),
                color: None,
                icon: None,
                budget: None,
                priority: CategoryPriority::Moderate,
                alert_threshold: 80,
                alert_enabled: true,
            },
        )
        .unwrap()
        .id
    }

    fn expense(category_id: Option<i64>, amount: f64, date: &str) -> NewExpense {
        NewExpense {
            category_id,
            amount,
            expense_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            description: None,
        }
    }

    #[test]
    fn test_insert_and_list() {
        let db = Database::in_memory().unwrap();
        let cat = category(&db, 1, "Groceries");

        db.insert_expense(1, &expense(Some(cat), 42.50, "2026-02-01")).unwrap();
        db.insert_expense(1, &expense(Some(cat), 10.00, "2026-02-15")).unwrap();

        let list = db.list_expenses(1, 50).unwrap();
        assert_eq!(list.len(), 2);
        // Newest first
        assert_eq!(list[0].amount, 10.00);
    }

    #[test]
    fn test_non_positive_amount_rejected() {
        let db = Database::in_memory().unwrap();
        assert!(db.insert_expense(1, &expense(None, 0.0, "2026-02-01")).is_err());
        assert!(db.insert_expense(1, &expense(None, -3.0, "2026-02-01")).is_err());
    }

    #[test]
    fn test_foreign_category_rejected() {
        let db = Database::in_memory().unwrap();
        let other = category(&db, 2, "Theirs");

        assert!(matches!(
            db.insert_expense(1, &expense(Some(other), 5.0, "2026-02-01")),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_category_orphans_expenses() {
        let db = Database::in_memory().unwrap();
        let cat = category(&db, 1, "Dining");
        let exp = db.insert_expense(1, &expense(Some(cat), 25.0, "2026-02-05")).unwrap();

        db.delete_category(1, cat).unwrap();

        // Expense survives, uncategorized
        let orphan = db.get_expense(1, exp.id).unwrap().unwrap();
        assert_eq!(orphan.category_id, None);
        assert_eq!(orphan.amount, 25.0);
    }
}
