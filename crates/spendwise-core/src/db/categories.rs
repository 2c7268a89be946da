//! Category operations

use rusqlite::params;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Category, CategoryPriority, NewCategory};

fn validate(new: &NewCategory) -> Result<()> {
    if new.name.trim().is_empty() {
        return Err(Error::InvalidData("Category name is required".to_string()));
    }
    if let Some(budget) = new.budget {
        if budget <= 0.0 {
            return Err(Error::InvalidData(
                "Budget must be greater than zero".to_string(),
            ));
        }
    }
    if new.alert_threshold < 1 || new.alert_threshold > 100 {
        return Err(Error::InvalidData(
            "Alert threshold must be between 1 and 100".to_string(),
        ));
    }
    Ok(())
}

impl Database {
    /// Create a category for a user
    pub fn create_category(&self, user_id: i64, new: &NewCategory) -> Result<Category> {
        validate(new)?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO categories (user_id, name, color, icon, budget, priority, alert_threshold, alert_enabled)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                user_id,
                new.name.trim(),
                new.color,
                new.icon,
                new.budget,
                new.priority.as_str(),
                new.alert_threshold,
                new.alert_enabled
            ],
        )?;

        let id = conn.last_insert_rowid();
        drop(conn);
        self.get_category(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Category {} not found after insert", id)))
    }

    /// Get a single category owned by the user
    pub fn get_category(&self, user_id: i64, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;

        let result = conn.query_row(
            r#"
            SELECT id, user_id, name, color, icon, budget, priority, alert_threshold, alert_enabled, created_at
            FROM categories
            WHERE id = ? AND user_id = ?
            "#,
            params![id, user_id],
            row_to_category,
        );

        match result {
            Ok(category) => Ok(Some(category)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all categories owned by a user, ordered by name
    pub fn list_categories(&self, user_id: i64) -> Result<Vec<Category>> {
        let conn = self.conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, user_id, name, color, icon, budget, priority, alert_threshold, alert_enabled, created_at
            FROM categories
            WHERE user_id = ?
            ORDER BY name
            "#,
        )?;

        let categories = stmt
            .query_map(params![user_id], row_to_category)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Update a category owned by the user
    pub fn update_category(&self, user_id: i64, id: i64, new: &NewCategory) -> Result<Category> {
        validate(new)?;
        let conn = self.conn()?;

        let updated = conn.execute(
            r#"
            UPDATE categories
            SET name = ?, color = ?, icon = ?, budget = ?, priority = ?,
                alert_threshold = ?, alert_enabled = ?
            WHERE id = ? AND user_id = ?
            "#,
            params![
                new.name.trim(),
                new.color,
                new.icon,
                new.budget,
                new.priority.as_str(),
                new.alert_threshold,
                new.alert_enabled,
                id,
                user_id
            ],
        )?;

        if updated == 0 {
            return Err(Error::NotFound(format!("Category {} not found", id)));
        }

        drop(conn);
        self.get_category(user_id, id)?
            .ok_or_else(|| Error::NotFound(format!("Category {} not found", id)))
    }

    /// Delete a category owned by the user
    ///
    /// Expenses referencing it are orphaned (category set to NULL), never
    /// deleted.
    pub fn delete_category(&self, user_id: i64, id: i64) -> Result<()> {
        let conn = self.conn()?;

        let deleted = conn.execute(
            "DELETE FROM categories WHERE id = ? AND user_id = ?",
            params![id, user_id],
        )?;

        if deleted == 0 {
            return Err(Error::NotFound(format!("Category {} not found", id)));
        }

        Ok(())
    }
}

fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
    let priority_str: String = row.get(6)?;
    let created_at_str: String = row.get(9)?;

    Ok(Category {
        id: row.get(0)?,
        user_id: row.get(1)?,
        name: row.get(2)?,
        color: row.get(3)?,
        icon: row.get(4)?,
        budget: row.get(5)?,
        priority: priority_str.parse().unwrap_or(CategoryPriority::Moderate),
        alert_threshold: row.get::<_, i64>(7)? as u8,
        alert_enabled: row.get(8)?,
        created_at: parse_datetime(&created_at_str),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            color: Some("#ff9900".to_string()),
            icon: None,
            budget: Some(500.0),
            priority: CategoryPriority::Moderate,
            alert_threshold: 80,
            alert_enabled: true,
        }
    }

    #[test]
    fn test_create_and_get_category() {
        let db = Database::in_memory().unwrap();

        let cat = db.create_category(1, &sample("Groceries")).unwrap();
        assert_eq!(cat.name, "Groceries");
        assert_eq!(cat.budget, Some(500.0));
        assert_eq!(cat.alert_threshold, 80);
        assert!(cat.alert_enabled);

        let fetched = db.get_category(1, cat.id).unwrap().unwrap();
        assert_eq!(fetched.id, cat.id);
    }

    #[test]
    fn test_category_scoped_by_user() {
        let db = Database::in_memory().unwrap();

        let cat = db.create_category(1, &sample("Dining")).unwrap();
        // A different user cannot see it
        assert!(db.get_category(2, cat.id).unwrap().is_none());
        assert!(db.delete_category(2, cat.id).is_err());
    }

    #[test]
    fn test_invalid_budget_rejected() {
        let db = Database::in_memory().unwrap();

        let mut new = sample("Bad");
        new.budget = Some(0.0);
        assert!(matches!(
            db.create_category(1, &new),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let db = Database::in_memory().unwrap();

        let mut new = sample("Bad");
        new.alert_threshold = 0;
        assert!(db.create_category(1, &new).is_err());

        new.alert_threshold = 101;
        assert!(db.create_category(1, &new).is_err());
    }

    #[test]
    fn test_update_category() {
        let db = Database::in_memory().unwrap();

        let cat = db.create_category(1, &sample("Transport")).unwrap();
        let mut new = sample("Transit");
        new.budget = None;
        new.priority = CategoryPriority::Essential;

        let updated = db.update_category(1, cat.id, &new).unwrap();
        assert_eq!(updated.name, "Transit");
        assert_eq!(updated.budget, None);
        assert_eq!(updated.priority, CategoryPriority::Essential);
    }

    #[test]
    fn test_list_ordered_by_name() {
        let db = Database::in_memory().unwrap();

        db.create_category(1, &sample("Zoo")).unwrap();
        db.create_category(1, &sample("Apples")).unwrap();

        let all = db.list_categories(1).unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Apples");
    }
}
