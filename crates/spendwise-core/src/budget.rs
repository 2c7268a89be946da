//! Budget alert engine
//!
//! Evaluates current-month spend against each budgeted, alert-enabled
//! category and records at most one alert per (user, category, alert_type,
//! calendar month). A category that crosses from warning into danger
//! within the same month gets a second alert under the new type; repeated
//! checks at the same severity insert nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::Result;
use crate::models::{BudgetAlertType, BudgetStatus, CategoryPriority, NewBudgetAlert};

/// Spend ratio (as a percentage) at which the danger tier starts
const DANGER_PERCENTAGE: f64 = 90.0;

/// A category currently breaching one of its budget thresholds
///
/// Returned from a check regardless of whether the backing alert row was
/// newly inserted or already existed this month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredAlert {
    pub category_id: i64,
    pub category: String,
    pub alert_type: BudgetAlertType,
    pub spent: f64,
    pub budget: f64,
    pub percentage: f64,
    pub message: String,
    pub priority: CategoryPriority,
}

/// Classify a budget standing into an alert tier, if any
fn classify(status: &BudgetStatus, percentage: f64) -> Option<BudgetAlertType> {
    if percentage >= 100.0 {
        Some(BudgetAlertType::Exceeded)
    } else if percentage >= DANGER_PERCENTAGE {
        Some(BudgetAlertType::Danger)
    } else if percentage >= status.alert_threshold as f64 {
        Some(BudgetAlertType::Warning)
    } else {
        None
    }
}

fn alert_message(status: &BudgetStatus, alert_type: BudgetAlertType, percentage: f64) -> String {
    match alert_type {
        BudgetAlertType::Exceeded => format!(
            "Budget exceeded! You've spent {:.2} out of {:.2} for {}.",
            status.spent, status.budget, status.name
        ),
        BudgetAlertType::Danger => format!(
            "Critical! You've used {:.1}% of your {} budget ({:.2}/{:.2}).",
            percentage, status.name, status.spent, status.budget
        ),
        BudgetAlertType::Warning => format!(
            "Warning! You've used {:.1}% of your {} budget ({:.2}/{:.2}).",
            percentage, status.name, status.spent, status.budget
        ),
    }
}

/// Check all budgeted categories and persist any newly-crossed thresholds
///
/// Returns every category currently breaching a threshold, whether or not
/// a row was inserted this call. The existence check and insert are not
/// atomic; concurrent identical checks can race to one duplicate row,
/// which is tolerated.
pub fn check_budgets(db: &Database, user_id: i64, today: NaiveDate) -> Result<Vec<TriggeredAlert>> {
    let month_key = today.format("%Y-%m").to_string();
    let statuses = db.budgeted_category_spend(user_id, today)?;

    let mut triggered = Vec::new();

    for status in &statuses {
        let percentage = status.spent / status.budget * 100.0;
        let Some(alert_type) = classify(status, percentage) else {
            continue;
        };

        let message = alert_message(status, alert_type, percentage);

        if !db.budget_alert_exists(user_id, status.category_id, alert_type, &month_key)? {
            db.insert_budget_alert(
                user_id,
                &NewBudgetAlert {
                    category_id: status.category_id,
                    alert_type,
                    current_amount: status.spent,
                    budget_amount: status.budget,
                    percentage_used: percentage,
                    message: message.clone(),
                    created_at: today,
                },
            )?;
            tracing::info!(
                user_id,
                category = %status.name,
                alert_type = %alert_type,
                percentage = format!("{percentage:.1}").as_str(),
                "budget alert created"
            );
        }

        triggered.push(TriggeredAlert {
            category_id: status.category_id,
            category: status.name.clone(),
            alert_type,
            spent: status.spent,
            budget: status.budget,
            percentage,
            message,
            priority: status.priority,
        });
    }

    Ok(triggered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewCategory, NewExpense};

    fn seed_category(
        db: &Database,
        user_id: i64,
        name: &str,
        budget: f64,
        threshold: u8,
    ) -> i64 {
        db.create_category(
            user_id,
            &NewCategory {
                name: name.to_string(),
                color: None,
                icon: None,
                budget: Some(budget),
                priority: CategoryPriority::Moderate,
                alert_threshold: threshold,
                alert_enabled: true,
            },
        )
        .unwrap()
        .id
    }

    fn seed_expense(db: &Database, user_id: i64, category_id: i64, amount: f64, date: &str) {
        db.insert_expense(
            user_id,
            &NewExpense {
                category_id: Some(category_id),
                amount,
                expense_date: date.parse().unwrap(),
                description: None,
            },
        )
        .unwrap();
    }

    fn today() -> NaiveDate {
        "2026-06-15".parse().unwrap()
    }

    #[test]
    fn test_below_threshold_triggers_nothing() {
        let db = Database::in_memory().unwrap();
        let cat = seed_category(&db, 1, "Groceries", 1000.0, 80);
        seed_expense(&db, 1, cat, 750.0, "2026-06-01");

        let triggered = check_budgets(&db, 1, today()).unwrap();
        assert!(triggered.is_empty());
        assert!(db.list_budget_alerts(1, false).unwrap().is_empty());
    }

    #[test]
    fn test_warning_tier_at_custom_threshold() {
        let db = Database::in_memory().unwrap();
        let cat = seed_category(&db, 1, "Groceries", 1000.0, 70);
        seed_expense(&db, 1, cat, 750.0, "2026-06-01");

        let triggered = check_budgets(&db, 1, today()).unwrap();
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].alert_type, BudgetAlertType::Warning);
        assert!((triggered[0].percentage - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_exceeded_only_at_or_above_hundred_percent() {
        let db = Database::in_memory().unwrap();
        let cat = seed_category(&db, 1, "Dining", 2000.0, 80);
        seed_expense(&db, 1, cat, 2200.0, "2026-06-01");

        let triggered = check_budgets(&db, 1, today()).unwrap();
        assert_eq!(triggered.len(), 1);
        assert_eq!(triggered[0].alert_type, BudgetAlertType::Exceeded);
        assert!(triggered[0].message.starts_with("Budget exceeded!"));
    }

    #[test]
    fn test_danger_tier_between_ninety_and_hundred() {
        let db = Database::in_memory().unwrap();
        let cat = seed_category(&db, 1, "Dining", 1000.0, 80);
        seed_expense(&db, 1, cat, 950.0, "2026-06-01");

        let triggered = check_budgets(&db, 1, today()).unwrap();
        assert_eq!(triggered[0].alert_type, BudgetAlertType::Danger);
    }

    #[test]
    fn test_repeated_checks_insert_no_duplicates() {
        let db = Database::in_memory().unwrap();
        let cat = seed_category(&db, 1, "Dining", 1000.0, 80);
        seed_expense(&db, 1, cat, 950.0, "2026-06-01");

        let first = check_budgets(&db, 1, today()).unwrap();
        let second = check_budgets(&db, 1, today()).unwrap();

        // Both checks report the breach, only one row was written
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(db.list_budget_alerts(1, false).unwrap().len(), 1);

        // The row sits in the month of the check date, where dedup looks
        assert!(db
            .budget_alert_exists(1, cat, BudgetAlertType::Danger, "2026-06")
            .unwrap());
    }

    #[test]
    fn test_escalation_creates_second_alert_same_month() {
        let db = Database::in_memory().unwrap();
        let cat = seed_category(&db, 1, "Dining", 1000.0, 80);

        seed_expense(&db, 1, cat, 850.0, "2026-06-01");
        check_budgets(&db, 1, today()).unwrap();

        seed_expense(&db, 1, cat, 100.0, "2026-06-10");
        let triggered = check_budgets(&db, 1, today()).unwrap();
        assert_eq!(triggered[0].alert_type, BudgetAlertType::Danger);

        let alerts = db.list_budget_alerts(1, false).unwrap();
        assert_eq!(alerts.len(), 2);
    }

    #[test]
    fn test_alert_disabled_category_is_skipped() {
        let db = Database::in_memory().unwrap();
        let cat = db
            .create_category(
                1,
                &NewCategory {
                    name: "Quiet".to_string(),
                    color: None,
                    icon: None,
                    budget: Some(100.0),
                    priority: CategoryPriority::Moderate,
                    alert_threshold: 80,
                    alert_enabled: false,
                },
            )
            .unwrap()
            .id;
        seed_expense(&db, 1, cat, 500.0, "2026-06-01");

        assert!(check_budgets(&db, 1, today()).unwrap().is_empty());
    }
}
