//! Monthly spending insight snapshots
//!
//! Groups a month's spend by category priority, estimates savings
//! potential, and persists the result keyed by (user, month, year). The
//! savings model assumes half of discretionary and a fifth of moderate
//! spending is recoverable.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::Result;
use crate::models::CategoryPriority;

/// Recoverable fraction of discretionary spending
const DISCRETIONARY_SAVINGS_RATE: f64 = 0.5;

/// Recoverable fraction of moderate spending
const MODERATE_SAVINGS_RATE: f64 = 0.2;

/// Discretionary share of total spend above which a warning is raised
const DISCRETIONARY_WARNING_PERCENTAGE: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotRecommendationKind {
    Warning,
    Savings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotImpact {
    High,
    Medium,
}

/// Recommendation stored inside a snapshot's JSON blob
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecommendation {
    #[serde(rename = "type")]
    pub kind: SnapshotRecommendationKind,
    pub title: String,
    pub message: String,
    pub impact: SnapshotImpact,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<f64>,
}

/// One month's spending broken down by category priority
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlySnapshot {
    pub user_id: i64,
    pub month: u32,
    pub year: i32,
    pub total_spent: f64,
    pub essential_spent: f64,
    pub moderate_spent: f64,
    pub discretionary_spent: f64,
    pub savings_potential: f64,
    pub recommendations: Vec<SnapshotRecommendation>,
    pub generated_at: DateTime<Utc>,
}

/// Compute and persist the snapshot for the calendar month of `today`
///
/// Upserts: regenerating within the same month replaces the stored row.
pub fn generate_snapshot(db: &Database, user_id: i64, today: NaiveDate) -> Result<MonthlySnapshot> {
    let month = today.month();
    let year = today.year();

    let mut essential = 0.0;
    let mut moderate = 0.0;
    let mut discretionary = 0.0;
    for (priority, total) in db.spending_by_priority(user_id, month, year)? {
        match priority {
            CategoryPriority::Essential => essential = total,
            CategoryPriority::Moderate => moderate = total,
            CategoryPriority::Discretionary => discretionary = total,
        }
    }

    let total_spent = essential + moderate + discretionary;
    let savings_potential =
        discretionary * DISCRETIONARY_SAVINGS_RATE + moderate * MODERATE_SAVINGS_RATE;

    let mut recommendations = Vec::new();

    let discretionary_pct = if total_spent > 0.0 {
        discretionary / total_spent * 100.0
    } else {
        0.0
    };
    if discretionary_pct > DISCRETIONARY_WARNING_PERCENTAGE {
        recommendations.push(SnapshotRecommendation {
            kind: SnapshotRecommendationKind::Warning,
            title: "High Discretionary Spending".to_string(),
            message: format!(
                "Discretionary expenses make up {:.1}% of your total spending. Consider reducing non-essential expenses.",
                discretionary_pct
            ),
            impact: SnapshotImpact::High,
            category: None,
            potential_savings: None,
        });
    }

    for (name, total) in db.top_discretionary_categories(user_id, month, year, 3)? {
        let potential = total * DISCRETIONARY_SAVINGS_RATE;
        recommendations.push(SnapshotRecommendation {
            kind: SnapshotRecommendationKind::Savings,
            title: format!("Reduce {name}"),
            message: format!(
                "Cut your {} spending by 50% to save {:.2} this month.",
                name, potential
            ),
            impact: SnapshotImpact::Medium,
            category: Some(name),
            potential_savings: Some(potential),
        });
    }

    let snapshot = MonthlySnapshot {
        user_id,
        month,
        year,
        total_spent,
        essential_spent: essential,
        moderate_spent: moderate,
        discretionary_spent: discretionary,
        savings_potential,
        recommendations,
        generated_at: Utc::now(),
    };

    db.upsert_snapshot(&snapshot)?;
    tracing::debug!(user_id, month, year, total_spent, "stored spending insight snapshot");

    Ok(snapshot)
}
