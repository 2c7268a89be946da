//! Domain models for Spendwise

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A user-defined expense category with an optional monthly budget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    /// Monthly budget; must be positive when set
    pub budget: Option<f64>,
    pub priority: CategoryPriority,
    /// Percentage of budget (1-100) at which a warning alert fires
    pub alert_threshold: u8,
    pub alert_enabled: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating or updating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub color: Option<String>,
    pub icon: Option<String>,
    pub budget: Option<f64>,
    #[serde(default)]
    pub priority: CategoryPriority,
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: u8,
    #[serde(default = "default_alert_enabled")]
    pub alert_enabled: bool,
}

fn default_alert_threshold() -> u8 {
    80
}

fn default_alert_enabled() -> bool {
    true
}

/// Priority classification used to bias savings recommendations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryPriority {
    Essential,
    #[default]
    Moderate,
    Discretionary,
}

impl CategoryPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Essential => "essential",
            Self::Moderate => "moderate",
            Self::Discretionary => "discretionary",
        }
    }
}

impl std::str::FromStr for CategoryPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "essential" => Ok(Self::Essential),
            "moderate" => Ok(Self::Moderate),
            "discretionary" => Ok(Self::Discretionary),
            _ => Err(format!("Unknown category priority: {}", s)),
        }
    }
}

impl std::fmt::Display for CategoryPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub user_id: i64,
    /// None = uncategorized (e.g. the category was deleted)
    pub category_id: Option<i64>,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for recording a new expense
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExpense {
    pub category_id: Option<i64>,
    pub amount: f64,
    pub expense_date: NaiveDate,
    pub description: Option<String>,
}

/// Per-category, per-month aggregate of expense rows
///
/// Recomputed on every analysis request, never cached.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyAggregate {
    pub category_id: i64,
    pub year: i32,
    pub month: u32,
    pub total_spent: f64,
    pub transaction_count: i64,
    pub average_transaction: f64,
}

/// Current-month spend for a category (zero when no expenses this month)
#[derive(Debug, Clone)]
pub struct CategorySpend {
    pub category_id: i64,
    pub name: String,
    pub budget: Option<f64>,
    pub spent: f64,
}

/// Current-month standing of a budget-bearing, alert-enabled category
#[derive(Debug, Clone)]
pub struct BudgetStatus {
    pub category_id: i64,
    pub name: String,
    pub budget: f64,
    pub alert_threshold: u8,
    pub priority: CategoryPriority,
    pub spent: f64,
}

/// Budget-threshold alert tiers, distinct from statistical anomaly alerts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetAlertType {
    /// Crossed the category's alert threshold (below 90%)
    Warning,
    /// At or above 90% of budget
    Danger,
    /// At or above 100% of budget
    Exceeded,
}

impl BudgetAlertType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Danger => "danger",
            Self::Exceeded => "exceeded",
        }
    }
}

impl std::str::FromStr for BudgetAlertType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "warning" => Ok(Self::Warning),
            "danger" => Ok(Self::Danger),
            "exceeded" => Ok(Self::Exceeded),
            _ => Err(format!("Unknown alert type: {}", s)),
        }
    }
}

impl std::fmt::Display for BudgetAlertType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fields for recording a new budget alert
///
/// `created_at` is the as-of date of the check that produced the alert, so
/// the stored row lands in the calendar month the dedup check filters on.
#[derive(Debug, Clone)]
pub struct NewBudgetAlert {
    pub category_id: i64,
    pub alert_type: BudgetAlertType,
    pub current_amount: f64,
    pub budget_amount: f64,
    pub percentage_used: f64,
    pub message: String,
    pub created_at: NaiveDate,
}

/// A persisted budget alert
///
/// At most one alert exists per (user, category, alert_type, calendar month).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetAlert {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    pub category_name: String,
    pub alert_type: BudgetAlertType,
    pub current_amount: f64,
    pub budget_amount: f64,
    pub percentage_used: f64,
    pub message: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
