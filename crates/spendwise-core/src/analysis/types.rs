//! Record types produced by the analysis pipeline
//!
//! One typed record per output kind. These are ephemeral response values;
//! the only persistence they see is the JSON blob inside a monthly
//! insight snapshot.

use serde::{Deserialize, Serialize};

/// Direction of a category's spending trend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpendingPattern {
    Increasing,
    Decreasing,
    Stable,
}

impl SpendingPattern {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpendingPattern::Increasing => "increasing",
            SpendingPattern::Decreasing => "decreasing",
            SpendingPattern::Stable => "stable",
        }
    }

    /// Classify from a normalized trend. Thresholds are fixed constants.
    pub fn classify(normalized_trend: f64) -> Self {
        if normalized_trend > 0.15 {
            SpendingPattern::Increasing
        } else if normalized_trend < -0.15 {
            SpendingPattern::Decreasing
        } else {
            SpendingPattern::Stable
        }
    }
}

/// Per-category statistics over the trailing-three-month window
///
/// `monthly_series` holds the category's month totals oldest first; months
/// with no expenses are absent, so its length ranges from 1 up to the
/// window size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTrendAnalysis {
    pub category_id: i64,
    pub name: String,
    pub color: Option<String>,
    pub budget: Option<f64>,
    pub average_monthly: f64,
    pub std_deviation: f64,
    /// OLS slope normalized by the series mean
    pub trend: f64,
    pub pattern: SpendingPattern,
    /// Coefficient of variation
    pub volatility: f64,
    pub total_spent: f64,
    pub transaction_count: i64,
    pub monthly_series: Vec<f64>,
}

/// Severity attached to a spending alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpendingAlertKind {
    HighSpending,
    BudgetExceeded,
    BudgetWarning,
}

/// Anomaly alert for a single category's current-month spend
///
/// The statistical and budget-relative families are independent; a
/// category can carry one of each in the same report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpendingAlert {
    #[serde(rename = "type")]
    pub kind: SpendingAlertKind,
    pub severity: AlertSeverity,
    pub category: String,
    pub message: String,
    pub current: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overspend: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining: Option<f64>,
}

/// Confidence label derived from volatility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    pub fn from_volatility(volatility: f64) -> Self {
        if volatility < 0.2 {
            Confidence::High
        } else if volatility < 0.5 {
            Confidence::Medium
        } else {
            Confidence::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    TrendPrediction,
    VolatilityWarning,
    OverallPrediction,
}

/// Predictive insight surfaced alongside the alerts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volatility: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub predicted_total: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_average: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    ReduceSpending,
    SetBudget,
    PositiveFeedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

impl RecommendationPriority {
    /// Sort weight used when ranking the final list
    pub fn weight(&self) -> u8 {
        match self {
            RecommendationPriority::High => 3,
            RecommendationPriority::Medium => 2,
            RecommendationPriority::Low => 1,
        }
    }
}

/// Actionable suggestion, ranked by priority weight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: RecommendationPriority,
    pub category: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub potential_savings: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_budget: Option<f64>,
    pub actionable: bool,
}
