//! Suggestion engine orchestration
//!
//! Wires the pipeline stages together over a database handle. Read-only:
//! generating a report never writes anything.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::error::Result;

use super::types::{CategoryTrendAnalysis, Insight, Recommendation, SpendingAlert};
use super::{anomalies, predictions, recommendations, trends};

/// Full analysis report for one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionReport {
    pub generated_at: DateTime<Utc>,
    pub insights: Vec<Insight>,
    pub spending_alerts: Vec<SpendingAlert>,
    pub recommendations: Vec<Recommendation>,
    pub category_analysis: Vec<CategoryTrendAnalysis>,
}

/// Runs the analysis pipeline against a user's stored expenses
pub struct SuggestionEngine<'a> {
    db: &'a Database,
}

impl<'a> SuggestionEngine<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Generate a report as of today
    pub fn generate(&self, user_id: i64) -> Result<SuggestionReport> {
        self.generate_as_of(user_id, Utc::now().date_naive())
    }

    /// Generate a report with an explicit reference date
    ///
    /// The trend window is the three months trailing `today`; current-month
    /// figures are `today`'s calendar month.
    pub fn generate_as_of(&self, user_id: i64, today: NaiveDate) -> Result<SuggestionReport> {
        let categories = self.db.list_categories(user_id)?;
        let aggregates = self.db.monthly_aggregates(user_id, today)?;
        let category_analysis = trends::analyze_categories(&categories, &aggregates);

        let current = self.db.current_month_spending(user_id, today)?;
        let spending_alerts = anomalies::detect_anomalies(&category_analysis, &current);
        let insights = predictions::build_insights(&category_analysis);
        let recs = recommendations::build_recommendations(&category_analysis);

        tracing::debug!(
            user_id,
            categories = category_analysis.len(),
            alerts = spending_alerts.len(),
            insights = insights.len(),
            recommendations = recs.len(),
            "generated suggestion report"
        );

        Ok(SuggestionReport {
            generated_at: Utc::now(),
            insights,
            spending_alerts,
            recommendations: recs,
            category_analysis,
        })
    }
}
