//! Recommendation ranking
//!
//! Three rule families applied in order, then a stable sort by priority
//! weight and a cap of five. The stable sort preserves the rule order on
//! ties, so high-priority reduction suggestions always lead.

use std::cmp::Reverse;

use super::types::{
    CategoryTrendAnalysis, Recommendation, RecommendationKind, RecommendationPriority,
    SpendingPattern,
};

/// Maximum recommendations returned per report
const MAX_RECOMMENDATIONS: usize = 5;

/// Fraction of average spend suggested as a reduction target
const REDUCTION_FRACTION: f64 = 0.1;

/// Buffer applied to average spend when suggesting a budget
const SUGGESTED_BUDGET_FACTOR: f64 = 1.1;

/// Build and rank recommendations from the per-category analyses
pub fn build_recommendations(analyses: &[CategoryTrendAnalysis]) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    // 1. Top three categories by total spend: suggest a 10% cut where the
    //    trend is upward.
    let mut by_spend: Vec<&CategoryTrendAnalysis> = analyses.iter().collect();
    by_spend.sort_by(|a, b| {
        b.total_spent
            .partial_cmp(&a.total_spent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    for analysis in by_spend.iter().take(3) {
        if analysis.pattern == SpendingPattern::Increasing {
            let savings = analysis.average_monthly * REDUCTION_FRACTION;
            recommendations.push(Recommendation {
                kind: RecommendationKind::ReduceSpending,
                priority: RecommendationPriority::High,
                category: analysis.name.clone(),
                message: format!(
                    "Consider reducing spending in {} by 10%. This could save you {:.2} per month.",
                    analysis.name, savings
                ),
                potential_savings: Some(savings),
                suggested_budget: None,
                actionable: true,
            });
        }
    }

    // 2. Categories without a budget: suggest one at 1.1x the average.
    for analysis in analyses {
        if analysis.budget.is_none() && analysis.average_monthly > 0.0 {
            let suggested = analysis.average_monthly * SUGGESTED_BUDGET_FACTOR;
            recommendations.push(Recommendation {
                kind: RecommendationKind::SetBudget,
                priority: RecommendationPriority::Medium,
                category: analysis.name.clone(),
                message: format!(
                    "Set a budget of {:.2} for {} based on your spending history.",
                    suggested, analysis.name
                ),
                potential_savings: None,
                suggested_budget: Some(suggested),
                actionable: true,
            });
        }
    }

    // 3. Positive feedback for downward trends.
    for analysis in analyses {
        if analysis.pattern == SpendingPattern::Decreasing {
            recommendations.push(Recommendation {
                kind: RecommendationKind::PositiveFeedback,
                priority: RecommendationPriority::Low,
                category: analysis.name.clone(),
                message: format!(
                    "Great job! You're reducing spending in {}. Keep it up!",
                    analysis.name
                ),
                potential_savings: None,
                suggested_budget: None,
                actionable: false,
            });
        }
    }

    // Stable sort keeps rule order on equal weight
    recommendations.sort_by_key(|r| Reverse(r.priority.weight()));
    recommendations.truncate(MAX_RECOMMENDATIONS);
    recommendations
}
