//! Predictive insights
//!
//! Extrapolates next-month spend per category from trend + mean, flags
//! high-volatility categories, and emits a single aggregate prediction
//! when overall spend is expected to shift by more than 5%.

use super::types::{CategoryTrendAnalysis, Confidence, Insight, InsightKind, SpendingPattern};

/// Volatility above which a category earns a variability warning
const VOLATILITY_WARNING_THRESHOLD: f64 = 0.5;

/// Minimum overall percentage change worth surfacing
const OVERALL_CHANGE_THRESHOLD: f64 = 5.0;

/// Next-month estimate for a single category
pub fn predicted_next_month(analysis: &CategoryTrendAnalysis) -> f64 {
    analysis.average_monthly * (1.0 + analysis.trend)
}

/// Build the insight list from the per-category analyses
pub fn build_insights(analyses: &[CategoryTrendAnalysis]) -> Vec<Insight> {
    let mut insights = Vec::new();

    for analysis in analyses {
        let predicted = predicted_next_month(analysis);

        // Only upward trends surface a prediction
        if analysis.pattern == SpendingPattern::Increasing {
            insights.push(Insight {
                kind: InsightKind::TrendPrediction,
                category: analysis.name.clone(),
                message: format!(
                    "Your spending in {} is trending upward. Expected spending next month: {:.2} (vs. current average {:.2}).",
                    analysis.name, predicted, analysis.average_monthly
                ),
                predicted_amount: Some(predicted),
                confidence: Some(Confidence::from_volatility(analysis.volatility)),
                volatility: None,
                predicted_total: None,
                current_average: None,
                change_percent: None,
            });
        }

        if analysis.volatility > VOLATILITY_WARNING_THRESHOLD {
            insights.push(Insight {
                kind: InsightKind::VolatilityWarning,
                category: analysis.name.clone(),
                message: format!(
                    "High spending variability in {}. Consider creating a more consistent budget.",
                    analysis.name
                ),
                predicted_amount: None,
                confidence: None,
                volatility: Some(analysis.volatility),
                predicted_total: None,
                current_average: None,
                change_percent: None,
            });
        }
    }

    // Aggregate prediction across all categories
    let total_average: f64 = analyses.iter().map(|a| a.average_monthly).sum();
    let total_predicted: f64 = analyses.iter().map(predicted_next_month).sum();

    if total_average > 0.0 {
        let change_percent = (total_predicted - total_average) / total_average * 100.0;
        if change_percent.abs() > OVERALL_CHANGE_THRESHOLD {
            let direction = if change_percent > 0.0 {
                "increase"
            } else {
                "decrease"
            };
            insights.push(Insight {
                kind: InsightKind::OverallPrediction,
                category: "All Categories".to_string(),
                message: format!(
                    "Overall spending is expected to {} by {:.1}% next month.",
                    direction,
                    change_percent.abs()
                ),
                predicted_amount: None,
                confidence: None,
                volatility: None,
                predicted_total: Some(total_predicted),
                current_average: Some(total_average),
                change_percent: Some(change_percent),
            });
        }
    }

    insights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats;

    fn analysis(name: &str, series: &[f64]) -> CategoryTrendAnalysis {
        let trend = stats::normalized_trend(series);
        CategoryTrendAnalysis {
            category_id: 1,
            name: name.to_string(),
            color: None,
            budget: None,
            average_monthly: stats::mean(series),
            std_deviation: stats::std_deviation(series),
            trend,
            pattern: SpendingPattern::classify(trend),
            volatility: stats::volatility(series),
            total_spent: series.iter().sum(),
            transaction_count: series.len() as i64,
            monthly_series: series.to_vec(),
        }
    }

    #[test]
    fn test_stable_category_prediction_equals_average() {
        let a = analysis("Rent", &[800.0, 800.0, 800.0]);
        assert_eq!(a.pattern, SpendingPattern::Stable);
        assert!((predicted_next_month(&a) - a.average_monthly).abs() < 1e-9);
    }

    #[test]
    fn test_increasing_category_gets_trend_prediction() {
        let a = analysis("Dining", &[1000.0, 1200.0, 1500.0]);
        let insights = build_insights(&[a.clone()]);

        let prediction = insights
            .iter()
            .find(|i| i.kind == InsightKind::TrendPrediction)
            .unwrap();
        assert_eq!(prediction.category, "Dining");
        let expected = a.average_monthly * (1.0 + a.trend);
        assert!((prediction.predicted_amount.unwrap() - expected).abs() < 1e-9);
        assert!(prediction.confidence.is_some());
    }

    #[test]
    fn test_stable_category_gets_no_trend_prediction() {
        let a = analysis("Rent", &[800.0, 810.0, 805.0]);
        let insights = build_insights(&[a]);
        assert!(!insights
            .iter()
            .any(|i| i.kind == InsightKind::TrendPrediction));
    }

    #[test]
    fn test_volatile_category_gets_warning_regardless_of_trend() {
        // Wild swings but roughly flat trend
        let a = analysis("Shopping", &[100.0, 900.0, 150.0]);
        assert!(a.volatility > 0.5);

        let insights = build_insights(&[a]);
        assert!(insights
            .iter()
            .any(|i| i.kind == InsightKind::VolatilityWarning));
    }

    #[test]
    fn test_overall_prediction_fires_above_five_percent() {
        let a = analysis("Dining", &[1000.0, 1200.0, 1500.0]);
        let insights = build_insights(&[a]);

        let overall = insights
            .iter()
            .find(|i| i.kind == InsightKind::OverallPrediction)
            .unwrap();
        assert_eq!(overall.category, "All Categories");
        assert!(overall.change_percent.unwrap() > 5.0);
    }

    #[test]
    fn test_no_overall_prediction_for_flat_spending() {
        let a = analysis("Rent", &[800.0, 800.0, 800.0]);
        let insights = build_insights(&[a]);
        assert!(!insights
            .iter()
            .any(|i| i.kind == InsightKind::OverallPrediction));
    }

    #[test]
    fn test_empty_analysis_produces_no_insights() {
        assert!(build_insights(&[]).is_empty());
    }
}
