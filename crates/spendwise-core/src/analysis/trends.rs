//! Per-category trend estimation
//!
//! Joins category metadata with the windowed monthly aggregates and fits
//! the trend statistics per category. Categories with zero data points in
//! the window are omitted entirely; downstream stages only ever see
//! categories with at least one month of spending.

use std::collections::HashMap;

use crate::models::{Category, MonthlyAggregate};

use super::stats;
use super::types::{CategoryTrendAnalysis, SpendingPattern};

/// Build a trend analysis for every category with data in the window
///
/// `aggregates` must be ordered per category, oldest month first, as the
/// aggregate query returns them; the slope fit depends on that order.
pub fn analyze_categories(
    categories: &[Category],
    aggregates: &[MonthlyAggregate],
) -> Vec<CategoryTrendAnalysis> {
    let mut series: HashMap<i64, Vec<&MonthlyAggregate>> = HashMap::new();
    for agg in aggregates {
        series.entry(agg.category_id).or_default().push(agg);
    }

    let mut analyses = Vec::new();

    for category in categories {
        let Some(rows) = series.get(&category.id) else {
            continue;
        };

        let monthly_series: Vec<f64> = rows.iter().map(|r| r.total_spent).collect();
        let total_spent: f64 = monthly_series.iter().sum();
        let transaction_count: i64 = rows.iter().map(|r| r.transaction_count).sum();

        let trend = stats::normalized_trend(&monthly_series);

        analyses.push(CategoryTrendAnalysis {
            category_id: category.id,
            name: category.name.clone(),
            color: category.color.clone(),
            budget: category.budget,
            average_monthly: stats::mean(&monthly_series),
            std_deviation: stats::std_deviation(&monthly_series),
            trend,
            pattern: SpendingPattern::classify(trend),
            volatility: stats::volatility(&monthly_series),
            total_spent,
            transaction_count,
            monthly_series,
        });
    }

    analyses
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CategoryPriority;
    use chrono::Utc;

    fn category(id: i64, name: &str, budget: Option<f64>) -> Category {
        Category {
            id,
            user_id: 1,
            name: name.to_string(),
            color: None,
            icon: None,
            budget,
            priority: CategoryPriority::Moderate,
            alert_threshold: 80,
            alert_enabled: true,
            created_at: Utc::now(),
        }
    }

    fn aggregate(category_id: i64, month: u32, total: f64, count: i64) -> MonthlyAggregate {
        MonthlyAggregate {
            category_id,
            year: 2026,
            month,
            total_spent: total,
            transaction_count: count,
            average_transaction: total / count as f64,
        }
    }

    #[test]
    fn test_category_without_data_is_omitted() {
        let categories = vec![category(1, "Dining", None), category(2, "Travel", None)];
        let aggregates = vec![aggregate(1, 6, 500.0, 5)];

        let analyses = analyze_categories(&categories, &aggregates);
        assert_eq!(analyses.len(), 1);
        assert_eq!(analyses[0].name, "Dining");
    }

    #[test]
    fn test_single_data_point_is_stable() {
        let categories = vec![category(1, "Dining", None)];
        let aggregates = vec![aggregate(1, 6, 500.0, 5)];

        let analyses = analyze_categories(&categories, &aggregates);
        assert_eq!(analyses[0].trend, 0.0);
        assert_eq!(analyses[0].pattern, SpendingPattern::Stable);
        assert_eq!(analyses[0].average_monthly, 500.0);
        assert_eq!(analyses[0].monthly_series, vec![500.0]);
    }

    #[test]
    fn test_increasing_series_classified_increasing() {
        let categories = vec![category(1, "Dining", Some(2000.0))];
        let aggregates = vec![
            aggregate(1, 4, 1000.0, 10),
            aggregate(1, 5, 1200.0, 12),
            aggregate(1, 6, 1500.0, 15),
        ];

        let analyses = analyze_categories(&categories, &aggregates);
        let a = &analyses[0];
        assert_eq!(a.pattern, SpendingPattern::Increasing);
        assert!(a.trend > 0.15);
        assert_eq!(a.total_spent, 3700.0);
        assert_eq!(a.transaction_count, 37);
        assert!((a.average_monthly - 3700.0 / 3.0).abs() < 1e-9);
        assert!((a.std_deviation - 205.5).abs() < 0.1);
    }

    #[test]
    fn test_series_totals_sum_across_months() {
        let categories = vec![category(1, "Groceries", None)];
        let aggregates = vec![aggregate(1, 5, 300.0, 3), aggregate(1, 6, 300.0, 4)];

        let analyses = analyze_categories(&categories, &aggregates);
        assert_eq!(analyses[0].total_spent, 600.0);
        assert_eq!(analyses[0].transaction_count, 7);
        assert_eq!(analyses[0].pattern, SpendingPattern::Stable);
    }
}
