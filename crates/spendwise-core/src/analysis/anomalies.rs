//! Current-month anomaly detection
//!
//! Two independent alert families per category:
//! - statistical: z-score of current spend against the historical window
//! - budget-relative: exceeded / approaching-limit tiers
//!
//! Both can fire for the same category in one report; they are never
//! deduplicated against each other.

use std::collections::HashMap;

use crate::models::CategorySpend;

use super::types::{AlertSeverity, CategoryTrendAnalysis, SpendingAlert, SpendingAlertKind};

/// Z-score above which current spend counts as anomalous
const Z_SCORE_THRESHOLD: f64 = 2.0;

/// Fraction of budget at which the approaching-limit warning fires
const BUDGET_WARNING_RATIO: f64 = 0.8;

/// Detect anomalies in this month's spend against the trend analyses
pub fn detect_anomalies(
    analyses: &[CategoryTrendAnalysis],
    current: &[CategorySpend],
) -> Vec<SpendingAlert> {
    let by_category: HashMap<i64, &CategoryTrendAnalysis> =
        analyses.iter().map(|a| (a.category_id, a)).collect();

    let mut alerts = Vec::new();

    for spend in current {
        let Some(analysis) = by_category.get(&spend.category_id) else {
            continue;
        };
        if spend.spent <= 0.0 {
            continue;
        }

        // Statistical anomaly: only possible with non-zero dispersion
        if analysis.std_deviation > 0.0 {
            let z = (spend.spent - analysis.average_monthly) / analysis.std_deviation;
            if z > Z_SCORE_THRESHOLD {
                let above_pct =
                    (spend.spent - analysis.average_monthly) / analysis.average_monthly * 100.0;
                alerts.push(SpendingAlert {
                    kind: SpendingAlertKind::HighSpending,
                    severity: AlertSeverity::Warning,
                    category: spend.name.clone(),
                    message: format!(
                        "Unusually high spending in {}. You've spent {:.2} this month, which is {:.0}% above your average.",
                        spend.name, spend.spent, above_pct
                    ),
                    current: spend.spent,
                    average: Some(analysis.average_monthly),
                    z_score: Some(z),
                    budget: None,
                    overspend: None,
                    remaining: None,
                });
            }
        }

        // Budget-relative: exceeded takes precedence over the warning tier
        if let Some(budget) = spend.budget.filter(|b| *b > 0.0) {
            if spend.spent > budget {
                let overspend = spend.spent - budget;
                alerts.push(SpendingAlert {
                    kind: SpendingAlertKind::BudgetExceeded,
                    severity: AlertSeverity::Critical,
                    category: spend.name.clone(),
                    message: format!(
                        "Budget exceeded in {}! Over budget by {:.2}.",
                        spend.name, overspend
                    ),
                    current: spend.spent,
                    average: None,
                    z_score: None,
                    budget: Some(budget),
                    overspend: Some(overspend),
                    remaining: None,
                });
            } else if spend.spent > budget * BUDGET_WARNING_RATIO {
                let remaining = budget - spend.spent;
                alerts.push(SpendingAlert {
                    kind: SpendingAlertKind::BudgetWarning,
                    severity: AlertSeverity::Info,
                    category: spend.name.clone(),
                    message: format!(
                        "Approaching budget limit in {}. Only {:.2} remaining.",
                        spend.name, remaining
                    ),
                    current: spend.spent,
                    average: None,
                    z_score: None,
                    budget: Some(budget),
                    overspend: None,
                    remaining: Some(remaining),
                });
            }
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::types::SpendingPattern;

    fn analysis(category_id: i64, name: &str, series: &[f64], budget: Option<f64>) -> CategoryTrendAnalysis {
        use crate::analysis::stats;
        let trend = stats::normalized_trend(series);
        CategoryTrendAnalysis {
            category_id,
            name: name.to_string(),
            color: None,
            budget,
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

    fn spend(category_id: i64, name: &str, budget: Option<f64>, spent: f64) -> CategorySpend {
        CategorySpend {
            category_id,
            name: name.to_string(),
            budget,
            spent,
        }
    }

    #[test]
    fn test_dining_scenario_fires_both_families() {
        // [1000, 1200, 1500], current 2200, budget 2000:
        // z ~ 4.7 over the threshold, and budget exceeded by 200
        let analyses = vec![analysis(1, "Dining", &[1000.0, 1200.0, 1500.0], Some(2000.0))];
        let current = vec![spend(1, "Dining", Some(2000.0), 2200.0)];

        let alerts = detect_anomalies(&analyses, &current);
        assert_eq!(alerts.len(), 2);

        let statistical = alerts
            .iter()
            .find(|a| a.kind == SpendingAlertKind::HighSpending)
            .unwrap();
        assert_eq!(statistical.severity, AlertSeverity::Warning);
        let z = statistical.z_score.unwrap();
        assert!((z - 4.7).abs() < 0.05);

        let budget = alerts
            .iter()
            .find(|a| a.kind == SpendingAlertKind::BudgetExceeded)
            .unwrap();
        assert_eq!(budget.severity, AlertSeverity::Critical);
        assert!((budget.overspend.unwrap() - 200.0).abs() < 1e-9);
        // Exceeded suppresses the warning tier for the same category
        assert!(!alerts.iter().any(|a| a.kind == SpendingAlertKind::BudgetWarning));
    }

    #[test]
    fn test_constant_spend_never_triggers_statistical_alert() {
        let analyses = vec![analysis(1, "Rent", &[800.0, 800.0, 800.0], None)];
        let current = vec![spend(1, "Rent", None, 5000.0)];

        let alerts = detect_anomalies(&analyses, &current);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_budget_warning_above_eighty_percent() {
        let analyses = vec![analysis(1, "Groceries", &[400.0, 600.0], Some(1000.0))];
        let current = vec![spend(1, "Groceries", Some(1000.0), 850.0)];

        let alerts = detect_anomalies(&analyses, &current);
        let warning = alerts
            .iter()
            .find(|a| a.kind == SpendingAlertKind::BudgetWarning)
            .unwrap();
        assert_eq!(warning.severity, AlertSeverity::Info);
        assert!((warning.remaining.unwrap() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_budget_means_no_budget_alert() {
        let analyses = vec![analysis(1, "Hobbies", &[100.0, 300.0], None)];
        let current = vec![spend(1, "Hobbies", None, 350.0)];

        let alerts = detect_anomalies(&analyses, &current);
        assert!(alerts
            .iter()
            .all(|a| a.kind == SpendingAlertKind::HighSpending));
    }

    #[test]
    fn test_zero_current_spend_is_skipped() {
        let analyses = vec![analysis(1, "Dining", &[1000.0, 1200.0], Some(100.0))];
        let current = vec![spend(1, "Dining", Some(100.0), 0.0)];

        let alerts = detect_anomalies(&analyses, &current);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_category_without_history_is_skipped() {
        let analyses: Vec<CategoryTrendAnalysis> = vec![];
        let current = vec![spend(1, "New Category", Some(100.0), 500.0)];

        let alerts = detect_anomalies(&analyses, &current);
        assert!(alerts.is_empty());
    }
}
