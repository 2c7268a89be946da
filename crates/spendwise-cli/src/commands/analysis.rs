//! Analysis command implementations (suggest, check, insights)

use anyhow::{Context, Result};
use chrono::Utc;

use spendwise_core::db::Database;
use spendwise_core::{budget, snapshot, SuggestionEngine};

pub fn cmd_suggest(db: &Database, user_id: i64, json: bool) -> Result<()> {
    let report = SuggestionEngine::new(db)
        .generate(user_id)
        .context("Failed to generate suggestions")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!("📈 Spending Analysis (user {})", user_id);
    println!("   ─────────────────────────────────────────────────────────────");

    if report.category_analysis.is_empty() {
        println!("   No spending data in the last three months.");
        println!();
        return Ok(());
    }

    for analysis in &report.category_analysis {
        println!(
            "   {:<20} avg {:>10.2}  trend {:>+6.1}%  {}",
            super::truncate(&analysis.name, 20),
            analysis.average_monthly,
            analysis.trend * 100.0,
            analysis.pattern.as_str()
        );
    }

    if !report.spending_alerts.is_empty() {
        println!();
        println!("   ⚠️  Alerts:");
        for alert in &report.spending_alerts {
            println!("   - {}", alert.message);
        }
    }

    if !report.insights.is_empty() {
        println!();
        println!("   💡 Insights:");
        for insight in &report.insights {
            println!("   - {}", insight.message);
        }
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("   ✅ Recommendations:");
        for rec in &report.recommendations {
            println!("   - {}", rec.message);
        }
    }

    println!();
    Ok(())
}

pub fn cmd_check(db: &Database, user_id: i64) -> Result<()> {
    let today = Utc::now().date_naive();
    let triggered =
        budget::check_budgets(db, user_id, today).context("Failed to check budgets")?;

    if triggered.is_empty() {
        println!("✅ All budgets within limits");
        return Ok(());
    }

    println!();
    println!("🚨 {} budget threshold(s) breached:", triggered.len());
    for alert in &triggered {
        println!(
            "   {:<20} {:>6.1}%  {}",
            super::truncate(&alert.category, 20),
            alert.percentage,
            alert.alert_type
        );
    }
    println!();

    Ok(())
}

pub fn cmd_insights(db: &Database, user_id: i64) -> Result<()> {
    let today = Utc::now().date_naive();
    let snap = snapshot::generate_snapshot(db, user_id, today)
        .context("Failed to generate spending insights")?;

    println!();
    println!("📊 Spending Insights {}/{}", snap.month, snap.year);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Total spent:        {:>10.2}", snap.total_spent);
    println!("   Essential:          {:>10.2}", snap.essential_spent);
    println!("   Moderate:           {:>10.2}", snap.moderate_spent);
    println!("   Discretionary:      {:>10.2}", snap.discretionary_spent);
    println!("   Savings potential:  {:>10.2}", snap.savings_potential);

    if !snap.recommendations.is_empty() {
        println!();
        for rec in &snap.recommendations {
            println!("   💡 {}: {}", rec.title, rec.message);
        }
    }

    println!();
    Ok(())
}
