//! Spendwise Core Library
//!
//! Shared functionality for the Spendwise personal finance tracker:
//! - Database access and migrations (categories, expenses, alerts, snapshots)
//! - The spending-analysis engine (trends, anomalies, predictions,
//!   recommendations)
//! - The budget alert engine with per-month idempotency
//! - Monthly spending insight snapshots grouped by category priority

pub mod analysis;
pub mod budget;
pub mod db;
pub mod error;
pub mod models;
pub mod snapshot;

pub use analysis::{
    AlertSeverity, CategoryTrendAnalysis, Confidence, Insight, InsightKind, Recommendation,
    RecommendationKind, RecommendationPriority, SpendingAlert, SpendingAlertKind, SpendingPattern,
    SuggestionEngine, SuggestionReport,
};
pub use budget::TriggeredAlert;
pub use db::Database;
pub use error::{Error, Result};
pub use snapshot::{MonthlySnapshot, SnapshotRecommendation};
