//! Spending-analysis engine
//!
//! Pipeline: monthly aggregates -> per-category trend statistics -> pattern
//! classification -> {anomaly detection, predictive insights} -> ranked
//! recommendations. Everything here is synchronous and recomputed per
//! request; the only durable state it reads is the expense/category tables.

pub mod anomalies;
pub mod engine;
pub mod predictions;
pub mod recommendations;
pub mod stats;
pub mod trends;
pub mod types;

pub use engine::{SuggestionEngine, SuggestionReport};
pub use types::{
    AlertSeverity, CategoryTrendAnalysis, Confidence, Insight, InsightKind, Recommendation,
    RecommendationKind, RecommendationPriority, SpendingAlert, SpendingAlertKind, SpendingPattern,
};
