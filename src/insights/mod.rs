//! Plan optimization insights.
//!
//! The core of the tracker: a usage analyzer and a rule-based recommendation
//! engine evaluated over a snapshot of the user's subscriptions. Everything
//! here is pure computation; persistence and presentation live elsewhere.

pub mod engine;
pub mod recommendation;
pub mod usage;

pub use engine::RecommendationEngine;
pub use recommendation::{Action, Recommendation};
pub use usage::{ActivityRecord, UsageProfile};
