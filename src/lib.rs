//! Subtrack - subscription tracking with rule-based plan optimization
//!
//! Subtrack models recurring subscriptions, keeps a per-user spend summary,
//! derives payment status for dashboard rows, and suggests plan changes
//! (downgrade, upgrade, cancel, bundle, switch) against a static service
//! catalog. Authentication and real persistence are collaborator seams: the
//! crate ships the [`SubscriptionStore`] trait and an in-memory
//! implementation.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use subtrack::{
//!     InMemorySubscriptionStore, RecommendationEngine, SubscriptionManager,
//!     TrackerConfig, UsageProfile,
//! };
//!
//! #[tokio::main]
//! async fn main() -> subtrack::Result<()> {
//!     subtrack::init_tracing();
//!
//!     let manager = SubscriptionManager::new(
//!         InMemorySubscriptionStore::new(),
//!         TrackerConfig::default(),
//!     );
//!
//!     let subscriptions = manager.list_active("user-1").await?;
//!     let engine = RecommendationEngine::default();
//!     let suggestions = engine.evaluate(&subscriptions, &UsageProfile::default());
//!     println!("{} suggestions", suggestions.len());
//!     Ok(())
//! }
//! ```

pub mod catalog;
mod config;
mod error;
pub mod insights;
pub mod reporting;
pub mod subscriptions;

// Re-exports for public API
pub use catalog::{
    BundleDiscount, PlanTier, ServiceCatalog, ServiceCatalogBuilder, ServiceEntry,
};
pub use config::{LoggingConfig, TrackerConfig, TrackerConfigBuilder};
pub use error::{Result, SubtrackError};
pub use insights::{Action, ActivityRecord, Recommendation, RecommendationEngine, UsageProfile};
pub use reporting::SpendBreakdown;
pub use subscriptions::{
    AccountSummary, BillingCycle, Category, InMemorySubscriptionStore, NewSubscription,
    PaymentState, Subscription, SubscriptionError, SubscriptionManager, SubscriptionStatus,
    SubscriptionStore, SubscriptionUpdate,
};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging with sensible defaults.
///
/// Call early, typically in main() before constructing a manager.
///
/// # Environment Variables
///
/// - `RUST_LOG`: Set log level (e.g., "info", "debug", "subtrack=debug")
/// - `SUBTRACK_LOG_JSON`: Set to "true" for JSON formatted logs
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json_logs = std::env::var("SUBTRACK_LOG_JSON")
        .map(|v| v.parse::<bool>().unwrap_or(false))
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

/// Initialize tracing from a [`TrackerConfig`].
pub fn init_tracing_with_config(config: &TrackerConfig) {
    let env_filter = EnvFilter::new(&config.logging.level);

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}
