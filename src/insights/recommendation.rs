//! Recommendation output records.

use serde::{Deserialize, Serialize};

/// A suggested account action with its financial impact.
///
/// Serialized with an `action` tag so each variant carries only its own
/// fields, matching the shape the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Move to a cheaper tier that still covers the user's usage.
    Downgrade {
        from_plan: String,
        to_plan: String,
        monthly_savings: f64,
    },
    /// Heavy usage justifies the top tier.
    Upgrade {
        from_plan: String,
        to_plan: String,
        extra_cost: f64,
    },
    /// Barely-used subscription worth dropping.
    Cancel { monthly_savings: f64 },
    /// Discount available by pairing with another held service.
    Bundle {
        with_service: String,
        discount_percent: f64,
        estimated_savings: f64,
    },
    /// A different service has a cheaper entry point.
    Switch {
        to_service: String,
        to_plan: String,
        monthly_savings: f64,
    },
    /// Placeholder: try an alternate service.
    Try,
    /// Placeholder: referral credit.
    Refer { monthly_savings: f64 },
}

/// One suggested action against a subscription (or, for the placeholders,
/// against the account).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Service the suggestion applies to.
    pub service: String,
    #[serde(flatten)]
    pub action: Action,
    /// Human-readable explanation, always present.
    pub rationale: String,
}

impl Recommendation {
    /// Sort key: direct monthly savings, zero where the action has none
    /// (upgrades, bundles, and the try placeholder).
    #[must_use]
    pub fn monthly_savings(&self) -> f64 {
        match &self.action {
            Action::Downgrade {
                monthly_savings, ..
            }
            | Action::Switch {
                monthly_savings, ..
            }
            | Action::Cancel { monthly_savings }
            | Action::Refer { monthly_savings } => *monthly_savings,
            Action::Upgrade { .. } | Action::Bundle { .. } | Action::Try => 0.0,
        }
    }
}
