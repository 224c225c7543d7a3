//! Subscription records and input validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SubscriptionError;

/// How often a subscription bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    Monthly,
    Yearly,
    Weekly,
}

impl BillingCycle {
    /// Parse from a form value, defaulting to monthly for unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "monthly" | "month" => Self::Monthly,
            "yearly" | "year" | "annual" => Self::Yearly,
            "weekly" | "week" => Self::Weekly,
            _ => Self::Monthly,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Weekly => "weekly",
        }
    }

    /// Normalize a billed amount to its monthly equivalent.
    #[must_use]
    pub fn monthly_value(&self, cost: f64) -> f64 {
        match self {
            Self::Monthly => cost,
            Self::Yearly => cost / 12.0,
            Self::Weekly => cost * 52.0 / 12.0,
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Broad content category used for grouping on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Video,
    Music,
    Gaming,
    #[default]
    Other,
}

impl Category {
    /// Parse from a form value, defaulting to `Other` for unknown input.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "video" => Self::Video,
            "music" => Self::Music,
            "gaming" => Self::Gaming,
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Music => "music",
            Self::Gaming => "gaming",
            Self::Other => "other",
        }
    }
}

/// Stored lifecycle status of a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    /// Awaiting a payment that has not cleared.
    Pending,
    Cancelled,
}

impl SubscriptionStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A tracked subscription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    /// Service name, matched case-insensitively against the catalog.
    pub name: String,
    /// Plan/tier name within the service. May be empty, in which case
    /// tier-based recommendations are skipped for this subscription.
    #[serde(default)]
    pub plan: String,
    /// Amount billed per cycle, non-negative.
    pub cost: f64,
    pub billing_cycle: BillingCycle,
    #[serde(default)]
    pub category: Category,
    pub next_payment_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Subscription {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    /// Billed amount normalized to a monthly figure.
    #[must_use]
    pub fn monthly_cost(&self) -> f64 {
        self.billing_cycle.monthly_value(self.cost)
    }
}

/// Input for creating a subscription via the add flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSubscription {
    pub name: String,
    #[serde(default)]
    pub plan: String,
    pub cost: f64,
    #[serde(default = "default_cycle")]
    pub billing_cycle: BillingCycle,
    #[serde(default)]
    pub category: Category,
    pub next_payment_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

fn default_cycle() -> BillingCycle {
    BillingCycle::Monthly
}

impl NewSubscription {
    /// Validate required fields and amount.
    pub fn validate(&self) -> Result<(), SubscriptionError> {
        if self.name.trim().is_empty() {
            return Err(SubscriptionError::MissingField { field: "name" });
        }
        if !self.cost.is_finite() || self.cost <= 0.0 {
            return Err(SubscriptionError::InvalidCost { cost: self.cost });
        }
        Ok(())
    }

    /// Build the stored record: trims text fields, rounds the cost to two
    /// decimal places, and stamps it active.
    pub fn into_record(self, now: DateTime<Utc>) -> Result<Subscription, SubscriptionError> {
        self.validate()?;
        Ok(Subscription {
            id: Uuid::new_v4().to_string(),
            name: self.name.trim().to_string(),
            plan: self.plan.trim().to_string(),
            cost: round2(self.cost),
            billing_cycle: self.billing_cycle,
            category: self.category,
            next_payment_date: self.next_payment_date,
            notes: self.notes.trim().to_string(),
            status: SubscriptionStatus::Active,
            created_at: now,
            updated_at: now,
        })
    }
}

/// Partial update applied to an existing subscription.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionUpdate {
    pub name: Option<String>,
    pub plan: Option<String>,
    pub cost: Option<f64>,
    pub billing_cycle: Option<BillingCycle>,
    pub category: Option<Category>,
    pub next_payment_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub status: Option<SubscriptionStatus>,
}

impl SubscriptionUpdate {
    /// Apply the set fields to a record, validating the cost if changed.
    pub fn apply(
        self,
        record: &mut Subscription,
        now: DateTime<Utc>,
    ) -> Result<(), SubscriptionError> {
        if let Some(cost) = self.cost {
            if !cost.is_finite() || cost <= 0.0 {
                return Err(SubscriptionError::InvalidCost { cost });
            }
            record.cost = round2(cost);
        }
        if let Some(name) = self.name {
            if name.trim().is_empty() {
                return Err(SubscriptionError::MissingField { field: "name" });
            }
            record.name = name.trim().to_string();
        }
        if let Some(plan) = self.plan {
            record.plan = plan.trim().to_string();
        }
        if let Some(cycle) = self.billing_cycle {
            record.billing_cycle = cycle;
        }
        if let Some(category) = self.category {
            record.category = category;
        }
        if let Some(date) = self.next_payment_date {
            record.next_payment_date = date;
        }
        if let Some(notes) = self.notes {
            record.notes = notes.trim().to_string();
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        record.updated_at = now;
        Ok(())
    }
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
