//! High-level subscription operations over a [`SubscriptionStore`].

use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

use crate::config::TrackerConfig;
use crate::error::Result;

use super::error::SubscriptionError;
use super::record::{
    BillingCycle, Category, NewSubscription, Subscription, SubscriptionStatus, SubscriptionUpdate,
};
use super::storage::{AccountSummary, SubscriptionStore};

/// Coordinates validation, persistence, and summary upkeep for subscriptions.
pub struct SubscriptionManager<S> {
    store: S,
    config: TrackerConfig,
}

impl<S: SubscriptionStore> SubscriptionManager<S> {
    pub fn new(store: S, config: TrackerConfig) -> Self {
        Self { store, config }
    }

    /// Validate and persist a new subscription.
    pub async fn add_subscription(
        &self,
        user_id: &str,
        new: NewSubscription,
    ) -> Result<Subscription> {
        let record = new.into_record(Utc::now())?;
        self.store.insert(user_id, &record).await?;
        info!(
            user_id,
            subscription_id = %record.id,
            service = %record.name,
            cost = record.cost,
            "subscription added"
        );
        Ok(record)
    }

    /// Apply a partial update to an existing subscription.
    pub async fn update_subscription(
        &self,
        user_id: &str,
        subscription_id: &str,
        update: SubscriptionUpdate,
    ) -> Result<Subscription> {
        let mut record = self
            .store
            .get(user_id, subscription_id)
            .await?
            .ok_or_else(|| SubscriptionError::NotFound {
                id: subscription_id.to_string(),
            })?;
        update.apply(&mut record, Utc::now())?;
        self.store.update(user_id, &record).await?;
        info!(user_id, subscription_id, "subscription updated");
        Ok(record)
    }

    /// Mark a subscription cancelled, keeping the row for history.
    pub async fn cancel_subscription(&self, user_id: &str, subscription_id: &str) -> Result<()> {
        let update = SubscriptionUpdate {
            status: Some(SubscriptionStatus::Cancelled),
            ..Default::default()
        };
        self.update_subscription(user_id, subscription_id, update)
            .await?;
        Ok(())
    }

    /// Remove a subscription entirely.
    pub async fn delete_subscription(&self, user_id: &str, subscription_id: &str) -> Result<()> {
        self.store.delete(user_id, subscription_id).await?;
        info!(user_id, subscription_id, "subscription deleted");
        Ok(())
    }

    /// Active subscriptions only, the snapshot the recommendation engine
    /// evaluates.
    pub async fn list_active(&self, user_id: &str) -> Result<Vec<Subscription>> {
        let subs = self.store.list(user_id).await?;
        Ok(subs.into_iter().filter(|s| s.is_active()).collect())
    }

    /// All rows for the subscriptions table. When the list is empty and demo
    /// rows are enabled, returns placeholder rows instead so the table is
    /// never blank.
    pub async fn list_for_display(&self, user_id: &str) -> Result<Vec<Subscription>> {
        let subs = self.store.list(user_id).await?;
        if subs.is_empty() && self.config.demo_rows_when_empty {
            debug!(user_id, "no subscriptions, serving demo rows");
            return Ok(demo_rows());
        }
        Ok(subs)
    }

    pub async fn summary(&self, user_id: &str) -> Result<AccountSummary> {
        self.store.summary(user_id).await
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}

/// Placeholder rows shown when a user has no subscriptions: one cancelled,
/// one pending with an overdue payment date.
fn demo_rows() -> Vec<Subscription> {
    let now = Utc::now();
    let mut netflix = NewSubscription {
        name: "Netflix".to_string(),
        plan: "Standard".to_string(),
        cost: 199.0,
        billing_cycle: BillingCycle::Monthly,
        category: Category::Video,
        next_payment_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        notes: String::new(),
    }
    .into_record(now)
    .expect("demo row is valid");
    netflix.id = "demo-cancelled".to_string();
    netflix.status = SubscriptionStatus::Cancelled;

    let mut spotify = NewSubscription {
        name: "Spotify".to_string(),
        plan: "Individual".to_string(),
        cost: 59.0,
        billing_cycle: BillingCycle::Monthly,
        category: Category::Music,
        next_payment_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        notes: String::new(),
    }
    .into_record(now)
    .expect("demo row is valid");
    spotify.id = "demo-overdue".to_string();
    spotify.status = SubscriptionStatus::Pending;

    vec![netflix, spotify]
}
