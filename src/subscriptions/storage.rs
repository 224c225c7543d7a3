//! Storage trait for subscription data.
//!
//! The real application keeps subscriptions in a user-keyed document store;
//! this trait is the seam for that collaborator. An in-memory implementation
//! is provided for tests and single-process use.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

use super::error::SubscriptionError;
use super::record::Subscription;

/// Per-user rollup of subscription count and monthly spend.
///
/// Recomputed by the store inside the same write that changes the
/// subscription list, so readers always see a consistent pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub subscription_count: u32,
    pub total_monthly_spend: f64,
}

impl AccountSummary {
    /// Compute the summary over the active subscriptions in a list.
    #[must_use]
    pub fn from_subscriptions(subscriptions: &[Subscription]) -> Self {
        let active: Vec<&Subscription> =
            subscriptions.iter().filter(|s| s.is_active()).collect();
        Self {
            subscription_count: active.len() as u32,
            total_monthly_spend: active.iter().map(|s| s.monthly_cost()).sum(),
        }
    }
}

/// Trait for storing subscription data, keyed by user.
///
/// Implementations must keep the [`AccountSummary`] consistent with the
/// subscription list within each write.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// All subscriptions for a user, in insertion order.
    async fn list(&self, user_id: &str) -> Result<Vec<Subscription>>;

    /// A single subscription by id.
    async fn get(&self, user_id: &str, subscription_id: &str) -> Result<Option<Subscription>>;

    /// Insert a new subscription and update the summary.
    async fn insert(&self, user_id: &str, subscription: &Subscription) -> Result<()>;

    /// Replace an existing subscription and update the summary.
    async fn update(&self, user_id: &str, subscription: &Subscription) -> Result<()>;

    /// Remove a subscription and update the summary.
    async fn delete(&self, user_id: &str, subscription_id: &str) -> Result<()>;

    /// The user's current summary.
    async fn summary(&self, user_id: &str) -> Result<AccountSummary>;
}

/// In-memory subscription store.
pub mod in_memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, RwLock};

    #[derive(Debug, Default)]
    struct UserRecord {
        subscriptions: Vec<Subscription>,
        summary: AccountSummary,
    }

    impl UserRecord {
        fn recompute_summary(&mut self) {
            self.summary = AccountSummary::from_subscriptions(&self.subscriptions);
        }
    }

    /// In-memory [`SubscriptionStore`] backed by a `RwLock`ed map.
    ///
    /// Wraps data in `Arc` for cheap cloning.
    #[derive(Debug, Default, Clone)]
    pub struct InMemorySubscriptionStore {
        inner: Arc<RwLock<HashMap<String, UserRecord>>>,
    }

    impl InMemorySubscriptionStore {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }
    }

    #[async_trait]
    impl SubscriptionStore for InMemorySubscriptionStore {
        async fn list(&self, user_id: &str) -> Result<Vec<Subscription>> {
            let users = self.inner.read().unwrap();
            Ok(users
                .get(user_id)
                .map(|r| r.subscriptions.clone())
                .unwrap_or_default())
        }

        async fn get(
            &self,
            user_id: &str,
            subscription_id: &str,
        ) -> Result<Option<Subscription>> {
            let users = self.inner.read().unwrap();
            Ok(users.get(user_id).and_then(|r| {
                r.subscriptions
                    .iter()
                    .find(|s| s.id == subscription_id)
                    .cloned()
            }))
        }

        async fn insert(&self, user_id: &str, subscription: &Subscription) -> Result<()> {
            let mut users = self.inner.write().unwrap();
            let record = users.entry(user_id.to_string()).or_default();
            record.subscriptions.push(subscription.clone());
            record.recompute_summary();
            Ok(())
        }

        async fn update(&self, user_id: &str, subscription: &Subscription) -> Result<()> {
            let mut users = self.inner.write().unwrap();
            let record = users.get_mut(user_id).ok_or_else(|| {
                SubscriptionError::NotFound {
                    id: subscription.id.clone(),
                }
            })?;
            let slot = record
                .subscriptions
                .iter_mut()
                .find(|s| s.id == subscription.id)
                .ok_or_else(|| SubscriptionError::NotFound {
                    id: subscription.id.clone(),
                })?;
            *slot = subscription.clone();
            record.recompute_summary();
            Ok(())
        }

        async fn delete(&self, user_id: &str, subscription_id: &str) -> Result<()> {
            let mut users = self.inner.write().unwrap();
            let record = users.get_mut(user_id).ok_or_else(|| {
                SubscriptionError::NotFound {
                    id: subscription_id.to_string(),
                }
            })?;
            let before = record.subscriptions.len();
            record.subscriptions.retain(|s| s.id != subscription_id);
            if record.subscriptions.len() == before {
                return Err(SubscriptionError::NotFound {
                    id: subscription_id.to_string(),
                }
                .into());
            }
            record.recompute_summary();
            Ok(())
        }

        async fn summary(&self, user_id: &str) -> Result<AccountSummary> {
            let users = self.inner.read().unwrap();
            Ok(users
                .get(user_id)
                .map(|r| r.summary.clone())
                .unwrap_or_default())
        }
    }
}
