//! Subscription lifecycle: records, validation, payment state, storage, and
//! the manager that ties them together.

pub mod error;
pub mod manager;
pub mod record;
pub mod status;
pub mod storage;

pub use error::SubscriptionError;
pub use manager::SubscriptionManager;
pub use record::{
    BillingCycle, Category, NewSubscription, Subscription, SubscriptionStatus, SubscriptionUpdate,
};
pub use status::{payment_state, PaymentState};
pub use storage::in_memory::InMemorySubscriptionStore;
pub use storage::{AccountSummary, SubscriptionStore};
