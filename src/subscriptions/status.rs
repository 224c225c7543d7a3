//! Payment state derivation for dashboard rows.
//!
//! The stored status only distinguishes active/pending/cancelled; the
//! displayed state also flags rows whose next payment falls within a five-day
//! window either side of today.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::record::{Subscription, SubscriptionStatus};

/// Days either side of the payment date that count as "payment due".
const DUE_WINDOW_DAYS: i64 = 5;

/// Displayed payment state of a subscription row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Active,
    /// Payment date is within the due window.
    PaymentDue,
    /// Awaiting a payment that has not cleared.
    Paused,
    /// Cancelled subscription kept for history.
    Inactive,
}

impl PaymentState {
    /// Badge label shown in the subscriptions table.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::PaymentDue => "Payment Due",
            Self::Paused => "Awaiting Payment",
            Self::Inactive => "Cancelled",
        }
    }

    /// Whether the row should offer a "Make Payment" action.
    #[must_use]
    pub fn needs_action(&self) -> bool {
        matches!(self, Self::PaymentDue | Self::Paused)
    }
}

/// Derive the displayed state for a subscription as of `today`.
#[must_use]
pub fn payment_state(subscription: &Subscription, today: NaiveDate) -> PaymentState {
    match subscription.status {
        SubscriptionStatus::Cancelled => PaymentState::Inactive,
        SubscriptionStatus::Pending => PaymentState::Paused,
        SubscriptionStatus::Active => {
            let window_start = subscription.next_payment_date - Duration::days(DUE_WINDOW_DAYS);
            let window_end = subscription.next_payment_date + Duration::days(DUE_WINDOW_DAYS);
            if today >= window_start && today <= window_end {
                PaymentState::PaymentDue
            } else {
                PaymentState::Active
            }
        }
    }
}
