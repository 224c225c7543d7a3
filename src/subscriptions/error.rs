//! Subscription-specific error types.

use crate::error::SubtrackError;

/// Granular errors for subscription operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubscriptionError {
    /// A required field was empty or absent.
    #[error("Required field '{field}' is missing")]
    MissingField { field: &'static str },

    /// Cost must be a positive, finite amount.
    #[error("Invalid cost amount: {cost}")]
    InvalidCost { cost: f64 },

    /// No subscription with this id for the user.
    #[error("Subscription not found: {id}")]
    NotFound { id: String },
}

impl From<SubscriptionError> for SubtrackError {
    fn from(err: SubscriptionError) -> Self {
        match &err {
            SubscriptionError::NotFound { .. } => SubtrackError::NotFound(err.to_string()),
            SubscriptionError::MissingField { .. } | SubscriptionError::InvalidCost { .. } => {
                SubtrackError::Validation(err.to_string())
            }
        }
    }
}
