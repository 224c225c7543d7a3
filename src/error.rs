//! Crate-wide error type.
//!
//! Domain modules define granular error enums (see
//! [`SubscriptionError`](crate::subscriptions::SubscriptionError)) and convert
//! into `SubtrackError` at the API boundary.

/// The main error type for subtrack operations.
#[derive(Debug, thiserror::Error)]
pub enum SubtrackError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SubtrackError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<serde_json::Error> for SubtrackError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            SubtrackError::Validation(format!("JSON error: {}", err))
        } else {
            SubtrackError::Internal(format!("JSON serialization error: {}", err))
        }
    }
}

/// Result type alias for subtrack operations.
pub type Result<T> = std::result::Result<T, SubtrackError>;
