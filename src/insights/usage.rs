//! Usage analysis: turns a raw activity record into the profile the
//! recommendation rules consume.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw per-user activity as reported by the profile source. Absent fields
/// default to zero/empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    /// Total viewing hours over the reporting period (roughly a month).
    #[serde(default)]
    pub viewing_hours: f64,
    /// Distinct devices the account was used on.
    #[serde(default)]
    pub devices: Vec<String>,
    #[serde(default)]
    pub most_watched_genres: HashSet<String>,
    #[serde(default)]
    pub family_members: u32,
}

/// Derived usage metrics driving rule thresholds. Recomputed on every
/// evaluation, never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageProfile {
    /// Average daily viewing hours (viewing hours / 30).
    pub monthly_hours: f64,
    pub devices_used: usize,
    /// Genre labels. Part of the profile contract, not used by any rule yet.
    pub content_types: HashSet<String>,
    /// More than one family member on the account.
    pub sharing: bool,
}

impl UsageProfile {
    /// Derive a profile from an activity record. Pure and total.
    #[must_use]
    pub fn from_activity(record: &ActivityRecord) -> Self {
        Self {
            monthly_hours: record.viewing_hours / 30.0,
            devices_used: record.devices.len(),
            content_types: record.most_watched_genres.clone(),
            sharing: record.family_members > 1,
        }
    }
}

impl From<&ActivityRecord> for UsageProfile {
    fn from(record: &ActivityRecord) -> Self {
        Self::from_activity(record)
    }
}
