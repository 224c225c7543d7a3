//! Dashboard reporting: spend breakdown slices and amount formatting.
//!
//! The breakdown feeds a doughnut chart; slices keep input order and cycle
//! through the fixed palette. The core returns raw numbers everywhere else;
//! formatting is concentrated here.

use serde::Serialize;

use crate::subscriptions::record::Subscription;

/// Chart palette, assigned to slices in list order and cycled.
pub const CHART_PALETTE: [&str; 8] = [
    "#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF", "#FF9F40", "#8AC24A", "#607D8B",
];

/// One slice of the spending chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakdownSlice {
    pub name: String,
    pub amount: f64,
    pub color: &'static str,
}

/// Per-service spend totals for the dashboard chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpendBreakdown {
    pub slices: Vec<BreakdownSlice>,
    pub total: f64,
}

impl SpendBreakdown {
    /// Build a breakdown from a subscription list, one slice per row in
    /// input order.
    #[must_use]
    pub fn from_subscriptions(subscriptions: &[Subscription]) -> Self {
        let slices: Vec<BreakdownSlice> = subscriptions
            .iter()
            .enumerate()
            .map(|(i, sub)| BreakdownSlice {
                name: sub.name.clone(),
                amount: sub.cost,
                color: CHART_PALETTE[i % CHART_PALETTE.len()],
            })
            .collect();
        let total = slices.iter().map(|s| s.amount).sum();
        Self { slices, total }
    }
}

/// Format an amount in Rand: `R199.00`.
#[must_use]
pub fn format_rand(amount: f64) -> String {
    format_amount("R", amount)
}

/// Format an amount with an arbitrary currency symbol, two decimal places.
#[must_use]
pub fn format_amount(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}
