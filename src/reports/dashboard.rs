//! Dashboard summary

use serde::Serialize;

use super::{category_breakdown, personal_total, CategoryBreakdownEntry, PricedSubscription};
use crate::models::Money;

/// Headline totals for the current portfolio
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub monthly_total: Money,
    pub annual_total: Money,
    pub active_count: usize,
    pub paused_count: usize,
    pub category_breakdown: Vec<CategoryBreakdownEntry>,
}

impl DashboardSummary {
    /// Totals and breakdown cover active subscriptions; paused ones are only counted
    pub fn generate(active: &[PricedSubscription], paused_count: usize) -> Self {
        let monthly_total = personal_total(active);
        Self {
            monthly_total,
            annual_total: monthly_total.times(12),
            active_count: active.len(),
            paused_count,
            category_breakdown: category_breakdown(active),
        }
    }
}
