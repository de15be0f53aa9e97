//! Dashboard service
//!
//! Headline totals and cancel recommendations for a user.

use crate::error::SubkeepResult;
use crate::models::{SubscriptionStatus, UserId};
use crate::reports::{CancelRecommendations, DashboardSummary};
use crate::storage::SubscriptionStore;

use super::{load_priced, load_splits};

pub struct DashboardService<'a> {
    store: &'a dyn SubscriptionStore,
}

impl<'a> DashboardService<'a> {
    pub fn new(store: &'a dyn SubscriptionStore) -> Self {
        Self { store }
    }

    /// Monthly and annual totals, status counts and category breakdown
    pub fn summary(&self, user_id: UserId) -> SubkeepResult<DashboardSummary> {
        let splits = load_splits(self.store, user_id)?;
        let active = load_priced(self.store, user_id, SubscriptionStatus::Active, &splits)?;
        let paused = load_priced(self.store, user_id, SubscriptionStatus::Paused, &splits)?;

        let summary = DashboardSummary::generate(&active, paused.len());
        tracing::debug!(
            user = %user_id,
            active = summary.active_count,
            paused = summary.paused_count,
            "generated dashboard summary"
        );
        Ok(summary)
    }

    /// Active subscriptions worth cancelling
    pub fn recommendations(&self, user_id: UserId) -> SubkeepResult<CancelRecommendations> {
        let active = super::load_active(self.store, user_id)?;
        let recommendations = CancelRecommendations::generate(&active);
        tracing::debug!(
            user = %user_id,
            count = recommendations.items.len(),
            "generated cancel recommendations"
        );
        Ok(recommendations)
    }
}
