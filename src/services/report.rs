//! Report service

use chrono::NaiveDate;

use crate::error::SubkeepResult;
use crate::models::{SubscriptionStatus, UserId};
use crate::reports::ReportOverview;
use crate::storage::SubscriptionStore;

use super::{load_priced, load_splits};

pub struct ReportService<'a> {
    store: &'a dyn SubscriptionStore,
}

impl<'a> ReportService<'a> {
    pub fn new(store: &'a dyn SubscriptionStore) -> Self {
        Self { store }
    }

    /// Breakdown, trend, averages and summary as of `today`
    pub fn overview(&self, user_id: UserId, today: NaiveDate) -> SubkeepResult<ReportOverview> {
        let splits = load_splits(self.store, user_id)?;
        let active = load_priced(self.store, user_id, SubscriptionStatus::Active, &splits)?;
        let paused = load_priced(self.store, user_id, SubscriptionStatus::Paused, &splits)?;

        tracing::debug!(
            user = %user_id,
            active = active.len(),
            paused = paused.len(),
            %today,
            "generating report overview"
        );
        Ok(ReportOverview::generate(&active, &paused, today))
    }
}
