//! Service layer for subkeep
//!
//! Services pull a user's subscriptions and split policies from a
//! [`SubscriptionStore`], price them, and hand back report values. Only the
//! simulation service keeps state of its own (the undo slots).

pub mod calendar;
pub mod dashboard;
pub mod report;
pub mod simulation;
pub mod undo;

pub use calendar::{CalendarService, UpcomingWindow};
pub use dashboard::DashboardService;
pub use report::ReportService;
pub use simulation::{
    AppliedSimulation, ApplyAction, SimulationResult, SimulationService, VirtualItem,
};
pub use undo::{UndoEntry, UndoStore};

use crate::error::{SubkeepError, SubkeepResult};
use crate::models::{SplitIndex, SubscriptionStatus, UserId};
use crate::reports::{price_all, PricedSubscription};
use crate::storage::SubscriptionStore;

/// A user's priced subscriptions for one status
pub(crate) fn load_priced(
    store: &dyn SubscriptionStore,
    user_id: UserId,
    status: SubscriptionStatus,
    splits: &SplitIndex,
) -> SubkeepResult<Vec<PricedSubscription>> {
    let subscriptions = store.list_for_user(user_id, status).map_err(|e| {
        tracing::warn!(user = %user_id, %status, error = %e, "failed to load subscriptions");
        SubkeepError::Internal(format!("Failed to load subscriptions: {}", e))
    })?;
    Ok(price_all(&subscriptions, splits))
}

/// Split index over the user's policies
pub(crate) fn load_splits(
    store: &dyn SubscriptionStore,
    user_id: UserId,
) -> SubkeepResult<SplitIndex> {
    let policies = store.split_policies_for_user(user_id).map_err(|e| {
        tracing::warn!(user = %user_id, error = %e, "failed to load split policies");
        SubkeepError::Internal(format!("Failed to load split policies: {}", e))
    })?;
    SplitIndex::from_policies(policies)
}

/// Active subscriptions priced with the user's split policies
pub(crate) fn load_active(
    store: &dyn SubscriptionStore,
    user_id: UserId,
) -> SubkeepResult<Vec<PricedSubscription>> {
    let splits = load_splits(store, user_id)?;
    load_priced(store, user_id, SubscriptionStatus::Active, &splits)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;

    use crate::models::{
        BillingPeriod, CategoryId, CategoryRef, Money, Subscription, SubscriptionStatus, UserId,
    };
    use crate::storage::MemoryStore;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn monthly(user: UserId, name: &str, amount: i64, anchor: NaiveDate) -> Subscription {
        Subscription::new(
            user,
            name,
            Money::from_minor(amount),
            BillingPeriod::Monthly,
            anchor,
        )
    }

    pub fn video_category() -> CategoryRef {
        CategoryRef::new(CategoryId::new(), "Video", Some("#E50914".into()))
    }

    /// Video (17000, active), Music (10900, paused) and Cloud (120000/yr, active)
    pub fn sample_store(user: UserId) -> (MemoryStore, Vec<Subscription>) {
        let store = MemoryStore::new();
        let subs = vec![
            monthly(user, "Video", 17_000, date(2025, 1, 15))
                .with_category(video_category())
                .with_satisfaction(2),
            monthly(user, "Music", 10_900, date(2025, 1, 5))
                .with_status(SubscriptionStatus::Paused)
                .with_satisfaction(4),
            Subscription::new(
                user,
                "Cloud",
                Money::from_minor(120_000),
                BillingPeriod::Yearly,
                date(2024, 6, 1),
            ),
        ];
        for sub in &subs {
            store.insert(sub.clone()).unwrap();
        }
        (store, subs)
    }
}
