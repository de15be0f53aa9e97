//! In-memory subscription store
//!
//! Keeps records in insertion order so listings are stable between calls.
//! Soft removal stamps the record instead of dropping it, which is what lets
//! an applied cancellation be restored.

use chrono::Utc;
use std::path::Path;
use std::sync::RwLock;

use super::portfolio::{PortfolioFile, StoredSubscription};
use super::SubscriptionStore;
use crate::error::{SubkeepError, SubkeepResult};
use crate::models::{SplitPolicy, Subscription, SubscriptionId, SubscriptionStatus, UserId};

/// `RwLock`-guarded store backed by plain vectors
#[derive(Debug, Default)]
pub struct MemoryStore {
    subscriptions: RwLock<Vec<StoredSubscription>>,
    policies: RwLock<Vec<SplitPolicy>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a portfolio document, validating every record
    pub fn from_portfolio(portfolio: PortfolioFile) -> SubkeepResult<Self> {
        let store = Self::new();
        for stored in portfolio.subscriptions {
            store.insert_stored(stored)?;
        }
        for policy in portfolio.split_policies {
            store.insert_policy(policy)?;
        }
        Ok(store)
    }

    /// Load a portfolio file straight into a store
    pub fn load<P: AsRef<Path>>(path: P) -> SubkeepResult<Self> {
        Self::from_portfolio(PortfolioFile::load(path)?)
    }

    /// Snapshot the store, including soft-removed records
    pub fn to_portfolio(&self) -> SubkeepResult<PortfolioFile> {
        let subscriptions = self.read_subscriptions()?.clone();
        let split_policies = self
            .policies
            .read()
            .map_err(|e| SubkeepError::Storage(format!("Failed to acquire read lock: {}", e)))?
            .clone();

        Ok(PortfolioFile {
            subscriptions,
            split_policies,
        })
    }

    /// Write the current state back to a portfolio file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> SubkeepResult<()> {
        self.to_portfolio()?.save(path)
    }

    /// Add a subscription
    pub fn insert(&self, subscription: Subscription) -> SubkeepResult<()> {
        self.insert_stored(StoredSubscription::new(subscription))
    }

    fn insert_stored(&self, stored: StoredSubscription) -> SubkeepResult<()> {
        stored
            .subscription
            .validate()
            .map_err(|e| SubkeepError::Validation(e.to_string()))?;

        let mut data = self.write_subscriptions()?;
        if data.iter().any(|s| s.subscription.id == stored.subscription.id) {
            return Err(SubkeepError::Duplicate {
                entity_type: "Subscription",
                identifier: stored.subscription.id.full(),
            });
        }
        data.push(stored);
        Ok(())
    }

    /// Attach a split policy; a subscription carries at most one
    pub fn insert_policy(&self, policy: SplitPolicy) -> SubkeepResult<()> {
        policy
            .validate()
            .map_err(|e| SubkeepError::Validation(e.to_string()))?;

        let mut policies = self
            .policies
            .write()
            .map_err(|e| SubkeepError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if policies
            .iter()
            .any(|p| p.subscription_id == policy.subscription_id)
        {
            return Err(SubkeepError::Duplicate {
                entity_type: "Split policy for subscription",
                identifier: policy.subscription_id.full(),
            });
        }
        policies.push(policy);
        Ok(())
    }

    /// Whether a record exists and is soft-removed
    pub fn is_removed(&self, id: SubscriptionId) -> SubkeepResult<bool> {
        let data = self.read_subscriptions()?;
        Ok(data
            .iter()
            .any(|s| s.subscription.id == id && s.is_removed()))
    }

    /// Number of records, removed ones included
    pub fn len(&self) -> SubkeepResult<usize> {
        Ok(self.read_subscriptions()?.len())
    }

    pub fn is_empty(&self) -> SubkeepResult<bool> {
        Ok(self.len()? == 0)
    }

    fn read_subscriptions(
        &self,
    ) -> SubkeepResult<std::sync::RwLockReadGuard<'_, Vec<StoredSubscription>>> {
        self.subscriptions
            .read()
            .map_err(|e| SubkeepError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write_subscriptions(
        &self,
    ) -> SubkeepResult<std::sync::RwLockWriteGuard<'_, Vec<StoredSubscription>>> {
        self.subscriptions
            .write()
            .map_err(|e| SubkeepError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl SubscriptionStore for MemoryStore {
    fn find(&self, id: SubscriptionId) -> SubkeepResult<Option<Subscription>> {
        let data = self.read_subscriptions()?;
        Ok(data
            .iter()
            .find(|s| s.subscription.id == id && !s.is_removed())
            .map(|s| s.subscription.clone()))
    }

    fn list_for_user(
        &self,
        user_id: UserId,
        status: SubscriptionStatus,
    ) -> SubkeepResult<Vec<Subscription>> {
        let data = self.read_subscriptions()?;
        Ok(data
            .iter()
            .filter(|s| !s.is_removed())
            .map(|s| &s.subscription)
            .filter(|s| s.user_id == user_id && s.status == status)
            .cloned()
            .collect())
    }

    fn split_policies_for_user(&self, user_id: UserId) -> SubkeepResult<Vec<SplitPolicy>> {
        let data = self.read_subscriptions()?;
        let policies = self
            .policies
            .read()
            .map_err(|e| SubkeepError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(policies
            .iter()
            .filter(|p| {
                data.iter().any(|s| {
                    s.subscription.id == p.subscription_id
                        && s.subscription.user_id == user_id
                        && !s.is_removed()
                })
            })
            .cloned()
            .collect())
    }

    fn soft_remove(&self, id: SubscriptionId) -> SubkeepResult<()> {
        let mut data = self.write_subscriptions()?;
        let stored = data
            .iter_mut()
            .find(|s| s.subscription.id == id && !s.is_removed())
            .ok_or_else(|| SubkeepError::subscription_not_found(id.full()))?;

        stored.removed_at = Some(Utc::now());
        Ok(())
    }

    fn restore(&self, id: SubscriptionId) -> SubkeepResult<()> {
        let mut data = self.write_subscriptions()?;
        let stored = data
            .iter_mut()
            .find(|s| s.subscription.id == id)
            .ok_or_else(|| SubkeepError::subscription_not_found(id.full()))?;

        stored.removed_at = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingPeriod, Money, ShareGroupId};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sub(user: UserId, name: &str, amount: i64) -> Subscription {
        Subscription::new(
            user,
            name,
            Money::from_minor(amount),
            BillingPeriod::Monthly,
            NaiveDate::from_ymd_opt(2025, 1, 10).unwrap(),
        )
    }

    #[test]
    fn test_list_filters_user_status_and_removal() {
        let store = MemoryStore::new();
        let alice = UserId::new();
        let bob = UserId::new();

        let a1 = sub(alice, "Video", 17_000);
        let a2 = sub(alice, "Music", 10_900).with_status(SubscriptionStatus::Paused);
        let a3 = sub(alice, "Cloud", 2_900);
        let b1 = sub(bob, "News", 5_000);
        store.insert(a1.clone()).unwrap();
        store.insert(a2.clone()).unwrap();
        store.insert(a3.clone()).unwrap();
        store.insert(b1).unwrap();

        store.soft_remove(a3.id).unwrap();

        let active = store
            .list_for_user(alice, SubscriptionStatus::Active)
            .unwrap();
        assert_eq!(active, vec![a1]);

        let paused = store
            .list_for_user(alice, SubscriptionStatus::Paused)
            .unwrap();
        assert_eq!(paused, vec![a2]);
    }

    #[test]
    fn test_soft_remove_and_restore() {
        let store = MemoryStore::new();
        let user = UserId::new();
        let s = sub(user, "Video", 17_000);
        store.insert(s.clone()).unwrap();

        store.soft_remove(s.id).unwrap();
        assert!(store.find(s.id).unwrap().is_none());
        assert!(store.is_removed(s.id).unwrap());

        // Removing twice is a miss
        assert!(store.soft_remove(s.id).unwrap_err().is_not_found());

        store.restore(s.id).unwrap();
        assert_eq!(store.find(s.id).unwrap(), Some(s));
    }

    #[test]
    fn test_restore_unknown_is_not_found() {
        let store = MemoryStore::new();
        let err = store.restore(SubscriptionId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_duplicate_subscription_rejected() {
        let store = MemoryStore::new();
        let s = sub(UserId::new(), "Video", 17_000);
        store.insert(s.clone()).unwrap();
        assert!(matches!(
            store.insert(s),
            Err(SubkeepError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_policies_follow_owner_and_removal() {
        let store = MemoryStore::new();
        let user = UserId::new();
        let other = UserId::new();
        let mine = sub(user, "Family plan", 20_000);
        let theirs = sub(other, "Other plan", 20_000);
        store.insert(mine.clone()).unwrap();
        store.insert(theirs.clone()).unwrap();

        let group = ShareGroupId::new();
        store
            .insert_policy(SplitPolicy::equal(mine.id, group, 4))
            .unwrap();
        store
            .insert_policy(SplitPolicy::equal(theirs.id, group, 2))
            .unwrap();

        let policies = store.split_policies_for_user(user).unwrap();
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0].subscription_id, mine.id);

        store.soft_remove(mine.id).unwrap();
        assert!(store.split_policies_for_user(user).unwrap().is_empty());

        assert!(matches!(
            store.insert_policy(SplitPolicy::fixed_ratio(mine.id, group, 0.5)),
            Err(SubkeepError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_invalid_records_rejected() {
        let store = MemoryStore::new();
        let bad = sub(UserId::new(), "Video", 17_000).with_satisfaction(9);
        assert!(matches!(
            store.insert(bad),
            Err(SubkeepError::Validation(_))
        ));
    }

    #[test]
    fn test_portfolio_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("portfolio.json");

        let store = MemoryStore::new();
        let user = UserId::new();
        let kept = sub(user, "Video", 17_000);
        let removed = sub(user, "Music", 10_900);
        store.insert(kept.clone()).unwrap();
        store.insert(removed.clone()).unwrap();
        store.soft_remove(removed.id).unwrap();
        store.save(&path).unwrap();

        let reloaded = MemoryStore::load(&path).unwrap();
        assert_eq!(reloaded.len().unwrap(), 2);
        assert!(reloaded.is_removed(removed.id).unwrap());
        assert_eq!(
            reloaded
                .list_for_user(user, SubscriptionStatus::Active)
                .unwrap(),
            vec![kept]
        );
    }
}
