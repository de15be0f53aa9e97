//! Cost-sharing policies and the personal-share resolver
//!
//! A split policy links one subscription to one sharing group and says how
//! much of the subscription's monthly-equivalent cost the current user pays.
//! The membership count is a snapshot taken when the policy was linked; it is
//! never recomputed from the live group.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::ids::{ShareGroupId, SplitPolicyId, SubscriptionId};
use super::money::Money;
use super::subscription::Subscription;
use crate::error::{SubkeepError, SubkeepResult};

/// How a shared subscription's cost is divided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitKind {
    /// Divide evenly by the membership snapshot
    Equal,
    /// A fixed personal amount
    #[serde(alias = "custom_amount")]
    FixedAmount,
    /// A fixed fraction of the monthly equivalent
    #[serde(alias = "custom_ratio")]
    FixedRatio,
    /// Unrecognized kind; no sharing is applied
    #[serde(other)]
    Unknown,
}

impl fmt::Display for SplitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equal => "equal",
            Self::FixedAmount => "fixed amount",
            Self::FixedRatio => "fixed ratio",
            Self::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// A split policy attached to a subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPolicy {
    pub id: SplitPolicyId,
    pub subscription_id: SubscriptionId,
    pub group_id: ShareGroupId,
    pub kind: SplitKind,
    /// Personal amount for [`SplitKind::FixedAmount`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_amount: Option<Money>,
    /// Personal fraction in [0, 1] for [`SplitKind::FixedRatio`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ratio: Option<f64>,
    /// Group membership count captured when the policy was linked
    pub members_snapshot: u32,
}

impl SplitPolicy {
    pub fn new(subscription_id: SubscriptionId, group_id: ShareGroupId, kind: SplitKind) -> Self {
        Self {
            id: SplitPolicyId::new(),
            subscription_id,
            group_id,
            kind,
            fixed_amount: None,
            ratio: None,
            members_snapshot: 1,
        }
    }

    pub fn equal(subscription_id: SubscriptionId, group_id: ShareGroupId, members: u32) -> Self {
        Self {
            members_snapshot: members,
            ..Self::new(subscription_id, group_id, SplitKind::Equal)
        }
    }

    pub fn fixed_amount(
        subscription_id: SubscriptionId,
        group_id: ShareGroupId,
        amount: Money,
    ) -> Self {
        Self {
            fixed_amount: Some(amount),
            ..Self::new(subscription_id, group_id, SplitKind::FixedAmount)
        }
    }

    pub fn fixed_ratio(subscription_id: SubscriptionId, group_id: ShareGroupId, ratio: f64) -> Self {
        Self {
            ratio: Some(ratio),
            ..Self::new(subscription_id, group_id, SplitKind::FixedRatio)
        }
    }

    /// The portion of `monthly` the current user owes under this policy
    ///
    /// Never fails: a zero membership snapshot yields the full amount, a
    /// missing fixed amount or ratio yields zero, and an unknown kind yields
    /// the full amount.
    pub fn personal_share(&self, monthly: Money) -> Money {
        match self.kind {
            SplitKind::Equal => {
                if self.members_snapshot == 0 {
                    monthly
                } else {
                    monthly.div_round(i64::from(self.members_snapshot))
                }
            }
            SplitKind::FixedAmount => self.fixed_amount.unwrap_or_else(Money::zero),
            SplitKind::FixedRatio => match self.ratio {
                Some(ratio) => monthly.mul_ratio_round(ratio),
                None => Money::zero(),
            },
            SplitKind::Unknown => {
                tracing::debug!(policy = %self.id, "unknown split kind, applying full amount");
                monthly
            }
        }
    }

    pub fn validate(&self) -> Result<(), SplitValidationError> {
        if let Some(amount) = self.fixed_amount {
            if amount.is_negative() {
                return Err(SplitValidationError::NegativeAmount);
            }
        }

        if let Some(ratio) = self.ratio {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(SplitValidationError::RatioOutOfRange(ratio));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SplitValidationError {
    NegativeAmount,
    RatioOutOfRange(f64),
}

impl fmt::Display for SplitValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Fixed share amount cannot be negative"),
            Self::RatioOutOfRange(r) => write!(f, "Share ratio {} must be between 0 and 1", r),
        }
    }
}

impl std::error::Error for SplitValidationError {}

/// Lookup from subscription to its split policy
///
/// Holds at most one policy per subscription.
#[derive(Debug, Clone, Default)]
pub struct SplitIndex {
    by_subscription: HashMap<SubscriptionId, SplitPolicy>,
}

impl SplitIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index, rejecting a second policy for the same subscription
    pub fn from_policies<I>(policies: I) -> SubkeepResult<Self>
    where
        I: IntoIterator<Item = SplitPolicy>,
    {
        let mut by_subscription = HashMap::new();
        for policy in policies {
            if by_subscription.contains_key(&policy.subscription_id) {
                return Err(SubkeepError::Duplicate {
                    entity_type: "Split policy for subscription",
                    identifier: policy.subscription_id.full(),
                });
            }
            by_subscription.insert(policy.subscription_id, policy);
        }
        Ok(Self { by_subscription })
    }

    pub fn get(&self, subscription_id: &SubscriptionId) -> Option<&SplitPolicy> {
        self.by_subscription.get(subscription_id)
    }

    pub fn len(&self) -> usize {
        self.by_subscription.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_subscription.is_empty()
    }

    /// Personal share of an arbitrary monthly figure for a subscription id
    ///
    /// Without a policy the caller owes the whole amount.
    pub fn personal_share_for(&self, subscription_id: &SubscriptionId, monthly: Money) -> Money {
        match self.get(subscription_id) {
            Some(policy) => policy.personal_share(monthly),
            None => monthly,
        }
    }

    /// Personal monthly share of a subscription
    pub fn personal_monthly(&self, subscription: &Subscription) -> Money {
        self.personal_share_for(&subscription.id, subscription.monthly_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> (SubscriptionId, ShareGroupId) {
        (SubscriptionId::new(), ShareGroupId::new())
    }

    #[test]
    fn test_equal_split_exact() {
        let (sub, group) = ids();
        let policy = SplitPolicy::equal(sub, group, 4);
        assert_eq!(policy.personal_share(Money::from_minor(20_000)).minor(), 5_000);
    }

    #[test]
    fn test_equal_split_rounds() {
        let (sub, group) = ids();
        let policy = SplitPolicy::equal(sub, group, 3);
        // 10000 / 3 = 3333.33
        assert_eq!(policy.personal_share(Money::from_minor(10_000)).minor(), 3_333);
        // 17000 / 3 = 5666.67
        assert_eq!(policy.personal_share(Money::from_minor(17_000)).minor(), 5_667);
    }

    #[test]
    fn test_equal_split_zero_members_returns_full_amount() {
        let (sub, group) = ids();
        let policy = SplitPolicy::equal(sub, group, 0);
        assert_eq!(policy.personal_share(Money::from_minor(10_000)).minor(), 10_000);
    }

    #[test]
    fn test_fixed_amount() {
        let (sub, group) = ids();
        let policy = SplitPolicy::fixed_amount(sub, group, Money::from_minor(4_500));
        assert_eq!(policy.personal_share(Money::from_minor(17_000)).minor(), 4_500);

        let missing = SplitPolicy::new(sub, group, SplitKind::FixedAmount);
        assert_eq!(missing.personal_share(Money::from_minor(17_000)).minor(), 0);
    }

    #[test]
    fn test_fixed_ratio() {
        let (sub, group) = ids();
        let policy = SplitPolicy::fixed_ratio(sub, group, 0.25);
        assert_eq!(policy.personal_share(Money::from_minor(17_000)).minor(), 4_250);

        let missing = SplitPolicy::new(sub, group, SplitKind::FixedRatio);
        assert_eq!(missing.personal_share(Money::from_minor(17_000)).minor(), 0);
    }

    #[test]
    fn test_unknown_kind_returns_full_amount() {
        let json = format!(
            r#"{{"id":"{}","subscription_id":"{}","group_id":"{}","kind":"by_usage","members_snapshot":3}}"#,
            SplitPolicyId::new().full(),
            SubscriptionId::new().full(),
            ShareGroupId::new().full()
        );
        let policy: SplitPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(policy.kind, SplitKind::Unknown);
        assert_eq!(policy.personal_share(Money::from_minor(9_900)).minor(), 9_900);
    }

    #[test]
    fn test_legacy_kind_aliases() {
        let kind: SplitKind = serde_json::from_str("\"custom_ratio\"").unwrap();
        assert_eq!(kind, SplitKind::FixedRatio);
        let kind: SplitKind = serde_json::from_str("\"custom_amount\"").unwrap();
        assert_eq!(kind, SplitKind::FixedAmount);
    }

    #[test]
    fn test_validation() {
        let (sub, group) = ids();
        assert!(SplitPolicy::fixed_ratio(sub, group, 0.5).validate().is_ok());
        assert_eq!(
            SplitPolicy::fixed_ratio(sub, group, 1.5).validate(),
            Err(SplitValidationError::RatioOutOfRange(1.5))
        );
        assert_eq!(
            SplitPolicy::fixed_amount(sub, group, Money::from_minor(-1)).validate(),
            Err(SplitValidationError::NegativeAmount)
        );
    }

    #[test]
    fn test_index_rejects_duplicate_policy() {
        let (sub, group) = ids();
        let result = SplitIndex::from_policies(vec![
            SplitPolicy::equal(sub, group, 2),
            SplitPolicy::fixed_ratio(sub, group, 0.5),
        ]);
        assert!(matches!(result, Err(SubkeepError::Duplicate { .. })));
    }

    #[test]
    fn test_index_without_policy_is_full_amount() {
        let index = SplitIndex::new();
        let sub = SubscriptionId::new();
        assert_eq!(
            index.personal_share_for(&sub, Money::from_minor(12_000)).minor(),
            12_000
        );
    }
}
