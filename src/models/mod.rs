//! Core data models for subkeep
//!
//! Subscriptions, split policies and category references, together with the
//! pure rules that operate on them: period normalization, personal-share
//! resolution and calendar projection.

pub mod category;
pub mod ids;
pub mod money;
pub mod period;
pub mod schedule;
pub mod split;
pub mod subscription;

pub use category::{CategoryLabel, CategoryRef, UNCATEGORIZED_COLOR, UNCATEGORIZED_KEY, UNCATEGORIZED_NAME};
pub use ids::{CategoryId, ShareGroupId, SplitPolicyId, SubscriptionId, UserId};
pub use money::{Money, MoneyParseError};
pub use period::BillingPeriod;
pub use schedule::{billing_date_in_month, billing_day_in_month, last_day_of_month};
pub use split::{SplitIndex, SplitKind, SplitPolicy, SplitValidationError};
pub use subscription::{Subscription, SubscriptionStatus, SubscriptionValidationError};
