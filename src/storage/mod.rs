//! Entity-store seam
//!
//! Persistence belongs to the surrounding application. The engine talks to it
//! through [`SubscriptionStore`], which hands out already-owned subscription
//! records and split policies and performs the soft-removal/restore writes
//! used by the simulation "apply" and "undo" actions.
//!
//! [`MemoryStore`] is the in-process implementation used by the CLI (loaded
//! from a JSON portfolio file) and by tests.

pub mod file_io;
pub mod memory;
pub mod portfolio;

pub use file_io::{read_json_required, write_json_atomic};
pub use memory::MemoryStore;
pub use portfolio::{PortfolioFile, StoredSubscription};

use crate::error::SubkeepResult;
use crate::models::{SplitPolicy, Subscription, SubscriptionId, SubscriptionStatus, UserId};

/// Read and soft-delete access to a user's subscriptions
pub trait SubscriptionStore: Send + Sync {
    /// A subscription that has not been soft-removed
    fn find(&self, id: SubscriptionId) -> SubkeepResult<Option<Subscription>>;

    /// The user's non-removed subscriptions with the given status, in a stable order
    fn list_for_user(
        &self,
        user_id: UserId,
        status: SubscriptionStatus,
    ) -> SubkeepResult<Vec<Subscription>>;

    /// Split policies attached to the user's non-removed subscriptions
    fn split_policies_for_user(&self, user_id: UserId) -> SubkeepResult<Vec<SplitPolicy>>;

    /// Soft-remove a subscription so it no longer appears in reads
    fn soft_remove(&self, id: SubscriptionId) -> SubkeepResult<()>;

    /// Reverse a soft removal
    fn restore(&self, id: SubscriptionId) -> SubkeepResult<()>;
}
