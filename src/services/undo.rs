//! Per-user undo slots
//!
//! One process-wide mutex guards the whole map. Writing a slot and taking a
//! slot are each a single critical section, so two undos racing for the same
//! user cannot both receive the entry. Expiry is checked by the caller when
//! the slot is taken; nothing sweeps stale slots. Slots live in memory only
//! and are lost when the process exits.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::error::{SubkeepError, SubkeepResult};
use crate::models::{SubscriptionId, UserId};

/// The subscriptions removed by the last apply, and when undo stops being allowed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoEntry {
    pub subscription_ids: Vec<SubscriptionId>,
    pub expires_at: DateTime<Utc>,
}

impl UndoEntry {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}

#[derive(Debug, Default)]
pub struct UndoStore {
    entries: Mutex<HashMap<UserId, UndoEntry>>,
}

impl UndoStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the user's slot
    pub fn put(&self, user_id: UserId, entry: UndoEntry) -> SubkeepResult<()> {
        self.lock()?.insert(user_id, entry);
        Ok(())
    }

    /// Remove and return the user's slot
    pub fn take(&self, user_id: UserId) -> SubkeepResult<Option<UndoEntry>> {
        Ok(self.lock()?.remove(&user_id))
    }

    /// Peek at the user's slot without consuming it
    pub fn pending(&self, user_id: UserId) -> SubkeepResult<Option<UndoEntry>> {
        Ok(self.lock()?.get(&user_id).cloned())
    }

    fn lock(&self) -> SubkeepResult<MutexGuard<'_, HashMap<UserId, UndoEntry>>> {
        self.entries
            .lock()
            .map_err(|e| SubkeepError::Internal(format!("Failed to acquire undo lock: {}", e)))
    }
}
