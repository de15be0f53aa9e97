//! Simulation service
//!
//! "What if" views over a user's active subscriptions, plus the one real
//! mutation: applying a cancellation. An applied cancellation can be undone
//! once, within the undo window, by the same user.
//!
//! Apply and undo do not roll back. If a store write fails part way through,
//! the writes that already succeeded stay in place and the error names the
//! subscription that failed.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::clock::Clock;
use crate::config::Settings;
use crate::error::{SubkeepError, SubkeepResult};
use crate::models::{BillingPeriod, CategoryLabel, Money, SubscriptionId, UserId};
use crate::reports::{BreakdownBuilder, CategoryBreakdownEntry};
use crate::storage::SubscriptionStore;

use super::load_active;
use super::undo::{UndoEntry, UndoStore};

const MAX_NAME_CHARS: usize = 100;
const MAX_ITEM_AMOUNT: i64 = 9_999_999;
const DEFAULT_UNDO_WINDOW_SECS: i64 = 30;

/// Before/after totals of a hypothetical change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationResult {
    pub current_monthly_total: Money,
    pub simulated_monthly_total: Money,
    /// `current - simulated`; negative when the change adds cost
    pub monthly_difference: Money,
    pub annual_difference: Money,
    /// Breakdown of the simulated portfolio
    pub category_breakdown: Vec<CategoryBreakdownEntry>,
}

impl SimulationResult {
    fn new(current: Money, simulated: Money, breakdown: BreakdownBuilder) -> Self {
        let difference = current - simulated;
        Self {
            current_monthly_total: current,
            simulated_monthly_total: simulated,
            monthly_difference: difference,
            annual_difference: difference.times(12),
            category_breakdown: breakdown.finish(simulated),
        }
    }
}

/// A subscription that does not exist yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VirtualItem {
    pub name: String,
    pub amount: Money,
    pub period: BillingPeriod,
    /// Raw category id; shown as-is since no category lookup is available
    #[serde(default)]
    pub category_id: Option<String>,
}

impl VirtualItem {
    pub fn new(name: impl Into<String>, amount: Money, period: BillingPeriod) -> Self {
        Self {
            name: name.into(),
            amount,
            period,
            category_id: None,
        }
    }

    pub fn with_category(mut self, category_id: impl Into<String>) -> Self {
        self.category_id = Some(category_id.into());
        self
    }

    pub fn validate(&self) -> SubkeepResult<()> {
        let name_chars = self.name.trim().chars().count();
        if name_chars == 0 {
            return Err(SubkeepError::BadRequest(
                "Service name cannot be empty".into(),
            ));
        }
        if name_chars > MAX_NAME_CHARS {
            return Err(SubkeepError::BadRequest(format!(
                "Service name cannot exceed {} characters",
                MAX_NAME_CHARS
            )));
        }
        if !(0..=MAX_ITEM_AMOUNT).contains(&self.amount.minor()) {
            return Err(SubkeepError::BadRequest(format!(
                "Amount must be between 0 and {}",
                MAX_ITEM_AMOUNT
            )));
        }
        if !self.period.is_known() {
            return Err(SubkeepError::BadRequest(
                "Billing period must be weekly, monthly or yearly".into(),
            ));
        }
        Ok(())
    }

    fn label(&self) -> CategoryLabel {
        match &self.category_id {
            Some(raw) => CategoryLabel::placeholder(raw),
            None => CategoryLabel::uncategorized(),
        }
    }
}

/// What an apply does to the listed subscriptions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApplyAction {
    Cancel,
}

impl fmt::Display for ApplyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

impl FromStr for ApplyAction {
    type Err = SubkeepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cancel" => Ok(Self::Cancel),
            other => Err(SubkeepError::BadRequest(format!(
                "Unsupported action: {}",
                other
            ))),
        }
    }
}

/// Receipt for an applied cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedSimulation {
    pub action: ApplyAction,
    pub subscription_ids: Vec<SubscriptionId>,
    pub undo_expires_at: DateTime<Utc>,
}

pub struct SimulationService<'a> {
    store: &'a dyn SubscriptionStore,
    undo: Arc<UndoStore>,
    clock: Arc<dyn Clock>,
    undo_window: Duration,
}

impl<'a> SimulationService<'a> {
    pub fn new(store: &'a dyn SubscriptionStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            undo: Arc::new(UndoStore::new()),
            clock,
            undo_window: Duration::seconds(DEFAULT_UNDO_WINDOW_SECS),
        }
    }

    /// Share undo slots with other service instances
    ///
    /// A service built per request must be given the process-wide store, or
    /// every slot it writes is dropped with it.
    pub fn with_undo_store(mut self, undo: Arc<UndoStore>) -> Self {
        self.undo = undo;
        self
    }

    pub fn with_settings(mut self, settings: &Settings) -> Self {
        self.undo_window = Duration::seconds(settings.undo_window_secs);
        self
    }

    pub fn undo_window(&self) -> Duration {
        self.undo_window
    }

    /// Totals with the listed subscriptions removed
    ///
    /// Every id must be one of the user's active subscriptions.
    pub fn simulate_cancel(
        &self,
        user_id: UserId,
        subscription_ids: &[SubscriptionId],
    ) -> SubkeepResult<SimulationResult> {
        if subscription_ids.is_empty() {
            return Err(SubkeepError::BadRequest(
                "At least one subscription id is required".into(),
            ));
        }

        let active = load_active(self.store, user_id)?;
        let active_ids: HashSet<SubscriptionId> =
            active.iter().map(|p| p.subscription.id).collect();
        if let Some(missing) = subscription_ids.iter().find(|id| !active_ids.contains(*id)) {
            return Err(SubkeepError::subscription_not_found(missing.full()));
        }

        let cancelled: HashSet<SubscriptionId> = subscription_ids.iter().copied().collect();
        let mut current = Money::zero();
        let mut breakdown = BreakdownBuilder::new();
        for item in &active {
            current += item.personal;
            if !cancelled.contains(&item.subscription.id) {
                breakdown.add(item.label(), item.personal);
            }
        }

        let simulated = breakdown.total();
        Ok(SimulationResult::new(current, simulated, breakdown))
    }

    /// Totals with a hypothetical subscription added
    pub fn simulate_add(
        &self,
        user_id: UserId,
        item: &VirtualItem,
    ) -> SubkeepResult<SimulationResult> {
        item.validate()?;

        let active = load_active(self.store, user_id)?;
        let mut breakdown = BreakdownBuilder::new();
        for priced in &active {
            breakdown.add(priced.label(), priced.personal);
        }
        let current = breakdown.total();

        let added = item.period.monthly_equivalent(item.amount);
        breakdown.add(item.label(), added);

        Ok(SimulationResult::new(current, current + added, breakdown))
    }

    /// Perform the action for real and open an undo slot
    ///
    /// Repeated ids are collapsed, keeping first-seen order. All ids are
    /// checked for existence and ownership before anything is written. The
    /// undo slot is written before the first removal, replacing any earlier
    /// slot for this user.
    pub fn apply(
        &self,
        user_id: UserId,
        action: ApplyAction,
        subscription_ids: &[SubscriptionId],
    ) -> SubkeepResult<AppliedSimulation> {
        if subscription_ids.is_empty() {
            return Err(SubkeepError::BadRequest(
                "At least one subscription id is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        let subscription_ids: Vec<SubscriptionId> = subscription_ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect();

        for id in &subscription_ids {
            let subscription = self.store.find(*id).map_err(|e| {
                tracing::warn!(subscription = %id, error = %e, "failed to look up subscription");
                SubkeepError::Internal(format!("Failed to look up subscription {}", id.full()))
            })?;

            match subscription {
                None => {
                    tracing::warn!(user = %user_id, subscription = %id, "apply rejected: not found");
                    return Err(SubkeepError::subscription_not_found(id.full()));
                }
                Some(sub) if sub.user_id != user_id => {
                    tracing::warn!(user = %user_id, subscription = %id, "apply rejected: not owner");
                    return Err(SubkeepError::Forbidden(format!(
                        "No access to subscription {}",
                        id.full()
                    )));
                }
                Some(_) => {}
            }
        }

        let undo_expires_at = self.clock.now() + self.undo_window;
        self.undo.put(
            user_id,
            UndoEntry {
                subscription_ids: subscription_ids.clone(),
                expires_at: undo_expires_at,
            },
        )?;

        match action {
            ApplyAction::Cancel => {
                for id in &subscription_ids {
                    self.store.soft_remove(*id).map_err(|e| {
                        tracing::warn!(subscription = %id, error = %e, "failed to cancel subscription");
                        SubkeepError::Internal(format!("Failed to cancel subscription {}", id.full()))
                    })?;
                }
            }
        }

        tracing::info!(
            user = %user_id,
            %action,
            count = subscription_ids.len(),
            "applied simulation"
        );

        Ok(AppliedSimulation {
            action,
            subscription_ids,
            undo_expires_at,
        })
    }

    /// Reverse the user's last apply
    ///
    /// The slot is consumed whether or not the undo succeeds.
    pub fn undo(&self, user_id: UserId) -> SubkeepResult<Vec<SubscriptionId>> {
        let entry = self
            .undo
            .take(user_id)?
            .ok_or_else(|| SubkeepError::undo_not_found(user_id.full()))?;

        if entry.is_expired(self.clock.now()) {
            tracing::warn!(user = %user_id, "undo rejected: window expired");
            return Err(SubkeepError::BadRequest("Undo window has expired".into()));
        }

        for id in &entry.subscription_ids {
            self.store.restore(*id).map_err(|e| {
                tracing::warn!(subscription = %id, error = %e, "failed to restore subscription");
                SubkeepError::Internal(format!("Failed to restore subscription {}", id.full()))
            })?;
        }

        tracing::info!(
            user = %user_id,
            count = entry.subscription_ids.len(),
            "undid simulation"
        );
        Ok(entry.subscription_ids)
    }

    /// When the user's pending undo stops being allowed, if one is open
    pub fn pending_undo(&self, user_id: UserId) -> SubkeepResult<Option<DateTime<Utc>>> {
        let now = self.clock.now();
        Ok(self
            .undo
            .pending(user_id)?
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.expires_at))
    }
}
