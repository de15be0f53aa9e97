//! Subscription records
//!
//! Subscriptions are owned and persisted by the entity store; the engine
//! reads them and never mutates them directly.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategoryRef;
use super::ids::{SubscriptionId, UserId};
use super::money::Money;
use super::period::BillingPeriod;
use super::schedule;

/// Lifecycle status of a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    #[default]
    Active,
    Paused,
    Cancelled,
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Paused => write!(f, "paused"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// A recurring payment obligation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: SubscriptionId,
    pub user_id: UserId,
    pub service_name: String,
    /// Amount charged once per billing period
    pub amount: Money,
    pub period: BillingPeriod,
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Anchor billing date; the projector derives calendar days from it
    pub next_billing_date: NaiveDate,
    /// First date the subscription was paid for
    pub start_date: NaiveDate,
    #[serde(default)]
    pub status: SubscriptionStatus,
    /// 1 (unhappy) to 5 (happy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub satisfaction: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryRef>,
    #[serde(default = "default_auto_renew")]
    pub auto_renew: bool,
}

fn default_currency() -> String {
    "KRW".to_string()
}

fn default_auto_renew() -> bool {
    true
}

impl Subscription {
    /// Largest accepted amount; keeps weekly-to-annual scaling well inside i64
    pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

    /// Create an active subscription that started on its anchor date
    pub fn new(
        user_id: UserId,
        service_name: impl Into<String>,
        amount: Money,
        period: BillingPeriod,
        next_billing_date: NaiveDate,
    ) -> Self {
        Self {
            id: SubscriptionId::new(),
            user_id,
            service_name: service_name.into(),
            amount,
            period,
            currency: default_currency(),
            next_billing_date,
            start_date: next_billing_date,
            status: SubscriptionStatus::Active,
            satisfaction: None,
            category: None,
            auto_renew: true,
        }
    }

    pub fn with_status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_satisfaction(mut self, score: u8) -> Self {
        self.satisfaction = Some(score);
        self
    }

    pub fn with_category(mut self, category: CategoryRef) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = start_date;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }

    pub fn is_paused(&self) -> bool {
        self.status == SubscriptionStatus::Paused
    }

    /// Monthly-equivalent cost before any cost sharing
    pub fn monthly_amount(&self) -> Money {
        self.period.monthly_equivalent(self.amount)
    }

    /// Annual-equivalent cost before any cost sharing
    pub fn annual_amount(&self) -> Money {
        self.period.annual_equivalent(self.amount)
    }

    /// Day of `year`/`month` on which this subscription bills, if it bills then
    pub fn billing_day_in(&self, year: i32, month: u32) -> Option<u32> {
        schedule::billing_day_in_month(self.next_billing_date, self.period, year, month)
    }

    /// Projected billing date within `year`/`month`, if it bills then
    pub fn billing_date_in(&self, year: i32, month: u32) -> Option<NaiveDate> {
        schedule::billing_date_in_month(self.next_billing_date, self.period, year, month)
    }

    pub fn validate(&self) -> Result<(), SubscriptionValidationError> {
        if self.service_name.trim().is_empty() {
            return Err(SubscriptionValidationError::EmptyName);
        }

        if self.amount.is_negative() {
            return Err(SubscriptionValidationError::NegativeAmount);
        }

        if self.amount.minor() > Self::MAX_AMOUNT {
            return Err(SubscriptionValidationError::AmountTooLarge);
        }

        if let Some(score) = self.satisfaction {
            if !(1..=5).contains(&score) {
                return Err(SubscriptionValidationError::SatisfactionOutOfRange(score));
            }
        }

        Ok(())
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.service_name, self.amount, self.period)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionValidationError {
    EmptyName,
    NegativeAmount,
    AmountTooLarge,
    SatisfactionOutOfRange(u8),
}

impl fmt::Display for SubscriptionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Service name cannot be empty"),
            Self::NegativeAmount => write!(f, "Subscription amount cannot be negative"),
            Self::AmountTooLarge => write!(
                f,
                "Subscription amount cannot exceed {}",
                Subscription::MAX_AMOUNT
            ),
            Self::SatisfactionOutOfRange(s) => {
                write!(f, "Satisfaction score {} must be between 1 and 5", s)
            }
        }
    }
}

impl std::error::Error for SubscriptionValidationError {}
