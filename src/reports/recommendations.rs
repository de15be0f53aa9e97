//! Cancel recommendations
//!
//! Flags active subscriptions the user is unhappy with, or that are among the
//! most expensive fifth of the portfolio while scoring 3 or lower.
//! Subscriptions without a satisfaction score are never flagged.

use serde::Serialize;
use std::fmt;

use super::PricedSubscription;
use crate::models::{Money, SubscriptionId};

const LOW_SATISFACTION_MAX: u8 = 2;
const HIGH_COST_SATISFACTION_MAX: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationReason {
    LowSatisfaction,
    HighCostLowSatisfaction,
}

impl fmt::Display for RecommendationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowSatisfaction => write!(f, "low satisfaction"),
            Self::HighCostLowSatisfaction => write!(f, "high cost relative to satisfaction"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelRecommendation {
    pub subscription_id: SubscriptionId,
    pub service_name: String,
    pub monthly_amount: Money,
    pub annual_saving: Money,
    pub satisfaction: Option<u8>,
    pub reason: RecommendationReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CancelRecommendations {
    pub items: Vec<CancelRecommendation>,
}

impl CancelRecommendations {
    pub fn generate(active: &[PricedSubscription]) -> Self {
        if active.is_empty() {
            return Self { items: Vec::new() };
        }

        let mut ranked: Vec<&PricedSubscription> = active.iter().collect();
        ranked.sort_by(|a, b| b.personal.cmp(&a.personal));

        // Share at position ceil(n × 0.2), counted from one
        let top_index = (ranked.len() + 4) / 5;
        let threshold = ranked
            .get(top_index.saturating_sub(1))
            .map(|p| p.personal)
            .unwrap_or_else(Money::zero);

        let mut items: Vec<CancelRecommendation> = ranked
            .into_iter()
            .filter_map(|item| {
                let score = item.subscription.satisfaction?;
                let reason = if score <= LOW_SATISFACTION_MAX {
                    RecommendationReason::LowSatisfaction
                } else if item.personal >= threshold && score <= HIGH_COST_SATISFACTION_MAX {
                    RecommendationReason::HighCostLowSatisfaction
                } else {
                    return None;
                };

                Some(CancelRecommendation {
                    subscription_id: item.subscription.id,
                    service_name: item.subscription.service_name.clone(),
                    monthly_amount: item.personal,
                    annual_saving: item.personal.times(12),
                    satisfaction: Some(score),
                    reason,
                })
            })
            .collect();

        items.sort_by(|a, b| {
            a.satisfaction
                .cmp(&b.satisfaction)
                .then(b.monthly_amount.cmp(&a.monthly_amount))
        });

        Self { items }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Annual saving if every recommendation were followed
    pub fn total_annual_saving(&self) -> Money {
        self.items.iter().map(|r| r.annual_saving).sum()
    }
}
