//! Report overview
//!
//! Category breakdown, 12-month trend, average cost and summary statistics in
//! one value. Breakdown and averages cover active subscriptions; the trend
//! and summary also include paused ones.

use chrono::NaiveDate;
use serde::Serialize;

use super::trend::MonthlyTrend;
use super::{category_breakdown, personal_total, CategoryBreakdownEntry, PricedSubscription};
use crate::models::Money;

const WEEKS_PER_YEAR: i64 = 52;

/// Current average spend at three granularities
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AverageCost {
    pub monthly: Money,
    pub annual: Money,
    pub weekly: Money,
}

impl AverageCost {
    pub fn from_monthly(monthly: Money) -> Self {
        let annual = monthly.times(12);
        let weekly = if monthly.is_positive() {
            annual.div_round(WEEKS_PER_YEAR)
        } else {
            Money::zero()
        };
        Self {
            monthly,
            annual,
            weekly,
        }
    }
}

/// Portfolio summary statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_subscriptions: usize,
    pub active_count: usize,
    pub paused_count: usize,
    /// Service with the highest personal share; `None` when every share is zero
    pub most_expensive: Option<String>,
    pub most_expensive_amount: Money,
    /// Mean satisfaction of scored subscriptions, one decimal; 0.0 when none are scored
    pub average_satisfaction: f64,
}

impl ReportSummary {
    pub fn generate(active: &[PricedSubscription], paused: &[PricedSubscription]) -> Self {
        let mut most_expensive = None;
        let mut most_expensive_amount = Money::zero();
        let mut satisfaction_sum = 0u32;
        let mut satisfaction_count = 0u32;

        for item in active.iter().chain(paused) {
            if let Some(score) = item.subscription.satisfaction {
                satisfaction_sum += u32::from(score);
                satisfaction_count += 1;
            }

            // Strictly greater: the first subscription reaching the maximum wins
            if item.personal > most_expensive_amount {
                most_expensive_amount = item.personal;
                most_expensive = Some(item.subscription.service_name.clone());
            }
        }

        let average_satisfaction = if satisfaction_count > 0 {
            (f64::from(satisfaction_sum) / f64::from(satisfaction_count) * 10.0).round() / 10.0
        } else {
            0.0
        };

        Self {
            total_subscriptions: active.len() + paused.len(),
            active_count: active.len(),
            paused_count: paused.len(),
            most_expensive,
            most_expensive_amount,
            average_satisfaction,
        }
    }
}

/// Everything the report screen shows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOverview {
    pub category_breakdown: Vec<CategoryBreakdownEntry>,
    pub monthly_trend: MonthlyTrend,
    pub average_cost: AverageCost,
    pub summary: ReportSummary,
}

impl ReportOverview {
    pub fn generate(
        active: &[PricedSubscription],
        paused: &[PricedSubscription],
        today: NaiveDate,
    ) -> Self {
        let all: Vec<PricedSubscription> = active.iter().chain(paused).cloned().collect();

        Self {
            category_breakdown: category_breakdown(active),
            monthly_trend: MonthlyTrend::generate(&all, today),
            average_cost: AverageCost::from_monthly(personal_total(active)),
            summary: ReportSummary::generate(active, paused),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingPeriod, SplitIndex, Subscription, SubscriptionStatus, UserId};

    fn priced(name: &str, amount: i64, score: Option<u8>) -> PricedSubscription {
        let mut sub = Subscription::new(
            UserId::new(),
            name,
            Money::from_minor(amount),
            BillingPeriod::Monthly,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        );
        sub.satisfaction = score;
        PricedSubscription::new(sub, &SplitIndex::new())
    }

    #[test]
    fn test_average_cost() {
        let avg = AverageCost::from_monthly(Money::from_minor(10_000));
        assert_eq!(avg.annual.minor(), 120_000);
        // 120000 / 52 = 2307.69
        assert_eq!(avg.weekly.minor(), 2_308);

        let none = AverageCost::from_monthly(Money::zero());
        assert!(none.weekly.is_zero());
        assert!(none.annual.is_zero());
    }

    #[test]
    fn test_summary_first_maximum_wins() {
        let active = vec![
            priced("First", 17_000, Some(4)),
            priced("Second", 17_000, Some(3)),
        ];
        let mut paused_item = priced("Paused", 5_000, None);
        paused_item.subscription.status = SubscriptionStatus::Paused;
        let paused = vec![paused_item];

        let summary = ReportSummary::generate(&active, &paused);
        assert_eq!(summary.total_subscriptions, 3);
        assert_eq!(summary.active_count, 2);
        assert_eq!(summary.paused_count, 1);
        assert_eq!(summary.most_expensive.as_deref(), Some("First"));
        assert_eq!(summary.most_expensive_amount.minor(), 17_000);
        assert_eq!(summary.average_satisfaction, 3.5);
    }

    #[test]
    fn test_summary_all_zero_has_no_most_expensive() {
        let active = vec![priced("Free tier", 0, None)];
        let summary = ReportSummary::generate(&active, &[]);
        assert!(summary.most_expensive.is_none());
        assert_eq!(summary.average_satisfaction, 0.0);
    }

    #[test]
    fn test_satisfaction_rounds_to_one_decimal() {
        let active = vec![
            priced("A", 1_000, Some(4)),
            priced("B", 1_000, Some(4)),
            priced("C", 1_000, Some(5)),
        ];
        // 13 / 3 = 4.333
        assert_eq!(ReportSummary::generate(&active, &[]).average_satisfaction, 4.3);
    }

    #[test]
    fn test_overview_on_empty_portfolio() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let overview = ReportOverview::generate(&[], &[], today);
        assert!(overview.category_breakdown.is_empty());
        assert_eq!(overview.monthly_trend.points.len(), 12);
        assert!(overview.average_cost.monthly.is_zero());
        assert_eq!(overview.summary.total_subscriptions, 0);
    }

    #[test]
    fn test_overview_breakdown_excludes_paused() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let active = vec![priced("Video", 17_000, None)];
        let mut paused_item = priced("Music", 10_000, None);
        paused_item.subscription.status = SubscriptionStatus::Paused;

        let overview = ReportOverview::generate(&active, &[paused_item], today);
        assert_eq!(overview.category_breakdown.len(), 1);
        assert_eq!(overview.category_breakdown[0].monthly_amount.minor(), 17_000);
        assert_eq!(overview.average_cost.monthly.minor(), 17_000);
        assert_eq!(
            overview.monthly_trend.latest().unwrap().amount.minor(),
            27_000
        );
    }
}
