//! Reports module for subkeep
//!
//! Pure builders over already-loaded subscriptions and split policies:
//! category breakdowns, the 12-month trend, averages and summary statistics,
//! cancel recommendations, the dashboard summary and the calendar views.
//! Every money figure is the caller's personal monthly share.

pub mod breakdown;
pub mod calendar;
pub mod dashboard;
pub mod overview;
pub mod recommendations;
pub mod trend;

pub use breakdown::{percentage_of, BreakdownBuilder, CategoryBreakdownEntry};
pub use calendar::{
    CalendarDay, CalendarEntry, DayDetail, MonthlyCalendar, UpcomingPayment, UpcomingPayments,
};
pub use dashboard::DashboardSummary;
pub use overview::{AverageCost, ReportOverview, ReportSummary};
pub use recommendations::{CancelRecommendation, CancelRecommendations, RecommendationReason};
pub use trend::{MonthlyTrend, TrendPoint};

use crate::models::{CategoryLabel, Money, SplitIndex, Subscription};

/// A subscription with its normalized and personal monthly amounts resolved
#[derive(Debug, Clone)]
pub struct PricedSubscription {
    pub subscription: Subscription,
    /// Monthly equivalent before sharing
    pub monthly: Money,
    /// The caller's share of `monthly`
    pub personal: Money,
}

impl PricedSubscription {
    pub fn new(subscription: Subscription, splits: &SplitIndex) -> Self {
        let monthly = subscription.monthly_amount();
        let personal = splits.personal_share_for(&subscription.id, monthly);
        Self {
            subscription,
            monthly,
            personal,
        }
    }

    pub fn label(&self) -> CategoryLabel {
        CategoryLabel::for_category(self.subscription.category.as_ref())
    }
}

/// Price every subscription against the split index
pub fn price_all<'a, I>(subscriptions: I, splits: &SplitIndex) -> Vec<PricedSubscription>
where
    I: IntoIterator<Item = &'a Subscription>,
{
    subscriptions
        .into_iter()
        .map(|s| PricedSubscription::new(s.clone(), splits))
        .collect()
}

/// Sum of personal shares
pub fn personal_total(priced: &[PricedSubscription]) -> Money {
    priced.iter().map(|p| p.personal).sum()
}

/// Breakdown of personal shares by category
pub fn category_breakdown(priced: &[PricedSubscription]) -> Vec<CategoryBreakdownEntry> {
    let mut builder = BreakdownBuilder::new();
    for item in priced {
        builder.add(item.label(), item.personal);
    }
    let total = builder.total();
    builder.finish(total)
}
