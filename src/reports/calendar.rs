//! Calendar views
//!
//! Day-grouped billing calendar for a month, the detail of a single day, and
//! the upcoming-payments list. The month views place each subscription on
//! its projected (clamped) billing day. The upcoming list instead filters on
//! the literal anchor date stored on the subscription.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::PricedSubscription;
use crate::models::{BillingPeriod, Money, SubscriptionId};

/// One subscription as shown on a calendar day
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub subscription_id: SubscriptionId,
    pub service_name: String,
    /// Amount charged per billing period
    pub amount: Money,
    pub monthly_amount: Money,
    pub personal_amount: Money,
    pub period: BillingPeriod,
    pub category_name: String,
    pub category_color: String,
    pub auto_renew: bool,
}

impl CalendarEntry {
    fn from_priced(item: &PricedSubscription) -> Self {
        let label = item.label();
        Self {
            subscription_id: item.subscription.id,
            service_name: item.subscription.service_name.clone(),
            amount: item.subscription.amount,
            monthly_amount: item.monthly,
            personal_amount: item.personal,
            period: item.subscription.period,
            category_name: label.name,
            category_color: label.color,
            auto_renew: item.subscription.auto_renew,
        }
    }
}

/// A day with at least one billing event
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    /// Sum of personal amounts billed on this day
    pub total_amount: Money,
    pub subscriptions: Vec<CalendarEntry>,
}

/// Billing calendar for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyCalendar {
    pub year: i32,
    pub month: u32,
    pub total_amount: Money,
    pub total_count: usize,
    /// Personal amounts still to be billed on or after today
    pub remaining_amount: Money,
    pub remaining_count: usize,
    /// Days in ascending order
    pub days: Vec<CalendarDay>,
}

impl MonthlyCalendar {
    pub fn generate(
        active: &[PricedSubscription],
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> Self {
        let mut by_day: BTreeMap<NaiveDate, Vec<CalendarEntry>> = BTreeMap::new();
        let mut total_amount = Money::zero();
        let mut total_count = 0;
        let mut remaining_amount = Money::zero();
        let mut remaining_count = 0;

        for item in active {
            let Some(date) = item.subscription.billing_date_in(year, month) else {
                continue;
            };

            total_amount += item.personal;
            total_count += 1;
            if date >= today {
                remaining_amount += item.personal;
                remaining_count += 1;
            }

            by_day
                .entry(date)
                .or_default()
                .push(CalendarEntry::from_priced(item));
        }

        let days = by_day
            .into_iter()
            .map(|(date, subscriptions)| CalendarDay {
                date,
                total_amount: subscriptions.iter().map(|e| e.personal_amount).sum(),
                subscriptions,
            })
            .collect();

        Self {
            year,
            month,
            total_amount,
            total_count,
            remaining_amount,
            remaining_count,
            days,
        }
    }

    pub fn day(&self, date: NaiveDate) -> Option<&CalendarDay> {
        self.days.iter().find(|d| d.date == date)
    }
}

/// Everything billed on one date
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayDetail {
    pub date: NaiveDate,
    pub total_amount: Money,
    pub subscriptions: Vec<CalendarEntry>,
}

impl DayDetail {
    /// Subscriptions whose projected billing day equals `date`
    pub fn generate(active: &[PricedSubscription], date: NaiveDate) -> Self {
        let subscriptions: Vec<CalendarEntry> = active
            .iter()
            .filter(|item| item.subscription.billing_date_in(date.year(), date.month()) == Some(date))
            .map(CalendarEntry::from_priced)
            .collect();

        Self {
            date,
            total_amount: subscriptions.iter().map(|e| e.personal_amount).sum(),
            subscriptions,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}

/// A payment due within the upcoming window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingPayment {
    pub date: NaiveDate,
    pub days_until: i64,
    pub subscription_id: SubscriptionId,
    pub service_name: String,
    pub amount: Money,
    pub personal_amount: Money,
    pub category_name: String,
    pub category_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingPayments {
    pub from: NaiveDate,
    pub days: i64,
    pub payments: Vec<UpcomingPayment>,
}

impl UpcomingPayments {
    /// Payments whose anchor date falls in `[today, today + days]`, soonest first
    ///
    /// `days` is used as given; window clamping is the caller's job.
    pub fn generate(active: &[PricedSubscription], today: NaiveDate, days: i64) -> Self {
        let deadline = today + chrono::Duration::days(days);

        let mut payments: Vec<UpcomingPayment> = active
            .iter()
            .filter(|item| {
                let date = item.subscription.next_billing_date;
                date >= today && date <= deadline
            })
            .map(|item| {
                let label = item.label();
                let date = item.subscription.next_billing_date;
                UpcomingPayment {
                    date,
                    days_until: (date - today).num_days(),
                    subscription_id: item.subscription.id,
                    service_name: item.subscription.service_name.clone(),
                    amount: item.subscription.amount,
                    personal_amount: item.personal,
                    category_name: label.name,
                    category_color: label.color,
                }
            })
            .collect();

        payments.sort_by_key(|p| p.date);

        Self {
            from: today,
            days,
            payments,
        }
    }

    pub fn total_personal(&self) -> Money {
        self.payments.iter().map(|p| p.personal_amount).sum()
    }
}
