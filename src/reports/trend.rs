//! Monthly cost trend
//!
//! The trailing twelve calendar months ending with the current one. A
//! subscription counts toward a month once its start date is on or before
//! that month's last day.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::PricedSubscription;
use crate::models::{last_day_of_month, Money};

const TREND_MONTHS: u32 = 12;

/// Cost in one calendar month
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    pub month: u32,
    pub amount: Money,
    pub count: usize,
}

/// Twelve trend points, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyTrend {
    pub points: Vec<TrendPoint>,
}

impl MonthlyTrend {
    /// Build the trend for the twelve months ending with `today`'s month
    pub fn generate(priced: &[PricedSubscription], today: NaiveDate) -> Self {
        let points = (0..TREND_MONTHS)
            .rev()
            .filter_map(|offset| {
                let (year, month) = months_back(today.year(), today.month(), offset);
                let last_day = last_day_of_month(year, month)?;
                let month_end = NaiveDate::from_ymd_opt(year, month, last_day)?;

                let started: Vec<_> = priced
                    .iter()
                    .filter(|p| p.subscription.start_date <= month_end)
                    .collect();

                Some(TrendPoint {
                    year,
                    month,
                    amount: started.iter().map(|p| p.personal).sum(),
                    count: started.len(),
                })
            })
            .collect();

        Self { points }
    }

    pub fn latest(&self) -> Option<&TrendPoint> {
        self.points.last()
    }
}

/// (year, month) `offset` months before the given one
fn months_back(year: i32, month: u32, offset: u32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) - offset as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}
