//! Calendar service
//!
//! Monthly calendar, day detail and upcoming payments over a user's active
//! subscriptions.

use chrono::NaiveDate;

use crate::config::Settings;
use crate::error::{SubkeepError, SubkeepResult};
use crate::models::UserId;
use crate::reports::{DayDetail, MonthlyCalendar, UpcomingPayments};
use crate::storage::SubscriptionStore;

use super::load_active;

/// Bounds for the upcoming-payments window, in days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpcomingWindow {
    pub default_days: i64,
    pub max_days: i64,
}

impl Default for UpcomingWindow {
    fn default() -> Self {
        Self {
            default_days: 30,
            max_days: 90,
        }
    }
}

impl UpcomingWindow {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            default_days: settings.upcoming_default_days,
            max_days: settings.upcoming_max_days,
        }
    }

    /// Missing or non-positive requests get the default; long ones are capped
    pub fn resolve(&self, requested: Option<i64>) -> i64 {
        match requested {
            Some(days) if days > 0 => days.min(self.max_days),
            _ => self.default_days,
        }
    }
}

pub struct CalendarService<'a> {
    store: &'a dyn SubscriptionStore,
    window: UpcomingWindow,
}

impl<'a> CalendarService<'a> {
    pub fn new(store: &'a dyn SubscriptionStore) -> Self {
        Self {
            store,
            window: UpcomingWindow::default(),
        }
    }

    pub fn with_window(mut self, window: UpcomingWindow) -> Self {
        self.window = window;
        self
    }

    /// Day-grouped billing calendar for `year`/`month`
    pub fn monthly(
        &self,
        user_id: UserId,
        year: i32,
        month: u32,
        today: NaiveDate,
    ) -> SubkeepResult<MonthlyCalendar> {
        if !(1..=12).contains(&month) {
            return Err(SubkeepError::BadRequest(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }

        let active = load_active(self.store, user_id)?;
        let calendar = MonthlyCalendar::generate(&active, year, month, today);
        tracing::debug!(
            user = %user_id,
            year,
            month,
            days = calendar.days.len(),
            "generated monthly calendar"
        );
        Ok(calendar)
    }

    /// Subscriptions billed on `date`
    pub fn day_detail(&self, user_id: UserId, date: NaiveDate) -> SubkeepResult<DayDetail> {
        let active = load_active(self.store, user_id)?;
        Ok(DayDetail::generate(&active, date))
    }

    /// Payments due in the next `days` days (window defaults and cap applied)
    pub fn upcoming(
        &self,
        user_id: UserId,
        days: Option<i64>,
        today: NaiveDate,
    ) -> SubkeepResult<UpcomingPayments> {
        let days = self.window.resolve(days);
        let active = load_active(self.store, user_id)?;
        Ok(UpcomingPayments::generate(&active, today, days))
    }
}
