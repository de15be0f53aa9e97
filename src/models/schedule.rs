//! Calendar projection of billing rules
//!
//! Projects "bills every week/month/year from this anchor date" onto a
//! concrete day of a target month. Days past the end of a short month are
//! clamped to its last day, so an anchor on the 31st lands exactly once on
//! the 28th/29th/30th. Weekly billing is modeled by its anchor occurrence
//! only: it appears in the anchor's own month and nowhere else.

use chrono::{Datelike, NaiveDate};

use super::period::BillingPeriod;

/// Number of days in `month` of `year`, or `None` for an invalid month
pub fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    u32::try_from((next_month - first).num_days()).ok()
}

/// Day of the target month on which a subscription bills, or `None` if it
/// does not bill in that month.
///
/// - monthly: every month, on the anchor day (clamped)
/// - yearly: only when the anchor month matches, on the anchor day (clamped)
/// - weekly and unrecognized periods: only in the anchor's own year and month
pub fn billing_day_in_month(
    anchor: NaiveDate,
    period: BillingPeriod,
    year: i32,
    month: u32,
) -> Option<u32> {
    let last_day = last_day_of_month(year, month)?;

    let applies = match period {
        BillingPeriod::Monthly => true,
        BillingPeriod::Yearly => anchor.month() == month,
        BillingPeriod::Weekly | BillingPeriod::Unknown => {
            anchor.year() == year && anchor.month() == month
        }
    };

    applies.then(|| anchor.day().min(last_day))
}

/// Projected billing date within the target month
pub fn billing_date_in_month(
    anchor: NaiveDate,
    period: BillingPeriod,
    year: i32,
    month: u32,
) -> Option<NaiveDate> {
    let day = billing_day_in_month(anchor, period, year, month)?;
    NaiveDate::from_ymd_opt(year, month, day)
}
