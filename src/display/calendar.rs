//! Calendar rendering

use crate::reports::{CalendarEntry, DayDetail, MonthlyCalendar, UpcomingPayments};

use super::format::{money, separator, truncate};

const WIDTH: usize = 64;

fn format_entry(entry: &CalendarEntry, symbol: &str) -> String {
    let renew = if entry.auto_renew { "" } else { " (no auto-renew)" };
    format!(
        "    {:<24} {:>12} {:<8} {}{}\n",
        truncate(&entry.service_name, 24),
        money(entry.personal_amount, symbol),
        entry.period.as_str(),
        entry.category_name,
        renew
    )
}

pub fn format_monthly_calendar(calendar: &MonthlyCalendar, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Billing calendar {:04}-{:02}\n",
        calendar.year, calendar.month
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    if calendar.days.is_empty() {
        output.push_str("  No billing this month.\n");
    }
    for day in &calendar.days {
        output.push_str(&format!(
            "  {}  {}\n",
            day.date,
            money(day.total_amount, symbol)
        ));
        for entry in &day.subscriptions {
            output.push_str(&format_entry(entry, symbol));
        }
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Total:     {} ({} payments)\n",
        money(calendar.total_amount, symbol),
        calendar.total_count
    ));
    output.push_str(&format!(
        "Remaining: {} ({} payments)\n",
        money(calendar.remaining_amount, symbol),
        calendar.remaining_count
    ));
    output
}

pub fn format_day_detail(detail: &DayDetail, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "{}  {}\n",
        detail.date,
        money(detail.total_amount, symbol)
    ));
    if detail.is_empty() {
        output.push_str("  No billing on this day.\n");
    }
    for entry in &detail.subscriptions {
        output.push_str(&format_entry(entry, symbol));
    }
    output
}

pub fn format_upcoming(upcoming: &UpcomingPayments, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "Upcoming payments, next {} days from {}\n",
        upcoming.days, upcoming.from
    ));
    output.push_str(&separator(WIDTH));
    output.push('\n');

    if upcoming.payments.is_empty() {
        output.push_str("  Nothing due.\n");
        return output;
    }

    for payment in &upcoming.payments {
        let when = match payment.days_until {
            0 => "today".to_string(),
            1 => "tomorrow".to_string(),
            n => format!("in {} days", n),
        };
        output.push_str(&format!(
            "  {}  {:<12} {:<24} {:>12}\n",
            payment.date,
            when,
            truncate(&payment.service_name, 24),
            money(payment.personal_amount, symbol)
        ));
    }
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Total: {}\n",
        money(upcoming.total_personal(), symbol)
    ));
    output
}
