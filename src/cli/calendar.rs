//! CLI commands for the billing calendar

use crate::display::{format_day_detail, format_monthly_calendar, format_upcoming};
use crate::error::SubkeepResult;
use crate::services::{CalendarService, UpcomingWindow};

use super::{parse_date, parse_month, CliContext};

fn service(ctx: &CliContext) -> CalendarService<'_> {
    CalendarService::new(&ctx.store).with_window(UpcomingWindow::from_settings(&ctx.settings))
}

pub fn handle_calendar_command(ctx: &CliContext, month: &str) -> SubkeepResult<()> {
    let (year, month) = parse_month(month)?;
    let calendar = service(ctx).monthly(ctx.user_id, year, month, ctx.today)?;
    ctx.emit("calendar", &calendar, format_monthly_calendar)
}

pub fn handle_day_command(ctx: &CliContext, date: &str) -> SubkeepResult<()> {
    let date = parse_date(date)?;
    let detail = service(ctx).day_detail(ctx.user_id, date)?;
    ctx.emit("day", &detail, format_day_detail)
}

pub fn handle_upcoming_command(ctx: &CliContext, days: Option<i64>) -> SubkeepResult<()> {
    let upcoming = service(ctx).upcoming(ctx.user_id, days, ctx.today)?;
    ctx.emit("upcoming", &upcoming, format_upcoming)
}
