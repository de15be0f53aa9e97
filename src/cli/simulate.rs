//! CLI commands for simulations and applied cancellations

use std::str::FromStr;
use std::sync::Arc;

use crate::clock::SystemClock;
use crate::display::{format_applied, format_simulation};
use crate::error::{SubkeepError, SubkeepResult};
use crate::models::{BillingPeriod, Money};
use crate::services::{ApplyAction, SimulationService, VirtualItem};

use super::{parse_subscription_ids, CliContext};

fn service(ctx: &CliContext) -> SimulationService<'_> {
    SimulationService::new(&ctx.store, Arc::new(SystemClock))
        .with_settings(&ctx.settings)
        .with_undo_store(ctx.undo.clone())
}

pub fn handle_simulate_cancel_command(ctx: &CliContext, ids: &[String]) -> SubkeepResult<()> {
    let ids = parse_subscription_ids(ids)?;
    let result = service(ctx).simulate_cancel(ctx.user_id, &ids)?;
    ctx.emit("simulation", &result, format_simulation)
}

pub fn handle_simulate_add_command(
    ctx: &CliContext,
    name: &str,
    amount: &str,
    period: &str,
    category: Option<String>,
) -> SubkeepResult<()> {
    let amount = Money::parse(amount)
        .map_err(|e| SubkeepError::BadRequest(format!("Invalid amount: {}", e)))?;
    let period = BillingPeriod::from_str(period).map_err(SubkeepError::BadRequest)?;

    let item = VirtualItem {
        name: name.to_string(),
        amount,
        period,
        category_id: category,
    };
    let result = service(ctx).simulate_add(ctx.user_id, &item)?;
    ctx.emit("simulation", &result, format_simulation)
}

/// Apply a cancellation and write the portfolio back
///
/// The undo slot lives only as long as this process, so it is gone once the
/// command returns.
pub fn handle_cancel_command(ctx: &CliContext, ids: &[String]) -> SubkeepResult<()> {
    let ids = parse_subscription_ids(ids)?;
    let applied = service(ctx).apply(ctx.user_id, ApplyAction::Cancel, &ids)?;
    ctx.store.save(&ctx.data_file)?;

    ctx.emit("applied", &applied, |applied, _| {
        let mut output = format_applied(applied);
        output.push_str("Undo is held in memory and is not available after this command exits.\n");
        output
    })
}
