//! Simulation result rendering

use crate::services::{AppliedSimulation, SimulationResult};

use super::dashboard::format_breakdown;
use super::format::{money, separator, signed_money};

const WIDTH: usize = 64;

pub fn format_simulation(result: &SimulationResult, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str("Simulation\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Current monthly:   {:>14}\n",
        money(result.current_monthly_total, symbol)
    ));
    output.push_str(&format!(
        "Simulated monthly: {:>14}\n",
        money(result.simulated_monthly_total, symbol)
    ));
    output.push_str(&format!(
        "Monthly change:    {:>14}\n",
        signed_money(result.monthly_difference, symbol)
    ));
    output.push_str(&format!(
        "Annual change:     {:>14}\n\n",
        signed_money(result.annual_difference, symbol)
    ));
    output.push_str(&format_breakdown(&result.category_breakdown, symbol));
    output
}

pub fn format_applied(applied: &AppliedSimulation) -> String {
    let mut output = format!(
        "Applied {} to {} subscription(s):\n",
        applied.action,
        applied.subscription_ids.len()
    );
    for id in &applied.subscription_ids {
        output.push_str(&format!("  {}\n", id.full()));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    #[test]
    fn test_added_cost_is_shown_negative() {
        let result = SimulationResult {
            current_monthly_total: Money::from_minor(17_000),
            simulated_monthly_total: Money::from_minor(27_000),
            monthly_difference: Money::from_minor(-10_000),
            annual_difference: Money::from_minor(-120_000),
            category_breakdown: Vec::new(),
        };
        let text = format_simulation(&result, "₩");
        assert!(text.contains("-₩10,000"));
        assert!(text.contains("-₩120,000"));
        assert!(text.contains("₩27,000"));
    }
}
