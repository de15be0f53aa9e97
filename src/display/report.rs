//! Report overview rendering

use crate::reports::ReportOverview;

use super::dashboard::format_breakdown;
use super::format::{double_separator, format_bar, money, separator};

const WIDTH: usize = 64;

pub fn format_overview(overview: &ReportOverview, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str("Subscription Report\n");
    output.push_str(&double_separator(WIDTH));
    output.push('\n');

    let summary = &overview.summary;
    output.push_str(&format!(
        "Subscriptions: {} ({} active, {} paused)\n",
        summary.total_subscriptions, summary.active_count, summary.paused_count
    ));
    match &summary.most_expensive {
        Some(name) => output.push_str(&format!(
            "Most expensive: {} ({}/mo)\n",
            name,
            money(summary.most_expensive_amount, symbol)
        )),
        None => output.push_str("Most expensive: -\n"),
    }
    output.push_str(&format!(
        "Average satisfaction: {:.1}\n\n",
        summary.average_satisfaction
    ));

    let avg = &overview.average_cost;
    output.push_str("Average cost\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!("  Weekly:  {:>14}\n", money(avg.weekly, symbol)));
    output.push_str(&format!("  Monthly: {:>14}\n", money(avg.monthly, symbol)));
    output.push_str(&format!("  Annual:  {:>14}\n\n", money(avg.annual, symbol)));

    output.push_str("By category\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format_breakdown(&overview.category_breakdown, symbol));
    output.push('\n');

    output.push_str("Last 12 months\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    let peak = overview
        .monthly_trend
        .points
        .iter()
        .map(|p| p.amount.minor())
        .max()
        .unwrap_or(0);
    for point in &overview.monthly_trend.points {
        output.push_str(&format!(
            "  {:04}-{:02} {:>14} {:>3}  {}\n",
            point.year,
            point.month,
            money(point.amount, symbol),
            point.count,
            format_bar(point.amount.minor() as f64, peak as f64, 20)
        ));
    }

    output
}
