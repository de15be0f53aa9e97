//! Dashboard and recommendation rendering

use crate::reports::{CancelRecommendations, CategoryBreakdownEntry, DashboardSummary};

use super::format::{format_bar, format_percentage, format_satisfaction, money, separator, truncate};

const WIDTH: usize = 64;

/// Category table shared by the dashboard, report and simulation views
pub fn format_breakdown(entries: &[CategoryBreakdownEntry], symbol: &str) -> String {
    let mut output = String::new();
    if entries.is_empty() {
        output.push_str("  (no subscriptions)\n");
        return output;
    }

    output.push_str(&format!(
        "  {:<22} {:>12} {:>5} {:>7}  {}\n",
        "Category", "Monthly", "Count", "%", ""
    ));
    for entry in entries {
        output.push_str(&format!(
            "  {:<22} {:>12} {:>5} {:>7}  {}\n",
            truncate(&entry.category_name, 22),
            money(entry.monthly_amount, symbol),
            entry.count,
            format_percentage(entry.percentage),
            format_bar(entry.percentage, 100.0, 12)
        ));
    }
    output
}

pub fn format_dashboard(summary: &DashboardSummary, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str("Subscription Summary\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Monthly total: {}\n",
        money(summary.monthly_total, symbol)
    ));
    output.push_str(&format!(
        "Annual total:  {}\n",
        money(summary.annual_total, symbol)
    ));
    output.push_str(&format!(
        "Active: {}  Paused: {}\n\n",
        summary.active_count, summary.paused_count
    ));
    output.push_str(&format_breakdown(&summary.category_breakdown, symbol));
    output
}

pub fn format_recommendations(recommendations: &CancelRecommendations, symbol: &str) -> String {
    if recommendations.is_empty() {
        return "No cancellations recommended.\n".to_string();
    }

    let mut output = String::new();
    output.push_str("Cancel Recommendations\n");
    output.push_str(&separator(WIDTH));
    output.push('\n');

    for rec in &recommendations.items {
        output.push_str(&format!(
            "{:<24} {:>12}/mo  {}  {}\n",
            truncate(&rec.service_name, 24),
            money(rec.monthly_amount, symbol),
            format_satisfaction(rec.satisfaction),
            rec.reason
        ));
        output.push_str(&format!(
            "  {}  save {} per year\n",
            rec.subscription_id.full(),
            money(rec.annual_saving, symbol)
        ));
    }

    output.push_str(&separator(WIDTH));
    output.push('\n');
    output.push_str(&format!(
        "Potential annual saving: {}\n",
        money(recommendations.total_annual_saving(), symbol)
    ));
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BillingPeriod, Money, SplitIndex, Subscription, UserId};
    use crate::reports::PricedSubscription;
    use chrono::NaiveDate;

    fn priced(name: &str, amount: i64, score: Option<u8>) -> PricedSubscription {
        let mut sub = Subscription::new(
            UserId::new(),
            name,
            Money::from_minor(amount),
            BillingPeriod::Monthly,
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        );
        sub.satisfaction = score;
        PricedSubscription::new(sub, &SplitIndex::new())
    }

    #[test]
    fn test_dashboard_lists_totals_and_buckets() {
        let active = vec![priced("Video", 17_000, None)];
        let summary = DashboardSummary::generate(&active, 1);
        let text = format_dashboard(&summary, "₩");
        assert!(text.contains("Monthly total: ₩17,000"));
        assert!(text.contains("Annual total:  ₩204,000"));
        assert!(text.contains("Uncategorized"));
        assert!(text.contains("100.0%"));
    }

    #[test]
    fn test_empty_recommendations() {
        let recs = CancelRecommendations::generate(&[]);
        assert_eq!(format_recommendations(&recs, "₩"), "No cancellations recommended.\n");
    }

    #[test]
    fn test_recommendation_lines() {
        let recs = CancelRecommendations::generate(&[priced("Video", 17_000, Some(1))]);
        let text = format_recommendations(&recs, "₩");
        assert!(text.contains("low satisfaction"));
        assert!(text.contains("save ₩204,000 per year"));
    }
}
