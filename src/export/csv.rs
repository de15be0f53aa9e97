//! CSV export of report tables
//!
//! Amounts are written in smallest currency units so spreadsheets can sum
//! them without parsing symbols or separators.

use std::io::Write;

use crate::error::SubkeepResult;
use crate::reports::{CategoryBreakdownEntry, MonthlyTrend};

/// Write a category breakdown as CSV
pub fn export_breakdown_csv<W: Write>(
    entries: &[CategoryBreakdownEntry],
    writer: W,
) -> SubkeepResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["Category ID", "Category", "Color", "Monthly Amount", "Count", "Percentage"])?;

    for entry in entries {
        csv.write_record([
            entry.category_id.clone(),
            entry.category_name.clone(),
            entry.color.clone(),
            entry.monthly_amount.minor().to_string(),
            entry.count.to_string(),
            format!("{:.1}", entry.percentage),
        ])?;
    }

    csv.flush()?;
    Ok(())
}

/// Write the monthly trend as CSV, oldest month first
pub fn export_trend_csv<W: Write>(trend: &MonthlyTrend, writer: W) -> SubkeepResult<()> {
    let mut csv = ::csv::Writer::from_writer(writer);
    csv.write_record(["Month", "Amount", "Count"])?;

    for point in &trend.points {
        csv.write_record([
            format!("{:04}-{:02}", point.year, point.month),
            point.amount.minor().to_string(),
            point.count.to_string(),
        ])?;
    }

    csv.flush()?;
    Ok(())
}
