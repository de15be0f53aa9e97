//! CLI commands for the dashboard, recommendations and report

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::display::{format_dashboard, format_overview, format_recommendations};
use crate::error::{SubkeepError, SubkeepResult};
use crate::export::{export_breakdown_csv, export_trend_csv};
use crate::services::{DashboardService, ReportService};

use super::CliContext;

pub fn handle_summary_command(ctx: &CliContext) -> SubkeepResult<()> {
    let summary = DashboardService::new(&ctx.store).summary(ctx.user_id)?;
    ctx.emit("dashboard", &summary, format_dashboard)
}

pub fn handle_recommend_command(ctx: &CliContext) -> SubkeepResult<()> {
    let recommendations = DashboardService::new(&ctx.store).recommendations(ctx.user_id)?;
    ctx.emit("recommendations", &recommendations, format_recommendations)
}

/// Show the report overview, optionally writing its tables to CSV files
pub fn handle_report_command(
    ctx: &CliContext,
    csv: Option<PathBuf>,
    trend_csv: Option<PathBuf>,
) -> SubkeepResult<()> {
    let overview = ReportService::new(&ctx.store).overview(ctx.user_id, ctx.today)?;

    if let Some(path) = csv {
        let file = create_output(&path)?;
        export_breakdown_csv(&overview.category_breakdown, BufWriter::new(file))?;
        eprintln!("Category breakdown exported to: {}", path.display());
    }

    if let Some(path) = trend_csv {
        let file = create_output(&path)?;
        export_trend_csv(&overview.monthly_trend, BufWriter::new(file))?;
        eprintln!("Monthly trend exported to: {}", path.display());
    }

    ctx.emit("report", &overview, format_overview)
}

fn create_output(path: &Path) -> SubkeepResult<File> {
    File::create(path).map_err(|e| {
        SubkeepError::Export(format!("Failed to create {}: {}", path.display(), e))
    })
}
