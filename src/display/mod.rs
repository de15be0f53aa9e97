//! Display formatting for terminal output
//!
//! Renders report and simulation values as plain text. Every renderer takes
//! the currency symbol from settings.

pub mod calendar;
pub mod dashboard;
pub mod format;
pub mod report;
pub mod simulation;

pub use calendar::{format_day_detail, format_monthly_calendar, format_upcoming};
pub use dashboard::{format_breakdown, format_dashboard, format_recommendations};
pub use report::format_overview;
pub use simulation::{format_applied, format_simulation};
