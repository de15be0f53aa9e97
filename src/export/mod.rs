//! Export module for subkeep
//!
//! - CSV: category breakdown and monthly trend tables
//! - JSON: any report value, wrapped with schema metadata

pub mod csv;
pub mod json;

pub use self::csv::{export_breakdown_csv, export_trend_csv};
pub use self::json::{export_json, ReportExport, EXPORT_SCHEMA_VERSION};
