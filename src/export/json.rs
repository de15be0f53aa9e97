//! JSON export of report values
//!
//! Wraps any report in a small envelope carrying the schema version, export
//! time and application version.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{SubkeepError, SubkeepResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<'a, T: Serialize> {
    pub schema_version: &'static str,
    pub exported_at: DateTime<Utc>,
    pub app_version: &'static str,
    /// Report kind, e.g. `dashboard` or `calendar`
    pub kind: &'a str,
    pub data: &'a T,
}

impl<'a, T: Serialize> ReportExport<'a, T> {
    pub fn new(kind: &'a str, data: &'a T, exported_at: DateTime<Utc>) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION,
            exported_at,
            app_version: env!("CARGO_PKG_VERSION"),
            kind,
            data,
        }
    }
}

/// Write a report as JSON
pub fn export_json<W, T>(
    kind: &str,
    data: &T,
    exported_at: DateTime<Utc>,
    writer: &mut W,
    pretty: bool,
) -> SubkeepResult<()>
where
    W: Write,
    T: Serialize,
{
    let export = ReportExport::new(kind, data, exported_at);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &export)
    } else {
        serde_json::to_writer(&mut *writer, &export)
    }
    .map_err(|e| SubkeepError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| SubkeepError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::DashboardSummary;

    #[test]
    fn test_export_envelope() {
        let summary = DashboardSummary::generate(&[], 0);
        let mut out = Vec::new();
        export_json("dashboard", &summary, Utc::now(), &mut out, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["kind"], "dashboard");
        assert_eq!(value["data"]["monthly_total"], 0);
        assert!(value["data"]["category_breakdown"].as_array().unwrap().is_empty());
    }
}
