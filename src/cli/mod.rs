//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Every handler reads
//! from a [`CliContext`] built once per invocation and prints either the
//! terminal rendering or a JSON export of the result.

pub mod calendar;
pub mod report;
pub mod simulate;

pub use calendar::{handle_calendar_command, handle_day_command, handle_upcoming_command};
pub use report::{handle_recommend_command, handle_report_command, handle_summary_command};
pub use simulate::{
    handle_cancel_command, handle_simulate_add_command, handle_simulate_cancel_command,
};

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::Settings;
use crate::error::{SubkeepError, SubkeepResult};
use crate::export::export_json;
use crate::models::{SubscriptionId, UserId};
use crate::services::UndoStore;
use crate::storage::MemoryStore;

/// Everything a handler needs for one invocation
pub struct CliContext {
    pub store: MemoryStore,
    pub data_file: PathBuf,
    pub user_id: UserId,
    pub today: NaiveDate,
    pub json: bool,
    pub settings: Settings,
    /// Undo slots for every simulation service built during this run
    pub undo: Arc<UndoStore>,
}

impl CliContext {
    /// Load the portfolio file; a missing file is an empty portfolio
    pub fn load(
        data_file: PathBuf,
        user_id: UserId,
        today: NaiveDate,
        json: bool,
        settings: Settings,
    ) -> SubkeepResult<Self> {
        let store = if data_file.exists() {
            MemoryStore::load(&data_file)?
        } else {
            tracing::debug!(path = %data_file.display(), "no portfolio file, starting empty");
            MemoryStore::new()
        };

        Ok(Self {
            store,
            data_file,
            user_id,
            today,
            json,
            settings,
            undo: Arc::new(UndoStore::new()),
        })
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// Print a result as JSON or through its terminal renderer
    pub fn emit<T, F>(&self, kind: &str, value: &T, render: F) -> SubkeepResult<()>
    where
        T: Serialize,
        F: FnOnce(&T, &str) -> String,
    {
        if self.json {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            export_json(kind, value, Utc::now(), &mut handle, true)
        } else {
            print!("{}", render(value, self.symbol()));
            Ok(())
        }
    }
}

/// Parse a user id given on the command line or via the environment
pub fn parse_user(raw: Option<&str>) -> SubkeepResult<UserId> {
    let raw = raw.ok_or_else(|| {
        SubkeepError::BadRequest("No user given; pass --user or set SUBKEEP_USER".into())
    })?;
    UserId::from_str(raw.trim())
        .map_err(|e| SubkeepError::BadRequest(format!("Invalid user id '{}': {}", raw, e)))
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(raw: &str) -> SubkeepResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|e| {
        SubkeepError::BadRequest(format!(
            "Invalid date '{}': {}. Use YYYY-MM-DD (e.g., 2025-03-15)",
            raw, e
        ))
    })
}

/// Parse `YYYY-MM` into (year, month)
pub fn parse_month(raw: &str) -> SubkeepResult<(i32, u32)> {
    let invalid = || {
        SubkeepError::BadRequest(format!(
            "Invalid month '{}'. Use YYYY-MM (e.g., 2025-03)",
            raw
        ))
    };

    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Parse subscription ids, rejecting the whole list on the first bad one
pub fn parse_subscription_ids(raw: &[String]) -> SubkeepResult<Vec<SubscriptionId>> {
    raw.iter()
        .map(|s| {
            SubscriptionId::from_str(s.trim()).map_err(|e| {
                SubkeepError::BadRequest(format!("Invalid subscription id '{}': {}", s, e))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert_eq!(parse_month(" 2024-12 ").unwrap(), (2024, 12));
        assert!(parse_month("2025-13").unwrap_err().is_bad_request());
        assert!(parse_month("March").unwrap_err().is_bad_request());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-02-28").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 28).unwrap()
        );
        assert!(parse_date("2025-02-30").is_err());
    }

    #[test]
    fn test_parse_user() {
        let user = UserId::new();
        assert_eq!(parse_user(Some(user.full().as_str())).unwrap(), user);
        assert!(parse_user(None).unwrap_err().is_bad_request());
        assert!(parse_user(Some("nobody")).unwrap_err().is_bad_request());
    }

    #[test]
    fn test_parse_subscription_ids() {
        let id = SubscriptionId::new();
        let parsed = parse_subscription_ids(&[id.full()]).unwrap();
        assert_eq!(parsed, vec![id]);
        assert!(parse_subscription_ids(&["bogus".to_string()]).is_err());
    }

    #[test]
    fn test_missing_portfolio_is_empty() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let ctx = CliContext::load(
            temp_dir.path().join("missing.json"),
            UserId::new(),
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            false,
            Settings::default(),
        )
        .unwrap();
        assert!(ctx.store.is_empty().unwrap());
    }
}
