//! User settings for subkeep
//!
//! Display preferences plus the tunables of the calendar and undo features.
//! Defaults reproduce the documented behavior: a 30-second undo window and an
//! upcoming-payments window of 30 days capped at 90.

use serde::{Deserialize, Serialize};

use super::paths::SubkeepPaths;
use crate::error::SubkeepError;

/// User settings for subkeep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// How long an applied cancellation can be undone
    #[serde(default = "default_undo_window_secs")]
    pub undo_window_secs: i64,

    /// Upcoming-payments window when none (or a non-positive one) is requested
    #[serde(default = "default_upcoming_days")]
    pub upcoming_default_days: i64,

    /// Upper bound for the upcoming-payments window
    #[serde(default = "default_upcoming_max_days")]
    pub upcoming_max_days: i64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₩".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_undo_window_secs() -> i64 {
    30
}

fn default_upcoming_days() -> i64 {
    30
}

fn default_upcoming_max_days() -> i64 {
    90
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            undo_window_secs: default_undo_window_secs(),
            upcoming_default_days: default_upcoming_days(),
            upcoming_max_days: default_upcoming_max_days(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &SubkeepPaths) -> Result<Self, SubkeepError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| SubkeepError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| SubkeepError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &SubkeepPaths) -> Result<(), SubkeepError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| SubkeepError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| SubkeepError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    pub fn validate(&self) -> Result<(), SubkeepError> {
        if self.undo_window_secs < 0 {
            return Err(SubkeepError::Config(
                "undo_window_secs cannot be negative".into(),
            ));
        }
        if self.upcoming_max_days < 1 {
            return Err(SubkeepError::Config(
                "upcoming_max_days must be at least 1".into(),
            ));
        }
        if !(1..=self.upcoming_max_days).contains(&self.upcoming_default_days) {
            return Err(SubkeepError::Config(format!(
                "upcoming_default_days must be between 1 and {}",
                self.upcoming_max_days
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.undo_window_secs, 30);
        assert_eq!(settings.upcoming_default_days, 30);
        assert_eq!(settings.upcoming_max_days, 90);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubkeepPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.currency_symbol = "$".into();
        settings.undo_window_secs = 60;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "$");
        assert_eq!(loaded.undo_window_secs, 60);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"currency_symbol":"€"}"#).unwrap();
        assert_eq!(settings.currency_symbol, "€");
        assert_eq!(settings.upcoming_max_days, 90);
    }

    #[test]
    fn test_rejects_inverted_upcoming_window() {
        let settings = Settings {
            upcoming_default_days: 120,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }
}
