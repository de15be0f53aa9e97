//! Path management for subkeep
//!
//! ## Path Resolution Order
//!
//! 1. `SUBKEEP_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/subkeep` or `~/.config/subkeep`
//! 3. Windows: `%APPDATA%\subkeep`

use std::path::PathBuf;

use crate::error::SubkeepError;

/// Manages all paths used by subkeep
#[derive(Debug, Clone)]
pub struct SubkeepPaths {
    base_dir: PathBuf,
}

impl SubkeepPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if neither the override nor a home directory is available.
    pub fn new() -> Result<Self, SubkeepError> {
        let base_dir = if let Ok(custom) = std::env::var("SUBKEEP_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (~/.config/subkeep/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the default portfolio (subscriptions + split policies)
    pub fn portfolio_file(&self) -> PathBuf {
        self.data_dir().join("portfolio.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), SubkeepError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| SubkeepError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| SubkeepError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, SubkeepError> {
    let config_base = match std::env::var("XDG_CONFIG_HOME") {
        Ok(dir) => PathBuf::from(dir),
        Err(_) => {
            let home = std::env::var("HOME")
                .map_err(|_| SubkeepError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("subkeep"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, SubkeepError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| SubkeepError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("subkeep"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubkeepPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.portfolio_file(),
            temp_dir.path().join("data").join("portfolio.json")
        );
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SubkeepPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.data_dir().exists());
    }
}
