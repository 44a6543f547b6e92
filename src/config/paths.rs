//! Path management for Splitbook
//!
//! Provides XDG-compliant path resolution for the configuration directory.
//!
//! ## Path Resolution Order
//!
//! 1. `SPLITBOOK_CONFIG_DIR` environment variable (if set)
//! 2. `$XDG_CONFIG_HOME/splitbook` (if set)
//! 3. The platform config directory (`~/.config/splitbook`,
//!    `~/Library/Application Support/splitbook`, `%APPDATA%\splitbook`)

use std::path::PathBuf;

use directories::BaseDirs;

use crate::error::SplitbookError;

/// Environment variable overriding the base directory
pub const CONFIG_DIR_ENV: &str = "SPLITBOOK_CONFIG_DIR";

/// Manages all paths used by Splitbook
#[derive(Debug, Clone)]
pub struct SplitbookPaths {
    /// Base directory for all Splitbook files
    base_dir: PathBuf,
}

impl SplitbookPaths {
    /// Create a new SplitbookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, SplitbookError> {
        let base_dir = if let Ok(custom) = std::env::var(CONFIG_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create SplitbookPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), SplitbookError> {
        std::fs::create_dir_all(&self.base_dir).map_err(|e| {
            SplitbookError::Io(format!("Failed to create config directory: {}", e))
        })
    }

    /// Check if Splitbook has been initialized (config file exists)
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

/// Resolve the default config directory based on platform
fn resolve_default_path() -> Result<PathBuf, SplitbookError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Ok(PathBuf::from(xdg).join("splitbook"));
        }
    }

    let dirs = BaseDirs::new()
        .ok_or_else(|| SplitbookError::Config("Could not determine home directory".into()))?;
    Ok(dirs.config_dir().join("splitbook"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitbookPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert!(!paths.is_initialized());
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        std::env::set_var(CONFIG_DIR_ENV, custom_path);
        let paths = SplitbookPaths::new().unwrap();
        std::env::remove_var(CONFIG_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = SplitbookPaths::with_base_dir(temp_dir.path().join("nested").join("splitbook"));

        paths.ensure_directories().unwrap();
        assert!(paths.base_dir().exists());
    }
}
