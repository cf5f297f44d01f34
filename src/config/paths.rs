//! Path management for Deben
//!
//! ## Path Resolution Order
//!
//! 1. `DEBEN_CONFIG_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/deben` or `~/.config/deben`
//! 3. Windows: `%APPDATA%\deben`

use std::path::{Path, PathBuf};

use crate::error::DebenError;

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "DEBEN_CONFIG_DIR";

/// Manages the paths used by Deben
#[derive(Debug, Clone)]
pub struct DebenPaths {
    base_dir: PathBuf,
}

impl DebenPaths {
    /// Resolve the configuration directory
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, DebenError> {
        let base_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create DebenPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ledger used when neither the command line nor the settings name one
    pub fn default_ledger_file(&self) -> PathBuf {
        self.base_dir.join("ledger.txt")
    }
}

/// Resolve the default configuration directory based on platform
#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, DebenError> {
    // Unix (Linux/macOS): Use XDG_CONFIG_HOME if set, otherwise ~/.config
    let config_base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(xdg) => PathBuf::from(xdg),
        None => {
            let home = std::env::var_os("HOME")
                .ok_or_else(|| DebenError::Config("HOME environment variable not set".into()))?;
            PathBuf::from(home).join(".config")
        }
    };
    Ok(config_base.join("deben"))
}

/// Resolve the default configuration directory based on platform
#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, DebenError> {
    let appdata = std::env::var_os("APPDATA")
        .ok_or_else(|| DebenError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("deben"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DebenPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.default_ledger_file(),
            temp_dir.path().join("ledger.txt")
        );
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();

        env::set_var(CONFIG_DIR_ENV, temp_dir.path());
        let paths = DebenPaths::new().unwrap();
        env::remove_var(CONFIG_DIR_ENV);

        assert_eq!(paths.base_dir(), temp_dir.path());
    }
}
