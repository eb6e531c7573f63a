//! Backend configuration.
//!
//! The only thing that varies between installs is where the data lives.
//! `PET_TRACKER_DATA_DIR` overrides the platform default.

use anyhow::{anyhow, Result};
use log::info;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "PET_TRACKER_DATA_DIR";

/// Folder created inside the platform data directory
pub const DEFAULT_DIRECTORY_NAME: &str = "Pet Tracker";

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub data_directory: PathBuf,
}

impl BackendConfig {
    /// Resolve the data directory from the environment, falling back to the
    /// platform data directory and then the home directory
    pub fn from_env() -> Result<Self> {
        if let Some(dir) = env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            let data_directory = PathBuf::from(dir);
            info!("Using data directory from {}: {}", DATA_DIR_ENV, data_directory.display());
            return Ok(Self { data_directory });
        }

        let base = dirs::data_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow!("Could not determine a data or home directory"))?;
        let data_directory = base.join(DEFAULT_DIRECTORY_NAME);

        info!("Using default data directory: {}", data_directory.display());
        Ok(Self { data_directory })
    }

    pub fn with_data_directory<P: AsRef<Path>>(data_directory: P) -> Self {
        Self {
            data_directory: data_directory.as_ref().to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_data_directory() {
        let config = BackendConfig::with_data_directory("/tmp/pets");
        assert_eq!(config.data_directory, PathBuf::from("/tmp/pets"));
    }

    #[test]
    fn test_default_directory_name() {
        // Only checks the fallback branch when the override is absent
        if env::var_os(DATA_DIR_ENV).is_none() {
            if let Ok(config) = BackendConfig::from_env() {
                assert!(config.data_directory.ends_with(DEFAULT_DIRECTORY_NAME));
            }
        }
    }
}
