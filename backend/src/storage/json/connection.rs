use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BackendConfig;

/// JsonConnection owns the data directory and maps storage keys to files in it
#[derive(Debug, Clone)]
pub struct JsonConnection {
    base_directory: PathBuf,
}

impl JsonConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a connection in the directory the configuration points at
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        Self::new(&config.data_directory)
    }

    /// Create a connection in the default data directory
    pub fn new_default() -> Result<Self> {
        let config = BackendConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the JSON document holding `key`
    pub fn document_path(&self, key: &str) -> PathBuf {
        self.base_directory.join(format!("{}.json", key))
    }

    /// Keys become file names, so only a safe subset of characters is allowed
    pub fn is_valid_key(key: &str) -> bool {
        !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b");

        let connection = JsonConnection::new(&nested).unwrap();

        assert!(nested.is_dir());
        assert_eq!(connection.base_directory(), nested.as_path());
    }

    #[test]
    fn test_document_path() {
        let temp_dir = TempDir::new().unwrap();
        let connection = JsonConnection::new(temp_dir.path()).unwrap();

        assert_eq!(
            connection.document_path("feedingRecords"),
            temp_dir.path().join("feedingRecords.json")
        );
    }

    #[test]
    fn test_key_validation() {
        assert!(JsonConnection::is_valid_key("animals"));
        assert!(JsonConnection::is_valid_key("feeding_records-v1"));
        assert!(!JsonConnection::is_valid_key(""));
        assert!(!JsonConnection::is_valid_key("../animals"));
        assert!(!JsonConnection::is_valid_key("a b"));
    }
}
