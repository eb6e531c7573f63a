//! Test utilities for on-disk storage tests
//!
//! `TestEnvironment` owns a temporary data directory that is removed when the
//! environment is dropped, even if the test panics.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::connection::JsonConnection;
use super::key_value_repository::JsonKeyValueRepository;

/// RAII test environment around a temporary data directory
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: JsonConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        Self::from_temp_dir(temp_dir)
    }

    /// Same as `new`, with a recognizable directory prefix for debugging
    pub fn new_with_prefix(prefix: &str) -> Result<Self> {
        let temp_dir = TempDir::with_prefix(prefix)?;
        Self::from_temp_dir(temp_dir)
    }

    fn from_temp_dir(temp_dir: TempDir) -> Result<Self> {
        init_test_logging();
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_path
    }

    /// A fresh repository over this environment's directory
    pub fn repository(&self) -> JsonKeyValueRepository {
        JsonKeyValueRepository::new(self.connection.clone())
    }
}

/// Route `log` output through the test harness. Safe to call repeatedly.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;

        {
            let env = TestEnvironment::new()?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());

            std::fs::write(base_path.join("animals.json"), "[]")?;
        }

        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_environment_with_prefix() -> Result<()> {
        let env = TestEnvironment::new_with_prefix("pet_tracker_test")?;
        let dir_name = env
            .base_directory()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        assert!(dir_name.starts_with("pet_tracker_test"));
        Ok(())
    }
}
