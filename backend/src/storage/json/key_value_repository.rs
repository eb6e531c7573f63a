//! # JSON Key-Value Repository
//!
//! File-backed `KeyValueStorage`. Every key is one JSON document in the data
//! directory:
//!
//! ```text
//! data/
//! ├── animals.json
//! ├── feedingRecords.json
//! ├── statistics.json
//! └── preferences.yaml
//! ```
//!
//! Writes go through a temp file followed by a rename, so a reader never sees
//! a half-written document.

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::fs;
use std::io::ErrorKind;

use super::connection::JsonConnection;
use crate::storage::traits::KeyValueStorage;

#[derive(Debug, Clone)]
pub struct JsonKeyValueRepository {
    connection: JsonConnection,
}

impl JsonKeyValueRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    pub fn connection(&self) -> &JsonConnection {
        &self.connection
    }

    fn checked_key<'a>(&self, key: &'a str) -> Result<&'a str> {
        if JsonConnection::is_valid_key(key) {
            Ok(key)
        } else {
            Err(anyhow!("Invalid storage key: {:?}", key))
        }
    }
}

impl KeyValueStorage for JsonKeyValueRepository {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.connection.document_path(self.checked_key(key)?);

        match fs::read(&path) {
            Ok(bytes) => {
                debug!("Read {} bytes from {:?}", bytes.len(), path);
                Ok(Some(bytes))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        let path = self.connection.document_path(self.checked_key(key)?);
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            fs::create_dir_all(base_dir)
                .with_context(|| format!("Failed to create data directory {}", base_dir.display()))?;
        }

        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, &path)
            .with_context(|| format!("Failed to move {} into place", temp_path.display()))?;

        debug!("Wrote {} bytes to {:?}", value.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json::test_utils::TestEnvironment;

    #[test]
    fn test_write_then_read() {
        let env = TestEnvironment::new().unwrap();
        let repo = env.repository();

        repo.write("animals", br#"[{"name":"Luna"}]"#).unwrap();

        let bytes = repo.read("animals").unwrap().expect("document should exist");
        assert_eq!(bytes, br#"[{"name":"Luna"}]"#.to_vec());
        assert!(env.base_directory().join("animals.json").exists());
    }

    #[test]
    fn test_read_missing_key_returns_none() {
        let env = TestEnvironment::new().unwrap();
        let repo = env.repository();

        assert!(repo.read("statistics").unwrap().is_none());
    }

    #[test]
    fn test_write_replaces_and_leaves_no_temp_file() {
        let env = TestEnvironment::new().unwrap();
        let repo = env.repository();

        repo.write("statistics", b"[1]").unwrap();
        repo.write("statistics", b"[2]").unwrap();

        assert_eq!(repo.read("statistics").unwrap(), Some(b"[2]".to_vec()));
        assert!(!env.base_directory().join("statistics.json.tmp").exists());
    }

    #[test]
    fn test_rejects_path_like_keys() {
        let env = TestEnvironment::new().unwrap();
        let repo = env.repository();

        let result = repo.write("../escape", b"[]");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid storage key"));
    }
}
