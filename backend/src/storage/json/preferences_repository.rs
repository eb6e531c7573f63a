//! # Preferences Repository
//!
//! App-wide flags that live next to the collections in a single YAML file,
//! `preferences.yaml`, at the root of the data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! has_seen_onboarding: true
//! data_format_version: "1.0"
//! created_at: "2025-09-18T19:30:00Z"
//! updated_at: "2025-09-18T19:35:00Z"
//! ```

use anyhow::{Context, Result};
use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::connection::JsonConnection;

/// Persisted app preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Whether the onboarding walkthrough has been dismissed
    #[serde(default)]
    pub has_seen_onboarding: bool,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for Preferences {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            has_seen_onboarding: false,
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Storage trait for preferences
pub trait PreferencesStorage {
    /// Get the preferences, creating the file with defaults on first access
    fn get_preferences(&self) -> Result<Preferences>;

    fn set_has_seen_onboarding(&self, seen: bool) -> Result<()>;

    fn update_preferences(&self, preferences: &Preferences) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct PreferencesRepository {
    connection: JsonConnection,
}

impl PreferencesRepository {
    pub fn new(connection: JsonConnection) -> Self {
        Self { connection }
    }

    fn preferences_path(&self) -> PathBuf {
        self.connection.base_directory().join("preferences.yaml")
    }

    fn load_or_create(&self) -> Result<Preferences> {
        let path = self.preferences_path();

        if path.exists() {
            let yaml_content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let preferences: Preferences = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            debug!("Loaded preferences from {:?}", path);
            Ok(preferences)
        } else {
            let preferences = Preferences::default();
            self.save(&preferences)?;
            info!("Created default preferences at {:?}", path);
            Ok(preferences)
        }
    }

    fn save(&self, preferences: &Preferences) -> Result<()> {
        let path = self.preferences_path();
        let base_dir = self.connection.base_directory();

        if !base_dir.exists() {
            fs::create_dir_all(base_dir)?;
            info!("Created base data directory: {:?}", base_dir);
        }

        let yaml_content = serde_yaml::to_string(preferences)?;

        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml_content)?;
        fs::rename(&temp_path, &path)?;

        debug!("Saved preferences to {:?}", path);
        Ok(())
    }
}

impl PreferencesStorage for PreferencesRepository {
    fn get_preferences(&self) -> Result<Preferences> {
        self.load_or_create()
    }

    fn set_has_seen_onboarding(&self, seen: bool) -> Result<()> {
        let mut preferences = self.load_or_create()?;
        preferences.has_seen_onboarding = seen;
        preferences.updated_at = Utc::now().to_rfc3339();

        self.save(&preferences)?;
        info!("Set has_seen_onboarding to {}", seen);
        Ok(())
    }

    fn update_preferences(&self, preferences: &Preferences) -> Result<()> {
        let mut updated = preferences.clone();
        updated.updated_at = Utc::now().to_rfc3339();

        self.save(&updated)?;
        info!("Updated preferences");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_repo() -> (PreferencesRepository, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let connection = JsonConnection::new(temp_dir.path()).expect("Failed to create connection");
        (PreferencesRepository::new(connection), temp_dir)
    }

    #[test]
    fn test_get_preferences_creates_default() {
        let (repo, temp_dir) = setup_test_repo();

        let preferences = repo.get_preferences().unwrap();
        assert!(!preferences.has_seen_onboarding);
        assert_eq!(preferences.data_format_version, "1.0");
        assert!(!preferences.created_at.is_empty());
        assert!(temp_dir.path().join("preferences.yaml").exists());
    }

    #[test]
    fn test_set_has_seen_onboarding_persists() {
        let (repo, temp_dir) = setup_test_repo();

        repo.set_has_seen_onboarding(true).unwrap();

        // New repository instance, as after an app restart
        let connection = JsonConnection::new(temp_dir.path()).unwrap();
        let repo2 = PreferencesRepository::new(connection);
        assert!(repo2.get_preferences().unwrap().has_seen_onboarding);
    }

    #[test]
    fn test_update_preferences() {
        let (repo, _temp_dir) = setup_test_repo();

        let mut preferences = repo.get_preferences().unwrap();
        preferences.data_format_version = "2.0".to_string();
        repo.update_preferences(&preferences).unwrap();

        let reloaded = repo.get_preferences().unwrap();
        assert_eq!(reloaded.data_format_version, "2.0");
        assert_eq!(reloaded.created_at, preferences.created_at);
    }

    #[test]
    fn test_corrupt_preferences_is_an_error() {
        let (repo, temp_dir) = setup_test_repo();
        fs::write(temp_dir.path().join("preferences.yaml"), "has_seen_onboarding: [").unwrap();

        let result = repo.get_preferences();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to parse"));
    }
}
