//! # Pet Tracker Backend
//!
//! All non-UI logic of the pet tracker: the local data store for animals,
//! feeding records and statistics, its file-backed persistence, and app
//! preferences.
//!
//! ## Architecture
//!
//! ```text
//! UI layer (screens, observe-and-redraw)
//!     ↓
//! Domain layer (PetStore, forms, preferences)
//!     ↓
//! Storage layer (KeyValueStorage, JSON files, YAML preferences)
//! ```
//!
//! Everything is synchronous and meant to be driven from a single UI thread.
//! The UI owns one [`Backend`] and passes it to every screen.

pub mod config;
pub mod domain;
pub mod storage;

use anyhow::Result;
use log::info;

pub use config::BackendConfig;
pub use domain::*;
pub use shared;
pub use storage::{JsonConnection, JsonKeyValueRepository, KeyValueStorage, MemoryKeyValueStore};

use storage::PreferencesRepository;

/// The backend instance the UI holds on to
pub struct Backend {
    pub pet_store: PetStore<JsonKeyValueRepository>,
    pub preferences_service: PreferencesService,
    config: BackendConfig,
}

impl Backend {
    /// Open the backend in the configured data directory
    pub fn new() -> Result<Self> {
        Self::with_config(BackendConfig::from_env()?)
    }

    pub fn with_config(config: BackendConfig) -> Result<Self> {
        info!("Setting up storage in {}", config.data_directory.display());
        let connection = JsonConnection::from_config(&config)?;

        info!("Loading pet store");
        let pet_store = PetStore::load(JsonKeyValueRepository::new(connection.clone()));
        let preferences_service = PreferencesService::new(PreferencesRepository::new(connection));

        Ok(Backend {
            pet_store,
            preferences_service,
            config,
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }
}
