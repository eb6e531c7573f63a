//! # Storage Module
//!
//! Durable persistence for the pet tracker. The domain layer only sees the
//! [`KeyValueStorage`] trait; the concrete backend can be swapped without
//! touching the store.
//!
//! ## Current Implementation
//!
//! - **json**: one JSON document per key in a data directory, plus the YAML
//!   preferences file
//! - **memory**: shared in-memory map for tests and ephemeral sessions
//! - **records**: the persisted schema and its conversions to the shared
//!   entity types

pub mod json;
pub mod memory;
pub mod records;
pub mod traits;

pub use json::{JsonConnection, JsonKeyValueRepository, Preferences, PreferencesRepository, PreferencesStorage};
pub use memory::MemoryKeyValueStore;
pub use records::{ANIMALS_KEY, FEEDING_RECORDS_KEY, STATISTICS_KEY};
pub use traits::KeyValueStorage;
