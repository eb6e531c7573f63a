//! # JSON File Storage
//!
//! Durable storage on the local filesystem. Collections are stored as JSON
//! documents, one file per key, and app preferences as a YAML file, all in a
//! single data directory managed by [`JsonConnection`].

pub mod connection;
pub mod key_value_repository;
pub mod preferences_repository;

#[cfg(test)]
pub mod test_utils;

pub use connection::JsonConnection;
pub use key_value_repository::JsonKeyValueRepository;
pub use preferences_repository::{Preferences, PreferencesRepository, PreferencesStorage};
