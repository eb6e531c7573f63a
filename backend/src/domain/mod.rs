//! # Domain Module
//!
//! Business logic of the pet tracker, independent of any UI framework and of
//! the concrete storage backend.
//!
//! ## Module Organization
//!
//! - **pet_store**: the local data store over animals, feeding records and
//!   statistics
//! - **seed**: first-run content
//! - **events**: change notifications for UI layers
//! - **forms**: validation of add/edit input before it reaches the store
//! - **preferences_service**: onboarding and other app-wide flags
//!
//! ## Business Rules
//!
//! - Deleting an animal deletes its feeding records
//! - Feeding records belong to the calendar day of their `date` field
//! - Statistics values have no floor and are never deleted
//! - Persistence problems never surface as errors from the store

pub mod events;
pub mod forms;
pub mod pet_store;
pub mod preferences_service;
pub mod seed;

pub use events::{StoreEvent, SubscriptionId};
pub use forms::{AnimalForm, FeedingForm, MetricForm, ValidationError};
pub use pet_store::{FeedingRecordsOnDay, PetStore};
pub use preferences_service::PreferencesService;
