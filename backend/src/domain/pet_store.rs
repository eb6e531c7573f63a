//! # Pet Store
//!
//! The local data store. Holds the animals, feeding records and statistics
//! collections in memory and mirrors each of them to durable storage in full
//! after every mutation.
//!
//! ## Lifecycle
//!
//! `PetStore::load` runs once per process. Each collection is read from its
//! fixed key; anything missing or undecodable is replaced by a default:
//!
//! - animals: the three seed pets, written back immediately
//! - feeding records: empty, nothing written
//! - statistics: the two seed counters, written back immediately
//!
//! ## Failure Semantics
//!
//! No operation reports an error. Decode failures fall back to defaults,
//! encode and write failures are logged and the in-memory state is kept,
//! updates for unknown ids do nothing.

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use log::{debug, info, warn};
use shared::{Animal, AnimalTypeCount, FeedingRecord, MetricTemplate, StatisticsMetric};
use std::fmt;
use std::slice;
use uuid::Uuid;

use super::events::{StoreEvent, SubscriptionId, Subscribers};
use super::seed::{seed_animals, seed_statistics};
use crate::storage::records::{
    decode_animals, decode_feeding_records, decode_statistics, encode_animals,
    encode_feeding_records, encode_statistics, ANIMALS_KEY, FEEDING_RECORDS_KEY, STATISTICS_KEY,
};
use crate::storage::KeyValueStorage;

pub struct PetStore<S: KeyValueStorage> {
    storage: S,
    animals: Vec<Animal>,
    feeding_records: Vec<FeedingRecord>,
    statistics: Vec<StatisticsMetric>,
    subscribers: Subscribers,
}

impl<S: KeyValueStorage> PetStore<S> {
    /// Load all collections from `storage`, seeding defaults where needed
    pub fn load(storage: S) -> Self {
        let mut store = Self {
            storage,
            animals: Vec::new(),
            feeding_records: Vec::new(),
            statistics: Vec::new(),
            subscribers: Subscribers::new(),
        };

        match store.load_collection(ANIMALS_KEY, decode_animals) {
            Some(animals) => store.animals = animals,
            None => {
                info!("Seeding default animals");
                store.animals = seed_animals();
                store.save_animals();
            }
        }

        if let Some(records) = store.load_collection(FEEDING_RECORDS_KEY, decode_feeding_records) {
            store.feeding_records = records;
        }

        match store.load_collection(STATISTICS_KEY, decode_statistics) {
            Some(statistics) => store.statistics = statistics,
            None => {
                info!("Seeding default statistics");
                store.statistics = seed_statistics();
                store.save_statistics();
            }
        }

        info!(
            "Pet store loaded: {} animals, {} feeding records, {} statistics",
            store.animals.len(),
            store.feeding_records.len(),
            store.statistics.len()
        );

        store
    }

    /// `None` when the key is absent, unreadable or fails to decode
    fn load_collection<T>(&self, key: &str, decode: fn(&[u8]) -> Result<Vec<T>>) -> Option<Vec<T>> {
        let bytes = match self.storage.read(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!("No stored data under '{}'", key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read '{}', using defaults: {:#}", key, e);
                return None;
            }
        };

        match decode(&bytes) {
            Ok(items) => {
                debug!("Loaded {} entries from '{}'", items.len(), key);
                Some(items)
            }
            Err(e) => {
                warn!("Discarding undecodable data under '{}': {:#}", key, e);
                None
            }
        }
    }

    fn persist(&self, key: &str, encoded: Result<Vec<u8>>) {
        let result = encoded.and_then(|bytes| self.storage.write(key, &bytes));
        if let Err(e) = result {
            warn!("Failed to save '{}', keeping unsaved changes in memory: {:#}", key, e);
        }
    }

    fn save_animals(&self) {
        self.persist(ANIMALS_KEY, encode_animals(&self.animals));
    }

    fn save_feeding_records(&self) {
        self.persist(FEEDING_RECORDS_KEY, encode_feeding_records(&self.feeding_records));
    }

    fn save_statistics(&self) {
        self.persist(STATISTICS_KEY, encode_statistics(&self.statistics));
    }

    pub fn animals(&self) -> &[Animal] {
        &self.animals
    }

    pub fn feeding_records(&self) -> &[FeedingRecord] {
        &self.feeding_records
    }

    pub fn statistics(&self) -> &[StatisticsMetric] {
        &self.statistics
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn animal(&self, id: Uuid) -> Option<&Animal> {
        self.animals.iter().find(|a| a.id == id)
    }

    /// Append an animal. Callers validate before calling.
    pub fn add_animal(&mut self, animal: Animal) {
        debug!("Adding animal {} ({})", animal.name, animal.id);
        self.animals.push(animal);
        self.save_animals();
        self.subscribers.emit(StoreEvent::AnimalsChanged);
    }

    /// Replace the animal with the same id. Does nothing if it isn't stored.
    pub fn update_animal(&mut self, animal: Animal) {
        match self.animals.iter_mut().find(|a| a.id == animal.id) {
            Some(existing) => {
                debug!("Updating animal {} ({})", animal.name, animal.id);
                *existing = animal;
            }
            None => {
                debug!("Ignoring update for unknown animal {}", animal.id);
                return;
            }
        }
        self.save_animals();
        self.subscribers.emit(StoreEvent::AnimalsChanged);
    }

    /// Remove the animal and every feeding record that references it
    pub fn delete_animal(&mut self, animal: &Animal) {
        let id = animal.id;

        let animals_before = self.animals.len();
        self.animals.retain(|a| a.id != id);
        let removed_animals = animals_before - self.animals.len();

        let records_before = self.feeding_records.len();
        self.feeding_records.retain(|r| r.animal_id != id);
        let removed_records = records_before - self.feeding_records.len();

        debug!(
            "Deleted animal {}: {} animal entries, {} feeding records",
            id, removed_animals, removed_records
        );

        self.save_animals();
        self.save_feeding_records();

        if removed_animals > 0 {
            self.subscribers.emit(StoreEvent::AnimalsChanged);
        }
        if removed_records > 0 {
            self.subscribers.emit(StoreEvent::FeedingRecordsChanged);
        }
    }

    pub fn add_feeding_record(&mut self, record: FeedingRecord) {
        debug!("Adding feeding record {} for animal {}", record.id, record.animal_id);
        self.feeding_records.push(record);
        self.save_feeding_records();
        self.subscribers.emit(StoreEvent::FeedingRecordsChanged);
    }

    /// Feeding records whose `date` falls on the same local calendar day as `date`
    pub fn feeding_records_for<Tz: TimeZone>(&self, date: &DateTime<Tz>) -> FeedingRecordsOnDay<'_, Local> {
        self.feeding_records_for_in(date, &Local)
    }

    /// Same as `feeding_records_for`, with days taken in the calendar of `tz`
    pub fn feeding_records_for_in<Tz: TimeZone, Z: TimeZone>(
        &self,
        date: &DateTime<Tz>,
        tz: &Z,
    ) -> FeedingRecordsOnDay<'_, Z> {
        FeedingRecordsOnDay {
            records: self.feeding_records.iter(),
            day: date.with_timezone(tz).date_naive(),
            tz: tz.clone(),
            animal_id: None,
        }
    }

    /// One animal's feeding records on the local calendar day of `date`
    pub fn feeding_records_for_animal_on<Tz: TimeZone>(
        &self,
        animal_id: Uuid,
        date: &DateTime<Tz>,
    ) -> FeedingRecordsOnDay<'_, Local> {
        self.feeding_records_for(date).for_animal(animal_id)
    }

    pub fn add_statistic(&mut self, metric: StatisticsMetric) {
        debug!("Adding statistic {} ({})", metric.name, metric.id);
        self.statistics.push(metric);
        self.save_statistics();
        self.subscribers.emit(StoreEvent::StatisticsChanged);
    }

    /// Add a metric named after a catalog template and return it
    pub fn add_statistic_from_template(&mut self, template: &MetricTemplate, initial_value: i64) -> StatisticsMetric {
        let metric = StatisticsMetric::new(template.name, initial_value);
        self.add_statistic(metric.clone());
        metric
    }

    /// Replace the first metric with the same id. Does nothing if none matches.
    pub fn update_statistic(&mut self, metric: StatisticsMetric) {
        match self.statistics.iter_mut().find(|m| m.id == metric.id) {
            Some(existing) => {
                debug!("Updating statistic {} to {}", metric.name, metric.value);
                *existing = metric;
            }
            None => {
                debug!("Ignoring update for unknown statistic {}", metric.id);
                return;
            }
        }
        self.save_statistics();
        self.subscribers.emit(StoreEvent::StatisticsChanged);
    }

    pub fn animal_type_count(&self) -> AnimalTypeCount {
        self.animals
            .iter()
            .fold(AnimalTypeCount::default(), |mut counts, animal| {
                counts.increment(animal.type_info.animal_type);
                counts
            })
    }

    /// Mean age in years, or exactly 0.0 when there are no animals
    pub fn average_age(&self) -> f64 {
        if self.animals.is_empty() {
            return 0.0;
        }
        let total: u64 = self.animals.iter().map(|a| u64::from(a.age)).sum();
        total as f64 / self.animals.len() as f64
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&StoreEvent) + 'static,
    {
        self.subscribers.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }
}

impl<S: KeyValueStorage> fmt::Debug for PetStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PetStore")
            .field("animals", &self.animals.len())
            .field("feeding_records", &self.feeding_records.len())
            .field("statistics", &self.statistics.len())
            .field("subscribers", &self.subscribers)
            .finish()
    }
}

/// Lazy view over the feeding records of one calendar day
pub struct FeedingRecordsOnDay<'a, Z: TimeZone> {
    records: slice::Iter<'a, FeedingRecord>,
    day: NaiveDate,
    tz: Z,
    animal_id: Option<Uuid>,
}

impl<'a, Z: TimeZone> FeedingRecordsOnDay<'a, Z> {
    /// Narrow the view to a single animal
    pub fn for_animal(mut self, animal_id: Uuid) -> Self {
        self.animal_id = Some(animal_id);
        self
    }

    pub fn day(&self) -> NaiveDate {
        self.day
    }
}

impl<'a, Z: TimeZone> Iterator for FeedingRecordsOnDay<'a, Z> {
    type Item = &'a FeedingRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let tz = &self.tz;
        let day = self.day;
        let animal_id = self.animal_id;
        self.records.find(|record| {
            animal_id.map_or(true, |id| record.animal_id == id)
                && record.date.with_timezone(tz).date_naive() == day
        })
    }
}
