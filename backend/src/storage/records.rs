//! # Persisted Records
//!
//! On-disk shape of the three collections. These structs are the storage
//! schema: field names and storage keys must stay stable or previously saved
//! data stops decoding. Each collection is stored as a JSON array:
//!
//! ```json
//! [{"id":"6f1c…","name":"Luna","typeInfo":{"type":"Cat","customType":null},"age":3,"notes":"…"}]
//! [{"id":"…","animalId":"…","foodType":"Dry food","time":"2024-01-05T08:00:00Z","date":"2024-01-05T08:00:00Z"}]
//! [{"id":"…","name":"Walks","value":0}]
//! ```

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{Animal, AnimalType, AnimalTypeInfo, FeedingRecord, StatisticsMetric};
use uuid::Uuid;

pub const ANIMALS_KEY: &str = "animals";
pub const FEEDING_RECORDS_KEY: &str = "feedingRecords";
pub const STATISTICS_KEY: &str = "statistics";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalTypeInfoRecord {
    #[serde(rename = "type")]
    pub animal_type: String,
    pub custom_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalRecord {
    pub id: String,
    pub name: String,
    pub type_info: AnimalTypeInfoRecord,
    pub age: u32,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingRecordRecord {
    pub id: String,
    pub animal_id: String,
    pub food_type: String,
    /// RFC 3339
    pub time: String,
    /// RFC 3339
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsMetricRecord {
    pub id: String,
    pub name: String,
    pub value: i64,
}

impl From<&Animal> for AnimalRecord {
    fn from(animal: &Animal) -> Self {
        AnimalRecord {
            id: animal.id.to_string(),
            name: animal.name.clone(),
            type_info: AnimalTypeInfoRecord {
                animal_type: animal.type_info.animal_type.to_string(),
                custom_type: animal.type_info.custom_type.clone(),
            },
            age: animal.age,
            notes: animal.notes.clone(),
        }
    }
}

impl TryFrom<AnimalRecord> for Animal {
    type Error = anyhow::Error;

    fn try_from(record: AnimalRecord) -> Result<Self> {
        let animal_type: AnimalType = record
            .type_info
            .animal_type
            .parse()
            .with_context(|| format!("Invalid type for animal {}", record.id))?;

        Ok(Animal {
            id: parse_id(&record.id)?,
            name: record.name,
            type_info: AnimalTypeInfo {
                animal_type,
                custom_type: record.type_info.custom_type,
            },
            age: record.age,
            notes: record.notes,
        })
    }
}

impl From<&FeedingRecord> for FeedingRecordRecord {
    fn from(record: &FeedingRecord) -> Self {
        FeedingRecordRecord {
            id: record.id.to_string(),
            animal_id: record.animal_id.to_string(),
            food_type: record.food_type.clone(),
            time: record.time.to_rfc3339(),
            date: record.date.to_rfc3339(),
        }
    }
}

impl TryFrom<FeedingRecordRecord> for FeedingRecord {
    type Error = anyhow::Error;

    fn try_from(record: FeedingRecordRecord) -> Result<Self> {
        Ok(FeedingRecord {
            id: parse_id(&record.id)?,
            animal_id: parse_id(&record.animal_id)?,
            food_type: record.food_type,
            time: parse_timestamp(&record.time)?,
            date: parse_timestamp(&record.date)?,
        })
    }
}

impl From<&StatisticsMetric> for StatisticsMetricRecord {
    fn from(metric: &StatisticsMetric) -> Self {
        StatisticsMetricRecord {
            id: metric.id.to_string(),
            name: metric.name.clone(),
            value: metric.value,
        }
    }
}

impl TryFrom<StatisticsMetricRecord> for StatisticsMetric {
    type Error = anyhow::Error;

    fn try_from(record: StatisticsMetricRecord) -> Result<Self> {
        Ok(StatisticsMetric {
            id: parse_id(&record.id)?,
            name: record.name,
            value: record.value,
        })
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).with_context(|| format!("Invalid id: {}", id))
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    let parsed = DateTime::parse_from_rfc3339(value)
        .with_context(|| format!("Invalid timestamp: {}", value))?;
    Ok(parsed.with_timezone(&Utc))
}

/// Serialize a whole collection through its record type
pub fn encode_collection<T, R>(items: &[T]) -> Result<Vec<u8>>
where
    R: for<'a> From<&'a T> + Serialize,
{
    let records: Vec<R> = items.iter().map(R::from).collect();
    serde_json::to_vec(&records).context("Failed to encode collection")
}

/// Decode a whole collection. A single bad entry fails the entire document.
pub fn decode_collection<T, R>(bytes: &[u8]) -> Result<Vec<T>>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = anyhow::Error>,
{
    let records: Vec<R> = serde_json::from_slice(bytes).context("Failed to decode collection")?;
    records.into_iter().map(T::try_from).collect()
}

pub fn encode_animals(animals: &[Animal]) -> Result<Vec<u8>> {
    encode_collection::<Animal, AnimalRecord>(animals)
}

pub fn decode_animals(bytes: &[u8]) -> Result<Vec<Animal>> {
    decode_collection::<Animal, AnimalRecord>(bytes)
}

pub fn encode_feeding_records(records: &[FeedingRecord]) -> Result<Vec<u8>> {
    encode_collection::<FeedingRecord, FeedingRecordRecord>(records)
}

pub fn decode_feeding_records(bytes: &[u8]) -> Result<Vec<FeedingRecord>> {
    decode_collection::<FeedingRecord, FeedingRecordRecord>(bytes)
}

pub fn encode_statistics(metrics: &[StatisticsMetric]) -> Result<Vec<u8>> {
    encode_collection::<StatisticsMetric, StatisticsMetricRecord>(metrics)
}

pub fn decode_statistics(bytes: &[u8]) -> Result<Vec<StatisticsMetric>> {
    decode_collection::<StatisticsMetric, StatisticsMetricRecord>(bytes)
}
