use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Classification of an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimalType {
    Cat,
    Dog,
    /// Anything else; the owner may give it a custom label
    Other,
}

impl AnimalType {
    /// Every classification, in display order
    pub const ALL: [AnimalType; 3] = [AnimalType::Cat, AnimalType::Dog, AnimalType::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimalType::Cat => "Cat",
            AnimalType::Dog => "Dog",
            AnimalType::Other => "Other",
        }
    }
}

impl fmt::Display for AnimalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimalType {
    type Err = AnimalTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Cat" => Ok(AnimalType::Cat),
            "Dog" => Ok(AnimalType::Dog),
            "Other" => Ok(AnimalType::Other),
            other => Err(AnimalTypeParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnimalTypeParseError(pub String);

impl fmt::Display for AnimalTypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown animal type: {}", self.0)
    }
}

impl std::error::Error for AnimalTypeParseError {}

/// Classification plus the optional label used when the classification is `Other`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalTypeInfo {
    pub animal_type: AnimalType,
    /// Only meaningful for `AnimalType::Other`
    pub custom_type: Option<String>,
}

impl AnimalTypeInfo {
    pub fn new(animal_type: AnimalType) -> Self {
        Self {
            animal_type,
            custom_type: None,
        }
    }

    pub fn other(custom_type: impl Into<String>) -> Self {
        Self {
            animal_type: AnimalType::Other,
            custom_type: Some(custom_type.into()),
        }
    }

    /// Label shown to the user. A custom label is ignored unless the type is `Other`.
    pub fn display_name(&self) -> &str {
        match (&self.animal_type, &self.custom_type) {
            (AnimalType::Other, Some(custom)) => custom,
            (animal_type, _) => animal_type.as_str(),
        }
    }
}

/// A pet tracked by the owner
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: Uuid,
    pub name: String,
    pub type_info: AnimalTypeInfo,
    /// Age in whole years
    pub age: u32,
    pub notes: String,
}

impl Animal {
    /// Create an animal with a freshly generated id
    pub fn new(name: impl Into<String>, type_info: AnimalTypeInfo, age: u32, notes: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            type_info,
            age,
            notes: notes.into(),
        }
    }
}

/// A single feeding event.
///
/// `date` decides which day the record belongs to and `time` is what gets
/// displayed. They are independent timestamps; day queries never look at `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedingRecord {
    pub id: Uuid,
    /// Id of the animal that was fed (not enforced as a constraint)
    pub animal_id: Uuid,
    pub food_type: String,
    pub time: DateTime<Utc>,
    pub date: DateTime<Utc>,
}

impl FeedingRecord {
    pub fn new(animal_id: Uuid, food_type: impl Into<String>, time: DateTime<Utc>, date: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            animal_id,
            food_type: food_type.into(),
            time,
            date,
        }
    }
}

/// A named counter such as "Walks". The value has no floor.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsMetric {
    pub id: Uuid,
    pub name: String,
    pub value: i64,
}

impl StatisticsMetric {
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            value,
        }
    }
}

/// Quick-add template for a statistics metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricTemplate {
    pub name: &'static str,
    /// Symbol name the UI renders next to the template
    pub icon: &'static str,
}

/// Fixed catalog offered when adding a metric
pub const METRIC_TEMPLATES: [MetricTemplate; 6] = [
    MetricTemplate { name: "Walks", icon: "figure.walk" },
    MetricTemplate { name: "Vet Visits", icon: "cross.case" },
    MetricTemplate { name: "Grooming", icon: "scissors" },
    MetricTemplate { name: "Training", icon: "star" },
    MetricTemplate { name: "Play Time", icon: "sportscourt" },
    MetricTemplate { name: "Medicine", icon: "pills" },
];

impl MetricTemplate {
    pub fn catalog() -> &'static [MetricTemplate] {
        &METRIC_TEMPLATES
    }

    /// Look up a catalog template by its exact name
    pub fn find(name: &str) -> Option<MetricTemplate> {
        METRIC_TEMPLATES.iter().copied().find(|t| t.name == name)
    }
}

/// Number of animals per classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalTypeCount {
    pub cat: usize,
    pub dog: usize,
    pub other: usize,
}

impl AnimalTypeCount {
    pub fn get(&self, animal_type: AnimalType) -> usize {
        match animal_type {
            AnimalType::Cat => self.cat,
            AnimalType::Dog => self.dog,
            AnimalType::Other => self.other,
        }
    }

    pub fn increment(&mut self, animal_type: AnimalType) {
        match animal_type {
            AnimalType::Cat => self.cat += 1,
            AnimalType::Dog => self.dog += 1,
            AnimalType::Other => self.other += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.cat + self.dog + self.other
    }

    /// Pairs of (type, count) in display order
    pub fn iter(&self) -> impl Iterator<Item = (AnimalType, usize)> + '_ {
        AnimalType::ALL.iter().map(move |t| (*t, self.get(*t)))
    }
}
