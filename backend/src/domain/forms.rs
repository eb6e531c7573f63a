//! Input forms for the add and edit screens.
//!
//! The store trusts its callers, so these checks run before anything reaches
//! it. Each form turns raw user input into an entity or says why it can't.

use chrono::{DateTime, Utc};
use shared::{Animal, AnimalType, AnimalTypeInfo, FeedingRecord, MetricTemplate, StatisticsMetric};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Describe the animal type")]
    EmptyCustomType,
    #[error("Age must be a whole number of years, got {0:?}")]
    InvalidAge(String),
    #[error("Select an animal first")]
    NoAnimalSelected,
    #[error("Food type cannot be empty")]
    EmptyFoodType,
    #[error("Metric name cannot be empty")]
    EmptyMetricName,
}

/// Add/edit animal input
#[derive(Debug, Clone, PartialEq)]
pub struct AnimalForm {
    pub name: String,
    pub animal_type: AnimalType,
    /// Only kept when `animal_type` is `Other`
    pub custom_type: String,
    /// Raw text from the age field
    pub age: String,
    pub notes: String,
}

impl Default for AnimalForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            animal_type: AnimalType::Cat,
            custom_type: String::new(),
            age: String::new(),
            notes: String::new(),
        }
    }
}

impl AnimalForm {
    /// Prefill the form from an existing animal
    pub fn from_animal(animal: &Animal) -> Self {
        Self {
            name: animal.name.clone(),
            animal_type: animal.type_info.animal_type,
            custom_type: animal.type_info.custom_type.clone().unwrap_or_default(),
            age: animal.age.to_string(),
            notes: animal.notes.clone(),
        }
    }

    /// Build a new animal with a fresh id. `Other` needs a custom label here.
    pub fn into_animal(self) -> Result<Animal, ValidationError> {
        let (name, type_info, age) = self.validated_parts()?;
        if type_info.animal_type == AnimalType::Other && type_info.custom_type.is_none() {
            return Err(ValidationError::EmptyCustomType);
        }
        Ok(Animal::new(name, type_info, age, self.notes))
    }

    /// Build the edited version of `existing`, keeping its id.
    /// A blank label for `Other` is accepted and stored as none.
    pub fn apply_to(self, existing: &Animal) -> Result<Animal, ValidationError> {
        let (name, type_info, age) = self.validated_parts()?;
        Ok(Animal {
            id: existing.id,
            name,
            type_info,
            age,
            notes: self.notes,
        })
    }

    fn validated_parts(&self) -> Result<(String, AnimalTypeInfo, u32), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let age: u32 = self
            .age
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidAge(self.age.clone()))?;

        let custom_type = match self.animal_type {
            AnimalType::Other => Some(self.custom_type.trim())
                .filter(|label| !label.is_empty())
                .map(str::to_string),
            _ => None,
        };

        let type_info = AnimalTypeInfo {
            animal_type: self.animal_type,
            custom_type,
        };

        Ok((name.to_string(), type_info, age))
    }
}

/// Add feeding input
#[derive(Debug, Clone, PartialEq)]
pub struct FeedingForm {
    pub animal_id: Option<Uuid>,
    pub food_type: String,
    pub time: DateTime<Utc>,
    pub date: DateTime<Utc>,
}

impl FeedingForm {
    /// Empty form with both pickers set to `now`
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            animal_id: None,
            food_type: String::new(),
            time: now,
            date: now,
        }
    }

    pub fn into_record(self) -> Result<FeedingRecord, ValidationError> {
        let animal_id = self.animal_id.ok_or(ValidationError::NoAnimalSelected)?;

        let food_type = self.food_type.trim();
        if food_type.is_empty() {
            return Err(ValidationError::EmptyFoodType);
        }

        Ok(FeedingRecord::new(animal_id, food_type, self.time, self.date))
    }
}

/// Add metric input
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricForm {
    pub name: String,
    pub initial_value: i64,
}

impl MetricForm {
    /// Form prefilled from a quick-add template
    pub fn from_template(template: &MetricTemplate) -> Self {
        Self {
            name: template.name.to_string(),
            initial_value: 0,
        }
    }

    pub fn increment(&mut self) {
        self.initial_value = self.initial_value.saturating_add(1);
    }

    /// Initial values don't go below zero
    pub fn decrement(&mut self) {
        if self.initial_value > 0 {
            self.initial_value -= 1;
        }
    }

    pub fn into_metric(self) -> Result<StatisticsMetric, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyMetricName);
        }
        Ok(StatisticsMetric::new(name, self.initial_value))
    }
}
