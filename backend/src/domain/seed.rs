//! First-run content. Used when nothing (or nothing decodable) is stored yet.

use shared::{Animal, AnimalType, AnimalTypeInfo, StatisticsMetric};

/// The three illustrative pets shown on first launch
pub fn seed_animals() -> Vec<Animal> {
    vec![
        Animal::new(
            "Luna",
            AnimalTypeInfo::new(AnimalType::Cat),
            3,
            "Loves to play with toys and sleep in sunny spots",
        ),
        Animal::new(
            "Max",
            AnimalTypeInfo::new(AnimalType::Dog),
            5,
            "Energetic and friendly, needs daily walks",
        ),
        Animal::new(
            "Charlie",
            AnimalTypeInfo::new(AnimalType::Dog),
            2,
            "Still learning basic commands, very food motivated",
        ),
    ]
}

/// Default counters, both starting at zero
pub fn seed_statistics() -> Vec<StatisticsMetric> {
    vec![
        StatisticsMetric::new("Walks", 0),
        StatisticsMetric::new("Vet Visits", 0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_animals() {
        let animals = seed_animals();
        let summary: Vec<(&str, AnimalType, u32, &str)> = animals
            .iter()
            .map(|a| (a.name.as_str(), a.type_info.animal_type, a.age, a.notes.as_str()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("Luna", AnimalType::Cat, 3, "Loves to play with toys and sleep in sunny spots"),
                ("Max", AnimalType::Dog, 5, "Energetic and friendly, needs daily walks"),
                ("Charlie", AnimalType::Dog, 2, "Still learning basic commands, very food motivated"),
            ]
        );
        assert!(animals.iter().all(|a| a.type_info.custom_type.is_none()));
    }

    #[test]
    fn test_seed_statistics() {
        let metrics = seed_statistics();
        let summary: Vec<(&str, i64)> = metrics.iter().map(|m| (m.name.as_str(), m.value)).collect();
        assert_eq!(summary, vec![("Walks", 0), ("Vet Visits", 0)]);
    }
}
