//! Restart scenarios against the on-disk data directory

use chrono::{Local, TimeZone, Utc};
use pet_tracker_backend::shared::{AnimalType, MetricTemplate};
use pet_tracker_backend::{AnimalForm, Backend, BackendConfig, FeedingForm, MetricForm};
use std::fs;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Backend {
    let _ = env_logger::builder().is_test(true).try_init();
    Backend::with_config(BackendConfig::with_data_directory(dir.path())).expect("backend should open")
}

#[test]
fn data_survives_restart() {
    let dir = TempDir::new().unwrap();
    let day = Local.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).single().unwrap();

    let (kiwi, record, grooming) = {
        let mut backend = open(&dir);
        let store = &mut backend.pet_store;

        let kiwi = AnimalForm {
            name: "Kiwi".to_string(),
            animal_type: AnimalType::Other,
            custom_type: "Parrot".to_string(),
            age: "1".to_string(),
            notes: String::new(),
        }
        .into_animal()
        .unwrap();
        store.add_animal(kiwi.clone());

        let mut feeding = FeedingForm::new(day.with_timezone(&Utc));
        feeding.animal_id = Some(kiwi.id);
        feeding.food_type = "Seeds".to_string();
        let record = feeding.into_record().unwrap();
        store.add_feeding_record(record.clone());

        let grooming = store.add_statistic_from_template(&MetricTemplate::find("Grooming").unwrap(), 0);

        backend.preferences_service.mark_onboarding_seen().unwrap();
        (kiwi, record, grooming)
    };

    let backend = open(&dir);
    let store = &backend.pet_store;

    assert_eq!(store.animals().len(), 4);
    assert_eq!(store.animal(kiwi.id), Some(&kiwi));
    assert_eq!(store.animal_type_count().get(AnimalType::Other), 1);
    assert_eq!(store.feeding_records_for(&day).collect::<Vec<_>>(), vec![&record]);
    assert_eq!(store.statistics().last(), Some(&grooming));
    assert!(backend.preferences_service.has_seen_onboarding().unwrap());
}

#[test]
fn delete_cascade_survives_restart() {
    let dir = TempDir::new().unwrap();
    let now = Utc::now();

    {
        let mut backend = open(&dir);
        let store = &mut backend.pet_store;
        let luna = store.animals()[0].clone();
        let max = store.animals()[1].clone();

        for animal_id in [luna.id, max.id, luna.id] {
            let mut form = FeedingForm::new(now);
            form.animal_id = Some(animal_id);
            form.food_type = "Kibble".to_string();
            store.add_feeding_record(form.into_record().unwrap());
        }

        store.delete_animal(&luna);
    }

    let backend = open(&dir);
    let names: Vec<&str> = backend.pet_store.animals().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Max", "Charlie"]);
    assert_eq!(backend.pet_store.feeding_records().len(), 1);
}

#[test]
fn corrupt_files_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("animals.json"), "garbage").unwrap();
    fs::write(dir.path().join("feedingRecords.json"), "[{]").unwrap();
    fs::write(dir.path().join("statistics.json"), "{}").unwrap();

    let mut backend = open(&dir);

    assert_eq!(backend.pet_store.animals().len(), 3);
    assert!(backend.pet_store.feeding_records().is_empty());
    assert_eq!(backend.pet_store.statistics().len(), 2);

    let metric = MetricForm {
        name: "Medicine".to_string(),
        initial_value: 1,
    }
    .into_metric()
    .unwrap();
    backend.pet_store.add_statistic(metric);

    let reopened = open(&dir);
    assert_eq!(reopened.pet_store.statistics().len(), 3);
}
