// core/tests/test_loader.rs
use std::fs;
use std::path::PathBuf;

use training_analytics_core::{load_laps, load_samples, load_summary, TrainingError};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

#[test]
fn summary_loads_overview_fields_and_keeps_extras() {
    let summary = load_summary(fixture("summary.json")).expect("load_summary");
    assert_eq!(summary.user_id.as_deref(), Some("1234567890"));
    assert_eq!(summary.activity_type.as_deref(), Some("INDOOR_CYCLING"));
    assert_eq!(summary.activity_id, Some(9480958402));
    assert!(summary.extra.is_empty());
}

#[test]
fn summary_with_missing_keys_still_loads() {
    // loaderen validerer ikke innhold – det gjør prosessoren
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    fs::write(&path, r#"{"userId": "1", "vo2Max": 52}"#).unwrap();

    let summary = load_summary(&path).expect("load_summary");
    assert_eq!(summary.user_id.as_deref(), Some("1"));
    assert_eq!(summary.device_name, None);
    assert_eq!(summary.extra["vo2Max"], 52);
}

#[test]
fn laps_preserve_order_and_device_fields() {
    let laps = load_laps(fixture("laps.json")).expect("load_laps");
    assert_eq!(laps.len(), 2);
    assert_eq!(laps[0].start_time_in_seconds, 1661158927);
    assert_eq!(laps[1].total_distance_in_meters, 30);
    assert_eq!(laps[1].extra["heartRate"], 107);
}

#[test]
fn samples_are_remapped_to_underscored_keys() {
    let samples = load_samples(fixture("samples.json")).expect("load_samples");
    assert_eq!(samples.len(), 8);
    assert_eq!(samples[1].sample_type, "2");
    assert_eq!(samples[1].recording_rate, 5);
    assert!(samples[1].is_heart_rate());
    assert!(!samples[0].is_heart_rate());

    let v = serde_json::to_value(&samples[0]).unwrap();
    assert!(v.get("sample_type").is_some());
    assert!(v.get("recording_rate").is_some());
    assert!(v.get("sample-type").is_none());
}

#[test]
fn invalid_json_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("summary.json");
    fs::write(&path, "{ invalid json }").unwrap();

    match load_summary(&path) {
        Err(TrainingError::Parse { origin, .. }) => {
            assert!(origin.ends_with("summary.json"), "origin was {origin}");
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn missing_file_is_a_read_error_naming_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.json");

    let err = load_laps(&path).unwrap_err();
    assert!(matches!(err, TrainingError::Read { .. }));
    assert!(err.to_string().contains("nope.json"));
}
