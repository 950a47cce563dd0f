// core/src/loader.rs
use std::path::Path;

use log::info;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_path_to_error as spte;

use crate::error::{Result, TrainingError};
use crate::models::{ActivitySummary, Lap, SensorSample};

/// Leser summary-eksporten (flatt objekt).
pub fn load_summary<P: AsRef<Path>>(path: P) -> Result<ActivitySummary> {
    let path = path.as_ref();
    let summary = summary_from_str(&read_source(path)?, &path.display().to_string())?;
    info!(
        "summary lastet fra {} (activityId={:?})",
        path.display(),
        summary.activity_id
    );
    Ok(summary)
}

/// Leser rundene. Rekkefølgen i arrayen beholdes.
pub fn load_laps<P: AsRef<Path>>(path: P) -> Result<Vec<Lap>> {
    let path = path.as_ref();
    let laps = laps_from_str(&read_source(path)?, &path.display().to_string())?;
    info!("{} runder lastet fra {}", laps.len(), path.display());
    Ok(laps)
}

/// Leser sample-bursts og mapper `recording-rate`/`sample-type` til understrek.
pub fn load_samples<P: AsRef<Path>>(path: P) -> Result<Vec<SensorSample>> {
    let path = path.as_ref();
    let samples = samples_from_str(&read_source(path)?, &path.display().to_string())?;
    info!("{} samples lastet fra {}", samples.len(), path.display());
    Ok(samples)
}

pub fn summary_from_str(json: &str, origin: &str) -> Result<ActivitySummary> {
    parse_json(json, origin)
}

pub fn laps_from_str(json: &str, origin: &str) -> Result<Vec<Lap>> {
    parse_json(json, origin)
}

pub fn samples_from_str(json: &str, origin: &str) -> Result<Vec<SensorSample>> {
    parse_json(json, origin)
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| TrainingError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Streng parse med JSON-sti i feilmeldingen (f.eks. `[3].recording-rate`).
fn parse_json<T: DeserializeOwned>(json: &str, origin: &str) -> Result<T> {
    let mut de = serde_json::Deserializer::from_str(json);
    let value: T = spte::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        TrainingError::Parse {
            origin: origin.to_string(),
            path,
            source: e.into_inner(),
        }
    })?;
    // avvis søppel etter dokumentet
    de.end().map_err(|source| TrainingError::Parse {
        origin: origin.to_string(),
        path: ".".to_string(),
        source,
    })?;
    Ok(value)
}

// ──────────────────────────────────────────────────────────────────────────────
// Tolerante feltkonverteringer for sample-records
// ──────────────────────────────────────────────────────────────────────────────

/// `recording-rate`: heltall, float (kuttes mot null, 5.5 → 5) eller numerisk streng ("5").
pub(crate) fn de_recording_rate<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    let rate = match &raw {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    rate.ok_or_else(|| de::Error::custom(format!("recording-rate must be an integer, got {raw}")))
}

/// `sample-type`: streng, eller tall som gjøres om til desimaltekst.
pub(crate) fn de_sample_type<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!(
            "sample-type must be a string or number, got {other}"
        ))),
    }
}

/// `data`: streng, et enkelt tall (`120` → `"120"`) eller `null` (én manglende måling).
pub(crate) fn de_data<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok("null".to_string()),
        other => Err(de::Error::custom(format!(
            "data must be a string, number or null, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_rate_accepts_numeric_string() {
        let s = samples_from_str(
            r#"[{"recording-rate": "5", "sample-type": 2, "data": "1,2"}]"#,
            "inline",
        )
        .unwrap();
        assert_eq!(s[0].recording_rate, 5);
        assert_eq!(s[0].sample_type, "2");
    }

    #[test]
    fn fractional_recording_rate_is_truncated() {
        let s = samples_from_str(
            r#"[{"recording-rate": 5.5, "sample-type": "2", "data": "1,2"},
                {"recording-rate": -4.9, "sample-type": "2", "data": "1,2"}]"#,
            "inline",
        )
        .unwrap();
        assert_eq!(s[0].recording_rate, 5);
        assert_eq!(s[1].recording_rate, -4);
    }

    #[test]
    fn bare_number_and_null_data_are_rendered_as_tokens() {
        let s = samples_from_str(
            r#"[{"recording-rate": 5, "sample-type": "2", "data": 120},
                {"recording-rate": 5, "sample-type": "2", "data": 98.5},
                {"recording-rate": 5, "sample-type": "2", "data": null}]"#,
            "inline",
        )
        .unwrap();
        assert_eq!(s[0].data, "120");
        assert_eq!(s[1].data, "98.5");
        assert_eq!(crate::processor::decode_readings(&s[0].data), vec![Some(120.0)]);
        assert_eq!(crate::processor::decode_readings(&s[2].data), vec![None]);
    }

    #[test]
    fn data_as_object_is_rejected() {
        let err = samples_from_str(
            r#"[{"recording-rate": 5, "sample-type": "2", "data": {"hr": 1}}]"#,
            "inline",
        )
        .unwrap_err();
        assert!(matches!(err, TrainingError::Parse { ref path, .. } if path.ends_with("data")));
    }

    #[test]
    fn parse_error_names_json_path() {
        let err = samples_from_str(
            r#"[{"recording-rate": 5, "sample-type": "2", "data": "1"},
                {"recording-rate": "fast", "sample-type": "2", "data": "1"}]"#,
            "inline",
        )
        .unwrap_err();
        match err {
            TrainingError::Parse { origin, path, .. } => {
                assert_eq!(origin, "inline");
                assert!(path.starts_with("[1]"), "path was {path}");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        assert!(laps_from_str("[] []", "inline").is_err());
    }
}
