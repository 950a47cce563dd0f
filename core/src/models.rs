use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `sample-type` for puls i sample-eksporten.
pub const HEART_RATE_SAMPLE_TYPE: &str = "2";

/// Aktivitetssammendrag slik enheten eksporterer det.
///
/// Feltene i activityOverview er `Option` slik at loaderen ikke validerer
/// innhold; prosessoren feiler med `MissingField` hvis et av dem mangler.
/// Alle andre nøkler beholdes urørt i `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub activity_id: Option<i64>,
    #[serde(default)]
    pub activity_name: Option<String>,
    #[serde(default)]
    pub duration_in_seconds: Option<i64>,
    #[serde(default)]
    pub start_time_in_seconds: Option<i64>,
    #[serde(default)]
    pub start_time_offset_in_seconds: Option<i64>,
    #[serde(default)]
    pub activity_type: Option<String>,
    #[serde(default)]
    pub average_heart_rate_in_beats_per_minute: Option<i64>,
    #[serde(default)]
    pub active_kilocalories: Option<i64>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub max_heart_rate_in_beats_per_minute: Option<i64>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// En rundegrense. Rekkefølgen i fila er rekkefølgen på rundene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lap {
    pub start_time_in_seconds: i64,
    pub total_distance_in_meters: i64,
    pub timer_duration_in_seconds: i64,

    // enhetsspesifikke felt (airTemperatureCelsius, heartRate, ...) – ignoreres av prosessoren
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Én sample-burst fra enheten. Bindestrek-nøklene (`recording-rate`,
/// `sample-type`) leses inn og skrives ut igjen med understrek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    #[serde(
        rename(deserialize = "recording-rate"),
        alias = "recording_rate",
        deserialize_with = "crate::loader::de_recording_rate"
    )]
    pub recording_rate: i64,

    #[serde(
        rename(deserialize = "sample-type"),
        alias = "sample_type",
        deserialize_with = "crate::loader::de_sample_type"
    )]
    pub sample_type: String,

    /// Kommaseparerte målinger, f.eks. `"143,151,null,173"`.
    #[serde(deserialize_with = "crate::loader::de_data")]
    pub data: String,
}

impl SensorSample {
    pub fn is_heart_rate(&self) -> bool {
        self.sample_type == HEART_RATE_SAMPLE_TYPE
    }
}
