use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Standard antall puls-sample-bursts per runde (to sensorer på enheten).
pub const DEFAULT_HR_SAMPLES_PER_LAP: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityOverview {
    pub user_id: String,
    pub activity_id: i64,
    pub activity_name: String,
    pub duration_in_seconds: i64,
    pub start_time_in_seconds: i64,
    pub start_time_offset_in_seconds: i64,
    pub activity_type: String,
    pub average_heart_rate_in_beats_per_minute: i64,
    pub active_kilocalories: i64,
    pub device_name: String,
    pub max_heart_rate_in_beats_per_minute: i64,
}

impl ActivityOverview {
    /// Starttid i utøverens lokale tidssone (startTimeInSeconds + offset).
    /// `None` hvis tidsstempel eller offset er utenfor gyldig område.
    pub fn local_start_time(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(i32::try_from(self.start_time_offset_in_seconds).ok()?)?;
        let utc = DateTime::from_timestamp(self.start_time_in_seconds, 0)?;
        Some(utc.with_timezone(&offset))
    }
}

/// Ett punkt i 1 Hz-serien. `heart_rate` er `None` når et endepunkt manglet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeartRatePoint {
    pub sample_index: usize,
    pub heart_rate: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LapReport {
    pub start_time_in_seconds: i64,
    pub total_distance_in_meters: i64,
    pub timer_duration_in_seconds: i64,
    pub heart_rate_samples: Vec<HeartRatePoint>,
}

impl LapReport {
    /// (min, snitt, maks) over punktene som har verdi.
    pub fn heart_rate_stats(&self) -> Option<(f64, f64, f64)> {
        let values: Vec<f64> = self
            .heart_rate_samples
            .iter()
            .filter_map(|p| p.heart_rate)
            .collect();
        if values.is_empty() {
            return None;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let avg = values.iter().sum::<f64>() / values.len() as f64;
        Some((min, avg, max))
    }
}

/// Sluttproduktet: activityOverview + runder med pulsserie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingReport {
    pub activity_overview: ActivityOverview,
    pub laps: Vec<LapReport>,
}

/// Justerbare parametre for prosesseringen. Alle felt har default,
/// så en tom `{}` er en gyldig konfig.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// `None` = ingen outlier-demping (uendelig terskel).
    pub outlier_hr_jump_threshold: Option<f64>,
    /// Valideres ved kjøring: `<= 0` gir `InvalidArgument`.
    pub hr_samples_per_lap: i64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            outlier_hr_jump_threshold: None,
            hr_samples_per_lap: DEFAULT_HR_SAMPLES_PER_LAP as i64,
        }
    }
}

impl PipelineConfig {
    pub fn outlier_threshold(&self) -> f64 {
        self.outlier_hr_jump_threshold.unwrap_or(f64::INFINITY)
    }
}
