// core/src/processor.rs
use log::{debug, warn};

use crate::error::{Result, TrainingError};
use crate::metrics::Metrics;
use crate::models::{ActivitySummary, Lap, SensorSample};
use crate::smoothing::{forward_fill, suppress_outliers};
use crate::types::{ActivityOverview, HeartRatePoint, LapReport, TrainingReport};

/// Enheten aggregerer 5 ticks til én måling før sending.
pub const AGGREGATION_FACTOR: usize = 5;

/// Hva som ble gjort med én rundes rådata (til metrics).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LapStats {
    pub decoded: usize,
    pub repaired: usize,
    pub suppressed: usize,
    pub emitted: usize,
}

/// Bygger rapporten: activityOverview + 1 Hz pulsserie per runde.
///
/// Puls-samples forventes i grupper på `samples_per_lap`, én gruppe per
/// runde i rundenes rekkefølge. Ren funksjon av input.
pub fn process(
    summary: &ActivitySummary,
    laps: &[Lap],
    samples: &[SensorSample],
    outlier_threshold: f64,
    samples_per_lap: usize,
) -> Result<TrainingReport> {
    process_inner(summary, laps, samples, outlier_threshold, samples_per_lap, None)
}

/// Som [`process`], men teller opp arbeidet i `metrics`.
pub fn process_with_metrics(
    summary: &ActivitySummary,
    laps: &[Lap],
    samples: &[SensorSample],
    outlier_threshold: f64,
    samples_per_lap: usize,
    metrics: &Metrics,
) -> Result<TrainingReport> {
    process_inner(
        summary,
        laps,
        samples,
        outlier_threshold,
        samples_per_lap,
        Some(metrics),
    )
}

fn process_inner(
    summary: &ActivitySummary,
    laps: &[Lap],
    samples: &[SensorSample],
    outlier_threshold: f64,
    samples_per_lap: usize,
    metrics: Option<&Metrics>,
) -> Result<TrainingReport> {
    if samples_per_lap == 0 {
        return Err(TrainingError::InvalidArgument(
            "number of heart-rate samples per lap must be greater than 0".into(),
        ));
    }

    let activity_overview = build_overview(summary)?;

    let heart_rate: Vec<&SensorSample> = samples.iter().filter(|s| s.is_heart_rate()).collect();
    if let Some(s) = heart_rate
        .iter()
        .find(|s| s.recording_rate != AGGREGATION_FACTOR as i64)
    {
        warn!(
            "puls-sample med recording-rate={} – behandles som {}",
            s.recording_rate, AGGREGATION_FACTOR
        );
    }

    let mut out = Vec::with_capacity(laps.len());
    for (i, lap) in laps.iter().enumerate() {
        let segment = select_lap_samples(&heart_rate, i, samples_per_lap);
        let (series, stats) = lap_series(segment, outlier_threshold);
        debug!(
            "runde {i}: {} samples, {} målinger, {} fylt, {} dempet, {} punkter",
            segment.len(),
            stats.decoded,
            stats.repaired,
            stats.suppressed,
            stats.emitted
        );

        if let Some(m) = metrics {
            m.laps_processed_total.inc();
            m.hr_readings_decoded_total.inc_by(stats.decoded as u64);
            m.hr_readings_repaired_total.inc_by(stats.repaired as u64);
            m.hr_outliers_suppressed_total.inc_by(stats.suppressed as u64);
            m.hr_points_emitted_total.inc_by(stats.emitted as u64);
        }

        out.push(LapReport {
            start_time_in_seconds: lap.start_time_in_seconds,
            total_distance_in_meters: lap.total_distance_in_meters,
            timer_duration_in_seconds: lap.timer_duration_in_seconds,
            heart_rate_samples: series,
        });
    }

    Ok(TrainingReport {
        activity_overview,
        laps: out,
    })
}

/// Validerer et fortegnet antall fra CLI/Python. `n <= 0` gir `InvalidArgument`.
pub fn checked_samples_per_lap(n: i64) -> Result<usize> {
    match usize::try_from(n) {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(TrainingError::InvalidArgument(format!(
            "number of heart-rate samples per lap must be greater than 0, got {n}"
        ))),
    }
}

/// Kopierer de faste overview-feltene. Første manglende felt gir `MissingField`.
pub fn build_overview(summary: &ActivitySummary) -> Result<ActivityOverview> {
    fn req<T: Clone>(value: &Option<T>, key: &'static str) -> Result<T> {
        value.clone().ok_or(TrainingError::MissingField(key))
    }

    Ok(ActivityOverview {
        user_id: req(&summary.user_id, "userId")?,
        activity_id: req(&summary.activity_id, "activityId")?,
        activity_name: req(&summary.activity_name, "activityName")?,
        duration_in_seconds: req(&summary.duration_in_seconds, "durationInSeconds")?,
        start_time_in_seconds: req(&summary.start_time_in_seconds, "startTimeInSeconds")?,
        start_time_offset_in_seconds: req(
            &summary.start_time_offset_in_seconds,
            "startTimeOffsetInSeconds",
        )?,
        activity_type: req(&summary.activity_type, "activityType")?,
        average_heart_rate_in_beats_per_minute: req(
            &summary.average_heart_rate_in_beats_per_minute,
            "averageHeartRateInBeatsPerMinute",
        )?,
        active_kilocalories: req(&summary.active_kilocalories, "activeKilocalories")?,
        device_name: req(&summary.device_name, "deviceName")?,
        max_heart_rate_in_beats_per_minute: req(
            &summary.max_heart_rate_in_beats_per_minute,
            "maxHeartRateInBeatsPerMinute",
        )?,
    })
}

/// Plukker ut `[lap * per_lap, (lap + 1) * per_lap)` uten klemming:
/// utenfor området gir tom slice, og en delvis siste gruppe kuttes.
pub fn select_lap_samples<'a, T>(heart_rate: &'a [T], lap: usize, per_lap: usize) -> &'a [T] {
    let start = lap.saturating_mul(per_lap).min(heart_rate.len());
    let end = lap
        .saturating_add(1)
        .saturating_mul(per_lap)
        .min(heart_rate.len());
    &heart_rate[start..end]
}

/// Splitter `data` på komma. Ikke-numeriske og ikke-endelige tokens blir `None`.
pub fn decode_readings(data: &str) -> Vec<Option<f64>> {
    data.split(',')
        .map(|token| token.trim().parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect()
}

/// Reverserer 5-tick-aggregeringen: 5 lineært interpolerte punkter per
/// nabopar (h0, h1), offset 0/5..4/5. n målinger → 5 * (n - 1) punkter.
/// Mangler et endepunkt, blir alle 5 punktene for paret `None`.
pub fn interpolate(readings: &[Option<f64>]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(readings.len().saturating_sub(1) * AGGREGATION_FACTOR);
    for pair in readings.windows(2) {
        match (pair[0], pair[1]) {
            (Some(h0), Some(h1)) => {
                for j in 0..AGGREGATION_FACTOR {
                    let alpha = j as f64 / AGGREGATION_FACTOR as f64;
                    out.push(Some(h0 + alpha * (h1 - h0)));
                }
            }
            _ => out.extend(std::iter::repeat(None).take(AGGREGATION_FACTOR)),
        }
    }
    out
}

fn lap_series(segment: &[&SensorSample], outlier_threshold: f64) -> (Vec<HeartRatePoint>, LapStats) {
    let mut readings: Vec<Option<f64>> = segment
        .iter()
        .flat_map(|s| decode_readings(&s.data))
        .collect();

    if matches!(readings.first(), Some(None)) {
        warn!("første pulsmåling i runden mangler – fylles ikke bakover");
    }

    let repaired = forward_fill(&mut readings);
    let suppressed = suppress_outliers(&mut readings, outlier_threshold);

    let series: Vec<HeartRatePoint> = interpolate(&readings)
        .into_iter()
        .enumerate()
        .map(|(sample_index, heart_rate)| HeartRatePoint {
            sample_index,
            heart_rate,
        })
        .collect();

    let stats = LapStats {
        decoded: readings.len(),
        repaired,
        suppressed,
        emitted: series.len(),
    };
    (series, stats)
}
