//! Konsoliderer tre JSON-eksporter fra en treningsklokke (summary, laps,
//! samples) til én rapport: activityOverview + 1 Hz pulsserie per runde.
//!
//! Pulsen kommer fra enheten som 5-tick-aggregater med hull og hopp;
//! `smoothing` reparerer og demper, `processor` interpolerer tilbake.

pub mod cli;
pub mod error;
pub mod exporter;
pub mod loader;
pub mod metrics;
pub mod models;
pub mod pipeline;
pub mod processor;
pub mod smoothing;
pub mod storage;
pub mod types;

#[cfg(feature = "python")]
mod py;

pub use error::{Result, TrainingError};
pub use exporter::{export_report, report_to_string};
pub use loader::{load_laps, load_samples, load_summary};
pub use metrics::Metrics;
pub use models::{ActivitySummary, Lap, SensorSample, HEART_RATE_SAMPLE_TYPE};
pub use pipeline::{run, run_with_metrics, PipelineInputs};
pub use processor::{process, process_with_metrics, AGGREGATION_FACTOR};
pub use storage::{load_config, save_config};
pub use types::{
    ActivityOverview, HeartRatePoint, LapReport, PipelineConfig, TrainingReport,
    DEFAULT_HR_SAMPLES_PER_LAP,
};
