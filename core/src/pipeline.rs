// core/src/pipeline.rs
use std::path::{Path, PathBuf};

use log::info;

use crate::error::Result;
use crate::exporter::export_report;
use crate::loader::{load_laps, load_samples, load_summary};
use crate::metrics::Metrics;
use crate::processor::{checked_samples_per_lap, process, process_with_metrics};
use crate::types::{PipelineConfig, TrainingReport};

/// Stiene til de tre eksportfilene fra enheten.
#[derive(Debug, Clone)]
pub struct PipelineInputs {
    pub summary: PathBuf,
    pub laps: PathBuf,
    pub samples: PathBuf,
}

impl PipelineInputs {
    /// Standard filnavn (`summary.json`, `laps.json`, `samples.json`) i `dir`.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        Self {
            summary: dir.join("summary.json"),
            laps: dir.join("laps.json"),
            samples: dir.join("samples.json"),
        }
    }
}

/// Load → process → (valgfri) export. Rapporten returneres alltid.
pub fn run(
    inputs: &PipelineInputs,
    config: &PipelineConfig,
    output: Option<&Path>,
) -> Result<TrainingReport> {
    run_inner(inputs, config, output, None)
}

/// Som [`run`], men prosessoren teller opp i `metrics`.
pub fn run_with_metrics(
    inputs: &PipelineInputs,
    config: &PipelineConfig,
    output: Option<&Path>,
    metrics: &Metrics,
) -> Result<TrainingReport> {
    run_inner(inputs, config, output, Some(metrics))
}

fn run_inner(
    inputs: &PipelineInputs,
    config: &PipelineConfig,
    output: Option<&Path>,
    metrics: Option<&Metrics>,
) -> Result<TrainingReport> {
    // ugyldig antall avvises før noe leses
    let per_lap = checked_samples_per_lap(config.hr_samples_per_lap)?;

    let summary = load_summary(&inputs.summary)?;
    let laps = load_laps(&inputs.laps)?;
    let samples = load_samples(&inputs.samples)?;

    let threshold = config.outlier_threshold();
    let report = match metrics {
        Some(m) => process_with_metrics(
            &summary,
            &laps,
            &samples,
            threshold,
            per_lap,
            m,
        )?,
        None => process(&summary, &laps, &samples, threshold, per_lap)?,
    };

    if let Some(start) = report.activity_overview.local_start_time() {
        info!(
            "aktivitet {} ({}) startet {}",
            report.activity_overview.activity_id,
            report.activity_overview.activity_type,
            start.format("%Y-%m-%d %H:%M:%S %:z")
        );
    }

    if let Some(path) = output {
        export_report(&report, path)?;
    }

    Ok(report)
}
