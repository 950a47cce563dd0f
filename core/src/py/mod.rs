// Python-bindinger (feature "python"). Alt går som JSON-strenger inn og ut,
// så Python-siden slipper pyo3 serde-feature.
use std::path::PathBuf;

use pyo3::exceptions::{PyIOError, PyKeyError, PyValueError};
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use crate::error::TrainingError;
use crate::exporter::report_to_string;
use crate::loader::{laps_from_str, samples_from_str, summary_from_str};
use crate::metrics;
use crate::pipeline::{run_with_metrics, PipelineInputs};
use crate::processor::{checked_samples_per_lap, process_with_metrics};
use crate::types::{PipelineConfig, DEFAULT_HR_SAMPLES_PER_LAP};

const DEFAULT_PER_LAP: i64 = DEFAULT_HR_SAMPLES_PER_LAP as i64;

impl From<TrainingError> for PyErr {
    fn from(err: TrainingError) -> Self {
        match err {
            TrainingError::MissingField(key) => PyKeyError::new_err(key),
            e @ (TrainingError::Read { .. } | TrainingError::Write { .. }) => {
                PyIOError::new_err(e.to_string())
            }
            e => PyValueError::new_err(e.to_string()),
        }
    }
}

// ──────────────────────────────────────────────────────────────────────────────
// Funksjoner
// ──────────────────────────────────────────────────────────────────────────────

/// Prosesserer tre JSON-dokumenter (som strenger) og returnerer rapporten som JSON.
#[pyfunction]
#[pyo3(signature = (
    summary_json,
    laps_json,
    samples_json,
    outlier_hr_jump_threshold = None,
    number_of_hr_samples_per_lap = DEFAULT_PER_LAP
))]
fn process_json(
    summary_json: &str,
    laps_json: &str,
    samples_json: &str,
    outlier_hr_jump_threshold: Option<f64>,
    number_of_hr_samples_per_lap: i64,
) -> PyResult<String> {
    let per_lap = checked_samples_per_lap(number_of_hr_samples_per_lap)?;
    let summary = summary_from_str(summary_json, "<summary>")?;
    let laps = laps_from_str(laps_json, "<laps>")?;
    let samples = samples_from_str(samples_json, "<samples>")?;

    let report = process_with_metrics(
        &summary,
        &laps,
        &samples,
        outlier_hr_jump_threshold.unwrap_or(f64::INFINITY),
        per_lap,
        metrics::global(),
    )?;
    Ok(report_to_string(&report)?)
}

/// Load → process → (valgfri) export fra filstier. Returnerer rapporten som JSON.
#[pyfunction]
#[pyo3(signature = (
    summary_filepath,
    laps_filepath,
    samples_filepath,
    output_filepath = None,
    outlier_hr_jump_threshold = None,
    number_of_hr_sensors = DEFAULT_PER_LAP
))]
fn run_pipeline(
    summary_filepath: PathBuf,
    laps_filepath: PathBuf,
    samples_filepath: PathBuf,
    output_filepath: Option<PathBuf>,
    outlier_hr_jump_threshold: Option<f64>,
    number_of_hr_sensors: i64,
) -> PyResult<String> {
    let config = PipelineConfig {
        outlier_hr_jump_threshold,
        hr_samples_per_lap: number_of_hr_sensors,
    };
    let inputs = PipelineInputs {
        summary: summary_filepath,
        laps: laps_filepath,
        samples: samples_filepath,
    };
    let report = run_with_metrics(
        &inputs,
        &config,
        output_filepath.as_deref(),
        metrics::global(),
    )?;
    Ok(report_to_string(&report)?)
}

#[pyfunction]
fn metrics_text() -> String {
    metrics::global().render()
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn training_analytics_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(process_json, m)?)?;
    m.add_function(wrap_pyfunction!(run_pipeline, m)?)?;
    m.add_function(wrap_pyfunction!(metrics_text, m)?)?;
    Ok(())
}
