use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};

use crate::metrics::Metrics;
use crate::pipeline::{run_with_metrics, PipelineInputs};
use crate::processor::checked_samples_per_lap;
use crate::storage::load_config;
use crate::types::{PipelineConfig, TrainingReport};

#[derive(Parser, Debug)]
#[command(
    name = "training-analytics",
    version,
    about = "Consolidate device exports into an activity overview with per-lap 1 Hz heart rate"
)]
pub struct Args {
    /// Summary export (flat JSON object)
    #[arg(long, default_value = "data/summary.json", value_hint = ValueHint::FilePath)]
    pub summary: PathBuf,

    /// Laps export (JSON array)
    #[arg(long, default_value = "data/laps.json", value_hint = ValueHint::FilePath)]
    pub laps: PathBuf,

    /// Samples export (JSON array with `recording-rate`/`sample-type`/`data`)
    #[arg(long, default_value = "data/samples.json", value_hint = ValueHint::FilePath)]
    pub samples: PathBuf,

    /// Write the consolidated report here (skipped when absent)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,

    /// Max allowed bpm jump between consecutive readings (default: no suppression)
    #[arg(long)]
    pub outlier_threshold: Option<f64>,

    /// Heart-rate sample bursts per lap
    #[arg(long, allow_negative_numbers = true)]
    pub samples_per_lap: Option<i64>,

    /// JSON config with `outlier_hr_jump_threshold` / `hr_samples_per_lap`
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Print prometheus counters after the run
    #[arg(long)]
    pub print_metrics: bool,
}

impl Args {
    /// Konfig-fil (eller default), overstyrt av flagg.
    pub fn resolve_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => PipelineConfig::default(),
        };
        if let Some(t) = self.outlier_threshold {
            config.outlier_hr_jump_threshold = Some(t);
        }
        if let Some(n) = self.samples_per_lap {
            config.hr_samples_per_lap = n;
        }
        checked_samples_per_lap(config.hr_samples_per_lap)?;
        Ok(config)
    }
}

pub fn run(args: &Args) -> Result<()> {
    let config = args.resolve_config()?;
    let inputs = PipelineInputs {
        summary: args.summary.clone(),
        laps: args.laps.clone(),
        samples: args.samples.clone(),
    };
    let metrics = Metrics::new().context("creating metrics registry")?;

    let report = run_with_metrics(&inputs, &config, args.output.as_deref(), &metrics)
        .context("training pipeline failed")?;

    print_lap_report(&report);
    if args.print_metrics {
        print!("{}", metrics.render());
    }
    Ok(())
}

pub fn print_lap_report(report: &TrainingReport) {
    let overview = &report.activity_overview;
    println!("--- Training Report ---");
    println!(
        "{} ({}) on {}, {} s",
        overview.activity_name, overview.activity_type, overview.device_name, overview.duration_in_seconds
    );
    if let Some(start) = overview.local_start_time() {
        println!("Start: {}", start.format("%Y-%m-%d %H:%M:%S %:z"));
    }

    for (i, lap) in report.laps.iter().enumerate() {
        match lap.heart_rate_stats() {
            Some((min, avg, max)) => println!(
                "Lap {}: {} points, HR min/avg/max {:.1}/{:.1}/{:.1}",
                i + 1,
                lap.heart_rate_samples.len(),
                min,
                avg,
                max
            ),
            None => println!("Lap {}: no heart-rate data", i + 1),
        }
    }
}
