use crate::error::{Result, TrainingError};
use crate::types::PipelineConfig;
use log::{info, warn};
use std::path::Path;

/// Leser inn pipeline-konfig fra disk (JSON).
/// Hvis filen ikke finnes, returneres default-konfig.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| TrainingError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PipelineConfig =
            serde_json::from_str(&contents).map_err(|source| TrainingError::Parse {
                origin: path.display().to_string(),
                path: ".".to_string(),
                source,
            })?;
        info!(
            "konfig lastet fra {} (threshold={:?}, per_lap={})",
            path.display(),
            config.outlier_hr_jump_threshold,
            config.hr_samples_per_lap
        );
        Ok(config)
    } else {
        warn!(
            "fant ikke konfig på {}, bruker default (per_lap={})",
            path.display(),
            PipelineConfig::default().hr_samples_per_lap
        );
        Ok(PipelineConfig::default())
    }
}

/// Lagrer konfig til disk som JSON (pretty-print).
pub fn save_config<P: AsRef<Path>>(config: &PipelineConfig, path: P) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source: std::io::Error| TrainingError::Write {
        path: path.to_path_buf(),
        source,
    };
    let json = serde_json::to_string_pretty(config).map_err(|e| write_err(e.into()))?;
    std::fs::write(path, json).map_err(write_err)?;
    info!("konfig lagret til {}", path.display());
    Ok(())
}
