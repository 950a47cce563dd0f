// core/src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Alle feil som kan oppstå i pipelinen (load → process → export).
///
/// Datakvalitet (ikke-numeriske puls-tokens) er aldri en feil; det håndteres
/// av reparasjonssteget i `smoothing`.
#[derive(Debug, Error)]
pub enum TrainingError {
    /// Kildefilen kunne ikke leses (finnes ikke, rettigheter, ...).
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Ugyldig JSON eller feil form. `path` er JSON-stien til elementet.
    #[error("parse error in {origin} at {path}: {source}")]
    Parse {
        origin: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Summary mangler et av feltene i activityOverview.
    #[error("summary is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Rapporten kunne ikke serialiseres til JSON i minnet.
    #[error("failed to encode report as JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// Eksportmålet kunne ikke skrives. Rapporten i minnet er fortsatt gyldig.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TrainingError>;
