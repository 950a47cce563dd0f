// core/src/exporter.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::error::{Result, TrainingError};
use crate::types::TrainingReport;

const INDENT: &[u8] = b"    ";

/// Skriver rapporten som JSON med 4 mellomroms innrykk.
/// Fila er lukket når funksjonen returnerer, også ved feil.
pub fn export_report<P: AsRef<Path>>(report: &TrainingReport, path: P) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source: std::io::Error| TrainingError::Write {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    write_pretty(report, &mut writer).map_err(|e| write_err(e.into()))?;
    writer.flush().map_err(write_err)?;

    info!(
        "rapport eksportert til {} ({} runder)",
        path.display(),
        report.laps.len()
    );
    Ok(())
}

/// Samme tekst som [`export_report`] skriver, i minnet.
pub fn report_to_string(report: &TrainingReport) -> Result<String> {
    let mut buf = Vec::new();
    write_pretty(report, &mut buf).map_err(TrainingError::Encode)?;
    String::from_utf8(buf).map_err(|e| {
        let reason = format!("non UTF-8 output: {e}");
        TrainingError::Encode(<serde_json::Error as serde::ser::Error>::custom(reason))
    })
}

fn write_pretty<W: Write>(report: &TrainingReport, writer: W) -> serde_json::Result<()> {
    let mut ser = Serializer::with_formatter(writer, PrettyFormatter::with_indent(INDENT));
    report.serialize(&mut ser)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActivityOverview;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "lukket"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn report() -> TrainingReport {
        TrainingReport {
            activity_overview: ActivityOverview {
                user_id: "1234567890".into(),
                activity_id: 1,
                activity_name: "Indoor Cycling".into(),
                duration_in_seconds: 60,
                start_time_in_seconds: 1661158927,
                start_time_offset_in_seconds: 7200,
                activity_type: "INDOOR_CYCLING".into(),
                average_heart_rate_in_beats_per_minute: 150,
                active_kilocalories: 10,
                device_name: "instinct2".into(),
                max_heart_rate_in_beats_per_minute: 190,
            },
            laps: vec![],
        }
    }

    #[test]
    fn writer_failure_surfaces_as_error() {
        let err = write_pretty(&report(), BrokenPipe).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn string_and_file_output_are_identical() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        export_report(&report(), &path).unwrap();

        let text = report_to_string(&report()).expect("report_to_string");
        assert!(!text.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn encode_error_is_not_a_write_error() {
        let inner = <serde_json::Error as serde::ser::Error>::custom("boom");
        let err = TrainingError::Encode(inner);
        assert!(err.to_string().contains("encode"));
        assert!(!matches!(err, TrainingError::Write { .. }));
    }
}
