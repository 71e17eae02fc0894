//! Write-once JSON export of the final spread-point list
//!
//! The downstream map renderer consumes a flat JSON array of spread
//! records; this module is the only place the core touches the filesystem.

use std::fs;
use std::path::Path;

use crate::simulation::output::{SimulationOutput, SpreadRecord};

/// Export or import failure
#[derive(Debug, Clone)]
pub enum ExportError {
    /// Failed to serialize records
    SerializeFailed(String),
    /// Failed to write the output file
    WriteFailed(String),
    /// Failed to read an export file
    ReadFailed(String),
    /// Failed to parse an export file
    ParseFailed(String),
}

impl std::fmt::Display for ExportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExportError::SerializeFailed(msg) => write!(f, "Failed to serialize: {msg}"),
            ExportError::WriteFailed(msg) => write!(f, "Failed to write: {msg}"),
            ExportError::ReadFailed(msg) => write!(f, "Failed to read: {msg}"),
            ExportError::ParseFailed(msg) => write!(f, "Failed to parse: {msg}"),
        }
    }
}

impl std::error::Error for ExportError {}

/// Save a simulation's spread points as a flat JSON array.
///
/// # Errors
/// Returns an error if the records cannot be serialized or the file cannot
/// be written.
pub fn save_spread_points<P: AsRef<Path>>(
    output: &SimulationOutput,
    path: P,
) -> Result<(), ExportError> {
    let records = output.to_records();
    let contents = serde_json::to_string_pretty(&records)
        .map_err(|e| ExportError::SerializeFailed(e.to_string()))?;
    fs::write(path, contents).map_err(|e| ExportError::WriteFailed(e.to_string()))?;
    Ok(())
}

/// Load spread records back from a JSON export.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse as a
/// spread-record array.
pub fn load_spread_points<P: AsRef<Path>>(path: P) -> Result<Vec<SpreadRecord>, ExportError> {
    let contents =
        fs::read_to_string(path).map_err(|e| ExportError::ReadFailed(e.to_string()))?;
    serde_json::from_str(&contents).map_err(|e| ExportError::ParseFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{FirePoint, Weather};
    use crate::simulation::output::{SimulationStats, Termination};

    fn sample_output() -> SimulationOutput {
        let parent = FirePoint::ignition(90.0, 55.0, Weather::new(30.0, 20.0, 8.0, 45.0));
        SimulationOutput {
            points: vec![
                parent.spread_from(90.1, 55.1, Some(0.5), 1),
                parent.spread_from(90.2, 55.0, Some(0.42), 1),
            ],
            stats: SimulationStats::default(),
            termination: Termination::Converged,
        }
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let output = sample_output();
        let path = std::env::temp_dir().join("fire_spread_export_roundtrip.json");

        save_spread_points(&output, &path).unwrap();
        let records = load_spread_points(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].step, Some(1));
        assert_eq!(records[0].ndvi, Some(0.5));
        assert_eq!(records[1].ndvi, Some(0.42));
        assert_eq!(records, output.to_records());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let err = load_spread_points("/nonexistent/spread.json").unwrap_err();
        assert!(matches!(err, ExportError::ReadFailed(_)));
    }

    #[test]
    fn test_load_null_fields_from_historic_export() {
        // Historic exports may carry null risk scores; nullability must be
        // preserved end to end.
        let path = std::env::temp_dir().join("fire_spread_export_nulls.json");
        fs::write(
            &path,
            r#"[{"x":1.0,"y":2.0,"temperature":20.0,"humidity":50.0,
                 "wind_speed":2.0,"wind_direction":0.0,
                 "step":null,"ndvi":null,"risk_score":null}]"#,
        )
        .unwrap();

        let records = load_spread_points(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(records[0].step, None);
        assert_eq!(records[0].ndvi, None);
        assert_eq!(records[0].risk_score, None);
    }
}
