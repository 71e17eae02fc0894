//! Simulation results: accumulated spread points, statistics, export records

use serde::{Deserialize, Serialize};

use crate::core_types::FirePoint;

/// Why a simulation run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Termination {
    /// A step produced no surviving candidates
    Converged,
    /// The configured step budget was exhausted
    StepLimitReached,
}

/// Counters accumulated over a full simulation run
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Steps actually executed
    pub steps_run: u32,
    /// Frontier points processed (after burned-set deduplication)
    pub points_processed: u64,
    /// Frontier points marked burned without spreading (risk below threshold)
    pub points_below_threshold: u64,
    /// Candidates drawn by the sampler
    pub candidates_generated: u64,
    /// Candidates discarded for absent or insufficient vegetation
    pub rejected_no_fuel: u64,
    /// Candidates discarded as duplicates of an already-burned key
    pub rejected_duplicate: u64,
    /// Candidates discarded for falling outside every monitored region
    pub rejected_outside_regions: u64,
    /// Candidates accepted into the output
    pub accepted: u64,
}

/// Result of one simulation run.
///
/// `points` is the cumulative ordered sequence of accepted spread points
/// across all steps; ignition points are not included.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationOutput {
    /// Accepted spread points in acceptance order
    pub points: Vec<FirePoint>,
    /// Run counters
    pub stats: SimulationStats,
    /// Why the run stopped
    pub termination: Termination,
}

impl SimulationOutput {
    /// Convert the output into flat export records
    pub fn to_records(&self) -> Vec<SpreadRecord> {
        self.points.iter().map(SpreadRecord::from).collect()
    }
}

/// Flat spread-point record as consumed by the export/render collaborators.
///
/// `step`, `ndvi` and `risk_score` are nullable in the downstream schema
/// and must stay that way; the engine happens to always populate
/// `risk_score` but readers cannot rely on that for historic files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadRecord {
    /// Longitude in WGS84 degrees
    pub x: f64,
    /// Latitude in WGS84 degrees
    pub y: f64,
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees (0 = North, clockwise)
    pub wind_direction: f64,
    /// Step that produced the point
    pub step: Option<u32>,
    /// Vegetation index at the point
    pub ndvi: Option<f64>,
    /// Weather-derived risk score
    pub risk_score: Option<f64>,
}

impl From<&FirePoint> for SpreadRecord {
    fn from(pt: &FirePoint) -> Self {
        let weather = pt.weather();
        SpreadRecord {
            x: pt.x(),
            y: pt.y(),
            temperature: weather.temperature,
            humidity: weather.humidity,
            wind_speed: weather.wind_speed,
            wind_direction: weather.wind_direction,
            step: pt.step(),
            ndvi: pt.ndvi(),
            risk_score: Some(pt.risk_score()),
        }
    }
}
