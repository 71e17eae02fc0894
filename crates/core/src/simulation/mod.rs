//! Step-wise fire propagation engine
//!
//! Orchestrates the bounded stochastic expansion: each step marks the
//! current frontier as burned, samples wind-biased candidates around every
//! point above the risk threshold, gates candidates on vegetation, region
//! containment and deduplication, and promotes the survivors to the next
//! frontier. The run terminates when a step produces no survivors or the
//! step budget is exhausted.

pub mod output;
pub mod persistence;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core_types::{FirePoint, RegionSet};
use crate::providers::NdviProvider;
use crate::sampler::SpreadSampler;

pub use output::{SimulationOutput, SimulationStats, SpreadRecord, Termination};
pub use persistence::{load_spread_points, save_spread_points, ExportError};

/// Tunable parameters for one simulation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Upper bound on simulation steps
    pub steps: u32,
    /// Minimum risk score required for a burning point to spread
    pub risk_threshold: f64,
    /// Base spread distance per step, in degrees
    pub max_distance: f64,
    /// Candidates drawn per spreading point
    pub samples_per_point: u32,
    /// Minimum vegetation index considered burnable fuel
    pub ndvi_floor: f64,
    /// Decimal degrees kept when bucketing coordinates for deduplication
    pub dedup_precision: u32,
    /// Master seed; equal seeds reproduce runs exactly
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            steps: 10,
            risk_threshold: 0.4,
            max_distance: 0.2,
            samples_per_point: 16,
            ndvi_floor: 0.15,
            dedup_precision: 4,
            seed: 0,
        }
    }
}

/// Fatal setup failure surfaced before any simulation step runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    /// The region set holds no polygons; every candidate would be discarded
    NoRegions,
    /// A configuration value is outside its usable range
    InvalidConfig(String),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::NoRegions => write!(f, "Region set is empty"),
            SimulationError::InvalidConfig(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for SimulationError {}

/// Derive a per-point generator seed from the master seed, the step number
/// and the point's position in the frontier. Keeps candidate sampling
/// independent of the parallel scheduling order.
fn point_seed(master: u64, step: u32, index: usize) -> u64 {
    let mut z = master
        .wrapping_add(u64::from(step).wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add((index as u64).wrapping_mul(0xD1B5_4A32_D192_ED03));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Candidates surviving NDVI and region gating for one frontier point,
/// with the per-point rejection counters
struct GatedBatch {
    accepted: Vec<FirePoint>,
    rejected_no_fuel: u64,
    rejected_outside_regions: u64,
}

/// Stochastic fire propagation engine.
///
/// Owns the configuration and sampler; collaborators (vegetation provider,
/// region set, ignition points) are supplied per run so one engine can be
/// reused across scenarios.
#[derive(Debug, Clone)]
pub struct PropagationEngine {
    config: SimulationConfig,
    sampler: SpreadSampler,
}

impl PropagationEngine {
    /// Create an engine from a configuration
    pub fn new(config: SimulationConfig) -> Self {
        let sampler = SpreadSampler::new(config.max_distance, config.samples_per_point);
        PropagationEngine { config, sampler }
    }

    /// Engine configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Run the simulation to termination.
    ///
    /// Ignition points seed the first frontier but are excluded from the
    /// output. Per-candidate failures (missing vegetation data, no
    /// enclosing region, duplicate keys) degrade to discarding that
    /// candidate; nothing per-candidate can abort the run.
    ///
    /// # Errors
    /// Returns `SimulationError` for fatal preconditions checked before
    /// step 1: an empty region set or an unusable configuration.
    pub fn run(
        &self,
        ignition_points: &[FirePoint],
        ndvi: &dyn NdviProvider,
        regions: &RegionSet,
    ) -> Result<SimulationOutput, SimulationError> {
        self.validate(regions)?;

        let config = &self.config;
        info!(
            "Starting propagation: {} ignition points, {} regions, {} steps, threshold {}",
            ignition_points.len(),
            regions.len(),
            config.steps,
            config.risk_threshold
        );

        let mut burned: FxHashSet<(i64, i64)> = FxHashSet::default();
        let mut frontier: Vec<FirePoint> = ignition_points.to_vec();
        let mut points: Vec<FirePoint> = Vec::new();
        let mut stats = SimulationStats::default();
        let mut termination = Termination::StepLimitReached;

        for step in 1..=config.steps {
            // Pass 1 (sequential): mark the frontier burned and keep the
            // points eligible to spread. A point below the risk threshold
            // is burned but generates no candidates.
            let mut eligible: Vec<FirePoint> = Vec::with_capacity(frontier.len());
            for pt in &frontier {
                if !burned.insert(pt.dedup_key(config.dedup_precision)) {
                    continue;
                }
                stats.points_processed += 1;
                if pt.risk_score() < config.risk_threshold {
                    stats.points_below_threshold += 1;
                    continue;
                }
                eligible.push(pt.clone());
            }

            // Pass 2 (parallel): sample and gate candidates per eligible
            // point. Each point gets a generator derived from the master
            // seed so the schedule cannot change the outcome.
            let batches: Vec<GatedBatch> = eligible
                .par_iter()
                .enumerate()
                .map(|(index, pt)| {
                    let mut rng = ChaCha8Rng::seed_from_u64(point_seed(config.seed, step, index));
                    let mut batch = GatedBatch {
                        accepted: Vec::new(),
                        rejected_no_fuel: 0,
                        rejected_outside_regions: 0,
                    };
                    for (cx, cy) in self.sampler.candidates(pt, &mut rng) {
                        let Some(value) = ndvi.sample(cx, cy) else {
                            batch.rejected_no_fuel += 1;
                            continue;
                        };
                        if value < config.ndvi_floor {
                            batch.rejected_no_fuel += 1;
                            continue;
                        }
                        if !regions.contains(cx, cy) {
                            batch.rejected_outside_regions += 1;
                            continue;
                        }
                        batch.accepted.push(pt.spread_from(cx, cy, Some(value), step));
                    }
                    batch
                })
                .collect();

            stats.candidates_generated +=
                eligible.len() as u64 * u64::from(config.samples_per_point);

            // Pass 3 (sequential): deduplicate the step's survivors as one
            // batch, against both already-burned keys and each other, so
            // no coordinate key is ever accepted twice.
            let mut claimed: FxHashSet<(i64, i64)> = FxHashSet::default();
            let mut next_frontier: Vec<FirePoint> = Vec::new();
            for batch in batches {
                stats.rejected_no_fuel += batch.rejected_no_fuel;
                stats.rejected_outside_regions += batch.rejected_outside_regions;
                for candidate in batch.accepted {
                    let key = candidate.dedup_key(config.dedup_precision);
                    if burned.contains(&key) || !claimed.insert(key) {
                        stats.rejected_duplicate += 1;
                        continue;
                    }
                    next_frontier.push(candidate);
                }
            }

            stats.steps_run = step;
            debug!(
                "Step {step}: frontier={} eligible={} accepted={}",
                frontier.len(),
                eligible.len(),
                next_frontier.len()
            );

            if next_frontier.is_empty() {
                info!("No further spread after step {step}");
                termination = Termination::Converged;
                break;
            }

            stats.accepted += next_frontier.len() as u64;
            points.extend(next_frontier.iter().cloned());
            frontier = next_frontier;
        }

        info!(
            "Propagation finished: {} spread points over {} steps ({:?})",
            points.len(),
            stats.steps_run,
            termination
        );

        Ok(SimulationOutput {
            points,
            stats,
            termination,
        })
    }

    fn validate(&self, regions: &RegionSet) -> Result<(), SimulationError> {
        if regions.is_empty() {
            return Err(SimulationError::NoRegions);
        }
        let config = &self.config;
        if !config.max_distance.is_finite() || config.max_distance <= 0.0 {
            return Err(SimulationError::InvalidConfig(format!(
                "max_distance must be positive and finite, got {}",
                config.max_distance
            )));
        }
        if config.samples_per_point == 0 {
            return Err(SimulationError::InvalidConfig(
                "samples_per_point must be at least 1".to_string(),
            ));
        }
        // Keys are scaled to i64; 9 decimal degrees is already sub-millimeter
        if config.dedup_precision > 9 {
            return Err(SimulationError::InvalidConfig(format!(
                "dedup_precision must be at most 9, got {}",
                config.dedup_precision
            )));
        }
        if !config.risk_threshold.is_finite() {
            return Err(SimulationError::InvalidConfig(
                "risk_threshold must be finite".to_string(),
            ));
        }
        if !config.ndvi_floor.is_finite() {
            return Err(SimulationError::InvalidConfig(
                "ndvi_floor must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
