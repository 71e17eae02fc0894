//! Fire Spread Core Library
//!
//! Models wildfire ignition and stochastic spread across monitored
//! geographic regions from per-point weather and vegetation-density (NDVI)
//! inputs. The engine performs a bounded stochastic expansion: weather-based
//! risk scoring, wind-biased directional sampling, vegetation and region
//! gating, coordinate deduplication, and step-wise convergence control,
//! producing a flat list of spread points for later visualization.
//!
//! Geospatial file loading, remote weather enrichment and map rendering are
//! external collaborators; the core only consumes their capabilities
//! (vegetation sampling and polygon containment).

// Core value types
pub mod core_types;

// Collaborator capabilities (vegetation sampling)
pub mod providers;

// Wind-biased candidate generation
pub mod sampler;

// Propagation engine, run output and JSON export
pub mod simulation;

// Re-export core types
pub use core_types::{dedup_key, risk_score, FirePoint, Region, RegionSet, Weather};

// Re-export collaborator traits and in-memory providers
pub use providers::{GridNdvi, NdviProvider, ProviderError, UniformNdvi};

// Re-export sampling and engine types
pub use sampler::{SpreadSampler, LAT_CORR_EPSILON};
pub use simulation::{
    load_spread_points, save_spread_points, ExportError, PropagationEngine, SimulationConfig,
    SimulationError, SimulationOutput, SimulationStats, SpreadRecord, Termination,
};
