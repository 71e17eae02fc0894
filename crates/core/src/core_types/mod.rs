//! Core value types carried through the propagation pipeline

pub mod point;
pub mod region;

pub use point::{dedup_key, risk_score, FirePoint, Weather};
pub use region::{Region, RegionSet};
