//! Wind-biased stochastic candidate sampling around a burning point

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core_types::FirePoint;

/// Floor for the latitude correction term.
///
/// `cos(latitude)` approaches zero toward the poles, and dividing by it
/// unguarded produces unbounded or undefined longitudes. The floor keeps
/// candidate coordinates finite everywhere on the globe.
pub const LAT_CORR_EPSILON: f64 = 1e-6;

/// How much wind alignment stretches the spread distance (0.6 = up to 60%)
const WIND_STRETCH: f64 = 0.6;

/// Generates candidate spread offsets around a burning point.
///
/// Sampled directions are confined to ±90° of the wind direction, and
/// distance grows with wind alignment: a candidate straight downwind
/// travels `1.6 * max_distance`, one perpendicular to the wind exactly
/// `max_distance`. Longitudinal offsets are widened by `1/cos(latitude)`
/// so the on-the-ground distance stays comparable away from the equator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SpreadSampler {
    /// Base spread distance per step, in degrees
    pub max_distance: f64,
    /// Number of candidates drawn per burning point
    pub samples_per_point: u32,
}

impl SpreadSampler {
    /// Create a sampler
    pub fn new(max_distance: f64, samples_per_point: u32) -> Self {
        SpreadSampler {
            max_distance,
            samples_per_point,
        }
    }

    /// Draw `samples_per_point` independent candidate coordinates around `point`.
    ///
    /// The generator is injected by the caller so runs stay reproducible;
    /// the engine derives one per burning point from its master seed.
    pub fn candidates<R: Rng + ?Sized>(&self, point: &FirePoint, rng: &mut R) -> Vec<(f64, f64)> {
        (0..self.samples_per_point)
            .map(|_| self.offset(point, rng))
            .collect()
    }

    /// Draw a single candidate coordinate
    fn offset<R: Rng + ?Sized>(&self, point: &FirePoint, rng: &mut R) -> (f64, f64) {
        let wind_direction = point.wind_direction();
        let angle = wind_direction + rng.random_range(-90.0..=90.0);

        // Angular distance from the wind direction: 0° = aligned, 90° = perpendicular
        let angle_diff = ((angle - wind_direction + 180.0).rem_euclid(360.0) - 180.0).abs();
        let wind_factor = angle_diff.to_radians().cos();
        let distance = self.max_distance * (1.0 + WIND_STRETCH * wind_factor);

        // Degrees of longitude are narrower away from the equator
        let lat_corr = point.y().to_radians().cos().max(LAT_CORR_EPSILON);
        let dx = distance * angle.to_radians().cos() / lat_corr;
        let dy = distance * angle.to_radians().sin();

        (point.x() + dx, point.y() + dy)
    }
}
