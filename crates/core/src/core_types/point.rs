//! Ignition and spread point types with weather-derived risk scoring

use serde::{Deserialize, Serialize};

/// Weather conditions at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Air temperature in °C
    pub temperature: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction in degrees (0 = North, clockwise)
    pub wind_direction: f64,
}

impl Weather {
    /// Create weather conditions
    pub fn new(temperature: f64, humidity: f64, wind_speed: f64, wind_direction: f64) -> Self {
        Weather {
            temperature,
            humidity,
            wind_speed,
            wind_direction,
        }
    }
}

impl Default for Weather {
    /// Moderate fallback conditions used when enriched data is sparse
    fn default() -> Self {
        Weather {
            temperature: 20.0,
            humidity: 50.0,
            wind_speed: 2.0,
            wind_direction: 0.0,
        }
    }
}

/// Compute the fire risk score from weather conditions, rounded to 3 decimals.
///
/// Weighted sum of normalized temperature (45 °C reference, unclamped),
/// inverted humidity, and wind speed (capped at 10 m/s). Yields values in
/// [0, 1] for inputs inside those reference ranges. Pure and total; the
/// caller is responsible for feeding it finite numbers.
pub fn risk_score(temperature: f64, humidity: f64, wind_speed: f64) -> f64 {
    const TEMP_WEIGHT: f64 = 0.4;
    const HUMIDITY_WEIGHT: f64 = 0.3;
    const WIND_WEIGHT: f64 = 0.3;

    let temp_norm = temperature / 45.0;
    let humidity_norm = 1.0 - humidity / 100.0;
    let wind_norm = (wind_speed / 10.0).min(1.0);

    let score = TEMP_WEIGHT * temp_norm + HUMIDITY_WEIGHT * humidity_norm + WIND_WEIGHT * wind_norm;
    (score * 1000.0).round() / 1000.0
}

/// Compute the deduplication key for a coordinate pair.
///
/// Coordinates are scaled by `10^precision` and rounded to integers, so the
/// default precision of 4 buckets points at roughly 11 m resolution.
pub fn dedup_key(x: f64, y: f64, precision: u32) -> (i64, i64) {
    let scale = 10f64.powi(precision as i32);
    ((x * scale).round() as i64, (y * scale).round() as i64)
}

/// A point on the map where fire is burning or may ignite.
///
/// Covers both ignition points (`step == None`) and spread descendants
/// (`step == Some(k)` for the step that produced them). Immutable after
/// construction: the risk score is computed once from the weather fields
/// and cached for the point's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FirePoint {
    x: f64,
    y: f64,
    temperature: f64,
    humidity: f64,
    wind_speed: f64,
    wind_direction: f64,
    step: Option<u32>,
    ndvi: Option<f64>,
    risk_score: f64,
}

impl FirePoint {
    /// Create an ignition point from a location and weather conditions
    pub fn ignition(x: f64, y: f64, weather: Weather) -> Self {
        FirePoint {
            x,
            y,
            temperature: weather.temperature,
            humidity: weather.humidity,
            wind_speed: weather.wind_speed,
            wind_direction: weather.wind_direction,
            step: None,
            ndvi: None,
            risk_score: risk_score(weather.temperature, weather.humidity, weather.wind_speed),
        }
    }

    /// Create an ignition point with a pre-sampled vegetation index
    pub fn ignition_with_ndvi(x: f64, y: f64, weather: Weather, ndvi: Option<f64>) -> Self {
        let mut point = Self::ignition(x, y, weather);
        point.ndvi = ndvi;
        point
    }

    /// Create a spread descendant at a new location.
    ///
    /// Weather is inherited from the parent verbatim and the risk score is
    /// recomputed from it, a deliberate modeling simplification: descendants
    /// do not resample weather at their own location.
    pub fn spread_from(&self, x: f64, y: f64, ndvi: Option<f64>, step: u32) -> Self {
        FirePoint {
            x,
            y,
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
            step: Some(step),
            ndvi,
            risk_score: risk_score(self.temperature, self.humidity, self.wind_speed),
        }
    }

    /// Longitude in WGS84 degrees
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Latitude in WGS84 degrees
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Weather conditions carried by this point
    pub fn weather(&self) -> Weather {
        Weather {
            temperature: self.temperature,
            humidity: self.humidity,
            wind_speed: self.wind_speed,
            wind_direction: self.wind_direction,
        }
    }

    /// Wind direction in degrees (0 = North, clockwise)
    pub fn wind_direction(&self) -> f64 {
        self.wind_direction
    }

    /// Simulation step that produced this point, `None` for ignition points
    pub fn step(&self) -> Option<u32> {
        self.step
    }

    /// Vegetation index at this point, `None` when unavailable
    pub fn ndvi(&self) -> Option<f64> {
        self.ndvi
    }

    /// Cached fire risk score, computed once at construction
    pub fn risk_score(&self) -> f64 {
        self.risk_score
    }

    /// Deduplication key at the given coordinate precision
    pub fn dedup_key(&self, precision: u32) -> (i64, i64) {
        dedup_key(self.x, self.y, precision)
    }
}
