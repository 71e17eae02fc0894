//! Vegetation index (NDVI) providers
//!
//! The engine only consumes the sampling capability; raster file handling
//! lives outside the core. The in-memory providers here back the demos and
//! tests and mirror the sampling semantics of the upstream GeoTIFF loader:
//! out-of-coverage and no-data coordinates both read as `None`.

use serde::{Deserialize, Serialize};

/// Source of vegetation-density samples.
///
/// `Sync` is required because candidate gating within a step runs on worker
/// threads; implementations must tolerate concurrent read-only access.
pub trait NdviProvider: Sync {
    /// NDVI at the WGS84 coordinate, `None` when out of coverage or no-data
    fn sample(&self, x: f64, y: f64) -> Option<f64>;
}

/// Provider returning the same vegetation index everywhere
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UniformNdvi {
    value: f64,
}

impl UniformNdvi {
    /// Create a uniform provider
    pub fn new(value: f64) -> Self {
        UniformNdvi { value }
    }
}

impl NdviProvider for UniformNdvi {
    fn sample(&self, _x: f64, _y: f64) -> Option<f64> {
        Some(self.value)
    }
}

/// Error raised when constructing a gridded provider from raw values
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Value buffer length does not match the grid dimensions
    DimensionMismatch {
        /// `width * height`
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },
    /// Grid bounds are inverted or degenerate
    InvalidBounds,
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::DimensionMismatch { expected, actual } => {
                write!(f, "Grid expects {expected} values, got {actual}")
            }
            ProviderError::InvalidBounds => write!(f, "Grid bounds are inverted or degenerate"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// In-memory NDVI raster over a WGS84 bounding box.
///
/// Values are stored row-major with row 0 at the northern edge, matching
/// the usual raster orientation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridNdvi {
    values: Vec<f64>,
    width: usize,
    height: usize,
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
    nodata: Option<f64>,
}

impl GridNdvi {
    /// Create a gridded provider from row-major values.
    ///
    /// # Errors
    /// Returns `ProviderError::DimensionMismatch` if `values.len()` is not
    /// `width * height`, and `ProviderError::InvalidBounds` for an empty
    /// grid or an inverted bounding box.
    pub fn new(
        width: usize,
        height: usize,
        bounds: (f64, f64, f64, f64),
        values: Vec<f64>,
        nodata: Option<f64>,
    ) -> Result<Self, ProviderError> {
        let (min_x, min_y, max_x, max_y) = bounds;
        if width == 0 || height == 0 || min_x >= max_x || min_y >= max_y {
            return Err(ProviderError::InvalidBounds);
        }
        if values.len() != width * height {
            return Err(ProviderError::DimensionMismatch {
                expected: width * height,
                actual: values.len(),
            });
        }
        Ok(GridNdvi {
            values,
            width,
            height,
            min_x,
            min_y,
            max_x,
            max_y,
            nodata,
        })
    }
}

impl NdviProvider for GridNdvi {
    fn sample(&self, x: f64, y: f64) -> Option<f64> {
        if x < self.min_x || x >= self.max_x || y < self.min_y || y >= self.max_y {
            return None;
        }
        let col = ((x - self.min_x) / (self.max_x - self.min_x) * self.width as f64) as usize;
        let row = ((self.max_y - y) / (self.max_y - self.min_y) * self.height as f64) as usize;
        let col = col.min(self.width - 1);
        let row = row.min(self.height - 1);

        let value = self.values[row * self.width + col];
        if !value.is_finite() || self.nodata == Some(value) {
            return None;
        }
        Some(value)
    }
}
