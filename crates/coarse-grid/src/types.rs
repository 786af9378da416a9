//! Coordinate types shared across the model.
//!
//! Undefined coordinates are carried as NaN rather than `Option`,
//! matching the convention of the raster planes the model consumes:
//! a query outside coverage is a normal control path, not an error.

use serde::{Deserialize, Serialize};

/// Meters per degree of latitude at the equator, used to convert the
/// mean ground sample distance into a degree-space perturbation.
pub(crate) const METERS_PER_DEGREE: f64 = 111_120.0;

/// A ground point: latitude/longitude in WGS84 degrees, height in
/// meters. NaN latitude or longitude marks an undefined point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundPoint {
    pub lat: f64,
    pub lon: f64,
    pub height: f64,
}

impl GroundPoint {
    /// Create a ground point at height zero.
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            height: 0.0,
        }
    }

    /// Create a ground point with an explicit height in meters.
    pub fn with_height(lat: f64, lon: f64, height: f64) -> Self {
        Self { lat, lon, height }
    }

    /// The undefined ground point.
    pub fn nan() -> Self {
        Self {
            lat: f64::NAN,
            lon: f64::NAN,
            height: f64::NAN,
        }
    }

    /// True when both latitude and longitude are defined.
    pub fn has_lat_lon(&self) -> bool {
        !self.lat.is_nan() && !self.lon.is_nan()
    }
}

/// An image point in pixel coordinates: `x` is the sample (column),
/// `y` is the line (row). NaN in either axis marks an undefined point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImagePoint {
    pub x: f64,
    pub y: f64,
}

impl ImagePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The undefined image point.
    pub fn nan() -> Self {
        Self {
            x: f64::NAN,
            y: f64::NAN,
        }
    }

    /// True when both axes are defined.
    pub fn is_defined(&self) -> bool {
        !self.x.is_nan() && !self.y.is_nan()
    }
}

/// Longitude range policy of a stored lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WrapMode {
    /// Values form one continuous numeric range and may exceed ±180
    /// when the footprint crosses the antimeridian; interpolation
    /// arithmetic stays monotone in this range.
    Continuous,
    /// Values are kept in the canonical [-180, 180] range.
    Wrap180,
}

/// Wrap a longitude into [-180, 180].
pub fn wrap_180(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Shift a longitude into [0, 360) for dateline-adjusted comparisons.
/// Values already at or above zero pass through unchanged.
pub(crate) fn shift_0_360(lon: f64) -> f64 {
    if lon < 0.0 {
        lon + 360.0
    } else {
        lon
    }
}
