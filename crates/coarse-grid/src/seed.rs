//! Seed projections for the inverse solver.
//!
//! A caller may attach an independently valid ground ↔ image mapping
//! alongside the grid. The solver uses it for its initial guess, and
//! the extrapolator defers to it entirely for points outside grid
//! coverage. The capability split is carried in the enum tag, so no
//! runtime type probing is needed to ask "is this a map projection?".

use std::fmt::Debug;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::persist::SeedParams;
use crate::types::{GroundPoint, ImagePoint};

/// A forward/inverse ground-image mapping supplied by the caller.
/// Image coordinates are in the model's full-image pixel space.
pub trait Projection: Debug + Send + Sync {
    /// Ground point (degrees) and height (meters) to image pixels.
    fn world_to_image(&self, point: &GroundPoint, height: f64) -> ImagePoint;

    /// Image pixels to ground at height zero.
    fn image_to_world(&self, point: &ImagePoint) -> GroundPoint;

    /// Serializable parameters, if this projection persists. The
    /// default is transient: the seed is dropped on save.
    fn persisted(&self) -> Option<SeedParams> {
        None
    }
}

/// Capability-tagged seed projection.
///
/// `Map` projections are rigorous enough to seed the Newton solve;
/// `Generic` mappings are only consulted by the extrapolation
/// fallback.
#[derive(Debug, Clone)]
pub enum SeedProjection {
    Generic(Arc<dyn Projection>),
    Map(Arc<dyn Projection>),
}

impl SeedProjection {
    /// The underlying projection regardless of capability.
    pub fn projection(&self) -> &dyn Projection {
        match self {
            Self::Generic(p) | Self::Map(p) => p.as_ref(),
        }
    }

    /// Only map projections qualify as Newton seeds.
    pub fn as_map(&self) -> Option<&dyn Projection> {
        match self {
            Self::Map(p) => Some(p.as_ref()),
            Self::Generic(_) => None,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self, Self::Map(_))
    }
}

/// Plate carrée mapping: pixels linear in degrees, rows increasing
/// southward. The simplest concrete map projection; used as a seed
/// and throughout the test suite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Equirectangular {
    /// Latitude of image row 0 (degrees).
    pub origin_lat: f64,
    /// Longitude of image column 0 (degrees).
    pub origin_lon: f64,
    /// Degrees of latitude per pixel row.
    pub deg_per_pixel_lat: f64,
    /// Degrees of longitude per pixel column.
    pub deg_per_pixel_lon: f64,
}

impl Equirectangular {
    pub fn new(
        origin_lat: f64,
        origin_lon: f64,
        deg_per_pixel_lat: f64,
        deg_per_pixel_lon: f64,
    ) -> Self {
        Self {
            origin_lat,
            origin_lon,
            deg_per_pixel_lat,
            deg_per_pixel_lon,
        }
    }
}

impl Projection for Equirectangular {
    fn world_to_image(&self, point: &GroundPoint, _height: f64) -> ImagePoint {
        if !point.has_lat_lon() {
            return ImagePoint::nan();
        }
        ImagePoint::new(
            (point.lon - self.origin_lon) / self.deg_per_pixel_lon,
            (self.origin_lat - point.lat) / self.deg_per_pixel_lat,
        )
    }

    fn image_to_world(&self, point: &ImagePoint) -> GroundPoint {
        if !point.is_defined() {
            return GroundPoint::nan();
        }
        GroundPoint::new(
            self.origin_lat - point.y * self.deg_per_pixel_lat,
            self.origin_lon + point.x * self.deg_per_pixel_lon,
        )
    }

    fn persisted(&self) -> Option<SeedParams> {
        Some(SeedParams::Equirectangular(*self))
    }
}
