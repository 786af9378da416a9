//! Grid-Based Geodetic Sensor Model
//!
//! This crate approximates the image ↔ ground mapping of scanner and
//! push-broom imagery when no rigorous camera model is available. A
//! full-resolution latitude/longitude raster is subsampled into a
//! coarse lattice once at construction time; afterwards the forward
//! mapping is a bilinear lookup and the inverse mapping is a bounded
//! Newton solve against that lookup.
//!
//! # Architecture
//!
//! ```text
//! lat/lon raster planes
//!      │
//!      ▼
//! GridBuilder (stride subsample, dateline detection)
//!      │
//!      ▼
//! GroundGrid ───► footprint polygons (raw + dateline-shifted)
//!      │
//!      ├─► forward: line_sample_height_to_world (bilinear)
//!      │
//!      └─► inverse: world_to_line_sample (Newton iteration)
//!               │
//!               └─► extrapolate (boundary-ray clip + directional
//!                   derivative, for points outside the footprint)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use coarse_grid::{CoarseGridModel, GridBuilder, RasterPlane, ValidRect};
//!
//! let lat = RasterPlane::new(&lat_samples, width, height)?;
//! let lon = RasterPlane::new(&lon_samples, width, height)?;
//! let grid = GridBuilder::new().build(&lat, &lon, &ValidRect::full(width, height))?;
//! let model = CoarseGridModel::new(grid);
//!
//! let ground = model.line_sample_to_world(&ImagePoint::new(100.0, 50.0));
//! let image = model.world_to_line_sample(&ground, 0.0);
//! ```
//!
//! The model is immutable after construction, so shared read access
//! from multiple threads needs no locking. Rebuilding a grid must not
//! overlap with in-flight reads; callers serialize that externally.

pub mod builder;
pub mod dateline;
pub mod error;
pub mod extrapolate;
pub mod grid;
pub mod model;
pub mod persist;
pub mod polygon;
pub mod raster;
pub mod seed;
pub mod solver;
pub mod types;

pub use builder::{GridBuilder, DEFAULT_STRIDE};
pub use dateline::DatelineDetector;
pub use error::{ModelError, Result};
pub use grid::{GroundGrid, SampleGrid, GRID_NULL};
pub use model::CoarseGridModel;
pub use persist::{ModelState, SeedParams, SeedState};
pub use polygon::GroundPolygon;
pub use raster::{is_null_sample, RasterPlane, ValidRect, NULL_THRESHOLD};
pub use seed::{Equirectangular, Projection, SeedProjection};
pub use types::{wrap_180, GroundPoint, ImagePoint, WrapMode};
