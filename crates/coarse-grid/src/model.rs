//! The coarse-grid sensor model.
//!
//! Owns the grid, the footprint polygons, an optional seed projection,
//! and the sub-image offset. Forward evaluation lives here; the
//! inverse solve and the extrapolation path are in [`crate::solver`]
//! and [`crate::extrapolate`].

use crate::grid::GroundGrid;
use crate::polygon::{build_polygons, GroundPolygon};
use crate::seed::SeedProjection;
use crate::types::{wrap_180, GroundPoint, ImagePoint};

/// Grid-based geodetic sensor model for scanner imagery.
///
/// Immutable after construction; concurrent reads are safe without
/// locking.
#[derive(Debug, Clone)]
pub struct CoarseGridModel {
    grid: GroundGrid,
    polygon: GroundPolygon,
    dateline_polygon: Option<GroundPolygon>,
    seed: Option<SeedProjection>,
    sub_image_offset: ImagePoint,
}

impl CoarseGridModel {
    /// Wrap a built grid; footprint polygons are derived from its
    /// corner nodes.
    pub fn new(grid: GroundGrid) -> Self {
        let (polygon, dateline_polygon) = build_polygons(&grid);
        Self {
            grid,
            polygon,
            dateline_polygon,
            seed: None,
            sub_image_offset: ImagePoint::new(0.0, 0.0),
        }
    }

    /// Attach a seed projection.
    pub fn with_seed(mut self, seed: SeedProjection) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the offset of the sub-image origin within the full image.
    /// The model computes in full-image pixel space internally and
    /// converts at the API boundary.
    pub fn with_sub_image_offset(mut self, offset: ImagePoint) -> Self {
        self.sub_image_offset = offset;
        self
    }

    pub fn grid(&self) -> &GroundGrid {
        &self.grid
    }

    /// Footprint with longitudes in [-180, 180].
    pub fn footprint(&self) -> &GroundPolygon {
        &self.polygon
    }

    /// Dateline-shifted footprint, present only when the scene crosses
    /// the antimeridian. Compare only against pre-shifted longitudes.
    pub fn dateline_footprint(&self) -> Option<&GroundPolygon> {
        self.dateline_polygon.as_ref()
    }

    pub fn seed(&self) -> Option<&SeedProjection> {
        self.seed.as_ref()
    }

    pub fn sub_image_offset(&self) -> ImagePoint {
        self.sub_image_offset
    }

    /// Forward mapping: sub-image pixel coordinates and height to
    /// ground. Undefined inputs yield an undefined point.
    pub fn line_sample_height_to_world(&self, image: &ImagePoint, height: f64) -> GroundPoint {
        if !image.is_defined() {
            return GroundPoint::nan();
        }
        let u = image.x + self.sub_image_offset.x;
        let v = image.y + self.sub_image_offset.y;
        let mut ground = self.forward_full(u, v);
        if ground.has_lat_lon() {
            ground.height = if height.is_nan() { 0.0 } else { height };
        }
        ground
    }

    /// Forward mapping at height zero.
    pub fn line_sample_to_world(&self, image: &ImagePoint) -> GroundPoint {
        self.line_sample_height_to_world(image, 0.0)
    }

    /// Forward evaluation in full-image pixel space. Falls back to the
    /// lattice's linear extension when the plain bilinear lookup hits
    /// a gap or the extent edge; output longitude is canonical.
    pub(crate) fn forward_full(&self, u: f64, v: f64) -> GroundPoint {
        let mut gp = self.grid.ground_at(u, v);
        if !gp.has_lat_lon() {
            gp = self.grid.ground_at_extrapolated(u, v);
        }
        if gp.has_lat_lon() {
            gp.lon = wrap_180(gp.lon);
        }
        gp
    }

    pub(crate) fn center_image_point(&self) -> ImagePoint {
        self.grid.center_image_point()
    }
}
