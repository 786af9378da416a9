//! Lattice storage and interpolation for the coarse grid.

use serde::{Deserialize, Serialize};

use crate::types::{GroundPoint, ImagePoint, WrapMode};

/// No-data sentinel stored in lattice nodes. Kept finite so persisted
/// grids survive a JSON round trip.
pub const GRID_NULL: f64 = -1.0e10;

/// A rectangular lattice of scalar samples indexed over image space.
///
/// Node `(x, y)` sits at image point
/// `(origin.0 + x * spacing.0, origin.1 + y * spacing.1)`.
/// Storage is row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleGrid {
    cols: usize,
    rows: usize,
    origin: (f64, f64),
    spacing: (f64, f64),
    null_value: f64,
    wrap: WrapMode,
    data: Vec<f64>,
}

impl SampleGrid {
    /// Allocate a lattice with every node set to the null value.
    pub fn filled_with_null(
        cols: usize,
        rows: usize,
        origin: (f64, f64),
        spacing: (f64, f64),
        wrap: WrapMode,
    ) -> Self {
        Self {
            cols,
            rows,
            origin,
            spacing,
            null_value: GRID_NULL,
            wrap,
            data: vec![GRID_NULL; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn spacing(&self) -> (f64, f64) {
        self.spacing
    }

    pub fn null_value(&self) -> f64 {
        self.null_value
    }

    pub fn wrap(&self) -> WrapMode {
        self.wrap
    }

    /// Classify a looked-up value as null.
    pub fn is_null(&self, value: f64) -> bool {
        value.is_nan() || value == self.null_value
    }

    /// Node value at lattice index `(x, y)`; the null value if the
    /// index is out of range.
    pub fn node(&self, x: usize, y: usize) -> f64 {
        if x >= self.cols || y >= self.rows {
            return self.null_value;
        }
        self.data[y * self.cols + x]
    }

    pub(crate) fn set_node(&mut self, x: usize, y: usize, value: f64) {
        debug_assert!(x < self.cols && y < self.rows);
        self.data[y * self.cols + x] = value;
    }

    /// Synthesize an out-of-extent boundary node by constant
    /// first-difference extrapolation: `2*last - second_to_last`.
    /// Row direction is used when the node is off the bottom of the
    /// valid extent, column direction otherwise. For a `Continuous`
    /// lattice a negative synthesized value is shifted by +360 so the
    /// stored range stays monotone across the dateline.
    pub(crate) fn synthesize_node(&mut self, x: usize, y: usize, off_bottom: bool) {
        let mut value = if off_bottom {
            2.0 * self.node(x, y - 1) - self.node(x, y - 2)
        } else {
            2.0 * self.node(x - 1, y) - self.node(x - 2, y)
        };
        if self.wrap == WrapMode::Continuous && value < 0.0 {
            value += 360.0;
        }
        self.set_node(x, y, value);
    }

    /// Map an image point to fractional lattice coordinates.
    fn lattice_coords(&self, u: f64, v: f64) -> (f64, f64) {
        (
            (u - self.origin.0) / self.spacing.0,
            (v - self.origin.1) / self.spacing.1,
        )
    }

    /// Bilinear lookup at image point `(u, v)`. Returns the null value
    /// when the point falls outside the lattice or any of the four
    /// surrounding nodes is null; the grid never fabricates a missing
    /// sample on its own.
    pub fn value_at(&self, u: f64, v: f64) -> f64 {
        if self.cols < 2 || self.rows < 2 {
            return self.null_value;
        }
        let (x, y) = self.lattice_coords(u, v);
        if x < 0.0 || y < 0.0 || x > (self.cols - 1) as f64 || y > (self.rows - 1) as f64 {
            return self.null_value;
        }
        let x0 = (x.floor() as usize).min(self.cols - 2);
        let y0 = (y.floor() as usize).min(self.rows - 2);
        self.bilinear(x0, y0, x - x0 as f64, y - y0 as f64)
    }

    /// Bilinear lookup with linear extension beyond the lattice
    /// extent: the nearest edge cell's plane is continued outward, so
    /// values vary linearly past the boundary.
    pub fn value_at_extrapolated(&self, u: f64, v: f64) -> f64 {
        if self.cols < 2 || self.rows < 2 {
            return self.null_value;
        }
        let (x, y) = self.lattice_coords(u, v);
        let x0 = (x.floor().max(0.0) as usize).min(self.cols - 2);
        let y0 = (y.floor().max(0.0) as usize).min(self.rows - 2);
        self.bilinear(x0, y0, x - x0 as f64, y - y0 as f64)
    }

    /// Bilinear combination over cell `(x0, y0)`; the fractional
    /// offsets may lie outside [0, 1] for extrapolated lookups.
    fn bilinear(&self, x0: usize, y0: usize, fx: f64, fy: f64) -> f64 {
        let v00 = self.node(x0, y0);
        let v10 = self.node(x0 + 1, y0);
        let v01 = self.node(x0, y0 + 1);
        let v11 = self.node(x0 + 1, y0 + 1);
        if self.is_null(v00) || self.is_null(v10) || self.is_null(v01) || self.is_null(v11) {
            return self.null_value;
        }
        let top = v00 * (1.0 - fx) + v10 * fx;
        let bottom = v01 * (1.0 - fx) + v11 * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

/// Co-registered latitude and longitude lattices plus the dateline
/// flag and the mean ground sample distance derived at build time.
///
/// Invariant: both lattices share size, origin, and spacing, and a
/// node is either valid in both or null in both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundGrid {
    lat: SampleGrid,
    lon: SampleGrid,
    crosses_dateline: bool,
    mean_gsd_m: f64,
}

impl GroundGrid {
    pub(crate) fn new(
        lat: SampleGrid,
        lon: SampleGrid,
        crosses_dateline: bool,
        mean_gsd_m: f64,
    ) -> Self {
        debug_assert_eq!((lat.cols(), lat.rows()), (lon.cols(), lon.rows()));
        debug_assert_eq!(lat.origin(), lon.origin());
        debug_assert_eq!(lat.spacing(), lon.spacing());
        Self {
            lat,
            lon,
            crosses_dateline,
            mean_gsd_m,
        }
    }

    /// True when the footprint spans the ±180 meridian.
    pub fn crosses_dateline(&self) -> bool {
        self.crosses_dateline
    }

    /// Mean ground sample distance in meters per pixel.
    pub fn mean_gsd_m(&self) -> f64 {
        self.mean_gsd_m
    }

    /// Lattice size as `(cols, rows)`.
    pub fn size(&self) -> (usize, usize) {
        (self.lat.cols(), self.lat.rows())
    }

    pub fn origin(&self) -> (f64, f64) {
        self.lat.origin()
    }

    pub fn spacing(&self) -> (f64, f64) {
        self.lat.spacing()
    }

    pub fn lat_grid(&self) -> &SampleGrid {
        &self.lat
    }

    pub fn lon_grid(&self) -> &SampleGrid {
        &self.lon
    }

    /// Ground point at image coordinates via bilinear interpolation.
    /// Undefined when either lattice cannot supply a value. Stored
    /// longitudes may exceed 180 on dateline scenes; callers wrap.
    pub fn ground_at(&self, u: f64, v: f64) -> GroundPoint {
        let lat = self.lat.value_at(u, v);
        let lon = self.lon.value_at(u, v);
        if self.lat.is_null(lat) || self.lon.is_null(lon) {
            return GroundPoint::nan();
        }
        GroundPoint::new(lat, lon)
    }

    /// Like [`ground_at`](Self::ground_at) but with the lattice's
    /// linear extension past its extent.
    pub fn ground_at_extrapolated(&self, u: f64, v: f64) -> GroundPoint {
        let lat = self.lat.value_at_extrapolated(u, v);
        let lon = self.lon.value_at_extrapolated(u, v);
        if self.lat.is_null(lat) || self.lon.is_null(lon) {
            return GroundPoint::nan();
        }
        GroundPoint::new(lat, lon)
    }

    /// Ground point at lattice node `(x, y)` without interpolation.
    pub fn node(&self, x: usize, y: usize) -> GroundPoint {
        let lat = self.lat.node(x, y);
        let lon = self.lon.node(x, y);
        if self.lat.is_null(lat) || self.lon.is_null(lon) {
            return GroundPoint::nan();
        }
        GroundPoint::new(lat, lon)
    }

    /// Image point at the lattice center, the default Newton seed.
    pub fn center_image_point(&self) -> ImagePoint {
        let (ox, oy) = self.lat.origin();
        let (sx, sy) = self.lat.spacing();
        ImagePoint::new(
            ox + sx * (self.lat.cols() - 1) as f64 / 2.0,
            oy + sy * (self.lat.rows() - 1) as f64 / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_grid() -> SampleGrid {
        // node(x, y) = 10*x + y over a 4x3 lattice, unit spacing
        let mut g = SampleGrid::filled_with_null(4, 3, (0.0, 0.0), (1.0, 1.0), WrapMode::Wrap180);
        for y in 0..3 {
            for x in 0..4 {
                g.set_node(x, y, (10 * x + y) as f64);
            }
        }
        g
    }

    #[test]
    fn test_bilinear_nodes_and_center() {
        let g = gradient_grid();
        assert_eq!(g.value_at(0.0, 0.0), 0.0);
        assert_eq!(g.value_at(3.0, 2.0), 32.0);
        // midpoint of cell (1,1)
        let mid = g.value_at(1.5, 1.5);
        assert!((mid - 16.5).abs() < 1e-12);
    }

    #[test]
    fn test_outside_is_null_without_extrapolation() {
        let g = gradient_grid();
        assert!(g.is_null(g.value_at(-0.5, 0.0)));
        assert!(g.is_null(g.value_at(0.0, 2.5)));
    }

    #[test]
    fn test_extrapolated_lookup_is_linear() {
        let g = gradient_grid();
        // one cell past the right edge continues the 10-per-node slope
        let v = g.value_at_extrapolated(4.0, 1.0);
        assert!((v - 41.0).abs() < 1e-12);
        // above the top edge
        let v = g.value_at_extrapolated(1.0, -1.0);
        assert!((v - 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_null_node_propagates() {
        let mut g = gradient_grid();
        g.set_node(1, 1, GRID_NULL);
        assert!(g.is_null(g.value_at(0.5, 0.5)));
        assert!(g.is_null(g.value_at(1.5, 1.5)));
        // cells not touching the null node still interpolate
        assert!(!g.is_null(g.value_at(2.5, 1.5)));
    }

    #[test]
    fn test_synthesize_first_difference() {
        let mut g = gradient_grid();
        // column direction: 2*node(2,0) - node(1,0)
        g.synthesize_node(3, 0, false);
        assert_eq!(g.node(3, 0), 2.0 * 20.0 - 10.0);
        // row direction: 2*node(0,1) - node(0,0)
        g.synthesize_node(0, 2, true);
        assert_eq!(g.node(0, 2), 2.0 * 1.0 - 0.0);
    }

    #[test]
    fn test_synthesize_continuous_wraps_negative() {
        let mut g = SampleGrid::filled_with_null(3, 2, (0.0, 0.0), (1.0, 1.0), WrapMode::Continuous);
        // descending longitudes straddling zero
        g.set_node(0, 0, 3.0);
        g.set_node(1, 0, 1.0);
        g.set_node(0, 1, 3.0);
        g.set_node(1, 1, 1.0);
        g.synthesize_node(2, 0, false);
        // 2*1 - 3 = -1, shifted to 359
        assert_eq!(g.node(2, 0), 359.0);
    }

    #[test]
    fn test_center_image_point() {
        let mut lat = SampleGrid::filled_with_null(5, 3, (10.0, 20.0), (4.0, 4.0), WrapMode::Wrap180);
        let mut lon = lat.clone();
        for y in 0..3 {
            for x in 0..5 {
                lat.set_node(x, y, 40.0 - y as f64);
                lon.set_node(x, y, -120.0 + x as f64);
            }
        }
        let grid = GroundGrid::new(lat, lon, false, 30.0);
        let c = grid.center_image_point();
        assert_eq!(c.x, 10.0 + 4.0 * 2.0);
        assert_eq!(c.y, 20.0 + 4.0 * 1.0);
    }
}
