//! Construction of the coarse grid from full-resolution geometry
//! rasters.
//!
//! The builder subsamples the latitude/longitude planes at a fixed
//! pixel stride. Lattice nodes whose source pixel falls past the valid
//! extent are synthesized by the grid's boundary extrapolation rule,
//! so the lattice always covers the full valid rectangle.

use tracing::debug;

use crate::dateline::detect_crossing;
use crate::error::{ModelError, Result};
use crate::grid::{GroundGrid, SampleGrid};
use crate::raster::{is_null_sample, RasterPlane, ValidRect};
use crate::types::{shift_0_360, WrapMode, METERS_PER_DEGREE};

/// Default subsampling stride in pixels.
pub const DEFAULT_STRIDE: usize = 4;

/// Builds a [`GroundGrid`] from raster geometry planes.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    stride: usize,
}

impl GridBuilder {
    pub fn new() -> Self {
        Self {
            stride: DEFAULT_STRIDE,
        }
    }

    pub fn with_stride(stride: usize) -> Self {
        assert!(stride >= 1, "stride must be at least one pixel");
        Self { stride }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Build the grid over `valid` from co-registered planes.
    ///
    /// Fails when the planes disagree in shape, the rectangle reaches
    /// outside them, the extent cannot support boundary extrapolation
    /// at this stride, or a null sample sits inside the declared-valid
    /// region (a corrupt or unsupported input).
    pub fn build(
        &self,
        lat_plane: &RasterPlane<'_>,
        lon_plane: &RasterPlane<'_>,
        valid: &ValidRect,
    ) -> Result<GroundGrid> {
        if lat_plane.shape() != lon_plane.shape() {
            return Err(ModelError::ShapeMismatch {
                lat: lat_plane.shape(),
                lon: lon_plane.shape(),
            });
        }
        valid.check_within(lat_plane.width(), lat_plane.height())?;

        let s = self.stride;
        let (valid_rows, valid_cols) = (valid.rows(), valid.cols());
        // boundary synthesis needs two directly sampled nodes per axis
        if valid_rows <= s || valid_cols <= s {
            return Err(ModelError::DegenerateExtent {
                rows: valid_rows,
                cols: valid_cols,
                stride: s,
            });
        }

        // The wrap policy must be known before any longitude is stored.
        let crossing = detect_crossing(lon_plane, valid);
        let wrap = if crossing {
            WrapMode::Continuous
        } else {
            WrapMode::Wrap180
        };

        let cols = valid_cols.div_ceil(s) + 1;
        let rows = valid_rows.div_ceil(s) + 1;
        let origin = (valid.min_col as f64, valid.min_row as f64);
        let spacing = (s as f64, s as f64);

        let mut lat = SampleGrid::filled_with_null(cols, rows, origin, spacing, WrapMode::Wrap180);
        let mut lon = SampleGrid::filled_with_null(cols, rows, origin, spacing, wrap);

        for y in 0..rows {
            let src_row = valid.min_row + y * s;
            let in_rows = src_row <= valid.max_row;
            for x in 0..cols {
                let src_col = valid.min_col + x * s;
                let in_cols = src_col <= valid.max_col;

                if in_rows && in_cols {
                    let la = lat_plane.get(src_row, src_col);
                    let lo = lon_plane.get(src_row, src_col);
                    if is_null_sample(la) || is_null_sample(lo) {
                        return Err(ModelError::NullInsideValidRect {
                            row: src_row,
                            col: src_col,
                        });
                    }
                    lat.set_node(x, y, la);
                    let lo = if crossing { shift_0_360(lo) } else { lo };
                    lon.set_node(x, y, lo);
                } else {
                    // preceding nodes in this row/column are already
                    // filled, so first-difference synthesis is defined
                    let off_bottom = !in_rows;
                    lat.synthesize_node(x, y, off_bottom);
                    lon.synthesize_node(x, y, off_bottom);
                }
            }
        }

        let mean_gsd_m = estimate_mean_gsd(&lat, &lon, s);
        debug!(cols, rows, crossing, mean_gsd_m, "coarse grid constructed");
        Ok(GroundGrid::new(lat, lon, crossing, mean_gsd_m))
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mean ground sample distance in meters per pixel, estimated from the
/// lattice cell at the grid center.
fn estimate_mean_gsd(lat: &SampleGrid, lon: &SampleGrid, stride: usize) -> f64 {
    let cx = (lat.cols() / 2).min(lat.cols() - 2);
    let cy = (lat.rows() / 2).min(lat.rows() - 2);

    let cell_meters = |x0: usize, y0: usize, x1: usize, y1: usize| {
        let dlat = lat.node(x1, y1) - lat.node(x0, y0);
        let dlon = lon.node(x1, y1) - lon.node(x0, y0);
        let scale = lat.node(x0, y0).to_radians().cos();
        (dlat.powi(2) + (dlon * scale).powi(2)).sqrt() * METERS_PER_DEGREE
    };

    let du = cell_meters(cx, cy, cx + 1, cy);
    let dv = cell_meters(cx, cy, cx, cy + 1);
    (du + dv) / 2.0 / stride as f64
}
