//! Synthetic geometry raster generators.
//!
//! These generators create predictable latitude/longitude planes whose
//! ground geometry is exactly bilinear, so grid interpolation
//! reproduces them without approximation error and tests can assert
//! tight tolerances.

/// Creates linear latitude/longitude planes with a gentle cross term.
///
/// Latitude decreases southward with the row, longitude increases with
/// the column; the small cross terms keep the Jacobian non-diagonal so
/// the inverse solver is actually exercised.
///
/// # Arguments
///
/// * `width` - Number of columns
/// * `height` - Number of rows
///
/// # Returns
///
/// `(lat, lon)` planes in row-major order.
pub fn linear_geometry(width: usize, height: usize) -> (Vec<f64>, Vec<f64>) {
    let mut lat = Vec::with_capacity(width * height);
    let mut lon = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            lat.push(40.0 - 0.01 * row as f64 - 0.001 * col as f64);
            lon.push(-120.0 + 0.01 * col as f64 + 0.001 * row as f64);
        }
    }
    (lat, lon)
}

/// Creates planes whose longitude run crosses the ±180 meridian.
///
/// Longitudes start near +179 and continue east; values past 180 are
/// wrapped into [-180, 180] the way a decoded raster would carry them.
pub fn dateline_geometry(width: usize, height: usize) -> (Vec<f64>, Vec<f64>) {
    let mut lat = Vec::with_capacity(width * height);
    let mut lon = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            lat.push(10.0 - 0.01 * row as f64);
            let l = 179.0 + 0.02 * col as f64;
            lon.push(if l > 180.0 { l - 360.0 } else { l });
        }
    }
    (lat, lon)
}

/// Creates linear planes with a null sample punched into the latitude
/// plane at `(row, col)`.
pub fn geometry_with_null_hole(
    width: usize,
    height: usize,
    row: usize,
    col: usize,
) -> (Vec<f64>, Vec<f64>) {
    let (mut lat, lon) = linear_geometry(width, height);
    lat[row * width + col] = -9999.0;
    (lat, lon)
}
