//! Input raster plane views and null-sample classification.
//!
//! The builder consumes two co-registered full-resolution planes
//! (latitude, longitude) addressed by `(row, col)` within a
//! caller-supplied valid sub-rectangle. How those planes were decoded
//! from disk is the caller's concern.

use crate::error::{ModelError, Result};

/// Samples at or below this value are treated as absent.
pub const NULL_THRESHOLD: f64 = -999.0;

/// One known dataset writes -1.5e-9 where it means "no data"; a tight
/// band around that value is classified as null as well.
const ANOMALY_NULL: f64 = -1.5e-9;
const ANOMALY_TOLERANCE: f64 = 1e-12;

/// Classify a raster sample as absent.
pub fn is_null_sample(value: f64) -> bool {
    value.is_nan() || value <= NULL_THRESHOLD || (value - ANOMALY_NULL).abs() <= ANOMALY_TOLERANCE
}

/// A borrowed, row-major raster plane.
#[derive(Debug, Clone, Copy)]
pub struct RasterPlane<'a> {
    data: &'a [f64],
    width: usize,
    height: usize,
}

impl<'a> RasterPlane<'a> {
    /// Wrap a row-major buffer. The buffer length must be
    /// `width * height`.
    pub fn new(data: &'a [f64], width: usize, height: usize) -> Result<Self> {
        if data.len() != width * height {
            return Err(ModelError::BufferSize {
                len: data.len(),
                expected: width * height,
                width,
                height,
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Sample at `(row, col)`; NaN if out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        if row >= self.height || col >= self.width {
            return f64::NAN;
        }
        self.data[row * self.width + col]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)` of the plane.
    pub fn shape(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

/// The image sub-rectangle over which the raster planes carry valid
/// geometry. Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidRect {
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
}

impl ValidRect {
    pub fn new(min_row: usize, min_col: usize, max_row: usize, max_col: usize) -> Self {
        Self {
            min_row,
            min_col,
            max_row,
            max_col,
        }
    }

    /// The rectangle covering a whole `width x height` raster.
    pub fn full(width: usize, height: usize) -> Self {
        Self {
            min_row: 0,
            min_col: 0,
            max_row: height.saturating_sub(1),
            max_col: width.saturating_sub(1),
        }
    }

    /// Number of valid rows.
    pub fn rows(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Number of valid columns.
    pub fn cols(&self) -> usize {
        self.max_col - self.min_col + 1
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }

    /// Check the rectangle fits inside a `width x height` raster.
    pub(crate) fn check_within(&self, width: usize, height: usize) -> Result<()> {
        if self.max_row >= height || self.max_col >= width || self.min_row > self.max_row
            || self.min_col > self.max_col
        {
            return Err(ModelError::RectOutOfBounds {
                rows: (self.min_row, self.max_row),
                cols: (self.min_col, self.max_col),
                width,
                height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_classification() {
        assert!(is_null_sample(-999.0));
        assert!(is_null_sample(-9999.0));
        assert!(is_null_sample(f64::NAN));
        assert!(is_null_sample(-1.5e-9));
        assert!(!is_null_sample(0.0));
        assert!(!is_null_sample(-179.9));
        assert!(!is_null_sample(45.3));
    }

    #[test]
    fn test_plane_bounds() {
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let plane = RasterPlane::new(&data, 3, 2).unwrap();
        assert_eq!(plane.get(0, 0), 1.0);
        assert_eq!(plane.get(1, 2), 6.0);
        assert!(plane.get(2, 0).is_nan());
        assert!(plane.get(0, 3).is_nan());
    }

    #[test]
    fn test_plane_size_mismatch() {
        let data = vec![0.0; 5];
        assert!(RasterPlane::new(&data, 3, 2).is_err());
    }

    #[test]
    fn test_valid_rect() {
        let rect = ValidRect::new(2, 3, 9, 13);
        assert_eq!(rect.rows(), 8);
        assert_eq!(rect.cols(), 11);
        assert!(rect.contains(2, 3));
        assert!(rect.contains(9, 13));
        assert!(!rect.contains(10, 3));

        assert!(rect.check_within(14, 10).is_ok());
        assert!(rect.check_within(13, 10).is_err());

        let full = ValidRect::full(20, 10);
        assert_eq!(full.rows(), 10);
        assert_eq!(full.cols(), 20);
    }
}
