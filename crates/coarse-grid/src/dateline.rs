//! Antimeridian (dateline) crossing detection.
//!
//! A footprint that spans ±180 shows up in the longitude plane as an
//! adjacent-pixel jump between +179 and -179 (in truncated degrees).
//! The detector scans one row of longitudes and latches two one-shot
//! flags, one per approach direction: seeing +179 then +178 concludes
//! no crossing from the east side, seeing +179 then -179 concludes a
//! crossing. The west side check is symmetric starting from -179.

use crate::raster::{is_null_sample, RasterPlane, ValidRect};

/// Streaming scanner for the ±179 adjacency signature.
#[derive(Debug, Default)]
pub struct DatelineDetector {
    armed_east: bool,
    armed_west: bool,
    done_east: bool,
    done_west: bool,
}

impl DatelineDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one longitude sample in scan order. Returns true as soon
    /// as a crossing is concluded.
    pub fn feed(&mut self, lon: f64) -> bool {
        let t = lon.trunc() as i64;

        if self.armed_east {
            if t == -179 {
                return true;
            }
            if t == 178 {
                self.armed_east = false;
                self.done_east = true;
            }
        } else if !self.done_east && t == 179 {
            self.armed_east = true;
        }

        if self.armed_west {
            if t == 179 {
                return true;
            }
            if t == -178 {
                self.armed_west = false;
                self.done_west = true;
            }
        } else if !self.done_west && t == -179 {
            self.armed_west = true;
        }

        false
    }

    /// Scan a full sequence of longitudes, skipping null samples.
    pub fn scan_row<I: IntoIterator<Item = f64>>(row: I) -> bool {
        let mut detector = Self::new();
        for lon in row {
            if is_null_sample(lon) {
                continue;
            }
            if detector.feed(lon) {
                return true;
            }
        }
        false
    }
}

/// Run the detector on the first valid raster row and, if that is
/// inconclusive, on the last valid row. A crossing on either declares
/// the flag.
pub(crate) fn detect_crossing(lon_plane: &RasterPlane<'_>, valid: &ValidRect) -> bool {
    let scan = |row: usize| {
        DatelineDetector::scan_row(
            (valid.min_col..=valid.max_col).map(|col| lon_plane.get(row, col)),
        )
    };
    scan(valid.min_row) || scan(valid.max_row)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_crossing_descending_from_179() {
        // 179 followed by 178: east side concluded, no crossing
        let row = [179.6, 179.1, 178.4, 177.9, 176.2];
        assert!(!DatelineDetector::scan_row(row));
    }

    #[test]
    fn test_crossing_east_to_west() {
        let row = [178.2, 179.1, 179.9, -179.8, -179.1];
        assert!(DatelineDetector::scan_row(row));
    }

    #[test]
    fn test_crossing_west_to_east() {
        let row = [-178.0, -179.2, -179.9, 179.8, 179.0];
        assert!(DatelineDetector::scan_row(row));
    }

    #[test]
    fn test_no_crossing_ascending_from_minus_179() {
        let row = [-179.7, -179.2, -178.8, -178.1];
        assert!(!DatelineDetector::scan_row(row));
    }

    #[test]
    fn test_ordinary_longitudes() {
        let row = [-120.0, -119.5, -119.0, -118.5];
        assert!(!DatelineDetector::scan_row(row));
    }

    #[test]
    fn test_nulls_are_skipped() {
        let row = [179.5, -9999.0, -179.5];
        assert!(DatelineDetector::scan_row(row));
    }
}
