//! Grid construction failure modes over shared synthetic rasters.

use coarse_grid::{GridBuilder, ModelError, RasterPlane, ValidRect};
use test_utils::geometry_with_null_hole;

#[test]
fn test_null_inside_valid_extent_rejected() {
    let (width, height) = (33, 25);
    let (lat, lon) = geometry_with_null_hole(width, height, 12, 7);
    let lat_plane = RasterPlane::new(&lat, width, height).unwrap();
    let lon_plane = RasterPlane::new(&lon, width, height).unwrap();

    let err = GridBuilder::with_stride(1)
        .build(&lat_plane, &lon_plane, &ValidRect::full(width, height))
        .unwrap_err();
    assert!(matches!(
        err,
        ModelError::NullInsideValidRect { row: 12, col: 7 }
    ));
}

#[test]
fn test_null_outside_valid_extent_is_ignored() {
    let (width, height) = (33, 25);
    let (lat, lon) = geometry_with_null_hole(width, height, 12, 7);
    let lat_plane = RasterPlane::new(&lat, width, height).unwrap();
    let lon_plane = RasterPlane::new(&lon, width, height).unwrap();

    // the hole sits at column 7; a valid rectangle starting at column 8
    // never reads it
    let rect = ValidRect::new(0, 8, 24, 32);
    assert!(GridBuilder::new()
        .build(&lat_plane, &lon_plane, &rect)
        .is_ok());
}
