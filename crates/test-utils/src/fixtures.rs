//! Pre-built sensor model fixtures.

use coarse_grid::{CoarseGridModel, GridBuilder, RasterPlane, ValidRect};

use crate::generators::{dateline_geometry, linear_geometry};

/// Default raster size used by the fixtures.
pub const FIXTURE_WIDTH: usize = 65;
pub const FIXTURE_HEIGHT: usize = 49;

/// A model over a 65x49 linear-geometry raster at the default stride.
///
/// Ground geometry: lat `40.0 - 0.01*row - 0.001*col`,
/// lon `-120.0 + 0.01*col + 0.001*row`.
pub fn standard_model() -> CoarseGridModel {
    let (lat, lon) = linear_geometry(FIXTURE_WIDTH, FIXTURE_HEIGHT);
    build_model(&lat, &lon, FIXTURE_WIDTH, FIXTURE_HEIGHT)
}

/// A model whose footprint crosses the ±180 meridian.
pub fn dateline_model() -> CoarseGridModel {
    let (lat, lon) = dateline_geometry(FIXTURE_WIDTH, FIXTURE_HEIGHT);
    build_model(&lat, &lon, FIXTURE_WIDTH, FIXTURE_HEIGHT)
}

/// Build a model from raw planes covering the full raster.
pub fn build_model(lat: &[f64], lon: &[f64], width: usize, height: usize) -> CoarseGridModel {
    let lat_plane = RasterPlane::new(lat, width, height).expect("lat plane");
    let lon_plane = RasterPlane::new(lon, width, height).expect("lon plane");
    let grid = GridBuilder::new()
        .build(&lat_plane, &lon_plane, &ValidRect::full(width, height))
        .expect("grid builds from clean synthetic planes");
    CoarseGridModel::new(grid)
}
