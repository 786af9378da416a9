//! Forward/inverse round-trip accuracy over the grid interior.

use coarse_grid::ImagePoint;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_utils::{dateline_model, standard_model};

const PIXEL_TOLERANCE: f64 = 0.1;
const HEIGHTS: [f64; 3] = [0.0, 250.0, 1000.0];

#[test]
fn test_interior_round_trip_within_a_tenth_pixel() {
    let model = standard_model();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..100 {
        // strictly interior, away from the synthesized boundary nodes
        let u = rng.random_range(2.0..60.0);
        let v = rng.random_range(2.0..44.0);
        for height in HEIGHTS {
            let image = ImagePoint::new(u, v);
            let ground = model.line_sample_height_to_world(&image, height);
            assert!(ground.has_lat_lon(), "forward failed at ({u}, {v})");

            let back = model.world_to_line_sample(&ground, height);
            assert!(
                (back.x - u).abs() < PIXEL_TOLERANCE && (back.y - v).abs() < PIXEL_TOLERANCE,
                "round trip drifted at ({u}, {v}) h={height}: got ({}, {})",
                back.x,
                back.y
            );
        }
    }
}

#[test]
fn test_dateline_round_trip_within_a_tenth_pixel() {
    let model = dateline_model();
    assert!(model.grid().crosses_dateline());
    let mut rng = StdRng::seed_from_u64(0xda7e);

    for _ in 0..100 {
        let u = rng.random_range(2.0..60.0);
        let v = rng.random_range(2.0..44.0);
        let image = ImagePoint::new(u, v);
        let ground = model.line_sample_to_world(&image);
        assert!(ground.has_lat_lon());
        // forward output stays canonical even across the seam
        assert!(ground.lon <= 180.0 && ground.lon >= -180.0);

        let back = model.world_to_line_sample(&ground, 0.0);
        assert!(
            (back.x - u).abs() < PIXEL_TOLERANCE && (back.y - v).abs() < PIXEL_TOLERANCE,
            "dateline round trip drifted at ({u}, {v}): got ({}, {})",
            back.x,
            back.y
        );
    }
}

#[test]
fn test_dateline_scene_rejects_points_outside_shifted_footprint() {
    let model = dateline_model();
    // the footprint sits near ±180 at low latitudes; Greenwich is far outside
    let outside = coarse_grid::GroundPoint::new(9.5, 0.0);
    assert!(!model.world_to_line_sample(&outside, 0.0).is_defined());
}
