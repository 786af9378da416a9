//! Save and reload behaviour of the model state.

use std::fs::File;
use std::io::{Seek, SeekFrom};

use coarse_grid::{CoarseGridModel, GroundPoint, ImagePoint};
use test_utils::{dateline_model, standard_model};

#[test]
fn test_reloaded_model_reproduces_the_original_mapping() -> anyhow::Result<()> {
    let model = standard_model();

    let mut file = tempfile::tempfile()?;
    model.save_state(&file)?;
    file.seek(SeekFrom::Start(0))?;
    let reloaded = CoarseGridModel::load_state(&file)?;

    for (u, v) in [(3.0, 4.0), (30.5, 20.25), (60.0, 44.0)] {
        let ground = model.line_sample_height_to_world(&ImagePoint::new(u, v), 0.0);
        let back = reloaded.world_to_line_sample(&ground, 0.0);
        assert!((back.x - u).abs() < 0.1, "x drifted after reload: {}", back.x);
        assert!((back.y - v).abs() < 0.1, "y drifted after reload: {}", back.y);
    }
    Ok(())
}

#[test]
fn test_reload_preserves_dateline_handling() -> anyhow::Result<()> {
    let model = dateline_model();

    let mut buf = Vec::new();
    model.save_state(&mut buf)?;
    let reloaded = CoarseGridModel::load_state(buf.as_slice())?;
    assert!(reloaded.grid().crosses_dateline());

    // a point nowhere near the scene must still be rejected
    let far = reloaded.world_to_line_sample(&GroundPoint::new(9.5, 0.0), 0.0);
    assert!(!far.is_defined());

    // and an in-scene point on the west side of the dateline must resolve
    let ground = model.line_sample_height_to_world(&ImagePoint::new(60.0, 20.0), 0.0);
    assert!(ground.lon < 0.0, "expected a wrapped longitude, got {}", ground.lon);
    let back = reloaded.world_to_line_sample(&ground, 0.0);
    assert!((back.x - 60.0).abs() < 0.1);
    assert!((back.y - 20.0).abs() < 0.1);
    Ok(())
}

#[test]
fn test_identical_builds_serialize_identically() -> anyhow::Result<()> {
    let mut first = Vec::new();
    standard_model().save_state(&mut first)?;
    let mut second = Vec::new();
    standard_model().save_state(&mut second)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_state_carries_a_wkt_footprint() -> anyhow::Result<()> {
    let mut buf = Vec::new();
    standard_model().save_state(&mut buf)?;
    let state: serde_json::Value = serde_json::from_slice(&buf)?;

    let wkt = state["wkt_footprint"]
        .as_str()
        .expect("wkt_footprint missing from state");
    assert!(wkt.starts_with("MULTIPOLYGON((("));
    assert!(wkt.ends_with(")))"));

    // the ring is closed: first and last coordinate pairs match
    let ring = &wkt["MULTIPOLYGON(((".len()..wkt.len() - ")))".len()];
    let coords: Vec<&str> = ring.split(',').collect();
    assert!(coords.len() > 4);
    assert_eq!(coords.first(), coords.last());
    Ok(())
}

#[test]
fn test_save_to_path_and_reload() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("model.json");

    let model = standard_model().with_sub_image_offset(ImagePoint::new(128.0, 256.0));
    model.save_state(File::create(&path)?)?;
    let reloaded = CoarseGridModel::load_state(File::open(&path)?)?;

    let offset = reloaded.sub_image_offset();
    assert_eq!(offset.x, 128.0);
    assert_eq!(offset.y, 256.0);
    Ok(())
}
