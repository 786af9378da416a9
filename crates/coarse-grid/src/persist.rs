//! Model state persistence.
//!
//! The persisted document carries the dateline flag, the raw footprint
//! vertices, the full grid (dimensions, origin, spacing, null value,
//! and both sample planes), the sub-image offset, and an optional
//! nested seed-projection block. A WKT `MULTIPOLYGON` footprint is
//! written alongside for diagnostic interchange; it is never read
//! back.

use std::io::{Read, Write};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::grid::GroundGrid;
use crate::model::CoarseGridModel;
use crate::seed::{Equirectangular, Projection, SeedProjection};
use crate::types::{wrap_180, ImagePoint};

/// Lattice step used when walking the grid edges for the WKT
/// footprint.
pub const FOOTPRINT_STRIDE: usize = 10;

/// Serializable snapshot of a model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelState {
    pub crosses_dateline: bool,
    /// Raw footprint vertices as `[lon, lat]` pairs in [-180, 180].
    pub polygon: Vec<[f64; 2]>,
    pub grid: GroundGrid,
    pub sub_image_offset: ImagePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<SeedState>,
    /// Diagnostic footprint; ignored on load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkt_footprint: Option<String>,
}

/// Persisted seed-projection block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedState {
    /// True when the projection carries the map capability tag.
    pub map: bool,
    pub params: SeedParams,
}

/// Concrete projection parameters a seed can persist as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "projection", rename_all = "snake_case")]
pub enum SeedParams {
    Equirectangular(Equirectangular),
}

impl SeedParams {
    fn into_projection(self) -> Arc<dyn Projection> {
        match self {
            Self::Equirectangular(p) => Arc::new(p),
        }
    }
}

impl CoarseGridModel {
    /// Capture the model as a serializable state document.
    pub fn to_state(&self) -> ModelState {
        let polygon = self
            .footprint()
            .vertices()
            .iter()
            .map(|v| [v.lon, v.lat])
            .collect();
        let seed = self.seed().and_then(|s| {
            s.projection().persisted().map(|params| SeedState {
                map: s.is_map(),
                params,
            })
        });
        ModelState {
            crosses_dateline: self.grid().crosses_dateline(),
            polygon,
            grid: self.grid().clone(),
            sub_image_offset: self.sub_image_offset(),
            seed,
            wkt_footprint: self.wkt_footprint(FOOTPRINT_STRIDE),
        }
    }

    /// Write the state document as JSON.
    pub fn save_state<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_state())?;
        Ok(())
    }

    /// Rebuild a model from a state document.
    pub fn from_state(state: ModelState) -> Result<Self> {
        let grid = state.grid;
        let (lat_shape, lon_shape) = (
            (grid.lat_grid().cols(), grid.lat_grid().rows()),
            (grid.lon_grid().cols(), grid.lon_grid().rows()),
        );
        if lat_shape != lon_shape {
            return Err(ModelError::InvalidState(format!(
                "lattice shapes differ: {lat_shape:?} vs {lon_shape:?}"
            )));
        }
        if state.crosses_dateline != grid.crosses_dateline() {
            return Err(ModelError::InvalidState(
                "dateline flag disagrees with the stored grid".to_string(),
            ));
        }

        let mut model = Self::new(grid).with_sub_image_offset(state.sub_image_offset);
        if let Some(seed_state) = state.seed {
            let projection = seed_state.params.into_projection();
            let seed = if seed_state.map {
                SeedProjection::Map(projection)
            } else {
                SeedProjection::Generic(projection)
            };
            model = model.with_seed(seed);
        }
        Ok(model)
    }

    /// Read a JSON state document.
    pub fn load_state<R: Read>(reader: R) -> Result<Self> {
        let state: ModelState = serde_json::from_reader(reader)?;
        Self::from_state(state)
    }

    /// Walk the grid's four edges at `stride` lattice steps and emit a
    /// WKT `MULTIPOLYGON` of lon/lat pairs. None when any sampled
    /// vertex is undefined.
    pub fn wkt_footprint(&self, stride: usize) -> Option<String> {
        let stride = stride.max(1);
        let (cols, rows) = self.grid().size();
        let xs = edge_steps(cols, stride);
        let ys = edge_steps(rows, stride);

        let mut perimeter: Vec<(usize, usize)> = Vec::new();
        for &x in &xs {
            perimeter.push((x, 0));
        }
        for &y in &ys[1..] {
            perimeter.push((cols - 1, y));
        }
        for &x in xs.iter().rev().skip(1) {
            perimeter.push((x, rows - 1));
        }
        for &y in ys.iter().rev().skip(1) {
            if y != 0 {
                perimeter.push((0, y));
            }
        }

        let mut ring: Vec<String> = Vec::with_capacity(perimeter.len() + 1);
        for (x, y) in perimeter {
            let gp = self.grid().node(x, y);
            if !gp.has_lat_lon() {
                return None;
            }
            ring.push(format!("{} {}", wrap_180(gp.lon), gp.lat));
        }
        ring.push(ring[0].clone());
        Some(format!("MULTIPOLYGON((({})))", ring.join(",")))
    }
}

fn edge_steps(n: usize, stride: usize) -> Vec<usize> {
    let mut steps: Vec<usize> = (0..n - 1).step_by(stride).collect();
    steps.push(n - 1);
    steps
}
