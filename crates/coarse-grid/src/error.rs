//! Error types for the sensor model.
//!
//! Construction-time data problems are hard errors; undefined inputs
//! at runtime propagate as NaN-valued points, never through this enum.

use thiserror::Error;

/// Errors that can occur while building or restoring a model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Latitude and longitude planes must share one shape.
    #[error("raster planes have mismatched shapes: lat {lat:?} vs lon {lon:?}")]
    ShapeMismatch {
        lat: (usize, usize),
        lon: (usize, usize),
    },

    /// Raster buffer length does not match the declared dimensions.
    #[error("raster buffer holds {len} samples, expected {expected} ({width}x{height})")]
    BufferSize {
        len: usize,
        expected: usize,
        width: usize,
        height: usize,
    },

    /// The valid sub-rectangle reaches outside the raster.
    #[error("valid rectangle rows {rows:?} cols {cols:?} exceeds raster {width}x{height}")]
    RectOutOfBounds {
        rows: (usize, usize),
        cols: (usize, usize),
        width: usize,
        height: usize,
    },

    /// A null sample inside the declared-valid region marks a corrupt
    /// or unsupported input and must not be propagated into the grid.
    #[error("null sample inside the valid rectangle at row {row}, col {col}")]
    NullInsideValidRect { row: usize, col: usize },

    /// The valid extent is too small to support boundary extrapolation
    /// at the requested stride.
    #[error("valid extent {rows}x{cols} is too small for stride {stride}")]
    DegenerateExtent {
        rows: usize,
        cols: usize,
        stride: usize,
    },

    /// A persisted model state failed internal consistency checks.
    #[error("invalid model state: {0}")]
    InvalidState(String),

    /// Serialization failure while saving or loading model state.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O failure while saving or loading model state.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for model construction and persistence.
pub type Result<T> = std::result::Result<T, ModelError>;
