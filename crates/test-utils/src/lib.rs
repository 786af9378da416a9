//! Shared test utilities for the coarse-grid workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic latitude/longitude raster generators
//! - Pre-built sensor model fixtures
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{linear_geometry, standard_model};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
