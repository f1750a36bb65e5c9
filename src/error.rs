//! Error types for sangam-grid.

use thiserror::Error;

/// Grid fusion error type.
///
/// All errors are raised synchronously during pre-computation validation;
/// no fusion entry point returns a partial result on failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FusionError {
    /// Input failed validation (empty grid set, bad dimensions, bad kernel
    /// size, out-of-range cell values, non-positive gains).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Grids whose geometries must agree did not.
    ///
    /// Detection is best-effort: the fixed-geometry entry points compare
    /// dimensions, resolution, and origin pose, but non-coplanar inputs
    /// cannot be detected from the planar data model and produce
    /// unspecified output.
    #[error("Geometry mismatch: {0}")]
    GeometryMismatch(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FusionError>;
