//! # Sangam-Grid: Occupancy Grid Fusion Engine
//!
//! A library for fusing multiple georeferenced 2D occupancy grids — each
//! produced independently by different robots, sensors, or time windows —
//! into a single consistent map.
//!
//! ## Features
//!
//! - **Geometric alignment**: grids with arbitrary origins, extents, and
//!   resolutions are resampled onto a shared output frame (non-zero
//!   origin yaw included)
//! - **Fusion policies**: max, min, zero-biased, binary, floating-point,
//!   and six-gain information fusion, selected per call
//! - **Smoothing**: a box-filter averaging pass to denoise fused output
//!
//! ## Quick Start
//!
//! ```rust
//! use sangam_grid::core::Pose2D;
//! use sangam_grid::grid::{value, GridGeometry, OccupancyGrid};
//! use sangam_grid::fusion::FusionPolicy;
//!
//! // Two 3x3 grids, one meter per cell, offset by one meter in x.
//! let a = OccupancyGrid::filled(
//!     GridGeometry::new(Pose2D::identity(), 1.0, 3, 3),
//!     value::FREE,
//! ).unwrap();
//! let b = OccupancyGrid::filled(
//!     GridGeometry::new(Pose2D::new(1.0, 0.0, 0.0), 1.0, 3, 3),
//!     value::OCCUPIED,
//! ).unwrap();
//!
//! // Max-combine over the union extent (4x3 cells).
//! let fused = FusionPolicy::Max.fuse(&[&a, &b], None).unwrap();
//! assert_eq!(fused.width(), 4);
//! assert_eq!(fused.height(), 3);
//! ```
//!
//! ## Coordinate Frame
//!
//! Planar, right-handed, counter-clockwise positive rotation. A grid's
//! origin pose is the world location and heading of the lower corner of
//! cell (0, 0); cells are square and stored row-major.
//!
//! All input grids must lie in the same plane. The engine performs no 3D
//! reprojection and produces unspecified output if that precondition is
//! violated.
//!
//! ## Ownership
//!
//! Fusion treats input grids as read-only and returns newly allocated
//! outputs. The in-place entry points ([`fusion::combine_into`],
//! [`fusion::binary_merge_into`], [`fusion::floating_merge_into`]) mutate
//! exactly one caller-supplied target (or target/overlap pair) and must
//! not be raced with other access to it. The engine holds no process-wide
//! state, so independent calls on disjoint grids parallelize freely.

pub mod core;
pub mod error;
pub mod fusion;
pub mod grid;

// Re-export main types at crate root
pub use error::{FusionError, Result};
pub use fusion::{FusionPolicy, InformationGains};
pub use grid::{GridGeometry, OccupancyGrid};
