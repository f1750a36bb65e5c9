//! Core geometric types for the fusion engine.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`WorldPoint`] and [`GridCoord`]: coordinate types
//! - [`Pose2D`]: planar pose (position + heading) used for grid origins
//! - [`Bounds`]: axis-aligned bounding box for extent computations

pub mod math;

mod bounds;
mod point;
mod pose;

pub use bounds::Bounds;
pub use point::{GridCoord, WorldPoint};
pub use pose::Pose2D;
