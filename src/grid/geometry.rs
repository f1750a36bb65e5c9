//! Grid geometry: origin pose, resolution, and cell extent.

use serde::{Deserialize, Serialize};

use crate::core::{Bounds, GridCoord, Pose2D, WorldPoint};
use crate::error::{FusionError, Result};

/// Tolerance used when comparing two geometries for equality.
const GEOMETRY_EPSILON: f32 = 1e-4;

/// The geometric half of an occupancy grid.
///
/// The origin pose gives the world location and heading of the lower
/// corner of cell (0, 0). Cells are square, `resolution` meters per edge,
/// stored row-major (index = row * width + col).
///
/// All grids are assumed to lie in the same plane. The engine performs no
/// 3D reprojection; feeding it grids from different planes produces
/// unspecified output.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// World pose of the lower corner of cell (0, 0).
    pub origin: Pose2D,
    /// Meters per cell edge.
    pub resolution: f32,
    /// Number of columns.
    pub width: usize,
    /// Number of rows.
    pub height: usize,
}

impl GridGeometry {
    /// Create a new geometry.
    #[inline]
    pub fn new(origin: Pose2D, resolution: f32, width: usize, height: usize) -> Self {
        Self {
            origin,
            resolution,
            width,
            height,
        }
    }

    /// Validate dimensions and resolution.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(FusionError::InvalidInput(format!(
                "grid dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if !(self.resolution.is_finite() && self.resolution > 0.0) {
            return Err(FusionError::InvalidInput(format!(
                "resolution must be positive and finite, got {}",
                self.resolution
            )));
        }
        Ok(())
    }

    /// Total number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Row-major index of a cell, unchecked.
    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.width + col
    }

    /// Check if a coordinate lies within the extent.
    #[inline]
    pub fn contains(&self, coord: GridCoord) -> bool {
        coord.x >= 0
            && coord.y >= 0
            && (coord.x as usize) < self.width
            && (coord.y as usize) < self.height
    }

    /// World coordinates of a cell's center.
    #[inline]
    pub fn cell_center_world(&self, coord: GridCoord) -> WorldPoint {
        self.origin.transform_point(WorldPoint::new(
            (coord.x as f32 + 0.5) * self.resolution,
            (coord.y as f32 + 0.5) * self.resolution,
        ))
    }

    /// Map a world point to the cell containing it.
    ///
    /// Returns `None` if the point falls outside the extent. Handles
    /// non-zero origin yaw by going through the inverse origin transform.
    #[inline]
    pub fn world_to_cell(&self, point: WorldPoint) -> Option<GridCoord> {
        let local = self.origin.inverse_transform_point(point);
        let col = (local.x / self.resolution).floor();
        let row = (local.y / self.resolution).floor();
        let coord = GridCoord::new(col as i32, row as i32);
        if col >= 0.0 && row >= 0.0 && self.contains(coord) {
            Some(coord)
        } else {
            None
        }
    }

    /// The four world-frame corners of the extent, CCW starting at the origin.
    pub fn world_corners(&self) -> [WorldPoint; 4] {
        let w = self.width as f32 * self.resolution;
        let h = self.height as f32 * self.resolution;
        [
            self.origin.transform_point(WorldPoint::ZERO),
            self.origin.transform_point(WorldPoint::new(w, 0.0)),
            self.origin.transform_point(WorldPoint::new(w, h)),
            self.origin.transform_point(WorldPoint::new(0.0, h)),
        ]
    }

    /// Axis-aligned world bounds of the extent (yaw-aware).
    pub fn world_bounds(&self) -> Bounds {
        let mut bounds = Bounds::empty();
        for corner in self.world_corners() {
            bounds.expand_to_include(corner);
        }
        bounds
    }

    /// Check approximate equality with another geometry.
    ///
    /// Used by the fixed-geometry merge entry points for best-effort
    /// mismatch detection.
    pub fn approx_eq(&self, other: &GridGeometry) -> bool {
        self.width == other.width
            && self.height == other.height
            && (self.resolution - other.resolution).abs() <= GEOMETRY_EPSILON
            && self
                .origin
                .approx_eq(other.origin, GEOMETRY_EPSILON, GEOMETRY_EPSILON)
    }
}
