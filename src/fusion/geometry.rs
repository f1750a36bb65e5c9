//! Shared output frame computation.
//!
//! Given a set of grids with arbitrary origins, extents, and resolutions,
//! compute the minimal geometry that covers every input at a target
//! resolution. The output frame keeps the first grid's heading, so the
//! result is a translated version of grid 1's origin.

use log::debug;

use crate::core::{Bounds, Pose2D};
use crate::error::{FusionError, Result};
use crate::grid::{GridGeometry, OccupancyGrid};

/// Slack subtracted before rounding an extent up to whole cells, so that
/// exact multiples of the resolution do not gain a spurious row/column.
const EXTENT_EPSILON: f32 = 1e-4;

/// Compute the minimal geometry covering every input grid.
///
/// The target `resolution` defaults to the first grid's when `None`. The
/// output origin keeps the first grid's yaw; the union bounding box is
/// computed in that rotated frame so no input extent is lost.
///
/// Fails with `InvalidInput` on an empty grid set or a non-positive
/// resolution.
pub fn combined_geometry(
    grids: &[&OccupancyGrid],
    resolution: Option<f32>,
) -> Result<GridGeometry> {
    let first = grids
        .first()
        .ok_or_else(|| FusionError::InvalidInput("no grids to combine".into()))?;

    let resolution = resolution.unwrap_or_else(|| first.resolution());
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(FusionError::InvalidInput(format!(
            "target resolution must be positive and finite, got {}",
            resolution
        )));
    }

    // Reference rotation: the first grid's heading about the world origin.
    let frame = Pose2D::new(0.0, 0.0, first.geometry().origin.theta);

    let mut bounds = Bounds::empty();
    for grid in grids {
        for corner in grid.geometry().world_corners() {
            bounds.expand_to_include(frame.inverse_transform_point(corner));
        }
    }

    let width = cells_for_extent(bounds.width(), resolution);
    let height = cells_for_extent(bounds.height(), resolution);
    let origin_pos = frame.transform_point(bounds.min);
    let geometry = GridGeometry::new(
        Pose2D::new(origin_pos.x, origin_pos.y, frame.theta),
        resolution,
        width,
        height,
    );

    debug!(
        "[Fusion] combined geometry: {}x{} at {} m/cell, origin ({:.3}, {:.3}, {:.3}) from {} grids",
        width, height, resolution, geometry.origin.x, geometry.origin.y, geometry.origin.theta,
        grids.len()
    );
    Ok(geometry)
}

/// Geometry covering a single grid's extent at a different resolution.
///
/// The origin pose is unchanged; only the cell size and counts differ.
pub fn aligned_geometry(grid: &OccupancyGrid, resolution: f32) -> Result<GridGeometry> {
    if !(resolution.is_finite() && resolution > 0.0) {
        return Err(FusionError::InvalidInput(format!(
            "target resolution must be positive and finite, got {}",
            resolution
        )));
    }
    let source = grid.geometry();
    let width = cells_for_extent(source.width as f32 * source.resolution, resolution);
    let height = cells_for_extent(source.height as f32 * source.resolution, resolution);
    Ok(GridGeometry::new(source.origin, resolution, width, height))
}

/// Round a metric extent up to a whole number of cells.
#[inline]
fn cells_for_extent(extent: f32, resolution: f32) -> usize {
    ((extent / resolution) - EXTENT_EPSILON).ceil().max(1.0) as usize
}
