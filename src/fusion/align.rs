//! Grid resampling onto a target geometry.
//!
//! Pure, stateless nearest-cell sampling: each target cell takes the value
//! of the source cell whose footprint contains the target cell's center.
//! Target centers are transformed into the source grid's local frame via
//! the inverse of the source origin pose, so non-zero yaw is handled.

use crate::core::GridCoord;
use crate::error::Result;
use crate::grid::{value, GridGeometry, OccupancyGrid};

use super::geometry::aligned_geometry;

/// Resample a source grid onto a target geometry.
///
/// Target cells whose centers fall outside the source extent become
/// unknown. This is a pure function of (source, target geometry).
pub fn resample(source: &OccupancyGrid, target: &GridGeometry) -> OccupancyGrid {
    let src = source.geometry();
    let mut cells = vec![value::UNKNOWN; target.cell_count()];

    for row in 0..target.height {
        for col in 0..target.width {
            let center = target.cell_center_world(GridCoord::new(col as i32, row as i32));
            let local = src.origin.inverse_transform_point(center);
            let sx = (local.x / src.resolution).floor();
            let sy = (local.y / src.resolution).floor();
            if sx >= 0.0 && sy >= 0.0 {
                let (sx, sy) = (sx as usize, sy as usize);
                if sx < src.width && sy < src.height {
                    cells[target.index(col, row)] = source.cells()[src.index(sx, sy)];
                }
            }
        }
    }

    OccupancyGrid::from_engine(*target, cells)
}

/// Resample a grid onto its own extent at a different resolution.
///
/// The aligned grid covers the same world area with the same origin pose;
/// only the cell size changes.
pub fn aligned_grid(source: &OccupancyGrid, resolution: f32) -> Result<OccupancyGrid> {
    let target = aligned_geometry(source, resolution)?;
    Ok(resample(source, &target))
}
