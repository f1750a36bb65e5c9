//! The occupancy grid entity.

use serde::{Deserialize, Serialize};

use crate::core::GridCoord;
use crate::error::{FusionError, Result};

use super::geometry::GridGeometry;
use super::value;

/// Per-state cell tally, as reported by [`OccupancyGrid::count_cells`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellCounts {
    /// Known cells below the occupied threshold.
    pub free: usize,
    /// Known cells at or above the occupied threshold.
    pub occupied: usize,
    /// Unobserved cells.
    pub unknown: usize,
}

/// A georeferenced 2D occupancy grid.
///
/// Cells are stored row-major (index = row * width + col), each value in
/// `{-1} ∪ [0, 100]` per the [`value`] constants. Geometry is immutable
/// after construction; cell values mutate only through the documented
/// in-place merge entry points and [`set_value`](Self::set_value).
///
/// Fusion treats input grids as read-only and returns newly allocated
/// outputs, so independent calls on disjoint grids are safe to
/// parallelize by the caller.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OccupancyGrid {
    geometry: GridGeometry,
    cells: Vec<i8>,
}

impl OccupancyGrid {
    /// Create a grid from a geometry and a row-major cell array.
    ///
    /// Validates dimensions, resolution, array length, and cell range.
    pub fn new(geometry: GridGeometry, cells: Vec<i8>) -> Result<Self> {
        geometry.validate()?;
        if cells.len() != geometry.cell_count() {
            return Err(FusionError::InvalidInput(format!(
                "cell array length {} does not match {}x{} grid",
                cells.len(),
                geometry.width,
                geometry.height
            )));
        }
        if let Some(bad) = cells.iter().copied().find(|&v| !value::is_valid(v)) {
            return Err(FusionError::InvalidInput(format!(
                "cell value {} outside {{-1}} ∪ [0, 100]",
                bad
            )));
        }
        Ok(Self { geometry, cells })
    }

    /// Create a grid with every cell set to `fill`.
    pub fn filled(geometry: GridGeometry, fill: i8) -> Result<Self> {
        geometry.validate()?;
        if !value::is_valid(fill) {
            return Err(FusionError::InvalidInput(format!(
                "fill value {} outside {{-1}} ∪ [0, 100]",
                fill
            )));
        }
        let cells = vec![fill; geometry.cell_count()];
        Ok(Self { geometry, cells })
    }

    /// Create an all-unknown grid.
    pub fn unknown(geometry: GridGeometry) -> Result<Self> {
        Self::filled(geometry, value::UNKNOWN)
    }

    /// Assemble a grid from cells the engine has already range-checked.
    #[inline]
    pub(crate) fn from_engine(geometry: GridGeometry, cells: Vec<i8>) -> Self {
        debug_assert_eq!(cells.len(), geometry.cell_count());
        debug_assert!(cells.iter().all(|&v| value::is_valid(v)));
        Self { geometry, cells }
    }

    /// The grid's geometry.
    #[inline]
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.geometry.width
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.geometry.height
    }

    /// Meters per cell edge.
    #[inline]
    pub fn resolution(&self) -> f32 {
        self.geometry.resolution
    }

    /// The raw row-major cell array.
    #[inline]
    pub fn cells(&self) -> &[i8] {
        &self.cells
    }

    /// Mutable cell access for the in-place merge entry points.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [i8] {
        &mut self.cells
    }

    /// Value at a coordinate, or `None` outside the extent.
    #[inline]
    pub fn value(&self, coord: GridCoord) -> Option<i8> {
        if self.geometry.contains(coord) {
            Some(self.cells[self.geometry.index(coord.x as usize, coord.y as usize)])
        } else {
            None
        }
    }

    /// Value at (col, row), or `None` outside the extent.
    #[inline]
    pub fn value_at(&self, col: usize, row: usize) -> Option<i8> {
        if col < self.geometry.width && row < self.geometry.height {
            Some(self.cells[self.geometry.index(col, row)])
        } else {
            None
        }
    }

    /// Set the value of one cell.
    ///
    /// Fails on out-of-extent coordinates or out-of-range values; the
    /// grid's geometry never changes.
    pub fn set_value(&mut self, coord: GridCoord, v: i8) -> Result<()> {
        if !value::is_valid(v) {
            return Err(FusionError::InvalidInput(format!(
                "cell value {} outside {{-1}} ∪ [0, 100]",
                v
            )));
        }
        if !self.geometry.contains(coord) {
            return Err(FusionError::InvalidInput(format!(
                "cell ({}, {}) outside {}x{} grid",
                coord.x, coord.y, self.geometry.width, self.geometry.height
            )));
        }
        self.cells[self.geometry.index(coord.x as usize, coord.y as usize)] = v;
        Ok(())
    }

    /// Tally free / occupied / unknown cells.
    pub fn count_cells(&self) -> CellCounts {
        let mut counts = CellCounts::default();
        for &v in &self.cells {
            if v == value::UNKNOWN {
                counts.unknown += 1;
            } else if v >= value::OCCUPIED_THRESHOLD {
                counts.occupied += 1;
            } else {
                counts.free += 1;
            }
        }
        counts
    }

    /// Render the grid as ASCII art for debugging.
    ///
    /// Rows are printed top-down: '?' unknown, '.' free, '#' occupied.
    pub fn as_ascii(&self) -> String {
        let mut out = String::with_capacity((self.geometry.width + 1) * self.geometry.height);
        for row in (0..self.geometry.height).rev() {
            for col in 0..self.geometry.width {
                let v = self.cells[self.geometry.index(col, row)];
                out.push(if v == value::UNKNOWN {
                    '?'
                } else if v >= value::OCCUPIED_THRESHOLD {
                    '#'
                } else {
                    '.'
                });
            }
            out.push('\n');
        }
        out
    }
}
