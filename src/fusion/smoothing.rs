//! Box-filter smoothing over a single grid.

use crate::error::{FusionError, Result};
use crate::grid::{value, OccupancyGrid};

/// Smooth a grid with a square averaging kernel.
///
/// Each output cell is the rounded mean of the known, in-bounds cells in
/// the `kernel_size x kernel_size` window centered on it (the cell itself
/// included). A cell with no known cell anywhere in its window stays
/// unknown. `kernel_size == 1` returns a bit-identical copy.
///
/// Fails with `InvalidInput` if `kernel_size` is zero or even. Cost is
/// O(kernel_size² x cell count).
pub fn average_pass(grid: &OccupancyGrid, kernel_size: usize) -> Result<OccupancyGrid> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(FusionError::InvalidInput(format!(
            "kernel size must be a positive odd integer, got {}",
            kernel_size
        )));
    }

    let geometry = grid.geometry();
    let half = (kernel_size / 2) as i32;
    let (width, height) = (geometry.width as i32, geometry.height as i32);

    let mut cells = vec![value::UNKNOWN; geometry.cell_count()];
    for row in 0..height {
        for col in 0..width {
            let mut sum: i32 = 0;
            let mut known: u32 = 0;
            for dy in -half..=half {
                let y = row + dy;
                if y < 0 || y >= height {
                    continue;
                }
                for dx in -half..=half {
                    let x = col + dx;
                    if x < 0 || x >= width {
                        continue;
                    }
                    let v = grid.cells()[geometry.index(x as usize, y as usize)];
                    if v != value::UNKNOWN {
                        sum += v as i32;
                        known += 1;
                    }
                }
            }
            if known > 0 {
                cells[geometry.index(col as usize, row as usize)] =
                    (sum as f32 / known as f32).round() as i8;
            }
        }
    }
    Ok(OccupancyGrid::from_engine(*geometry, cells))
}
