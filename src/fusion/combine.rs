//! Stack-reducing cell combination policies.
//!
//! Every policy here aligns its inputs onto the shared output frame
//! (first grid's yaw, caller-chosen resolution) and reduces the aligned
//! stack cell-by-cell. Grids that do not cover a cell contribute unknown,
//! so disjoint extents are normal and never an error; only an empty input
//! set fails.

use log::debug;

use crate::error::Result;
use crate::grid::{value, OccupancyGrid};

use super::align::resample;
use super::geometry::combined_geometry;

/// Map an out-of-range contributor value to unknown.
///
/// Anything above [`value::OCCUPIED`] is treated as unknown before the
/// max/min reduction; legal grid values pass through untouched.
#[inline]
pub fn map_overflow(v: i8) -> i8 {
    if v > value::OCCUPIED {
        value::UNKNOWN
    } else {
        v
    }
}

/// Per-cell max rule: overflow maps to unknown, then plain maximum.
///
/// Because unknown is -1, any known value beats unknown; the result is
/// unknown only when every contributor is unknown.
#[inline]
pub fn max_cell(acc: i8, v: i8) -> i8 {
    acc.max(map_overflow(v))
}

/// Per-cell min rule: overflow maps to unknown, minimum over known values.
///
/// Unknown contributors are excluded; the result is unknown only when
/// every contributor is unknown.
#[inline]
pub fn min_cell(acc: i8, v: i8) -> i8 {
    match (acc, map_overflow(v)) {
        (value::UNKNOWN, v) => v,
        (acc, value::UNKNOWN) => acc,
        (acc, v) => acc.min(v),
    }
}

/// Per-cell zero-bias rule: known beats unknown, ties resolve toward the
/// lower ("more free") value. Overflow clamps to occupied instead of
/// mapping to unknown.
#[inline]
pub fn zero_cell(acc: i8, v: i8) -> i8 {
    let v = v.min(value::OCCUPIED);
    match (acc, v) {
        (value::UNKNOWN, v) => v,
        (acc, value::UNKNOWN) => acc,
        (acc, v) => acc.min(v),
    }
}

/// Combine grids by taking the per-cell maximum.
///
/// The output covers the union of all input extents at `resolution`
/// (first grid's resolution when `None`), anchored to a translated
/// version of the first grid's origin.
pub fn max_combine(grids: &[&OccupancyGrid], resolution: Option<f32>) -> Result<OccupancyGrid> {
    reduce(grids, resolution, "max", max_cell)
}

/// Combine grids by taking the per-cell minimum over known values.
pub fn min_combine(grids: &[&OccupancyGrid], resolution: Option<f32>) -> Result<OccupancyGrid> {
    reduce(grids, resolution, "min", min_cell)
}

/// Combine grids with a bias toward free space.
pub fn zero_combine(grids: &[&OccupancyGrid], resolution: Option<f32>) -> Result<OccupancyGrid> {
    reduce(grids, resolution, "zero", zero_cell)
}

/// Two-grid combine that trusts the primary wherever it has data.
///
/// The output covers the union of both extents at the primary's
/// resolution; cells unknown in the primary fall back to the secondary.
pub fn generous_zero_combine(
    primary: &OccupancyGrid,
    secondary: &OccupancyGrid,
) -> Result<OccupancyGrid> {
    let geometry = combined_geometry(&[primary, secondary], None)?;
    let p = resample(primary, &geometry);
    let s = resample(secondary, &geometry);

    let cells = p
        .cells()
        .iter()
        .zip(s.cells())
        .map(|(&pv, &sv)| if pv == value::UNKNOWN { sv } else { pv })
        .collect();
    Ok(OccupancyGrid::from_engine(geometry, cells))
}

/// Merge one source grid into an existing target, in place.
///
/// The in-place accumulation variant of max-combine: the target's
/// geometry is fixed, the source is resampled onto it, and each target
/// cell takes the maximum of its current value and the source's. The
/// caller must not read or mutate the target concurrently.
pub fn combine_into(target: &mut OccupancyGrid, source: &OccupancyGrid) {
    let aligned = resample(source, target.geometry());
    for (t, &s) in target.cells_mut().iter_mut().zip(aligned.cells()) {
        *t = max_cell(*t, s);
    }
}

fn reduce(
    grids: &[&OccupancyGrid],
    resolution: Option<f32>,
    name: &str,
    rule: impl Fn(i8, i8) -> i8,
) -> Result<OccupancyGrid> {
    let geometry = combined_geometry(grids, resolution)?;
    debug!("[Fusion] {}-combine of {} grids", name, grids.len());

    let mut cells = vec![value::UNKNOWN; geometry.cell_count()];
    for grid in grids {
        let aligned = resample(grid, &geometry);
        for (acc, &v) in cells.iter_mut().zip(aligned.cells()) {
            *acc = rule(*acc, v);
        }
    }
    Ok(OccupancyGrid::from_engine(geometry, cells))
}
