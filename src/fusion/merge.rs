//! In-place binary and floating-point pair merges.
//!
//! Both entry points fold one source grid into a `(target, overlap)` pair
//! that shares the source's geometry, mutating the pair in place. They are
//! built for sequential accumulation: start from an all-unknown target and
//! overlap, then merge each aligned input in turn. The overlap grid ends
//! up holding the merged value at exactly the cells where more than one
//! contributor had data, which is what the information fusion policy
//! consumes as its overlap masks.

use crate::error::{FusionError, Result};
use crate::grid::{value, OccupancyGrid};

/// Merge a source grid into a target/overlap pair, collapsing to a
/// ternary output.
///
/// Per cell: occupied if any contributor reported a value at or above
/// [`value::OCCUPIED_THRESHOLD`], free if any contributor reported a known
/// value below it and none reported occupied, unknown otherwise.
///
/// All three grids must share one geometry; fails with `GeometryMismatch`
/// otherwise. The caller must not access the pair concurrently.
pub fn binary_merge_into(
    target: &mut OccupancyGrid,
    overlap: &mut OccupancyGrid,
    source: &OccupancyGrid,
) -> Result<()> {
    check_same_geometry(target, overlap, source)?;

    for idx in 0..source.cells().len() {
        let s = source.cells()[idx];
        if s == value::UNKNOWN {
            continue;
        }
        let t = target.cells()[idx];
        let occupied =
            s >= value::OCCUPIED_THRESHOLD || (t != value::UNKNOWN && t >= value::OCCUPIED_THRESHOLD);
        let merged = if occupied { value::OCCUPIED } else { value::FREE };

        if t != value::UNKNOWN {
            overlap.cells_mut()[idx] = merged;
        }
        target.cells_mut()[idx] = merged;
    }
    Ok(())
}

/// Merge a source grid into a target/overlap pair through a floating
/// intermediate.
///
/// Where both the pre-merge target and the source are known, the cell
/// becomes the floating-point mean of the two, rounded back into
/// `[0, 100]`; where only the source is known, its value is adopted.
/// Unlike [`binary_merge_into`] this preserves gradation across repeated
/// merges instead of collapsing to 0/100.
pub fn floating_merge_into(
    target: &mut OccupancyGrid,
    overlap: &mut OccupancyGrid,
    source: &OccupancyGrid,
) -> Result<()> {
    check_same_geometry(target, overlap, source)?;

    for idx in 0..source.cells().len() {
        let s = source.cells()[idx];
        if s == value::UNKNOWN {
            continue;
        }
        let t = target.cells()[idx];
        if t == value::UNKNOWN {
            target.cells_mut()[idx] = s;
        } else {
            let blended = ((t as f32 + s as f32) * 0.5).round() as i8;
            let blended = blended.clamp(value::FREE, value::OCCUPIED);
            target.cells_mut()[idx] = blended;
            overlap.cells_mut()[idx] = blended;
        }
    }
    Ok(())
}

fn check_same_geometry(
    target: &OccupancyGrid,
    overlap: &OccupancyGrid,
    source: &OccupancyGrid,
) -> Result<()> {
    if !target.geometry().approx_eq(overlap.geometry())
        || !target.geometry().approx_eq(source.geometry())
    {
        return Err(FusionError::GeometryMismatch(
            "merge requires target, overlap, and source to share one geometry".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Pose2D;
    use crate::grid::GridGeometry;

    fn geom(width: usize, height: usize) -> GridGeometry {
        GridGeometry::new(Pose2D::identity(), 1.0, width, height)
    }

    fn grid(width: usize, height: usize, cells: Vec<i8>) -> OccupancyGrid {
        OccupancyGrid::new(geom(width, height), cells).unwrap()
    }

    #[test]
    fn test_geometry_mismatch() {
        let mut target = OccupancyGrid::unknown(geom(2, 2)).unwrap();
        let mut overlap = OccupancyGrid::unknown(geom(2, 2)).unwrap();
        let source = OccupancyGrid::unknown(geom(3, 2)).unwrap();

        let err = binary_merge_into(&mut target, &mut overlap, &source).unwrap_err();
        assert!(matches!(err, FusionError::GeometryMismatch(_)));
        assert!(floating_merge_into(&mut target, &mut overlap, &source).is_err());
    }

    #[test]
    fn test_binary_merge_ternary_collapse() {
        let mut target = OccupancyGrid::unknown(geom(4, 1)).unwrap();
        let mut overlap = OccupancyGrid::unknown(geom(4, 1)).unwrap();

        // First contributor: free, occupied-ish, free, unknown.
        let a = grid(4, 1, vec![10, 60, 0, value::UNKNOWN]);
        binary_merge_into(&mut target, &mut overlap, &a).unwrap();
        assert_eq!(target.cells(), &[0, 100, 0, value::UNKNOWN]);
        // Nothing overlapped yet.
        assert!(overlap.cells().iter().all(|&v| v == value::UNKNOWN));

        // Second contributor: occupied over the first's free cell.
        let b = grid(4, 1, vec![90, value::UNKNOWN, 20, 0]);
        binary_merge_into(&mut target, &mut overlap, &b).unwrap();
        // Occupied wins over free; free stays free; unknown adopts.
        assert_eq!(target.cells(), &[100, 100, 0, 0]);
        // Overlap recorded only where both contributors had data.
        assert_eq!(overlap.cells(), &[100, value::UNKNOWN, 0, value::UNKNOWN]);
    }

    #[test]
    fn test_floating_merge_preserves_gradation() {
        let mut target = OccupancyGrid::unknown(geom(3, 1)).unwrap();
        let mut overlap = OccupancyGrid::unknown(geom(3, 1)).unwrap();

        let a = grid(3, 1, vec![80, 40, value::UNKNOWN]);
        floating_merge_into(&mut target, &mut overlap, &a).unwrap();
        assert_eq!(target.cells(), &[80, 40, value::UNKNOWN]);

        let b = grid(3, 1, vec![20, value::UNKNOWN, 66]);
        floating_merge_into(&mut target, &mut overlap, &b).unwrap();
        // Blended mean where both were known, adopted where only b was.
        assert_eq!(target.cells(), &[50, 40, 66]);
        assert_eq!(overlap.cells(), &[50, value::UNKNOWN, value::UNKNOWN]);
    }

    #[test]
    fn test_merged_values_stay_in_range() {
        let mut target = OccupancyGrid::unknown(geom(2, 1)).unwrap();
        let mut overlap = OccupancyGrid::unknown(geom(2, 1)).unwrap();

        for cells in [vec![100i8, 0], vec![100, 100], vec![0, 0]] {
            let g = grid(2, 1, cells);
            floating_merge_into(&mut target, &mut overlap, &g).unwrap();
            assert!(target
                .cells()
                .iter()
                .all(|&v| v == value::UNKNOWN || (0..=100).contains(&v)));
        }
    }
}
