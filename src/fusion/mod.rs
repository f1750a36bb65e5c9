//! The grid fusion engine.
//!
//! Reconciles a batch of georeferenced occupancy grids with different
//! origins, extents, and resolutions into one coherent output grid:
//!
//! - [`geometry`]: shared output frame computation
//! - [`align`]: nearest-cell resampling onto a target geometry
//! - [`combine`]: stack-reducing per-cell policies (max, min, zero)
//! - [`merge`]: in-place binary and floating-point pair merges
//! - [`information`]: six-gain information fusion between two grids
//! - [`smoothing`]: post-fusion box-filter averaging
//!
//! [`FusionPolicy`] ties the family together as a tagged union selected
//! explicitly by the caller.

pub mod align;
pub mod combine;
pub mod geometry;
pub mod information;
pub mod merge;
pub mod smoothing;

pub use align::{aligned_grid, resample};
pub use combine::{combine_into, generous_zero_combine, max_combine, min_combine, zero_combine};
pub use geometry::{aligned_geometry, combined_geometry};
pub use information::{information_combine_aligned, overlap_mask, InformationGains};
pub use merge::{binary_merge_into, floating_merge_into};
pub use smoothing::average_pass;

use log::debug;

use crate::error::{FusionError, Result};
use crate::grid::OccupancyGrid;

/// A fusion policy, selected explicitly by the caller.
///
/// The information policy is the only parameterized variant; all others
/// are pure functions of the grid data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FusionPolicy {
    /// Per-cell maximum; any known value beats unknown.
    Max,
    /// Per-cell minimum over known values.
    Min,
    /// Bias toward free space.
    Zero,
    /// Ternary collapse to free / occupied / unknown.
    Binary,
    /// Continuous blend through a floating intermediate.
    Floating,
    /// Six-gain pairwise information fusion (exactly two grids).
    Information(InformationGains),
}

impl FusionPolicy {
    /// Fuse a batch of grids under this policy.
    ///
    /// The output covers the union of all input extents at `resolution`
    /// (defaulting to the first grid's), anchored to a translated version
    /// of the first grid's origin. An empty batch fails with
    /// `InvalidInput`, as does an `Information` fusion over anything but
    /// exactly two grids.
    pub fn fuse(
        &self,
        grids: &[&OccupancyGrid],
        resolution: Option<f32>,
    ) -> Result<OccupancyGrid> {
        debug!("[Fusion] {:?} over {} grids", self, grids.len());
        match self {
            FusionPolicy::Max => combine::max_combine(grids, resolution),
            FusionPolicy::Min => combine::min_combine(grids, resolution),
            FusionPolicy::Zero => combine::zero_combine(grids, resolution),
            FusionPolicy::Binary => accumulate(grids, resolution, merge::binary_merge_into),
            FusionPolicy::Floating => accumulate(grids, resolution, merge::floating_merge_into),
            FusionPolicy::Information(gains) => {
                let &[primary, secondary] = grids else {
                    return Err(FusionError::InvalidInput(format!(
                        "information fusion takes exactly two grids, got {}",
                        grids.len()
                    )));
                };
                let geometry = geometry::combined_geometry(grids, resolution)?;
                let p = align::resample(primary, &geometry);
                let s = align::resample(secondary, &geometry);
                let p_mask = information::overlap_mask(&p, &s)?;
                let s_mask = information::overlap_mask(&s, &p)?;
                information::information_combine_aligned(&p, &p_mask, &s, &s_mask, gains)
            }
        }
    }
}

/// Align every grid onto the combined frame and merge sequentially into
/// an empty target/overlap pair, returning the target.
fn accumulate(
    grids: &[&OccupancyGrid],
    resolution: Option<f32>,
    merge: impl Fn(&mut OccupancyGrid, &mut OccupancyGrid, &OccupancyGrid) -> Result<()>,
) -> Result<OccupancyGrid> {
    let geometry = geometry::combined_geometry(grids, resolution)?;
    let mut target = OccupancyGrid::unknown(geometry)?;
    let mut overlap = OccupancyGrid::unknown(geometry)?;
    for grid in grids {
        let aligned = align::resample(grid, &geometry);
        merge(&mut target, &mut overlap, &aligned)?;
    }
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GridCoord, Pose2D};
    use crate::grid::{value, GridGeometry};

    fn uniform(origin: Pose2D, width: usize, height: usize, fill: i8) -> OccupancyGrid {
        OccupancyGrid::filled(GridGeometry::new(origin, 1.0, width, height), fill).unwrap()
    }

    #[test]
    fn test_policy_dispatch_max_min() {
        let a = uniform(Pose2D::identity(), 2, 2, 20);
        let b = uniform(Pose2D::identity(), 2, 2, 80);

        let max = FusionPolicy::Max.fuse(&[&a, &b], None).unwrap();
        assert!(max.cells().iter().all(|&v| v == 80));

        let min = FusionPolicy::Min.fuse(&[&a, &b], None).unwrap();
        assert!(min.cells().iter().all(|&v| v == 20));
    }

    #[test]
    fn test_binary_policy_over_offset_grids() {
        let a = uniform(Pose2D::identity(), 2, 2, 90);
        let b = uniform(Pose2D::new(2.0, 0.0, 0.0), 2, 2, 10);

        let out = FusionPolicy::Binary.fuse(&[&a, &b], Some(1.0)).unwrap();
        assert_eq!(out.width(), 4);
        assert_eq!(out.value(GridCoord::new(0, 0)), Some(value::OCCUPIED));
        assert_eq!(out.value(GridCoord::new(3, 1)), Some(value::FREE));
    }

    #[test]
    fn test_floating_policy_blends() {
        let a = uniform(Pose2D::identity(), 2, 2, 80);
        let b = uniform(Pose2D::identity(), 2, 2, 20);

        let out = FusionPolicy::Floating.fuse(&[&a, &b], None).unwrap();
        assert!(out.cells().iter().all(|&v| v == 50));
    }

    #[test]
    fn test_information_policy_arity() {
        let a = uniform(Pose2D::identity(), 2, 2, 50);
        let err = FusionPolicy::Information(InformationGains::default())
            .fuse(&[&a], None)
            .unwrap_err();
        assert!(matches!(err, FusionError::InvalidInput(_)));
    }

    #[test]
    fn test_information_policy_self_fusion() {
        let g = uniform(Pose2D::identity(), 3, 3, 70);
        let out = FusionPolicy::Information(InformationGains::default())
            .fuse(&[&g, &g], None)
            .unwrap();
        assert_eq!(out.cells(), g.cells());
    }
}
