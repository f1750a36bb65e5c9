//! Six-gain information fusion between a primary and a secondary grid.
//!
//! The update is an ad hoc Bayesian-style rule over pairs of aligned
//! grids. Each cell falls into one of three spatial regions, and each
//! region carries an independent increase/decrease gain pair. A gain is a
//! divisor applied to the magnitude of the update, so a larger gain means
//! a smaller step and a more conservative fusion.
//!
//! Region semantics (see also DESIGN.md):
//! - **enter**: the secondary observes a cell the primary never covered;
//!   the fused value starts from the uninformative midpoint and steps
//!   toward the observation.
//! - **overlap**: both grids observe the cell; the fused value steps from
//!   the primary toward the secondary.
//! - **leave**: the primary had data where the secondary no longer looks;
//!   the fused value decays from the primary toward the midpoint.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{FusionError, Result};
use crate::grid::{value, OccupancyGrid};

/// Midpoint of the occupancy range, used as the uninformative prior for
/// the enter and leave regions.
const MIDPOINT: f32 = 50.0;

/// Gain divisors for the three fusion regions.
///
/// Each gain divides the magnitude of the per-cell update, split by
/// direction: the `*_increase` gain applies when the fused value must
/// rise, the `*_decrease` gain when it must fall. All gains must be
/// positive and finite. `Default` is 1.0 everywhere (full trust).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InformationGains {
    /// Divisor for upward updates on newly entered cells.
    pub enter_increase: f32,
    /// Divisor for downward updates on newly entered cells.
    pub enter_decrease: f32,
    /// Divisor for upward updates where both grids observe.
    pub overlap_increase: f32,
    /// Divisor for downward updates where both grids observe.
    pub overlap_decrease: f32,
    /// Divisor for upward decay on cells the secondary left.
    pub leave_increase: f32,
    /// Divisor for downward decay on cells the secondary left.
    pub leave_decrease: f32,
}

impl Default for InformationGains {
    fn default() -> Self {
        Self {
            enter_increase: 1.0,
            enter_decrease: 1.0,
            overlap_increase: 1.0,
            overlap_decrease: 1.0,
            leave_increase: 1.0,
            leave_decrease: 1.0,
        }
    }
}

impl InformationGains {
    /// Check that every gain is a positive, finite divisor.
    pub fn validate(&self) -> Result<()> {
        let gains = [
            ("enter_increase", self.enter_increase),
            ("enter_decrease", self.enter_decrease),
            ("overlap_increase", self.overlap_increase),
            ("overlap_decrease", self.overlap_decrease),
            ("leave_increase", self.leave_increase),
            ("leave_decrease", self.leave_decrease),
        ];
        for (name, gain) in gains {
            if !(gain.is_finite() && gain > 0.0) {
                return Err(FusionError::InvalidInput(format!(
                    "gain {} must be positive and finite, got {}",
                    name, gain
                )));
            }
        }
        Ok(())
    }

    /// Select the gain for a region given the signed update delta.
    #[inline]
    fn select(&self, region: Region, delta: f32) -> f32 {
        match (region, delta > 0.0) {
            (Region::Enter, true) => self.enter_increase,
            (Region::Enter, false) => self.enter_decrease,
            (Region::Overlap, true) => self.overlap_increase,
            (Region::Overlap, false) => self.overlap_decrease,
            (Region::Leave, true) => self.leave_increase,
            (Region::Leave, false) => self.leave_decrease,
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Region {
    Enter,
    Overlap,
    Leave,
}

/// Build the overlap sub-grid of `a` with respect to `b`.
///
/// Both grids must share one geometry. The mask holds `a`'s value where
/// both grids are known and unknown elsewhere; it is what
/// [`information_combine_aligned`] consumes as an overlap mask.
pub fn overlap_mask(a: &OccupancyGrid, b: &OccupancyGrid) -> Result<OccupancyGrid> {
    if !a.geometry().approx_eq(b.geometry()) {
        return Err(FusionError::GeometryMismatch(
            "overlap mask requires both grids to share one geometry".into(),
        ));
    }
    let cells = a
        .cells()
        .iter()
        .zip(b.cells())
        .map(|(&av, &bv)| {
            if av != value::UNKNOWN && bv != value::UNKNOWN {
                av
            } else {
                value::UNKNOWN
            }
        })
        .collect();
    Ok(OccupancyGrid::from_engine(*a.geometry(), cells))
}

/// Fuse an aligned primary/secondary grid pair under six-gain weighting.
///
/// All four grids must share one geometry (fails with `GeometryMismatch`
/// otherwise); the overlap masks are normally produced by
/// [`overlap_mask`]. The fused value is re-clamped into `[0, 100]` after
/// every update; cells unknown in both grids stay unknown.
///
/// With every gain at 1 and `primary == secondary`, the output reproduces
/// the primary (no net enter/leave/overlap delta).
pub fn information_combine_aligned(
    primary: &OccupancyGrid,
    primary_overlap: &OccupancyGrid,
    secondary: &OccupancyGrid,
    secondary_overlap: &OccupancyGrid,
    gains: &InformationGains,
) -> Result<OccupancyGrid> {
    gains.validate()?;
    let geometry = primary.geometry();
    for other in [primary_overlap, secondary, secondary_overlap] {
        if !geometry.approx_eq(other.geometry()) {
            return Err(FusionError::GeometryMismatch(
                "information fusion requires all four grids to share one geometry".into(),
            ));
        }
    }
    debug!(
        "[Fusion] information fusion over {}x{} cells",
        geometry.width, geometry.height
    );

    let mut cells = vec![value::UNKNOWN; geometry.cell_count()];
    for idx in 0..cells.len() {
        let p = primary.cells()[idx];
        let s = secondary.cells()[idx];
        let po = primary_overlap.cells()[idx];
        let so = secondary_overlap.cells()[idx];

        cells[idx] = match (p != value::UNKNOWN, s != value::UNKNOWN) {
            (false, false) => value::UNKNOWN,
            // Newly observed: step from the midpoint toward the observation.
            (false, true) => step(MIDPOINT, s as f32, Region::Enter, gains),
            // Left behind: decay from the primary toward the midpoint.
            (true, false) => step(p as f32, MIDPOINT, Region::Leave, gains),
            // Both observe: prefer the overlap-mask values when present.
            (true, true) => {
                let (from, to) = if po != value::UNKNOWN && so != value::UNKNOWN {
                    (po as f32, so as f32)
                } else {
                    (p as f32, s as f32)
                };
                step(from, to, Region::Overlap, gains)
            }
        };
    }
    Ok(OccupancyGrid::from_engine(*geometry, cells))
}

/// Move `from` toward `to` by `delta / gain`, clamped to the cell range.
#[inline]
fn step(from: f32, to: f32, region: Region, gains: &InformationGains) -> i8 {
    let delta = to - from;
    let fused = from + delta / gains.select(region, delta);
    (fused.round() as i8).clamp(value::FREE, value::OCCUPIED)
}
