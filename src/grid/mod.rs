//! The occupancy grid data model.
//!
//! [`OccupancyGrid`] is the sole entity exchanged with callers: a
//! georeferenced, row-major array of per-cell occupancy estimates.
//! [`GridGeometry`] carries the geometric half of a grid (origin,
//! resolution, extent) and is what the fusion engine computes when it
//! derives a shared output frame.

mod geometry;
mod occupancy;

pub use geometry::GridGeometry;
pub use occupancy::{CellCounts, OccupancyGrid};

/// Cell value constants.
///
/// Cell values live in `{-1} ∪ [0, 100]`: `-1` is unknown, `0` fully
/// free, `100` fully occupied, intermediate values are probability-like
/// occupancy estimates.
pub mod value {
    /// Cell has never been observed.
    pub const UNKNOWN: i8 = -1;
    /// Cell is known free.
    pub const FREE: i8 = 0;
    /// Cell is fully occupied.
    pub const OCCUPIED: i8 = 100;
    /// Values at or above this count as occupied for the ternary policies.
    pub const OCCUPIED_THRESHOLD: i8 = 50;

    /// Is this a legal cell value?
    #[inline]
    pub fn is_valid(v: i8) -> bool {
        v == UNKNOWN || (FREE..=OCCUPIED).contains(&v)
    }

    /// Is this a known (observed) value?
    #[inline]
    pub fn is_known(v: i8) -> bool {
        v != UNKNOWN
    }
}
