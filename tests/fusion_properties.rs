//! End-to-end properties of the fusion engine.
//!
//! These exercise the public API the way a mapping stack would: build
//! grids, fuse them under each policy, and check the geometric and
//! per-cell guarantees.

use sangam_grid::core::{GridCoord, Pose2D};
use sangam_grid::fusion::{
    average_pass, combined_geometry, generous_zero_combine, max_combine, min_combine,
    zero_combine, FusionPolicy, InformationGains,
};
use sangam_grid::grid::{value, GridGeometry, OccupancyGrid};
use sangam_grid::FusionError;

fn grid(origin: Pose2D, resolution: f32, width: usize, height: usize, cells: Vec<i8>) -> OccupancyGrid {
    OccupancyGrid::new(GridGeometry::new(origin, resolution, width, height), cells).unwrap()
}

fn uniform(origin: Pose2D, width: usize, height: usize, fill: i8) -> OccupancyGrid {
    grid(origin, 1.0, width, height, vec![fill; width * height])
}

fn in_range(grid: &OccupancyGrid) -> bool {
    grid.cells()
        .iter()
        .all(|&v| v == value::UNKNOWN || (value::FREE..=value::OCCUPIED).contains(&v))
}

#[test]
fn single_grid_max_combine_is_idempotent() {
    let cells = vec![0, 10, 20, 30, 40, 50, 60, 70, value::UNKNOWN];
    let g = grid(Pose2D::new(2.0, -1.0, 0.0), 1.0, 3, 3, cells.clone());

    let out = max_combine(&[&g], None).unwrap();
    assert_eq!(out.geometry().width, 3);
    assert_eq!(out.geometry().height, 3);
    assert_eq!(out.cells(), &cells[..]);
}

#[test]
fn max_and_min_combine_commute_under_permutation() {
    let a = uniform(Pose2D::identity(), 3, 3, 10);
    let b = uniform(Pose2D::new(1.0, 1.0, 0.0), 3, 3, 60);
    let c = uniform(Pose2D::new(2.0, 0.0, 0.0), 2, 2, 90);

    let orders: [[&OccupancyGrid; 3]; 3] = [[&a, &b, &c], [&b, &c, &a], [&c, &a, &b]];

    // Fix the output frame to the first grid's so permutations compare
    // cell-for-cell.
    let reference_max = max_combine(&orders[0], Some(1.0)).unwrap();
    let reference_min = min_combine(&orders[0], Some(1.0)).unwrap();
    let frame = *reference_max.geometry();

    for order in &orders {
        let geometry = combined_geometry(order, Some(1.0)).unwrap();
        assert_eq!(geometry.cell_count(), frame.cell_count());

        let max = max_combine(order, Some(1.0)).unwrap();
        let min = min_combine(order, Some(1.0)).unwrap();
        for row in 0..frame.height {
            for col in 0..frame.width {
                let world = frame.cell_center_world(GridCoord::new(col as i32, row as i32));
                let coord = max.geometry().world_to_cell(world).unwrap();
                assert_eq!(max.value(coord), reference_max.value_at(col, row));
                assert_eq!(min.value(coord), reference_min.value_at(col, row));
            }
        }
    }
}

#[test]
fn every_policy_preserves_the_cell_range() {
    let a = grid(
        Pose2D::identity(),
        1.0,
        2,
        2,
        vec![0, 100, value::UNKNOWN, 55],
    );
    let b = grid(
        Pose2D::new(1.0, 0.0, 0.0),
        1.0,
        2,
        2,
        vec![100, value::UNKNOWN, 1, 99],
    );

    let policies = [
        FusionPolicy::Max,
        FusionPolicy::Min,
        FusionPolicy::Zero,
        FusionPolicy::Binary,
        FusionPolicy::Floating,
        FusionPolicy::Information(InformationGains::default()),
    ];
    for policy in policies {
        let out = policy.fuse(&[&a, &b], Some(1.0)).unwrap();
        assert!(in_range(&out), "{:?} broke the range invariant", policy);
    }
}

#[test]
fn disjoint_extents_union_with_unknown_gap() {
    let a = uniform(Pose2D::identity(), 2, 2, 30);
    let b = uniform(Pose2D::new(4.0, 0.0, 0.0), 2, 2, 70);

    let out = max_combine(&[&a, &b], Some(1.0)).unwrap();
    assert_eq!(out.width(), 6);
    assert_eq!(out.height(), 2);

    for row in 0..2 {
        // A's footprint, the uncovered gap, then B's footprint.
        assert_eq!(out.value_at(0, row), Some(30));
        assert_eq!(out.value_at(1, row), Some(30));
        assert_eq!(out.value_at(2, row), Some(value::UNKNOWN));
        assert_eq!(out.value_at(3, row), Some(value::UNKNOWN));
        assert_eq!(out.value_at(4, row), Some(70));
        assert_eq!(out.value_at(5, row), Some(70));
    }
}

#[test]
fn max_combine_of_free_and_occupied_offset_grids() {
    // Grid A all free at (0,0,0); grid B all occupied at (1,0,0). The
    // union extent is 4x3 and the overlapping columns take the maximum.
    let a = uniform(Pose2D::identity(), 3, 3, value::FREE);
    let b = uniform(Pose2D::new(1.0, 0.0, 0.0), 3, 3, value::OCCUPIED);

    let out = max_combine(&[&a, &b], Some(1.0)).unwrap();
    assert_eq!(out.width(), 4);
    assert_eq!(out.height(), 3);

    for row in 0..3 {
        assert_eq!(out.value_at(0, row), Some(value::FREE));
        assert_eq!(out.value_at(1, row), Some(value::OCCUPIED));
        assert_eq!(out.value_at(2, row), Some(value::OCCUPIED));
        assert_eq!(out.value_at(3, row), Some(value::OCCUPIED));
    }
}

#[test]
fn zero_combine_biases_toward_free() {
    let a = uniform(Pose2D::identity(), 2, 2, 85);
    let b = uniform(Pose2D::identity(), 2, 2, value::FREE);
    let c = uniform(Pose2D::new(1.0, 0.0, 0.0), 2, 2, value::UNKNOWN);

    let out = zero_combine(&[&a, &b, &c], Some(1.0)).unwrap();
    // Known free wins over occupied; unknown never displaces known.
    assert_eq!(out.value_at(0, 0), Some(value::FREE));
    assert_eq!(out.value_at(1, 1), Some(value::FREE));
    // Only c covers column 2.
    assert_eq!(out.value_at(2, 0), Some(value::UNKNOWN));
}

#[test]
fn generous_zero_combine_covers_both_extents() {
    let primary = uniform(Pose2D::identity(), 2, 2, value::UNKNOWN);
    let secondary = uniform(Pose2D::new(1.0, 0.0, 0.0), 2, 2, 40);

    let out = generous_zero_combine(&primary, &secondary).unwrap();
    assert_eq!(out.width(), 3);
    // Primary unknown everywhere, so its overlap falls back to secondary.
    assert_eq!(out.value_at(1, 0), Some(40));
    assert_eq!(out.value_at(2, 1), Some(40));
    assert_eq!(out.value_at(0, 0), Some(value::UNKNOWN));
}

#[test]
fn mixed_resolution_inputs_fuse_at_target_resolution() {
    let coarse = grid(Pose2D::identity(), 1.0, 2, 2, vec![20, 20, 20, 20]);
    let fine = grid(
        Pose2D::identity(),
        0.5,
        4,
        4,
        vec![80; 16],
    );

    let out = max_combine(&[&coarse, &fine], Some(0.5)).unwrap();
    assert_eq!(out.width(), 4);
    assert_eq!(out.height(), 4);
    assert!(out.cells().iter().all(|&v| v == 80));

    let coarse_out = max_combine(&[&coarse, &fine], Some(1.0)).unwrap();
    assert_eq!(coarse_out.width(), 2);
    assert!(coarse_out.cells().iter().all(|&v| v == 80));
}

#[test]
fn smoothing_kernel_one_is_identity() {
    let g = grid(
        Pose2D::new(1.0, 2.0, 0.4),
        0.25,
        3,
        3,
        vec![0, 10, 20, value::UNKNOWN, 40, 50, 60, 70, 100],
    );
    let out = average_pass(&g, 1).unwrap();
    assert_eq!(out, g);
}

#[test]
fn smoothing_kernel_three_spreads_single_cell() {
    let mut cells = vec![value::UNKNOWN; 25];
    cells[12] = 64; // center of a 5x5 grid
    let g = grid(Pose2D::identity(), 1.0, 5, 5, cells);

    let out = average_pass(&g, 3).unwrap();
    for row in 0..5i32 {
        for col in 0..5i32 {
            let expected = if (1..=3).contains(&col) && (1..=3).contains(&row) {
                // Each window in the 3x3 block around the center sees
                // exactly one known cell, so the average is its value.
                64
            } else {
                value::UNKNOWN
            };
            assert_eq!(out.value(GridCoord::new(col, row)), Some(expected));
        }
    }
}

#[test]
fn smoothing_rejects_bad_kernel_sizes() {
    let g = uniform(Pose2D::identity(), 2, 2, 0);
    for k in [0usize, 2, 6] {
        assert!(matches!(
            average_pass(&g, k),
            Err(FusionError::InvalidInput(_))
        ));
    }
}

#[test]
fn information_self_fusion_with_unit_gains_is_identity() {
    let g = grid(
        Pose2D::identity(),
        1.0,
        3,
        3,
        vec![0, 15, 30, 45, 60, 75, 100, value::UNKNOWN, 50],
    );

    let out = FusionPolicy::Information(InformationGains::default())
        .fuse(&[&g, &g], None)
        .unwrap();
    assert_eq!(out.cells(), g.cells());
}

#[test]
fn information_fusion_rejects_bad_gains() {
    let g = uniform(Pose2D::identity(), 2, 2, 50);
    let gains = InformationGains {
        enter_increase: -1.0,
        ..Default::default()
    };

    let err = FusionPolicy::Information(gains)
        .fuse(&[&g, &g], None)
        .unwrap_err();
    assert!(matches!(err, FusionError::InvalidInput(_)));
}

#[test]
fn empty_batch_fails_for_every_policy() {
    let policies = [
        FusionPolicy::Max,
        FusionPolicy::Min,
        FusionPolicy::Zero,
        FusionPolicy::Binary,
        FusionPolicy::Floating,
        FusionPolicy::Information(InformationGains::default()),
    ];
    for policy in policies {
        assert!(matches!(
            policy.fuse(&[], None),
            Err(FusionError::InvalidInput(_))
        ));
    }
}
