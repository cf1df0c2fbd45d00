use bevy::prelude::*;
use std::ops::RangeInclusive;

use crate::voxel::VoxelGrid;
use crate::{PLAYER_HALF_WIDTH, PLAYER_HEIGHT};

/// Inset applied to both ends of every cell-range test so a box edge lying
/// exactly on an integer boundary never claims the neighbouring cell.
pub const CELL_EPSILON: f32 = 1.0e-4;

/// Integer cells covered by the closed interval `lo..=hi` along one axis.
pub fn axis_cells(lo: f32, hi: f32) -> RangeInclusive<i32> {
    let first = (lo + CELL_EPSILON).floor() as i32;
    let last = (hi - CELL_EPSILON).floor() as i32;
    first..=last
}

/// World-space collider of the player capsule, anchored at the feet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl PlayerBox {
    /// Build the collider for a player whose feet are at `feet`.
    pub fn at_feet(feet: Vec3) -> Self {
        let half = Vec3::new(PLAYER_HALF_WIDTH, 0.0, PLAYER_HALF_WIDTH);
        Self {
            min: feet - half,
            max: feet + half + Vec3::Y * PLAYER_HEIGHT,
        }
    }

    /// Cells covered along X.
    pub fn x_cells(&self) -> RangeInclusive<i32> {
        axis_cells(self.min.x, self.max.x)
    }

    /// Cells covered along Y.
    pub fn y_cells(&self) -> RangeInclusive<i32> {
        axis_cells(self.min.y, self.max.y)
    }

    /// Cells covered along Z.
    pub fn z_cells(&self) -> RangeInclusive<i32> {
        axis_cells(self.min.z, self.max.z)
    }

    /// Return `true` if any cell under the box footprint at `layer` is solid.
    pub fn layer_blocked<G: VoxelGrid + ?Sized>(&self, layer: i32, grid: &G) -> bool {
        self.z_cells().any(|z| {
            self.x_cells()
                .any(|x| grid.is_solid(IVec3::new(x, layer, z)))
        })
    }

    /// Return `true` if any cell of the YZ slab at column `x` is solid.
    pub fn x_column_blocked<G: VoxelGrid + ?Sized>(&self, x: i32, grid: &G) -> bool {
        self.z_cells()
            .any(|z| self.y_cells().any(|y| grid.is_solid(IVec3::new(x, y, z))))
    }

    /// Return `true` if any cell of the XY slab at row `z` is solid.
    pub fn z_row_blocked<G: VoxelGrid + ?Sized>(&self, z: i32, grid: &G) -> bool {
        self.x_cells()
            .any(|x| self.y_cells().any(|y| grid.is_solid(IVec3::new(x, y, z))))
    }

    /// Check whether the box intersects any solid block.
    pub fn intersects_solid<G: VoxelGrid + ?Sized>(&self, grid: &G) -> bool {
        self.y_cells().any(|y| self.layer_blocked(y, grid))
    }

    /// Return whether the box strictly overlaps the unit cube at `cell`.
    pub fn overlaps_cell(&self, cell: IVec3) -> bool {
        let cell_min = cell.as_vec3();
        let cell_max = cell_min + Vec3::ONE;
        self.min.x < cell_max.x
            && self.max.x > cell_min.x
            && self.min.y < cell_max.y
            && self.max.y > cell_min.y
            && self.min.z < cell_max.z
            && self.max.z > cell_min.z
    }
}
