//! Vertical physics while the body sample sits inside liquid.

use bevy::prelude::*;

use crate::voxel::{BlockKind, Face, VoxelGrid};

/// Cells scanned above the feet when looking for the water surface.
pub const SURFACE_SCAN_LIMIT: i32 = 8;
/// Downward acceleration while floating.
pub const WATER_GRAVITY: f32 = 6.0;
/// Fastest sinking speed while floating.
pub const WATER_TERMINAL_VELOCITY: f32 = -2.0;
/// Sustained rise speed while swim-up is held.
pub const SWIM_UP_SPEED: f32 = 3.0;
/// Sustained dive speed while swim-down is held.
pub const SWIM_DOWN_SPEED: f32 = 3.0;
/// Depth below the surface within which a ledge hop is allowed.
pub const HOP_OUT_DEPTH: f32 = 1.0;
/// Vertical launch speed of a ledge hop.
pub const HOP_OUT_SPEED: f32 = 7.5;
/// Depth over which the surface bobbing force fades out.
pub const BOB_DEPTH: f32 = 3.0;
/// Upward acceleration of the bobbing force right at the surface.
pub const BOB_STRENGTH: f32 = 14.0;
/// Depth at which the body sample leaves the water and lift vanishes.
pub const LIFT_START_DEPTH: f32 = 0.5;
/// Depth range below [`LIFT_START_DEPTH`] over which lift ramps to full.
pub const LIFT_RAMP: f32 = 0.75;
/// Per-second damping of vertical speed right at the surface.
pub const SURFACE_DAMPING: f32 = 4.0;

/// Return the height of the first non-liquid cell floor above the feet.
///
/// Non-liquid cells below the first liquid cell are skipped, so a feet cell
/// that is still dry while the body is wet does not report a surface below.
pub fn water_surface_y<G: VoxelGrid + ?Sized>(feet: Vec3, grid: &G) -> f32 {
    let start = BlockKind::cell_at(feet);
    let mut seen_liquid = false;
    for step in 0..SURFACE_SCAN_LIMIT {
        let cell = start + IVec3::Y * step;
        if grid.is_liquid(cell) {
            seen_liquid = true;
        } else if seen_liquid {
            return cell.y as f32;
        }
    }
    (start.y + SURFACE_SCAN_LIMIT) as f32
}

/// Return `true` when a solid block flanks the feet cell on any side.
pub fn ledge_at_feet<G: VoxelGrid + ?Sized>(feet: Vec3, grid: &G) -> bool {
    grid.any_solid_neighbor(BlockKind::cell_at(feet), &Face::SIDES)
}

/// Swim controls and surroundings sampled for one buoyancy step.
#[derive(Clone, Copy, Debug)]
pub struct SwimState {
    /// Swim-up input held.
    pub up: bool,
    /// Swim-down input held.
    pub down: bool,
    /// Distance from the feet up to the water surface.
    pub depth: f32,
    /// Whether a ledge flanks the feet.
    pub ledge: bool,
}

/// Integrate vertical velocity for one tick in the buoyancy regime.
///
/// `hop_spent` latches the ledge hop so holding swim-up fires it once.
pub fn integrate(velocity: &mut Vec3, swim: SwimState, hop_spent: &mut bool, dt: f32) {
    if swim.up {
        if swim.depth < HOP_OUT_DEPTH && swim.ledge && !*hop_spent {
            velocity.y = HOP_OUT_SPEED;
            *hop_spent = true;
            return;
        }
        // Keep riding an earlier hop instead of clamping it down to swim speed.
        if !(*hop_spent && velocity.y > SWIM_UP_SPEED) {
            velocity.y = SWIM_UP_SPEED;
        }
        return;
    }
    *hop_spent = false;

    if swim.down {
        velocity.y = -SWIM_DOWN_SPEED;
        return;
    }

    velocity.y = (velocity.y - WATER_GRAVITY * dt).max(WATER_TERMINAL_VELOCITY);
    if swim.depth < BOB_DEPTH {
        let closeness = 1.0 - swim.depth.max(0.0) / BOB_DEPTH;
        velocity.y += bob_lift(swim.depth) * dt;
        velocity.y *= (1.0 - SURFACE_DAMPING * closeness * dt).max(0.0);
    }
}

/// Upward acceleration of an idle body at `depth` below the surface.
///
/// Grows toward the surface but fades out as the body rises clear of the
/// water, which holds an idle swimmer at the depth where it matches
/// [`WATER_GRAVITY`].
pub fn bob_lift(depth: f32) -> f32 {
    if depth >= BOB_DEPTH {
        return 0.0;
    }
    let closeness = 1.0 - depth.max(0.0) / BOB_DEPTH;
    let immersion = ((depth - LIFT_START_DEPTH) / LIFT_RAMP).clamp(0.0, 1.0);
    BOB_STRENGTH * closeness * immersion
}
