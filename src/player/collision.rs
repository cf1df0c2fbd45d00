//! Capsule-versus-grid movement resolution.
//!
//! Each axis is resolved on its own (X, then Z, then Y) so a diagonal move
//! that is blocked on one axis still applies the other.

use bevy::prelude::*;

use crate::player::aabb::{CELL_EPSILON, PlayerBox};
use crate::player::buoyancy::{self, SwimState};
use crate::voxel::{Axis, BlockKind, VoxelGrid};
use crate::{GRAVITY, MAX_TICK_SECS, PLAYER_HALF_WIDTH, PLAYER_HEIGHT, TERMINAL_VELOCITY};

/// Height above the feet sampled for "body in liquid".
pub const BODY_SAMPLE_HEIGHT: f32 = 0.5;
/// Height above the feet sampled for "head in liquid".
pub const HEAD_SAMPLE_HEIGHT: f32 = 1.6;
/// Vertical speed kept when falling from air into liquid.
pub const WATER_ENTRY_DAMPING: f32 = 0.4;
/// Largest horizontal displacement applied per axis in one call.
pub const MAX_AXIS_STEP: f32 = 0.5;
/// Height climbed automatically when walking into a one-block ledge.
pub const STEP_HEIGHT: f32 = 1.0;
/// Extra depth probed below the feet so a resting body stays grounded.
const GROUND_PROBE: f32 = 1.0e-3;

/// Movement requested for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveRequest {
    /// Desired X displacement, already scaled by the tick duration.
    pub dx: f32,
    /// Desired Z displacement, already scaled by the tick duration.
    pub dz: f32,
    /// Tick duration in seconds.
    pub dt: f32,
    /// Swim-up input held.
    pub swim_up: bool,
    /// Swim-down input held.
    pub swim_down: bool,
}

/// Contact state produced by one [`CollisionResolver::resolve`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionResult {
    /// Feet rest on a solid block after this tick.
    pub on_ground: bool,
    /// Body sample is inside liquid after this tick.
    pub in_water: bool,
    /// Head sample is inside liquid after this tick.
    pub head_submerged: bool,
    /// Height fallen, reported only on the tick a fall ends.
    pub fall_distance: f32,
}

impl CollisionResult {
    /// Return `true` if this tick ended a fall of positive height.
    pub fn landed(&self) -> bool {
        self.fall_distance > 0.0
    }
}

/// Cross-tick movement caches for one entity.
///
/// Everything here must be cleared together when the entity is teleported;
/// see [`CollisionResolver::reset`].
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionResolver {
    /// Grounded at the end of the previous tick.
    was_on_ground: bool,
    /// Body in liquid at the end of the previous tick.
    was_in_water: bool,
    /// Feet height when the current unsupported episode began.
    fall_origin: Option<f32>,
    /// Ledge hop already fired for the current swim-up hold.
    hop_spent: bool,
}

impl CollisionResolver {
    /// Build a resolver with no movement history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget all movement history.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Grounded at the end of the previous tick.
    pub fn was_on_ground(&self) -> bool {
        self.was_on_ground
    }

    /// Body in liquid at the end of the previous tick.
    pub fn was_in_water(&self) -> bool {
        self.was_in_water
    }

    fn was_supported(&self) -> bool {
        self.was_on_ground || self.was_in_water
    }

    /// Move the capsule at `position` for one tick and update `velocity`.
    ///
    /// Horizontal velocity is rewritten from the requested displacement, or
    /// zeroed on a blocked axis; the vertical component is integrated by
    /// gravity or buoyancy.
    pub fn resolve<G: VoxelGrid + ?Sized>(
        &mut self,
        position: &mut Vec3,
        velocity: &mut Vec3,
        request: MoveRequest,
        grid: &G,
    ) -> CollisionResult {
        debug_assert!(
            position.is_finite() && velocity.is_finite(),
            "non-finite player state: {position:?} {velocity:?}"
        );
        let dt = request.dt.clamp(0.0, MAX_TICK_SECS);
        let dx = request.dx.clamp(-MAX_AXIS_STEP, MAX_AXIS_STEP);
        let dz = request.dz.clamp(-MAX_AXIS_STEP, MAX_AXIS_STEP);

        if !self.was_supported() && self.fall_origin.is_none() {
            self.fall_origin = Some(position.y);
        }
        let start_y = position.y;

        let wet = grid.is_liquid(sample_cell(*position, BODY_SAMPLE_HEIGHT));
        if wet && !self.was_in_water {
            velocity.y *= WATER_ENTRY_DAMPING;
        }

        let blocked_x = self.resolve_horizontal(Axis::X, dx, position, grid);
        let blocked_z = self.resolve_horizontal(Axis::Z, dz, position, grid);
        // Report the requested speed, not the clamped step.
        if request.dt > 0.0 {
            velocity.x = if blocked_x { 0.0 } else { request.dx / request.dt };
            velocity.z = if blocked_z { 0.0 } else { request.dz / request.dt };
        }

        if wet {
            let swim = SwimState {
                up: request.swim_up,
                down: request.swim_down,
                depth: buoyancy::water_surface_y(*position, grid) - position.y,
                ledge: buoyancy::ledge_at_feet(*position, grid),
            };
            buoyancy::integrate(velocity, swim, &mut self.hop_spent, dt);
        } else {
            self.hop_spent = false;
            velocity.y = (velocity.y - GRAVITY * dt).max(TERMINAL_VELOCITY);
        }
        let on_ground = resolve_vertical(position, velocity, dt, grid);

        let in_water = grid.is_liquid(sample_cell(*position, BODY_SAMPLE_HEIGHT));
        let head_submerged = grid.is_liquid(sample_cell(*position, HEAD_SAMPLE_HEIGHT));

        let mut fall_distance = 0.0;
        if on_ground || in_water {
            if let Some(origin) = self.fall_origin.take() {
                let landing_y = if on_ground {
                    position.y
                } else {
                    buoyancy::water_surface_y(*position, grid)
                };
                fall_distance = (origin - landing_y).max(0.0);
            }
        } else if self.was_supported() {
            self.fall_origin = Some(start_y);
        }

        self.was_on_ground = on_ground;
        self.was_in_water = in_water;

        CollisionResult {
            on_ground,
            in_water,
            head_submerged,
            fall_distance,
        }
    }

    /// Apply `delta` along one horizontal axis; return `true` when blocked.
    fn resolve_horizontal<G: VoxelGrid + ?Sized>(
        &self,
        axis: Axis,
        delta: f32,
        position: &mut Vec3,
        grid: &G,
    ) -> bool {
        if delta == 0.0 {
            return false;
        }
        let candidate = offset_along(*position, axis, delta);
        if !PlayerBox::at_feet(candidate).intersects_solid(grid) {
            *position = candidate;
            return false;
        }

        if self.was_on_ground {
            let mut raised = candidate;
            raised.y = (position.y + CELL_EPSILON).floor() + STEP_HEIGHT;
            if !PlayerBox::at_feet(raised).intersects_solid(grid) {
                trace!("step-up {:?} -> {}", axis, raised.y);
                *position = raised;
                return false;
            }
        }

        *position = push_back(*position, axis, delta, grid);
        true
    }
}

/// Return `position` moved by `delta` along a horizontal `axis`.
fn offset_along(position: Vec3, axis: Axis, delta: f32) -> Vec3 {
    match axis {
        Axis::X => position + Vec3::X * delta,
        Axis::Z => position + Vec3::Z * delta,
        Axis::Y => position + Vec3::Y * delta,
    }
}

/// Snap the box edge against the first obstructing cell column met while
/// sweeping `delta` along `axis`. Stays put when the obstruction is already
/// overlapped.
fn push_back<G: VoxelGrid + ?Sized>(position: Vec3, axis: Axis, delta: f32, grid: &G) -> Vec3 {
    let body = PlayerBox::at_feet(position);
    let blocked = |column: i32| match axis {
        Axis::X => body.x_column_blocked(column, grid),
        _ => body.z_row_blocked(column, grid),
    };
    let (lo, hi) = (axis.of(body.min), axis.of(body.max));

    let snapped = if delta > 0.0 {
        let first = (hi - CELL_EPSILON).floor() as i32 + 1;
        let last = (hi + delta - CELL_EPSILON).floor() as i32;
        (first..=last)
            .find(|column| blocked(*column))
            .map(|column| column as f32 - PLAYER_HALF_WIDTH)
    } else {
        let first = (lo + CELL_EPSILON).floor() as i32 - 1;
        let last = (lo + delta + CELL_EPSILON).floor() as i32;
        (last..=first)
            .rev()
            .find(|column| blocked(*column))
            .map(|column| column as f32 + 1.0 + PLAYER_HALF_WIDTH)
    };

    match (snapped, axis) {
        (Some(x), Axis::X) => Vec3::new(x, position.y, position.z),
        (Some(z), _) => Vec3::new(position.x, position.y, z),
        (None, _) => position,
    }
}

/// Integrate `velocity.y` over `dt`, snapping to floors and ceilings met on
/// the way. Returns whether the feet end on a solid block.
fn resolve_vertical<G: VoxelGrid + ?Sized>(
    position: &mut Vec3,
    velocity: &mut Vec3,
    dt: f32,
    grid: &G,
) -> bool {
    let dy = velocity.y * dt;
    let body = PlayerBox::at_feet(*position);

    if dy <= 0.0 {
        let top = (position.y + CELL_EPSILON).floor() as i32 - 1;
        let bottom = (position.y + dy - GROUND_PROBE).floor() as i32;
        if let Some(layer) = (bottom..=top).rev().find(|layer| body.layer_blocked(*layer, grid)) {
            position.y = (layer + 1) as f32;
            velocity.y = 0.0;
            return true;
        }
        position.y += dy;
        return false;
    }

    let head = position.y + PLAYER_HEIGHT;
    let first = (head - CELL_EPSILON).floor() as i32 + 1;
    let last = (head + dy - CELL_EPSILON).floor() as i32;
    if let Some(layer) = (first..=last).find(|layer| body.layer_blocked(*layer, grid)) {
        position.y = layer as f32 - PLAYER_HEIGHT;
        velocity.y = 0.0;
        return false;
    }
    position.y += dy;
    false
}

/// Cell containing the point `height` above the feet.
fn sample_cell(feet: Vec3, height: f32) -> IVec3 {
    BlockKind::cell_at(feet + Vec3::Y * height)
}
