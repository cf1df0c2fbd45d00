use bevy::prelude::*;

use crate::player::collision::{CollisionResolver, CollisionResult};
use crate::{EYE_HEIGHT, JUMP_SPEED};

/// First-person look state owned by the player entity.
#[derive(Component)]
pub struct PlayerLook {
    /// Mouse-look sensitivity factor.
    pub sensitivity: f32,
    /// Pitch angle in radians.
    pub pitch: f32,
    /// Yaw angle in radians.
    pub yaw: f32,
}

impl PlayerLook {
    /// Minimum pitch angle clamp for first-person look.
    const PITCH_MIN: f32 = -1.55;
    /// Maximum pitch angle clamp for first-person look.
    const PITCH_MAX: f32 = 1.55;

    /// Build look state with initial angles.
    pub fn new(sensitivity: f32, pitch: f32, yaw: f32) -> Self {
        Self {
            sensitivity,
            pitch,
            yaw,
        }
    }

    /// Apply mouse delta to yaw/pitch with sensitivity and clamp pitch.
    pub fn apply_mouse_look(&mut self, delta: Vec2) {
        self.yaw -= delta.x * self.sensitivity;
        self.pitch -= delta.y * self.sensitivity;
        self.pitch = self.pitch.clamp(Self::PITCH_MIN, Self::PITCH_MAX);
    }

    /// Build body rotation from yaw only.
    pub fn body_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, 0.0, 0.0)
    }

    /// Build view rotation from yaw and pitch.
    pub fn view_rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Unit view direction (-Z of the view rotation).
    pub fn view_direction(&self) -> Vec3 {
        self.view_rotation() * Vec3::NEG_Z
    }
}

/// Runtime state for player locomotion, refreshed from each resolve.
#[derive(Component)]
pub struct Player {
    /// Feet rested on a solid block after the last tick.
    pub on_ground: bool,
    /// Body sample was inside liquid after the last tick.
    pub in_water: bool,
    /// Head sample was inside liquid after the last tick.
    pub head_submerged: bool,
    /// Initial jump impulse speed.
    pub jump_speed: f32,
}

impl Player {
    /// Build default player state for initial spawn.
    pub fn new(jump_speed: f32) -> Self {
        Self {
            on_ground: false,
            in_water: false,
            head_submerged: false,
            jump_speed,
        }
    }

    /// Return world-space eye position from the feet position.
    pub fn eye_position(feet: Vec3) -> Vec3 {
        feet + Vec3::Y * EYE_HEIGHT
    }

    /// Start a jump when standing on dry ground.
    pub fn try_start_jump(&self, resolver: &CollisionResolver, velocity: &mut Vec3) -> bool {
        if !resolver.was_on_ground() || resolver.was_in_water() {
            return false;
        }
        velocity.y = self.jump_speed;
        true
    }

    /// Copy contact flags from a resolve result.
    pub fn apply_contact(&mut self, result: &CollisionResult) {
        self.on_ground = result.on_ground;
        self.in_water = result.in_water;
        self.head_submerged = result.head_submerged;
    }

    /// Move the feet to `feet`, stop all motion, and forget movement history.
    pub fn teleport(
        &mut self,
        transform: &mut Transform,
        velocity: &mut Velocity,
        resolver: &mut CollisionResolver,
        feet: Vec3,
    ) {
        transform.translation = feet;
        velocity.0 = Vec3::ZERO;
        resolver.reset();
        self.on_ground = false;
        self.in_water = false;
        self.head_submerged = false;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(JUMP_SPEED)
    }
}

/// Tunable movement controller parameters.
#[derive(Component)]
pub struct PlayerController {
    /// Base movement speed in blocks per second.
    pub speed: f32,
}

impl PlayerController {
    /// Speed multiplier used while sprint key is held.
    const SPRINT_MULTIPLIER: f32 = 1.5;
    /// Speed multiplier applied while the body is in liquid.
    const WATER_MULTIPLIER: f32 = 0.5;

    /// Build movement controller with base speed.
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    /// Compute current movement speed from medium and sprint state.
    pub fn move_speed(&self, in_water: bool, sprinting: bool) -> f32 {
        let mut speed = self.speed;
        if sprinting {
            speed *= Self::SPRINT_MULTIPLIER;
        }
        if in_water {
            speed *= Self::WATER_MULTIPLIER;
        }
        speed
    }

    /// Convert a local `(strafe, forward)` input axis into a world-space
    /// horizontal displacement for one tick, pre-scaled by `dt`.
    pub fn wish_displacement(
        &self,
        local: Vec2,
        yaw: f32,
        in_water: bool,
        sprinting: bool,
        dt: f32,
    ) -> Vec2 {
        if local == Vec2::ZERO {
            return Vec2::ZERO;
        }
        let rotation = Quat::from_rotation_y(yaw);
        let forward = rotation * Vec3::NEG_Z;
        let right = rotation * Vec3::X;
        let world = (forward * local.y + right * local.x).normalize_or_zero();
        Vec2::new(world.x, world.z) * self.move_speed(in_water, sprinting) * dt
    }
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(4.3)
    }
}

/// Movement requested by input for the coming physics tick.
#[derive(Component, Default)]
pub struct MovementIntent {
    /// Local input axis: x is strafe right, y is forward.
    pub local: Vec2,
    /// Sprint held.
    pub sprint: bool,
    /// Jump (or swim-up while wet) held.
    pub jump: bool,
    /// Swim-down held.
    pub descend: bool,
}

/// Linear velocity component for player movement integration.
#[derive(Component, Default)]
pub struct Velocity(
    /// Current velocity in blocks per second.
    pub Vec3,
);

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use bevy::prelude::{Vec2, Vec3};

    use super::*;

    /// Facing yaw 0 means walking forward moves toward -Z.
    #[test]
    fn forward_at_zero_yaw_is_negative_z() {
        let controller = PlayerController::new(4.0);
        let step = controller.wish_displacement(Vec2::Y, 0.0, false, false, 0.5);
        assert_relative_eq!(step.x, 0.0, epsilon = 1.0e-6);
        assert_relative_eq!(step.y, -2.0, epsilon = 1.0e-6);
    }

    /// Water halves and sprint raises the displacement.
    #[test]
    fn medium_and_sprint_scale_speed() {
        let controller = PlayerController::new(4.0);
        assert_relative_eq!(controller.move_speed(true, false), 2.0);
        assert_relative_eq!(controller.move_speed(false, true), 6.0);
    }

    /// Diagonal input is normalized, not faster.
    #[test]
    fn diagonal_input_is_normalized() {
        let controller = PlayerController::new(4.0);
        let step = controller.wish_displacement(Vec2::ONE, 0.3, false, false, 1.0);
        assert_relative_eq!(step.length(), 4.0, epsilon = 1.0e-5);
    }

    /// Looking straight ahead at yaw 0 faces -Z, and pitch is clamped.
    #[test]
    fn look_direction_and_pitch_clamp() {
        let mut look = PlayerLook::new(0.01, 0.0, 0.0);
        let dir = look.view_direction();
        assert_relative_eq!(dir.z, -1.0, epsilon = 1.0e-6);

        look.apply_mouse_look(Vec2::new(0.0, -1000.0));
        assert_relative_eq!(look.pitch, 1.55);
        assert!(look.view_direction().y > 0.99);
    }

    /// Teleport clears motion and history together.
    #[test]
    fn teleport_resets_motion() {
        let mut player = Player::default();
        player.on_ground = true;
        let mut transform = Transform::default();
        let mut velocity = Velocity(Vec3::new(1.0, -5.0, 0.0));
        let mut resolver = CollisionResolver::new();

        player.teleport(
            &mut transform,
            &mut velocity,
            &mut resolver,
            Vec3::new(3.0, 40.0, 3.0),
        );
        assert_eq!(transform.translation, Vec3::new(3.0, 40.0, 3.0));
        assert_eq!(velocity.0, Vec3::ZERO);
        assert_eq!(resolver, CollisionResolver::new());
        assert!(!player.on_ground);
    }
}
