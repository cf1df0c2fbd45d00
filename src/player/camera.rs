use bevy::prelude::*;

use crate::player::components::{PlayerLook, Velocity};

/// Update look angles from mouse motion and rotate the body yaw.
pub fn player_look_system(
    mouse_motion: Res<bevy::input::mouse::AccumulatedMouseMotion>,
    mut query: Query<(&mut Transform, &mut PlayerLook), With<Velocity>>,
) {
    for (mut transform, mut look) in &mut query {
        look.apply_mouse_look(mouse_motion.delta);
        transform.rotation = look.body_rotation();
    }
}
