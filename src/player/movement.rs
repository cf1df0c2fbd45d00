use bevy::prelude::*;

use crate::player::components::MovementIntent;

/// Key held to move forward.
const KEY_FORWARD: KeyCode = KeyCode::KeyW;
/// Key held to move backward.
const KEY_BACK: KeyCode = KeyCode::KeyS;
/// Key held to strafe left.
const KEY_LEFT: KeyCode = KeyCode::KeyA;
/// Key held to strafe right.
const KEY_RIGHT: KeyCode = KeyCode::KeyD;
/// Key held to jump or swim up.
const KEY_JUMP: KeyCode = KeyCode::Space;
/// Key held to swim down.
const KEY_DESCEND: KeyCode = KeyCode::ControlLeft;
/// Key held to sprint.
const KEY_SPRINT: KeyCode = KeyCode::ShiftLeft;

impl MovementIntent {
    /// Build movement intent from the current key state.
    pub fn from_keys(input: &ButtonInput<KeyCode>) -> Self {
        let mut local = Vec2::ZERO;
        if input.pressed(KEY_FORWARD) {
            local.y += 1.0;
        }
        if input.pressed(KEY_BACK) {
            local.y -= 1.0;
        }
        if input.pressed(KEY_RIGHT) {
            local.x += 1.0;
        }
        if input.pressed(KEY_LEFT) {
            local.x -= 1.0;
        }
        Self {
            local,
            sprint: input.pressed(KEY_SPRINT),
            jump: input.pressed(KEY_JUMP),
            descend: input.pressed(KEY_DESCEND),
        }
    }
}

/// Sample movement keys into each player's intent for this frame.
pub fn movement_input_system(
    input: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut MovementIntent>,
) {
    for mut intent in &mut query {
        *intent = MovementIntent::from_keys(&input);
    }
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::*;

    /// Opposing keys cancel and flags follow their keys.
    #[test]
    fn keys_map_to_intent() {
        let mut input = ButtonInput::<KeyCode>::default();
        input.press(KeyCode::KeyW);
        input.press(KeyCode::KeyS);
        input.press(KeyCode::KeyD);
        input.press(KeyCode::Space);

        let intent = MovementIntent::from_keys(&input);
        assert_eq!(intent.local, Vec2::new(1.0, 0.0));
        assert!(intent.jump);
        assert!(!intent.descend);
        assert!(!intent.sprint);
    }
}
