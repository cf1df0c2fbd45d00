use bevy::prelude::*;

use crate::voxel::BlockKind;

#[derive(Resource)]
/// Placement selection state for the current hotbar slot.
pub struct SelectedBlock {
    /// Block kind placed by the use button.
    pub current: BlockKind,
}

impl SelectedBlock {
    /// Hotbar keys in slot order.
    const SLOT_KEYS: [KeyCode; 7] = [
        KeyCode::Digit1,
        KeyCode::Digit2,
        KeyCode::Digit3,
        KeyCode::Digit4,
        KeyCode::Digit5,
        KeyCode::Digit6,
        KeyCode::Digit7,
    ];

    /// Construct selected-block state with an initial block choice.
    pub fn new(current: BlockKind) -> Self {
        Self { current }
    }

    /// Apply block-selection hotkeys; returns `true` when the selection changed.
    pub fn apply_hotkeys(&mut self, keys: &ButtonInput<KeyCode>) -> bool {
        let Some(kind) = Self::SLOT_KEYS
            .iter()
            .zip(BlockKind::HOTBAR)
            .find_map(|(key, kind)| keys.just_pressed(*key).then_some(kind))
        else {
            return false;
        };
        if kind == self.current {
            return false;
        }
        self.current = kind;
        true
    }
}

impl Default for SelectedBlock {
    fn default() -> Self {
        Self::new(BlockKind::HOTBAR[0])
    }
}
