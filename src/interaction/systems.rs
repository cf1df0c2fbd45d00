use bevy::prelude::*;

use crate::interaction::breaking::{BreakOutcome, BreakTracker};
use crate::interaction::placement::{Placement, place};
use crate::interaction::selection::SelectedBlock;
use crate::interaction::targeting::{TargetState, cast_target};
use crate::messages::{
    BlockBroken, BlockInteracted, BlockPlaced, BreakDenied, BreakProgressed, PlacementRejected,
};
use crate::player::{Player, PlayerLook};
use crate::voxel::WorldGrid;

/// Attack button.
const BREAK_BUTTON: MouseButton = MouseButton::Left;
/// Use button.
const PLACE_BUTTON: MouseButton = MouseButton::Right;

/// Recompute the crosshair target from the player's eye.
pub fn targeting_system(
    world: Res<WorldGrid>,
    player_query: Query<(&Transform, &PlayerLook), With<Player>>,
    mut target: ResMut<TargetState>,
) {
    let next = player_query.single().ok().and_then(|(transform, look)| {
        cast_target(
            Player::eye_position(transform.translation),
            look.view_direction(),
            world.as_ref(),
        )
    });
    if target.update(next) {
        match next {
            Some(hit) => debug!(
                "target {} {:?} face {:?} self {}",
                hit.cell, hit.kind, hit.face, hit.self_target
            ),
            None => debug!("target cleared"),
        }
    }
}

/// Apply block-selection hotkeys.
pub fn selection_system(keys: Res<ButtonInput<KeyCode>>, mut selected: ResMut<SelectedBlock>) {
    if selected.apply_hotkeys(&keys) {
        info!("selected {:?}", selected.current);
    }
}

/// Feed attack input into the break tracker and publish its outcome.
#[allow(clippy::too_many_arguments)]
pub fn break_system(
    time: Res<Time>,
    buttons: Res<ButtonInput<MouseButton>>,
    target: Res<TargetState>,
    mut world: ResMut<WorldGrid>,
    mut tracker: ResMut<BreakTracker>,
    mut progressed: MessageWriter<BreakProgressed>,
    mut broken: MessageWriter<BlockBroken>,
    mut denied: MessageWriter<BreakDenied>,
    mut last_denied: Local<Option<IVec3>>,
) {
    let outcome = tracker.update(
        target.current.as_ref(),
        buttons.pressed(BREAK_BUTTON),
        time.delta_secs(),
        world.as_mut(),
    );

    if !matches!(outcome, BreakOutcome::Unbreakable { .. }) {
        *last_denied = None;
    }
    match outcome {
        BreakOutcome::Idle | BreakOutcome::Waiting => {}
        BreakOutcome::Hit {
            cell,
            hits_delivered,
            hits_required,
        } => {
            trace!("hit {cell} {hits_delivered}/{hits_required}");
            progressed.write(BreakProgressed {
                cell,
                hits_delivered,
                hits_required,
            });
        }
        BreakOutcome::Unbreakable { cell, kind } => {
            // One signal per hold on the same block.
            if *last_denied != Some(cell) {
                *last_denied = Some(cell);
                debug!("{kind:?} at {cell} cannot be broken");
                denied.write(BreakDenied { cell, kind });
            }
        }
        BreakOutcome::Broken {
            cell,
            kind,
            replaced_with,
        } => {
            debug!("broke {kind:?} at {cell}, left {replaced_with:?}");
            broken.write(BlockBroken {
                cell,
                kind,
                replaced_with,
            });
        }
    }
}

/// Handle one use press against the current target.
#[allow(clippy::too_many_arguments)]
pub fn place_system(
    buttons: Res<ButtonInput<MouseButton>>,
    target: Res<TargetState>,
    selected: Res<SelectedBlock>,
    mut world: ResMut<WorldGrid>,
    player_query: Query<&Transform, With<Player>>,
    mut placed: MessageWriter<BlockPlaced>,
    mut interacted: MessageWriter<BlockInteracted>,
    mut rejected: MessageWriter<PlacementRejected>,
) {
    if !buttons.just_pressed(PLACE_BUTTON) {
        return;
    }
    let Some(hit) = target.current else {
        return;
    };
    // A break earlier this tick may have rewritten the targeted cell.
    if !hit.is_current(world.as_ref()) {
        debug!("target {} changed this tick, use ignored", hit.cell);
        return;
    }
    let Ok(transform) = player_query.single() else {
        return;
    };

    match place(&hit, selected.current, transform.translation, world.as_mut()) {
        Ok(Placement::Placed { cell, kind }) => {
            debug!("placed {kind:?} at {cell}");
            placed.write(BlockPlaced { cell, kind });
        }
        Ok(Placement::Interacted { cell, kind }) => {
            debug!("opened {kind:?} at {cell}");
            interacted.write(BlockInteracted { cell, kind });
        }
        Err(reason) => {
            info!("placement rejected: {reason}");
            rejected.write(PlacementRejected { reason });
        }
    }
}
