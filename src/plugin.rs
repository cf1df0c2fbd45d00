use bevy::prelude::*;

use crate::interaction::{
    BreakTracker, SelectedBlock, TargetState, break_system, place_system, selection_system,
    targeting_system,
};
use crate::messages::{
    BlockBroken, BlockInteracted, BlockPlaced, BreakDenied, BreakProgressed, PlacementRejected,
    PlayerLanded, TeleportPlayer,
};
use crate::player::{
    movement_input_system, physics_system, player_look_system, teleport_system,
};
use crate::voxel::WorldGrid;

/// Per-frame stages of the core, run in declaration order.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoreSystems {
    /// Sample keyboard and mouse into intent and look state.
    Input,
    /// Teleports and collision resolution.
    Movement,
    /// Crosshair ray march.
    Targeting,
    /// Break and place handling.
    Interaction,
}

/// Registers world/interaction resources, signal messages and the per-frame
/// movement and interaction systems.
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WorldGrid>()
            .init_resource::<TargetState>()
            .init_resource::<BreakTracker>()
            .init_resource::<SelectedBlock>()
            .add_message::<PlayerLanded>()
            .add_message::<TeleportPlayer>()
            .add_message::<BreakProgressed>()
            .add_message::<BlockBroken>()
            .add_message::<BreakDenied>()
            .add_message::<BlockPlaced>()
            .add_message::<BlockInteracted>()
            .add_message::<PlacementRejected>()
            .configure_sets(
                Update,
                (
                    CoreSystems::Input,
                    CoreSystems::Movement,
                    CoreSystems::Targeting,
                    CoreSystems::Interaction,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (movement_input_system, player_look_system, selection_system)
                        .in_set(CoreSystems::Input),
                    (teleport_system, physics_system)
                        .chain()
                        .in_set(CoreSystems::Movement),
                    targeting_system.in_set(CoreSystems::Targeting),
                    (break_system, place_system)
                        .chain()
                        .in_set(CoreSystems::Interaction),
                ),
            );
    }
}
