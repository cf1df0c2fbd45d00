use std::time::Duration;

use bevy::input::InputPlugin;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use voxel_reach::messages::{
    BlockBroken, BlockPlaced, BreakDenied, PlacementRejected, PlayerLanded, TeleportPlayer,
};
use voxel_reach::player::{
    CollisionResolver, MovementIntent, Player, PlayerController, PlayerLook, Velocity,
};
use voxel_reach::voxel::{BlockKind, WorldGrid};
use voxel_reach::{CorePlugin, CoreSystems};

// Fixed simulated frame length.
const FRAME_SECS: f64 = 1.0 / 60.0;
// Feet position the player spawns at and is teleported back to.
const SPAWN_FEET: Vec3 = Vec3::new(0.5, 1.0, 0.5);
// Mouse-look sensitivity for the player.
const LOOK_SENSITIVITY: f32 = 0.002;

// Scripted frame numbers.
const WALK_END: u32 = 75;
const LOOK_DOWN: u32 = 100;
const BREAK_START: u32 = 110;
const BREAK_END: u32 = 200;
const SELECT: u32 = 210;
const PLACE: u32 = 215;
const TELEPORT: u32 = 230;
const EXIT: u32 = 260;

#[derive(Resource, Default)]
/// Frame counter driving the scripted input.
struct DemoClock {
    frame: u32,
}

// Headless walk-through: step up a ledge, drop off it, break the floor,
// place a block, teleport home.
fn main() {
    App::new()
        .add_plugins((
            MinimalPlugins,
            LogPlugin {
                level: Level::DEBUG,
                filter: "info,voxel_reach=debug".to_string(),
                ..default()
            },
            InputPlugin,
            CorePlugin,
        ))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            FRAME_SECS,
        )))
        .init_resource::<DemoClock>()
        .add_systems(Startup, (build_world, spawn_player))
        .add_systems(Update, script_system.before(CoreSystems::Input))
        .add_systems(Update, report_system.after(CoreSystems::Interaction))
        .run();
}

// Lay a grass floor with a one-block step and a sand-bottomed pool.
fn build_world(mut world: ResMut<WorldGrid>) {
    world.fill(IVec3::new(-8, -1, -12), IVec3::new(8, -1, 8), BlockKind::Bedrock);
    world.fill(IVec3::new(-8, 0, -12), IVec3::new(8, 0, 8), BlockKind::Grass);
    world.fill(IVec3::new(-1, 1, -4), IVec3::new(1, 1, -3), BlockKind::Stone);
    world.fill(IVec3::new(-2, 0, -10), IVec3::new(2, 0, -8), BlockKind::Water);
    world.fill(IVec3::new(-2, -1, -10), IVec3::new(2, -1, -8), BlockKind::Sand);
    info!("world ready: {} chunks", world.loaded_chunks());
}

// Spawn the player standing on the floor, facing -Z.
fn spawn_player(mut commands: Commands) {
    commands.spawn((
        Transform::from_translation(SPAWN_FEET),
        Velocity::default(),
        Player::default(),
        PlayerController::default(),
        PlayerLook::new(LOOK_SENSITIVITY, 0.0, 0.0),
        MovementIntent::default(),
        CollisionResolver::new(),
    ));
}

// Press and release inputs on fixed frames.
fn script_system(
    mut clock: ResMut<DemoClock>,
    mut keys: ResMut<ButtonInput<KeyCode>>,
    mut buttons: ResMut<ButtonInput<MouseButton>>,
    mut mouse: ResMut<AccumulatedMouseMotion>,
    player_query: Query<Entity, With<Player>>,
    mut teleport: MessageWriter<TeleportPlayer>,
    mut exit: MessageWriter<AppExit>,
) {
    let frame = clock.frame;
    clock.frame += 1;
    match frame {
        0 => keys.press(KeyCode::KeyW),
        WALK_END => keys.release(KeyCode::KeyW),
        LOOK_DOWN => mouse.delta = Vec2::new(0.0, 600.0),
        BREAK_START => buttons.press(MouseButton::Left),
        BREAK_END => buttons.release(MouseButton::Left),
        SELECT => keys.press(KeyCode::Digit2),
        PLACE => {
            keys.release(KeyCode::Digit2);
            buttons.press(MouseButton::Right);
        }
        TELEPORT => {
            buttons.release(MouseButton::Right);
            if let Ok(entity) = player_query.single() {
                teleport.write(TeleportPlayer {
                    entity,
                    feet: SPAWN_FEET,
                });
            }
        }
        EXIT => {
            exit.write(AppExit::Success);
        }
        _ => {}
    }
}

// Log the signals the core produced this frame.
fn report_system(
    mut landed: MessageReader<PlayerLanded>,
    mut broken: MessageReader<BlockBroken>,
    mut denied: MessageReader<BreakDenied>,
    mut placed: MessageReader<BlockPlaced>,
    mut rejected: MessageReader<PlacementRejected>,
    player_query: Query<(&Transform, &Player)>,
) {
    for message in landed.read() {
        info!(
            "landed: fell {:.2} (in water: {})",
            message.fall_distance, message.in_water
        );
    }
    for message in broken.read() {
        info!(
            "broken: {:?} at {} -> {:?}",
            message.kind, message.cell, message.replaced_with
        );
    }
    for message in denied.read() {
        info!("denied: {:?} at {}", message.kind, message.cell);
    }
    for message in placed.read() {
        info!("placed: {:?} at {}", message.kind, message.cell);
    }
    for message in rejected.read() {
        info!("rejected: {}", message.reason);
    }
    if let Ok((transform, player)) = player_query.single() {
        trace!(
            "feet {} ground {} water {}",
            transform.translation, player.on_ground, player.in_water
        );
    }
}
