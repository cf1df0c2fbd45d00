use bevy::prelude::*;

use crate::messages::{PlayerLanded, TeleportPlayer};
use crate::player::collision::{CollisionResolver, MoveRequest};
use crate::player::components::{MovementIntent, Player, PlayerController, PlayerLook, Velocity};
use crate::voxel::WorldGrid;

/// Turn intent into a move request, resolve it against the world, and
/// publish landings.
pub fn physics_system(
    time: Res<Time>,
    world: Res<WorldGrid>,
    mut query: Query<(
        Entity,
        &mut Transform,
        &mut Velocity,
        &mut Player,
        &mut CollisionResolver,
        &PlayerController,
        &PlayerLook,
        &MovementIntent,
    )>,
    mut landed: MessageWriter<PlayerLanded>,
) {
    let dt = time.delta_secs();
    for (entity, mut transform, mut velocity, mut player, mut resolver, controller, look, intent) in
        &mut query
    {
        let wet = resolver.was_in_water();
        if intent.jump && !wet {
            player.try_start_jump(&resolver, &mut velocity.0);
        }

        let step = controller.wish_displacement(intent.local, look.yaw, wet, intent.sprint, dt);
        let request = MoveRequest {
            dx: step.x,
            dz: step.y,
            dt,
            swim_up: intent.jump,
            swim_down: intent.descend,
        };

        let mut feet = transform.translation;
        let result = resolver.resolve(&mut feet, &mut velocity.0, request, world.as_ref());
        transform.translation = feet;
        player.apply_contact(&result);

        if result.landed() {
            debug!(
                "player {entity} landed after {:.2} blocks (in water: {})",
                result.fall_distance, result.in_water
            );
            landed.write(PlayerLanded {
                entity,
                fall_distance: result.fall_distance,
                in_water: result.in_water,
            });
        }
    }
}

/// Apply queued teleports, clearing movement history with the move.
pub fn teleport_system(
    mut requests: MessageReader<TeleportPlayer>,
    mut query: Query<(
        &mut Transform,
        &mut Velocity,
        &mut Player,
        &mut CollisionResolver,
    )>,
) {
    for request in requests.read() {
        let Ok((mut transform, mut velocity, mut player, mut resolver)) =
            query.get_mut(request.entity)
        else {
            warn!("teleport for missing player {}", request.entity);
            continue;
        };
        player.teleport(&mut transform, &mut velocity, &mut resolver, request.feet);
        info!("player {} teleported to {}", request.entity, request.feet);
    }
}
