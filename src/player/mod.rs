mod aabb;
mod buoyancy;
mod camera;
mod collision;
mod components;
mod movement;
mod physics;

pub use aabb::{CELL_EPSILON, PlayerBox};
pub use camera::player_look_system;
pub use collision::{CollisionResolver, CollisionResult, MoveRequest};
pub use components::{MovementIntent, Player, PlayerController, PlayerLook, Velocity};
pub use movement::movement_input_system;
pub use physics::{physics_system, teleport_system};
