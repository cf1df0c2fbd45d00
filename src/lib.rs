//! Movement and block-interaction core for a first-person voxel sandbox.
//!
//! The pure pieces (grid access, collision resolution, ray targeting, break
//! progress and placement rules) are plain functions over [`voxel::VoxelGrid`].
//! [`CorePlugin`] wires them into a bevy `App` as per-frame systems.

pub mod interaction;
pub mod messages;
pub mod player;
pub mod voxel;

mod plugin;

pub use plugin::{CorePlugin, CoreSystems};

/// Chunk width/height/depth in blocks.
pub const CHUNK_SIZE: i32 = 16;
/// Longest tick the resolver will integrate in one call.
pub const MAX_TICK_SECS: f32 = 0.05;
/// Gravity acceleration in blocks per second squared.
pub const GRAVITY: f32 = 28.0;
/// Fastest downward speed reachable in air.
pub const TERMINAL_VELOCITY: f32 = -60.0;
/// Vertical launch speed of a grounded jump.
pub const JUMP_SPEED: f32 = 8.4;
/// Half of the player collider's horizontal extent.
pub const PLAYER_HALF_WIDTH: f32 = 0.3;
/// Player collider height measured from the feet.
pub const PLAYER_HEIGHT: f32 = 1.8;
/// Eye offset above the feet.
pub const EYE_HEIGHT: f32 = 1.6;
/// Maximum interaction reach in blocks.
pub const REACH_DISTANCE: f32 = 5.0;
/// Highest block layer that counts as "at sea level" for liquid backfill.
pub const SEA_LEVEL: i32 = 32;
