//! Signals emitted by the core for HUD, audio, and damage consumers.

use bevy::prelude::*;

use crate::interaction::PlacementRejection;
use crate::voxel::BlockKind;

/// A fall ended this tick.
///
/// Landing in water still reports the height; damage consumers zero it when
/// `in_water` is set.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PlayerLanded {
    /// Landing player entity.
    pub entity: Entity,
    /// Height fallen in blocks.
    pub fall_distance: f32,
    /// Whether the fall ended in liquid.
    pub in_water: bool,
}

/// Request to move a player's feet without sweeping through the world.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct TeleportPlayer {
    /// Player entity to move.
    pub entity: Entity,
    /// New feet position.
    pub feet: Vec3,
}

/// One break hit landed on the tracked block.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakProgressed {
    /// Cell being broken.
    pub cell: IVec3,
    /// Hits delivered so far.
    pub hits_delivered: u32,
    /// Hits needed to break the block.
    pub hits_required: u32,
}

/// A block was broken and replaced.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockBroken {
    /// Cell that was broken.
    pub cell: IVec3,
    /// Kind that was removed.
    pub kind: BlockKind,
    /// Kind written in its place.
    pub replaced_with: BlockKind,
}

/// Attack was held on a block that cannot be broken.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BreakDenied {
    /// Targeted cell.
    pub cell: IVec3,
    /// Kind of the unbreakable block.
    pub kind: BlockKind,
}

/// A block was placed.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockPlaced {
    /// Destination cell.
    pub cell: IVec3,
    /// Kind written.
    pub kind: BlockKind,
}

/// A place press hit a tile entity and opens it instead.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockInteracted {
    /// Tile entity cell.
    pub cell: IVec3,
    /// Tile entity kind.
    pub kind: BlockKind,
}

/// A place press was refused.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlacementRejected {
    /// Why the placement was refused.
    pub reason: PlacementRejection,
}
