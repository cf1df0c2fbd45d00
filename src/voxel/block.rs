use bevy::prelude::*;

use crate::voxel::block_defs::def_for_block;

/// Block kind stored in every grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// Empty cell with no collision.
    #[default]
    Air,
    /// Plain stone.
    Stone,
    /// Plain dirt.
    Dirt,
    /// Dirt with a grass top.
    Grass,
    /// Loose sand.
    Sand,
    /// Wooden planks.
    Planks,
    /// Indestructible floor block.
    Bedrock,
    /// The liquid kind.
    Water,
    /// Underwater plant; behaves as water for movement.
    Seaweed,
    /// Light source that needs a supporting side or floor.
    Torch,
    /// Soil-only decoration.
    Flower,
    /// Soil-only decoration.
    TallGrass,
    /// Container opened by the use button.
    Chest,
}

impl BlockKind {
    /// Kinds reachable from the hotbar, in slot order.
    pub const HOTBAR: [BlockKind; 7] = [
        BlockKind::Stone,
        BlockKind::Dirt,
        BlockKind::Planks,
        BlockKind::Sand,
        BlockKind::Torch,
        BlockKind::Flower,
        BlockKind::Chest,
    ];

    /// The kind written back when a submerged block is broken.
    pub const LIQUID: BlockKind = BlockKind::Water;

    /// Return `true` if this block is air.
    pub fn is_air(self) -> bool {
        matches!(self, BlockKind::Air)
    }

    /// Return `true` if this block occupies space and blocks movement.
    pub fn is_solid(self) -> bool {
        def_for_block(self).solid
    }

    /// Return `true` if this block is swum through rather than walked on.
    pub fn is_liquid(self) -> bool {
        def_for_block(self).liquid
    }

    /// Return `true` if attack input can remove this block.
    pub fn is_breakable(self) -> bool {
        def_for_block(self).breakable
    }

    /// Hits required to break this block.
    pub fn hardness(self) -> u32 {
        def_for_block(self).hardness
    }

    /// Return `true` if use input interacts with this block instead of placing.
    pub fn is_tile_entity(self) -> bool {
        def_for_block(self).tile_entity
    }

    /// Return `true` if a placement aimed at this block replaces it.
    pub fn is_decoration(self) -> bool {
        def_for_block(self).decoration
    }

    /// Return `true` if this kind needs a solid side or floor neighbour.
    pub fn needs_wall_support(self) -> bool {
        def_for_block(self).wall_support
    }

    /// Return `true` if this kind may only sit on grass or dirt.
    pub fn needs_soil(self) -> bool {
        def_for_block(self).soil_only
    }

    /// Return `true` if this kind can carry a soil-only decoration.
    pub fn is_soil(self) -> bool {
        matches!(self, BlockKind::Grass | BlockKind::Dirt)
    }

    /// Return `true` for seaweed-like cells that reject placement.
    pub fn is_seaweed(self) -> bool {
        matches!(self, BlockKind::Seaweed)
    }

    /// Return `true` for kinds that can never be placed by the player.
    pub fn is_unplaceable(self) -> bool {
        matches!(self, BlockKind::Water | BlockKind::Bedrock | BlockKind::Air)
    }

    /// Convert a world-space position to the integer cell that contains it.
    pub fn cell_at(position: Vec3) -> IVec3 {
        position.floor().as_ivec3()
    }
}
