use crate::voxel::block::BlockKind;

/// Capability table entry for one block kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockDef {
    /// Whether this block occupies volume and blocks movement.
    pub solid: bool,
    /// Whether this block counts as water for buoyancy and ray pass-through.
    pub liquid: bool,
    /// Whether attack input can ever remove this block.
    pub breakable: bool,
    /// Cooldown-spaced hits needed to break the block.
    pub hardness: u32,
    /// Whether use input opens the block instead of placing against it.
    pub tile_entity: bool,
    /// Whether placement overwrites this block in place.
    pub decoration: bool,
    /// Whether this kind must hang on a solid side or stand on a solid block.
    pub wall_support: bool,
    /// Whether this kind only grows on grass or dirt.
    pub soil_only: bool,
}

impl BlockDef {
    /// Baseline for solid, hand-breakable terrain blocks.
    const fn terrain(hardness: u32) -> Self {
        Self {
            solid: true,
            liquid: false,
            breakable: true,
            hardness,
            tile_entity: false,
            decoration: false,
            wall_support: false,
            soil_only: false,
        }
    }

    /// Baseline for non-solid plants that need soil underneath.
    const fn plant() -> Self {
        Self {
            solid: false,
            liquid: false,
            breakable: true,
            hardness: 1,
            tile_entity: false,
            decoration: true,
            wall_support: false,
            soil_only: true,
        }
    }
}

const AIR_DEF: BlockDef = BlockDef {
    solid: false,
    liquid: false,
    breakable: false,
    hardness: 0,
    tile_entity: false,
    decoration: false,
    wall_support: false,
    soil_only: false,
};

const STONE_DEF: BlockDef = BlockDef::terrain(8);
const DIRT_DEF: BlockDef = BlockDef::terrain(3);
const GRASS_DEF: BlockDef = BlockDef::terrain(3);
const SAND_DEF: BlockDef = BlockDef::terrain(3);
const PLANKS_DEF: BlockDef = BlockDef::terrain(5);

const BEDROCK_DEF: BlockDef = BlockDef {
    breakable: false,
    hardness: 0,
    ..BlockDef::terrain(0)
};

const WATER_DEF: BlockDef = BlockDef {
    liquid: true,
    ..AIR_DEF
};

/// Seaweed only lives inside water and swims like it.
const SEAWEED_DEF: BlockDef = BlockDef {
    liquid: true,
    ..AIR_DEF
};

const TORCH_DEF: BlockDef = BlockDef {
    solid: false,
    breakable: true,
    hardness: 1,
    wall_support: true,
    ..AIR_DEF
};

const FLOWER_DEF: BlockDef = BlockDef::plant();
const TALL_GRASS_DEF: BlockDef = BlockDef::plant();

const CHEST_DEF: BlockDef = BlockDef {
    tile_entity: true,
    ..BlockDef::terrain(5)
};

/// Return the capability row for one block kind.
pub const fn def_for_block(kind: BlockKind) -> &'static BlockDef {
    match kind {
        BlockKind::Air => &AIR_DEF,
        BlockKind::Stone => &STONE_DEF,
        BlockKind::Dirt => &DIRT_DEF,
        BlockKind::Grass => &GRASS_DEF,
        BlockKind::Sand => &SAND_DEF,
        BlockKind::Planks => &PLANKS_DEF,
        BlockKind::Bedrock => &BEDROCK_DEF,
        BlockKind::Water => &WATER_DEF,
        BlockKind::Seaweed => &SEAWEED_DEF,
        BlockKind::Torch => &TORCH_DEF,
        BlockKind::Flower => &FLOWER_DEF,
        BlockKind::TallGrass => &TALL_GRASS_DEF,
        BlockKind::Chest => &CHEST_DEF,
    }
}
