use bevy::prelude::*;

use crate::CHUNK_SIZE;
use crate::voxel::block::BlockKind;

/// Pure voxel storage for one chunk (no ECS or render handles).
pub struct Chunk {
    /// Flat storage for CHUNK_SIZE^3 cells in local chunk coordinates.
    blocks: Vec<BlockKind>,
    /// Number of non-air cells, used to drop chunks that become empty.
    occupied: usize,
}

impl Chunk {
    /// Create an empty chunk filled with air.
    pub fn new_empty() -> Self {
        let blocks = vec![BlockKind::Air; (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize];
        Self {
            blocks,
            occupied: 0,
        }
    }

    /// Convert local `(x, y, z)` coordinates to flat storage index.
    fn index(local: IVec3) -> usize {
        (local.x + local.y * CHUNK_SIZE + local.z * CHUNK_SIZE * CHUNK_SIZE) as usize
    }

    /// Return `true` if local coordinates are inside chunk bounds.
    pub fn in_bounds(local: IVec3) -> bool {
        (0..CHUNK_SIZE).contains(&local.x)
            && (0..CHUNK_SIZE).contains(&local.y)
            && (0..CHUNK_SIZE).contains(&local.z)
    }

    /// Read a block at local coordinates (returns air when out of bounds).
    pub fn get_block(&self, local: IVec3) -> BlockKind {
        if !Self::in_bounds(local) {
            return BlockKind::Air;
        }
        self.blocks[Self::index(local)]
    }

    /// Write a block at local coordinates (ignores out-of-bounds writes).
    pub fn set_block(&mut self, local: IVec3, kind: BlockKind) {
        if !Self::in_bounds(local) {
            return;
        }
        let slot = &mut self.blocks[Self::index(local)];
        match (slot.is_air(), kind.is_air()) {
            (true, false) => self.occupied += 1,
            (false, true) => self.occupied -= 1,
            _ => {}
        }
        *slot = kind;
    }

    /// Return `true` when every cell is air.
    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }
}
