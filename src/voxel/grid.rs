use bevy::prelude::*;
use std::collections::HashMap;

use crate::CHUNK_SIZE;
use crate::voxel::block::BlockKind;
use crate::voxel::chunk::Chunk;
use crate::voxel::face::Face;

/// Block lookup and mutation by integer cell coordinate.
///
/// `get` is total: cells outside loaded data read as air. A `set` is visible
/// to the next `get` in the same tick.
pub trait VoxelGrid {
    /// Read the block kind stored at `cell`.
    fn get(&self, cell: IVec3) -> BlockKind;

    /// Write `kind` into `cell`.
    fn set(&mut self, cell: IVec3, kind: BlockKind);

    /// Return `true` when the block at `cell` blocks movement.
    fn is_solid(&self, cell: IVec3) -> bool {
        self.get(cell).is_solid()
    }

    /// Return `true` when the block at `cell` is swum through.
    fn is_liquid(&self, cell: IVec3) -> bool {
        self.get(cell).is_liquid()
    }

    /// Return `true` when any of `faces` around `cell` holds a solid block.
    fn any_solid_neighbor(&self, cell: IVec3, faces: &[Face]) -> bool {
        faces.iter().any(|face| self.is_solid(face.neighbor(cell)))
    }
}

#[derive(Resource, Default)]
/// Chunked sparse block storage for the simulated world.
pub struct WorldGrid {
    /// Chunks that hold at least one written cell.
    chunks: HashMap<IVec3, Chunk>,
}

impl WorldGrid {
    /// Construct an empty world where every cell reads as air.
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert a world block coordinate into `(chunk_coord, local_coord)`.
    ///
    /// `local_coord` is normalized into `0..CHUNK_SIZE` on each axis via
    /// Euclidean division, so negative world coordinates map correctly.
    pub(crate) fn world_to_chunk_local(world_pos: IVec3) -> (IVec3, IVec3) {
        let chunk = IVec3::new(
            world_pos.x.div_euclid(CHUNK_SIZE),
            world_pos.y.div_euclid(CHUNK_SIZE),
            world_pos.z.div_euclid(CHUNK_SIZE),
        );
        let local = IVec3::new(
            world_pos.x.rem_euclid(CHUNK_SIZE),
            world_pos.y.rem_euclid(CHUNK_SIZE),
            world_pos.z.rem_euclid(CHUNK_SIZE),
        );
        (chunk, local)
    }

    /// Fill the inclusive box `min..=max` with `kind`.
    pub fn fill(&mut self, min: IVec3, max: IVec3, kind: BlockKind) {
        for z in min.z..=max.z {
            for y in min.y..=max.y {
                for x in min.x..=max.x {
                    self.set(IVec3::new(x, y, z), kind);
                }
            }
        }
    }

    /// Number of chunks currently holding data.
    pub fn loaded_chunks(&self) -> usize {
        self.chunks.len()
    }
}

impl VoxelGrid for WorldGrid {
    fn get(&self, cell: IVec3) -> BlockKind {
        let (chunk_coord, local) = Self::world_to_chunk_local(cell);
        self.chunks
            .get(&chunk_coord)
            .map_or(BlockKind::Air, |chunk| chunk.get_block(local))
    }

    fn set(&mut self, cell: IVec3, kind: BlockKind) {
        let (chunk_coord, local) = Self::world_to_chunk_local(cell);
        if kind.is_air() {
            let Some(chunk) = self.chunks.get_mut(&chunk_coord) else {
                return;
            };
            chunk.set_block(local, kind);
            if chunk.is_empty() {
                self.chunks.remove(&chunk_coord);
            }
            return;
        }
        self.chunks
            .entry(chunk_coord)
            .or_insert_with(Chunk::new_empty)
            .set_block(local, kind);
    }
}
