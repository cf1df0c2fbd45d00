mod block;
mod block_defs;
mod chunk;
mod face;
mod grid;

pub use block::BlockKind;
pub use block_defs::{BlockDef, def_for_block};
pub use face::{Axis, Face};
pub use grid::{VoxelGrid, WorldGrid};
