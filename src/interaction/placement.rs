use bevy::prelude::*;
use thiserror::Error;

use crate::interaction::targeting::BlockTarget;
use crate::player::PlayerBox;
use crate::voxel::{BlockKind, Face, VoxelGrid};

/// Faces checked for torch support: the four sides and below.
const WALL_SUPPORT_FACES: [Face; 5] = [
    Face::North,
    Face::South,
    Face::East,
    Face::West,
    Face::Bottom,
];

/// Why a place press did not change the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementRejection {
    /// The target implies no destination cell.
    #[error("no free cell next to the target")]
    NoDestination,
    /// The selected kind can never be placed by hand.
    #[error("{0:?} cannot be placed")]
    Unplaceable(BlockKind),
    /// A torch-like kind has nothing to hang on.
    #[error("{0:?} needs a solid block beside or below it")]
    NeedsWallSupport(BlockKind),
    /// A soil-only decoration is not standing on soil.
    #[error("{kind:?} cannot grow on {ground:?}")]
    NeedsSoil {
        /// Kind being placed.
        kind: BlockKind,
        /// Kind found below the destination.
        ground: BlockKind,
    },
    /// The destination already holds a solid block.
    #[error("destination is occupied by {0:?}")]
    Occupied(BlockKind),
    /// A non-solid kind cannot displace liquid.
    #[error("{0:?} cannot be placed into liquid")]
    IntoLiquid(BlockKind),
    /// Seaweed is never overwritten.
    #[error("destination holds seaweed")]
    Seaweed,
    /// No solid neighbour to attach to.
    #[error("nothing to attach to")]
    Unsupported,
    /// The block would intersect the player.
    #[error("destination overlaps the player")]
    OverlapsPlayer,
}

/// Accepted result of a place press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// `kind` was written into `cell`.
    Placed {
        /// Destination cell.
        cell: IVec3,
        /// Kind written.
        kind: BlockKind,
    },
    /// The target is a tile entity to open instead.
    Interacted {
        /// Tile entity cell.
        cell: IVec3,
        /// Tile entity kind.
        kind: BlockKind,
    },
}

/// Validated destination for a place press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Destination {
    cell: IVec3,
    /// Overwrites a decoration instead of attaching to a neighbour.
    in_place: bool,
}

/// Check a place press without touching the grid.
pub fn validate<G: VoxelGrid + ?Sized>(
    target: &BlockTarget,
    selected: BlockKind,
    player_feet: Vec3,
    grid: &G,
) -> Result<Placement, PlacementRejection> {
    let target_kind = grid.get(target.cell);
    if target_kind.is_tile_entity() {
        return Ok(Placement::Interacted {
            cell: target.cell,
            kind: target_kind,
        });
    }

    let dest = destination(target, target_kind, grid)?;

    if selected.is_unplaceable() {
        return Err(PlacementRejection::Unplaceable(selected));
    }

    if selected.needs_wall_support() && !grid.any_solid_neighbor(dest.cell, &WALL_SUPPORT_FACES) {
        return Err(PlacementRejection::NeedsWallSupport(selected));
    }
    if selected.needs_soil() {
        let ground = grid.get(Face::Bottom.neighbor(dest.cell));
        if !ground.is_soil() {
            return Err(PlacementRejection::NeedsSoil {
                kind: selected,
                ground,
            });
        }
    }

    let existing = grid.get(dest.cell);
    if existing.is_solid() {
        return Err(PlacementRejection::Occupied(existing));
    }
    if existing.is_liquid() && !selected.is_solid() {
        return Err(PlacementRejection::IntoLiquid(selected));
    }
    if existing.is_seaweed() {
        return Err(PlacementRejection::Seaweed);
    }

    if !dest.in_place && !grid.any_solid_neighbor(dest.cell, &Face::ALL) {
        return Err(PlacementRejection::Unsupported);
    }

    if PlayerBox::at_feet(player_feet).overlaps_cell(dest.cell) {
        return Err(PlacementRejection::OverlapsPlayer);
    }

    Ok(Placement::Placed {
        cell: dest.cell,
        kind: selected,
    })
}

/// Validate a place press and write the block when every rule passes.
pub fn place<G: VoxelGrid + ?Sized>(
    target: &BlockTarget,
    selected: BlockKind,
    player_feet: Vec3,
    grid: &mut G,
) -> Result<Placement, PlacementRejection> {
    let placement = validate(target, selected, player_feet, grid)?;
    if let Placement::Placed { cell, kind } = placement {
        grid.set(cell, kind);
    }
    Ok(placement)
}

/// Cell a place press would fill for this target.
fn destination<G: VoxelGrid + ?Sized>(
    target: &BlockTarget,
    target_kind: BlockKind,
    grid: &G,
) -> Result<Destination, PlacementRejection> {
    if target_kind.is_decoration() {
        return Ok(Destination {
            cell: target.cell,
            in_place: true,
        });
    }

    if !target.self_target {
        return target
            .place_cell
            .map(|cell| Destination {
                cell,
                in_place: false,
            })
            .ok_or(PlacementRejection::NoDestination);
    }

    let cell = target.face.neighbor(target.cell);
    if target.face.is_vertical_cap() && grid.is_solid(cell) {
        return Err(PlacementRejection::NoDestination);
    }
    Ok(Destination {
        cell,
        in_place: false,
    })
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::interaction::targeting::cast_target;
    use crate::voxel::WorldGrid;

    /// Player stands far enough away that overlap never interferes.
    const FAR_FEET: Vec3 = Vec3::new(20.5, 0.0, 20.5);

    fn self_target(cell: IVec3, kind: BlockKind, face: Face) -> BlockTarget {
        BlockTarget {
            cell,
            kind,
            entry_face: face,
            face,
            self_target: true,
            place_cell: None,
            hit_point: cell.as_vec3() + Vec3::splat(0.5),
            distance: 2.0,
        }
    }

    fn edge_target(cell: IVec3, kind: BlockKind, face: Face) -> BlockTarget {
        BlockTarget {
            face,
            self_target: false,
            place_cell: Some(face.neighbor(cell)),
            ..self_target(cell, kind, Face::South)
        }
    }

    /// A torch with nothing beside or below it is refused and the grid is untouched.
    #[test]
    fn torch_without_wall_is_rejected() {
        let mut grid = WorldGrid::new();
        let ceiling = IVec3::new(0, 5, 0);
        grid.set(ceiling, BlockKind::Stone);
        let target = self_target(ceiling, BlockKind::Stone, Face::Bottom);

        let result = place(&target, BlockKind::Torch, FAR_FEET, &mut grid);
        assert_eq!(
            result,
            Err(PlacementRejection::NeedsWallSupport(BlockKind::Torch))
        );
        assert_eq!(grid.get(IVec3::new(0, 4, 0)), BlockKind::Air);
        assert_eq!(grid.loaded_chunks(), 1);
    }

    /// A torch beside a wall is accepted.
    #[test]
    fn torch_on_wall_is_placed() {
        let mut grid = WorldGrid::new();
        let wall = IVec3::new(0, 5, 0);
        grid.set(wall, BlockKind::Stone);
        let target = self_target(wall, BlockKind::Stone, Face::East);

        let result = place(&target, BlockKind::Torch, FAR_FEET, &mut grid);
        assert_eq!(
            result,
            Ok(Placement::Placed {
                cell: IVec3::new(1, 5, 0),
                kind: BlockKind::Torch
            })
        );
        assert_eq!(grid.get(IVec3::new(1, 5, 0)), BlockKind::Torch);
    }

    /// Soil-only decorations accept grass or dirt below and nothing else.
    #[rstest]
    #[case(BlockKind::Sand, false)]
    #[case(BlockKind::Stone, false)]
    #[case(BlockKind::Dirt, true)]
    #[case(BlockKind::Grass, true)]
    fn flower_needs_soil(#[case] ground: BlockKind, #[case] accepted: bool) {
        let mut grid = WorldGrid::new();
        let ground_cell = IVec3::new(0, 0, 0);
        grid.set(ground_cell, ground);
        let target = self_target(ground_cell, ground, Face::Top);

        let result = place(&target, BlockKind::Flower, FAR_FEET, &mut grid);
        if accepted {
            assert!(result.is_ok());
            assert_eq!(grid.get(IVec3::new(0, 1, 0)), BlockKind::Flower);
        } else {
            assert_eq!(
                result,
                Err(PlacementRejection::NeedsSoil {
                    kind: BlockKind::Flower,
                    ground
                })
            );
            assert_eq!(grid.get(IVec3::new(0, 1, 0)), BlockKind::Air);
        }
    }

    /// Placing against a chest opens it and never writes.
    #[test]
    fn tile_entity_is_interaction() {
        let mut grid = WorldGrid::new();
        let chest = IVec3::new(0, 1, 0);
        grid.set(chest, BlockKind::Chest);
        grid.set(IVec3::ZERO, BlockKind::Stone);
        let target = self_target(chest, BlockKind::Chest, Face::Top);

        let result = place(&target, BlockKind::Bedrock, FAR_FEET, &mut grid);
        assert_eq!(
            result,
            Ok(Placement::Interacted {
                cell: chest,
                kind: BlockKind::Chest
            })
        );
        assert_eq!(grid.get(IVec3::new(0, 2, 0)), BlockKind::Air);
    }

    /// Targeting a decoration replaces it in place, even with no solid neighbour.
    #[test]
    fn decoration_is_replaced_in_place() {
        let mut grid = WorldGrid::new();
        let grass = IVec3::new(0, 1, 0);
        grid.set(grass, BlockKind::TallGrass);
        let target = self_target(grass, BlockKind::TallGrass, Face::Top);

        let result = place(&target, BlockKind::Planks, FAR_FEET, &mut grid);
        assert_eq!(
            result,
            Ok(Placement::Placed {
                cell: grass,
                kind: BlockKind::Planks
            })
        );
        assert_eq!(grid.get(grass), BlockKind::Planks);
    }

    /// Water and bedrock are never placed.
    #[rstest]
    #[case(BlockKind::Water)]
    #[case(BlockKind::Bedrock)]
    fn unplaceable_kinds(#[case] kind: BlockKind) {
        let mut grid = WorldGrid::new();
        grid.set(IVec3::ZERO, BlockKind::Stone);
        let target = self_target(IVec3::ZERO, BlockKind::Stone, Face::Top);

        assert_eq!(
            place(&target, kind, FAR_FEET, &mut grid),
            Err(PlacementRejection::Unplaceable(kind))
        );
    }

    /// Solid kinds displace water; non-solid kinds and seaweed cells are refused.
    #[test]
    fn liquid_destinations() {
        let mut grid = WorldGrid::new();
        grid.set(IVec3::ZERO, BlockKind::Sand);
        grid.set(IVec3::Y, BlockKind::Water);
        let target = self_target(IVec3::ZERO, BlockKind::Sand, Face::Top);

        assert_eq!(
            validate(&target, BlockKind::Torch, FAR_FEET, &grid),
            Err(PlacementRejection::IntoLiquid(BlockKind::Torch))
        );
        assert!(validate(&target, BlockKind::Stone, FAR_FEET, &grid).is_ok());

        grid.set(IVec3::Y, BlockKind::Seaweed);
        assert_eq!(
            validate(&target, BlockKind::Stone, FAR_FEET, &grid),
            Err(PlacementRejection::Seaweed)
        );
    }

    /// A top self-target whose upper cell is solid has no destination.
    #[test]
    fn covered_top_has_no_destination() {
        let mut grid = WorldGrid::new();
        grid.set(IVec3::ZERO, BlockKind::Stone);
        grid.set(IVec3::Y, BlockKind::Stone);
        let target = self_target(IVec3::ZERO, BlockKind::Stone, Face::Top);

        assert_eq!(
            validate(&target, BlockKind::Dirt, FAR_FEET, &grid),
            Err(PlacementRejection::NoDestination)
        );
    }

    /// Edge redirects place at the redirected neighbour when it is anchored.
    #[test]
    fn edge_redirect_destination() {
        let mut grid = WorldGrid::new();
        grid.set(IVec3::ZERO, BlockKind::Stone);
        let target = edge_target(IVec3::ZERO, BlockKind::Stone, Face::West);

        assert_eq!(
            validate(&target, BlockKind::Dirt, FAR_FEET, &grid),
            Ok(Placement::Placed {
                cell: IVec3::NEG_X,
                kind: BlockKind::Dirt
            })
        );
    }

    /// A destination with no solid neighbour at all is refused.
    #[test]
    fn floating_destination_is_unsupported() {
        let grid = WorldGrid::new();
        let target = edge_target(IVec3::ZERO, BlockKind::Stone, Face::Top);
        assert_eq!(
            validate(&target, BlockKind::Dirt, FAR_FEET, &grid),
            Err(PlacementRejection::Unsupported)
        );
    }

    /// Blocks are never placed inside the player's own collider.
    #[test]
    fn overlapping_player_is_rejected() {
        let mut grid = WorldGrid::new();
        grid.fill(IVec3::new(-2, 0, -2), IVec3::new(2, 0, 2), BlockKind::Grass);
        let feet = Vec3::new(0.5, 1.0, 0.5);
        let target = cast_target(feet + Vec3::Y * 1.6, Vec3::NEG_Y, &grid)
            .expect("floor is within reach");

        assert_eq!(
            place(&target, BlockKind::Dirt, feet, &mut grid),
            Err(PlacementRejection::OverlapsPlayer)
        );
        assert_eq!(grid.get(IVec3::new(0, 1, 0)), BlockKind::Air);
    }
}
