use bevy::prelude::*;

use crate::REACH_DISTANCE;
use crate::voxel::{Axis, BlockKind, Face, VoxelGrid};

/// Distance between ray samples in blocks.
pub const RAY_STEP: f32 = 0.05;
/// Width of the face border that redirects to the neighbouring face.
pub const EDGE_MARGIN: f32 = 0.2;

/// What the crosshair resolves to this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockTarget {
    /// Targeted block cell.
    pub cell: IVec3,
    /// Kind stored at `cell` when the ray hit it.
    pub kind: BlockKind,
    /// Face the ray entered through.
    pub entry_face: Face,
    /// Face after edge redirection; equals `entry_face` on a self-target.
    pub face: Face,
    /// The block itself is the interaction target.
    pub self_target: bool,
    /// Cell a placement would fill; only set for edge redirects.
    pub place_cell: Option<IVec3>,
    /// World-space entry point on `entry_face`.
    pub hit_point: Vec3,
    /// Ray length from the eye to `hit_point`.
    pub distance: f32,
}

impl BlockTarget {
    /// Return `true` when both resolve to the same cell, face and intent.
    pub fn same_target(&self, other: &BlockTarget) -> bool {
        self.cell == other.cell
            && self.face == other.face
            && self.self_target == other.self_target
            && self.place_cell == other.place_cell
    }

    /// Return `true` while `grid` still holds the kind the ray hit.
    pub fn is_current<G: VoxelGrid + ?Sized>(&self, grid: &G) -> bool {
        grid.get(self.cell) == self.kind
    }
}

#[derive(Resource, Default, Debug)]
/// Latest crosshair target, recomputed every tick.
pub struct TargetState {
    /// Current target, if the ray hit anything within reach.
    pub current: Option<BlockTarget>,
}

impl TargetState {
    /// Store `next` and report whether it differs from the previous target.
    pub fn update(&mut self, next: Option<BlockTarget>) -> bool {
        let changed = match (&self.current, &next) {
            (Some(prev), Some(next)) => !prev.same_target(next),
            (None, None) => false,
            _ => true,
        };
        self.current = next;
        changed
    }

    /// Return `true` while something is targeted.
    pub fn has_target(&self) -> bool {
        self.current.is_some()
    }
}

/// March from `eye` along `direction` and resolve the first block that is
/// neither air nor liquid.
pub fn cast_target<G: VoxelGrid + ?Sized>(
    eye: Vec3,
    direction: Vec3,
    grid: &G,
) -> Option<BlockTarget> {
    let direction = direction.normalize_or_zero();
    if direction == Vec3::ZERO {
        return None;
    }

    let steps = (REACH_DISTANCE / RAY_STEP) as i32;
    let mut last_cell = None;
    for i in 0..=steps {
        let cell = BlockKind::cell_at(eye + direction * (i as f32 * RAY_STEP));
        if last_cell == Some(cell) {
            continue;
        }
        last_cell = Some(cell);

        let kind = grid.get(cell);
        if kind.is_air() || kind.is_liquid() {
            continue;
        }
        return Some(resolve_hit(eye, direction, cell, kind, grid));
    }
    None
}

/// Classify a confirmed hit on `cell` into self-target or edge redirect.
fn resolve_hit<G: VoxelGrid + ?Sized>(
    eye: Vec3,
    direction: Vec3,
    cell: IVec3,
    kind: BlockKind,
    grid: &G,
) -> BlockTarget {
    let (entry_face, distance) = entry_face(eye, direction, cell);
    let hit_point = eye + direction * distance;
    let (u, v) = face_coords(entry_face, cell, hit_point);

    let redirect = edge_redirect(entry_face, u, v)
        .filter(|face| !grid.is_solid(face.neighbor(cell)));

    match redirect {
        Some(face) => BlockTarget {
            cell,
            kind,
            entry_face,
            face,
            self_target: false,
            place_cell: Some(face.neighbor(cell)),
            hit_point,
            distance,
        },
        None => BlockTarget {
            cell,
            kind,
            entry_face,
            face: entry_face,
            self_target: true,
            place_cell: None,
            hit_point,
            distance,
        },
    }
}

/// Slab test against the unit cube at `cell`.
///
/// Returns the face crossed last on the way in and the ray parameter of that
/// crossing, clamped to zero when the eye already sits inside the cube.
fn entry_face(eye: Vec3, direction: Vec3, cell: IVec3) -> (Face, f32) {
    let min = cell.as_vec3();
    let mut best = (Face::Top, f32::NEG_INFINITY);
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        let d = axis.of(direction);
        if d == 0.0 {
            continue;
        }
        let lo = axis.of(min);
        // Moving toward +axis enters through the low side, whose normal is negative.
        let (plane, positive) = if d > 0.0 { (lo, false) } else { (lo + 1.0, true) };
        let t = (plane - axis.of(eye)) / d;
        if t > best.1 {
            best = (Face::from_axis(axis, positive), t);
        }
    }
    (best.0, best.1.max(0.0))
}

/// Local `[0, 1]²` coordinates of `point` on `face` of `cell`.
fn face_coords(face: Face, cell: IVec3, point: Vec3) -> (f32, f32) {
    let (u_axis, v_axis) = face.spanned_axes();
    let origin = cell.as_vec3();
    let u = (u_axis.of(point) - u_axis.of(origin)).clamp(0.0, 1.0);
    let v = (v_axis.of(point) - v_axis.of(origin)).clamp(0.0, 1.0);
    (u, v)
}

/// Face a hit at `(u, v)` on `face` redirects to, or `None` for the inner
/// region.
///
/// A coordinate exactly on the margin counts as inner.
pub fn edge_redirect(face: Face, u: f32, v: f32) -> Option<Face> {
    let (u_axis, v_axis) = face.spanned_axes();
    let on_edge = |c: f32| c < EDGE_MARGIN || c > 1.0 - EDGE_MARGIN;
    let edge_gap = |c: f32| c.min(1.0 - c);

    let use_u = match (on_edge(u), on_edge(v)) {
        (false, false) => return None,
        (true, false) => true,
        (false, true) => false,
        (true, true) => edge_gap(u) <= edge_gap(v),
    };
    let (axis, c) = if use_u { (u_axis, u) } else { (v_axis, v) };
    Some(Face::from_axis(axis, c > 0.5))
}

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::voxel::WorldGrid;

    fn stone_wall() -> WorldGrid {
        let mut grid = WorldGrid::new();
        grid.set(IVec3::new(0, 1, -2), BlockKind::Stone);
        grid
    }

    /// Looking at the centre of a block two cells away selects the block itself.
    #[test]
    fn dead_center_is_self_target() {
        let grid = stone_wall();
        let target = cast_target(Vec3::new(0.5, 1.5, 0.5), Vec3::NEG_Z, &grid)
            .expect("stone is within reach");

        assert_eq!(target.cell, IVec3::new(0, 1, -2));
        assert_eq!(target.entry_face, Face::South);
        assert!(target.self_target);
        assert_eq!(target.place_cell, None);
        assert!((target.distance - 1.5).abs() < 1.0e-5);
    }

    /// Repeated casts over an unchanged grid give identical results.
    #[test]
    fn cast_is_deterministic() {
        let grid = stone_wall();
        let eye = Vec3::new(0.93, 1.71, 0.4);
        let dir = Vec3::new(-0.05, -0.1, -1.0);
        let first = cast_target(eye, dir, &grid);
        for _ in 0..10 {
            assert_eq!(cast_target(eye, dir, &grid), first);
        }
    }

    /// Air and water are looked through; nothing in reach yields no target.
    #[test]
    fn passes_through_air_and_water() {
        let mut grid = WorldGrid::new();
        grid.fill(IVec3::new(0, 1, -3), IVec3::new(0, 1, -1), BlockKind::Water);
        assert_eq!(cast_target(Vec3::new(0.5, 1.5, 0.5), Vec3::NEG_Z, &grid), None);

        grid.set(IVec3::new(0, 1, -4), BlockKind::Sand);
        let target = cast_target(Vec3::new(0.5, 1.5, 0.5), Vec3::NEG_Z, &grid)
            .expect("sand behind the water is in reach");
        assert_eq!(target.cell, IVec3::new(0, 1, -4));
    }

    /// Blocks beyond reach are ignored.
    #[test]
    fn out_of_reach_is_ignored() {
        let mut grid = WorldGrid::new();
        grid.set(IVec3::new(0, 1, -7), BlockKind::Stone);
        assert_eq!(cast_target(Vec3::new(0.5, 1.5, 0.5), Vec3::NEG_Z, &grid), None);
    }

    /// The margin itself counts as inner, so the classification never flaps.
    #[rstest]
    #[case(0.2, 0.5)]
    #[case(0.8, 0.5)]
    #[case(0.5, 0.2)]
    #[case(0.5, 0.8)]
    fn margin_boundary_is_inner(#[case] u: f32, #[case] v: f32) {
        for face in Face::ALL {
            assert_eq!(edge_redirect(face, u, v), None);
        }
    }

    /// The inner 60% always keeps the self-target.
    #[rstest]
    #[case(0.5, 0.5)]
    #[case(0.25, 0.75)]
    #[case(0.79, 0.21)]
    fn inner_region_keeps_self(#[case] u: f32, #[case] v: f32) {
        assert_eq!(edge_redirect(Face::Top, u, v), None);
    }

    /// Border hits redirect toward the nearest edge; corners pick the closer axis.
    #[rstest]
    #[case(Face::Top, 0.9, 0.5, Face::East)]
    #[case(Face::Top, 0.1, 0.5, Face::West)]
    #[case(Face::Top, 0.5, 0.05, Face::North)]
    #[case(Face::South, 0.5, 0.95, Face::Top)]
    #[case(Face::South, 0.5, 0.1, Face::Bottom)]
    #[case(Face::East, 0.1, 0.5, Face::North)]
    #[case(Face::Top, 0.1, 0.95, Face::South)]
    #[case(Face::Top, 0.05, 0.9, Face::West)]
    fn border_redirects(
        #[case] face: Face,
        #[case] u: f32,
        #[case] v: f32,
        #[case] expected: Face,
    ) {
        assert_eq!(edge_redirect(face, u, v), Some(expected));
    }

    /// An edge hit points placement at the neighbour across the redirected face.
    #[test]
    fn edge_hit_sets_place_cell() {
        let grid = stone_wall();
        let target = cast_target(Vec3::new(0.9, 1.5, 0.5), Vec3::NEG_Z, &grid)
            .expect("stone is within reach");

        assert!(!target.self_target);
        assert_eq!(target.entry_face, Face::South);
        assert_eq!(target.face, Face::East);
        assert_eq!(target.place_cell, Some(IVec3::new(1, 1, -2)));
    }

    /// A redirect into a solid neighbour falls back to the self-target.
    #[test]
    fn solid_neighbour_reverts_redirect() {
        let mut grid = stone_wall();
        grid.set(IVec3::new(1, 1, -2), BlockKind::Stone);
        let target = cast_target(Vec3::new(0.9, 1.5, 0.5), Vec3::NEG_Z, &grid)
            .expect("stone is within reach");

        assert_eq!(target.cell, IVec3::new(0, 1, -2));
        assert!(target.self_target);
        assert_eq!(target.face, Face::South);
        assert_eq!(target.place_cell, None);
    }

    /// Looking straight down enters through the top face.
    #[test]
    fn looking_down_hits_top() {
        let mut grid = WorldGrid::new();
        grid.set(IVec3::new(0, 0, 0), BlockKind::Grass);
        let target = cast_target(Vec3::new(0.5, 1.6, 0.5), Vec3::NEG_Y, &grid)
            .expect("floor is within reach");

        assert_eq!(target.entry_face, Face::Top);
        assert!(target.self_target);
    }

    /// Target changes are reported only when cell, face or intent move.
    #[test]
    fn target_state_detects_changes() {
        let grid = stone_wall();
        let mut state = TargetState::default();
        let a = cast_target(Vec3::new(0.5, 1.5, 0.5), Vec3::NEG_Z, &grid);
        let b = cast_target(Vec3::new(0.55, 1.45, 0.5), Vec3::NEG_Z, &grid);

        assert!(state.update(a));
        assert!(!state.update(b));
        assert!(state.update(None));
        assert!(!state.update(None));
        assert!(!state.has_target());
    }

    /// A target goes stale once its cell is rewritten.
    #[test]
    fn rewritten_cell_makes_target_stale() {
        let mut grid = stone_wall();
        let target = cast_target(Vec3::new(0.5, 1.5, 0.5), Vec3::NEG_Z, &grid)
            .expect("stone is within reach");
        assert!(target.is_current(&grid));

        grid.set(target.cell, BlockKind::Air);
        assert!(!target.is_current(&grid));
    }
}
