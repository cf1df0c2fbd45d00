//! Cube face lookup tables shared by collision sweeps and ray targeting.

use bevy::prelude::*;

/// World axis index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Component of `v` along this axis.
    pub fn of(self, v: Vec3) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
            Axis::Z => v.z,
        }
    }

    /// Unit cell offset along this axis.
    pub fn unit(self) -> IVec3 {
        match self {
            Axis::X => IVec3::X,
            Axis::Y => IVec3::Y,
            Axis::Z => IVec3::Z,
        }
    }
}

/// One of the six faces of a unit cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// +Y
    Top,
    /// -Y
    Bottom,
    /// -Z
    North,
    /// +Z
    South,
    /// +X
    East,
    /// -X
    West,
}

/// Outward normal per face, indexed by [`Face::index`].
const NORMALS: [IVec3; 6] = [
    IVec3::new(0, 1, 0),
    IVec3::new(0, -1, 0),
    IVec3::new(0, 0, -1),
    IVec3::new(0, 0, 1),
    IVec3::new(1, 0, 0),
    IVec3::new(-1, 0, 0),
];

/// In-face `(u, v)` axes per face, indexed by [`Face::index`].
const SPANNED_AXES: [(Axis, Axis); 6] = [
    (Axis::X, Axis::Z),
    (Axis::X, Axis::Z),
    (Axis::X, Axis::Y),
    (Axis::X, Axis::Y),
    (Axis::Z, Axis::Y),
    (Axis::Z, Axis::Y),
];

impl Face {
    /// All faces in table order.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::North,
        Face::South,
        Face::East,
        Face::West,
    ];

    /// The four faces whose normal is horizontal.
    pub const SIDES: [Face; 4] = [Face::North, Face::South, Face::East, Face::West];

    const fn index(self) -> usize {
        match self {
            Face::Top => 0,
            Face::Bottom => 1,
            Face::North => 2,
            Face::South => 3,
            Face::East => 4,
            Face::West => 5,
        }
    }

    /// Outward unit normal of this face.
    pub const fn normal(self) -> IVec3 {
        NORMALS[self.index()]
    }

    /// The two world axes that lie in this face, as `(u, v)`.
    pub const fn spanned_axes(self) -> (Axis, Axis) {
        SPANNED_AXES[self.index()]
    }

    /// Axis this face's normal points along.
    pub const fn axis(self) -> Axis {
        match self {
            Face::Top | Face::Bottom => Axis::Y,
            Face::North | Face::South => Axis::Z,
            Face::East | Face::West => Axis::X,
        }
    }

    /// Face on `axis` whose normal points toward `positive` or away from it.
    pub const fn from_axis(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => Face::East,
            (Axis::X, false) => Face::West,
            (Axis::Y, true) => Face::Top,
            (Axis::Y, false) => Face::Bottom,
            (Axis::Z, true) => Face::South,
            (Axis::Z, false) => Face::North,
        }
    }

    /// Return `true` for the two horizontal-plane faces.
    pub const fn is_vertical_cap(self) -> bool {
        matches!(self, Face::Top | Face::Bottom)
    }

    /// Neighbour cell of `cell` across this face.
    pub fn neighbor(self, cell: IVec3) -> IVec3 {
        cell + self.normal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every face's spanned axes exclude its own normal axis.
    #[test]
    fn spanned_axes_are_orthogonal_to_normal() {
        for face in Face::ALL {
            let (u, v) = face.spanned_axes();
            assert_ne!(u, face.axis());
            assert_ne!(v, face.axis());
            assert_ne!(u, v);
            assert_eq!(face.normal().abs(), face.axis().unit());
        }
    }

    /// Axis/sign lookup is the inverse of the normal table.
    #[test]
    fn from_axis_round_trips_normals() {
        for face in Face::ALL {
            let positive = face.normal().max_element() > 0;
            assert_eq!(Face::from_axis(face.axis(), positive), face);
        }
    }
}
