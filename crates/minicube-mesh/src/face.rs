use minicube_geom::Vec3;

/// The six faces of a cube, in the order the surface extractor visits them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Top = 0,
    Bottom = 1,
    Front = 2,
    Back = 3,
    Left = 4,
    Right = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Converts a face index `[0..6)` back into a `Face` value.
    #[inline]
    pub fn from_index(i: usize) -> Option<Face> {
        Face::ALL.get(i).copied()
    }

    #[inline]
    pub fn opposite(self) -> Face {
        match self {
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::Front => Face::Back,
            Face::Back => Face::Front,
            Face::Left => Face::Right,
            Face::Right => Face::Left,
        }
    }

    /// World-space outward normal. Up is +Y, front is +Z, right is +X.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Top => Vec3::new(0.0, 1.0, 0.0),
            Face::Bottom => Vec3::new(0.0, -1.0, 0.0),
            Face::Front => Vec3::new(0.0, 0.0, 1.0),
            Face::Back => Vec3::new(0.0, 0.0, -1.0),
            Face::Left => Vec3::new(-1.0, 0.0, 0.0),
            Face::Right => Vec3::new(1.0, 0.0, 0.0),
        }
    }

    /// In-plane axes `(u, v)` with `u x v == normal`, so quads laid out along
    /// them wind counter-clockwise when seen from outside.
    #[inline]
    pub fn tangents(self) -> (Vec3, Vec3) {
        const X: Vec3 = Vec3::new(1.0, 0.0, 0.0);
        const Y: Vec3 = Vec3::new(0.0, 1.0, 0.0);
        const Z: Vec3 = Vec3::new(0.0, 0.0, 1.0);
        match self {
            Face::Top => (Z, X),
            Face::Bottom => (X, Z),
            Face::Front => (X, Y),
            Face::Back => (Y, X),
            Face::Left => (Z, Y),
            Face::Right => (Y, Z),
        }
    }
}
