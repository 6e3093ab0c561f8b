//! Region-local coordinates.
//!
//! Local Y grows *downward*: `y = 0` is the top layer of a region and
//! `y = FINE_DEPTH - 1` the bottom one. X grows to the right and Z to the
//! front, matching world space. A region's origin is its world-space minimum
//! corner (left, bottom, back).

use minicube_geom::Vec3;
use minicube_mesh::Face;

/// Fine cells per region axis.
pub const FINE_DEPTH: usize = 32;
/// Coarse cells per region axis.
pub const COARSE_DEPTH: usize = 16;
/// Fine cells per coarse cell axis.
pub const COARSE_RATIO: usize = FINE_DEPTH / COARSE_DEPTH;
pub const FINE_VOLUME: usize = FINE_DEPTH * FINE_DEPTH * FINE_DEPTH;
pub const COARSE_VOLUME: usize = COARSE_DEPTH * COARSE_DEPTH * COARSE_DEPTH;
/// World-space edge length of one fine cell.
pub const CELL_SIZE: f32 = 0.25;
/// World-space edge length of a region.
pub const REGION_EXTENT: f32 = CELL_SIZE * FINE_DEPTH as f32;
/// Neighbor hops allowed while resolving an out-of-range coordinate.
pub const MAX_RESOLVE_HOPS: u32 = 10;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct FineCoord {
    x: usize,
    y: usize,
    z: usize,
}

impl FineCoord {
    #[inline]
    pub fn new(x: usize, y: usize, z: usize) -> Option<Self> {
        (x < FINE_DEPTH && y < FINE_DEPTH && z < FINE_DEPTH).then_some(Self { x, y, z })
    }

    /// Accepts signed coordinates; `None` if any axis falls outside the region.
    #[inline]
    pub fn from_i32(x: i32, y: i32, z: i32) -> Option<Self> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        let z = usize::try_from(z).ok()?;
        Self::new(x, y, z)
    }

    #[inline]
    pub(crate) const fn new_unchecked(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn x(self) -> usize {
        self.x
    }

    #[inline]
    pub fn y(self) -> usize {
        self.y
    }

    #[inline]
    pub fn z(self) -> usize {
        self.z
    }

    /// Linear index into a fine array: X fastest, then Z, then Y.
    #[inline]
    pub fn index(self) -> usize {
        self.x + self.z * FINE_DEPTH + self.y * FINE_DEPTH * FINE_DEPTH
    }

    /// The coarse cell covering this fine cell.
    #[inline]
    pub fn coarse(self) -> CoarseCoord {
        CoarseCoord::new_unchecked(
            self.x / COARSE_RATIO,
            self.y / COARSE_RATIO,
            self.z / COARSE_RATIO,
        )
    }

    /// Maps a world-space point inside the region at `origin` to its cell.
    pub fn from_world(origin: Vec3, p: Vec3) -> Option<Self> {
        let rel = (p - origin) / CELL_SIZE;
        let (fx, fy, fz) = (rel.x.floor(), rel.y.floor(), rel.z.floor());
        let depth = FINE_DEPTH as f32;
        if !(0.0..depth).contains(&fx) || !(0.0..depth).contains(&fy) || !(0.0..depth).contains(&fz) {
            return None;
        }
        let up = fy as usize;
        Self::new(fx as usize, FINE_DEPTH - 1 - up, fz as usize)
    }

    /// World-space center of this cell in the region at `origin`.
    #[inline]
    pub fn center(self, origin: Vec3) -> Vec3 {
        let up = (FINE_DEPTH - 1 - self.y) as f32;
        origin
            + Vec3::new(
                (self.x as f32 + 0.5) * CELL_SIZE,
                (up + 0.5) * CELL_SIZE,
                (self.z as f32 + 0.5) * CELL_SIZE,
            )
    }

    /// Every fine coordinate, Y outer, X middle, Z inner.
    pub fn iter_all() -> impl Iterator<Item = FineCoord> {
        (0..FINE_DEPTH).flat_map(|y| {
            (0..FINE_DEPTH)
                .flat_map(move |x| (0..FINE_DEPTH).map(move |z| FineCoord::new_unchecked(x, y, z)))
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CoarseCoord {
    x: usize,
    y: usize,
    z: usize,
}

impl CoarseCoord {
    #[inline]
    pub fn new(x: usize, y: usize, z: usize) -> Option<Self> {
        (x < COARSE_DEPTH && y < COARSE_DEPTH && z < COARSE_DEPTH).then_some(Self { x, y, z })
    }

    #[inline]
    pub(crate) const fn new_unchecked(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.x + self.z * COARSE_DEPTH + self.y * COARSE_DEPTH * COARSE_DEPTH
    }

    /// The fine cells covered by this coarse cell.
    pub fn fine_cells(self) -> impl Iterator<Item = FineCoord> {
        let (bx, by, bz) = (self.x * COARSE_RATIO, self.y * COARSE_RATIO, self.z * COARSE_RATIO);
        (0..COARSE_RATIO).flat_map(move |dy| {
            (0..COARSE_RATIO).flat_map(move |dx| {
                (0..COARSE_RATIO).map(move |dz| FineCoord::new_unchecked(bx + dx, by + dy, bz + dz))
            })
        })
    }
}

/// Local grid step across `face`. Top is `-1` on Y because Y grows downward.
#[inline]
pub fn local_step(face: Face) -> (i32, i32, i32) {
    match face {
        Face::Top => (0, -1, 0),
        Face::Bottom => (0, 1, 0),
        Face::Front => (0, 0, 1),
        Face::Back => (0, 0, -1),
        Face::Left => (-1, 0, 0),
        Face::Right => (1, 0, 0),
    }
}
