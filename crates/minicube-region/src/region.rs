use std::fmt;

use minicube_geom::{Aabb, Vec3};
use minicube_mesh::{Face, MeshBuffer};

use crate::coords::REGION_EXTENT;
use crate::storage::VoxelStorage;

/// Stable handle of a region inside a [`crate::RegionGraph`]. Never reused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub(crate) u32);

impl RegionId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Non-owning links to the six adjacent regions, indexed by [`Face`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Neighbors([Option<RegionId>; 6]);

impl Neighbors {
    #[inline]
    pub fn get(&self, face: Face) -> Option<RegionId> {
        self.0[face.index()]
    }

    #[inline]
    pub(crate) fn set(&mut self, face: Face, id: Option<RegionId>) {
        self.0[face.index()] = id;
    }

    /// Face holding `id`, searched in [`Face::ALL`] order.
    pub fn face_of(&self, id: RegionId) -> Option<Face> {
        Face::ALL.into_iter().find(|f| self.get(*f) == Some(id))
    }

    /// Linked neighbors in [`Face::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Face, RegionId)> + '_ {
        Face::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|id| (f, id)))
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.0.iter().filter(|n| n.is_some()).count()
    }
}

/// A 32³ cube of voxels with its mesh and neighbor links.
#[derive(Debug)]
pub struct Region {
    pub(crate) storage: VoxelStorage,
    pub(crate) mesh: MeshBuffer,
    pub(crate) neighbors: Neighbors,
}

impl Region {
    /// Fresh region filled with air, its mesh anchored at `origin`.
    pub fn new(origin: Vec3) -> Self {
        Self {
            storage: VoxelStorage::default(),
            mesh: MeshBuffer::new(origin),
            neighbors: Neighbors::default(),
        }
    }

    /// World-space minimum corner.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.mesh.origin()
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::cube(self.origin(), REGION_EXTENT)
    }

    #[inline]
    pub fn storage(&self) -> &VoxelStorage {
        &self.storage
    }

    #[inline]
    pub fn mesh(&self) -> &MeshBuffer {
        &self.mesh
    }

    #[inline]
    pub fn neighbors(&self) -> &Neighbors {
        &self.neighbors
    }

    #[inline]
    pub fn neighbor(&self, face: Face) -> Option<RegionId> {
        self.neighbors.get(face)
    }
}
