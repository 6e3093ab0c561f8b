use minicube_blocks::CubeId;
use minicube_geom::Vec3;
use minicube_mesh::{Face, MeshBuffer};

use crate::coords::{CoarseCoord, FineCoord};
use crate::error::{LinkError, RegionError};
use crate::region::{Region, RegionId};
use crate::storage::{Change, VoxelStorage};
use crate::surface::SurfaceStats;

/// Arena owning every region. Neighbor links are indices into it.
#[derive(Debug, Default)]
pub struct RegionGraph {
    slots: Vec<Option<Region>>,
}

impl RegionGraph {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Adds a fresh air-filled region with its minimum corner at `origin`.
    pub fn insert(&mut self, origin: Vec3) -> RegionId {
        let id = RegionId(self.slots.len() as u32);
        self.slots.push(Some(Region::new(origin)));
        id
    }

    /// Unlinks `id` from all neighbors and drops it. Neighbor meshes are not rebuilt.
    pub fn remove(&mut self, id: RegionId) -> Result<Region, RegionError> {
        let links: Vec<(Face, RegionId)> = self.region(id)?.neighbors.iter().collect();
        for (face, other) in links {
            if other != id {
                if let Some(r) = self.get_mut(other) {
                    r.neighbors.set(face.opposite(), None);
                }
            }
        }
        let mut region = self.slots[id.index()]
            .take()
            .ok_or(RegionError::RegionMissing(id))?;
        region.neighbors = Default::default();
        Ok(region)
    }

    #[inline]
    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.slots.get(id.index()).and_then(|s| s.as_ref())
    }

    #[inline]
    fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.slots.get_mut(id.index()).and_then(|s| s.as_mut())
    }

    #[inline]
    pub(crate) fn region(&self, id: RegionId) -> Result<&Region, RegionError> {
        self.get(id).ok_or(RegionError::RegionMissing(id))
    }

    #[inline]
    fn region_mut(&mut self, id: RegionId) -> Result<&mut Region, RegionError> {
        self.get_mut(id).ok_or(RegionError::RegionMissing(id))
    }

    /// Live region ids in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = RegionId> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| RegionId(i as u32))
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// First region whose bounds contain the world-space point.
    pub fn locate(&self, p: Vec3) -> Option<RegionId> {
        self.ids()
            .find(|id| self.get(*id).is_some_and(|r| r.bounds().contains(p)))
    }

    /// Links `dest` onto `src`'s `face` and `src` onto `dest`'s opposite face.
    pub fn connect(&mut self, src: RegionId, dest: RegionId, face: Face) -> Result<(), LinkError> {
        let s = self.get(src).ok_or(LinkError::RegionMissing(src))?;
        let d = self.get(dest).ok_or(LinkError::RegionMissing(dest))?;
        if s.neighbors.get(face).is_some() {
            return Err(LinkError::Conflict { face });
        }
        if d.neighbors.get(face.opposite()).is_some() {
            return Err(LinkError::Conflict {
                face: face.opposite(),
            });
        }
        if let Some(s) = self.get_mut(src) {
            s.neighbors.set(face, Some(dest));
        }
        if let Some(d) = self.get_mut(dest) {
            d.neighbors.set(face.opposite(), Some(src));
        }
        log::debug!("linked {} -{:?}-> {}", src, face, dest);
        Ok(())
    }

    /// Clears the link between two direct neighbors on both sides.
    pub fn disconnect(&mut self, src: RegionId, dest: RegionId) -> Result<Face, LinkError> {
        let s = self.get(src).ok_or(LinkError::RegionMissing(src))?;
        if self.get(dest).is_none() {
            return Err(LinkError::RegionMissing(dest));
        }
        let face = s.neighbors.face_of(dest).ok_or(LinkError::Absent)?;
        if let Some(s) = self.get_mut(src) {
            s.neighbors.set(face, None);
        }
        if let Some(d) = self.get_mut(dest) {
            d.neighbors.set(face.opposite(), None);
        }
        log::debug!("unlinked {} -{:?}-> {}", src, face, dest);
        Ok(face)
    }

    /// Makes the whole region one cube. Returns `false` if it already was.
    pub fn fill(&mut self, id: RegionId, cube: CubeId) -> Result<bool, RegionError> {
        self.edit(id, |s| Ok(s.fill(cube)))
    }

    /// Sets one fine cell. Returns `false` if it already held `cube`.
    pub fn set_voxel(&mut self, id: RegionId, cube: CubeId, at: FineCoord) -> Result<bool, RegionError> {
        self.edit(id, |s| s.set_fine(cube, at))
    }

    /// Sets the fine cell containing a world-space point.
    pub fn set_voxel_at(&mut self, id: RegionId, cube: CubeId, p: Vec3) -> Result<bool, RegionError> {
        let origin = self.region(id)?.origin();
        let at = FineCoord::from_world(origin, p).ok_or(RegionError::OutOfBounds)?;
        self.set_voxel(id, cube, at)
    }

    /// Sets a 2×2×2 block addressed by a coarse coordinate.
    pub fn set_cube(&mut self, id: RegionId, cube: CubeId, at: CoarseCoord) -> Result<bool, RegionError> {
        self.edit(id, |s| s.set_coarse(cube, at))
    }

    /// Applies a storage edit, then rebuilds the region and its neighbors.
    /// If any rebuild fails the edit is reverted and no mesh is touched.
    fn edit(
        &mut self,
        id: RegionId,
        op: impl FnOnce(&mut VoxelStorage) -> Result<Change, RegionError>,
    ) -> Result<bool, RegionError> {
        let region = self.region_mut(id)?;
        let revert = match op(&mut region.storage)? {
            Change::Unchanged => return Ok(false),
            Change::Changed(r) => r,
        };
        match self.build_affected(id) {
            Ok(built) => {
                for (rid, mesh, _) in built {
                    if let Some(r) = self.get_mut(rid) {
                        r.mesh.install(mesh);
                    }
                }
                Ok(true)
            }
            Err(e) => {
                if let Some(r) = self.get_mut(id) {
                    r.storage.revert(revert);
                }
                log::warn!("edit of region {} rolled back: {}", id, e);
                Err(e)
            }
        }
    }

    /// Rebuilds `id` and every region linked to it.
    pub fn rebuild_with_neighbors(&mut self, id: RegionId) -> Result<SurfaceStats, RegionError> {
        let built = self.build_affected(id)?;
        let mut own = SurfaceStats::default();
        for (rid, mesh, stats) in built {
            if rid == id {
                own = stats;
            }
            if let Some(r) = self.get_mut(rid) {
                r.mesh.install(mesh);
            }
        }
        Ok(own)
    }

    /// Extracts meshes for `id` and its distinct neighbors without installing them.
    fn build_affected(
        &self,
        id: RegionId,
    ) -> Result<Vec<(RegionId, MeshBuffer, SurfaceStats)>, RegionError> {
        let mut targets = vec![id];
        for (_, n) in self.region(id)?.neighbors.iter() {
            if !targets.contains(&n) {
                targets.push(n);
            }
        }
        targets
            .into_iter()
            .map(|rid| {
                let (mesh, stats) = self.extract_surface(rid)?;
                Ok((rid, mesh, stats))
            })
            .collect()
    }

    /// Rebuilds a single region's mesh from its voxels.
    pub fn rebuild_mesh(&mut self, id: RegionId) -> Result<SurfaceStats, RegionError> {
        let (mesh, stats) = self.extract_surface(id)?;
        self.region_mut(id)?.mesh.install(mesh);
        Ok(stats)
    }
}
