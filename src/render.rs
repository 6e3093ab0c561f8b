//! Upload and draw seam between region meshes and a GPU backend.

use hashbrown::HashMap;
use minicube_geom::Mat4;
use minicube_region::{RegionGraph, RegionId};

pub type MeshHandle = u32;

/// Minimal indexed-mesh API the renderer needs from a graphics backend.
pub trait GpuBackend {
    fn create_mesh(&mut self) -> MeshHandle;
    /// Replaces the buffers behind `handle`. Positions are packed xyz.
    fn upload(&mut self, handle: MeshHandle, positions: &[f32], indices: &[u32]);
    fn release(&mut self, handle: MeshHandle);
    fn draw_indexed(&mut self, handle: MeshHandle, index_count: usize);
}

pub trait ShaderProgram {
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4);
}

struct GpuSlot {
    handle: Option<MeshHandle>,
    revision: u64,
    index_count: usize,
}

/// Keeps one GPU mesh per region in step with the region's mesh revision.
#[derive(Default)]
pub struct RegionRenderer {
    slots: HashMap<RegionId, GpuSlot>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub uploads: usize,
    pub releases: usize,
}

impl RegionRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uploads regions whose mesh changed since the last sync and releases
    /// buffers of regions that no longer exist.
    pub fn sync(&mut self, graph: &RegionGraph, gpu: &mut impl GpuBackend) -> FrameStats {
        let mut stats = FrameStats::default();
        self.slots.retain(|id, slot| {
            if graph.get(*id).is_some() {
                return true;
            }
            if let Some(h) = slot.handle.take() {
                gpu.release(h);
                stats.releases += 1;
            }
            false
        });

        for id in graph.ids() {
            let Some(region) = graph.get(id) else { continue };
            let mesh = region.mesh();
            if self.slots.get(&id).is_some_and(|s| s.revision == mesh.revision()) {
                continue;
            }
            let slot = self.slots.entry(id).or_insert(GpuSlot {
                handle: None,
                revision: mesh.revision(),
                index_count: 0,
            });
            if let Some(h) = slot.handle.take() {
                gpu.release(h);
                stats.releases += 1;
            }
            slot.revision = mesh.revision();
            slot.index_count = mesh.index_count();
            if !mesh.is_empty() {
                let h = gpu.create_mesh();
                gpu.upload(h, mesh.positions(), mesh.indices());
                slot.handle = Some(h);
                stats.uploads += 1;
                log::trace!("uploaded region {} rev={} idx={}", id, slot.revision, slot.index_count);
            }
        }
        stats
    }

    /// Sets the frame uniforms and issues one draw per non-empty region.
    pub fn draw(
        &self,
        view: &Mat4,
        projection: &Mat4,
        program: &mut impl ShaderProgram,
        gpu: &mut impl GpuBackend,
    ) -> usize {
        program.set_uniform_mat4("view", view);
        program.set_uniform_mat4("projection", projection);
        let mut draws = 0;
        for slot in self.slots.values() {
            if let Some(h) = slot.handle {
                gpu.draw_indexed(h, slot.index_count);
                draws += 1;
            }
        }
        draws
    }

    /// Releases every GPU mesh.
    pub fn clear(&mut self, gpu: &mut impl GpuBackend) {
        for (_, slot) in self.slots.drain() {
            if let Some(h) = slot.handle {
                gpu.release(h);
            }
        }
    }
}

/// Backend that only tracks buffer sizes. Used without a window.
#[derive(Default, Debug)]
pub struct HeadlessBackend {
    next: MeshHandle,
    live: HashMap<MeshHandle, (usize, usize)>,
    pub uploads: usize,
    pub draws: usize,
    pub triangles: usize,
}

impl HeadlessBackend {
    pub fn live_meshes(&self) -> usize {
        self.live.len()
    }
}

impl GpuBackend for HeadlessBackend {
    fn create_mesh(&mut self) -> MeshHandle {
        let h = self.next;
        self.next += 1;
        self.live.insert(h, (0, 0));
        h
    }

    fn upload(&mut self, handle: MeshHandle, positions: &[f32], indices: &[u32]) {
        match self.live.get_mut(&handle) {
            Some(sizes) => {
                *sizes = (positions.len() / 3, indices.len());
                self.uploads += 1;
            }
            None => log::error!("upload to unknown mesh handle {}", handle),
        }
    }

    fn release(&mut self, handle: MeshHandle) {
        if self.live.remove(&handle).is_none() {
            log::error!("release of unknown mesh handle {}", handle);
        }
    }

    fn draw_indexed(&mut self, handle: MeshHandle, index_count: usize) {
        match self.live.get(&handle) {
            Some(&(_, n)) if n >= index_count => {
                self.draws += 1;
                self.triangles += index_count / 3;
            }
            _ => log::error!("draw of stale mesh handle {} ({} indices)", handle, index_count),
        }
    }
}

/// Remembers the last value set for each uniform.
#[derive(Default, Debug)]
pub struct RecordingProgram {
    pub uniforms: HashMap<String, Mat4>,
    pub sets: usize,
}

impl ShaderProgram for RecordingProgram {
    fn set_uniform_mat4(&mut self, name: &str, value: &Mat4) {
        self.uniforms.insert(name.to_string(), *value);
        self.sets += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minicube_geom::Vec3;
    use minicube_region::{CubeId, FineCoord};

    const STONE: CubeId = CubeId(1);

    fn graph() -> (RegionGraph, RegionId, RegionId) {
        let mut g = RegionGraph::new();
        let a = g.insert(Vec3::ZERO);
        let b = g.insert(Vec3::new(8.0, 0.0, 0.0));
        g.fill(a, STONE).unwrap();
        (g, a, b)
    }

    #[test]
    fn uploads_only_on_revision_change() {
        let (mut g, a, b) = graph();
        let mut r = RegionRenderer::new();
        let mut gpu = HeadlessBackend::default();

        let s = r.sync(&g, &mut gpu);
        assert_eq!(s.uploads, 1);
        assert_eq!(gpu.live_meshes(), 1);
        assert_eq!(r.sync(&g, &mut gpu), FrameStats::default());

        // A no-op fill leaves the revision alone.
        assert!(!g.fill(a, STONE).unwrap());
        assert_eq!(r.sync(&g, &mut gpu).uploads, 0);

        g.set_voxel(a, CubeId::AIR, FineCoord::new(0, 0, 0).unwrap()).unwrap();
        let s = r.sync(&g, &mut gpu);
        assert_eq!((s.uploads, s.releases), (1, 1));
        assert_eq!(gpu.live_meshes(), 1);

        g.set_voxel(b, STONE, FineCoord::new(1, 1, 1).unwrap()).unwrap();
        assert_eq!(r.sync(&g, &mut gpu).uploads, 1);
        assert_eq!(gpu.live_meshes(), 2);
        assert_eq!(gpu.uploads, 3);
    }

    #[test]
    fn draws_each_non_empty_region_with_uniforms() {
        let (g, a, _) = graph();
        let mut r = RegionRenderer::new();
        let mut gpu = HeadlessBackend::default();
        let mut prog = RecordingProgram::default();
        r.sync(&g, &mut gpu);

        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 5.0), Vec3::ZERO, Vec3::UP);
        let proj = Mat4::perspective_rh_gl(1.0, 1.5, 0.1, 100.0);
        assert_eq!(r.draw(&view, &proj, &mut prog, &mut gpu), 1);
        assert_eq!(prog.uniforms.get("view"), Some(&view));
        assert_eq!(prog.uniforms.get("projection"), Some(&proj));
        let faces = g.get(a).unwrap().mesh().face_count();
        assert_eq!(gpu.triangles, faces * 2);
    }

    #[test]
    fn removed_and_emptied_regions_release_buffers() {
        let (mut g, a, b) = graph();
        g.fill(b, STONE).unwrap();
        let mut r = RegionRenderer::new();
        let mut gpu = HeadlessBackend::default();
        r.sync(&g, &mut gpu);
        assert_eq!(gpu.live_meshes(), 2);

        g.fill(a, CubeId::AIR).unwrap();
        let s = r.sync(&g, &mut gpu);
        assert_eq!((s.uploads, s.releases), (0, 1));

        g.remove(b).unwrap();
        let s = r.sync(&g, &mut gpu);
        assert_eq!(s.releases, 1);
        assert_eq!(gpu.live_meshes(), 0);

        let mut prog = RecordingProgram::default();
        assert_eq!(r.draw(&Mat4::IDENTITY, &Mat4::IDENTITY, &mut prog, &mut gpu), 0);
        r.clear(&mut gpu);
        assert_eq!(gpu.live_meshes(), 0);
    }
}
