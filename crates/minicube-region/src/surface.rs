use minicube_blocks::Occupant;
use minicube_mesh::{Face, MeshBuffer};

use crate::coords::{CELL_SIZE, FineCoord, local_step};
use crate::error::RegionError;
use crate::graph::RegionGraph;
use crate::region::RegionId;

#[cfg(test)]
thread_local! {
    /// Region whose extraction fails with an allocation error.
    pub(crate) static FAIL_EXTRACT: std::cell::Cell<Option<RegionId>> =
        const { std::cell::Cell::new(None) };
}

/// Counters from one surface extraction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SurfaceStats {
    pub faces: usize,
    pub solid_cells: usize,
    /// Faces whose neighbor could not be resolved and were left out.
    pub unresolved: usize,
}

impl RegionGraph {
    /// Builds a fresh mesh for `id` without installing it.
    ///
    /// Cells are scanned Y outer, X middle, Z inner and each solid cell tests
    /// its faces in [`Face::ALL`] order, emitting a quad wherever the
    /// neighboring cell (possibly in another region) is air.
    pub fn extract_surface(&self, id: RegionId) -> Result<(MeshBuffer, SurfaceStats), RegionError> {
        let region = self.region(id)?;
        #[cfg(test)]
        if FAIL_EXTRACT.with(|f| f.get()) == Some(id) {
            return Err(RegionError::Allocation { requested: 0 });
        }
        let origin = region.origin();
        let mut mesh = MeshBuffer::new(origin);
        let mut stats = SurfaceStats::default();

        if region.storage.uniform_id().is_some_and(|c| c.is_air()) {
            return Ok((mesh, stats));
        }

        let half = CELL_SIZE / 2.0;
        for c in FineCoord::iter_all() {
            if region.storage.read(c).is_air() {
                continue;
            }
            stats.solid_cells += 1;
            let (x, y, z) = (c.x() as i32, c.y() as i32, c.z() as i32);
            for face in Face::ALL {
                let (dx, dy, dz) = local_step(face);
                match self.resolve(id, x + dx, y + dy, z + dz) {
                    Occupant::Air => {
                        mesh.add_face(face, c.center(origin), half)?;
                        stats.faces += 1;
                    }
                    Occupant::Error => stats.unresolved += 1,
                    Occupant::Id(_) => {}
                }
            }
        }

        if stats.unresolved > 0 {
            log::warn!(
                "region {}: skipped {} faces with unresolved neighbors",
                id,
                stats.unresolved
            );
        }
        log::debug!(
            "region {}: {} faces from {} solid cells",
            id,
            stats.faces,
            stats.solid_cells
        );
        Ok((mesh, stats))
    }
}
