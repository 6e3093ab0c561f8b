//! Variable-density voxel storage for one region.
//!
//! A region starts as a single identifier covering all of its cells and only
//! allocates a dense array once an edit needs one. Resolution is only ever
//! broadened automatically (Uniform → Coarse → Fine); `fill` is the one way
//! back to Uniform.

use minicube_blocks::CubeId;

use crate::coords::{COARSE_VOLUME, CoarseCoord, FINE_VOLUME, FineCoord};
use crate::error::RegionError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StorageMode {
    Uniform,
    Coarse,
    Fine,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VoxelStorage {
    /// One identifier for every cell.
    Uniform(CubeId),
    /// `COARSE_DEPTH³` identifiers, each covering a 2×2×2 fine block.
    Coarse(Box<[CubeId]>),
    /// `FINE_DEPTH³` identifiers.
    Fine(Box<[CubeId]>),
}

impl Default for VoxelStorage {
    fn default() -> Self {
        VoxelStorage::Uniform(CubeId::AIR)
    }
}

/// Outcome of a storage edit. `Changed` carries what is needed to undo it.
#[must_use]
#[derive(Debug)]
pub enum Change {
    Unchanged,
    Changed(Revert),
}

impl Change {
    #[inline]
    pub fn is_changed(&self) -> bool {
        matches!(self, Change::Changed(_))
    }
}

#[derive(Debug)]
pub struct Revert(RevertKind);

#[derive(Debug)]
enum RevertKind {
    Storage(VoxelStorage),
    Cell { index: usize, prev: CubeId },
    Cells(Vec<(usize, CubeId)>),
}

fn dense(len: usize, id: CubeId) -> Result<Vec<CubeId>, RegionError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| RegionError::Allocation { requested: len })?;
    v.resize(len, id);
    Ok(v)
}

impl VoxelStorage {
    #[inline]
    pub fn mode(&self) -> StorageMode {
        match self {
            VoxelStorage::Uniform(_) => StorageMode::Uniform,
            VoxelStorage::Coarse(_) => StorageMode::Coarse,
            VoxelStorage::Fine(_) => StorageMode::Fine,
        }
    }

    /// The fill identifier when the storage is uniform.
    #[inline]
    pub fn uniform_id(&self) -> Option<CubeId> {
        match self {
            VoxelStorage::Uniform(id) => Some(*id),
            _ => None,
        }
    }

    #[inline]
    pub fn read(&self, c: FineCoord) -> CubeId {
        match self {
            VoxelStorage::Uniform(id) => *id,
            VoxelStorage::Coarse(cells) => cells[c.coarse().index()],
            VoxelStorage::Fine(cells) => cells[c.index()],
        }
    }

    /// Sets every cell to `id`, dropping any dense array.
    pub fn fill(&mut self, id: CubeId) -> Change {
        if self.uniform_id() == Some(id) {
            return Change::Unchanged;
        }
        let prev = std::mem::replace(self, VoxelStorage::Uniform(id));
        Change::Changed(Revert(RevertKind::Storage(prev)))
    }

    /// Sets one fine cell, broadening Uniform or Coarse storage to Fine first.
    pub fn set_fine(&mut self, id: CubeId, c: FineCoord) -> Result<Change, RegionError> {
        if self.read(c) == id {
            return Ok(Change::Unchanged);
        }
        if let VoxelStorage::Fine(cells) = self {
            let prev = std::mem::replace(&mut cells[c.index()], id);
            return Ok(Change::Changed(Revert(RevertKind::Cell {
                index: c.index(),
                prev,
            })));
        }
        let mut cells = self.to_fine()?;
        cells[c.index()] = id;
        let prev = std::mem::replace(self, VoxelStorage::Fine(cells.into_boxed_slice()));
        Ok(Change::Changed(Revert(RevertKind::Storage(prev))))
    }

    /// Sets the 2×2×2 block under a coarse cell. Uniform storage broadens to
    /// Coarse; Fine storage writes the covered fine cells.
    pub fn set_coarse(&mut self, id: CubeId, c: CoarseCoord) -> Result<Change, RegionError> {
        if c.fine_cells().all(|f| self.read(f) == id) {
            return Ok(Change::Unchanged);
        }
        match self {
            VoxelStorage::Uniform(fill) => {
                let mut cells = dense(COARSE_VOLUME, *fill)?;
                cells[c.index()] = id;
                let prev = std::mem::replace(self, VoxelStorage::Coarse(cells.into_boxed_slice()));
                Ok(Change::Changed(Revert(RevertKind::Storage(prev))))
            }
            VoxelStorage::Coarse(cells) => {
                let prev = std::mem::replace(&mut cells[c.index()], id);
                Ok(Change::Changed(Revert(RevertKind::Cell {
                    index: c.index(),
                    prev,
                })))
            }
            VoxelStorage::Fine(cells) => {
                let prev = c
                    .fine_cells()
                    .map(|f| (f.index(), std::mem::replace(&mut cells[f.index()], id)))
                    .collect();
                Ok(Change::Changed(Revert(RevertKind::Cells(prev))))
            }
        }
    }

    /// Undoes the edit that produced `r`. Must be applied before any later edit.
    pub fn revert(&mut self, r: Revert) {
        match (r.0, self) {
            (RevertKind::Storage(prev), this) => *this = prev,
            (RevertKind::Cell { index, prev }, VoxelStorage::Coarse(cells))
            | (RevertKind::Cell { index, prev }, VoxelStorage::Fine(cells)) => cells[index] = prev,
            (RevertKind::Cells(prev), VoxelStorage::Fine(cells)) => {
                for (index, id) in prev {
                    cells[index] = id;
                }
            }
            (kind, this) => {
                log::warn!("revert {:?} does not match {:?} storage", kind, this.mode());
            }
        }
    }

    /// Full-resolution copy of the current contents.
    fn to_fine(&self) -> Result<Vec<CubeId>, RegionError> {
        match self {
            VoxelStorage::Uniform(id) => dense(FINE_VOLUME, *id),
            VoxelStorage::Coarse(coarse) => {
                let mut cells = dense(FINE_VOLUME, CubeId::AIR)?;
                for f in FineCoord::iter_all() {
                    cells[f.index()] = coarse[f.coarse().index()];
                }
                Ok(cells)
            }
            VoxelStorage::Fine(cells) => {
                let mut out = dense(FINE_VOLUME, CubeId::AIR)?;
                out.copy_from_slice(cells);
                Ok(out)
            }
        }
    }
}
