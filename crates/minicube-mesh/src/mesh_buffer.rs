use minicube_geom::Vec3;

use crate::error::MeshError;
use crate::face::Face;

pub const VERTS_PER_FACE: usize = 4;
pub const INDICES_PER_FACE: usize = 6;
/// Two triangles over the four corners `(-u,-v) (+u,-v) (-u,+v) (+u,+v)`.
pub const FACE_INDEX_PATTERN: [u32; INDICES_PER_FACE] = [0, 1, 3, 0, 3, 2];

/// Owned vertex positions and triangle indices for one region.
///
/// `origin` is informational; positions are already in world space.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    origin: Vec3,
    pos: Vec<f32>,
    idx: Vec<u32>,
    revision: u64,
}

impl MeshBuffer {
    pub fn new(origin: Vec3) -> Self {
        Self {
            origin,
            pos: Vec::new(),
            idx: Vec::new(),
            revision: 0,
        }
    }

    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Interleaved vertex positions (x,y,z per vertex).
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.idx
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn index_count(&self) -> usize {
        self.idx.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.idx.len() / INDICES_PER_FACE
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty()
    }

    /// Bumped every time the contents are replaced or cleared.
    #[inline]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Pre-reserve space for `n_faces` more faces.
    pub fn reserve_faces(&mut self, n_faces: usize) -> Result<(), MeshError> {
        let verts = n_faces * VERTS_PER_FACE * 3;
        let idx = n_faces * INDICES_PER_FACE;
        self.pos
            .try_reserve(verts)
            .map_err(|e| MeshError::alloc(verts, e))?;
        self.idx
            .try_reserve(idx)
            .map_err(|e| MeshError::alloc(idx, e))?;
        Ok(())
    }

    /// Appends one square face centered on a cube at `center` with half-extent `half`.
    pub fn add_face(&mut self, face: Face, center: Vec3, half: f32) -> Result<(), MeshError> {
        let base = self.vertex_count();
        let last = base + VERTS_PER_FACE - 1;
        if u32::try_from(last).is_err() {
            return Err(MeshError::IndexOverflow { vertices: last + 1 });
        }
        self.reserve_faces(1)?;

        let n = face.normal();
        let (u, v) = face.tangents();
        let c = center + n * half;
        let (u, v) = (u * half, v * half);
        for corner in [c - u - v, c + u - v, c - u + v, c + u + v] {
            self.pos.extend_from_slice(&corner.to_array());
        }
        let base = base as u32;
        self.idx
            .extend(FACE_INDEX_PATTERN.iter().map(|i| base + i));
        Ok(())
    }

    /// Replaces the vertex list, dropping the old one.
    pub fn replace_vertices(&mut self, pos: Vec<f32>) -> Result<(), MeshError> {
        if pos.len() % 3 != 0 {
            return Err(MeshError::Malformed("vertex list length is not a multiple of 3"));
        }
        self.pos = pos;
        self.revision += 1;
        Ok(())
    }

    /// Replaces the index list, dropping the old one.
    pub fn replace_indices(&mut self, idx: Vec<u32>) -> Result<(), MeshError> {
        if idx.len() % 3 != 0 {
            return Err(MeshError::Malformed("index list length is not a multiple of 3"));
        }
        self.idx = idx;
        self.revision += 1;
        Ok(())
    }

    /// Installs the contents of a freshly built buffer, keeping this buffer's origin.
    pub fn install(&mut self, built: MeshBuffer) {
        self.pos = built.pos;
        self.idx = built.idx;
        self.revision += 1;
        log::trace!(
            "mesh at ({}, {}, {}) installed rev {} with {} faces",
            self.origin.x,
            self.origin.y,
            self.origin.z,
            self.revision,
            self.face_count()
        );
    }

    /// Releases both lists.
    pub fn clear(&mut self) {
        self.pos = Vec::new();
        self.idx = Vec::new();
        self.revision += 1;
    }
}
