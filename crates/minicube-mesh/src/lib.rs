//! CPU-side mesh buffers: one quad per visible cube face.
#![forbid(unsafe_code)]

mod error;
mod face;
mod mesh_buffer;

pub use error::MeshError;
pub use face::Face;
pub use mesh_buffer::{FACE_INDEX_PATTERN, INDICES_PER_FACE, MeshBuffer, VERTS_PER_FACE};
