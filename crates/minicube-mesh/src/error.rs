use std::collections::TryReserveError;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// Growing a vertex or index list failed.
    Allocation { requested: usize },
    /// Vertex count no longer fits the index type.
    IndexOverflow { vertices: usize },
    /// A replacement list is not a valid vertex/index list.
    Malformed(&'static str),
}

impl MeshError {
    pub(crate) fn alloc(requested: usize, _e: TryReserveError) -> Self {
        MeshError::Allocation { requested }
    }
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Allocation { requested } => {
                write!(f, "mesh allocation of {} elements failed", requested)
            }
            MeshError::IndexOverflow { vertices } => {
                write!(f, "{} vertices overflow 32-bit indices", vertices)
            }
            MeshError::Malformed(msg) => write!(f, "malformed mesh data: {}", msg),
        }
    }
}

impl std::error::Error for MeshError {}
