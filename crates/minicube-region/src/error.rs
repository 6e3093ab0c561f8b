use std::fmt;

use minicube_mesh::{Face, MeshError};

use crate::region::RegionId;

/// Failures of storage mutation and mesh rebuilds. State is left unchanged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegionError {
    /// A dense storage array could not be allocated.
    Allocation { requested: usize },
    Mesh(MeshError),
    RegionMissing(RegionId),
    /// A world-space position lies outside the addressed region.
    OutOfBounds,
}

impl fmt::Display for RegionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionError::Allocation { requested } => {
                write!(f, "voxel storage allocation of {} cells failed", requested)
            }
            RegionError::Mesh(e) => write!(f, "mesh rebuild failed: {}", e),
            RegionError::RegionMissing(id) => write!(f, "region {} does not exist", id),
            RegionError::OutOfBounds => write!(f, "position lies outside the region"),
        }
    }
}

impl std::error::Error for RegionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegionError::Mesh(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MeshError> for RegionError {
    fn from(e: MeshError) -> Self {
        RegionError::Mesh(e)
    }
}

/// Failures of neighbor link maintenance. No link is changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkError {
    /// One endpoint already has a neighbor on the requested face.
    Conflict { face: Face },
    /// The regions are not direct neighbors.
    Absent,
    RegionMissing(RegionId),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Conflict { face } => write!(f, "{:?} link already occupied", face),
            LinkError::Absent => write!(f, "regions are not neighbors"),
            LinkError::RegionMissing(id) => write!(f, "region {} does not exist", id),
        }
    }
}

impl std::error::Error for LinkError {}
