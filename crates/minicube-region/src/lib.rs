//! Regions: 32³ voxel cubes with hybrid storage, linked to six neighbors,
//! and the surface extractor that turns them into meshes.
#![forbid(unsafe_code)]

pub mod coords;
mod error;
mod graph;
mod region;
mod resolve;
pub mod storage;
mod surface;

pub use coords::{CoarseCoord, FineCoord};
pub use error::{LinkError, RegionError};
pub use graph::RegionGraph;
pub use region::{Neighbors, Region, RegionId};
pub use storage::{StorageMode, VoxelStorage};
pub use surface::SurfaceStats;

pub use minicube_blocks::{CubeId, Occupant};
pub use minicube_mesh::{Face, MeshBuffer};
