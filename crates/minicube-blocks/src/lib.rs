//! Cube identifiers, query results and the name registry.
#![forbid(unsafe_code)]

pub mod config;
pub mod registry;
pub mod types;

pub use registry::CubeRegistry;
pub use types::{CubeId, Occupant};
