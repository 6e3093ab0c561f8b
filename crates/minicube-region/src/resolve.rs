use minicube_blocks::Occupant;
use minicube_mesh::Face;

use crate::coords::{FINE_DEPTH, FineCoord, MAX_RESOLVE_HOPS};
use crate::graph::RegionGraph;
use crate::region::RegionId;

impl RegionGraph {
    /// Occupant of a fine coordinate relative to `id`, following neighbor
    /// links when the coordinate lies outside the region.
    ///
    /// Missing neighbors read as air. Giving up after [`MAX_RESOLVE_HOPS`]
    /// hops (or reaching a removed region) yields [`Occupant::Error`].
    pub fn resolve(&self, id: RegionId, x: i32, y: i32, z: i32) -> Occupant {
        self.resolve_from(Some(id), x, y, z, 0)
    }

    /// Same as [`RegionGraph::resolve`] with `hops` already spent.
    pub fn resolve_from(
        &self,
        start: Option<RegionId>,
        mut x: i32,
        mut y: i32,
        mut z: i32,
        mut hops: u32,
    ) -> Occupant {
        const N: i32 = FINE_DEPTH as i32;
        let mut at = start;
        loop {
            if hops >= MAX_RESOLVE_HOPS {
                log::warn!(
                    "resolve gave up after {} hops at ({}, {}, {}) from {:?}",
                    hops,
                    x,
                    y,
                    z,
                    start
                );
                return Occupant::Error;
            }
            let Some(id) = at else {
                return Occupant::Air;
            };
            let Some(region) = self.get(id) else {
                log::warn!("resolve reached missing region {}", id);
                return Occupant::Error;
            };

            if let Some(c) = FineCoord::from_i32(x, y, z) {
                return Occupant::from(region.storage.read(c));
            }

            // One axis per hop: X, then Y (inverted), then Z.
            let face = if x >= N {
                x -= N;
                Face::Right
            } else if x < 0 {
                x += N;
                Face::Left
            } else if y < 0 {
                y += N;
                Face::Top
            } else if y >= N {
                y -= N;
                Face::Bottom
            } else if z >= N {
                z -= N;
                Face::Front
            } else {
                z += N;
                Face::Back
            };
            at = region.neighbor(face);
            hops += 1;
        }
    }
}
