use std::error::Error;

use minicube_blocks::CubeRegistry;
use minicube_geom::Vec3;
use minicube_region::coords::REGION_EXTENT;
use minicube_region::{Face, RegionGraph, RegionId};

use crate::config::WorldConfig;

/// A rectangular grid of linked regions plus the cube names used to edit it.
pub struct World {
    pub graph: RegionGraph,
    pub registry: CubeRegistry,
    dims: [u32; 3],
    ids: Vec<RegionId>,
}

impl World {
    /// Fills every grid cell with a region of `cfg.fill`, links neighbors,
    /// meshes once, then applies the configured edits.
    pub fn build(cfg: &WorldConfig, registry: CubeRegistry) -> Result<Self, Box<dyn Error>> {
        let fill = registry
            .id_by_name(&cfg.fill)
            .ok_or_else(|| format!("unknown fill cube '{}'", cfg.fill))?;
        let [nx, ny, nz] = cfg.grid;
        let mut graph = RegionGraph::new();
        let mut ids = Vec::with_capacity((nx * ny * nz) as usize);
        for gz in 0..nz {
            for gy in 0..ny {
                for gx in 0..nx {
                    let origin = Vec3::new(gx as f32, gy as f32, gz as f32) * REGION_EXTENT;
                    let id = graph.insert(origin);
                    // No links yet, so this meshes only the new region.
                    graph.fill(id, fill)?;
                    ids.push(id);
                }
            }
        }
        let mut world = Self {
            graph,
            registry,
            dims: cfg.grid,
            ids,
        };
        world.link_grid()?;
        for id in world.ids.clone() {
            world.graph.rebuild_mesh(id)?;
        }
        log::info!(
            "built {}x{}x{} regions of {} ({} faces)",
            nx,
            ny,
            nz,
            cfg.fill,
            world.face_count()
        );
        for edit in &cfg.edits {
            let [x, y, z] = edit.at;
            world.apply_edit(Vec3::new(x, y, z), &edit.cube)?;
        }
        Ok(world)
    }

    fn link_grid(&mut self) -> Result<(), Box<dyn Error>> {
        let [nx, ny, nz] = self.dims;
        for gz in 0..nz {
            for gy in 0..ny {
                for gx in 0..nx {
                    let Some(here) = self.region_at(gx, gy, gz) else { continue };
                    let steps = [
                        (gx + 1, gy, gz, Face::Right),
                        (gx, gy + 1, gz, Face::Top),
                        (gx, gy, gz + 1, Face::Front),
                    ];
                    for (x, y, z, face) in steps {
                        if let Some(there) = self.region_at(x, y, z) {
                            self.graph.connect(here, there, face)?;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Region at grid coordinates, `gy` counting upward.
    pub fn region_at(&self, gx: u32, gy: u32, gz: u32) -> Option<RegionId> {
        let [nx, ny, nz] = self.dims;
        if gx >= nx || gy >= ny || gz >= nz {
            return None;
        }
        self.ids.get((gx + gy * nx + gz * nx * ny) as usize).copied()
    }

    /// Sets the cell containing a world-space point to the named cube.
    pub fn apply_edit(&mut self, at: Vec3, cube: &str) -> Result<bool, Box<dyn Error>> {
        let id = self
            .registry
            .id_by_name(cube)
            .ok_or_else(|| format!("unknown cube '{}'", cube))?;
        let region = self
            .graph
            .locate(at)
            .ok_or_else(|| format!("no region contains {:?}", at))?;
        let changed = self.graph.set_voxel_at(region, id, at)?;
        log::info!(target: "events", "SetVoxel {:?} in {} cube={} changed={}", at, region, cube, changed);
        Ok(changed)
    }

    pub fn face_count(&self) -> usize {
        self.graph
            .ids()
            .filter_map(|id| self.graph.get(id))
            .map(|r| r.mesh().face_count())
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditConfig;
    use minicube_blocks::config::{CubeDef, CubesConfig};

    fn registry() -> CubeRegistry {
        CubeRegistry::from_config(CubesConfig {
            cubes: vec![
                CubeDef { name: "stone".into(), id: None },
                CubeDef { name: "grass".into(), id: None },
            ],
        })
        .unwrap()
    }

    fn flat(grid: [u32; 3], edits: Vec<EditConfig>) -> WorldConfig {
        WorldConfig {
            grid,
            fill: "stone".into(),
            edits,
        }
    }

    #[test]
    fn grid_links_hide_inner_faces() {
        let world = World::build(&flat([2, 1, 2], vec![]), registry()).unwrap();
        assert_eq!(world.graph.len(), 4);
        // Each region keeps its two outer sides plus top and bottom.
        assert_eq!(world.face_count(), 4 * 4 * 1024);
        let a = world.region_at(0, 0, 0).unwrap();
        let b = world.region_at(1, 0, 0).unwrap();
        assert_eq!(world.graph.get(a).unwrap().neighbor(Face::Right), Some(b));
        assert!(world.region_at(2, 0, 0).is_none());
    }

    #[test]
    fn vertical_stack_links_top() {
        let world = World::build(&flat([1, 2, 1], vec![]), registry()).unwrap();
        let lower = world.region_at(0, 0, 0).unwrap();
        let upper = world.region_at(0, 1, 0).unwrap();
        assert_eq!(world.graph.get(lower).unwrap().neighbor(Face::Top), Some(upper));
        assert_eq!(world.face_count(), 2 * 5 * 1024);
    }

    #[test]
    fn digging_the_top_layer_exposes_a_pit() {
        let edits = vec![EditConfig {
            at: [4.1, 7.9, 4.1],
            cube: "air".into(),
        }];
        let world = World::build(&flat([2, 1, 2], edits), registry()).unwrap();
        assert_eq!(world.face_count(), 4 * 4 * 1024 + 4);
    }

    #[test]
    fn unknown_names_are_errors() {
        let mut world = World::build(&flat([1, 1, 1], vec![]), registry()).unwrap();
        assert!(world.apply_edit(Vec3::splat(1.0), "lava").is_err());
        assert!(world.apply_edit(Vec3::splat(-1.0), "grass").is_err());
        assert!(world.apply_edit(Vec3::splat(1.0), "grass").unwrap());
        assert!(!world.apply_edit(Vec3::splat(1.0), "grass").unwrap());

        let mut cfg = flat([1, 1, 1], vec![]);
        cfg.fill = "lava".into();
        assert!(World::build(&cfg, registry()).is_err());
    }
}
