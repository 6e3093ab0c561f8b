//! Headless driver: builds a grid of regions, edits it and runs the draw loop.
#![forbid(unsafe_code)]

mod camera;
mod config;
mod render;
mod world;

use std::error::Error;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use minicube_blocks::CubeRegistry;
use minicube_geom::Vec3;

use camera::FlyCamera;
use config::AppConfig;
use render::{HeadlessBackend, RecordingProgram, RegionRenderer};
use world::World;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Grid([u32; 3]);

impl FromStr for Grid {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('x').collect();
        let [x, y, z] = parts.as_slice() else {
            return Err(format!("expected XxYxZ, got '{}'", s));
        };
        let parse = |p: &str| match p.trim().parse::<u32>() {
            Ok(0) => Err("grid dimensions must be non-zero".to_string()),
            Ok(n) => Ok(n),
            Err(e) => Err(format!("bad grid dimension '{}': {}", p, e)),
        };
        Ok(Grid([parse(*x)?, parse(*y)?, parse(*z)?]))
    }
}

#[derive(Parser, Debug)]
#[command(name = "minicube", about = "Multi-resolution voxel region renderer (headless)")]
struct Args {
    /// Path to the TOML config; defaults are used if it is missing
    #[arg(long, default_value = "minicube.toml")]
    config: PathBuf,
    /// Number of frames to run
    #[arg(long)]
    frames: Option<u32>,
    /// Region grid, e.g. 3x1x3
    #[arg(long)]
    grid: Option<Grid>,
    /// Separate `[[cubes]]` file replacing the config's cube list
    #[arg(long)]
    cubes: Option<PathBuf>,
}

fn load_registry(cubes: Option<&Path>, cfg: &AppConfig) -> Result<CubeRegistry, Box<dyn Error>> {
    match cubes {
        Some(path) => {
            log::info!("loading cubes from {}", path.display());
            CubeRegistry::load_from_path(path)
        }
        None => CubeRegistry::from_config(cfg.cubes_config()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
    let args = Args::parse();

    let mut cfg = AppConfig::load_or_default(&args.config)?;
    if let Some(Grid(g)) = args.grid {
        cfg.world.grid = g;
    }
    if let Some(n) = args.frames {
        cfg.run.frames = n;
    }

    let registry = load_registry(args.cubes.as_deref(), &cfg)?;
    log::info!("registered {} cube types", registry.len());
    let mut world = World::build(&cfg.world, registry)?;

    let [px, py, pz] = cfg.camera.position;
    let mut cam = FlyCamera::new(Vec3::new(px, py, pz));
    cam.yaw = cfg.camera.yaw;
    cam.pitch = cfg.camera.pitch;
    cam.fov_deg = cfg.camera.fov_deg;
    let projection = cam.projection(cfg.run.aspect, cfg.camera.near, cfg.camera.far);

    let mut renderer = RegionRenderer::new();
    let mut gpu = HeadlessBackend::default();
    let mut program = RecordingProgram::default();
    let spin_steps = cfg.run.spin / cam.mouse_sensitivity;

    for frame in 0..cfg.run.frames {
        // Halfway through, dig beneath the camera to show incremental uploads.
        if frame == cfg.run.frames / 2 {
            let below = Vec3::new(cam.position.x, 7.9, cam.position.z);
            if world.graph.locate(below).is_some() {
                world.apply_edit(below, "air")?;
            }
        }
        cam.look(spin_steps, 0.0);
        cam.translate(cam.right() * cfg.run.strafe);
        let sync = renderer.sync(&world.graph, &mut gpu);
        let draws = renderer.draw(&cam.view_matrix(), &projection, &mut program, &mut gpu);
        if sync.uploads > 0 || sync.releases > 0 {
            log::debug!(
                target: "events",
                "[frame {}] uploads={} releases={} draws={}",
                frame,
                sync.uploads,
                sync.releases,
                draws
            );
        }
    }

    log::info!(
        "ran {} frames: {} regions, {} faces, {} live meshes, {} uploads, {} draws, {} triangles, {} uniform sets",
        cfg.run.frames,
        world.graph.len(),
        world.face_count(),
        gpu.live_meshes(),
        gpu.uploads,
        gpu.draws,
        gpu.triangles,
        program.sets
    );
    renderer.clear(&mut gpu);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_parses() {
        assert_eq!("3x1x2".parse::<Grid>(), Ok(Grid([3, 1, 2])));
        assert!("3x1".parse::<Grid>().is_err());
        assert!("3x0x2".parse::<Grid>().is_err());
        assert!("axbxc".parse::<Grid>().is_err());
    }

    #[test]
    fn args_accept_overrides() {
        let args = Args::try_parse_from(["minicube", "--frames", "3", "--grid", "1x2x1"]).unwrap();
        assert_eq!(args.frames, Some(3));
        assert_eq!(args.grid, Some(Grid([1, 2, 1])));
        assert_eq!(args.config, PathBuf::from("minicube.toml"));
        assert_eq!(args.cubes, None);
    }

    #[test]
    fn cubes_file_replaces_config_list() {
        let path = std::env::temp_dir().join(format!("minicube-main-{}.toml", std::process::id()));
        std::fs::write(&path, "[[cubes]]\nname = \"basalt\"\n").unwrap();
        let args = Args::try_parse_from(["minicube", "--cubes", path.to_str().unwrap()]).unwrap();
        let cfg = AppConfig::default();
        let reg = load_registry(args.cubes.as_deref(), &cfg);
        std::fs::remove_file(&path).unwrap();
        let reg = reg.unwrap();
        assert!(reg.id_by_name("basalt").is_some());
        assert!(reg.id_by_name("stone").is_none());

        let reg = load_registry(None, &cfg).unwrap();
        assert!(reg.id_by_name("stone").is_some());
        assert!(load_registry(Some(Path::new("/nonexistent/cubes.toml")), &cfg).is_err());
    }
}
