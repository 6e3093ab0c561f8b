use std::error::Error;
use std::fs;
use std::path::Path;

use minicube_blocks::config::{CubeDef, CubesConfig};
use serde::Deserialize;

/// Contents of `minicube.toml`. Every table is optional.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub camera: CameraConfig,
    pub run: RunConfig,
    pub cubes: Vec<CubeDef>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Regions along x, y (up) and z.
    pub grid: [u32; 3],
    /// Cube name every region starts filled with.
    pub fill: String,
    /// World-space single-cell edits applied after the fill.
    pub edits: Vec<EditConfig>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct EditConfig {
    pub at: [f32; 3],
    pub cube: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub frames: u32,
    pub aspect: f32,
    /// Yaw change per frame, in degrees.
    pub spin: f32,
    /// Sideways camera drift per frame, in world units.
    pub strafe: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            camera: CameraConfig::default(),
            run: RunConfig::default(),
            cubes: vec![
                CubeDef { name: "stone".into(), id: Some(1) },
                CubeDef { name: "dirt".into(), id: Some(2) },
                CubeDef { name: "grass".into(), id: Some(3) },
            ],
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            grid: [2, 1, 2],
            fill: "stone".into(),
            edits: vec![
                EditConfig { at: [4.1, 7.9, 4.1], cube: "air".into() },
                EditConfig { at: [8.1, 7.9, 8.1], cube: "grass".into() },
            ],
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [8.0, 14.0, 28.0],
            yaw: -90.0,
            pitch: 25.0,
            fov_deg: 70.0,
            near: 0.1,
            far: 500.0,
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            frames: 120,
            aspect: 16.0 / 9.0,
            spin: 0.5,
            strafe: 0.02,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: AppConfig = toml::from_str(toml_str)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("config {} not found; using defaults", path.display());
            return Ok(Self::default());
        }
        let s = fs::read_to_string(path)?;
        let cfg = Self::from_toml_str(&s)?;
        log::info!("loaded config {}", path.display());
        Ok(cfg)
    }

    pub fn cubes_config(&self) -> CubesConfig {
        CubesConfig {
            cubes: self.cubes.clone(),
        }
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.world.grid.contains(&0) {
            return Err(format!("world.grid must be non-zero, got {:?}", self.world.grid).into());
        }
        if !(self.camera.near > 0.0 && self.camera.far > self.camera.near) {
            return Err(format!(
                "camera clip planes out of order: near={} far={}",
                self.camera.near, self.camera.far
            )
            .into());
        }
        if self.run.aspect <= 0.0 {
            return Err(format!("run.aspect must be positive, got {}", self.run.aspect).into());
        }
        Ok(())
    }
}
