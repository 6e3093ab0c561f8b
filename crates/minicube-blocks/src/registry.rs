use std::error::Error;
use std::fs;
use std::path::Path;

use hashbrown::HashMap;

use super::config::{CubeDef, CubesConfig};
use super::types::CubeId;

pub const AIR_NAME: &str = "air";

#[derive(Clone, Debug)]
pub struct CubeType {
    pub id: CubeId,
    pub name: String,
}

/// Name <-> id table. Id 0 is always air.
#[derive(Clone, Debug)]
pub struct CubeRegistry {
    pub cubes: Vec<Option<CubeType>>,
    pub by_name: HashMap<String, CubeId>,
}

impl Default for CubeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CubeRegistry {
    pub fn new() -> Self {
        let mut by_name = HashMap::new();
        by_name.insert(AIR_NAME.to_string(), CubeId::AIR);
        Self {
            cubes: vec![Some(CubeType {
                id: CubeId::AIR,
                name: AIR_NAME.to_string(),
            })],
            by_name,
        }
    }

    #[inline]
    pub fn get(&self, id: CubeId) -> Option<&CubeType> {
        self.cubes.get(id.0 as usize).and_then(|c| c.as_ref())
    }

    pub fn id_by_name(&self, name: &str) -> Option<CubeId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: CubeId) -> Option<&str> {
        self.get(id).map(|c| c.name.as_str())
    }

    /// Number of registered cubes, air included.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Registers a cube; ids are assigned after the highest one in use unless given.
    pub fn register(&mut self, def: CubeDef) -> Result<CubeId, Box<dyn Error>> {
        if def.name.is_empty() {
            return Err("cube name must not be empty".into());
        }
        if self.by_name.contains_key(&def.name) {
            return Err(format!("duplicate cube name '{}'", def.name).into());
        }
        let id = match def.id {
            Some(0) => return Err(format!("cube '{}': id 0 is reserved for air", def.name).into()),
            Some(raw) => CubeId(raw),
            None => {
                let next = self.cubes.len();
                let raw = u16::try_from(next)
                    .map_err(|_| format!("cube '{}': id space exhausted", def.name))?;
                CubeId(raw)
            }
        };
        let ix = id.0 as usize;
        if self.get(id).is_some() {
            return Err(format!("cube '{}': id {} already taken", def.name, id.0).into());
        }
        if self.cubes.len() <= ix {
            self.cubes.resize(ix + 1, None);
        }
        self.by_name.insert(def.name.clone(), id);
        self.cubes[ix] = Some(CubeType { id, name: def.name });
        Ok(id)
    }

    pub fn from_config(cfg: CubesConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = CubeRegistry::new();
        // Explicit ids first so automatic assignment can't steal them.
        let (explicit, auto): (Vec<CubeDef>, Vec<CubeDef>) =
            cfg.cubes.into_iter().partition(|d| d.id.is_some());
        for def in explicit.into_iter().chain(auto) {
            reg.register(def)?;
        }
        Ok(reg)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: CubesConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}
